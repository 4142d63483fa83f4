//! Bet Settlement Flow - Validate, Debit, Credit
//!
//! Turns a bet request into new balance, pool and position values. The
//! inputs are taken by value and the three outputs come back together in
//! one `Settled`, so a caller either sees all of the update or none of it.
//!
//! Validation order (first failure wins):
//! 1. Amount must be finite and > 0 (`InvalidAmount`)
//! 2. Amount must not exceed the balance (`InsufficientBalance`)

use serde::{Deserialize, Serialize};

use crate::domain::errors::BetError;
use crate::domain::market::Side;
use crate::domain::pool::PoolState;
use crate::domain::position::Position;

/// State after a successful bet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settled {
  pub balance: f64,
  pub pool: PoolState,
  pub position: Position,
}

/// Payout preview for a prospective bet, priced on the current pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetQuote {
  pub side: Side,
  pub amount: f64,
  /// Odds on `side` before the bet.
  pub odds: f64,
  /// `amount * odds`.
  pub payout: f64,
  /// `payout - amount`.
  pub profit: f64,
}

/// Parse a user-entered amount.
///
/// Anything that is not a finite positive number is `InvalidAmount`.
pub fn parse_amount(input: &str) -> Result<f64, BetError> {
  let amount: f64 = input.trim().parse().map_err(|_| BetError::InvalidAmount)?;
  validate_amount(amount)?;
  Ok(amount)
}

/// Reject amounts that are not finite and positive.
pub(crate) fn validate_amount(amount: f64) -> Result<(), BetError> {
  if amount.is_finite() && amount > 0.0 {
    Ok(())
  } else {
    Err(BetError::InvalidAmount)
  }
}

/// Settle a bet against the given state.
pub fn place_bet(
  balance: f64,
  pool: PoolState,
  position: Position,
  side: Side,
  amount: f64,
) -> Result<Settled, BetError> {
  validate_amount(amount)?;

  // A NaN balance compares false both ways and must not admit the bet.
  if balance.is_nan() || amount > balance {
    return Err(BetError::InsufficientBalance {
      requested: amount,
      available: balance,
    });
  }

  Ok(Settled {
    balance: balance - amount,
    pool: pool.apply_bet(side, amount),
    position: position.apply_bet(side, amount),
  })
}

/// Quote a bet on the current pool without settling it.
pub fn quote(pool: &PoolState, side: Side, amount: f64) -> BetQuote {
  let odds = pool.odds().for_side(side);
  let payout = amount * odds;
  BetQuote {
    side,
    amount,
    odds,
    payout,
    profit: payout - amount,
  }
}
