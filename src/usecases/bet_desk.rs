//! Bet Desk Use Case - Ledger Ownership and Bet Commit
//!
//! Holds the in-memory ledger on behalf of the host, opens markets on first
//! access, and runs bets through the settlement flow. A bet is committed by
//! saving the whole next ledger in one repository write; only after that
//! write succeeds does the desk swap the new ledger in. A failed save leaves
//! the desk exactly as it was.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::bet_settlement::{self, BetQuote};
use crate::domain::errors::BetError;
use crate::domain::market::{Market, Side};
use crate::domain::pnl::{PnlReport, compute_pnl};
use crate::domain::pool::PoolState;
use crate::ports::clock::Clock;
use crate::ports::repository::{BetRecord, Ledger, LedgerRepository, MarketBook};

/// Why a bet did not go through.
#[derive(Debug, thiserror::Error)]
pub enum BetDeskError {
  /// The bet itself was invalid. State is unchanged.
  #[error(transparent)]
  Rejected(#[from] BetError),

  /// The bet was valid but the ledger could not be saved. State is unchanged.
  #[error("Failed to persist ledger: {0}")]
  Storage(anyhow::Error),
}

/// Everything the host needs to confirm a bet to the user.
#[derive(Debug, Clone)]
pub struct BetReceipt {
  pub record: BetRecord,
  /// Quote on the pool as it was before this bet.
  pub quote: BetQuote,
  /// Position PnL on the pool after this bet.
  pub pnl: PnlReport,
}

/// Owns the ledger and commits bets through a `LedgerRepository`.
///
/// Ledger and bet timestamps come from the injected `Clock`.
pub struct BetDesk<R: LedgerRepository, C: Clock> {
  repo: R,
  clock: C,
  ledger: Ledger,
}

impl<R: LedgerRepository, C: Clock> BetDesk<R, C> {
  /// Load the stored ledger, or start fresh with `initial_balance`.
  ///
  /// A stored ledger that breaks its invariants (negative or non-finite
  /// balance, pools or positions) is refused rather than restored.
  pub async fn restore(repo: R, clock: C, initial_balance: f64) -> Result<Self> {
    let ledger = match repo
      .load_ledger()
      .await
      .context("Failed to load ledger")?
    {
      Some(ledger) => {
        ledger.validate().context("Stored ledger is corrupt")?;
        info!(
          balance = ledger.balance,
          markets = ledger.markets.len(),
          "Ledger restored"
        );
        ledger
      }
      None => {
        info!(balance = initial_balance, "Starting with a fresh ledger");
        Ledger::new(initial_balance)
      }
    };

    Ok(Self { repo, clock, ledger })
  }

  /// Make sure `market` has an initialized pool.
  ///
  /// Existing pools are left alone. New ones get the randomized bull-heavy
  /// split; pass a seed for reproducible liquidity (it is offset by the
  /// market's pair index so markets still differ).
  pub async fn open_market(&mut self, market: &Market, seed: Option<u64>) -> Result<PoolState> {
    if let Some(book) = self.ledger.book(&market.id) {
      if book.pool.is_initialized() {
        return Ok(book.pool);
      }
    }

    let pool = match seed {
      Some(seed) => PoolState::seeded(market, seed.wrapping_add(u64::from(market.pair_index))),
      None => PoolState::init(market, &mut rand::thread_rng()),
    };

    let mut next = self.ledger.clone();
    let position = next
      .book(&market.id)
      .map(|b| b.position)
      .unwrap_or_default();
    next.markets.insert(market.id.clone(), MarketBook { pool, position });
    next.updated_at_ms = self.clock.now_ms();

    self
      .repo
      .save_ledger(&next)
      .await
      .with_context(|| format!("Failed to save ledger after opening {}", market.id))?;
    self.ledger = next;

    info!(
      market_id = %market.id,
      bull = pool.bull,
      bear = pool.bear,
      "Market pool initialized"
    );

    Ok(pool)
  }

  /// Place a bet of `amount` on `side` in `market_id`.
  pub async fn place_bet(
    &mut self,
    market_id: &str,
    side: Side,
    amount: f64,
  ) -> Result<BetReceipt, BetDeskError> {
    let book = self
      .ledger
      .book(market_id)
      .filter(|b| b.pool.is_initialized())
      .copied()
      .ok_or_else(|| BetError::UninitializedMarket(market_id.to_string()))?;

    let settled = match bet_settlement::place_bet(
      self.ledger.balance,
      book.pool,
      book.position,
      side,
      amount,
    ) {
      Ok(settled) => settled,
      Err(e) => {
        warn!(market_id, %side, amount, reason = e.reason(), "Bet rejected");
        return Err(e.into());
      }
    };
    let quote = bet_settlement::quote(&book.pool, side, amount);

    let mut next = self.ledger.clone();
    next.balance = settled.balance;
    next.markets.insert(
      market_id.to_string(),
      MarketBook {
        pool: settled.pool,
        position: settled.position,
      },
    );
    let now_ms = self.clock.now_ms();
    next.updated_at_ms = now_ms;

    self
      .repo
      .save_ledger(&next)
      .await
      .map_err(BetDeskError::Storage)?;
    self.ledger = next;

    let record = BetRecord {
      id: Uuid::new_v4().to_string(),
      market_id: market_id.to_string(),
      side,
      amount,
      odds_at_quote: quote.odds,
      balance_after: settled.balance,
      placed_at: to_datetime(now_ms),
    };

    // The ledger is the source of truth; a lost audit line is not fatal.
    if let Err(e) = self.repo.append_bet(&record).await {
      warn!(bet_id = %record.id, error = %e, "Failed to append bet record");
    }

    let pnl = compute_pnl(&settled.position, &settled.pool);

    info!(
      bet_id = %record.id,
      market_id,
      %side,
      amount,
      odds = quote.odds,
      potential_profit = quote.profit,
      balance = settled.balance,
      "Bet placed"
    );

    Ok(BetReceipt { record, quote, pnl })
  }

  /// Quote a bet on a market's current pool.
  ///
  /// The amount is checked the same way `place_bet` checks it; the balance
  /// is not, so a quote may exceed what the user can stake.
  pub fn quote(&self, market_id: &str, side: Side, amount: f64) -> Result<BetQuote, BetError> {
    let book = self.initialized_book(market_id)?;
    bet_settlement::validate_amount(amount)?;
    Ok(bet_settlement::quote(&book.pool, side, amount))
  }

  /// Current PnL for the user's position in `market_id`.
  pub fn pnl(&self, market_id: &str) -> Result<PnlReport, BetError> {
    let book = self.initialized_book(market_id)?;
    Ok(compute_pnl(&book.position, &book.pool))
  }

  pub fn book(&self, market_id: &str) -> Option<&MarketBook> {
    self.ledger.book(market_id)
  }

  pub const fn balance(&self) -> f64 {
    self.ledger.balance
  }

  pub const fn ledger(&self) -> &Ledger {
    &self.ledger
  }

  pub const fn repository(&self) -> &R {
    &self.repo
  }

  fn initialized_book(&self, market_id: &str) -> Result<&MarketBook, BetError> {
    self
      .ledger
      .book(market_id)
      .filter(|b| b.pool.is_initialized())
      .ok_or_else(|| BetError::UninitializedMarket(market_id.to_string()))
  }
}

fn to_datetime(ms: u64) -> DateTime<Utc> {
  i64::try_from(ms)
    .ok()
    .and_then(DateTime::<Utc>::from_timestamp_millis)
    .unwrap_or_default()
}
