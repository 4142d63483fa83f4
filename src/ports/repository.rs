//! Repository Port - Ledger Persistence Interface
//!
//! The host owns load/save of balances, pools and positions. The domain
//! never touches storage; it receives a `Ledger` and hands back new values.
//! Accepted bets are additionally appended to an audit log.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::market::{MarketId, Side};
use crate::domain::pool::PoolState;
use crate::domain::position::Position;

/// Current on-disk ledger format.
pub const LEDGER_VERSION: &str = "1";

/// Pool and user position for one market.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketBook {
  pub pool: PoolState,
  #[serde(default)]
  pub position: Position,
}

/// Everything the host persists between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
  /// Version of the ledger format.
  pub version: String,
  /// Available stake currency.
  pub balance: f64,
  /// Books keyed by market identifier.
  #[serde(default)]
  pub markets: BTreeMap<MarketId, MarketBook>,
  /// Last modification (Unix ms).
  pub updated_at_ms: u64,
}

impl Ledger {
  /// Fresh ledger with no markets opened yet.
  pub fn new(initial_balance: f64) -> Self {
    Self {
      version: LEDGER_VERSION.to_string(),
      balance: initial_balance,
      markets: BTreeMap::new(),
      updated_at_ms: 0,
    }
  }

  pub fn book(&self, market_id: &str) -> Option<&MarketBook> {
    self.markets.get(market_id)
  }

  /// Sum of stakes across all markets.
  pub fn total_staked(&self) -> f64 {
    self.markets.values().map(|b| b.position.total_staked()).sum()
  }

  /// Check the invariants a stored ledger must satisfy before use.
  ///
  /// Balance, pools and positions are all finite and non-negative. Pools
  /// may still be empty; those markets are opened again on first access.
  pub fn validate(&self) -> anyhow::Result<()> {
    anyhow::ensure!(
      is_amount(self.balance),
      "ledger balance must be finite and non-negative, got {}",
      self.balance
    );

    for (market_id, book) in &self.markets {
      anyhow::ensure!(
        is_amount(book.pool.bull) && is_amount(book.pool.bear),
        "pool for {market_id} must be finite and non-negative, got {:?}",
        book.pool
      );
      anyhow::ensure!(
        is_amount(book.position.bull) && is_amount(book.position.bear),
        "position in {market_id} must be finite and non-negative, got {:?}",
        book.position
      );
    }

    Ok(())
  }
}

fn is_amount(value: f64) -> bool {
  value.is_finite() && value >= 0.0
}

/// Audit record for an accepted bet (JSONL persistence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRecord {
  /// Unique bet identifier.
  pub id: String,
  /// Market the bet was placed in.
  pub market_id: MarketId,
  pub side: Side,
  pub amount: f64,
  /// Odds on `side` just before the bet went into the pool.
  pub odds_at_quote: f64,
  /// Balance after the debit.
  pub balance_after: f64,
  /// When the bet settled.
  pub placed_at: DateTime<Utc>,
}

/// Trait for ledger persistence providers.
#[async_trait]
pub trait LedgerRepository: Send + Sync + 'static {
  /// Load the stored ledger, or `None` on first run.
  async fn load_ledger(&self) -> anyhow::Result<Option<Ledger>>;

  /// Replace the stored ledger in one write.
  async fn save_ledger(&self, ledger: &Ledger) -> anyhow::Result<()>;

  /// Append an accepted bet to the audit log.
  async fn append_bet(&self, record: &BetRecord) -> anyhow::Result<()>;

  /// Load the full bet history, oldest first.
  async fn load_bets(&self) -> anyhow::Result<Vec<BetRecord>>;

  /// Check if the repository is usable (directory present, readable).
  async fn is_healthy(&self) -> bool;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ledger_with_book(pool: PoolState, position: Position) -> Ledger {
    let mut ledger = Ledger::new(1_000.0);
    ledger
      .markets
      .insert("bsol-sol".to_string(), MarketBook { pool, position });
    ledger
  }

  #[test]
  fn test_valid_ledger_passes() {
    let ledger = ledger_with_book(PoolState::new(90.0, 10.0), Position::new(5.0, 0.0));
    assert!(ledger.validate().is_ok());
    assert!(Ledger::new(0.0).validate().is_ok());
    assert!((ledger.total_staked() - 5.0).abs() < 1e-12);
  }

  #[test]
  fn test_empty_pool_is_allowed() {
    let ledger = ledger_with_book(PoolState::new(0.0, 0.0), Position::default());
    assert!(ledger.validate().is_ok());
  }

  #[test]
  fn test_bad_balance_rejected() {
    for balance in [-50.0, f64::NAN, f64::INFINITY] {
      assert!(Ledger::new(balance).validate().is_err(), "balance {balance}");
    }
  }

  #[test]
  fn test_negative_position_rejected() {
    let ledger = ledger_with_book(PoolState::new(90.0, 10.0), Position::new(-7.0, 0.0));
    let err = ledger.validate().unwrap_err();
    assert!(err.to_string().contains("bsol-sol"));
  }

  #[test]
  fn test_non_finite_pool_rejected() {
    let ledger = ledger_with_book(PoolState::new(f64::INFINITY, 10.0), Position::default());
    assert!(ledger.validate().is_err());
  }
}
