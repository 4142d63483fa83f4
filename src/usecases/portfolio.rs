//! Portfolio Use Case - Cross-Market Position Summary
//!
//! Builds one row per market where the user holds a stake, with current
//! odds and PnL, plus totals across all markets.

use serde::Serialize;

use crate::domain::market::{Market, MarketId};
use crate::domain::pnl::{PnlReport, compute_pnl};
use crate::domain::pool::Odds;
use crate::ports::repository::Ledger;

/// One market's contribution to the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioRow {
  pub market_id: MarketId,
  pub market_name: String,
  pub bull: f64,
  pub bear: f64,
  pub bull_pool: f64,
  pub bear_pool: f64,
  pub odds: Odds,
  pub pnl: PnlReport,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
  pub rows: Vec<PortfolioRow>,
  /// Sum of all stakes.
  pub total_invested: f64,
  /// Sum of per-market expected values.
  pub total_expected_value: f64,
}

/// Summarize the user's positions across `markets`, in catalog order.
///
/// Markets without a book, without an initialized pool, or with an empty
/// position are skipped.
pub fn summarize(markets: &[Market], ledger: &Ledger) -> PortfolioSummary {
  let rows: Vec<PortfolioRow> = markets
    .iter()
    .filter_map(|market| {
      let book = ledger.book(&market.id)?;
      if book.position.is_empty() || !book.pool.is_initialized() {
        return None;
      }
      Some(PortfolioRow {
        market_id: market.id.clone(),
        market_name: market.name.clone(),
        bull: book.position.bull,
        bear: book.position.bear,
        bull_pool: book.pool.bull,
        bear_pool: book.pool.bear,
        odds: book.pool.odds(),
        pnl: compute_pnl(&book.position, &book.pool),
      })
    })
    .collect();

  let total_invested = rows.iter().map(|r| r.bull + r.bear).sum();
  let total_expected_value = rows.iter().map(|r| r.pnl.expected_value).sum();

  PortfolioSummary {
    rows,
    total_invested,
    total_expected_value,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::market::default_markets;
  use crate::domain::pool::PoolState;
  use crate::domain::position::Position;
  use crate::ports::repository::MarketBook;

  #[test]
  fn test_only_markets_with_stakes_are_listed() {
    let markets = default_markets();
    let mut ledger = Ledger::new(9_000.0);
    ledger.markets.insert(
      "msol-sol".to_string(),
      MarketBook {
        pool: PoolState::new(90_000.0, 10_500.0),
        position: Position::new(0.0, 500.0),
      },
    );
    ledger.markets.insert(
      "jitosol-sol".to_string(),
      MarketBook {
        pool: PoolState::new(50_000.0, 50_000.0),
        position: Position::default(),
      },
    );
    ledger.markets.insert(
      "stsol-sol".to_string(),
      MarketBook {
        pool: PoolState::new(60_000.0, 40_000.0),
        position: Position::new(300.0, 200.0),
      },
    );

    let summary = summarize(&markets, &ledger);
    let ids: Vec<&str> = summary.rows.iter().map(|r| r.market_id.as_str()).collect();
    assert_eq!(ids, vec!["msol-sol", "stsol-sol"]);
    assert_eq!(summary.total_invested, 1_000.0);
    assert_eq!(summary.rows[0].market_name, "mSOL/SOL");
    assert!((summary.rows[0].pnl.bear_pnl_if_wins - 4285.714).abs() < 1e-2);
  }

  #[test]
  fn test_empty_ledger_summarizes_to_zero() {
    let summary = summarize(&default_markets(), &Ledger::new(10_000.0));
    assert_eq!(summary, PortfolioSummary::default());
  }
}
