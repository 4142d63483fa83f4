//! Conditional and expected PnL for a position.
//!
//! For each outcome, the user collects `stake * odds` on the winning side and
//! forfeits everything on the losing side. The expected value weights the two
//! outcomes by the pool's implied probabilities, normalized so they sum to 1.

use serde::{Deserialize, Serialize};

use super::pool::PoolState;
use super::position::Position;

/// Net profit per outcome plus the probability-weighted expectation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlReport {
    pub bull_pnl_if_wins: f64,
    pub bear_pnl_if_wins: f64,
    pub expected_value: f64,
}

/// Compute PnL for `position` against the current `pool`.
///
/// An empty position returns all zeros without touching the odds, so an
/// unfunded side in the pool never produces a NaN here.
pub fn compute_pnl(position: &Position, pool: &PoolState) -> PnlReport {
    if position.is_empty() {
        return PnlReport::default();
    }

    let odds = pool.odds();
    let bull_pnl_if_wins = position.bull * odds.bull - position.bull - position.bear;
    let bear_pnl_if_wins = position.bear * odds.bear - position.bear - position.bull;

    let p_bull = odds.bull_probability();
    let p_bear = 1.0 - p_bull;

    PnlReport {
        bull_pnl_if_wins,
        bear_pnl_if_wins,
        expected_value: p_bull * bull_pnl_if_wins + p_bear * bear_pnl_if_wins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_position_is_all_zero() {
        let report = compute_pnl(&Position::default(), &PoolState::new(0.0, 0.0));
        assert_eq!(report, PnlReport::default());
    }

    #[test]
    fn test_bear_bet_end_to_end() {
        let pool = PoolState::new(90_000.0, 10_500.0);
        let position = Position::new(0.0, 500.0);
        let report = compute_pnl(&position, &pool);

        let bear_odds = 100_500.0 / 10_500.0;
        assert!((report.bear_pnl_if_wins - (500.0 * bear_odds - 500.0)).abs() < 1e-9);
        assert!((report.bear_pnl_if_wins - 4285.7).abs() < 0.1);
        assert!((report.bull_pnl_if_wins + 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_hedged_position_breaks_even_in_a_balanced_pool() {
        let pool = PoolState::new(1_000.0, 1_000.0);
        let position = Position::new(100.0, 100.0);
        let report = compute_pnl(&position, &pool);
        assert!(report.bull_pnl_if_wins.abs() < 1e-9);
        assert!(report.bear_pnl_if_wins.abs() < 1e-9);
        assert!(report.expected_value.abs() < 1e-9);
    }

    #[test]
    fn test_expected_value_is_zero_under_implied_probabilities() {
        // Pari-mutuel odds are exactly fair against their own implied probabilities.
        let pool = PoolState::new(900.0, 100.0);
        let position = Position::new(0.0, 50.0);
        let report = compute_pnl(&position, &pool);
        assert!(report.expected_value.abs() < 1e-9);
    }
}
