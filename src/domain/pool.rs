//! Two-sided pari-mutuel pool.
//!
//! Each market holds a BULL pool and a BEAR pool. Payout odds for a side are
//! the inverse of that side's share of the total, so a winning stake `s` on
//! side X pays `s * total / X`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::market::{Market, Side};

const BASE_LIQUIDITY: f64 = 50_000.0;
const LIQUIDITY_PER_INDEX: f64 = 10_000.0;
const LIQUIDITY_MULTIPLIER: f64 = 5.0;
const BULL_SHARE: f64 = 0.9;
const BEAR_SHARE: f64 = 0.1;
const BULL_SKEW: f64 = 10_000.0;
const BEAR_SKEW: f64 = 5_000.0;

/// Pool balances for one market.
///
/// Both sides are strictly positive once initialized, which keeps the odds
/// finite. Balances only grow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    pub bull: f64,
    pub bear: f64,
}

/// Payout multipliers for each side (`payout = stake * odds`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    pub bull: f64,
    pub bear: f64,
}

impl Odds {
    pub const fn for_side(&self, side: Side) -> f64 {
        match side {
            Side::Bull => self.bull,
            Side::Bear => self.bear,
        }
    }

    /// Implied probability of the BULL outcome with the overround removed.
    pub fn bull_probability(&self) -> f64 {
        let bull_implied = 1.0 / self.bull;
        let bear_implied = 1.0 / self.bear;
        bull_implied / (bull_implied + bear_implied)
    }
}

impl PoolState {
    pub const fn new(bull: f64, bear: f64) -> Self {
        Self { bull, bear }
    }

    /// Initial liquidity for a market, skewed towards BULL.
    ///
    /// Holding the peg is the likely outcome, so roughly 90% of the pool
    /// starts on BULL. Total depth grows with the market's pair index, and a
    /// random top-up on each side keeps markets from looking identical.
    pub fn init<R: Rng>(market: &Market, rng: &mut R) -> Self {
        let base = BASE_LIQUIDITY + f64::from(market.pair_index) * LIQUIDITY_PER_INDEX;
        let total = base * LIQUIDITY_MULTIPLIER;
        Self {
            bull: total * BULL_SHARE + rng.gen_range(0.0..BULL_SKEW),
            bear: total * BEAR_SHARE + rng.gen_range(0.0..BEAR_SKEW),
        }
    }

    /// Deterministic [`PoolState::init`] driven by a ChaCha8 seed.
    pub fn seeded(market: &Market, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::init(market, &mut rng)
    }

    pub fn total(&self) -> f64 {
        self.bull + self.bear
    }

    pub const fn side(&self, side: Side) -> f64 {
        match side {
            Side::Bull => self.bull,
            Side::Bear => self.bear,
        }
    }

    /// Fraction of the total pool sitting on `side`.
    pub fn share(&self, side: Side) -> f64 {
        self.side(side) / self.total()
    }

    /// Both sides strictly positive and finite.
    pub fn is_initialized(&self) -> bool {
        self.bull.is_finite() && self.bear.is_finite() && self.bull > 0.0 && self.bear > 0.0
    }

    /// Payout odds: `total / bull` and `total / bear`.
    ///
    /// Only meaningful on an initialized pool; an empty side yields an
    /// infinite multiplier.
    pub fn odds(&self) -> Odds {
        let total = self.total();
        Odds {
            bull: total / self.bull,
            bear: total / self.bear,
        }
    }

    /// Pool with `amount` added to `side`. Bets are never removed.
    #[must_use]
    pub fn apply_bet(self, side: Side, amount: f64) -> Self {
        match side {
            Side::Bull => Self {
                bull: self.bull + amount,
                ..self
            },
            Side::Bear => Self {
                bear: self.bear + amount,
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::default_markets;

    #[test]
    fn test_odds_times_side_equals_total() {
        let pool = PoolState::new(90_000.0, 10_000.0);
        let odds = pool.odds();
        assert!((odds.bull * pool.bull - pool.total()).abs() < 1e-6);
        assert!((odds.bear * pool.bear - pool.total()).abs() < 1e-6);
        assert!(odds.bull >= 1.0 && odds.bear >= 1.0);
    }

    #[test]
    fn test_bear_bet_shifts_odds() {
        let pool = PoolState::new(90_000.0, 10_000.0).apply_bet(Side::Bear, 500.0);
        assert_eq!(pool, PoolState::new(90_000.0, 10_500.0));
        let odds = pool.odds();
        assert!((odds.bear - 100_500.0 / 10_500.0).abs() < 1e-9);
        assert!((odds.bear - 9.571).abs() < 1e-3);
    }

    #[test]
    fn test_apply_zero_is_identity() {
        let pool = PoolState::new(1.0, 2.0);
        assert_eq!(pool.apply_bet(Side::Bull, 0.0), pool);
    }

    #[test]
    fn test_implied_probability_matches_share() {
        let pool = PoolState::new(75.0, 25.0);
        let p_bull = pool.odds().bull_probability();
        assert!((p_bull - pool.share(Side::Bull)).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_init_is_deterministic_and_skewed() {
        for market in default_markets() {
            let a = PoolState::seeded(&market, 7);
            let b = PoolState::seeded(&market, 7);
            assert_eq!(a, b);
            assert!(a.is_initialized());

            let total = (50_000.0 + f64::from(market.pair_index) * 10_000.0) * 5.0;
            assert!(a.bull >= total * 0.9 && a.bull < total * 0.9 + 10_000.0);
            assert!(a.bear >= total * 0.1 && a.bear < total * 0.1 + 5_000.0);
            assert!(a.share(Side::Bull) > 0.8);
        }
    }

    #[test]
    fn test_deeper_markets_have_more_liquidity() {
        let markets = default_markets();
        let shallow = PoolState::seeded(&markets[0], 1);
        let deep = PoolState::seeded(&markets[3], 1);
        assert!(deep.total() > shallow.total());
    }

    #[test]
    fn test_empty_side_is_not_initialized() {
        assert!(!PoolState::new(100.0, 0.0).is_initialized());
        assert!(!PoolState::new(f64::NAN, 10.0).is_initialized());
    }
}
