//! The user's stakes in one market.

use serde::{Deserialize, Serialize};

use super::market::Side;

/// Accumulated BULL and BEAR stakes. Stakes only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub bull: f64,
    pub bear: f64,
}

impl Position {
    pub const fn new(bull: f64, bear: f64) -> Self {
        Self { bull, bear }
    }

    pub const fn stake(&self, side: Side) -> f64 {
        match side {
            Side::Bull => self.bull,
            Side::Bear => self.bear,
        }
    }

    pub fn total_staked(&self) -> f64 {
        self.bull + self.bear
    }

    pub fn is_empty(&self) -> bool {
        self.bull == 0.0 && self.bear == 0.0
    }

    /// Position with `amount` added to `side`.
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
