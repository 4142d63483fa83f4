//! Bet rejection reasons.
//!
//! All of these are caller input errors: they are returned as values, never
//! retried, and leave every piece of state untouched.

use super::market::MarketId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BetError {
    /// Amount is non-numeric, zero, negative, or not finite.
    #[error("Invalid bet amount")]
    InvalidAmount,

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },

    /// No initialized pool/position for this market.
    #[error("Market {0} is not initialized")]
    UninitializedMarket(MarketId),
}

impl BetError {
    /// Short label for metrics.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "invalid_amount",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::UninitializedMarket(_) => "uninitialized_market",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BetError::InsufficientBalance {
            requested: 150.0,
            available: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: requested 150, available 100"
        );
        assert_eq!(
            BetError::UninitializedMarket("msol-sol".to_string()).to_string(),
            "Market msol-sol is not initialized"
        );
    }

    #[test]
    fn test_reason_labels() {
        assert_eq!(BetError::InvalidAmount.reason(), "invalid_amount");
    }
}
