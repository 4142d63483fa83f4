//! Market reference data.
//!
//! Markets are immutable after startup. Each one tracks the exchange ratio
//! of a liquid staking token against SOL, identified by its oracle pair index.

use serde::{Deserialize, Serialize};

/// Lightweight market identifier (e.g. `jitosol-sol`).
pub type MarketId = String;

/// Side of a peg-deviation bet.
///
/// `Bull` wins if the peg holds, `Bear` wins if it breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bull,
    Bear,
}

impl Side {
    /// The opposing side.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Bull => Self::Bear,
            Self::Bear => Self::Bull,
        }
    }

    /// Lowercase label used for metrics and log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bull => "bull",
            Self::Bear => "bear",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bull => write!(f, "BULL"),
            Self::Bear => write!(f, "BEAR"),
        }
    }
}

/// A peg-deviation market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Stable identifier, also the persistence key.
    pub id: MarketId,
    /// Display name (e.g. `JitoSOL/SOL`).
    pub name: String,
    /// Short description of the staking token.
    pub description: String,
    /// Oracle pair index. Also scales the market's initial liquidity.
    pub pair_index: u32,
}

impl Market {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        pair_index: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            pair_index,
        }
    }
}

/// Built-in LST/SOL market catalog, used when config lists no markets.
pub fn default_markets() -> Vec<Market> {
    vec![
        Market::new("jitosol-sol", "JitoSOL/SOL", "Jito liquid staking token", 0),
        Market::new("msol-sol", "mSOL/SOL", "Marinade staked SOL", 1),
        Market::new("bsol-sol", "bSOL/SOL", "BlazeStake staked SOL", 2),
        Market::new("stsol-sol", "stSOL/SOL", "Lido staked SOL", 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_display() {
        assert_eq!(format!("{}", Side::Bull), "BULL");
        assert_eq!(format!("{}", Side::Bear), "BEAR");
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bull.opposite(), Side::Bear);
        assert_eq!(Side::Bear.opposite(), Side::Bull);
    }

    #[test]
    fn test_side_serializes_lowercase() {
        let json = serde_json::to_string(&Side::Bear).unwrap();
        assert_eq!(json, "\"bear\"");
    }

    #[test]
    fn test_default_catalog_indices_are_distinct() {
        let markets = default_markets();
        assert_eq!(markets.len(), 4);
        for (i, market) in markets.iter().enumerate() {
            assert_eq!(market.pair_index as usize, i);
        }
    }
}
