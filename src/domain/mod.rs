//! Domain layer - Core betting model.
//!
//! Pure, synchronous logic for peg-deviation markets: synthetic oracle
//! ratios, pari-mutuel pools, user positions and PnL. Every function takes
//! state in and returns new state; nothing here performs I/O or holds
//! mutable globals (hexagonal architecture inner ring).

pub mod errors;
pub mod market;
pub mod pnl;
pub mod pool;
pub mod position;
pub mod ratio;

// Re-export core types for convenience
pub use errors::BetError;
pub use market::{Market, MarketId, Side, default_markets};
pub use pnl::{PnlReport, compute_pnl};
pub use pool::{Odds, PoolState};
pub use position::Position;
pub use ratio::{PegStatus, RatioSample};
