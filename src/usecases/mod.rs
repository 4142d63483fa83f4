//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces. Each use case is a
//! self-contained business operation.
//!
//! Use cases:
//! - `bet_settlement`: Validate and settle a bet as one atomic value
//! - `BetDesk`: Ledger ownership, market opening, bet commit
//! - `portfolio`: Cross-market position and PnL summary
//! - `RatioPoller`: Sample the synthetic oracle for all markets

pub mod bet_desk;
pub mod bet_settlement;
pub mod portfolio;
pub mod ratio_poller;

pub use bet_desk::{BetDesk, BetDeskError, BetReceipt};
pub use ratio_poller::RatioPoller;
