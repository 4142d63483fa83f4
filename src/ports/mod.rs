//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use cases layer requires from
//! the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `Clock`: Current time for the synthetic oracle
//! - `LedgerRepository`: Ledger persistence and bet audit log (JSON/JSONL)

pub mod clock;
pub mod repository;
