//! Persistence Adapters - Local Ledger Cache
//!
//! Implements the `LedgerRepository` port with an atomic JSON ledger
//! snapshot plus an append-only JSONL bet log, and an in-memory variant
//! for tests. No database dependency.

pub mod bet_log;
pub mod ledger_store;
pub mod memory;
pub mod repository_impl;

pub use bet_log::BetLogger;
pub use ledger_store::LedgerStore;
pub use memory::MemoryRepository;
pub use repository_impl::RepositoryImpl;
