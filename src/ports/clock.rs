//! Clock Port - Time Source for the Ratio Poller and Bet Desk
//!
//! The ratio generator is a pure function of time, and ledger and bet
//! timestamps are stamped by the desk, so the host injects the clock. Tests
//! use fixed clocks; production uses the system clock adapter.

/// Source of the current time in Unix milliseconds.
pub trait Clock: Send + Sync {
  fn now_ms(&self) -> u64;
}
