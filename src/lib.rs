//! Parity Markets — Library Root
//!
//! Simulated pari-mutuel betting core for LST/SOL peg deviation markets.
//! Re-exports all modules for integration tests and benchmarks.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
