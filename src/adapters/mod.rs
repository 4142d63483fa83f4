//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! infrastructure (file I/O, wall clock, HTTP).
//!
//! Adapter categories:
//! - `clock`: System clock for the ratio poller
//! - `metrics`: Prometheus metrics export and health checks
//! - `persistence`: JSON ledger snapshots and JSONL bet log

pub mod clock;
pub mod metrics;
pub mod persistence;
