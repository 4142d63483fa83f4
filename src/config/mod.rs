//! Configuration Module - TOML-based Host Configuration
//!
//! Loads and validates configuration from `config.toml`. Market reference
//! data, the starting balance and the oracle polling cadence live here;
//! nothing is hardcoded in the domain layer beyond the default catalog.

pub mod loader;

use serde::Deserialize;

use crate::domain::market::{Market, default_markets};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Host identity and ledger defaults.
  pub app: AppSection,
  /// Synthetic oracle polling.
  #[serde(default)]
  pub oracle: OracleConfig,
  /// Market definitions. Empty means the built-in catalog.
  #[serde(default)]
  pub markets: Vec<MarketConfig>,
  /// Persistence configuration.
  #[serde(default)]
  pub persistence: PersistenceConfig,
  /// Metrics and monitoring.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

impl AppConfig {
  /// Markets to serve: the configured ones, or the default catalog.
  pub fn markets(&self) -> Vec<Market> {
    if self.markets.is_empty() {
      return default_markets();
    }
    self
      .markets
      .iter()
      .map(|m| Market::new(&m.id, &m.name, &m.description, m.pair_index))
      .collect()
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable host name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Balance for a fresh ledger.
  #[serde(default = "default_initial_balance")]
  pub initial_balance: f64,
  /// Seed for pool initialization. Absent = fresh entropy per market.
  pub pool_seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
  /// Interval between ratio polls (milliseconds).
  #[serde(default = "default_poll_interval")]
  pub poll_interval_ms: u64,
}

impl Default for OracleConfig {
  fn default() -> Self {
    Self {
      poll_interval_ms: default_poll_interval(),
    }
  }
}

/// Individual market configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
  /// Market identifier (persistence key).
  pub id: String,
  /// Display name.
  pub name: String,
  #[serde(default)]
  pub description: String,
  /// Oracle pair index.
  pub pair_index: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
  /// Directory for `ledger.json` and `bets.jsonl`.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

impl Default for PersistenceConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Enable Prometheus metrics export.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Metrics server bind address.
  #[serde(default = "default_metrics_addr")]
  pub bind_address: String,
  /// Health check endpoint port.
  #[serde(default = "default_health_port")]
  pub health_port: u16,
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      bind_address: default_metrics_addr(),
      health_port: default_health_port(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_initial_balance() -> f64 {
  10_000.0
}

fn default_poll_interval() -> u64 {
  3_000
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_true() -> bool {
  true
}

fn default_metrics_addr() -> String {
  "0.0.0.0:9090".to_string()
}

fn default_health_port() -> u16 {
  8080
}
