//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and
//! providing clear error messages for misconfiguration.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    markets = config.markets().len(),
    initial_balance = config.app.initial_balance,
    poll_interval_ms = config.oracle.poll_interval_ms,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(!config.app.name.is_empty(), "app.name must not be empty");

  anyhow::ensure!(
    config.app.initial_balance.is_finite() && config.app.initial_balance > 0.0,
    "initial_balance must be positive, got {}",
    config.app.initial_balance
  );

  anyhow::ensure!(
    config.oracle.poll_interval_ms > 0,
    "oracle.poll_interval_ms must be positive"
  );

  // Market validation
  let mut seen = HashSet::new();
  for (i, market) in config.markets.iter().enumerate() {
    anyhow::ensure!(
      !market.id.is_empty(),
      "Market {} ({}) has empty id",
      i,
      market.name
    );
    anyhow::ensure!(
      seen.insert(market.id.as_str()),
      "Duplicate market id: {}",
      market.id
    );
  }

  anyhow::ensure!(
    !config.persistence.data_dir.is_empty(),
    "persistence.data_dir must not be empty"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_minimal_config_uses_defaults() {
    let config = parse_config("[app]\nname = \"parity\"\n").unwrap();
    assert_eq!(config.app.initial_balance, 10_000.0);
    assert_eq!(config.oracle.poll_interval_ms, 3_000);
    assert_eq!(config.persistence.data_dir, "data");
    assert!(config.app.pool_seed.is_none());
    assert_eq!(config.markets().len(), 4);
  }

  #[test]
  fn test_configured_markets_replace_catalog() {
    let config = parse_config(
      r#"
      [app]
      name = "parity"
      pool_seed = 7

      [[markets]]
      id = "jitosol-sol"
      name = "JitoSOL/SOL"
      pair_index = 0
      "#,
    )
    .unwrap();
    let markets = config.markets();
    assert_eq!(markets.len(), 1);
    assert_eq!(markets[0].id, "jitosol-sol");
    assert_eq!(config.app.pool_seed, Some(7));
  }

  #[test]
  fn test_duplicate_market_ids_rejected() {
    let result = parse_config(
      r#"
      [app]
      name = "parity"

      [[markets]]
      id = "msol-sol"
      name = "a"
      pair_index = 1

      [[markets]]
      id = "msol-sol"
      name = "b"
      pair_index = 2
      "#,
    );
    assert!(result.is_err());
  }

  #[test]
  fn test_non_positive_balance_rejected() {
    let result = parse_config("[app]\nname = \"parity\"\ninitial_balance = 0.0\n");
    assert!(result.is_err());
  }
}
