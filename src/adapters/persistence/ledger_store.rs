//! Ledger Store - Atomic JSON Ledger Persistence
//!
//! Saves the ledger to `ledger.json` using atomic writes (write to a tmp
//! file, then rename). Balance, pools and positions always land together,
//! so a crash can never leave a debit without its matching credit on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::ports::repository::Ledger;

/// Atomic JSON ledger store.
pub struct LedgerStore {
    /// Path to ledger.json.
    ledger_path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
}

impl LedgerStore {
    /// Create a new ledger store in the given data directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub async fn new(data_dir: &str) -> Result<Self> {
        let dir = Path::new(data_dir);
        fs::create_dir_all(dir)
            .await
            .context("Failed to create data directory")?;

        Ok(Self {
            ledger_path: dir.join("ledger.json"),
            tmp_path: dir.join("ledger.json.tmp"),
        })
    }

    /// Save the ledger atomically (tmp → rename).
    #[instrument(skip(self, ledger))]
    pub async fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string_pretty(ledger)
            .context("Failed to serialize ledger")?;

        fs::write(&self.tmp_path, &json)
            .await
            .context("Failed to write tmp ledger file")?;

        fs::rename(&self.tmp_path, &self.ledger_path)
            .await
            .context("Failed to rename ledger file")?;

        debug!(
            path = %self.ledger_path.display(),
            balance = ledger.balance,
            markets = ledger.markets.len(),
            "Ledger saved"
        );

        Ok(())
    }

    /// Load the stored ledger.
    ///
    /// Returns `None` if no ledger file exists (first startup).
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Option<Ledger>> {
        if !self.ledger_path.exists() {
            info!("No ledger file found, starting fresh");
            return Ok(None);
        }

        let json = fs::read_to_string(&self.ledger_path)
            .await
            .context("Failed to read ledger file")?;

        let ledger: Ledger =
            serde_json::from_str(&json).context("Failed to parse ledger JSON")?;

        info!(
            version = %ledger.version,
            markets = ledger.markets.len(),
            "Ledger loaded"
        );

        Ok(Some(ledger))
    }

    /// Check if the ledger file is readable (or absent on first run).
    pub async fn is_healthy(&self) -> bool {
        if !self.ledger_path.exists() {
            return true;
        }
        fs::metadata(&self.ledger_path).await.is_ok()
    }
}
