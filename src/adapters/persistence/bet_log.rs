//! Bet Logger - Append-only JSONL Bet Records
//!
//! Every accepted bet is appended to `bets.jsonl` as one self-contained
//! JSON line. Malformed lines (e.g. a torn final write) are skipped on load.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use crate::ports::repository::BetRecord;

/// Append-only JSONL bet logger.
pub struct BetLogger {
    path: PathBuf,
}

impl BetLogger {
    /// Create a new bet logger in the given data directory.
    pub async fn new(data_dir: &str) -> Result<Self> {
        let dir = Path::new(data_dir);
        fs::create_dir_all(dir)
            .await
            .context("Failed to create data directory")?;

        Ok(Self {
            path: dir.join("bets.jsonl"),
        })
    }

    /// Append a bet record.
    #[instrument(skip(self, record), fields(bet_id = %record.id))]
    pub async fn append(&self, record: &BetRecord) -> Result<()> {
        let mut json = serde_json::to_string(record)
            .context("Failed to serialize bet record")?;
        json.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .context("Failed to open bet log file")?;

        file.write_all(json.as_bytes())
            .await
            .context("Failed to write bet record")?;

        file.flush().await.context("Failed to flush bet log")?;

        Ok(())
    }

    /// Load all bet records, oldest first.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> Result<Vec<BetRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .context("Failed to read bet log")?;

        let mut bets = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<BetRecord>(line) {
                Ok(record) => bets.push(record),
                Err(e) => {
                    warn!(
                        file = %self.path.display(),
                        error = %e,
                        "Skipping malformed bet record"
                    );
                }
            }
        }

        bets.sort_by_key(|b| b.placed_at);
        debug!(count = bets.len(), "Loaded bet records");
        Ok(bets)
    }

    pub async fn is_healthy(&self) -> bool {
        match self.path.parent() {
            Some(dir) => fs::metadata(dir).await.is_ok(),
            None => false,
        }
    }
}
