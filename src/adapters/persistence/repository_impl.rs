//! Repository Implementation — Concrete Adapter for the Ledger Port
//!
//! Wraps `LedgerStore` (atomic JSON ledger) and `BetLogger` (JSONL audit
//! log) into a single struct that implements `LedgerRepository`. The use
//! cases only ever see the trait, never files or JSON.

use anyhow::Result;
use async_trait::async_trait;

use super::bet_log::BetLogger;
use super::ledger_store::LedgerStore;
use crate::ports::repository::{BetRecord, Ledger, LedgerRepository};

/// File-backed repository combining ledger snapshots and the bet log.
pub struct RepositoryImpl {
    ledger_store: LedgerStore,
    bet_logger: BetLogger,
}

impl RepositoryImpl {
    pub const fn new(ledger_store: LedgerStore, bet_logger: BetLogger) -> Self {
        Self {
            ledger_store,
            bet_logger,
        }
    }

    /// Create both stores under `data_dir`, creating it as needed.
    pub async fn from_data_dir(data_dir: &str) -> Result<Self> {
        let ledger_store = LedgerStore::new(data_dir).await?;
        let bet_logger = BetLogger::new(data_dir).await?;
        Ok(Self::new(ledger_store, bet_logger))
    }
}

#[async_trait]
impl LedgerRepository for RepositoryImpl {
    async fn load_ledger(&self) -> Result<Option<Ledger>> {
        self.ledger_store.load().await
    }

    async fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        self.ledger_store.save(ledger).await
    }

    async fn append_bet(&self, record: &BetRecord) -> Result<()> {
        self.bet_logger.append(record).await
    }

    async fn load_bets(&self) -> Result<Vec<BetRecord>> {
        self.bet_logger.load_all().await
    }

    async fn is_healthy(&self) -> bool {
        self.ledger_store.is_healthy().await && self.bet_logger.is_healthy().await
    }
}
