//! In-Memory Repository - Volatile Ledger Storage
//!
//! Implements `LedgerRepository` without touching disk. Used by tests and
//! by hosts that run with persistence disabled.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::repository::{BetRecord, Ledger, LedgerRepository};

#[derive(Default)]
pub struct MemoryRepository {
    ledger: RwLock<Option<Ledger>>,
    bets: RwLock<Vec<BetRecord>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with a stored ledger.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: RwLock::new(Some(ledger)),
            bets: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LedgerRepository for MemoryRepository {
    async fn load_ledger(&self) -> Result<Option<Ledger>> {
        Ok(self.ledger.read().await.clone())
    }

    async fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        *self.ledger.write().await = Some(ledger.clone());
        Ok(())
    }

    async fn append_bet(&self, record: &BetRecord) -> Result<()> {
        self.bets.write().await.push(record.clone());
        Ok(())
    }

    async fn load_bets(&self) -> Result<Vec<BetRecord>> {
        Ok(self.bets.read().await.clone())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
