//! Prometheus Metrics Registry - Market Observability
//!
//! Registers and exposes Prometheus metrics for pool depth, peg ratios,
//! balance and bet counts. All metrics follow the `parity_*` naming
//! convention and carry a `market` label where it applies.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use prometheus::{
    Encoder, Gauge, GaugeVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

use crate::domain::market::MarketId;
use crate::domain::ratio::RatioSample;
use crate::ports::repository::{BetRecord, MarketBook};

pub struct MetricsRegistry {
    registry: Registry,
    /// Accepted bets.
    pub bets_placed: IntCounterVec,
    /// Stake volume accepted.
    pub bet_volume: GaugeVec,
    /// Pool balance per side.
    pub pool_balance: GaugeVec,
    /// Payout odds per side.
    pub pool_odds: GaugeVec,
    /// User stake per side.
    pub position_stake: GaugeVec,
    /// Latest oracle ratio.
    pub peg_ratio: GaugeVec,
    /// Available balance.
    pub balance: Gauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let bets_placed = IntCounterVec::new(
            Opts::new("parity_bets_placed_total", "Total bets accepted"),
            &["market", "side"],
        )?;

        let bet_volume = GaugeVec::new(
            Opts::new("parity_bet_volume", "Total stake accepted"),
            &["market", "side"],
        )?;

        let pool_balance = GaugeVec::new(
            Opts::new("parity_pool_balance", "Pool balance per side"),
            &["market", "side"],
        )?;

        let pool_odds = GaugeVec::new(
            Opts::new("parity_pool_odds", "Payout multiplier per side"),
            &["market", "side"],
        )?;

        let position_stake = GaugeVec::new(
            Opts::new("parity_position_stake", "User stake per side"),
            &["market", "side"],
        )?;

        let peg_ratio = GaugeVec::new(
            Opts::new("parity_peg_ratio", "Latest LST/SOL oracle ratio"),
            &["market"],
        )?;

        let balance = Gauge::new("parity_balance", "Available stake balance")?;

        registry.register(Box::new(bets_placed.clone()))?;
        registry.register(Box::new(bet_volume.clone()))?;
        registry.register(Box::new(pool_balance.clone()))?;
        registry.register(Box::new(pool_odds.clone()))?;
        registry.register(Box::new(position_stake.clone()))?;
        registry.register(Box::new(peg_ratio.clone()))?;
        registry.register(Box::new(balance.clone()))?;

        Ok(Self {
            registry,
            bets_placed,
            bet_volume,
            pool_balance,
            pool_odds,
            position_stake,
            peg_ratio,
            balance,
        })
    }

    /// Count an accepted bet.
    pub fn record_bet(&self, record: &BetRecord) {
        let labels = [record.market_id.as_str(), record.side.as_str()];
        self.bets_placed.with_label_values(&labels).inc();
        self.bet_volume.with_label_values(&labels).add(record.amount);
    }

    /// Publish a market's pool, odds and position.
    pub fn update_book(&self, market_id: &MarketId, book: &MarketBook) {
        let odds = book.pool.odds();
        for (side, pool, odds, stake) in [
            ("bull", book.pool.bull, odds.bull, book.position.bull),
            ("bear", book.pool.bear, odds.bear, book.position.bear),
        ] {
            let labels = [market_id.as_str(), side];
            self.pool_balance.with_label_values(&labels).set(pool);
            self.pool_odds.with_label_values(&labels).set(odds);
            self.position_stake.with_label_values(&labels).set(stake);
        }
    }

    pub fn update_ratio(&self, market_id: &MarketId, sample: &RatioSample) {
        self.peg_ratio
            .with_label_values(&[market_id.as_str()])
            .set(sample.ratio);
    }

    pub fn update_balance(&self, balance: f64) {
        self.balance.set(balance);
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            warn!(error = %e, "Failed to encode metrics");
        }
        String::from_utf8(buffer).unwrap_or_default()
    }

    /// Serve Prometheus metrics on the configured bind address.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn serve(
        self: Arc<Self>,
        bind_address: String,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let metrics_self = Arc::clone(&self);

        let app = Router::new().route(
            "/metrics",
            get(move || {
                let metrics = Arc::clone(&metrics_self);
                async move { metrics.render() }
            }),
        );

        let listener = tokio::net::TcpListener::bind(&bind_address).await?;
        info!(address = %bind_address, "Prometheus metrics server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::market::Side;
    use crate::domain::pool::PoolState;
    use crate::domain::position::Position;

    #[test]
    fn test_record_bet_and_book_rendered() {
        let metrics = MetricsRegistry::new().unwrap();
        let market_id = "bsol-sol".to_string();

        metrics.record_bet(&BetRecord {
            id: "bet-1".to_string(),
            market_id: market_id.clone(),
            side: Side::Bear,
            amount: 500.0,
            odds_at_quote: 10.0,
            balance_after: 9_500.0,
            placed_at: Utc::now(),
        });
        metrics.update_book(
            &market_id,
            &MarketBook {
                pool: PoolState::new(90_000.0, 10_500.0),
                position: Position::new(0.0, 500.0),
            },
        );
        metrics.update_balance(9_500.0);

        assert_eq!(
            metrics
                .bets_placed
                .with_label_values(&["bsol-sol", "bear"])
                .get(),
            1
        );
        let text = metrics.render();
        assert!(text.contains("parity_pool_balance{market=\"bsol-sol\",side=\"bear\"} 10500"));
        assert!(text.contains("parity_balance 9500"));
    }
}
