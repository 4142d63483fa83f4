//! Parity Markets — Host Entry Point
//!
//! Drives the betting core the way a front-end host would: restores the
//! ledger, opens every market, polls the synthetic oracle on an interval
//! and exports metrics. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Restore the ledger from the data directory
//! 4. Open every configured market (pool init on first access)
//! 5. Spawn metrics (/metrics) and health (/live, /ready) servers
//! 6. Poll ratios every `poll_interval_ms` until SIGINT
//! 7. Graceful shutdown (signal → stop servers → final summary)

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use parity_markets::adapters::clock::SystemClock;
use parity_markets::adapters::metrics::{HealthServer, HealthState, MetricsRegistry};
use parity_markets::adapters::persistence::RepositoryImpl;
use parity_markets::config;
use parity_markets::domain::Market;
use parity_markets::ports::clock::Clock;
use parity_markets::ports::repository::LedgerRepository;
use parity_markets::usecases::portfolio;
use parity_markets::usecases::{BetDesk, RatioPoller};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level)),
        )
        .json()
        .init();

    let markets = config.markets();

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        markets = markets.len(),
        seeded = config.app.pool_seed.is_some(),
        "Starting Parity Markets host"
    );

    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 3. Restore ledger ───────────────────────────────────
    let repo = RepositoryImpl::from_data_dir(&config.persistence.data_dir)
        .await
        .context("Failed to open data directory")?;
    let mut desk = BetDesk::restore(repo, SystemClock, config.app.initial_balance).await?;

    // ── 4. Open markets ─────────────────────────────────────
    for market in &markets {
        desk.open_market(market, config.app.pool_seed).await?;
    }

    // ── 5. Metrics + health servers ─────────────────────────
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to register metrics")?);
    for bet in desk.repository().load_bets().await? {
        metrics.record_bet(&bet);
    }
    publish_ledger(&metrics, &desk, &markets);

    let health = Arc::new(HealthState::new());
    let mut server_handles = Vec::new();
    if config.metrics.enabled {
        let metrics_shutdown = shutdown_tx.subscribe();
        let bind_address = config.metrics.bind_address.clone();
        let metrics_ref = Arc::clone(&metrics);
        server_handles.push(tokio::spawn(async move {
            if let Err(e) = metrics_ref.serve(bind_address, metrics_shutdown).await {
                error!(error = %e, "Metrics server failed");
            }
        }));

        let health_shutdown = shutdown_tx.subscribe();
        let health_server = HealthServer::new(Arc::clone(&health), config.metrics.health_port);
        server_handles.push(tokio::spawn(async move {
            if let Err(e) = health_server.run(health_shutdown).await {
                error!(error = %e, "Health server failed");
            }
        }));
    }

    log_portfolio(&desk, &markets);

    // ── 6. Ratio polling loop ───────────────────────────────
    let poller = RatioPoller::new(SystemClock);
    let mut ticker = tokio::time::interval(Duration::from_millis(config.oracle.poll_interval_ms));
    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!(
        poll_interval_ms = config.oracle.poll_interval_ms,
        "Ratio poller started"
    );

    loop {
        tokio::select! {
            biased;
            _ = &mut ctrl_c => {
                info!("SIGINT received, initiating graceful shutdown");
                break;
            }
            _ = ticker.tick() => {
                for (market_id, sample) in poller.poll(&markets) {
                    metrics.update_ratio(&market_id, &sample);
                    debug!(
                        market_id = %market_id,
                        ratio = sample.ratio,
                        deviation_pct = sample.deviation_pct(),
                        status = ?sample.peg_status(),
                        confidence = sample.confidence,
                        "Ratio sampled"
                    );
                }
                let healthy = desk.repository().is_healthy().await;
                health.storage_healthy.store(healthy, Ordering::Relaxed);
            }
        }
    }

    // ── 7. Graceful shutdown ────────────────────────────────
    health.poller_running.store(false, Ordering::Relaxed);
    let _ = shutdown_tx.send(());

    for handle in server_handles {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }

    log_portfolio(&desk, &markets);
    info!("Shutdown complete");
    Ok(())
}

/// Push balance and every market book into the metrics registry.
fn publish_ledger<R: LedgerRepository, C: Clock>(
    metrics: &MetricsRegistry,
    desk: &BetDesk<R, C>,
    markets: &[Market],
) {
    metrics.update_balance(desk.balance());
    for market in markets {
        if let Some(book) = desk.book(&market.id) {
            metrics.update_book(&market.id, book);
        }
    }
}

fn log_portfolio<R: LedgerRepository, C: Clock>(desk: &BetDesk<R, C>, markets: &[Market]) {
    let summary = portfolio::summarize(markets, desk.ledger());
    info!(
        balance = desk.balance(),
        total_staked = desk.ledger().total_staked(),
        positions = summary.rows.len(),
        total_invested = summary.total_invested,
        total_expected_value = summary.total_expected_value,
        "Portfolio summary"
    );
}
