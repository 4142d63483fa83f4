//! Ratio Poller Use Case - Sample the Synthetic Oracle
//!
//! Reads the clock once per poll and samples every market at that instant.
//! The poller owns no timer; the host decides the cadence.

use crate::domain::market::{Market, MarketId};
use crate::domain::ratio::{self, RatioSample};
use crate::ports::clock::Clock;

pub struct RatioPoller<C: Clock> {
  clock: C,
}

impl<C: Clock> RatioPoller<C> {
  pub const fn new(clock: C) -> Self {
    Self { clock }
  }

  /// Sample all markets at one shared timestamp.
  pub fn poll(&self, markets: &[Market]) -> Vec<(MarketId, RatioSample)> {
    let now = self.clock.now_ms();
    markets
      .iter()
      .map(|m| (m.id.clone(), ratio::generate(m.pair_index, now)))
      .collect()
  }
}
