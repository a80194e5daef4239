//! Long-lived throttle handle.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::clock::{Clock, SystemClock};
use super::store::{CounterStore, IncrementFuture};
use super::strategy::evaluate;
use crate::config::RateLimitOptions;
use crate::error::StrategyError;

/// Validated options bound to a counter store and a clock.
///
/// Build one per route or policy at startup and call [`Throttle::hit`] once
/// per request. The handle is `Send + Sync` and can be shared behind an
/// `Arc` across tasks.
pub struct Throttle<S: CounterStore> {
    /// Strategy and window configuration
    options: RateLimitOptions,
    /// Where counts live
    store: S,
    /// Source of the current window
    clock: Arc<dyn Clock>,
}

impl<S: CounterStore> Throttle<S> {
    /// Create a new throttle using the system clock.
    ///
    /// Fails if the strategy config lacks the path its variant requires.
    pub fn new(options: RateLimitOptions, store: S) -> Result<Self, StrategyError> {
        options.validate()?;

        info!(
            strategy = %options.strategy.kind,
            window = ?options.window,
            "Throttle initialized"
        );

        Ok(Self {
            options,
            store,
            clock: Arc::new(SystemClock::new()),
        })
    }

    /// Replace the clock used for window calculations.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Count one request against its identity's current window.
    ///
    /// See [`evaluate`] for the validation order and error channels.
    pub fn hit(&self, request: &Value) -> Result<IncrementFuture<'_>, StrategyError> {
        evaluate(request, &self.options, Some(&self.store), self.clock.as_ref())
    }

    /// The options this throttle was built with.
    pub fn options(&self) -> &RateLimitOptions {
        &self.options
    }

    /// The underlying counter store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
