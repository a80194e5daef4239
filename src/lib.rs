//! Ratekey - identity-keyed request counting
//!
//! This crate turns an incoming request into a deterministic counter key and
//! advances that key's count in a pluggable store. A configured strategy
//! names where the caller's identity lives inside the request, the request's
//! remote address pins the origin, and an injected clock selects the current
//! time window. Hosts decide what to do with the returned count.

pub mod config;
pub mod error;
pub mod ratelimit;

#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;

pub use config::{RateLimitOptions, StrategyConfig};
pub use error::{Error, Result, StoreError, StrategyError};
pub use ratelimit::{evaluate, Clock, CounterStore, StrategyKind, Throttle, TimeWindow};
