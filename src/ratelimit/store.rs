//! Counter store contract.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::error::StoreError;

/// Post-increment value of a counter.
pub type CounterValue = u64;

/// Future returned by [`CounterStore::increment`].
pub type IncrementFuture<'a> = BoxFuture<'a, Result<CounterValue, StoreError>>;

/// Trait for counter store implementations.
///
/// A store must apply each increment atomically with respect to concurrent
/// increments on the same key; the evaluator takes no locks of its own.
/// Backends can live in process memory or behind the network, so the
/// increment is asynchronous and failures surface through the returned
/// future.
pub trait CounterStore: Send + Sync {
    /// Increment the counter for `key` by one and resolve to its new value.
    fn increment(&self, key: &str) -> IncrementFuture<'_>;
}

impl<S: CounterStore + ?Sized> CounterStore for &S {
    fn increment(&self, key: &str) -> IncrementFuture<'_> {
        (**self).increment(key)
    }
}

impl<S: CounterStore + ?Sized> CounterStore for Box<S> {
    fn increment(&self, key: &str) -> IncrementFuture<'_> {
        (**self).increment(key)
    }
}

impl<S: CounterStore + ?Sized> CounterStore for Arc<S> {
    fn increment(&self, key: &str) -> IncrementFuture<'_> {
        (**self).increment(key)
    }
}
