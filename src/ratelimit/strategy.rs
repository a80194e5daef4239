//! Identity extraction strategies and the evaluator that drives them.
//!
//! Every strategy variant shares one skeleton: validate the request, the
//! store and the config synchronously, resolve the identity, compose a
//! [`CounterKey`] for the current window, then hand the store's increment
//! future back to the caller untouched. Variants differ only in which
//! logical field they read from `paths`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use super::clock::Clock;
use super::key::CounterKey;
use super::path::resolve_path;
use super::store::{CounterStore, IncrementFuture};
use crate::config::RateLimitOptions;
use crate::error::StrategyError;

/// Path to the request's network origin.
pub const REMOTE_ADDRESS_PATH: &str = "connection.remoteAddress";

/// The closed set of identity extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Count per client identifier
    ClientId,
    /// Count per access token
    AccessToken,
}

impl StrategyKind {
    /// All strategy variants.
    pub const ALL: [StrategyKind; 2] = [StrategyKind::ClientId, StrategyKind::AccessToken];

    /// The logical field this variant requires in `paths`.
    pub fn required_field(&self) -> &'static str {
        match self {
            StrategyKind::ClientId => "clientId",
            StrategyKind::AccessToken => "accessToken",
        }
    }

    /// The discriminator used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::ClientId => "client-id",
            StrategyKind::AccessToken => "access-token",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a request, derive its counter key and dispatch one increment.
///
/// All configuration and request-shape problems are returned as
/// `Err(StrategyError)` before the store is touched. On success the store's
/// increment future is returned as-is; store failures surface only when it
/// is awaited. The clock is read exactly once per successful call.
pub fn evaluate<'s, S, C>(
    request: &Value,
    options: &RateLimitOptions,
    store: Option<&'s S>,
    clock: &C,
) -> Result<IncrementFuture<'s>, StrategyError>
where
    S: CounterStore + ?Sized,
    C: Clock + ?Sized,
{
    if !request.is_object() {
        debug!("Rejecting request that is not an object");
        return Err(StrategyError::InvalidRequestShape);
    }

    let origin = match resolve_path(request, REMOTE_ADDRESS_PATH).and_then(Value::as_str) {
        Some(addr) if !addr.is_empty() => addr,
        _ => {
            debug!("Rejecting request without a remote address");
            return Err(StrategyError::MissingRemoteAddress);
        }
    };

    let Some(store) = store else {
        debug!("No counter store configured");
        return Err(StrategyError::InvalidStoreConfig);
    };

    let strategy = &options.strategy;
    let path = strategy.required_path().map_err(|err| {
        debug!(strategy = %strategy.kind, "Strategy config is missing its required path");
        err
    })?;

    let identity = resolve_identity(request, strategy.kind.required_field(), path)?;

    let window = options.window.current(clock);
    let key = CounterKey::new(strategy.kind, &identity, origin, window);

    trace!(key = %key, "Dispatching counter increment");

    Ok(store.increment(&key.to_store_key()))
}

/// Resolve and render the identity for `field` at `path`.
fn resolve_identity(
    request: &Value,
    field: &'static str,
    path: &str,
) -> Result<String, StrategyError> {
    match resolve_path(request, path) {
        None => {
            debug!(field, path, "Identity not found in request");
            Err(StrategyError::IdentityNotFound {
                field,
                path: path.to_string(),
            })
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => Ok(scalar.to_string()),
        Some(_) => {
            debug!(field, path, "Identity resolved to a non-scalar value");
            Err(StrategyError::UnsupportedIdentity {
                field,
                path: path.to_string(),
            })
        }
    }
}
