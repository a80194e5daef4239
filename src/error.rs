//! Error types for identity extraction and counter updates.
//!
//! Validation failures and store failures travel on separate channels:
//! [`StrategyError`] is returned synchronously by the evaluator before any
//! store interaction, while [`StoreError`] only ever surfaces from the
//! future the store hands back.

use thiserror::Error;

use crate::ratelimit::StrategyKind;

/// Synchronous validation errors raised before an increment is dispatched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// The request is not a structured (object) value.
    #[error("invalid req object passed")]
    InvalidRequestShape,

    /// `connection.remoteAddress` is absent, not a string, or empty.
    #[error("invalid request, connection remoteAddress missing")]
    MissingRemoteAddress,

    /// No store with an increment capability was supplied.
    #[error("Config Error : invalid store passed")]
    InvalidStoreConfig,

    /// The strategy paths lack the entry the active variant needs.
    #[error("Config Error : invalid options.strategy passed ({strategy} requires paths.{field})")]
    InvalidStrategyConfig {
        /// The active strategy variant
        strategy: StrategyKind,
        /// The logical field that has no usable path
        field: &'static str,
    },

    /// The configured path resolved to nothing inside the request.
    #[error("invalid {field} found in req object - undefined at path - req.{path}")]
    IdentityNotFound {
        /// The logical field being resolved
        field: &'static str,
        /// The dotted path that was attempted
        path: String,
    },

    /// The configured path resolved to an object or array.
    #[error("invalid {field} found in req object - not a scalar at path - req.{path}")]
    UnsupportedIdentity {
        /// The logical field being resolved
        field: &'static str,
        /// The dotted path that was attempted
        path: String,
    },
}

impl StrategyError {
    /// The attempted request path, for errors raised while resolving an identity.
    pub fn path(&self) -> Option<&str> {
        match self {
            StrategyError::IdentityNotFound { path, .. }
            | StrategyError::UnsupportedIdentity { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Failures reported by a counter store while applying an increment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing medium could not be reached.
    #[error("Counter store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the increment for a key.
    #[error("Counter store failed to increment {key}: {reason}")]
    Backend {
        /// The counter key that was being incremented
        key: String,
        /// Backend-provided reason
        reason: String,
    },
}

/// Umbrella error for hosts that fold both channels into one after awaiting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration or request-shape problems
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    /// Counter store failures
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for operations that may fail on either channel.
pub type Result<T> = std::result::Result<T, Error>;
