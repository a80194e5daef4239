//! Configuration consumed by the strategy evaluator.
//!
//! Hosts deserialize these types with whatever loader they already use; the
//! crate itself reads no files. The wire shape is:
//!
//! ```json
//! {
//!   "strategy": { "type": "client-id", "paths": { "clientId": "customObj.clientId" } },
//!   "window": "hour"
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StrategyError;
use crate::ratelimit::{StrategyKind, TimeWindow};

/// Top-level rate limiting options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitOptions {
    /// Identity extraction strategy
    pub strategy: StrategyConfig,

    /// Counting window granularity
    #[serde(default)]
    pub window: TimeWindow,
}

/// Configuration for an identity extraction strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Which strategy variant is active
    #[serde(rename = "type")]
    pub kind: StrategyKind,

    /// Logical field name -> dotted path into the request
    #[serde(default)]
    pub paths: HashMap<String, String>,
}

impl RateLimitOptions {
    /// Create options for `strategy` with the default (hourly) window.
    pub fn new(strategy: StrategyConfig) -> Self {
        Self {
            strategy,
            window: TimeWindow::default(),
        }
    }

    /// Use a different counting window.
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Check that the strategy has every path it needs.
    pub fn validate(&self) -> Result<(), StrategyError> {
        self.strategy.required_path().map(|_| ())
    }
}

impl StrategyConfig {
    /// Create a strategy config with no paths.
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            paths: HashMap::new(),
        }
    }

    /// Add or replace the path for a logical field.
    pub fn with_path(mut self, field: &str, path: &str) -> Self {
        self.paths.insert(field.to_string(), path.to_string());
        self
    }

    /// The configured path for the field this variant requires.
    pub fn required_path(&self) -> Result<&str, StrategyError> {
        let field = self.kind.required_field();
        match self.paths.get(field) {
            Some(path) if !path.is_empty() => Ok(path),
            _ => Err(StrategyError::InvalidStrategyConfig {
                strategy: self.kind,
                field,
            }),
        }
    }
}
