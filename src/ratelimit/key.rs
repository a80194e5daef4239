//! Counter key generation.

use super::strategy::StrategyKind;
use super::window::WindowIndex;

/// A key that uniquely identifies one counter in the store.
///
/// The key is composed of the strategy variant, the resolved identity, the
/// request origin and the window, serialized in that fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey {
    /// The strategy variant that produced the identity
    pub strategy: StrategyKind,
    /// The resolved identity value
    pub identity: String,
    /// The request's network origin
    pub origin: String,
    /// The window this count belongs to
    pub window: WindowIndex,
}

impl CounterKey {
    /// Create a new counter key.
    pub fn new(strategy: StrategyKind, identity: &str, origin: &str, window: WindowIndex) -> Self {
        Self {
            strategy,
            identity: identity.to_string(),
            origin: origin.to_string(),
            window,
        }
    }

    /// Convert to the string handed to the counter store.
    /// Format: "{strategy}|{identity}|{origin}|{window}"
    ///
    /// `\` and `|` inside identity and origin are backslash-escaped, so
    /// distinct keys never render to the same string.
    pub fn to_store_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.strategy,
            escape_component(&self.identity),
            escape_component(&self.origin),
            self.window
        )
    }
}

fn escape_component(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '|' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl std::fmt::Display for CounterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_store_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_key_to_string() {
        let key = CounterKey::new(
            StrategyKind::ClientId,
            "asdasdaskdjasbjk",
            "1.1.1.1",
            WindowIndex::new(475_000),
        );
        assert_eq!(key.to_store_key(), "client-id|asdasdaskdjasbjk|1.1.1.1|475000");
        assert_eq!(key.to_string(), key.to_store_key());
    }

    #[test]
    fn test_counter_key_equality() {
        let key1 = CounterKey::new(StrategyKind::ClientId, "abc", "10.0.0.1", WindowIndex::new(7));
        let key2 = CounterKey::new(StrategyKind::ClientId, "abc", "10.0.0.1", WindowIndex::new(7));

        assert_eq!(key1, key2);
        assert_eq!(key1.to_store_key(), key2.to_store_key());
    }

    #[test]
    fn test_delimiter_in_identity_or_origin_does_not_collide() {
        let window = WindowIndex::new(475_022);
        let pipe_in_identity = CounterKey::new(StrategyKind::ClientId, "a|b", "c", window);
        let pipe_in_origin = CounterKey::new(StrategyKind::ClientId, "a", "b|c", window);

        assert_ne!(pipe_in_identity.to_store_key(), pipe_in_origin.to_store_key());
        assert_eq!(pipe_in_identity.to_store_key(), r"client-id|a\|b|c|475022");
        assert_eq!(pipe_in_origin.to_store_key(), r"client-id|a|b\|c|475022");
    }

    #[test]
    fn test_backslash_is_escaped() {
        let window = WindowIndex::new(1);
        let trailing_backslash = CounterKey::new(StrategyKind::ClientId, "a\\", "b", window);
        let escaped_pipe = CounterKey::new(StrategyKind::ClientId, "a\\|b", "", window);

        assert_eq!(trailing_backslash.to_store_key(), r"client-id|a\\|b|1");
        assert_ne!(trailing_backslash.to_store_key(), escaped_pipe.to_store_key());
    }

    #[test]
    fn test_counter_key_distinguishes_components() {
        let base = CounterKey::new(StrategyKind::ClientId, "abc", "10.0.0.1", WindowIndex::new(7));

        let other_window = CounterKey::new(StrategyKind::ClientId, "abc", "10.0.0.1", WindowIndex::new(8));
        let other_origin = CounterKey::new(StrategyKind::ClientId, "abc", "10.0.0.2", WindowIndex::new(7));
        let other_strategy =
            CounterKey::new(StrategyKind::AccessToken, "abc", "10.0.0.1", WindowIndex::new(7));

        assert_ne!(base.to_store_key(), other_window.to_store_key());
        assert_ne!(base.to_store_key(), other_origin.to_store_key());
        assert_ne!(base.to_store_key(), other_strategy.to_store_key());
    }
}
