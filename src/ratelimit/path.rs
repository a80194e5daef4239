//! Dotted-path lookup into request values.

use serde_json::Value;

/// Resolve a dotted path such as `"customObj.clientId"` against `value`.
///
/// Object segments are matched by key and array segments by decimal index.
/// Returns `None` when any segment is missing, when an intermediate value is
/// not a container, when the path has an empty segment, or when the final
/// value is `null`.
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = value;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }

        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
