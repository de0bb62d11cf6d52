//! Tolerant field deserializers for model-produced JSON.
//!
//! The model does not always honor the field types it was asked for. These
//! never fail: a value of the wrong type degrades to empty, so completeness
//! rules decide what is usable instead of the deserializer.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings as-is, numbers and booleans as their JSON text, arrays joined with spaces.
/// `null` and objects yield `None`.
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(item_text)
                .collect::<Vec<_>>()
                .join(" ");
            (!joined.is_empty()).then_some(joined)
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// A lone string becomes a one-element list. Non-text items are dropped.
pub fn text_list_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(item_text).collect(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(&Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(&Value::deserialize(deserializer)?))
}

pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_list_of(&Value::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_text_converts_scalars_and_drops_structures() {
        assert_eq!(text_of(&json!("NA18221234567")).as_deref(), Some("NA18221234567"));
        assert_eq!(text_of(&json!(18221234567_u64)).as_deref(), Some("18221234567"));
        assert_eq!(text_of(&json!(true)).as_deref(), Some("true"));
        assert_eq!(text_of(&json!(["#a", "#b", null])).as_deref(), Some("#a #b"));
        assert_eq!(text_of(&json!({"value": "x"})), None);
        assert_eq!(text_of(&Value::Null), None);
        assert_eq!(text_of(&json!([])), None);
    }

    #[test]
    fn test_text_list_wraps_lone_string_and_skips_junk() {
        assert_eq!(text_list_of(&json!("Cek keranjang kuning!")), vec!["Cek keranjang kuning!"]);
        assert_eq!(
            text_list_of(&json!(["a", null, {"x": 1}, "", 7, "b"])),
            vec!["a", "7", "b"]
        );
        assert!(text_list_of(&json!("  ")).is_empty());
        assert!(text_list_of(&json!({"hook": "a"})).is_empty());
        assert!(text_list_of(&Value::Null).is_empty());
    }
}
