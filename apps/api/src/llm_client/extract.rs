//! Recovers a single JSON object from raw model output.
//!
//! Models do not always honor "JSON only": the object may arrive inside a
//! markdown fence or surrounded by prose. The wrapping is tolerated, the
//! payload itself is parsed strictly.
//!
//! Lookup order:
//! 1. the first ```` ``` ```` fence (optionally tagged `json`) whose body is `{ ... }`
//! 2. the span from the first `{` to the last `}` in the text
//! 3. the trimmed text as-is
//!
//! Known limitation: step 2 assumes a single top-level object and no literal
//! braces in trailing prose.

use serde_json::{Map, Value};
use tracing::debug;

const FENCE: &str = "```";

/// Returns the parsed object, or `None` when no well-formed JSON object can be recovered.
pub fn extract_object(raw: &str) -> Option<Map<String, Value>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let candidate = fenced_object(text)
        .or_else(|| brace_span(text))
        .unwrap_or(text);

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => Some(object),
        Ok(other) => {
            debug!("Model output parsed as JSON but not an object: {}", json_kind(&other));
            None
        }
        Err(e) => {
            debug!("Model output is not valid JSON: {e}");
            None
        }
    }
}

/// Finds the first fence whose body opens with `{` and pairs it with the last
/// fence that is preceded by `}`. Returns the `{ ... }` slice.
fn fenced_object(text: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find(FENCE) {
        let body_start = search_from + offset + FENCE.len();
        let body = &text[body_start..];
        let body = body.strip_prefix("json").unwrap_or(body);
        let lead = body.trim_start();

        if lead.starts_with('{') {
            let object_start = text.len() - lead.len();
            if let Some(end) = last_brace_before_fence(&text[object_start..]) {
                return Some(&text[object_start..object_start + end + 1]);
            }
        }

        search_from = body_start;
    }

    None
}

/// Index of the `}` that directly precedes (modulo whitespace) the last closing fence.
fn last_brace_before_fence(text: &str) -> Option<usize> {
    let mut limit = text.len();

    while let Some(fence) = text[..limit].rfind(FENCE) {
        let before = text[..fence].trim_end();
        if before.ends_with('}') {
            return Some(before.len() - 1);
        }
        limit = fence;
    }

    None
}

fn brace_span(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    (last > first).then(|| &text[first..=last])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
