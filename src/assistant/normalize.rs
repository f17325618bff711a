//! Response normalization
//!
//! The backend's success shape has drifted across versions
//! (`{solidity_code, explanation}`, `{output}`, `{explanation}`, `{result}`).
//! `normalize` probes a fixed, priority-ordered key table and returns one
//! display string, so callers never branch on the shape.

use crate::assistant::envelope::ResponseEnvelope;
use crate::assistant::mode::Mode;
use serde_json::Value as JsonValue;

/// One entry of the probe table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// Code plus explanation, joined code first
    Pair {
        first: &'static str,
        second: &'static str,
    },
    Single(&'static str),
}

/// Probe order, highest priority first
const PROBES: [Probe; 3] = [
    Probe::Pair {
        first: "solidity_code",
        second: "explanation",
    },
    Probe::Single("output"),
    Probe::Single("result"),
];

/// Separator between code and explanation
const PAIR_SEPARATOR: &str = "\n\n";

/// Extract the displayable result from a success body
///
/// Returns `None` when no known key carries usable text. Pure: the same
/// envelope always yields the same string.
pub fn normalize(mode: Mode, body: &ResponseEnvelope) -> Option<String> {
    for probe in PROBES {
        let hit = match probe {
            Probe::Pair { first, second } => {
                match (field_text(body, first), field_text(body, second)) {
                    (Some(code), Some(explanation)) => {
                        Some(format!("{}{}{}", code, PAIR_SEPARATOR, explanation))
                    }
                    (Some(only), None) | (None, Some(only)) => Some(only),
                    (None, None) => None,
                }
            }
            Probe::Single(key) => field_text(body, key),
        };

        if let Some(text) = hit {
            tracing::debug!(mode = %mode, probe = ?probe, "normalized response");
            return Some(text);
        }
    }

    tracing::debug!(
        mode = %mode,
        keys = ?body.keys().collect::<Vec<_>>(),
        "no result-carrying key in response"
    );
    None
}

/// Usable text for `key`, or `None` if missing or empty
fn field_text(body: &ResponseEnvelope, key: &str) -> Option<String> {
    let value = body.get(key)?;
    if is_empty_value(value) {
        return None;
    }
    Some(render_value(value))
}

fn is_empty_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.trim().is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Bool(_) | JsonValue::Number(_) => false,
    }
}

/// Strings verbatim; structures as indented JSON
fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: JsonValue) -> ResponseEnvelope {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("test envelope must be an object"),
        }
    }

    #[test]
    fn test_output_only() {
        let body = envelope(json!({"output": "This contract does nothing."}));
        assert_eq!(
            normalize(Mode::Explain, &body),
            Some("This contract does nothing.".to_string())
        );
    }

    #[test]
    fn test_code_and_explanation_joined_code_first() {
        let body = envelope(json!({
            "solidity_code": "pragma solidity ^0.8.0; contract Token {}",
            "explanation": "Minimal ERC-20 skeleton."
        }));
        assert_eq!(
            normalize(Mode::Generate, &body).unwrap(),
            "pragma solidity ^0.8.0; contract Token {}\n\nMinimal ERC-20 skeleton."
        );
    }

    #[test]
    fn test_explanation_alone() {
        let body = envelope(json!({"explanation": "Owner-gated mint."}));
        assert_eq!(
            normalize(Mode::Explain, &body),
            Some("Owner-gated mint.".to_string())
        );
    }

    #[test]
    fn test_empty_explanation_drops_to_code() {
        let body = envelope(json!({"solidity_code": "contract A {}", "explanation": ""}));
        assert_eq!(
            normalize(Mode::Generate, &body),
            Some("contract A {}".to_string())
        );
    }

    #[test]
    fn test_pair_outranks_output() {
        let body = envelope(json!({
            "output": "raw dump",
            "solidity_code": "contract A {}",
            "explanation": "why"
        }));
        assert_eq!(
            normalize(Mode::Generate, &body),
            Some("contract A {}\n\nwhy".to_string())
        );
    }

    #[test]
    fn test_output_outranks_result() {
        let body = envelope(json!({"result": "second", "output": "first"}));
        assert_eq!(normalize(Mode::Explain, &body), Some("first".to_string()));
    }

    #[test]
    fn test_empty_output_falls_through_to_result() {
        let body = envelope(json!({"output": "   ", "result": "fallback"}));
        assert_eq!(normalize(Mode::Explain, &body), Some("fallback".to_string()));
    }

    #[test]
    fn test_structured_result_is_rendered() {
        let body = envelope(json!({"result": {"summary": "ERC-20", "security": "none"}}));
        let text = normalize(Mode::Explain, &body).unwrap();
        assert!(text.contains("\"summary\": \"ERC-20\""));
        assert!(text.contains("\"security\": \"none\""));
    }

    #[test]
    fn test_scalar_result_is_rendered() {
        let body = envelope(json!({"result": 42}));
        assert_eq!(normalize(Mode::Explain, &body), Some("42".to_string()));
    }

    #[test]
    fn test_unknown_shape_is_absent() {
        let body = envelope(json!({"unexpected": "shape"}));
        assert_eq!(normalize(Mode::Explain, &body), None);
    }

    #[test]
    fn test_null_and_empty_values_are_absent() {
        let body = envelope(json!({"output": null, "result": [], "explanation": {}}));
        assert_eq!(normalize(Mode::Generate, &body), None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let body = envelope(json!({"solidity_code": "contract A {}", "explanation": "e"}));
        let first = normalize(Mode::Generate, &body);
        let second = normalize(Mode::Generate, &body);
        assert_eq!(first, second);
    }
}
