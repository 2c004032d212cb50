//! Best-effort recovery of structured data from model output
//!
//! Chat models are asked to answer in JSON but routinely wrap it in prose or
//! return something that is not JSON at all. [`recover`] turns any reply into
//! a [`RecoveredValue`] without ever failing:
//!
//! 1. the whole text parsed as JSON (objects, arrays and scalars),
//! 2. the first greedy `{...}` / `[...]` span parsed as JSON,
//! 3. an unrecoverable value carrying the original text.
//!
//! Step 2 only tries one span: from the first opener that has a matching
//! closer somewhere later to the *last* such closer. Replies with several
//! independent JSON fragments, or braces inside prose ("the count is {5}"),
//! fall through to step 3.
//!
//! Parsing uses serde_json's default recursion limit, so valid JSON nested
//! 128 or more levels deep is treated as unparseable and falls through to
//! step 3 as well.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Value, json};

/// Marker stored under `error` in the JSON projection of an unrecoverable reply
pub const INVALID_JSON_MARKER: &str = "Invalid JSON";

static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}|\[.*\]").expect("Invalid regex pattern"));

/// Structured result of [`recover`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveredValue {
    /// The reply (or its embedded JSON span) parsed successfully
    Parsed(Value),
    /// Nothing parseable was found; `raw` is the untouched reply
    Unrecoverable { raw: String },
}

impl RecoveredValue {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    pub fn as_parsed(&self) -> Option<&Value> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Unrecoverable { .. } => None,
        }
    }

    /// JSON projection: the parsed value, or `{"error": "Invalid JSON", "raw": ...}`
    pub fn to_value(&self) -> Value {
        match self {
            Self::Parsed(value) => value.clone(),
            Self::Unrecoverable { raw } => json!({
                "error": INVALID_JSON_MARKER,
                "raw": raw,
            }),
        }
    }

    /// Text suitable for a terminal pane: pretty JSON or the raw reply
    pub fn display_text(&self) -> String {
        match self {
            Self::Parsed(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Unrecoverable { raw } => raw.clone(),
        }
    }
}

impl From<RecoveredValue> for Value {
    fn from(recovered: RecoveredValue) -> Self {
        match recovered {
            RecoveredValue::Parsed(value) => value,
            unrecoverable => unrecoverable.to_value(),
        }
    }
}

impl Serialize for RecoveredValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Parsed(value) => value.serialize(serializer),
            Self::Unrecoverable { .. } => self.to_value().serialize(serializer),
        }
    }
}

/// Recover a structured value from arbitrary model output. Never fails.
pub fn recover(text: &str) -> RecoveredValue {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return RecoveredValue::Parsed(value);
    }

    if let Some(span) = JSON_SPAN.find(text) {
        match serde_json::from_str::<Value>(span.as_str()) {
            Ok(value) => return RecoveredValue::Parsed(value),
            Err(e) => tracing::debug!("Embedded JSON span did not parse: {}", e),
        }
    }

    RecoveredValue::Unrecoverable {
        raw: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fallback(raw: &str) -> Value {
        json!({ "error": "Invalid JSON", "raw": raw })
    }

    #[test]
    fn test_whole_object_parses() {
        let recovered = recover(r#"{"task":"call Bob","urgency":"high"}"#);
        assert_eq!(
            recovered,
            RecoveredValue::Parsed(json!({ "task": "call Bob", "urgency": "high" }))
        );
    }

    #[test]
    fn test_array_order_preserved() {
        let recovered = recover(r#"[{"task":"x"},{"task":"y"}]"#);
        let value = recovered.as_parsed().unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["task"], "x");
        assert_eq!(items[1]["task"], "y");
    }

    #[test]
    fn test_scalars_parse_as_is() {
        assert_eq!(recover("42"), RecoveredValue::Parsed(json!(42)));
        assert_eq!(recover(r#""hello""#), RecoveredValue::Parsed(json!("hello")));
        assert_eq!(recover("null"), RecoveredValue::Parsed(Value::Null));
        assert_eq!(recover("  true \n"), RecoveredValue::Parsed(json!(true)));
    }

    #[test]
    fn test_embedded_object_extracted() {
        let recovered = recover(r#"Here is the result: {"a": 1} — done."#);
        assert_eq!(recovered, RecoveredValue::Parsed(json!({ "a": 1 })));
    }

    #[test]
    fn test_embedded_span_across_lines() {
        let text = "Sure! Here are the items:\n```json\n[\n  {\"task\": \"reply\"}\n]\n```\nLet me know.";
        let recovered = recover(text);
        assert_eq!(recovered, RecoveredValue::Parsed(json!([{ "task": "reply" }])));
    }

    #[test]
    fn test_earliest_opener_wins() {
        // '[' comes first, so the array alternative spans to the last ']'
        let recovered = recover(r#"note [1] then {"a": 2}"#);
        assert_eq!(recovered, RecoveredValue::Parsed(json!([1])));
    }

    #[test]
    fn test_greedy_span_spans_multiple_fragments() {
        // First '{' to last '}' covers both objects and the prose between them
        let text = r#"first {"a": 1} and second {"b": 2}"#;
        assert_eq!(
            recover(text),
            RecoveredValue::Unrecoverable {
                raw: text.to_string()
            }
        );
    }

    #[test]
    fn test_braces_in_prose_fall_back() {
        let text = "the count is {5}";
        assert_eq!(recover(text).to_value(), fallback(text));
    }

    #[test]
    fn test_plain_prose_falls_back() {
        let text = "This email is about a meeting next week.";
        assert_eq!(recover(text).to_value(), fallback(text));
    }

    #[test]
    fn test_empty_input_falls_back() {
        assert_eq!(
            recover(""),
            RecoveredValue::Unrecoverable { raw: String::new() }
        );
        assert_eq!(recover("").to_value(), fallback(""));
    }

    #[test]
    fn test_truncated_json_falls_back_with_original_text() {
        let text = r#"{"category": "Important", "reason": "deadl"#;
        assert_eq!(recover(text).to_value(), fallback(text));
    }

    #[test]
    fn test_fallback_is_idempotent() {
        let text = "not json at all {";
        let first = recover(text);
        let RecoveredValue::Unrecoverable { ref raw } = first else {
            panic!("expected fallback");
        };
        assert_eq!(recover(raw), first);
    }

    #[test]
    fn test_serialize_matches_projection() {
        let parsed = recover(r#"{"category":"Spam"}"#);
        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            json!({ "category": "Spam" })
        );

        let unrecoverable = recover("nope");
        assert_eq!(serde_json::to_value(&unrecoverable).unwrap(), fallback("nope"));
        assert_eq!(Value::from(unrecoverable), fallback("nope"));
    }

    #[test]
    fn test_nesting_below_recursion_limit_parses() {
        let text = format!("{}{}", "[".repeat(127), "]".repeat(127));
        assert!(recover(&text).is_parsed());
    }

    #[test]
    fn test_nesting_at_recursion_limit_falls_back() {
        let text = format!("{}{}", "[".repeat(128), "]".repeat(128));
        assert_eq!(recover(&text).to_value(), fallback(&text));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(recover("nope").display_text(), "nope");
        assert_eq!(recover(r#"{"a":1}"#).display_text(), "{\n  \"a\": 1\n}");
    }

    proptest! {
        #[test]
        fn prop_never_panics(s in any::<String>()) {
            let _ = recover(&s);
        }

        #[test]
        fn prop_never_panics_on_bracket_soup(s in r#"[\{\}\[\]":,a-z0-9 \n]{0,64}"#) {
            let _ = recover(&s);
        }

        #[test]
        fn prop_valid_json_round_trips(n in any::<i64>(), word in "[a-zA-Z ]{0,16}", flag in any::<bool>()) {
            let value = json!({ "n": n, "word": word, "items": [flag, n] });
            let text = serde_json::to_string(&value).unwrap();
            prop_assert_eq!(recover(&text), RecoveredValue::Parsed(value));
        }

        #[test]
        fn prop_bracket_free_unparseable_text_falls_back(s in "[^\\{\\[]*") {
            prop_assume!(serde_json::from_str::<Value>(&s).is_err());
            prop_assert_eq!(recover(&s).to_value(), fallback(&s));
        }
    }
}
