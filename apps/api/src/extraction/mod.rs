//! Response extraction. Recovers a typed artifact from a loosely shaped LLM response.
//!
//! Strategies are tried strictly in order, first success wins:
//! 1. `data` field parsed as the target
//! 2. the whole mapping (when it has neither `data` nor `error`)
//! 3. first-`{`-to-last-`}` JSON embedded in a `content` string
//! 4. the same brace search over a raw string response
//! 5. empty-collection default, only for targets that opt in
//!
//! Intermediate failures stay inside this module; callers only ever see the
//! terminal `ExtractionError`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

/// A type the extractor can populate.
///
/// `try_parse` is the single construction path every strategy goes through.
/// Targets override `empty_fallback` only when an empty response legitimately
/// means "no items".
pub trait ExtractTarget: DeserializeOwned {
    const SCHEMA_NAME: &'static str;

    fn try_parse(raw: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }

    fn empty_fallback() -> Option<Self> {
        None
    }
}

#[derive(Debug, Error)]
#[error("could not extract {schema} from LLM response (type: {response_type}, keys: {keys:?})")]
pub struct ExtractionError {
    pub schema: &'static str,
    pub response_type: &'static str,
    pub keys: Vec<String>,
}

/// Short JSON type name used in diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn extract_data_from_response<T: ExtractTarget>(response: &Value) -> Result<T, ExtractionError> {
    let schema = T::SCHEMA_NAME;

    if let Some(data) = response.get("data") {
        match T::try_parse(data) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => debug!("{schema}: 'data' field did not match schema: {e}"),
        }
    }

    if let Some(map) = response.as_object() {
        if !map.contains_key("data") && !map.contains_key("error") {
            match T::try_parse(response) {
                Ok(parsed) => return Ok(parsed),
                Err(e) => debug!("{schema}: response object did not match schema: {e}"),
            }
        }
    }

    if let Some(content) = response.get("content").and_then(Value::as_str) {
        match parse_embedded::<T>(content) {
            Ok(parsed) => return Ok(parsed),
            Err(reason) => debug!("{schema}: no usable JSON in 'content': {reason}"),
        }
    }

    if let Some(text) = response.as_str() {
        match parse_embedded::<T>(text) {
            Ok(parsed) => return Ok(parsed),
            Err(reason) => debug!("{schema}: no usable JSON in string response: {reason}"),
        }
    }

    if is_empty_object(response) || response.get("data").is_some_and(is_empty_object) {
        if let Some(empty) = T::empty_fallback() {
            debug!("{schema}: empty response, using empty collection");
            return Ok(empty);
        }
    }

    let keys = response
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    let err = ExtractionError {
        schema,
        response_type: value_kind(response),
        keys,
    };
    error!("{err}");
    Err(err)
}

/// Greedy slice from the first `{` to the last `}`.
pub fn find_embedded_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn parse_embedded<T: ExtractTarget>(text: &str) -> Result<T, String> {
    let candidate = find_embedded_json(text).ok_or_else(|| "no brace-delimited object".to_string())?;
    let value: Value = serde_json::from_str(candidate).map_err(|e| format!("invalid JSON: {e}"))?;
    T::try_parse(&value).map_err(|e| format!("schema mismatch: {e}"))
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|map| map.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct NamedValue {
        name: String,
        value: i64,
    }

    impl ExtractTarget for NamedValue {
        const SCHEMA_NAME: &'static str = "named_value";
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Items {
        items: Vec<String>,
    }

    impl ExtractTarget for Items {
        const SCHEMA_NAME: &'static str = "items";

        fn empty_fallback() -> Option<Self> {
            Some(Items { items: vec![] })
        }
    }

    #[test]
    fn test_data_field_wins_over_content() {
        let response = json!({
            "data": {"name": "from-data", "value": 1},
            "content": "{\"name\": \"from-content\", \"value\": 2}"
        });
        let parsed: NamedValue = extract_data_from_response(&response).unwrap();
        assert_eq!(parsed.name, "from-data");
    }

    #[test]
    fn test_bad_data_falls_through_to_content() {
        let response = json!({
            "data": {"unexpected": true},
            "content": "{\"name\": \"from-content\", \"value\": 2}"
        });
        let parsed: NamedValue = extract_data_from_response(&response).unwrap();
        assert_eq!(parsed.value, 2);
    }

    #[test]
    fn test_whole_object_is_parsed() {
        let parsed: NamedValue = extract_data_from_response(&json!({"name": "x", "value": 7})).unwrap();
        assert_eq!(parsed, NamedValue { name: "x".to_string(), value: 7 });
    }

    #[test]
    fn test_error_key_skips_whole_object_strategy() {
        let response = json!({"name": "x", "value": 7, "error": "tool call failed"});
        let err = extract_data_from_response::<NamedValue>(&response).unwrap_err();
        assert_eq!(err.response_type, "object");
        assert!(err.keys.contains(&"error".to_string()));
    }

    #[test]
    fn test_embedded_json_in_content() {
        let response = json!({"content": "noise {\"name\":\"x\",\"value\":1} noise"});
        let parsed: NamedValue = extract_data_from_response(&response).unwrap();
        assert_eq!(parsed, NamedValue { name: "x".to_string(), value: 1 });
    }

    #[test]
    fn test_raw_string_response() {
        let response = json!("Here you go:\n```json\n{\"name\": \"y\", \"value\": 3}\n```");
        let parsed: NamedValue = extract_data_from_response(&response).unwrap();
        assert_eq!(parsed.name, "y");
    }

    #[test]
    fn test_empty_object_uses_fallback_only_when_declared() {
        let items: Items = extract_data_from_response(&json!({})).unwrap();
        assert!(items.items.is_empty());

        let items: Items = extract_data_from_response(&json!({"data": {}})).unwrap();
        assert!(items.items.is_empty());

        let err = extract_data_from_response::<NamedValue>(&json!({})).unwrap_err();
        assert_eq!(err.schema, "named_value");
        assert!(err.keys.is_empty());
    }

    #[test]
    fn test_terminal_error_reports_type_and_keys() {
        let err = extract_data_from_response::<NamedValue>(&json!({"content": "no json here"})).unwrap_err();
        assert_eq!(err.response_type, "object");
        assert_eq!(err.keys, vec!["content".to_string()]);
        assert!(err.to_string().contains("named_value"));

        let err = extract_data_from_response::<NamedValue>(&json!(42)).unwrap_err();
        assert_eq!(err.response_type, "number");
    }

    #[test]
    fn test_find_embedded_json_is_greedy() {
        assert_eq!(find_embedded_json("a {\"x\": {\"y\": 1}} b"), Some("{\"x\": {\"y\": 1}}"));
        assert_eq!(find_embedded_json("} backwards {"), None);
        assert_eq!(find_embedded_json("nothing"), None);
    }
}
