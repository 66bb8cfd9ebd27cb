//! JSON extraction and schema validation for model responses.
//!
//! Models frequently wrap their JSON in prose or Markdown fences despite
//! instructions, so the whole response is never parsed directly. Extraction
//! is a greedy brace match, not a JSON tokenizer: it slices from the first
//! `{` to the last `}` and will mis-extract if unrelated braces surround the
//! intended object. Known limitation, kept deliberately simple.

use serde_json::Value;

use crate::error::ResponseError;

/// Locate a JSON object candidate within free text.
///
/// Returns the substring from the leftmost `{` to the rightmost `}`, or
/// `None` when no such pair exists. Pure function, no hidden state.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Extract and validate the commit-message list from raw completion text.
///
/// Fails with `NoJsonFound` when no brace pair exists, `MalformedJson` when
/// the candidate does not parse, and `SchemaValidation` when the parsed
/// value does not match `{"commitMessages": string[]}`. On success the array
/// is returned unmodified: no trimming, numbering-stripping, or dedup.
pub fn parse_commit_messages(raw: &str) -> Result<Vec<String>, ResponseError> {
    let candidate = extract_json_object(raw).ok_or(ResponseError::NoJsonFound)?;

    let value: Value = serde_json::from_str(candidate).map_err(ResponseError::MalformedJson)?;

    let object = value.as_object().ok_or_else(|| {
        ResponseError::SchemaValidation("response is not a JSON object".to_string())
    })?;

    let messages = object.get("commitMessages").ok_or_else(|| {
        ResponseError::SchemaValidation("missing \"commitMessages\" key".to_string())
    })?;

    let array = messages.as_array().ok_or_else(|| {
        ResponseError::SchemaValidation("\"commitMessages\" is not an array".to_string())
    })?;

    array
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            entry.as_str().map(str::to_string).ok_or_else(|| {
                ResponseError::SchemaValidation(format!(
                    "\"commitMessages\"[{idx}] is not a string"
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bare_object() {
        assert_eq!(
            extract_json_object(r#"{"commitMessages": []}"#),
            Some(r#"{"commitMessages": []}"#)
        );
    }

    #[test]
    fn test_extract_object_with_surrounding_prose() {
        let text = r#"Sure! Here you go: {"commitMessages": ["a"]} Hope this helps."#;
        assert_eq!(extract_json_object(text), Some(r#"{"commitMessages": ["a"]}"#));
    }

    #[test]
    fn test_extract_object_in_code_fence() {
        let text = "```json\n{\"commitMessages\": []}\n```";
        assert_eq!(extract_json_object(text), Some("{\"commitMessages\": []}"));
    }

    #[test]
    fn test_extract_no_braces() {
        assert_eq!(extract_json_object("just plain text"), None);
    }

    #[test]
    fn test_extract_close_before_open() {
        assert_eq!(extract_json_object("} nothing here {"), None);
    }

    #[test]
    fn test_extract_is_greedy_over_trailing_braces() {
        // Documented limitation: the match runs to the LAST closing brace.
        let text = r#"{"a": 1} and later a stray }"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": 1} and later a stray }"#));
    }

    #[test]
    fn test_parse_success_with_prefix_and_suffix() {
        let raw = r#"prefix {"commitMessages": ["a","b"]} suffix"#;
        assert_eq!(parse_commit_messages(raw).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_preserves_order_and_content() {
        let raw = r#"{"commitMessages": ["feat: add foo", "chore: add x"]}"#;
        assert_eq!(
            parse_commit_messages(raw).unwrap(),
            vec!["feat: add foo", "chore: add x"]
        );
    }

    #[test]
    fn test_parse_no_json_found() {
        let err = parse_commit_messages("no braces at all").unwrap_err();
        assert!(matches!(err, ResponseError::NoJsonFound));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_commit_messages(r#"{not valid json}"#).unwrap_err();
        assert!(matches!(err, ResponseError::MalformedJson(_)));
    }

    #[test]
    fn test_parse_malformed_json_keeps_parser_message() {
        let err = parse_commit_messages(r#"{not valid json}"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("malformed JSON"), "got: {message}");
    }

    #[test]
    fn test_parse_unterminated_object_has_no_json() {
        // No closing brace means the brace match never fires.
        let err = parse_commit_messages("{not valid json").unwrap_err();
        assert!(matches!(err, ResponseError::NoJsonFound));
    }

    #[test]
    fn test_parse_schema_missing_key() {
        let err = parse_commit_messages(r#"{"messages": []}"#).unwrap_err();
        assert!(matches!(err, ResponseError::SchemaValidation(_)));
    }

    #[test]
    fn test_parse_schema_not_an_array() {
        let err = parse_commit_messages(r#"{"commitMessages": "not-an-array"}"#).unwrap_err();
        assert!(matches!(err, ResponseError::SchemaValidation(_)));
    }

    #[test]
    fn test_parse_schema_non_string_element() {
        let err = parse_commit_messages(r#"{"commitMessages": ["ok", 42]}"#).unwrap_err();
        match err {
            ResponseError::SchemaValidation(detail) => assert!(detail.contains("[1]")),
            other => panic!("expected SchemaValidation, got: {other:?}"),
        }
    }

    #[test]
    fn test_parse_not_an_object() {
        let raw = "some text { nested } more";
        // Extraction finds "{ nested }" which fails to parse as JSON.
        let err = parse_commit_messages(raw).unwrap_err();
        assert!(matches!(err, ResponseError::MalformedJson(_)));
    }

    #[test]
    fn test_parse_empty_array_is_valid_schema() {
        assert!(parse_commit_messages(r#"{"commitMessages": []}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = r#"noise {"commitMessages": ["one", "two"]} noise"#;
        let first = parse_commit_messages(raw).unwrap();
        let second = parse_commit_messages(raw).unwrap();
        assert_eq!(first, second);
    }
}
