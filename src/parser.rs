use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::ParseError;

static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)\A\s*(?:`{3,}|~{3,})[ \t]*(?i:json5?)?[ \t]*\r?\n(.*?)\r?\n[ \t]*(?:`{3,}|~{3,})[ \t]*\s*\z",
    )
    .expect("fence regex")
});

/// Unwraps a payload pasted inside a Markdown code fence (``` or ~~~,
/// optionally tagged `json`/`json5`). Anything else passes through.
pub fn strip_code_fence(input: &str) -> &str {
    match FENCE_RE.captures(input) {
        Some(caps) => caps.get(1).map_or(input, |m| m.as_str()),
        None => input,
    }
}

/// Strict parse; the only place plain syntax errors surface.
pub fn parse_json(text: &str) -> Result<Value, ParseError> {
    serde_json::from_str(text).map_err(ParseError::Invalid)
}

/// Strict parse with a single repair retry: malformed-but-human JSON
/// (trailing commas, single quotes, unquoted keys, comments) is re-read as
/// JSON5 exactly once. A failed repair surfaces both messages.
pub fn parse_with_repair(text: &str) -> Result<Value, ParseError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(parse) => match json5::from_str(text) {
            Ok(value) => Ok(value),
            Err(repair) => Err(ParseError::RepairFailed {
                parse: parse.to_string(),
                repair: repair.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_parse_rejects_trailing_comma() {
        let err = parse_json("{\"a\": 1,}").unwrap_err();
        assert!(matches!(err, ParseError::Invalid(_)));
    }

    #[test]
    fn repair_accepts_json5_flavored_input() {
        let value = parse_with_repair("{a: 1, 'b': [2, 3,], /* note */}").unwrap();
        assert_eq!(value, json!({"a": 1, "b": [2, 3]}));
    }

    #[test]
    fn repair_failure_carries_both_messages() {
        let err = parse_with_repair("{not even close").unwrap_err();
        let ParseError::RepairFailed { parse, repair } = err else {
            panic!("expected RepairFailed");
        };
        assert!(!parse.is_empty());
        assert!(!repair.is_empty());
    }

    #[test]
    fn valid_input_skips_the_repair_pass() {
        let value = parse_with_repair("{\"a\": [1, 2]}").unwrap();
        assert_eq!(value, json!({"a": [1, 2]}));
    }

    #[test]
    fn fences_unwrap() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("~~~\n[1,2]\n~~~"), "[1,2]");
        assert_eq!(strip_code_fence("  ```JSON5\n{a:1}\n```  "), "{a:1}");
        // not fenced: unchanged
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        // fence with no terminator: unchanged
        assert_eq!(strip_code_fence("```json\n{\"a\":1}"), "```json\n{\"a\":1}");
    }
}
