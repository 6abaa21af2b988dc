//! JSON extraction from model output
//!
//! Completion models often wrap the requested JSON in prose or code
//! fences. This routine pulls out the longest balanced brace-delimited
//! substring starting at the first `{`, tracking string and escape
//! state so braces inside JSON strings do not miscount.

/// Extract the first balanced `{...}` object from raw model output
///
/// Returns `None` when there is no opening brace or the object never
/// closes (truncated completion). The returned slice is a candidate
/// only; parsing and schema validation happen downstream.
#[must_use]
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let bytes = raw.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_object() {
        assert_eq!(extract_json_object(r#"{"a":1}"#), Some(r#"{"a":1}"#));
    }

    #[test]
    fn skips_leading_prose() {
        let raw = r#"Sure! Here is the spec you asked for:

{"appName":"Demo","pages":[]}"#;
        assert_eq!(
            extract_json_object(raw),
            Some(r#"{"appName":"Demo","pages":[]}"#)
        );
    }

    #[test]
    fn handles_nested_objects() {
        let raw = r#"note {"a":{"b":{"c":1}}} trailing"#;
        assert_eq!(extract_json_object(raw), Some(r#"{"a":{"b":{"c":1}}}"#));
    }

    #[test]
    fn braces_inside_strings_do_not_count() {
        let raw = r#"{"text":"use { and } freely","n":2}"#;
        assert_eq!(extract_json_object(raw), Some(raw));
    }

    #[test]
    fn escaped_quote_inside_string() {
        let raw = r#"{"text":"she said \"}\"","n":2}"#;
        assert_eq!(extract_json_object(raw), Some(raw));
    }

    #[test]
    fn truncated_object_is_none() {
        assert_eq!(extract_json_object(r#"{"appName":"Demo","pages":["#), None);
    }

    #[test]
    fn no_brace_is_none() {
        assert_eq!(extract_json_object("I cannot help with that."), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn markdown_fenced_output() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(raw), Some("{\"a\": 1}"));
    }
}
