//! Error response bodies
//!
//! The backend does not share one error format: some endpoints answer
//! `{ "message": ... }`, others `{ "error": ... }`, and validation failures
//! come back as problem details with `title`/`detail`/`errors`. The client
//! only needs a short human-readable message out of whichever shape arrives.

use serde::Deserialize;
use serde_json::Value;

/// Union of the error body shapes seen from the backend
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    #[serde(alias = "Message")]
    pub message: Option<String>,
    #[serde(alias = "Error")]
    pub error: Option<Value>,
    #[serde(alias = "Title")]
    pub title: Option<String>,
    #[serde(alias = "Detail")]
    pub detail: Option<String>,
    #[serde(alias = "Errors")]
    pub errors: Option<Value>,
}

impl ApiErrorBody {
    /// First usable message, in order of how specific it tends to be
    pub fn message(&self) -> Option<String> {
        non_blank(self.message.as_deref())
            .or_else(|| match &self.error {
                Some(Value::String(s)) => non_blank(Some(s)),
                Some(Value::Object(obj)) => obj
                    .get("message")
                    .and_then(Value::as_str)
                    .and_then(|s| non_blank(Some(s))),
                _ => None,
            })
            .or_else(|| self.first_field_error())
            .or_else(|| non_blank(self.detail.as_deref()))
            .or_else(|| non_blank(self.title.as_deref()))
    }

    fn first_field_error(&self) -> Option<String> {
        match self.errors.as_ref()? {
            // { "Email": ["required"] }, serde_json keeps keys sorted
            Value::Object(fields) => fields.values().find_map(first_string),
            Value::Array(items) => items.iter().find_map(first_string),
            _ => None,
        }
    }
}

fn first_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(Some(s)),
        Value::Array(items) => items.iter().find_map(first_string),
        Value::Object(obj) => obj.get("message").and_then(first_string),
        _ => None,
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Best-effort message from a non-2xx response body
///
/// Falls back to the raw text when it is short plain text, and to
/// `fallback` (usually the status reason phrase) when nothing is usable.
pub fn extract_error_message(body: &str, fallback: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body)
        && let Some(message) = parsed.message()
    {
        return message;
    }

    let text = body.trim();
    if !text.is_empty() && !text.starts_with('{') && !text.starts_with('<') && text.len() <= 200 {
        return text.to_string();
    }

    fallback.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_wins() {
        let body = r#"{"message":"Email already registered","title":"Conflict"}"#;
        assert_eq!(
            extract_error_message(body, "Conflict"),
            "Email already registered"
        );
    }

    #[test]
    fn test_error_string_and_object() {
        assert_eq!(
            extract_error_message(r#"{"error":"Invalid credentials"}"#, "x"),
            "Invalid credentials"
        );
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"Token revoked"}}"#, "x"),
            "Token revoked"
        );
    }

    #[test]
    fn test_problem_details_field_errors() {
        let body = r#"{
            "title": "One or more validation errors occurred.",
            "errors": { "Email": ["The Email field is required."] }
        }"#;
        assert_eq!(
            extract_error_message(body, "Bad Request"),
            "The Email field is required."
        );
    }

    #[test]
    fn test_plain_text_and_fallback() {
        assert_eq!(extract_error_message("Member not found", "Not Found"), "Member not found");
        assert_eq!(extract_error_message("", "Not Found"), "Not Found");
        assert_eq!(
            extract_error_message("<html><body>502</body></html>", "Bad Gateway"),
            "Bad Gateway"
        );
        assert_eq!(extract_error_message("{}", "Internal Server Error"), "Internal Server Error");
    }
}
