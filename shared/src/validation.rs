//! Form validation helpers
//!
//! Drafts collect every problem into a list of [`Violation`]s instead of
//! stopping at the first one, so a form can show all of them at once.

use serde::{Deserialize, Serialize};

// ── Text length limits ──────────────────────────────────────────────

/// Names: members, plans, facilities, classes, usernames
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: phone numbers, postal codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Addresses and descriptions
pub const MAX_ADDRESS_LEN: usize = 500;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Join violations into the one-line text shown in a toast
pub fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Accumulates violations for one draft
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-empty (after trimming) and within the length limit
    pub fn required_text(&mut self, field: &'static str, value: &str, max_len: usize) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, format!("{field} is required"));
        } else if value.chars().count() > max_len {
            self.push(
                field,
                format!("{field} is too long (max {max_len} characters)"),
            );
        }
        self
    }

    /// Within the length limit when present
    pub fn optional_text(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        max_len: usize,
    ) -> &mut Self {
        if let Some(v) = value
            && v.chars().count() > max_len
        {
            self.push(
                field,
                format!("{field} is too long (max {max_len} characters)"),
            );
        }
        self
    }

    /// Required and shaped like `local@domain`
    pub fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, format!("{field} is required"));
        } else if !is_email(value) || value.len() > MAX_EMAIL_LEN {
            self.push(field, format!("{field} is not a valid email address"));
        }
        self
    }

    /// Zero-padded 24h `HH:MM`
    pub fn time_of_day(&mut self, field: &'static str, value: &str) -> &mut Self {
        if !is_time_of_day(value) {
            self.push(field, format!("{field} must be a time in HH:MM format"));
        }
        self
    }

    /// Records a violation when `condition` does not hold
    pub fn check(
        &mut self,
        condition: bool,
        field: &'static str,
        message: impl Into<String>,
    ) -> &mut Self {
        if !condition {
            self.push(field, message);
        }
        self
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(Violation::new(field, message));
    }

    pub fn finish(&mut self) -> Vec<Violation> {
        std::mem::take(&mut self.violations)
    }
}

/// Loose shape check: one `@`, non-empty local part, dotted domain
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// `HH:MM` with two digits each, hours 00-23, minutes 00-59
pub fn is_time_of_day(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hours = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minutes = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hours < 24 && minutes < 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_collects_all_failures() {
        let violations = Validator::new()
            .required_text("name", "   ", MAX_NAME_LEN)
            .email("email", "not-an-email")
            .finish();

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "name");
        assert_eq!(violations[1].field, "email");
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_email("anna@example.se"));
        assert!(!is_email("anna@example"));
        assert!(!is_email("@example.se"));
        assert!(!is_email("anna@@example.se"));
        assert!(!is_email("an na@example.se"));
    }

    #[test]
    fn test_time_of_day() {
        assert!(is_time_of_day("00:00"));
        assert!(is_time_of_day("23:59"));
        assert!(!is_time_of_day("24:00"));
        assert!(!is_time_of_day("9:00"));
        assert!(!is_time_of_day("09:60"));
        assert!(!is_time_of_day("09-00"));
    }

    #[test]
    fn test_summarize_joins_messages() {
        let violations = vec![
            Violation::new("name", "name is required"),
            Violation::new("email", "email is required"),
        ];
        assert_eq!(
            summarize(&violations),
            "name is required; email is required"
        );
    }
}
