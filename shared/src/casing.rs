//! Request body casing
//!
//! The admin backend binds PascalCase properties while the member backend
//! takes the camelCase bodies serde produces. Conversion happens on the
//! JSON value right before sending, so models only ever derive camelCase.

use heck::ToPascalCase;
use serde_json::{Map, Value};

/// Key casing applied to outgoing JSON bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyCasing {
    /// Send keys exactly as serialized (camelCase)
    #[default]
    Camel,
    /// Convert every object key to PascalCase, recursively
    Pascal,
}

impl BodyCasing {
    pub fn apply(self, value: Value) -> Value {
        match self {
            Self::Camel => value,
            Self::Pascal => to_pascal_keys(value),
        }
    }
}

impl std::str::FromStr for BodyCasing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "camel" | "camelcase" => Ok(Self::Camel),
            "pascal" | "pascalcase" => Ok(Self::Pascal),
            other => Err(format!("unknown body casing: {other}")),
        }
    }
}

/// Rename object keys to PascalCase at every depth; values are untouched
pub fn to_pascal_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key.to_pascal_case(), to_pascal_keys(inner)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(to_pascal_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_pascal_conversion_is_recursive() {
        let body = json!({
            "membershipStatus": "Active",
            "joinDate": "2024-01-15",
            "features": ["sauna", "poolAccess"],
            "address": { "postalCode": "111 22" },
            "items": [{ "planId": "p1" }]
        });

        let converted = BodyCasing::Pascal.apply(body);

        assert_eq!(
            converted,
            json!({
                "MembershipStatus": "Active",
                "JoinDate": "2024-01-15",
                "Features": ["sauna", "poolAccess"],
                "Address": { "PostalCode": "111 22" },
                "Items": [{ "PlanId": "p1" }]
            })
        );
    }

    #[test]
    fn test_camel_is_identity() {
        let body = json!({ "dayOfWeek": 1 });
        assert_eq!(BodyCasing::Camel.apply(body.clone()), body);
    }

    #[test]
    fn test_parse_casing() {
        assert_eq!("Pascal".parse::<BodyCasing>(), Ok(BodyCasing::Pascal));
        assert_eq!("camelCase".parse::<BodyCasing>(), Ok(BodyCasing::Camel));
        assert!("kebab".parse::<BodyCasing>().is_err());
    }
}
