//! Raw form payloads and their normalization

use crate::contact::{MailFormat, NewContact};
use serde::Deserialize;

/// A checkbox-style flag as it arrives from a form or JSON body
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
    /// Numbers, arrays, objects. Never set the flag.
    Other(serde::de::IgnoredAny),
}

impl FlagValue {
    /// `"yes"`, `"on"` and boolean `true` are the only truthy values.
    pub fn is_set(&self) -> bool {
        match self {
            FlagValue::Bool(b) => *b,
            FlagValue::Text(s) => s == "yes" || s == "on",
            FlagValue::Other(_) => false,
        }
    }
}

/// A free-text field as it arrives from a form or JSON body
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Text(String),
    /// Anything that is not a string. Normalizes to empty.
    Other(serde::de::IgnoredAny),
}

impl TextValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TextValue::Text(s) => Some(s),
            TextValue::Other(_) => None,
        }
    }
}

impl From<&str> for TextValue {
    fn from(s: &str) -> Self {
        TextValue::Text(s.to_string())
    }
}

impl From<String> for TextValue {
    fn from(s: String) -> Self {
        TextValue::Text(s)
    }
}

/// Contact form submission exactly as posted
///
/// Every field is optional and accepts any JSON type; missing or malformed
/// values are defaulted during normalization rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContactForm {
    pub first_name: Option<TextValue>,
    pub last_name: Option<TextValue>,
    pub job_title: Option<TextValue>,
    pub company: Option<TextValue>,
    pub email: Option<TextValue>,
    pub mailing_list: Option<FlagValue>,
    pub format: Option<TextValue>,
    pub linkedin: Option<TextValue>,
    pub meet: Option<TextValue>,
    pub other: Option<TextValue>,
    pub message: Option<TextValue>,
}

fn clean(value: Option<TextValue>) -> String {
    value
        .as_ref()
        .and_then(TextValue::as_text)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

impl RawContactForm {
    pub fn normalize(self) -> NewContact {
        NewContact {
            first_name: clean(self.first_name),
            last_name: clean(self.last_name),
            job_title: clean(self.job_title),
            company: clean(self.company),
            email: clean(self.email),
            mailing_list: self.mailing_list.map(|f| f.is_set()).unwrap_or(false),
            format: MailFormat::from_raw(self.format.as_ref().and_then(TextValue::as_text)),
            linkedin: clean(self.linkedin),
            meet: clean(self.meet),
            other: clean(self.other),
            message: clean(self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(value: serde_json::Value) -> NewContact {
        serde_json::from_value::<RawContactForm>(value)
            .unwrap()
            .normalize()
    }

    #[test]
    fn test_trims_and_defaults() {
        let contact = from_json(serde_json::json!({
            "firstName": " Ada ",
            "mailingList": "on"
        }));

        assert_eq!(contact.first_name, "Ada");
        assert!(contact.mailing_list);
        assert_eq!(contact.format, MailFormat::Html);
        assert_eq!(contact.last_name, "");
        assert_eq!(contact.message, "");
    }

    #[test]
    fn test_mailing_list_coercion() {
        let cases = [
            (serde_json::json!("yes"), true),
            (serde_json::json!("on"), true),
            (serde_json::json!(true), true),
            (serde_json::json!(false), false),
            (serde_json::json!("true"), false),
            (serde_json::json!("YES"), false),
            (serde_json::json!("no"), false),
            (serde_json::json!(""), false),
            (serde_json::json!(1), false),
            (serde_json::json!(["yes"]), false),
        ];

        for (value, expected) in cases {
            let contact = from_json(serde_json::json!({ "mailingList": value.clone() }));
            assert_eq!(contact.mailing_list, expected, "mailingList = {}", value);
        }

        assert!(!from_json(serde_json::json!({})).mailing_list);
    }

    #[test]
    fn test_format_only_text_is_text() {
        assert_eq!(
            from_json(serde_json::json!({ "format": "text" })).format,
            MailFormat::Text
        );
        assert_eq!(
            from_json(serde_json::json!({ "format": "pdf" })).format,
            MailFormat::Html
        );
        assert_eq!(from_json(serde_json::json!({})).format, MailFormat::Html);
    }

    #[test]
    fn test_non_string_values_default() {
        for value in [
            serde_json::json!(5),
            serde_json::json!(true),
            serde_json::json!(["text"]),
            serde_json::json!({ "v": "text" }),
            serde_json::json!(null),
        ] {
            let contact = from_json(serde_json::json!({
                "format": value.clone(),
                "firstName": value.clone(),
                "message": value.clone()
            }));
            assert_eq!(contact.format, MailFormat::Html, "format = {}", value);
            assert_eq!(contact.first_name, "", "firstName = {}", value);
            assert_eq!(contact.message, "");
        }
    }

    #[test]
    fn test_every_text_field_trimmed() {
        let keys = [
            "firstName", "lastName", "jobTitle", "company", "email", "linkedin", "meet",
            "other", "message",
        ];
        let mut body = serde_json::Map::new();
        for key in keys {
            body.insert(key.to_string(), serde_json::json!(format!(" \t{}-value\n ", key)));
        }

        let contact = from_json(serde_json::Value::Object(body));
        let normalized = serde_json::to_value(&contact).unwrap();
        for key in keys {
            assert_eq!(normalized[key], format!("{}-value", key), "field {}", key);
        }
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let contact = from_json(serde_json::json!({
            "email": "  ada@example.com\n",
            "submit": "Send"
        }));
        assert_eq!(contact.email, "ada@example.com");
    }
}
