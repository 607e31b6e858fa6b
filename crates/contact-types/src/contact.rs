//! Stored contact entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Preferred mail format for mailing list subscribers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailFormat {
    #[default]
    Html,
    Text,
}

impl MailFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailFormat::Html => "html",
            MailFormat::Text => "text",
        }
    }

    /// Only the exact value `"text"` selects plain text; anything else is HTML.
    pub fn from_raw(value: Option<&str>) -> Self {
        match value {
            Some("text") => MailFormat::Text,
            _ => MailFormat::Html,
        }
    }
}

impl std::fmt::Display for MailFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized contact fields, before the store assigns id and timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub company: String,
    pub email: String,
    pub mailing_list: bool,
    pub format: MailFormat,
    pub linkedin: String,
    pub meet: String,
    pub other: String,
    pub message: String,
}

/// A stored form submission
///
/// `id` is unique within the store that assigned it and `created_at` never
/// changes after insertion. On the wire `createdAt` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEntry {
    pub id: i64,
    #[serde(flatten)]
    pub contact: NewContact,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl ContactEntry {
    pub fn new(id: i64, contact: NewContact, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            contact,
            created_at,
        }
    }

    /// "First Last", skipping whichever half is empty
    pub fn display_name(&self) -> String {
        let first = self.contact.first_name.as_str();
        let last = self.contact.last_name.as_str();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{} {}", first, last),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => String::new(),
        }
    }
}

/// Newest first; entries sharing a timestamp fall back to descending id.
pub fn sort_newest_first(entries: &mut [ContactEntry]) {
    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
