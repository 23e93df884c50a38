//! Attribute values and text normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalize free text for comparison: trim, lowercase, collapse
/// internal whitespace runs to a single space.
#[must_use]
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A single attribute value of a member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrValue {
    /// Human-readable text (names, instruments, birthdays, ...).
    Text(String),
    /// An opaque media reference (e.g. a photo file id). Compared by identity.
    Media(String),
}

impl AttrValue {
    /// Create a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Create a media reference value.
    pub fn media(s: impl Into<String>) -> Self {
        Self::Media(s.into())
    }

    /// The raw string behind the value, as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Media(s) => s,
        }
    }

    /// The comparison key for this value. Text is normalized; media
    /// references are identity so they pass through untouched.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Text(s) => normalize_text(s),
            Self::Media(s) => s.clone(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
