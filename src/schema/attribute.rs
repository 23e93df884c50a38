//! Attribute definitions and the schema registry.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::AttrValue;

/// Identifier of an attribute dimension (e.g. `instrument`).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AttributeId(String);

impl AttributeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttributeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Domain kind of an attribute. Fixed at definition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Finite enumerable value set; supports multiple choice.
    Closed,
    /// Free-form value (e.g. a name); answered as free text.
    Open,
    /// A photo/file reference; compared by identity only.
    Media,
}

/// Declarative record for one attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDef {
    /// Identifier used everywhere downstream.
    pub id: AttributeId,
    /// Label for rendering question prompts.
    pub label: String,
    /// Domain kind.
    pub kind: AttributeKind,
    /// Declared value domain. Only meaningful for closed attributes;
    /// `None` means the domain is whatever the roster holds.
    pub domain: Option<BTreeSet<String>>,
}

impl AttributeDef {
    /// A closed attribute with a roster-derived domain.
    pub fn closed(id: impl Into<AttributeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: AttributeKind::Closed,
            domain: None,
        }
    }

    /// A closed attribute with an explicitly declared domain.
    pub fn closed_with_domain<I, S>(
        id: impl Into<AttributeId>,
        label: impl Into<String>,
        domain: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            label: label.into(),
            kind: AttributeKind::Closed,
            domain: Some(domain.into_iter().map(Into::into).collect()),
        }
    }

    /// An open (free-text) attribute.
    pub fn open(id: impl Into<AttributeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: AttributeKind::Open,
            domain: None,
        }
    }

    /// A media-reference attribute.
    pub fn media(id: impl Into<AttributeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: AttributeKind::Media,
            domain: None,
        }
    }
}

/// The registry of attribute definitions.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    defs: BTreeMap<AttributeId, AttributeDef>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attribute definition. Replaces any previous definition
    /// with the same id.
    pub fn register(&mut self, def: AttributeDef) {
        self.defs.insert(def.id.clone(), def);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, def: AttributeDef) -> Self {
        self.register(def);
        self
    }

    /// Whether the attribute is defined.
    #[must_use]
    pub fn contains(&self, attribute: &AttributeId) -> bool {
        self.defs.contains_key(attribute)
    }

    /// Domain kind of an attribute, if defined.
    #[must_use]
    pub fn kind(&self, attribute: &AttributeId) -> Option<AttributeKind> {
        self.defs.get(attribute).map(|d| d.kind)
    }

    /// Display label of an attribute, if defined.
    #[must_use]
    pub fn label(&self, attribute: &AttributeId) -> Option<&str> {
        self.defs.get(attribute).map(|d| d.label.as_str())
    }

    /// Declared value domain of a closed attribute. `None` for open/media
    /// attributes and for closed attributes whose domain is roster-derived.
    #[must_use]
    pub fn values_of(&self, attribute: &AttributeId) -> Option<&BTreeSet<String>> {
        self.defs.get(attribute).and_then(|d| d.domain.as_ref())
    }

    /// All defined attribute ids, in stable order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeId> {
        self.defs.keys()
    }

    /// Whether `given` counts as a correct answer for `expected` under
    /// this attribute's comparison rule. Closed and open text compares
    /// case- and whitespace-insensitively; media compares by identity.
    /// Mixed value shapes never match. Unknown attributes never match.
    #[must_use]
    pub fn compare(&self, attribute: &AttributeId, given: &AttrValue, expected: &AttrValue) -> bool {
        if !self.contains(attribute) {
            return false;
        }
        match (given, expected) {
            (AttrValue::Text(_), AttrValue::Text(_))
            | (AttrValue::Media(_), AttrValue::Media(_)) => given.key() == expected.key(),
            _ => false,
        }
    }

    /// The attribute set of the original AkaBlas roster.
    #[must_use]
    pub fn akablas() -> Self {
        Self::new()
            .with(AttributeDef::open("first_name", "first name"))
            .with(AttributeDef::open("last_name", "last name"))
            .with(AttributeDef::open("nickname", "nickname"))
            .with(AttributeDef::open("full_name", "full name"))
            .with(AttributeDef::open("address", "address"))
            .with(AttributeDef::closed("birthday", "birthday"))
            .with(AttributeDef::closed("age", "age"))
            .with(AttributeDef::closed("instrument", "instrument"))
            .with(AttributeDef::closed_with_domain(
                "gender",
                "gender",
                ["female", "male", "diverse"],
            ))
            .with(AttributeDef::media("photo", "photo"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let schema = Schema::new().with(AttributeDef::closed("instrument", "instrument"));
        let attr = AttributeId::from("instrument");
        assert!(schema.contains(&attr));
        assert_eq!(schema.kind(&attr), Some(AttributeKind::Closed));
        assert_eq!(schema.label(&attr), Some("instrument"));
        assert!(!schema.contains(&AttributeId::from("shoe_size")));
        assert_eq!(schema.kind(&AttributeId::from("shoe_size")), None);
    }

    #[test]
    fn test_compare_text_is_format_insensitive() {
        let schema = Schema::akablas();
        let attr = AttributeId::from("instrument");
        assert!(schema.compare(
            &attr,
            &AttrValue::text("  tuba "),
            &AttrValue::text("Tuba")
        ));
        assert!(!schema.compare(&attr, &AttrValue::text("Oboe"), &AttrValue::text("Tuba")));
    }

    #[test]
    fn test_compare_media_is_identity() {
        let schema = Schema::akablas();
        let attr = AttributeId::from("photo");
        assert!(schema.compare(
            &attr,
            &AttrValue::media("file-1"),
            &AttrValue::media("file-1")
        ));
        assert!(!schema.compare(
            &attr,
            &AttrValue::media("FILE-1"),
            &AttrValue::media("file-1")
        ));
    }

    #[test]
    fn test_compare_rejects_mixed_shapes_and_unknown_attributes() {
        let schema = Schema::akablas();
        let photo = AttributeId::from("photo");
        assert!(!schema.compare(&photo, &AttrValue::text("file-1"), &AttrValue::media("file-1")));
        assert!(!schema.compare(
            &AttributeId::from("shoe_size"),
            &AttrValue::text("42"),
            &AttrValue::text("42")
        ));
    }

    #[test]
    fn test_akablas_declared_gender_domain() {
        let schema = Schema::akablas();
        let domain = schema.values_of(&AttributeId::from("gender")).unwrap();
        assert_eq!(domain.len(), 3);
        assert!(domain.contains("female"));
        assert!(schema.values_of(&AttributeId::from("instrument")).is_none());
    }
}
