//! Roster members.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{AttrValue, AttributeId};

/// Unique identifier of a roster member (the chat user id in practice).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One person in the roster: an id plus attribute values. Values may be
/// absent when unset or unknown. The quiz core treats members as
/// read-only; mutations go through the roster's registration hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    values: BTreeMap<AttributeId, AttrValue>,
}

impl Member {
    /// Create a member with no attribute values set.
    #[must_use]
    pub fn new(id: MemberId) -> Self {
        Self {
            id,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style value assignment.
    #[must_use]
    pub fn with_value(mut self, attribute: impl Into<AttributeId>, value: AttrValue) -> Self {
        self.values.insert(attribute.into(), value);
        self
    }

    #[must_use]
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// The member's value for an attribute, if set.
    #[must_use]
    pub fn value(&self, attribute: &AttributeId) -> Option<&AttrValue> {
        self.values.get(attribute)
    }

    /// Attributes this member has a value for.
    pub fn attributes(&self) -> impl Iterator<Item = (&AttributeId, &AttrValue)> {
        self.values.iter()
    }

    /// Set or clear a value, returning the previous one. Crate-internal:
    /// external callers go through `Roster::on_attribute_changed` so the
    /// indices stay consistent.
    pub(crate) fn set_value(
        &mut self,
        attribute: &AttributeId,
        value: Option<AttrValue>,
    ) -> Option<AttrValue> {
        match value {
            Some(v) => self.values.insert(attribute.clone(), v),
            None => self.values.remove(attribute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_values() {
        let member = Member::new(MemberId::new(1))
            .with_value("first_name", AttrValue::text("Hanna"))
            .with_value("instrument", AttrValue::text("Oboe"));
        assert_eq!(member.id(), MemberId::new(1));
        assert_eq!(
            member.value(&AttributeId::from("instrument")),
            Some(&AttrValue::text("Oboe"))
        );
        assert_eq!(member.value(&AttributeId::from("nickname")), None);
        assert_eq!(member.attributes().count(), 2);
    }

    #[test]
    fn test_set_value_returns_previous() {
        let mut member = Member::new(MemberId::new(2)).with_value("instrument", AttrValue::text("Tuba"));
        let attr = AttributeId::from("instrument");
        let old = member.set_value(&attr, Some(AttrValue::text("Oboe")));
        assert_eq!(old, Some(AttrValue::text("Tuba")));
        let old = member.set_value(&attr, None);
        assert_eq!(old, Some(AttrValue::text("Oboe")));
        assert_eq!(member.value(&attr), None);
    }
}
