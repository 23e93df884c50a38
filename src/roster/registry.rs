//! The roster itself.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::schema::{AttrValue, AttributeId, AttributeKind, Schema};

use super::error::RosterError;
use super::index::AttributeIndex;
use super::member::{Member, MemberId};

/// The full set of members plus per-attribute value indices.
///
/// The roster is built for a fixed attribute schema; it keeps one index
/// per schema attribute and rejects references to anything else. Reads
/// never mutate it; mutations come from the registration collaborator
/// through [`add_member`](Self::add_member),
/// [`remove_member`](Self::remove_member) and
/// [`on_attribute_changed`](Self::on_attribute_changed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    members: BTreeMap<MemberId, Member>,
    indices: BTreeMap<AttributeId, AttributeIndex>,
}

impl Roster {
    /// Create an empty roster for the given schema.
    #[must_use]
    pub fn new(schema: &Schema) -> Self {
        Self {
            members: BTreeMap::new(),
            indices: schema
                .attributes()
                .map(|attr| (attr.clone(), AttributeIndex::default()))
                .collect(),
        }
    }

    /// Number of registered members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Look up a member.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] if no such member is registered.
    pub fn get(&self, id: MemberId) -> Result<&Member, RosterError> {
        self.members.get(&id).ok_or(RosterError::NotFound(id))
    }

    /// All registered members.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Register a new member and index all of their values.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Duplicate`] if the id is already registered
    /// and [`RosterError::UnknownAttribute`] if the member carries a value
    /// for an attribute outside the roster's schema. Nothing is stored in
    /// either case.
    pub fn add_member(&mut self, member: Member) -> Result<(), RosterError> {
        if self.members.contains_key(&member.id()) {
            return Err(RosterError::Duplicate(member.id()));
        }
        if let Some((attr, _)) = member
            .attributes()
            .find(|(attr, _)| !self.indices.contains_key(*attr))
        {
            return Err(RosterError::UnknownAttribute(attr.clone()));
        }

        for (attr, value) in member.attributes() {
            if let Some(index) = self.indices.get_mut(attr) {
                index.insert(value, member.id());
            }
        }
        tracing::debug!(member = %member.id(), "Registered member");
        self.members.insert(member.id(), member);
        Ok(())
    }

    /// Remove a member and all of their index entries, returning them.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] if no such member is registered.
    pub fn remove_member(&mut self, id: MemberId) -> Result<Member, RosterError> {
        let member = self.members.remove(&id).ok_or(RosterError::NotFound(id))?;
        for (attr, value) in member.attributes() {
            if let Some(index) = self.indices.get_mut(attr) {
                index.remove(value, id);
            }
        }
        tracing::debug!(member = %id, "Removed member");
        Ok(member)
    }

    /// Hook for the registration collaborator: a member's attribute value
    /// changed (or was set/cleared). Updates the member and keeps the
    /// attribute's index consistent. Returns the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] for an unregistered member and
    /// [`RosterError::UnknownAttribute`] for an attribute outside the
    /// schema. The roster is untouched on error.
    pub fn on_attribute_changed(
        &mut self,
        id: MemberId,
        attribute: &AttributeId,
        new_value: Option<AttrValue>,
    ) -> Result<Option<AttrValue>, RosterError> {
        if !self.indices.contains_key(attribute) {
            return Err(RosterError::UnknownAttribute(attribute.clone()));
        }
        let member = self.members.get_mut(&id).ok_or(RosterError::NotFound(id))?;
        let old_value = member.set_value(attribute, new_value.clone());

        if let Some(index) = self.indices.get_mut(attribute) {
            if let Some(old) = &old_value {
                index.remove(old, id);
            }
            if let Some(new) = &new_value {
                index.insert(new, id);
            }
        }
        tracing::debug!(
            member = %id,
            attribute = %attribute,
            had_old = old_value.is_some(),
            has_new = new_value.is_some(),
            "Attribute changed"
        );
        Ok(old_value)
    }

    /// Ids of all members holding this value for the attribute, compared
    /// by the value's comparison key.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::UnknownAttribute`] for an attribute outside
    /// the schema.
    pub fn members_with(
        &self,
        attribute: &AttributeId,
        value: &AttrValue,
    ) -> Result<BTreeSet<MemberId>, RosterError> {
        self.indices
            .get(attribute)
            .map(|index| index.members_with(value))
            .ok_or_else(|| RosterError::UnknownAttribute(attribute.clone()))
    }

    /// Display forms of the distinct values held by members *other* than
    /// `member` for the attribute, excluding any value equal to the
    /// member's own. This is the distractor pool.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] / [`RosterError::UnknownAttribute`]
    /// for bad references.
    pub fn distinct_other_values(
        &self,
        attribute: &AttributeId,
        member: MemberId,
    ) -> Result<Vec<AttrValue>, RosterError> {
        let index = self
            .indices
            .get(attribute)
            .ok_or_else(|| RosterError::UnknownAttribute(attribute.clone()))?;
        let own_key = self
            .get(member)?
            .value(attribute)
            .map(AttrValue::key)
            .unwrap_or_default();
        Ok(index.other_values(member, &own_key))
    }

    /// All `(member, attribute)` pairs askable about this attribute with
    /// `k` answer options: the member has a value, and for closed
    /// attributes at least `k - 1` distinct alternative values exist among
    /// the other members.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::UnknownAttribute`] for an attribute outside
    /// the schema.
    pub fn eligible_pairs(
        &self,
        schema: &Schema,
        attribute: &AttributeId,
        k: usize,
    ) -> Result<Vec<(MemberId, AttributeId)>, RosterError> {
        let kind = schema
            .kind(attribute)
            .ok_or_else(|| RosterError::UnknownAttribute(attribute.clone()))?;
        if !self.indices.contains_key(attribute) {
            return Err(RosterError::UnknownAttribute(attribute.clone()));
        }

        let mut pairs = Vec::new();
        for member in self.members.values() {
            if member.value(attribute).is_none() {
                continue;
            }
            if kind == AttributeKind::Closed {
                let alternatives = self.distinct_other_values(attribute, member.id())?;
                if alternatives.len() < k.saturating_sub(1) {
                    continue;
                }
            }
            pairs.push((member.id(), attribute.clone()));
        }
        Ok(pairs)
    }
}
