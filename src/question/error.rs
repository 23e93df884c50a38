//! Question builder error types.

use crate::roster::{MemberId, RosterError};
use crate::schema::AttributeId;

/// Errors from building a question. The first two are the "unbuildable"
/// conditions: transient structural states the questioner reacts to by
/// picking a different pair. [`BuildError::Roster`] is a caller error and
/// surfaces immediately.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    /// The target member has no value for the attribute.
    #[error("Member {member} has no value for '{attribute}'")]
    MissingValue {
        member: MemberId,
        attribute: AttributeId,
    },

    /// Too few distinct alternative values exist among the other members.
    #[error(
        "Not enough distractors for '{attribute}': need {needed}, have {available}"
    )]
    NotEnoughDistractors {
        attribute: AttributeId,
        needed: usize,
        available: usize,
    },

    /// A bad member/attribute reference.
    #[error(transparent)]
    Roster(#[from] RosterError),
}

impl BuildError {
    /// Whether this is a transient "pick another pair" condition rather
    /// than a caller error.
    #[must_use]
    pub fn is_unbuildable(&self) -> bool {
        matches!(
            self,
            Self::MissingValue { .. } | Self::NotEnoughDistractors { .. }
        )
    }
}
