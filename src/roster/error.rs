//! Registry error types.

use crate::schema::AttributeId;

use super::member::MemberId;

/// Errors from roster operations. All of these are caller errors and are
/// surfaced immediately, never retried.
#[derive(thiserror::Error, Debug)]
pub enum RosterError {
    /// No member with this id is registered.
    #[error("No member with id {0}")]
    NotFound(MemberId),

    /// The attribute is not part of the schema this roster was built for.
    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(AttributeId),

    /// A member with this id is already registered.
    #[error("Member {0} is already registered")]
    Duplicate(MemberId),
}
