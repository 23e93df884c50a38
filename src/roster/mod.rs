//! Member registry: the roster, its members, and per-attribute value
//! indices used for distractor sourcing and eligibility checks.

mod error;
mod index;
mod member;
mod registry;

pub use error::RosterError;
pub use member::{Member, MemberId};
pub use registry::Roster;
