//! Per-user selection policy: which (member, attribute) pair to ask next,
//! with a recent-history window against repetition and bounded retries
//! over unbuildable pairs.

mod error;
mod history;
mod session;

pub use error::SessionError;
pub use history::History;
pub use session::{Answered, Questioner, SessionState};
