//! Questioner error types.

use crate::roster::RosterError;

/// Errors from driving a quiz session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// No eligible pair yields a buildable question, even after relaxing
    /// the history window.
    #[error("Nothing to ask right now")]
    NoQuestionsAvailable,

    /// `submit_answer`/`skip` was called with no question open.
    #[error("No open question")]
    NoOpenQuestion,

    /// `next_question` was called while a question is still open.
    #[error("A question is already open; answer or skip it first")]
    QuestionPending,

    /// A bad member/attribute reference (e.g. a configured attribute
    /// filter naming an unknown attribute).
    #[error(transparent)]
    Roster(#[from] RosterError),
}
