//! The engine facade: shared roster, ledger, and per-user sessions behind
//! the locking scheme the transport layer talks to.

mod error;
mod quiz;

pub use error::EngineError;
pub use quiz::{AnswerResult, QuizEngine};
