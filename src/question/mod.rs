//! Question construction: immutable question snapshots and the builder
//! that draws distractors from the roster.

mod builder;
mod error;
mod types;

pub use builder::QuestionBuilder;
pub use error::BuildError;
pub use types::Question;
