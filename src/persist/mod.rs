//! Persistence envelope: a versioned blob capturing roster, scores, and
//! in-flight session state, plus atomic file helpers.

mod envelope;
mod error;
mod file;

pub use envelope::{Envelope, ENVELOPE_VERSION};
pub use error::PersistError;
pub use file::{load_from_path, save_to_path};
