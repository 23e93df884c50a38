//! Engine error type.

use crate::persist::PersistError;
use crate::questioner::SessionError;
use crate::roster::RosterError;

/// Union of everything the engine surface can fail with.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}
