//! The versioned envelope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::questioner::Questioner;
use crate::roster::Roster;
use crate::score::{ScoreLedger, UserId};

use super::error::PersistError;

/// Current envelope schema version. Bump on any change to the shape of
/// the persisted state.
pub const ENVELOPE_VERSION: u32 = 1;

/// Everything the engine needs to resume after a restart: the roster,
/// all score records, and each user's in-flight session (open question
/// and history window included). Session RNGs are not persisted;
/// reloaded sessions re-seed.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    version: u32,
    pub roster: Roster,
    pub scores: ScoreLedger,
    pub sessions: BTreeMap<UserId, Questioner>,
}

/// Minimal probe to read the version tag before committing to the full
/// shape.
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl Envelope {
    #[must_use]
    pub fn new(
        roster: Roster,
        scores: ScoreLedger,
        sessions: BTreeMap<UserId, Questioner>,
    ) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            roster,
            scores,
            sessions,
        }
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Serialize to an opaque blob.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Encode`] if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        serde_json::to_vec(self).map_err(PersistError::Encode)
    }

    /// Deserialize a blob, checking the version tag first.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::IncompatibleVersion`] when the tag does not
    /// match [`ENVELOPE_VERSION`] and [`PersistError::Corrupt`] when the
    /// blob cannot be decoded. No best-effort repair is attempted.
    pub fn from_bytes(blob: &[u8]) -> Result<Self, PersistError> {
        let probe: VersionProbe =
            serde_json::from_slice(blob).map_err(PersistError::Corrupt)?;
        if probe.version != ENVELOPE_VERSION {
            return Err(PersistError::IncompatibleVersion {
                found: probe.version,
                expected: ENVELOPE_VERSION,
            });
        }
        let envelope: Self = serde_json::from_slice(blob).map_err(PersistError::Corrupt)?;
        tracing::debug!(
            version = envelope.version,
            members = envelope.roster.len(),
            users = envelope.scores.len(),
            sessions = envelope.sessions.len(),
            "Decoded envelope"
        );
        Ok(envelope)
    }
}
