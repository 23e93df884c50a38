//! File-backed persistence: atomic write (temp file + sync + rename).
//!
//! These helpers are the only place where the engine touches durable
//! storage; everything else in the crate is I/O-free.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use super::envelope::Envelope;
use super::error::PersistError;

/// Save an envelope to disk atomically.
///
/// # Errors
///
/// Returns [`PersistError::Encode`] if serialization fails and
/// [`PersistError::Io`] on file errors.
pub async fn save_to_path(envelope: &Envelope, path: &Path) -> Result<(), PersistError> {
    let blob = envelope.to_bytes()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    let mut file = tokio::fs::File::create(&tmp_path).await?;
    file.write_all(&blob).await?;
    file.sync_all().await?;
    drop(file);
    tokio::fs::rename(&tmp_path, path).await?;

    tracing::debug!(path = %path.display(), bytes = blob.len(), "Saved state");
    Ok(())
}

/// Load an envelope from disk.
///
/// # Errors
///
/// Returns [`PersistError::Io`] on file errors and the envelope's own
/// version/corruption errors otherwise.
pub async fn load_from_path(path: &Path) -> Result<Envelope, PersistError> {
    let blob = tokio::fs::read(path).await?;
    let envelope = Envelope::from_bytes(&blob)?;
    tracing::debug!(path = %path.display(), "Loaded state");
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::roster::{Member, MemberId, Roster};
    use crate::schema::{AttrValue, Schema};
    use crate::score::ScoreLedger;

    use super::*;

    fn sample_envelope() -> Envelope {
        let schema = Schema::akablas();
        let mut roster = Roster::new(&schema);
        roster
            .add_member(
                Member::new(MemberId::new(1)).with_value("instrument", AttrValue::text("Tuba")),
            )
            .unwrap();
        Envelope::new(roster, ScoreLedger::new(), BTreeMap::new())
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        save_to_path(&sample_envelope(), &path).await.unwrap();
        let back = load_from_path(&path).await.unwrap();
        assert_eq!(back.roster.len(), 1);
        // The temp file must not linger.
        assert!(!dir.path().join("state.tmp").exists());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, PersistError::Io(_)));
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("state.json");
        save_to_path(&sample_envelope(), &path).await.unwrap();
        assert!(path.exists());
    }
}
