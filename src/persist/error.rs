//! Persistence error types.

/// Errors from saving or loading the persistence envelope. Version and
/// corruption failures are fatal for that load attempt; the engine never
/// attempts partial recovery.
#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    /// The blob was written by a different envelope schema version.
    #[error("Incompatible envelope version {found} (expected {expected})")]
    IncompatibleVersion { found: u32, expected: u32 },

    /// The blob cannot be decoded into the current schema.
    #[error("Corrupt envelope: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// Encoding the envelope failed.
    #[error("Failed to encode envelope: {0}")]
    Encode(#[source] serde_json::Error),

    /// File I/O failed.
    #[error("Persistence I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
