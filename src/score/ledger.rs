//! The shared ledger of all users' scores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::AttributeId;

use super::record::{Outcome, ScoreRecord, UserId};

/// All users' running statistics, keyed by user id. The engine serializes
/// concurrent updates per user (one open question per user makes a single
/// ledger lock sufficient).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreLedger {
    records: BTreeMap<UserId, ScoreRecord>,
}

impl ScoreLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one answer outcome for a user, creating the record on first
    /// interaction.
    pub fn record(&mut self, user: UserId, attribute: &AttributeId, outcome: Outcome) {
        let record = self.records.entry(user).or_default();
        record.record(attribute, outcome);
        tracing::debug!(
            user = %user,
            attribute = %attribute,
            correct = outcome.is_correct(),
            total = record.total_asked,
            streak = record.current_streak,
            "Recorded outcome"
        );
    }

    /// Read-only copy of one user's record, if they ever answered.
    #[must_use]
    pub fn snapshot(&self, user: UserId) -> Option<ScoreRecord> {
        self.records.get(&user).cloned()
    }

    /// Read-only copies of all records.
    #[must_use]
    pub fn snapshots(&self) -> Vec<(UserId, ScoreRecord)> {
        self.records
            .iter()
            .map(|(user, record)| (*user, record.clone()))
            .collect()
    }

    /// Number of users with a record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
