//! Score records.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::AttributeId;

/// Identifier of a quiz-taking user. Distinct from
/// [`MemberId`](crate::roster::MemberId): users answer questions, members
/// are asked about. In practice the same chat id often plays both roles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of answering a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Per-attribute accuracy counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrScore {
    pub asked: u64,
    pub correct: u64,
}

/// Running statistics for one user. Created on first interaction, updated
/// after every answered question, never deleted by the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Total questions answered.
    pub total_asked: u64,
    /// Total answered correctly.
    pub correct: u64,
    /// Consecutive correct answers, reset on the first incorrect one.
    pub current_streak: u64,
    /// Best streak ever reached.
    pub best_streak: u64,
    /// Accuracy broken down by asked attribute.
    #[serde(default)]
    pub per_attribute: BTreeMap<AttributeId, AttrScore>,
    /// When the user last answered, if ever.
    #[serde(default)]
    pub last_answered_at: Option<DateTime<Utc>>,
}

impl ScoreRecord {
    /// Total answered incorrectly. Always `total_asked - correct`.
    #[must_use]
    pub fn incorrect(&self) -> u64 {
        self.total_asked.saturating_sub(self.correct)
    }

    /// Fraction of correct answers in percent, two decimal places.
    /// Zero when nothing was answered yet.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.total_asked == 0 {
            return 0.0;
        }
        (self.correct as f64 / self.total_asked as f64 * 10_000.0).round() / 100.0
    }

    /// Apply one answer outcome.
    pub(crate) fn record(&mut self, attribute: &AttributeId, outcome: Outcome) {
        self.total_asked = self.total_asked.saturating_add(1);
        if outcome.is_correct() {
            self.correct = self.correct.saturating_add(1);
            self.current_streak = self.current_streak.saturating_add(1);
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
        let attr = self.per_attribute.entry(attribute.clone()).or_default();
        attr.asked = attr.asked.saturating_add(1);
        if outcome.is_correct() {
            attr.correct = attr.correct.saturating_add(1);
        }
        self.last_answered_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument() -> AttributeId {
        AttributeId::from("instrument")
    }

    #[test]
    fn test_correct_then_incorrect_trace() {
        let mut record = ScoreRecord::default();
        record.record(&instrument(), Outcome::Correct);
        record.record(&instrument(), Outcome::Incorrect);

        assert_eq!(record.total_asked, 2);
        assert_eq!(record.correct, 1);
        assert_eq!(record.incorrect(), 1);
        assert_eq!(record.current_streak, 0);
        assert_eq!(record.best_streak, 1);
    }

    #[test]
    fn test_streak_invariants_hold_over_any_sequence() {
        let mut record = ScoreRecord::default();
        let outcomes = [
            Outcome::Correct,
            Outcome::Correct,
            Outcome::Incorrect,
            Outcome::Correct,
            Outcome::Correct,
            Outcome::Correct,
            Outcome::Incorrect,
        ];
        for outcome in outcomes {
            record.record(&instrument(), outcome);
            assert_eq!(record.correct + record.incorrect(), record.total_asked);
            assert!(record.current_streak <= record.best_streak);
            if outcome == Outcome::Incorrect {
                assert_eq!(record.current_streak, 0);
            }
        }
        assert_eq!(record.total_asked, 7);
        assert_eq!(record.correct, 5);
        assert_eq!(record.best_streak, 3);
    }

    #[test]
    fn test_per_attribute_breakdown() {
        let mut record = ScoreRecord::default();
        record.record(&instrument(), Outcome::Correct);
        record.record(&AttributeId::from("gender"), Outcome::Incorrect);
        record.record(&instrument(), Outcome::Incorrect);

        let instr = record.per_attribute.get(&instrument()).unwrap();
        assert_eq!(instr.asked, 2);
        assert_eq!(instr.correct, 1);
        let gender = record.per_attribute.get(&AttributeId::from("gender")).unwrap();
        assert_eq!(gender.asked, 1);
        assert_eq!(gender.correct, 0);
        assert!(record.last_answered_at.is_some());
    }

    #[test]
    fn test_ratio_rounding() {
        let record = ScoreRecord {
            total_asked: 3,
            correct: 2,
            ..ScoreRecord::default()
        };
        assert!((record.ratio() - 66.67).abs() < f64::EPSILON);
        assert!((ScoreRecord::default().ratio()).abs() < f64::EPSILON);
    }
}
