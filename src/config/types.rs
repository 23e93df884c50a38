//! Configuration types.

use serde::{Deserialize, Serialize};

use crate::schema::AttributeId;

/// What `skip()` leaves behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipPolicy {
    /// The skipped pair keeps its history slot, so skipping does not
    /// reshuffle the rotation in the user's favor. Scores are untouched.
    #[default]
    ConsumeHistory,
    /// Skipping leaves no trace at all.
    Inert,
}

/// Tuning knobs for the quiz engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Number of answer options for multiple-choice questions.
    pub choices: usize,
    /// How many recently-asked (member, attribute) pairs to exclude from
    /// selection.
    pub history_window: usize,
    /// Upper bound on alternate selections tried when a pair turns out
    /// unbuildable.
    pub max_build_retries: usize,
    /// Skip semantics.
    pub skip_policy: SkipPolicy,
    /// Seed for per-session randomness. Unset means entropy-seeded;
    /// set makes a session's question sequence deterministic.
    pub rng_seed: Option<u64>,
    /// Restrict questions to these attributes. Empty means all schema
    /// attributes.
    pub attributes: Vec<AttributeId>,
}

fn default_choices() -> usize {
    4
}

fn default_history_window() -> usize {
    8
}

fn default_max_build_retries() -> usize {
    10
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            choices: default_choices(),
            history_window: default_history_window(),
            max_build_retries: default_max_build_retries(),
            skip_policy: SkipPolicy::default(),
            rng_seed: None,
            attributes: Vec::new(),
        }
    }
}
