//! The per-user quiz session state machine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{QuizConfig, SkipPolicy};
use crate::question::{BuildError, Question, QuestionBuilder};
use crate::roster::{MemberId, Roster};
use crate::schema::{AttrValue, AttributeId, Schema};
use crate::score::{Outcome, UserId};

use super::error::SessionError;
use super::history::History;

/// Session state: either waiting to ask or waiting for an answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Posed,
}

/// A submitted answer together with the question it resolved.
#[derive(Debug, Clone)]
pub struct Answered {
    pub question: Question,
    pub outcome: Outcome,
}

fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// One user's quiz session: the open question (if any), the recent-history
/// window, and the session's randomness source.
///
/// Sessions hold no roster or ledger state of their own; the shared
/// roster and schema are passed in per call. The RNG is not part of the
/// persisted state; a reloaded session re-seeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questioner {
    user: UserId,
    current: Option<Question>,
    history: History,
    /// Questions posed so far, skips included.
    asked: u64,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl Questioner {
    /// Create an idle session. With `rng_seed` configured the session's
    /// question sequence is deterministic; the user id is mixed in so
    /// seeded users still see different sequences.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn new(user: UserId, config: &QuizConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ user.get() as u64),
            None => entropy_rng(),
        };
        Self {
            user,
            current: None,
            history: History::new(config.history_window),
            asked: 0,
            rng,
        }
    }

    #[must_use]
    pub fn user(&self) -> UserId {
        self.user
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.current.is_some() {
            SessionState::Posed
        } else {
            SessionState::Idle
        }
    }

    /// The open question, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Questions posed so far in this session.
    #[must_use]
    pub fn asked(&self) -> u64 {
        self.asked
    }

    /// Re-seed the session RNG (used after reloading persisted state).
    #[allow(clippy::cast_sign_loss)]
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed ^ self.user.get() as u64);
    }

    /// Select the next (member, attribute) pair and pose a question.
    ///
    /// Pairs in the history window are excluded; if that leaves nothing,
    /// the oldest history entries are dropped until something qualifies.
    /// The pair is picked uniformly at random among what remains, retrying
    /// a bounded number of alternates when a pair turns out unbuildable.
    ///
    /// # Errors
    ///
    /// [`SessionError::QuestionPending`] if a question is already open,
    /// [`SessionError::NoQuestionsAvailable`] if no eligible pair yields a
    /// buildable question, and [`SessionError::Roster`] for bad references
    /// (e.g. a misconfigured attribute filter).
    pub fn next_question(
        &mut self,
        schema: &Schema,
        roster: &Roster,
        config: &QuizConfig,
    ) -> Result<Question, SessionError> {
        if self.current.is_some() {
            return Err(SessionError::QuestionPending);
        }

        let candidates = self.eligible_candidates(schema, roster, config)?;
        if candidates.is_empty() {
            tracing::debug!(user = %self.user, "No eligible pairs");
            return Err(SessionError::NoQuestionsAvailable);
        }

        let mut pool = self.excluding_history(&candidates);
        while pool.is_empty() && !self.history.is_empty() {
            let dropped = self.history.relax_oldest();
            tracing::debug!(user = %self.user, dropped = ?dropped, "Relaxed history window");
            pool = self.excluding_history(&candidates);
        }

        let builder = QuestionBuilder::new(schema, roster);
        let retries = config.max_build_retries.max(1);
        for _ in 0..retries {
            if pool.is_empty() {
                break;
            }
            let idx = self.rng.gen_range(0..pool.len());
            let (member, attribute) = pool.swap_remove(idx);
            match builder.build(member, &attribute, config.choices, &mut self.rng) {
                Ok(question) => {
                    self.history.push(member, attribute.clone());
                    self.asked = self.asked.saturating_add(1);
                    tracing::debug!(
                        user = %self.user,
                        member = %member,
                        attribute = %attribute,
                        asked = self.asked,
                        "Posed question"
                    );
                    self.current = Some(question.clone());
                    return Ok(question);
                }
                Err(
                    e @ (BuildError::MissingValue { .. }
                    | BuildError::NotEnoughDistractors { .. }),
                ) => {
                    tracing::debug!(
                        user = %self.user,
                        member = %member,
                        attribute = %attribute,
                        error = %e,
                        "Pair unbuildable, trying another"
                    );
                }
                Err(BuildError::Roster(e)) => return Err(e.into()),
            }
        }

        tracing::debug!(user = %self.user, "Retries exhausted");
        Err(SessionError::NoQuestionsAvailable)
    }

    /// Validate a submitted answer against the open question and close it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoOpenQuestion`] while idle.
    pub fn submit_answer(
        &mut self,
        schema: &Schema,
        answer: &AttrValue,
    ) -> Result<Answered, SessionError> {
        let question = self.current.take().ok_or(SessionError::NoOpenQuestion)?;
        let correct = schema.compare(question.attribute(), answer, question.correct_answer());
        let outcome = if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        tracing::debug!(
            user = %self.user,
            attribute = %question.attribute(),
            correct,
            "Answer submitted"
        );
        Ok(Answered { question, outcome })
    }

    /// Discard the open question without recording an outcome. Under
    /// [`SkipPolicy::ConsumeHistory`] the pair keeps its history slot and
    /// counts as asked; under [`SkipPolicy::Inert`] the skip leaves no
    /// trace. Returns the discarded question.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoOpenQuestion`] while idle.
    pub fn skip(&mut self, config: &QuizConfig) -> Result<Question, SessionError> {
        let question = self.current.take().ok_or(SessionError::NoOpenQuestion)?;
        if config.skip_policy == SkipPolicy::Inert {
            self.history.pop_newest();
            self.asked = self.asked.saturating_sub(1);
        }
        tracing::debug!(
            user = %self.user,
            attribute = %question.attribute(),
            policy = ?config.skip_policy,
            "Question skipped"
        );
        Ok(question)
    }

    fn eligible_candidates(
        &self,
        schema: &Schema,
        roster: &Roster,
        config: &QuizConfig,
    ) -> Result<Vec<(MemberId, AttributeId)>, SessionError> {
        let attributes: Vec<AttributeId> = if config.attributes.is_empty() {
            schema.attributes().cloned().collect()
        } else {
            config.attributes.clone()
        };

        let mut candidates = Vec::new();
        for attribute in &attributes {
            candidates.extend(roster.eligible_pairs(schema, attribute, config.choices)?);
        }
        Ok(candidates)
    }

    fn excluding_history(
        &self,
        candidates: &[(MemberId, AttributeId)],
    ) -> Vec<(MemberId, AttributeId)> {
        candidates
            .iter()
            .filter(|(member, attribute)| !self.history.contains(*member, attribute))
            .cloned()
            .collect()
    }
}
