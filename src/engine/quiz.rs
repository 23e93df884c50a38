//! The quiz engine.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::QuizConfig;
use crate::persist::{self, Envelope};
use crate::question::Question;
use crate::questioner::{Questioner, SessionError};
use crate::roster::{Member, MemberId, Roster};
use crate::schema::{AttrValue, AttributeId, Schema};
use crate::score::{Outcome, ScoreLedger, ScoreRecord, UserId};

use super::error::EngineError;

/// What the transport gets back for a submitted answer.
#[derive(Debug, Clone)]
pub struct AnswerResult {
    /// Whether the answer was correct.
    pub outcome: Outcome,
    /// The question that was answered (carries the correct answer for
    /// rendering "the right answer was ..." messages).
    pub question: Question,
    /// The user's score after recording the outcome.
    pub score: ScoreRecord,
}

/// The engine serving all chat sessions.
///
/// The roster is read-mostly: question building and eligibility reads run
/// concurrently, registration writes take the write lock. The ledger and
/// the session map sit behind their own mutexes; with one open question
/// per user that serializes per-user score updates as required.
///
/// No method here performs blocking I/O; the async
/// [`save_to_path`](Self::save_to_path) / [`load_from_path`](Self::load_from_path)
/// pair is the only door to durable storage.
#[derive(Debug)]
pub struct QuizEngine {
    schema: Schema,
    config: QuizConfig,
    roster: RwLock<Roster>,
    ledger: Mutex<ScoreLedger>,
    sessions: Mutex<HashMap<UserId, Questioner>>,
}

impl QuizEngine {
    /// Create an engine with an empty roster.
    #[must_use]
    pub fn new(schema: Schema, config: QuizConfig) -> Self {
        let roster = Roster::new(&schema);
        Self {
            schema,
            config,
            roster: RwLock::new(roster),
            ledger: Mutex::new(ScoreLedger::new()),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Rebuild an engine from a decoded envelope. Sessions re-seed from
    /// the configured seed (RNG state is not persisted).
    #[must_use]
    pub fn from_envelope(schema: Schema, config: QuizConfig, envelope: Envelope) -> Self {
        let mut sessions: HashMap<UserId, Questioner> = envelope.sessions.into_iter().collect();
        if let Some(seed) = config.rng_seed {
            for session in sessions.values_mut() {
                session.reseed(seed);
            }
        }
        Self {
            schema,
            config,
            roster: RwLock::new(envelope.roster),
            ledger: Mutex::new(envelope.scores),
            sessions: Mutex::new(sessions),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    // -- registration hooks (inbound from the registration collaborator) --

    /// Register a member.
    ///
    /// # Errors
    ///
    /// See [`Roster::add_member`].
    pub fn add_member(&self, member: Member) -> Result<(), EngineError> {
        self.roster_mut().add_member(member)?;
        Ok(())
    }

    /// Remove a member, returning them.
    ///
    /// # Errors
    ///
    /// See [`Roster::remove_member`].
    pub fn remove_member(&self, id: MemberId) -> Result<Member, EngineError> {
        Ok(self.roster_mut().remove_member(id)?)
    }

    /// Propagate an attribute change, returning the previous value.
    ///
    /// # Errors
    ///
    /// See [`Roster::on_attribute_changed`].
    pub fn on_attribute_changed(
        &self,
        id: MemberId,
        attribute: &AttributeId,
        new_value: Option<AttrValue>,
    ) -> Result<Option<AttrValue>, EngineError> {
        Ok(self.roster_mut().on_attribute_changed(id, attribute, new_value)?)
    }

    /// Snapshot of one member.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`](crate::roster::RosterError::NotFound)
    /// for an unregistered id.
    pub fn member(&self, id: MemberId) -> Result<Member, EngineError> {
        Ok(self.roster_ref().get(id)?.clone())
    }

    /// Number of registered members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.roster_ref().len()
    }

    // -- quiz surface (inbound from the transport collaborator) --

    /// Pose the next question for a user, creating their session on first
    /// contact.
    ///
    /// # Errors
    ///
    /// See [`Questioner::next_question`].
    pub fn next_question(&self, user: UserId) -> Result<Question, EngineError> {
        let mut sessions = self.sessions_mut();
        let session = sessions
            .entry(user)
            .or_insert_with(|| Questioner::new(user, &self.config));
        let roster = self.roster_ref();
        Ok(session.next_question(&self.schema, &roster, &self.config)?)
    }

    /// Validate a user's answer, record the outcome, and close the
    /// question.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoOpenQuestion`] when the user has no
    /// session or no open question.
    pub fn submit_answer(&self, user: UserId, answer: &AttrValue) -> Result<AnswerResult, EngineError> {
        let mut sessions = self.sessions_mut();
        let session = sessions
            .get_mut(&user)
            .ok_or(SessionError::NoOpenQuestion)?;
        let answered = session.submit_answer(&self.schema, answer)?;

        let mut ledger = self.ledger_mut();
        ledger.record(user, answered.question.attribute(), answered.outcome);
        let score = ledger
            .snapshot(user)
            .unwrap_or_default();

        Ok(AnswerResult {
            outcome: answered.outcome,
            question: answered.question,
            score,
        })
    }

    /// Discard a user's open question without scoring it (also how the
    /// transport signals an expired question). Returns the discarded
    /// question.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoOpenQuestion`] when the user has no
    /// session or no open question.
    pub fn skip(&self, user: UserId) -> Result<Question, EngineError> {
        let mut sessions = self.sessions_mut();
        let session = sessions
            .get_mut(&user)
            .ok_or(SessionError::NoOpenQuestion)?;
        Ok(session.skip(&self.config)?)
    }

    /// The user's open question, if any.
    #[must_use]
    pub fn open_question(&self, user: UserId) -> Option<Question> {
        self.sessions_mut()
            .get(&user)
            .and_then(|s| s.current_question().cloned())
    }

    /// Read-only copy of a user's score record.
    #[must_use]
    pub fn score_snapshot(&self, user: UserId) -> Option<ScoreRecord> {
        self.ledger_mut().snapshot(user)
    }

    /// All score records in leaderboard order: best accuracy first, ties
    /// broken by answer count.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<(UserId, ScoreRecord)> {
        let mut rows = self.ledger_mut().snapshots();
        rows.sort_by(|(_, a), (_, b)| {
            b.ratio()
                .partial_cmp(&a.ratio())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.total_asked.cmp(&a.total_asked))
        });
        rows
    }

    // -- persistence --

    /// Snapshot the whole engine state into an envelope.
    #[must_use]
    pub fn to_envelope(&self) -> Envelope {
        let roster = self.roster_ref().clone();
        let scores = self.ledger_mut().clone();
        let sessions: BTreeMap<UserId, Questioner> = self
            .sessions_mut()
            .iter()
            .map(|(user, session)| (*user, session.clone()))
            .collect();
        Envelope::new(roster, scores, sessions)
    }

    /// Serialize the engine state to an opaque blob.
    ///
    /// # Errors
    ///
    /// Returns [`crate::persist::PersistError::Encode`] if serialization
    /// fails.
    pub fn save(&self) -> Result<Vec<u8>, EngineError> {
        Ok(self.to_envelope().to_bytes()?)
    }

    /// Rebuild an engine from a blob produced by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns the envelope's version/corruption errors unchanged.
    pub fn load(schema: Schema, config: QuizConfig, blob: &[u8]) -> Result<Self, EngineError> {
        let envelope = Envelope::from_bytes(blob)?;
        Ok(Self::from_envelope(schema, config, envelope))
    }

    /// Save the engine state to a file atomically.
    ///
    /// # Errors
    ///
    /// See [`persist::save_to_path`].
    pub async fn save_to_path(&self, path: &Path) -> Result<(), EngineError> {
        let envelope = self.to_envelope();
        persist::save_to_path(&envelope, path).await?;
        Ok(())
    }

    /// Load an engine from a file written by
    /// [`save_to_path`](Self::save_to_path).
    ///
    /// # Errors
    ///
    /// See [`persist::load_from_path`].
    pub async fn load_from_path(
        schema: Schema,
        config: QuizConfig,
        path: &Path,
    ) -> Result<Self, EngineError> {
        let envelope = persist::load_from_path(path).await?;
        Ok(Self::from_envelope(schema, config, envelope))
    }

    // -- lock plumbing; a poisoned lock yields its data, the state it
    // guards is all plain counters and maps --

    fn roster_ref(&self) -> RwLockReadGuard<'_, Roster> {
        self.roster.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn roster_mut(&self) -> RwLockWriteGuard<'_, Roster> {
        self.roster.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn ledger_mut(&self) -> MutexGuard<'_, ScoreLedger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sessions_mut(&self) -> MutexGuard<'_, HashMap<UserId, Questioner>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
