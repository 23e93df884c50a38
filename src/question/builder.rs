//! Drawing distractors and assembling questions.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::roster::{MemberId, Roster};
use crate::schema::{AttributeId, AttributeKind, Schema};

use super::error::BuildError;
use super::types::Question;

/// Builds questions from roster state. Pure reads: building a question
/// never mutates the roster.
#[derive(Debug, Clone, Copy)]
pub struct QuestionBuilder<'a> {
    schema: &'a Schema,
    roster: &'a Roster,
}

impl<'a> QuestionBuilder<'a> {
    #[must_use]
    pub fn new(schema: &'a Schema, roster: &'a Roster) -> Self {
        Self { schema, roster }
    }

    /// Build a question asking for `attribute` of `member` with `k`
    /// answer options (closed attributes only; open and media questions
    /// carry no candidate list).
    ///
    /// Distractors are `k - 1` distinct values drawn uniformly without
    /// replacement from the other members' values; the combined list is
    /// freshly shuffled per build.
    ///
    /// # Errors
    ///
    /// Returns an unbuildable [`BuildError`] when the member lacks a value
    /// or too few distinct alternatives exist, and [`BuildError::Roster`]
    /// for bad references.
    pub fn build<R: Rng + ?Sized>(
        &self,
        member: MemberId,
        attribute: &AttributeId,
        k: usize,
        rng: &mut R,
    ) -> Result<Question, BuildError> {
        let kind = self
            .schema
            .kind(attribute)
            .ok_or_else(|| crate::roster::RosterError::UnknownAttribute(attribute.clone()))?;

        let correct = self
            .roster
            .get(member)?
            .value(attribute)
            .cloned()
            .ok_or_else(|| BuildError::MissingValue {
                member,
                attribute: attribute.clone(),
            })?;

        if kind != AttributeKind::Closed {
            return Ok(Question::free_text(member, attribute.clone(), correct));
        }

        let needed = k.saturating_sub(1);
        let pool = self.roster.distinct_other_values(attribute, member)?;
        if pool.len() < needed {
            return Err(BuildError::NotEnoughDistractors {
                attribute: attribute.clone(),
                needed,
                available: pool.len(),
            });
        }

        let mut choices: Vec<_> = pool
            .choose_multiple(rng, needed)
            .cloned()
            .collect();
        choices.push(correct.clone());
        choices.shuffle(rng);

        tracing::debug!(
            member = %member,
            attribute = %attribute,
            k,
            pool = pool.len(),
            "Built multiple-choice question"
        );
        Ok(Question::multiple_choice(
            member,
            attribute.clone(),
            correct,
            choices,
        ))
    }
}
