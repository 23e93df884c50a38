//! The question snapshot handed to the transport layer.

use serde::{Deserialize, Serialize};

use crate::roster::MemberId;
use crate::schema::{AttrValue, AttributeId};

/// An immutable, fully-specified question.
///
/// For closed attributes, `choices` holds exactly `k` value-distinct
/// candidates in presentation order, exactly one of which equals
/// `correct`. For open and media attributes there is no candidate list;
/// the transport accepts free-text or identity answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    member: MemberId,
    attribute: AttributeId,
    correct: AttrValue,
    choices: Option<Vec<AttrValue>>,
}

impl Question {
    pub(crate) fn free_text(member: MemberId, attribute: AttributeId, correct: AttrValue) -> Self {
        Self {
            member,
            attribute,
            correct,
            choices: None,
        }
    }

    pub(crate) fn multiple_choice(
        member: MemberId,
        attribute: AttributeId,
        correct: AttrValue,
        choices: Vec<AttrValue>,
    ) -> Self {
        Self {
            member,
            attribute,
            correct,
            choices: Some(choices),
        }
    }

    /// The member the question is about.
    #[must_use]
    pub fn member(&self) -> MemberId {
        self.member
    }

    /// The attribute asked for.
    #[must_use]
    pub fn attribute(&self) -> &AttributeId {
        &self.attribute
    }

    /// The correct answer.
    #[must_use]
    pub fn correct_answer(&self) -> &AttrValue {
        &self.correct
    }

    /// The shuffled candidate list, for closed attributes.
    #[must_use]
    pub fn choices(&self) -> Option<&[AttrValue]> {
        self.choices.as_deref()
    }

    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        self.choices.is_some()
    }

    /// Index of the correct answer within [`choices`](Self::choices).
    #[must_use]
    pub fn correct_position(&self) -> Option<usize> {
        self.choices
            .as_ref()
            .and_then(|choices| choices.iter().position(|c| c == &self.correct))
    }
}
