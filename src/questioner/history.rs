//! Recently-asked pairs.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::roster::MemberId;
use crate::schema::AttributeId;

/// Bounded window of recently-asked (member, attribute) pairs. Pairs in
/// the window are excluded from selection; when exclusion would leave
/// nothing to ask, the oldest entries are relaxed away one by one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<(MemberId, AttributeId)>,
    capacity: usize,
}

impl History {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Record a pair as asked, evicting the oldest beyond capacity.
    /// A zero-capacity window records nothing.
    pub fn push(&mut self, member: MemberId, attribute: AttributeId) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back((member, attribute));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    #[must_use]
    pub fn contains(&self, member: MemberId, attribute: &AttributeId) -> bool {
        self.entries
            .iter()
            .any(|(m, a)| *m == member && a == attribute)
    }

    /// Drop the oldest entry (the relaxation step).
    pub fn relax_oldest(&mut self) -> Option<(MemberId, AttributeId)> {
        self.entries.pop_front()
    }

    /// Drop the newest entry (used by the inert skip policy to undo the
    /// slot the open question consumed).
    pub fn pop_newest(&mut self) -> Option<(MemberId, AttributeId)> {
        self.entries.pop_back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(m: i64, a: &str) -> (MemberId, AttributeId) {
        (MemberId::new(m), AttributeId::from(a))
    }

    #[test]
    fn test_push_evicts_oldest_beyond_capacity() {
        let mut history = History::new(2);
        for (m, a) in [pair(1, "x"), pair(2, "x"), pair(3, "x")] {
            history.push(m, a);
        }
        assert_eq!(history.len(), 2);
        assert!(!history.contains(MemberId::new(1), &AttributeId::from("x")));
        assert!(history.contains(MemberId::new(3), &AttributeId::from("x")));
    }

    #[test]
    fn test_zero_capacity_records_nothing() {
        let mut history = History::new(0);
        history.push(MemberId::new(1), AttributeId::from("x"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_relax_drops_oldest_first() {
        let mut history = History::new(4);
        history.push(MemberId::new(1), AttributeId::from("x"));
        history.push(MemberId::new(2), AttributeId::from("y"));
        assert_eq!(history.relax_oldest(), Some(pair(1, "x")));
        assert_eq!(history.pop_newest(), Some(pair(2, "y")));
        assert_eq!(history.relax_oldest(), None);
    }
}
