//! Per-user score ledger: counts, accuracy, streaks.

mod ledger;
mod record;

pub use ledger::ScoreLedger;
pub use record::{AttrScore, Outcome, ScoreRecord, UserId};
