//! Roster Quiz - question generation and scoring engine for roster quizzes.
//!
//! The engine asks users about the members of a roster (who plays which
//! instrument, whose photo is this, ...), builds multiple-choice questions
//! with plausible distractors, tracks per-user scores, and persists its
//! state across restarts.

pub mod config;
pub mod display;
pub mod engine;
pub mod persist;
pub mod question;
pub mod questioner;
pub mod roster;
pub mod schema;
pub mod score;
