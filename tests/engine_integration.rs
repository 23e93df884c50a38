//! Integration tests for the full quiz flow.

use roster_quiz::config::{QuizConfig, SkipPolicy};
use roster_quiz::engine::{EngineError, QuizEngine};
use roster_quiz::questioner::SessionError;
use roster_quiz::roster::{Member, MemberId};
use roster_quiz::schema::{AttrValue, AttributeId, Schema};
use roster_quiz::score::{Outcome, UserId};

fn instrument() -> AttributeId {
    AttributeId::from("instrument")
}

fn band_engine(config: QuizConfig) -> QuizEngine {
    let engine = QuizEngine::new(Schema::akablas(), config);
    let members = [
        (1, "Hanna", "Flute", "female"),
        (2, "Jakob", "Flute", "male"),
        (3, "Miriam", "Oboe", "female"),
        (4, "Lars", "Trumpet", "male"),
        (5, "Paula", "Tuba", "female"),
    ];
    for (id, name, instr, gender) in members {
        engine
            .add_member(
                Member::new(MemberId::new(id))
                    .with_value("first_name", AttrValue::text(name))
                    .with_value("instrument", AttrValue::text(instr))
                    .with_value("gender", AttrValue::text(gender)),
            )
            .unwrap();
    }
    engine
}

fn seeded_config() -> QuizConfig {
    QuizConfig {
        rng_seed: Some(11),
        attributes: vec![instrument()],
        ..QuizConfig::default()
    }
}

#[test]
fn test_full_game_session() {
    let engine = band_engine(seeded_config());
    let user = UserId::new(100);

    let mut correct = 0u64;
    for round in 0..10 {
        let question = engine.next_question(user).unwrap();
        let choices = question.choices().unwrap();
        assert_eq!(choices.len(), 4);

        // Answer correctly on even rounds, incorrectly on odd ones.
        let answer = if round % 2 == 0 {
            correct += 1;
            question.correct_answer().clone()
        } else {
            choices
                .iter()
                .find(|c| c.key() != question.correct_answer().key())
                .cloned()
                .unwrap()
        };
        let result = engine.submit_answer(user, &answer).unwrap();
        assert_eq!(
            result.outcome.is_correct(),
            round % 2 == 0,
            "round {round}"
        );
    }

    let score = engine.score_snapshot(user).unwrap();
    assert_eq!(score.total_asked, 10);
    assert_eq!(score.correct, correct);
    assert_eq!(score.correct + score.incorrect(), score.total_asked);
    assert_eq!(score.current_streak, 0);
    assert_eq!(score.best_streak, 1);
    let breakdown = score.per_attribute.get(&instrument()).unwrap();
    assert_eq!(breakdown.asked, 10);
}

#[test]
fn test_history_prevents_immediate_repeats() {
    let config = QuizConfig {
        history_window: 4,
        ..seeded_config()
    };
    let engine = band_engine(config);
    let user = UserId::new(100);

    let mut previous = None;
    for _ in 0..20 {
        let question = engine.next_question(user).unwrap();
        let pair = (question.member(), question.attribute().clone());
        assert_ne!(Some(&pair), previous.as_ref());
        previous = Some(pair);
        engine
            .submit_answer(user, question.correct_answer())
            .unwrap();
    }
}

#[test]
fn test_normalized_free_text_answers_count() {
    let config = QuizConfig {
        attributes: vec![AttributeId::from("first_name")],
        rng_seed: Some(5),
        ..QuizConfig::default()
    };
    let engine = band_engine(config);
    let user = UserId::new(100);

    let question = engine.next_question(user).unwrap();
    assert!(!question.is_multiple_choice());
    let sloppy = AttrValue::text(format!(
        "  {} ",
        question.correct_answer().as_str().to_uppercase()
    ));
    let result = engine.submit_answer(user, &sloppy).unwrap();
    assert_eq!(result.outcome, Outcome::Correct);
}

#[test]
fn test_answer_validation_against_wrong_shape() {
    let engine = QuizEngine::new(
        Schema::akablas(),
        QuizConfig {
            attributes: vec![AttributeId::from("photo")],
            rng_seed: Some(5),
            ..QuizConfig::default()
        },
    );
    engine
        .add_member(Member::new(MemberId::new(1)).with_value("photo", AttrValue::media("file-1")))
        .unwrap();
    let user = UserId::new(100);

    let question = engine.next_question(user).unwrap();
    // A text answer never matches a media reference, even with equal bytes.
    let result = engine
        .submit_answer(user, &AttrValue::text("file-1"))
        .unwrap();
    assert_eq!(result.outcome, Outcome::Incorrect);
}

#[test]
fn test_skip_policies() {
    // Default: the skip consumes history.
    let engine = band_engine(seeded_config());
    let user = UserId::new(100);
    let skipped = engine.next_question(user).unwrap();
    engine.skip(user).unwrap();
    assert!(engine.score_snapshot(user).is_none(), "skips never score");
    let next = engine.next_question(user).unwrap();
    assert_ne!(
        (next.member(), next.attribute()),
        (skipped.member(), skipped.attribute())
    );

    // Inert: no trace anywhere.
    let engine = band_engine(QuizConfig {
        skip_policy: SkipPolicy::Inert,
        ..seeded_config()
    });
    engine.next_question(user).unwrap();
    engine.skip(user).unwrap();
    assert!(engine.score_snapshot(user).is_none());
    assert!(engine.open_question(user).is_none());
}

#[test]
fn test_no_questions_when_roster_degenerates() {
    let engine = band_engine(seeded_config());
    let user = UserId::new(100);

    // Everyone switches to Flute; closed questions need distinct values.
    for id in 1..=5 {
        engine
            .on_attribute_changed(
                MemberId::new(id),
                &instrument(),
                Some(AttrValue::text("Flute")),
            )
            .unwrap();
    }
    assert!(matches!(
        engine.next_question(user),
        Err(EngineError::Session(SessionError::NoQuestionsAvailable))
    ));

    // A fresh spread of values brings questions back.
    for (id, instr) in [(2, "Oboe"), (3, "Horn"), (4, "Trumpet")] {
        engine
            .on_attribute_changed(MemberId::new(id), &instrument(), Some(AttrValue::text(instr)))
            .unwrap();
    }
    assert!(engine.next_question(user).is_ok());
}

#[test]
fn test_removing_members_shrinks_the_game() {
    let engine = band_engine(seeded_config());
    for id in [3, 4, 5] {
        engine.remove_member(MemberId::new(id)).unwrap();
    }
    // Two flutists remain: one distinct value, nothing askable at k=4.
    assert!(matches!(
        engine.next_question(UserId::new(100)),
        Err(EngineError::Session(SessionError::NoQuestionsAvailable))
    ));
}

#[test]
fn test_many_users_play_independently() {
    let engine = band_engine(seeded_config());
    let users: Vec<UserId> = (100..110).map(UserId::new).collect();

    for &user in &users {
        let question = engine.next_question(user).unwrap();
        engine
            .submit_answer(user, question.correct_answer())
            .unwrap();
    }
    for &user in &users {
        let score = engine.score_snapshot(user).unwrap();
        assert_eq!(score.total_asked, 1);
        assert_eq!(score.correct, 1);
    }
    assert_eq!(engine.leaderboard().len(), users.len());
}
