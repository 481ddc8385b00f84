use class4quizbot::bank::{Language, QuestionBank, CHOICE_COUNT, QUIZ_LEN};
use class4quizbot::engine::{QuizEngine, Step};
use class4quizbot::error::QuizError;
use class4quizbot::session::SessionStore;

// The reference bank is a second load of the same embedded asset, so its
// correct indices line up with the engine's own copy.
fn fixture() -> (QuizEngine, QuestionBank) {
    let engine = QuizEngine::new(QuestionBank::builtin().unwrap(), SessionStore::new());
    (engine, QuestionBank::builtin().unwrap())
}

#[test]
fn both_packs_hold_ten_well_formed_questions() {
    let (_, bank) = fixture();
    for language in Language::ALL {
        let pack = bank.questions(language);
        assert_eq!(pack.len(), QUIZ_LEN);
        for question in pack.iter() {
            assert_eq!(question.choices().len(), CHOICE_COUNT);
            assert!(question.correct() < CHOICE_COUNT);
        }
    }
}

#[test]
fn perfect_run_scores_ten_and_clears_the_session() {
    let (engine, bank) = fixture();
    let pack = bank.questions(Language::En);

    let first = engine.start(42, Language::En);
    assert_eq!(first.number, 1);
    assert_eq!(first.total, QUIZ_LEN);
    assert_eq!(first.prompt, pack[0].prompt());

    for i in 0..QUIZ_LEN {
        let feedback = engine.answer(42, pack[i].correct()).unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.question.number, i + 1);

        match feedback.step {
            Step::Next(next) => {
                assert!(i < QUIZ_LEN - 1);
                assert_eq!(next.number, i + 2);
                assert_eq!(next.prompt, pack[i + 1].prompt());
            }
            Step::Finished(summary) => {
                assert_eq!(i, QUIZ_LEN - 1);
                assert_eq!(summary.score, QUIZ_LEN as u32);
                assert_eq!(summary.total, QUIZ_LEN);
            }
        }
    }

    assert!(matches!(
        engine.answer(42, 0),
        Err(QuizError::NoActiveSession(42))
    ));
}

#[test]
fn wrong_answers_never_move_the_score() {
    let (engine, bank) = fixture();
    let pack = bank.questions(Language::En);

    engine.start(11, Language::En);
    for i in 0..QUIZ_LEN {
        let wrong = (pack[i].correct() + 1) % CHOICE_COUNT;
        let feedback = engine.answer(11, wrong).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_choice, pack[i].correct());

        if let Step::Finished(summary) = feedback.step {
            assert_eq!(summary.score, 0);
        }
    }
}

#[test]
fn score_tracks_only_correct_answers() {
    let (engine, bank) = fixture();
    let pack = bank.questions(Language::En);

    engine.start(12, Language::En);
    engine.answer(12, pack[0].correct()).unwrap();
    let before = engine.progress(12).unwrap();
    engine.answer(12, (pack[1].correct() + 1) % CHOICE_COUNT).unwrap();
    let after = engine.progress(12).unwrap();

    assert_eq!(before.score, 1);
    assert_eq!(after.score, 1);
    assert_eq!(after.answered, 2);
}

#[test]
fn index_advances_by_one_per_answer() {
    let (engine, bank) = fixture();
    let pack = bank.questions(Language::En);

    engine.start(13, Language::En);
    for i in 0..QUIZ_LEN - 1 {
        assert_eq!(engine.progress(13).unwrap().answered, i);
        engine.answer(13, pack[i].correct()).unwrap();
    }
    assert_eq!(engine.progress(13).unwrap().answered, QUIZ_LEN - 1);
}

#[test]
fn answer_without_start_is_rejected() {
    let (engine, _) = fixture();
    assert!(matches!(
        engine.answer(99, 0),
        Err(QuizError::NoActiveSession(99))
    ));
}

#[test]
fn abort_reports_progress_and_clears_the_session() {
    let (engine, bank) = fixture();
    let pack = bank.questions(Language::Uk);

    engine.start(21, Language::Uk);
    for i in 0..4 {
        engine.answer(21, pack[i].correct()).unwrap();
    }

    let progress = engine.abort(21).unwrap();
    assert_eq!(progress.answered, 4);
    assert_eq!(progress.score, 4);
    assert_eq!(progress.language, Language::Uk);

    assert!(matches!(
        engine.progress(21),
        Err(QuizError::NoActiveSession(21))
    ));
    assert!(matches!(
        engine.abort(21),
        Err(QuizError::NoActiveSession(21))
    ));
}

#[test]
fn restart_overwrites_the_running_session() {
    let (engine, bank) = fixture();
    let pack = bank.questions(Language::En);

    engine.start(31, Language::En);
    engine.answer(31, pack[0].correct()).unwrap();
    engine.answer(31, pack[1].correct()).unwrap();

    let first = engine.start(31, Language::Uk);
    assert_eq!(first.number, 1);

    let progress = engine.progress(31).unwrap();
    assert_eq!(progress.answered, 0);
    assert_eq!(progress.score, 0);
    assert_eq!(progress.language, Language::Uk);
}

#[test]
fn sessions_are_kept_apart_by_chat() {
    let (engine, bank) = fixture();
    let pack = bank.questions(Language::En);

    engine.start(1, Language::En);
    engine.start(2, Language::En);
    engine.answer(1, pack[0].correct()).unwrap();

    assert_eq!(engine.progress(1).unwrap().answered, 1);
    assert_eq!(engine.progress(2).unwrap().answered, 0);
}

#[test]
fn uk_sessions_serve_the_uk_pack() {
    let (engine, bank) = fixture();
    let pack = bank.questions(Language::Uk);

    let first = engine.start(7, Language::Uk);
    assert_eq!(first.prompt, pack[0].prompt());
}

#[test]
fn question_views_never_leak_the_answer() {
    let (engine, bank) = fixture();
    let pack = bank.questions(Language::En);

    let view = engine.start(8, Language::En);
    assert_eq!(view.choices.len(), CHOICE_COUNT);
    // Views carry only what the user is shown.
    assert_eq!(view.prompt, pack[0].prompt());
    assert_eq!(view.choices, pack[0].choices());
}
