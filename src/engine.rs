use tracing::info;

use crate::bank::{Language, QuestionBank};
use crate::error::QuizError;
use crate::session::{Session, SessionStore};

/// What the user gets to see of a question: no correct index, no explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub choices: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Feedback {
    pub language: Language,
    pub correct: bool,
    pub selected: usize,
    pub correct_choice: usize,
    pub question: QuestionView,
    pub explanation: Option<String>,
    pub step: Step,
}

#[derive(Debug, Clone)]
pub enum Step {
    Next(QuestionView),
    Finished(FinalScore),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub score: u32,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub language: Language,
    pub answered: usize,
    pub score: u32,
    pub total: usize,
}

/// Drives sessions through their questions. Holds no transport handles, so
/// the whole quiz flow runs (and tests) without a bot attached.
#[derive(Debug)]
pub struct QuizEngine {
    bank: QuestionBank,
    store: SessionStore,
}

impl QuizEngine {
    pub fn new(bank: QuestionBank, store: SessionStore) -> Self {
        Self { bank, store }
    }

    /// Begins a fresh session for the chat, replacing any unfinished one.
    pub fn start(&self, chat_id: i64, language: Language) -> QuestionView {
        let session = Session::new(chat_id, language, self.bank.questions(language));
        info!(chat_id, session_id = %session.id(), %language, "quiz started");
        let first = view_of(&session);
        self.store.put(session);
        first
    }

    /// Scores `choice` against the chat's current question and advances.
    /// The terminal answer removes the session from the store.
    pub fn answer(&self, chat_id: i64, choice: usize) -> Result<Feedback, QuizError> {
        let mut session = self
            .store
            .get(chat_id)
            .ok_or(QuizError::NoActiveSession(chat_id))?;

        let question = view_of(&session);
        let correct_choice = session.current().correct();
        let explanation = session.current().explanation().map(str::to_owned);
        let language = session.language();
        let correct = session.record(choice);

        info!(
            chat_id,
            session_id = %session.id(),
            question = question.number,
            choice,
            correct,
            "answer recorded"
        );

        let step = if session.is_complete() {
            let summary = FinalScore {
                score: session.score(),
                total: session.total(),
            };
            self.store.remove(chat_id);
            info!(chat_id, session_id = %session.id(), score = summary.score, "quiz completed");
            Step::Finished(summary)
        } else {
            let next = view_of(&session);
            self.store.put(session);
            Step::Next(next)
        };

        Ok(Feedback {
            language,
            correct,
            selected: choice,
            correct_choice,
            question,
            explanation,
            step,
        })
    }

    /// Drops the chat's session and reports how far it got.
    pub fn abort(&self, chat_id: i64) -> Result<Progress, QuizError> {
        let session = self
            .store
            .remove(chat_id)
            .ok_or(QuizError::NoActiveSession(chat_id))?;
        info!(
            chat_id,
            session_id = %session.id(),
            answered = session.index(),
            "quiz aborted"
        );
        Ok(progress_of(&session))
    }

    /// Non-destructive read, used for /stop rendering and for telling a
    /// stale button press apart from a live one.
    pub fn progress(&self, chat_id: i64) -> Result<Progress, QuizError> {
        let session = self
            .store
            .get(chat_id)
            .ok_or(QuizError::NoActiveSession(chat_id))?;
        Ok(progress_of(&session))
    }
}

fn view_of(session: &Session) -> QuestionView {
    let question = session.current();
    QuestionView {
        number: session.index() + 1,
        total: session.total(),
        prompt: question.prompt().to_owned(),
        choices: question.choices().to_vec(),
    }
}

fn progress_of(session: &Session) -> Progress {
    Progress {
        language: session.language(),
        answered: session.index(),
        score: session.score(),
        total: session.total(),
    }
}
