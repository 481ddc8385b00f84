use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::bank::{Language, Question, QUIZ_LEN};

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    chat_id: i64,
    language: Language,
    index: usize,
    score: u32,
    questions: Arc<[Question]>,
}

impl Session {
    pub fn new(chat_id: i64, language: Language, questions: Arc<[Question]>) -> Self {
        debug_assert_eq!(questions.len(), QUIZ_LEN);
        Self {
            id: Uuid::new_v4(),
            chat_id,
            language,
            index: 0,
            score: 0,
            questions,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// The question waiting for an answer. A stored session always has
    /// `index < total`; completed sessions are removed, never kept.
    pub fn current(&self) -> &Question {
        &self.questions[self.index]
    }

    /// Scores `choice` against the current question and advances the index.
    pub fn record(&mut self, choice: usize) -> bool {
        let correct = choice == self.current().correct();
        if correct {
            self.score += 1;
        }
        self.index += 1;
        correct
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.questions.len()
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<i64, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chat_id: i64) -> Option<Session> {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .get(&chat_id)
            .cloned()
    }

    /// Overwrites any session already stored for the chat.
    pub fn put(&self, session: Session) {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .insert(session.chat_id(), session);
    }

    pub fn remove(&self, chat_id: i64) -> Option<Session> {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .remove(&chat_id)
    }
}
