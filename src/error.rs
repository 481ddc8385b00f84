use thiserror::Error;

use crate::bank::{Language, QUIZ_LEN};

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("{0} environment variable is not set")]
    MissingEnv(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidEnv {
        name: &'static str,
        reason: String,
    },
    #[error("question bank does not parse: {0}")]
    UnparsableBank(#[from] serde_json::Error),
    #[error("question bank entry {0} is malformed: {1}")]
    MalformedQuestion(usize, &'static str),
    #[error("question bank for '{0}' holds fewer than {QUIZ_LEN} questions")]
    IncompleteBank(Language),
    #[error("unsupported language '{0}'")]
    InvalidLanguage(String),
    #[error("no quiz in progress for chat {0}")]
    NoActiveSession(i64),
}
