use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::QuizError;

pub const QUIZ_LEN: usize = 10;
pub const CHOICE_COUNT: usize = 4;

static BANK_JSON: &str = include_str!("../assets/questions.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Uk,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Uk];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Uk => "uk",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "uk" | "ua" | "українська" => Ok(Language::Uk),
            other => Err(QuizError::InvalidLanguage(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Question {
    prompt: String,
    choices: Vec<String>,
    correct: usize,
    explanation: Option<String>,
}

impl Question {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    answer: usize,
    en: RawSide,
    uk: RawSide,
}

#[derive(Debug, Deserialize)]
struct RawSide {
    prompt: String,
    choices: Vec<String>,
    #[serde(default)]
    explanation: Option<String>,
}

impl RawRecord {
    fn side(&self, language: Language) -> &RawSide {
        match language {
            Language::En => &self.en,
            Language::Uk => &self.uk,
        }
    }
}

#[derive(Debug)]
pub struct QuestionBank {
    packs: HashMap<Language, Arc<[Question]>>,
}

impl QuestionBank {
    pub fn builtin() -> Result<Self, QuizError> {
        Self::from_json(BANK_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, QuizError> {
        let records: Vec<RawRecord> = serde_json::from_str(raw)?;
        let mut packs = HashMap::new();

        for language in Language::ALL {
            let mut pack = Vec::with_capacity(QUIZ_LEN);
            for (entry, record) in records.iter().enumerate() {
                let side = record.side(language);
                if side.choices.len() != CHOICE_COUNT {
                    return Err(QuizError::MalformedQuestion(
                        entry + 1,
                        "expected exactly 4 choices",
                    ));
                }
                if record.answer >= CHOICE_COUNT {
                    return Err(QuizError::MalformedQuestion(
                        entry + 1,
                        "correct index out of range",
                    ));
                }
                pack.push(Question {
                    prompt: side.prompt.clone(),
                    choices: side.choices.clone(),
                    correct: record.answer,
                    explanation: side.explanation.clone(),
                });
            }

            if pack.len() < QUIZ_LEN {
                return Err(QuizError::IncompleteBank(language));
            }
            // A larger asset keeps its first ten entries, in asset order.
            pack.truncate(QUIZ_LEN);
            packs.insert(language, pack.into());
        }

        Ok(Self { packs })
    }

    /// Pack for a supported language. Every language in `Language::ALL` is
    /// validated to hold exactly `QUIZ_LEN` questions at load time.
    pub fn questions(&self, language: Language) -> Arc<[Question]> {
        Arc::clone(&self.packs[&language])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_loads_both_languages() {
        let bank = QuestionBank::builtin().unwrap();
        for language in Language::ALL {
            let pack = bank.questions(language);
            assert_eq!(pack.len(), QUIZ_LEN);
            for question in pack.iter() {
                assert!(!question.prompt().is_empty());
                assert_eq!(question.choices().len(), CHOICE_COUNT);
                assert!(question.correct() < CHOICE_COUNT);
            }
        }
    }

    #[test]
    fn short_bank_is_rejected() {
        let raw = r#"[{
            "answer": 0,
            "en": { "prompt": "q", "choices": ["a", "b", "c", "d"] },
            "uk": { "prompt": "п", "choices": ["а", "б", "в", "г"] }
        }]"#;
        assert!(matches!(
            QuestionBank::from_json(raw),
            Err(QuizError::IncompleteBank(_))
        ));
    }

    #[test]
    fn wrong_choice_count_is_rejected() {
        let raw = r#"[{
            "answer": 0,
            "en": { "prompt": "q", "choices": ["a", "b"] },
            "uk": { "prompt": "п", "choices": ["а", "б", "в", "г"] }
        }]"#;
        assert!(matches!(
            QuestionBank::from_json(raw),
            Err(QuizError::MalformedQuestion(1, _))
        ));
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let raw = r#"[{
            "answer": 4,
            "en": { "prompt": "q", "choices": ["a", "b", "c", "d"] },
            "uk": { "prompt": "п", "choices": ["а", "б", "в", "г"] }
        }]"#;
        assert!(matches!(
            QuestionBank::from_json(raw),
            Err(QuizError::MalformedQuestion(1, _))
        ));
    }

    #[test]
    fn language_codes_parse() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert_eq!("uk".parse::<Language>().unwrap(), Language::Uk);
        assert_eq!("ua".parse::<Language>().unwrap(), Language::Uk);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(QuizError::InvalidLanguage(_))
        ));
    }
}
