use std::fmt;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Chapter assigned to questions that do not name one.
pub const GENERAL_CHAPTER: &str = "General";

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    #[serde(default = "general_chapter", deserialize_with = "chapter_id")]
    pub chapter: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// Reason a question record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuestion {
    #[error("question text is empty")]
    EmptyText,
    #[error("needs at least {MIN_OPTIONS} options, found {0}")]
    TooFewOptions(usize),
    #[error("answer {0:?} does not match any option")]
    AnswerMissing(String),
    #[error("answer {0:?} matches more than one option")]
    AnswerAmbiguous(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl Question {
    pub fn new(
        chapter: impl Into<String>,
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            chapter: chapter.into(),
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            answer: answer.into(),
        }
    }

    /// Checks that the record can be asked: enough options and exactly one
    /// of them equal to the answer.
    pub fn validate(&self) -> Result<(), InvalidQuestion> {
        if self.question.trim().is_empty() {
            return Err(InvalidQuestion::EmptyText);
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(InvalidQuestion::TooFewOptions(self.options.len()));
        }

        match self
            .options
            .iter()
            .filter(|option| answers_match(option, &self.answer))
            .count()
        {
            0 => Err(InvalidQuestion::AnswerMissing(self.answer.clone())),
            1 => Ok(()),
            _ => Err(InvalidQuestion::AnswerAmbiguous(self.answer.clone())),
        }
    }

    pub fn is_correct(&self, selected: &str) -> bool {
        answers_match(selected, &self.answer)
    }
}

/// Case-insensitive comparison that ignores surrounding whitespace.
pub fn answers_match(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn general_chapter() -> String {
    GENERAL_CHAPTER.to_string()
}

/// Chapters show up as strings or bare numbers in hand-written banks.
fn chapter_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawChapter {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    let raw = Option::<RawChapter>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawChapter::Text(text)) => text,
        Some(RawChapter::Integer(n)) => n.to_string(),
        Some(RawChapter::Float(n)) => n.to_string(),
        None => general_chapter(),
    })
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.chapter, self.question)
    }
}
