//! Quiz session state machine.
//!
//! A session moves `Home -> Quiz -> Results -> Home`. Every transition either
//! completes fully or is rejected with a [`SessionError`] and leaves the
//! session untouched.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Question, Screen, WrongAnswer};

/// Upper bound on the number of questions drawn for one run.
pub const DEFAULT_SAMPLE_SIZE: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please select at least one chapter.")]
    NoChaptersSelected,
    #[error("No questions found for the selected chapters.")]
    EmptyPool,
    #[error("Please select an answer.")]
    NoAnswerSelected,
    #[error("action not available on the {0:?} screen")]
    InvalidTransition(Screen),
}

/// What happened to a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect { correct: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ShuffledOptions {
    index: usize,
    options: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Session {
    screen: Screen,
    sample_size: usize,
    sampled: Vec<Question>,
    current_index: usize,
    score: usize,
    wrong_answers: Vec<WrongAnswer>,
    shuffled: Option<ShuffledOptions>,
}

impl Session {
    pub fn new(sample_size: usize) -> Self {
        Self {
            screen: Screen::Home,
            sample_size,
            sampled: Vec::new(),
            current_index: 0,
            score: 0,
            wrong_answers: Vec::new(),
            shuffled: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn sampled(&self) -> &[Question] {
        &self.sampled
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.sampled.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn wrong_answers(&self) -> &[WrongAnswer] {
        &self.wrong_answers
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.screen {
            Screen::Quiz => self.sampled.get(self.current_index),
            _ => None,
        }
    }

    /// Shuffled options for the current question, once prepared.
    pub fn shuffled_options(&self) -> Option<&[String]> {
        self.shuffled
            .as_ref()
            .filter(|cached| cached.index == self.current_index)
            .map(|cached| cached.options.as_slice())
    }

    /// Fraction of the sample already answered, `0.0` for an empty sample.
    pub fn progress(&self) -> f64 {
        ratio(self.current_index, self.sampled.len())
    }

    /// Score as a percentage of the sample, `0.0` for an empty sample.
    pub fn percentage(&self) -> f64 {
        ratio(self.score, self.sampled.len()) * 100.0
    }

    pub fn is_perfect(&self) -> bool {
        !self.sampled.is_empty() && self.score == self.sampled.len()
    }

    /// Draw a fresh sample from the chosen chapters and begin the quiz.
    ///
    /// Returns the number of questions drawn.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        pool: &[Question],
        chosen: &BTreeSet<String>,
        rng: &mut R,
    ) -> Result<usize, SessionError> {
        if self.screen != Screen::Home {
            return Err(SessionError::InvalidTransition(self.screen));
        }
        if chosen.is_empty() {
            return Err(SessionError::NoChaptersSelected);
        }

        let mut drawn: Vec<Question> = pool
            .iter()
            .filter(|q| chosen.contains(&q.chapter))
            .cloned()
            .collect();
        if drawn.is_empty() {
            return Err(SessionError::EmptyPool);
        }

        let available = drawn.len();
        drawn.shuffle(rng);
        drawn.truncate(self.sample_size);

        self.sampled = drawn;
        self.current_index = 0;
        self.score = 0;
        self.wrong_answers.clear();
        self.shuffled = None;
        self.screen = Screen::Quiz;

        info!(
            chapters = chosen.len(),
            available,
            drawn = self.sampled.len(),
            "quiz started"
        );
        Ok(self.sampled.len())
    }

    /// Shuffle the current question's options once and keep that order until
    /// the question is answered. Calling it again is a no-op.
    pub fn prepare_options<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&[String]> {
        let index = self.current_index;
        let question = self.current_question()?;

        let cached_for_current = self
            .shuffled
            .as_ref()
            .is_some_and(|cached| cached.index == index);
        if !cached_for_current {
            let mut options = question.options.clone();
            options.shuffle(rng);
            debug!(index, "shuffled options");
            self.shuffled = Some(ShuffledOptions { index, options });
        }

        self.shuffled_options()
    }

    /// Grade the selected option and advance to the next question.
    pub fn submit(&mut self, selected: Option<&str>) -> Result<AnswerOutcome, SessionError> {
        let Some(question) = self.current_question() else {
            return Err(SessionError::InvalidTransition(self.screen));
        };
        let Some(selected) = selected else {
            return Err(SessionError::NoAnswerSelected);
        };

        let outcome = if question.is_correct(selected) {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect {
                correct: question.answer.clone(),
            }
        };

        match &outcome {
            AnswerOutcome::Correct => self.score += 1,
            AnswerOutcome::Incorrect { correct } => {
                let wrong = WrongAnswer {
                    question: question.question.clone(),
                    selected: selected.to_string(),
                    correct: correct.clone(),
                };
                self.wrong_answers.push(wrong);
            }
        }

        debug!(index = self.current_index, ?outcome, "answer submitted");
        self.current_index += 1;
        self.shuffled = None;

        if self.current_index >= self.sampled.len() {
            self.screen = Screen::Results;
            info!(
                score = self.score,
                total = self.sampled.len(),
                "quiz finished"
            );
        }

        Ok(outcome)
    }

    /// Return to the home screen. The previous run's data stays until the
    /// next [`Session::start`].
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if self.screen != Screen::Results {
            return Err(SessionError::InvalidTransition(self.screen));
        }
        self.screen = Screen::Home;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SIZE)
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total > 0 {
        part as f64 / total as f64
    } else {
        0.0
    }
}
