mod question;

pub use question::{answers_match, InvalidQuestion, Question, GENERAL_CHAPTER};

/// Screen currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    Quiz,
    Results,
}

/// A missed question, kept for the review on the results screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongAnswer {
    pub question: String,
    pub selected: String,
    pub correct: String,
}
