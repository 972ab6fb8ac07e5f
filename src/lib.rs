//! # chapter-quiz
//!
//! A terminal multiple-choice quiz: pick chapters from a question bank, answer
//! a random sample of up to 60 questions with shuffled options, and review the
//! ones you missed.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chapter_quiz::{Quiz, QuizConfig, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     let config = QuizConfig {
//!         questions_path: "questions.json".into(),
//!         ..QuizConfig::default()
//!     };
//!
//!     // A missing or broken bank is reported on the home screen.
//!     let quiz = Quiz::from_config(&config)?;
//!
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod chapters;
mod config;
mod data;
mod error;
pub mod logging;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::info;

pub use app::{App, Notice, NoticeLevel};
pub use config::QuizConfig;
pub use data::{
    load_bank, load_questions_from_json, LoadError, LoadReport, QuestionBank, QuestionStore,
    SkippedRecord, DEFAULT_QUESTIONS_PATH,
};
pub use error::QuizError;
pub use models::{answers_match, InvalidQuestion, Question, Screen, WrongAnswer, GENERAL_CHAPTER};
pub use session::{AnswerOutcome, Session, SessionError, DEFAULT_SAMPLE_SIZE};

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a vector of questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            app: App::with_questions(questions),
        }
    }

    /// Build a quiz from configuration, loading the question bank leniently.
    pub fn from_config(config: &QuizConfig) -> Result<Self, QuizError> {
        config.validate()?;
        Ok(Self {
            app: App::from_config(config),
        })
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut session = terminal::TerminalSession::enter()?;
        let result = run_event_loop(session.terminal(), &mut self.app);
        session.restore()?;
        info!("quiz closed");
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        app.prepare_view();
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
pub fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen() {
        Screen::Home => handle_home_input(app, key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Results => handle_results_input(app, key),
    }
}

fn handle_home_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_chapter(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_chapter(),
        KeyCode::Char(' ') => app.toggle_chapter(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.select_all_chapters(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.clear_chapters(),
        KeyCode::Enter => {
            app.start_quiz();
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Char(' ') => app.pick_highlighted_option(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.pick_option(digit as usize - 1);
            }
        }
        KeyCode::Enter => {
            app.submit_answer();
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_results_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}
