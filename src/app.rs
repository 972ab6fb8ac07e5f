use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::chapters::{chapter_label, sorted_chapters};
use crate::config::QuizConfig;
use crate::data::{LoadReport, QuestionBank, QuestionStore};
use crate::models::{Question, Screen};
use crate::session::{AnswerOutcome, Session, SessionError, DEFAULT_SAMPLE_SIZE};

const DEFAULT_TITLE: &str = "CHAPTER QUIZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A one-line message shown on the current screen until the next
/// successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<SessionError> for Notice {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::EmptyPool => Self::error(err.to_string()),
            _ => Self::warning(err.to_string()),
        }
    }
}

pub struct App {
    title: String,
    questions: Vec<Question>,
    chapters: Vec<String>,
    chapter_titles: BTreeMap<String, String>,
    load_error: Option<String>,
    chapter_cursor: usize,
    chosen: BTreeSet<String>,
    session: Session,
    rng: StdRng,
    option_cursor: usize,
    picked_option: Option<usize>,
    notice: Option<Notice>,
    result_scroll: usize,
}

impl App {
    pub fn new(bank: QuestionBank, sample_size: usize, rng: StdRng) -> Self {
        let chapters = sorted_chapters(&bank.questions);

        Self {
            title: bank.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            questions: bank.questions,
            chapters,
            chapter_titles: bank.chapter_titles,
            load_error: None,
            chapter_cursor: 0,
            chosen: BTreeSet::new(),
            session: Session::new(sample_size),
            rng,
            option_cursor: 0,
            picked_option: None,
            notice: None,
            result_scroll: 0,
        }
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        let bank = QuestionBank {
            questions,
            ..QuestionBank::default()
        };
        Self::new(bank, DEFAULT_SAMPLE_SIZE, StdRng::from_entropy())
    }

    /// Build from a lenient load, surfacing any load error on the home
    /// screen instead of failing.
    pub fn from_report(report: LoadReport, sample_size: usize, rng: StdRng) -> Self {
        let mut app = Self::new(report.bank, sample_size, rng);
        if let Some(err) = report.error {
            app.notice = Some(Notice::error(format!("Error: {}", err)));
            app.load_error = Some(err.to_string());
        } else if !report.skipped.is_empty() {
            app.notice = Some(Notice::warning(format!(
                "{} invalid question(s) skipped",
                report.skipped.len()
            )));
        }
        app
    }

    pub fn from_config(config: &QuizConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let store = QuestionStore::new(&config.questions_path);
        info!(path = %store.path().display(), "loading question bank");
        Self::from_report(store.into_report(), config.sample_size, rng)
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    // Home

    pub fn chapters(&self) -> &[String] {
        &self.chapters
    }

    pub fn chapter_label(&self, id: &str) -> String {
        chapter_label(id, &self.chapter_titles)
    }

    pub fn chapter_cursor(&self) -> usize {
        self.chapter_cursor
    }

    pub fn is_chosen(&self, id: &str) -> bool {
        self.chosen.contains(id)
    }

    pub fn chosen_chapters(&self) -> &BTreeSet<String> {
        &self.chosen
    }

    pub fn select_next_chapter(&mut self) {
        if !self.chapters.is_empty() {
            self.chapter_cursor = (self.chapter_cursor + 1) % self.chapters.len();
        }
    }

    pub fn select_previous_chapter(&mut self) {
        let len = self.chapters.len();
        if len > 0 {
            self.chapter_cursor = (self.chapter_cursor + len - 1) % len;
        }
    }

    pub fn toggle_chapter(&mut self) {
        let Some(id) = self.chapters.get(self.chapter_cursor) else {
            return;
        };
        if !self.chosen.remove(id) {
            self.chosen.insert(id.clone());
        }
    }

    pub fn select_all_chapters(&mut self) {
        self.chosen = self.chapters.iter().cloned().collect();
    }

    pub fn clear_chapters(&mut self) {
        self.chosen.clear();
    }

    /// Returns true when the quiz started.
    pub fn start_quiz(&mut self) -> bool {
        match self
            .session
            .start(&self.questions, &self.chosen, &mut self.rng)
        {
            Ok(_) => {
                self.notice = None;
                self.reset_answer_selection();
                self.prepare_view();
                true
            }
            Err(err) => {
                warn!(error = %err, "could not start quiz");
                self.notice = Some(err.into());
                false
            }
        }
    }

    // Quiz

    /// Make sure the current question has its option order fixed before it
    /// is drawn.
    pub fn prepare_view(&mut self) {
        self.session.prepare_options(&mut self.rng);
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    pub fn current_options(&self) -> &[String] {
        self.session.shuffled_options().unwrap_or_default()
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn picked_option(&self) -> Option<usize> {
        self.picked_option
    }

    pub fn select_next_option(&mut self) {
        let len = self.current_options().len();
        if len > 0 {
            self.option_cursor = (self.option_cursor + 1) % len;
        }
    }

    pub fn select_previous_option(&mut self) {
        let len = self.current_options().len();
        if len > 0 {
            self.option_cursor = (self.option_cursor + len - 1) % len;
        }
    }

    pub fn pick_highlighted_option(&mut self) {
        self.pick_option(self.option_cursor);
    }

    pub fn pick_option(&mut self, index: usize) {
        if index < self.current_options().len() {
            self.option_cursor = index;
            self.picked_option = Some(index);
            self.notice = None;
        }
    }

    pub fn submit_answer(&mut self) -> Option<AnswerOutcome> {
        let selected = self
            .picked_option
            .and_then(|index| self.current_options().get(index))
            .cloned();

        match self.session.submit(selected.as_deref()) {
            Ok(outcome) => {
                self.notice = None;
                self.reset_answer_selection();
                if self.screen() == Screen::Results {
                    self.result_scroll = 0;
                } else {
                    self.prepare_view();
                }
                Some(outcome)
            }
            Err(err) => {
                self.notice = Some(err.into());
                None
            }
        }
    }

    // Results

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session.wrong_answers().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        match self.session.restart() {
            Ok(()) => {
                info!("back to chapter selection");
                self.notice = None;
                self.result_scroll = 0;
            }
            Err(err) => self.notice = Some(err.into()),
        }
    }

    fn reset_answer_selection(&mut self) {
        self.option_cursor = 0;
        self.picked_option = None;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::LoadError;

    fn bank() -> QuestionBank {
        let mut questions = Vec::new();
        for chapter in ["1", "2", "10"] {
            for i in 0..3 {
                questions.push(Question::new(
                    chapter,
                    format!("Chapter {} question {}", chapter, i),
                    ["Right", "Wrong", "Other"],
                    "right",
                ));
            }
        }
        QuestionBank {
            title: Some("Power Plant Exam".to_string()),
            chapter_titles: BTreeMap::from([("1".to_string(), "THERMODYNAMICS".to_string())]),
            questions,
        }
    }

    fn app() -> App {
        App::new(bank(), DEFAULT_SAMPLE_SIZE, StdRng::seed_from_u64(3))
    }

    fn pick(app: &mut App, text: &str) {
        let index = app
            .current_options()
            .iter()
            .position(|option| option == text)
            .unwrap();
        app.pick_option(index);
    }

    #[test]
    fn test_chapters_are_sorted_and_labelled() {
        let app = app();
        assert_eq!(app.chapters(), ["1", "2", "10"]);
        assert_eq!(app.chapter_label("1"), "CHAPTER 1: THERMODYNAMICS");
        assert_eq!(app.chapter_label("10"), "Chapter 10");
        assert_eq!(app.title(), "Power Plant Exam");
    }

    #[test]
    fn test_chapter_selection() {
        let mut app = app();

        app.select_next_chapter();
        app.toggle_chapter();
        assert!(app.is_chosen("2"));
        app.toggle_chapter();
        assert!(!app.is_chosen("2"));

        app.select_previous_chapter();
        app.select_previous_chapter();
        assert_eq!(app.chapter_cursor(), 2);

        app.select_all_chapters();
        assert_eq!(app.chosen_chapters().len(), 3);
        app.clear_chapters();
        assert!(app.chosen_chapters().is_empty());
    }

    #[test]
    fn test_start_without_chapters_warns() {
        let mut app = app();

        assert!(!app.start_quiz());
        assert_eq!(app.screen(), Screen::Home);
        let notice = app.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "Please select at least one chapter.");
    }

    #[test]
    fn test_start_prepares_first_question() {
        let mut app = app();
        app.toggle_chapter();

        assert!(app.start_quiz());
        assert_eq!(app.screen(), Screen::Quiz);
        assert_eq!(app.session().total_questions(), 3);
        assert_eq!(app.current_options().len(), 3);
        assert!(app.notice().is_none());
    }

    #[test]
    fn test_submit_requires_a_pick() {
        let mut app = app();
        app.toggle_chapter();
        app.start_quiz();
        let before = app.current_options().to_vec();

        app.select_next_option();
        assert_eq!(app.submit_answer(), None);
        assert_eq!(app.notice().unwrap().message, "Please select an answer.");
        assert_eq!(app.session().current_index(), 0);
        assert_eq!(app.current_options(), before.as_slice());

        app.pick_highlighted_option();
        assert_eq!(app.picked_option(), Some(1));
        assert!(app.notice().is_none());
    }

    #[test]
    fn test_full_round_and_restart() {
        let mut app = app();
        app.select_all_chapters();
        app.start_quiz();

        let mut expected_score = 0;
        for turn in 0..9 {
            if turn % 3 == 0 {
                pick(&mut app, "Wrong");
            } else {
                pick(&mut app, "Right");
                expected_score += 1;
            }
            assert!(app.submit_answer().is_some());
        }

        assert_eq!(app.screen(), Screen::Results);
        assert_eq!(app.session().score(), expected_score);
        assert_eq!(app.session().wrong_answers().len(), 3);

        app.scroll_results_down();
        app.scroll_results_down();
        app.scroll_results_down();
        assert_eq!(app.result_scroll(), 2);
        app.scroll_results_up();
        assert_eq!(app.result_scroll(), 1);

        app.restart();
        assert_eq!(app.screen(), Screen::Home);
        assert_eq!(app.result_scroll(), 0);

        assert!(app.start_quiz());
        assert_eq!(app.session().score(), 0);
        assert!(app.session().wrong_answers().is_empty());
    }

    #[test]
    fn test_load_error_is_surfaced() {
        let source = serde_json::from_str::<Vec<Question>>("{").unwrap_err();
        let report = LoadReport {
            error: Some(LoadError::Parse {
                path: PathBuf::from("questions.json"),
                source,
            }),
            ..LoadReport::default()
        };
        let mut app = App::from_report(report, DEFAULT_SAMPLE_SIZE, StdRng::seed_from_u64(1));

        assert!(app.chapters().is_empty());
        assert!(app.load_error().unwrap().contains("corrupted"));
        assert_eq!(app.notice().unwrap().level, NoticeLevel::Error);

        app.select_all_chapters();
        assert!(!app.start_quiz());
        assert_eq!(app.screen(), Screen::Home);
    }

    #[test]
    fn test_missing_bank_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = QuizConfig {
            questions_path: dir.path().join("absent.json"),
            seed: Some(9),
            ..QuizConfig::default()
        };
        let app = App::from_config(&config);

        assert!(app.questions().is_empty());
        assert!(app.load_error().is_none());
        assert!(app.notice().is_none());
    }
}
