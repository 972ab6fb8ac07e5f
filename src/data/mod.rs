mod loader;

pub use loader::{
    load_bank, load_questions_from_json, LoadError, LoadReport, QuestionBank, QuestionStore,
    SkippedRecord, DEFAULT_QUESTIONS_PATH,
};
