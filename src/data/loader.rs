use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{InvalidQuestion, Question};

pub const DEFAULT_QUESTIONS_PATH: &str = "questions.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is corrupted: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Questions plus the optional exam title and chapter names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionBank {
    pub title: Option<String>,
    pub chapter_titles: BTreeMap<String, String>,
    pub questions: Vec<Question>,
}

/// A record dropped during validation, by its position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: InvalidQuestion,
}

/// Outcome of a lenient load: always a bank, possibly empty, plus whatever
/// went wrong on the way.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub bank: QuestionBank,
    pub skipped: Vec<SkippedRecord>,
    pub error: Option<LoadError>,
}

/// Object form of a bank file. Records stay raw so each one can fail on
/// its own.
#[derive(Deserialize)]
struct TitledBank {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    chapters: BTreeMap<String, String>,
    questions: Vec<Value>,
}

/// Lazily loads the question bank once and hands out the cached result.
#[derive(Debug)]
pub struct QuestionStore {
    path: PathBuf,
    cache: OnceCell<LoadReport>,
}

impl QuestionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> &LoadReport {
        self.cache.get_or_init(|| load_bank(&self.path))
    }

    /// Gives up the cached report, loading it first if needed.
    pub fn into_report(self) -> LoadReport {
        self.load();
        self.cache.into_inner().unwrap_or_default()
    }
}

impl Default for QuestionStore {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTIONS_PATH)
    }
}

/// Load and validate a bank, failing on a missing or malformed file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<QuestionBank, LoadError> {
    let (bank, _) = read_bank(path.as_ref())?;
    Ok(bank)
}

/// Load a bank without ever failing.
///
/// A missing file yields an empty bank and no error. Anything else that goes
/// wrong yields an empty bank and the error, for the caller to surface.
pub fn load_bank<P: AsRef<Path>>(path: P) -> LoadReport {
    let path = path.as_ref();

    match read_bank(path) {
        Ok((bank, skipped)) => LoadReport {
            bank,
            skipped,
            error: None,
        },
        Err(LoadError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "question bank not found");
            LoadReport::default()
        }
        Err(err) => {
            warn!(error = %err, "question bank unusable");
            LoadReport {
                error: Some(err),
                ..LoadReport::default()
            }
        }
    }
}

fn read_bank(path: &Path) -> Result<(QuestionBank, Vec<SkippedRecord>), LoadError> {
    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };

    // Syntax errors surface here with their line and column.
    let document: Value = serde_json::from_str(&json_content).map_err(parse_error)?;

    let (title, chapter_titles, records) = match document {
        Value::Array(records) => (None, BTreeMap::new(), records),
        Value::Object(_) => {
            let titled: TitledBank = serde_json::from_value(document).map_err(parse_error)?;
            (titled.title, titled.chapters, titled.questions)
        }
        _ => {
            return Err(parse_error(serde_json::Error::custom(
                "expected a list of questions or an object with a `questions` list",
            )));
        }
    };

    let (questions, skipped) = convert_records(records);
    let bank = QuestionBank {
        title,
        chapter_titles,
        questions,
    };

    info!(
        path = %path.display(),
        questions = bank.questions.len(),
        skipped = skipped.len(),
        "loaded question bank"
    );

    Ok((bank, skipped))
}

fn convert_records(records: Vec<Value>) -> (Vec<Question>, Vec<SkippedRecord>) {
    let mut questions = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        let checked = serde_json::from_value::<Question>(record)
            .map_err(|err| InvalidQuestion::Malformed(err.to_string()))
            .and_then(|question| question.validate().map(|()| question));

        match checked {
            Ok(question) => {
                debug!(record = index, %question, "accepted question");
                questions.push(question);
            }
            Err(reason) => {
                warn!(record = index, %reason, "skipping question");
                skipped.push(SkippedRecord { index, reason });
            }
        }
    }

    (questions, skipped)
}
