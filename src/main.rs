use std::path::PathBuf;

use chapter_quiz::{logging, Quiz, QuizConfig, DEFAULT_QUESTIONS_PATH, DEFAULT_SAMPLE_SIZE};
use clap::Parser;

const DEFAULT_SAMPLE_LIMIT: u16 = DEFAULT_SAMPLE_SIZE as u16;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long, default_value = DEFAULT_QUESTIONS_PATH)]
    questions: PathBuf,

    /// Maximum number of questions per exam
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_LIMIT,
          value_parser = clap::value_parser!(u16).range(1..))]
    limit: u16,

    /// Seed for reproducible question and option order
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for QuizConfig {
    fn from(args: Args) -> Self {
        Self {
            questions_path: args.questions,
            sample_size: usize::from(args.limit),
            seed: args.seed,
            log_file: args.log_file,
            verbose: args.verbose,
        }
    }
}

fn main() {
    let config = QuizConfig::from(Args::parse());

    if let Err(e) = logging::init(&config) {
        eprintln!("Error setting up logging: {}", e);
        std::process::exit(1);
    }

    let result = Quiz::from_config(&config).and_then(Quiz::run);
    if let Err(e) = result {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QuizConfig::from(Args::try_parse_from(["chapter-quiz"]).unwrap());
        assert_eq!(config, QuizConfig::default());
    }

    #[test]
    fn test_limit_and_seed() {
        let args = Args::try_parse_from([
            "chapter-quiz",
            "-q",
            "bank.json",
            "-n",
            "25",
            "--seed",
            "7",
            "-v",
        ])
        .unwrap();
        let config = QuizConfig::from(args);

        assert_eq!(config.questions_path, PathBuf::from("bank.json"));
        assert_eq!(config.sample_size, 25);
        assert_eq!(config.seed, Some(7));
        assert!(config.verbose);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        assert!(Args::try_parse_from(["chapter-quiz", "--limit", "0"]).is_err());
        assert!(Args::try_parse_from(["chapter-quiz", "--limit", "70000"]).is_err());
    }
}
