//! Error types for the solver library.
//!
//! Each stage that reads untrusted input has its own error enum so call sites
//! can match on what actually went wrong:
//!
//! - [`WordError`]: a string that is not a valid puzzle word
//! - [`FeedbackError`]: malformed session feedback (raised before any state mutation)
//! - [`CorpusError`]: unreadable or malformed word / frequency files
//! - [`ConfigError`]: invalid search configuration, raised at the call site
//! - [`SearchError`]: anything that stops an opening-guess search from starting

use std::io;
use std::path::PathBuf;

use crate::WORD_LEN;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WordError {
    #[error("\"{word}\" has {len} letters, expected {}", WORD_LEN)]
    WrongLength { word: String, len: usize },

    #[error("\"{word}\" contains '{invalid_char}' (only a-z allowed)")]
    InvalidLetter { word: String, invalid_char: char },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("feedback has {len} entries, expected {}", WORD_LEN)]
    WrongLength { len: usize },

    #[error("feedback code {code} at position {pos} is not one of 0, 1, 2")]
    InvalidCode { pos: usize, code: u8 },

    #[error("feedback mark '{mark}' at position {pos} is not one of g, y, b (or 2, 1, 0)")]
    InvalidMark { pos: usize, mark: char },

    #[error("feedback letter '{letter}' at position {pos} is not a-z")]
    InvalidLetter { pos: usize, letter: char },

    #[error("expected <word>:<marks>, got \"{input}\"")]
    MissingSeparator { input: String },

    #[error(transparent)]
    Word(#[from] WordError),
}

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {reason} in \"{content}\"")]
    Malformed {
        line: usize,
        content: String,
        reason: String,
    },

    #[error(transparent)]
    Read(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    ZeroWorkers,

    #[error("{name} must be a finite number, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("duplicate-letter threshold {with_duplicates} is below the base threshold {base}")]
    InvertedThresholds { base: f64, with_duplicates: f64 },

    #[error("uncommon letter set contains '{invalid_char}' (only a-z allowed)")]
    InvalidLetter { invalid_char: char },

    #[error("unsupported feedback rule \"{0}\" (expected \"simplified\" or \"canonical\")")]
    UnsupportedFeedbackRule(String),

    #[error("answer sample size must be at least 1")]
    EmptySample,

    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
