//! Search configuration.
//!
//! Every knob of an opening-guess search lives in [`SearchConfig`]. It can be
//! loaded from a JSON file (all fields optional), is overridden field by field
//! from the command line, and is validated once before any work starts.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::feedback::FeedbackRule;
use crate::filter::DuplicateThresholds;
use crate::word::LetterSet;

pub const DEFAULT_UNCOMMON_LETTERS: &str = "kvxzjq";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// minimum zipf frequency of a plausible answer
    pub answer_frequency_threshold: f64,
    /// minimum zipf frequency of a guess worth scoring
    pub guess_frequency_threshold: f64,
    /// minimum zipf frequency of a word counted as still possible in a simulation
    pub counting_frequency_threshold: f64,
    pub uncommon_letters: String,
    pub duplicate_thresholds: DuplicateThresholds,
    /// defaults to the number of threads rayon would use
    pub workers: Option<usize>,
    pub feedback_rule: FeedbackRule,
    /// score against a random subset of this many answers instead of all of them
    pub answer_sample: Option<usize>,
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            answer_frequency_threshold: 4.5,
            guess_frequency_threshold: 4.5,
            counting_frequency_threshold: 0.0,
            uncommon_letters: DEFAULT_UNCOMMON_LETTERS.to_string(),
            duplicate_thresholds: DuplicateThresholds::default(),
            workers: None,
            feedback_rule: FeedbackRule::default(),
            answer_sample: None,
            seed: 0,
        }
    }
}

impl SearchConfig {
    pub fn from_json(text: &str) -> Result<SearchConfig, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<SearchConfig, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        SearchConfig::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("answer_frequency_threshold", self.answer_frequency_threshold),
            ("guess_frequency_threshold", self.guess_frequency_threshold),
            ("counting_frequency_threshold", self.counting_frequency_threshold),
            ("duplicate_thresholds.base", self.duplicate_thresholds.base),
            (
                "duplicate_thresholds.with_duplicates",
                self.duplicate_thresholds.with_duplicates,
            ),
        ];
        if let Some(&(name, value)) = thresholds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::InvalidThreshold { name, value });
        }

        let DuplicateThresholds {
            base,
            with_duplicates,
        } = self.duplicate_thresholds;
        if with_duplicates < base {
            return Err(ConfigError::InvertedThresholds {
                base,
                with_duplicates,
            });
        }

        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.answer_sample == Some(0) {
            return Err(ConfigError::EmptySample);
        }
        self.uncommon_letter_set()?;
        Ok(())
    }

    pub fn uncommon_letter_set(&self) -> Result<LetterSet, ConfigError> {
        self.uncommon_letters
            .parse()
            .map_err(|invalid_char| ConfigError::InvalidLetter { invalid_char })
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(rayon::current_num_threads)
    }
}
