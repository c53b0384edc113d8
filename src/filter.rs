//! Stateless filters that carve answer and guess pools out of a raw corpus.
//!
//! Every filter keeps the input order, so pools built from a sorted corpus
//! stay sorted.

use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::corpus::Corpus;
use crate::corpus::FrequencyOracle;
use crate::score::LetterFrequencyTable;
use crate::word::{LetterSet, Word};

/// Minimum letter-frequency scores a guess needs to stay in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DuplicateThresholds {
    /// for words whose letters are all distinct
    pub base: f64,
    /// for words with a repeated letter
    pub with_duplicates: f64,
}

impl Default for DuplicateThresholds {
    fn default() -> Self {
        DuplicateThresholds {
            base: 0.28,
            with_duplicates: 0.35,
        }
    }
}

pub fn select_by_frequency(corpus: &Corpus, min_frequency: f64) -> Vec<Word> {
    corpus
        .words()
        .iter()
        .filter(|word| {
            corpus
                .frequency(word)
                .map_or(false, |freq| freq >= min_frequency)
        })
        .copied()
        .collect()
}

pub fn exclude_known_prior(words: Vec<Word>, prior_answers: &FxHashSet<Word>) -> Vec<Word> {
    words
        .into_iter()
        .filter(|word| !prior_answers.contains(word))
        .collect()
}

pub fn exclude_uncommon_letters(words: Vec<Word>, uncommon: LetterSet) -> Vec<Word> {
    words
        .into_iter()
        .filter(|word| word.letters().intersection(uncommon).is_empty())
        .collect()
}

/// Keeps a word with a repeated letter only if its letter score reaches
/// `with_duplicates`, and any other word only if it reaches `base`.
pub fn exclude_duplicate_letters(
    words: Vec<Word>,
    table: &LetterFrequencyTable,
    thresholds: &DuplicateThresholds,
) -> Vec<Word> {
    words
        .into_iter()
        .filter(|word| {
            let threshold = if word.has_duplicate_letters() {
                thresholds.with_duplicates
            } else {
                thresholds.base
            };
            table.score(word) >= threshold
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_select_by_frequency_is_inclusive() {
        let corpus = Corpus::from_entries(vec![
            ("crane".parse().unwrap(), 3.0),
            ("slate".parse().unwrap(), 4.5),
            ("adieu".parse().unwrap(), 2.0),
        ]);
        assert_eq!(select_by_frequency(&corpus, 3.0), words(&["crane", "slate"]));
        assert!(select_by_frequency(&corpus, 9.0).is_empty());
    }

    #[test]
    fn test_exclude_known_prior() {
        let prior = words(&["cigar"]).into_iter().collect::<FxHashSet<_>>();
        let kept = exclude_known_prior(words(&["cigar", "crane"]), &prior);
        assert_eq!(kept, words(&["crane"]));
    }

    #[test]
    fn test_exclude_uncommon_letters() {
        let uncommon: LetterSet = "kvxzjq".parse().unwrap();
        let kept = exclude_uncommon_letters(words(&["crane", "quiet", "jokes", "slate"]), uncommon);
        assert_eq!(kept, words(&["crane", "slate"]));
    }

    #[test]
    fn test_duplicate_words_need_the_higher_threshold() {
        // e:4 a:3 s:2 l:1 t:1 r:1 n:1 c:1 d:1 over 15 letters
        let table = LetterFrequencyTable::from_words(&words(&["eased", "slate", "crane"]));
        let thresholds = DuplicateThresholds {
            base: 0.4,
            with_duplicates: 0.7,
        };
        // slate: 11/15, eased: (4+3+2+1)/15 with its second e ignored, crane: 10/15
        let kept = exclude_duplicate_letters(words(&["slate", "eased", "crane"]), &table, &thresholds);
        assert_eq!(kept, words(&["slate", "crane"]));
    }
}
