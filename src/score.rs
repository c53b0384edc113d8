//! Heuristic guess scores.
//!
//! Two kinds of score live here. [`LetterFrequencyTable`] gives a cheap
//! letter-popularity score used to prune the guess pool, and [`ScoringContext`]
//! gives the simulation score: play the guess against every answer and count
//! how many words would still be possible afterwards.

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::constraint::ConstraintState;
use crate::corpus::FrequencyOracle;
use crate::feedback::{classify_with, FeedbackRule};
use crate::word::{letter_index, LetterSet, Word};

/// Relative frequency of each letter over a reference word list.
///
/// Built by counting every occurrence (a repeated letter counts twice), while
/// [`score`](LetterFrequencyTable::score) counts each distinct letter of a word
/// once, so the weights of a word's letters need not sum to its share of the list.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterFrequencyTable {
    counts: [u32; 26],
    total: u32,
}

impl LetterFrequencyTable {
    pub fn from_words<'a, I: IntoIterator<Item = &'a Word>>(words: I) -> LetterFrequencyTable {
        let mut counts = [0; 26];
        let mut total = 0;
        for word in words {
            for &letter in word.bytes() {
                counts[letter_index(letter)] += 1;
                total += 1;
            }
        }
        LetterFrequencyTable { counts, total }
    }

    /// Raw number of occurrences of `letter` in the reference list.
    pub fn count(&self, letter: u8) -> u32 {
        self.counts[letter_index(letter)]
    }

    /// Share of all letter occurrences that are `letter`; zero for an empty table.
    pub fn weight(&self, letter: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(letter) as f64 / self.total as f64
    }

    pub fn score(&self, word: &Word) -> f64 {
        word.letters().iter().map(|letter| self.weight(letter)).sum()
    }
}

/// Everything a simulation needs that stays fixed for a whole search run.
///
/// Built once and shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    /// corpus words at or above the counting threshold, in corpus order
    counting_pool: Vec<Word>,
    rule: FeedbackRule,
}

impl ScoringContext {
    pub fn new<O: FrequencyOracle + ?Sized>(
        corpus: &[Word],
        oracle: &O,
        frequency_threshold: f64,
        rule: FeedbackRule,
    ) -> ScoringContext {
        let counting_pool = corpus
            .iter()
            .filter(|word| {
                oracle
                    .frequency(word)
                    .map_or(false, |freq| freq >= frequency_threshold)
            })
            .copied()
            .collect();
        ScoringContext {
            counting_pool,
            rule,
        }
    }

    pub fn counting_pool(&self) -> &[Word] {
        &self.counting_pool
    }

    pub fn rule(&self) -> FeedbackRule {
        self.rule
    }

    /// Number of counted words still possible after `guess` is played against `answer`.
    pub fn remaining_after(&self, guess: &Word, answer: &Word) -> usize {
        let mut state = ConstraintState::new();
        state.add_feedback_with(self.rule, &classify_with(self.rule, guess, answer));
        state.count_admitted(&self.counting_pool)
    }

    pub fn remaining_total(&self, guess: &Word, answers: &[Word]) -> u64 {
        answers
            .iter()
            .map(|answer| self.remaining_after(guess, answer) as u64)
            .sum()
    }

    /// `1 / total remaining`, summed over every answer; zero when nothing remains.
    pub fn simulation_score(&self, guess: &Word, answers: &[Word]) -> f64 {
        score_from_total(self.remaining_total(guess, answers))
    }
}

pub fn score_from_total(total: u64) -> f64 {
    if total > 0 {
        1.0 / total as f64
    } else {
        0.0
    }
}

/// Ranks guesses for the current state of a session.
///
/// Letters are counted over the remaining `candidates`; each vocabulary word
/// with no repeated letter then scores the counts of its letters that are not
/// already known to be in the answer. Best first, alphabetical among equals.
pub fn rank_by_coverage(
    state: &ConstraintState,
    candidates: &[Word],
    vocabulary: &[Word],
) -> Vec<(Word, u32)> {
    let counts = LetterFrequencyTable::from_words(candidates);
    let known = state.must_include();

    let mut ranked = vocabulary
        .par_iter()
        .filter(|word| !word.has_duplicate_letters())
        .map(|word| (*word, coverage(&counts, known, word)))
        .collect::<Vec<_>>();

    ranked.par_sort_unstable_by(|(wa, a), (wb, b)| b.cmp(a).then_with(|| wa.cmp(wb)));
    ranked
}

fn coverage(counts: &LetterFrequencyTable, known: LetterSet, word: &Word) -> u32 {
    word.letters()
        .iter()
        .filter(|&letter| !known.contains(letter))
        .map(|letter| counts.count(letter))
        .sum()
}

/// Orders `(word, score)` pairs best first, alphabetical among equal scores.
pub fn by_score_desc(a: &(Word, f64), b: &(Word, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_table_weights_sum_to_one() {
        let table = LetterFrequencyTable::from_words(&words(&["crane", "slate", "geese"]));
        let sum: f64 = (b'a'..=b'z').map(|b| table.weight(b)).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(table.count(b'e'), 5);
    }

    #[test]
    fn test_empty_table_scores_zero() {
        let table = LetterFrequencyTable::from_words(&Vec::<Word>::new());
        assert_eq!(table.score(&"crane".parse().unwrap()), 0.0);
    }

    #[test]
    fn test_score_from_total_guards_zero() {
        assert_eq!(score_from_total(0), 0.0);
        assert_eq!(score_from_total(4), 0.25);
    }

    #[test]
    fn test_coverage_skips_known_letters() {
        let mut state = ConstraintState::new();
        state.add_feedback(&"crane:bbbbg".parse().unwrap());
        let candidates = words(&["spite", "slope", "those"]);
        let vocabulary = words(&["spilt", "stove", "geese"]);

        let ranked = rank_by_coverage(&state, &candidates, &vocabulary);
        // geese repeats letters and is never suggested
        assert_eq!(ranked.len(), 2);
        // s:3 t:2 o:2 p:2 i:1 l:1 h:1; e is known and ignored
        assert_eq!(ranked[0], ("spilt".parse().unwrap(), 3 + 2 + 1 + 1 + 2));
        assert_eq!(ranked[1], ("stove".parse().unwrap(), 3 + 2 + 2));
    }
}
