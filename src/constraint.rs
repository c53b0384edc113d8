//! Accumulated knowledge about the answer over one puzzle session.

use std::cmp::Ordering;

use crate::corpus::FrequencyOracle;
use crate::errors::FeedbackError;
use crate::feedback::{Feedback, FeedbackCode, FeedbackRule};
use crate::word::{LetterSet, Word};
use crate::WORD_LEN;

/// Positional letter domains plus global inclusion / exclusion sets.
///
/// Every update only ever shrinks domains and grows `must_include` / `excluded`,
/// so a word rejected once stays rejected for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintState {
    domains: [LetterSet; WORD_LEN],
    must_include: LetterSet,
    excluded: LetterSet,
}

impl Default for ConstraintState {
    fn default() -> Self {
        ConstraintState::new()
    }
}

impl ConstraintState {
    pub fn new() -> ConstraintState {
        ConstraintState {
            domains: [LetterSet::full(); WORD_LEN],
            must_include: LetterSet::empty(),
            excluded: LetterSet::empty(),
        }
    }

    /// Folds one guess's feedback into the state: an Absent letter is excluded
    /// and removed from every position, even when the same feedback marks it
    /// Present or Correct elsewhere.
    pub fn add_feedback(&mut self, feedback: &Feedback) {
        self.add_feedback_with(FeedbackRule::Simplified, feedback);
    }

    /// Folds in feedback produced under `rule`.
    ///
    /// Under [`FeedbackRule::Canonical`] an Absent letter that is marked Present
    /// or Correct elsewhere in the same feedback only means "no further copy
    /// here": it is removed from this position alone and not excluded globally.
    pub fn add_feedback_with(&mut self, rule: FeedbackRule, feedback: &Feedback) {
        let confirmed = match rule {
            FeedbackRule::Simplified => LetterSet::empty(),
            FeedbackRule::Canonical => feedback
                .marks()
                .filter(|m| m.code != FeedbackCode::Absent)
                .fold(LetterSet::empty(), |mut set, m| {
                    set.insert(m.letter);
                    set
                }),
        };

        let mut next = self.clone();
        for (i, mark) in feedback.marks().enumerate() {
            match mark.code {
                FeedbackCode::Absent if confirmed.contains(mark.letter) => {
                    next.domains[i].remove(mark.letter);
                }
                FeedbackCode::Absent => {
                    next.excluded.insert(mark.letter);
                    next.domains
                        .iter_mut()
                        .for_each(|domain| domain.remove(mark.letter));
                }
                FeedbackCode::Present => {
                    next.must_include.insert(mark.letter);
                    next.domains[i].remove(mark.letter);
                }
                FeedbackCode::Correct => {
                    next.must_include.insert(mark.letter);
                    // intersect rather than assign so contradictory feedback empties the
                    // domain instead of growing it back
                    next.domains[i] = next.domains[i].intersection(LetterSet::single(mark.letter));
                }
            }
        }

        for letter in next.domains.iter().filter_map(LetterSet::single_letter) {
            next.must_include.insert(letter);
        }

        *self = next;
    }

    /// Validates raw `(letter, code)` pairs and applies them as simplified
    /// feedback; on error nothing changes.
    pub fn add_feedback_pairs(&mut self, pairs: &[(char, u8)]) -> Result<(), FeedbackError> {
        let feedback = Feedback::from_pairs(pairs)?;
        self.add_feedback(&feedback);
        Ok(())
    }

    /// True iff `word` has the right length, every letter is allowed at its
    /// position and every must-include letter appears somewhere.
    pub fn is_valid_candidate(&self, word: &str) -> bool {
        word.parse::<Word>()
            .map_or(false, |word| self.admits(&word))
    }

    pub fn admits(&self, word: &Word) -> bool {
        word.bytes()
            .iter()
            .zip(self.domains.iter())
            .all(|(&letter, domain)| domain.contains(letter))
            && self.must_include.is_subset(&word.letters())
    }

    /// Valid candidates from `pool` with a known frequency of at least
    /// `min_frequency`, most frequent first and alphabetical among equals.
    pub fn candidates<O: FrequencyOracle + ?Sized>(
        &self,
        pool: &[Word],
        oracle: &O,
        min_frequency: f64,
    ) -> Vec<(Word, f64)> {
        let mut out = pool
            .iter()
            .filter(|word| self.admits(word))
            .filter_map(|word| {
                oracle
                    .frequency(word)
                    .filter(|&freq| freq >= min_frequency)
                    .map(|freq| (*word, freq))
            })
            .collect::<Vec<_>>();

        out.sort_by(|(wa, fa), (wb, fb)| {
            fb.partial_cmp(fa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| wa.cmp(wb))
        });
        out
    }

    /// `candidates(..).len()` without building or sorting the list.
    pub fn count_candidates<O: FrequencyOracle + ?Sized>(
        &self,
        pool: &[Word],
        oracle: &O,
        min_frequency: f64,
    ) -> usize {
        pool.iter()
            .filter(|word| self.admits(word))
            .filter(|word| {
                oracle
                    .frequency(word)
                    .map_or(false, |freq| freq >= min_frequency)
            })
            .count()
    }

    /// Counts the words of an already frequency-filtered pool that are still valid.
    ///
    /// Equal to `count_candidates(full, oracle, min)` when `pool` holds exactly the
    /// words of `full` at or above `min`; simulations filter once and use this.
    pub fn count_admitted(&self, pool: &[Word]) -> usize {
        pool.iter().filter(|word| self.admits(word)).count()
    }

    pub fn domain(&self, pos: usize) -> LetterSet {
        self.domains[pos]
    }

    pub fn must_include(&self) -> LetterSet {
        self.must_include
    }

    pub fn excluded(&self) -> LetterSet {
        self.excluded
    }

    /// Letters pinned to a position (singleton domains).
    pub fn known(&self) -> [Option<char>; WORD_LEN] {
        self.domains
            .map(|domain| domain.single_letter().map(|letter| letter as char))
    }
}
