//! Exhaustive search for the best opening guess.
//!
//! Every guess of the guess pool is played against every plausible answer and
//! scored by how few words it leaves possible on average. Guesses are split
//! into contiguous chunks, one per worker; workers share the answer pool and
//! the scoring context read-only and never talk to each other, so merging is
//! a plain union of disjoint tables.

mod pool;

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use itertools::Itertools;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::{FxHashMap, FxHashSet};

pub use pool::{CancelToken, WorkerPool};

use crate::config::SearchConfig;
use crate::corpus::Corpus;
use crate::errors::SearchError;
use crate::filter::{
    exclude_duplicate_letters, exclude_known_prior, exclude_uncommon_letters, select_by_frequency,
};
use crate::score::{by_score_desc, score_from_total, LetterFrequencyTable, ScoringContext};
use crate::word::{LetterSet, Word};

/// Guess → simulation score for one search run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuessScoreTable {
    scores: FxHashMap<Word, f64>,
}

impl GuessScoreTable {
    pub fn get(&self, guess: &Word) -> Option<f64> {
        self.scores.get(guess).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn insert(&mut self, guess: Word, score: f64) {
        let previous = self.scores.insert(guess, score);
        debug_assert!(previous.is_none(), "{} scored twice", guess);
    }

    /// Unions `other` into this table. Chunks are disjoint, so no key is overwritten.
    pub fn merge(&mut self, other: GuessScoreTable) {
        for (guess, score) in other.scores {
            self.insert(guess, score);
        }
    }

    /// Best first; alphabetical among equal scores.
    pub fn ranked(&self) -> Vec<(Word, f64)> {
        self.scores
            .iter()
            .map(|(&word, &score)| (word, score))
            .sorted_by(by_score_desc)
            .collect_vec()
    }

    /// Writes one `<word> <score>` line per guess, best first.
    pub fn write_report<W: Write>(&self, mut out: W) -> io::Result<()> {
        for (word, score) in self.ranked() {
            writeln!(out, "{} {:.3e}", word, score)?;
        }
        out.flush()
    }
}

impl FromIterator<(Word, f64)> for GuessScoreTable {
    fn from_iter<I: IntoIterator<Item = (Word, f64)>>(iter: I) -> Self {
        let mut table = GuessScoreTable::default();
        iter.into_iter()
            .for_each(|(word, score)| table.insert(word, score));
        table
    }
}

/// How a search run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Complete(GuessScoreTable),
    /// Stopped early; `partial` only holds guesses that were fully scored and
    /// must not be reported as a finished ranking.
    Cancelled { partial: GuessScoreTable },
}

impl SearchOutcome {
    pub fn complete(self) -> Option<GuessScoreTable> {
        match self {
            SearchOutcome::Complete(table) => Some(table),
            SearchOutcome::Cancelled { .. } => None,
        }
    }
}

/// Cancellation and progress shared between a running search and its caller.
#[derive(Debug, Clone, Default)]
pub struct SearchControl {
    cancel: CancelToken,
    scored: Arc<AtomicUsize>,
}

impl SearchControl {
    pub fn new() -> SearchControl {
        SearchControl::default()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Number of guesses fully scored so far.
    pub fn scored(&self) -> usize {
        self.scored.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pools {
    pub answers: Vec<Word>,
    pub guesses: Vec<Word>,
}

/// One search run: the configuration plus the external word data it reads.
pub struct OpeningGuessSearch<'a> {
    config: SearchConfig,
    uncommon: LetterSet,
    corpus: &'a Corpus,
    prior_answers: &'a FxHashSet<Word>,
    letter_table: LetterFrequencyTable,
}

impl<'a> OpeningGuessSearch<'a> {
    /// Validates `config` and builds the letter-frequency table from the
    /// previous answers.
    pub fn new(
        config: SearchConfig,
        corpus: &'a Corpus,
        prior_answers: &'a FxHashSet<Word>,
    ) -> Result<OpeningGuessSearch<'a>, SearchError> {
        config.validate()?;
        let uncommon = config.uncommon_letter_set()?;
        let letter_table = LetterFrequencyTable::from_words(prior_answers);
        if prior_answers.is_empty() {
            warn!("no previous answers given; every guess has a letter score of zero");
        }

        Ok(OpeningGuessSearch {
            config,
            uncommon,
            corpus,
            prior_answers,
            letter_table,
        })
    }

    /// Replaces the letter-frequency table built from the previous answers.
    pub fn with_letter_table(mut self, letter_table: LetterFrequencyTable) -> Self {
        self.letter_table = letter_table;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn letter_table(&self) -> &LetterFrequencyTable {
        &self.letter_table
    }

    pub fn pools(&self) -> Pools {
        let mut answers = exclude_known_prior(
            select_by_frequency(self.corpus, self.config.answer_frequency_threshold),
            self.prior_answers,
        );
        if let Some(sample) = self.config.answer_sample {
            if sample < answers.len() {
                answers.shuffle(&mut StdRng::seed_from_u64(self.config.seed));
                answers.truncate(sample);
                answers.sort_unstable();
            }
        }

        let guesses = exclude_duplicate_letters(
            exclude_uncommon_letters(
                select_by_frequency(self.corpus, self.config.guess_frequency_threshold),
                self.uncommon,
            ),
            &self.letter_table,
            &self.config.duplicate_thresholds,
        );

        Pools { answers, guesses }
    }

    pub fn scoring_context(&self) -> ScoringContext {
        ScoringContext::new(
            self.corpus.words(),
            self.corpus,
            self.config.counting_frequency_threshold,
            self.config.feedback_rule,
        )
    }

    pub fn run(&self, control: &SearchControl) -> Result<SearchOutcome, SearchError> {
        self.run_pools(self.pools(), control)
    }

    /// Scores every guess of `pools` against every answer.
    ///
    /// Returns an empty complete table when either pool is empty. On
    /// cancellation no further chunk is dispatched, running workers stop at
    /// their next check and are joined before returning.
    pub fn run_pools(
        &self,
        pools: Pools,
        control: &SearchControl,
    ) -> Result<SearchOutcome, SearchError> {
        let Pools { answers, guesses } = pools;
        if answers.is_empty() || guesses.is_empty() {
            info!(
                "nothing to score ({} answers, {} guesses)",
                answers.len(),
                guesses.len()
            );
            return Ok(SearchOutcome::Complete(GuessScoreTable::default()));
        }

        let context = Arc::new(self.scoring_context());
        let answers: Arc<[Word]> = answers.into();
        let workers = self.config.worker_count().min(guesses.len());
        let chunk_size = (guesses.len() + workers - 1) / workers;
        let chunks = guesses.chunks(chunk_size).map(<[Word]>::to_vec).collect_vec();
        info!(
            "scoring {} guesses against {} answers ({} counted words) on {} workers",
            guesses.len(),
            answers.len(),
            context.counting_pool().len(),
            workers
        );

        let mut pool = WorkerPool::new(workers, control.cancel.clone())?;
        let chunk_count = chunks.len();
        for (index, chunk) in chunks.into_iter().enumerate() {
            let context = Arc::clone(&context);
            let answers = Arc::clone(&answers);
            let scored = Arc::clone(&control.scored);
            let dispatched = pool.submit(move |cancel| {
                score_chunk(index, &chunk, &answers, &context, cancel, &scored)
            });
            if !dispatched {
                debug!("cancelled before chunk {} of {} was dispatched", index, chunk_count);
                break;
            }
        }

        let dispatched = pool.submitted();
        let results = pool.join();
        let finished = dispatched == chunk_count && results.iter().all(|r| r.finished);

        let mut table = GuessScoreTable::default();
        for result in results {
            table.merge(result.scores);
        }

        if finished {
            info!("scored {} guesses", table.len());
            Ok(SearchOutcome::Complete(table))
        } else {
            info!(
                "search cancelled after scoring {} of {} guesses",
                table.len(),
                guesses.len()
            );
            Ok(SearchOutcome::Cancelled { partial: table })
        }
    }
}

struct ChunkScores {
    scores: GuessScoreTable,
    finished: bool,
}

fn score_chunk(
    index: usize,
    chunk: &[Word],
    answers: &[Word],
    context: &ScoringContext,
    cancel: &CancelToken,
    scored: &AtomicUsize,
) -> ChunkScores {
    debug!("chunk {}: {} guesses, starting at {}", index, chunk.len(), chunk[0]);

    let mut scores = GuessScoreTable::default();
    for guess in chunk {
        let mut total = 0;
        for answer in answers {
            if cancel.is_cancelled() {
                debug!("chunk {}: cancelled after {} guesses", index, scores.len());
                return ChunkScores {
                    scores,
                    finished: false,
                };
            }
            total += context.remaining_after(guess, answer) as u64;
        }
        scores.insert(*guess, score_from_total(total));
        scored.fetch_add(1, Ordering::Relaxed);
    }

    debug!("chunk {}: done", index);
    ChunkScores {
        scores,
        finished: true,
    }
}
