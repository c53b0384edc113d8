use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Args;
use itertools::Itertools;
use log::{info, warn};
use rustc_hash::FxHashSet;

use crate::ui::*;
use wordle_opener::corpus::load_word_set;
use wordle_opener::errors::ConfigError;
use wordle_opener::score::score_from_total;
use wordle_opener::*;

/// Word data and configuration shared by `search` and `score`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Word list with one `<word> <zipf frequency>` pair per line
    #[clap(long, value_parser)]
    corpus: PathBuf,

    /// Previous answers, one per line; excluded from the answer pool and used
    /// for letter scores
    #[clap(long, value_parser)]
    prior: PathBuf,

    /// JSON search configuration; flags below override its values
    #[clap(long, value_parser)]
    config: Option<PathBuf>,

    /// Minimum zipf frequency of a plausible answer
    #[clap(long, value_parser)]
    answer_freq: Option<f64>,

    /// Minimum zipf frequency of a candidate guess
    #[clap(long, value_parser)]
    guess_freq: Option<f64>,

    /// Minimum zipf frequency of a word counted as still possible
    #[clap(long, value_parser)]
    counting_freq: Option<f64>,

    /// Letters that rule out a guess
    #[clap(long, value_parser)]
    uncommon: Option<String>,

    /// Minimum letter score of a guess without repeated letters
    #[clap(long, value_parser)]
    letter_score: Option<f64>,

    /// Minimum letter score of a guess with repeated letters
    #[clap(long, value_parser)]
    duplicate_letter_score: Option<f64>,

    /// Number of worker threads [default: one per core]
    #[clap(short, long, value_parser)]
    workers: Option<usize>,

    /// How repeated letters are marked: simplified or canonical
    #[clap(long, value_parser)]
    rule: Option<FeedbackRule>,

    /// Only simulate against this many randomly chosen answers
    #[clap(long, value_parser)]
    sample: Option<usize>,

    /// Seed for --sample
    #[clap(long, value_parser)]
    seed: Option<u64>,
}

impl SearchArgs {
    pub fn search_config(&self) -> Result<SearchConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)?,
            None => SearchConfig::default(),
        };

        if let Some(x) = self.answer_freq {
            config.answer_frequency_threshold = x;
        }
        if let Some(x) = self.guess_freq {
            config.guess_frequency_threshold = x;
        }
        if let Some(x) = self.counting_freq {
            config.counting_frequency_threshold = x;
        }
        if let Some(x) = &self.uncommon {
            config.uncommon_letters = x.clone();
        }
        if let Some(x) = self.letter_score {
            config.duplicate_thresholds.base = x;
        }
        if let Some(x) = self.duplicate_letter_score {
            config.duplicate_thresholds.with_duplicates = x;
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
        if let Some(x) = self.rule {
            config.feedback_rule = x;
        }
        if self.sample.is_some() {
            config.answer_sample = self.sample;
        }
        if let Some(x) = self.seed {
            config.seed = x;
        }

        config.validate()?;
        Ok(config)
    }

    fn load_words(&self) -> Result<(Corpus, FxHashSet<Word>), Box<dyn Error>> {
        let corpus = Corpus::load(&self.corpus)?;
        let prior = load_word_set(&self.prior)?;
        info!(
            "loaded {} words and {} previous answers",
            corpus.len(),
            prior.len()
        );
        Ok((corpus, prior))
    }
}

/// Scores every plausible opening guess and writes the ranking to `output`.
///
/// Nothing is written when the search is interrupted.
pub fn search(args: &SearchArgs, output: &Path, top: usize) -> Result<(), Box<dyn Error>> {
    let config = args.search_config()?;
    let (corpus, prior) = args.load_words()?;
    let search = OpeningGuessSearch::new(config, &corpus, &prior)?;

    let pools = search.pools();
    let control = SearchControl::new();
    let watcher = ProgressWatcher::start(control.clone(), pools.guesses.len());
    let outcome = search.run_pools(pools, &control);
    watcher.stop();

    match outcome? {
        SearchOutcome::Complete(table) => {
            let file = File::create(output)?;
            table.write_report(BufWriter::new(file))?;
            info!("wrote {} scores to {}", table.len(), output.display());

            let best = table
                .ranked()
                .into_iter()
                .take(top)
                .map(|(word, score)| (word, format!("{:.3e}", score)))
                .collect_vec();
            print_ranking("Best opening guesses:", &best)?;
            Ok(())
        }
        SearchOutcome::Cancelled { partial } => {
            warn!(
                "{} guesses were scored before the search was cancelled; {} left untouched",
                partial.len(),
                output.display()
            );
            Err("search cancelled".into())
        }
    }
}

/// Simulation score of a single guess against the configured answer pool.
pub fn score(guess: &Word, args: &SearchArgs) -> Result<(), Box<dyn Error>> {
    let config = args.search_config()?;
    let (corpus, prior) = args.load_words()?;
    let search = OpeningGuessSearch::new(config, &corpus, &prior)?;

    if !corpus.contains(guess) {
        warn!("{} is not in the word list", guess);
    }
    let pools = search.pools();
    if !pools.guesses.contains(guess) {
        warn!("{} is not in the guess pool; a search would not rank it", guess);
    }

    let context = search.scoring_context();
    let total = context.remaining_total(guess, &pools.answers);
    let mean = if pools.answers.is_empty() {
        0.0
    } else {
        total as f64 / pools.answers.len() as f64
    };
    info!(
        "{} leaves {:.1} words on average over {} answers",
        guess,
        mean,
        pools.answers.len()
    );

    let letter_score = search.letter_table().score(guess);
    print_ranking(
        "Score:",
        &[(
            *guess,
            format!(
                "{:.3e} (letter score {:.3})",
                score_from_total(total),
                letter_score
            ),
        )],
    )?;
    Ok(())
}
