use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::error;

use wordle_opener::{Feedback, FeedbackRule, Word};

mod logging;
mod openers;
mod solve;
mod ui;

#[derive(Parser)]
#[clap(name = "wordle-opener")]
#[clap(about = "finds the most informative opening guess for a wordle-style game", long_about = None)]
#[clap(author, version)]
struct Cli {
    /// Log debug output (RUST_LOG takes precedence)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every plausible opening guess
    ///
    /// Press Esc or Ctrl-C to stop early; an interrupted search writes nothing.
    Search {
        #[clap(flatten)]
        args: openers::SearchArgs,

        /// Where to write the ranking
        #[clap(short, long, value_parser, default_value = "openers.txt")]
        output: PathBuf,

        /// How many of the best guesses to print
        #[clap(long, value_parser, default_value_t = 10)]
        top: usize,
    },
    /// Score a single opening guess
    Score {
        #[clap(value_parser)]
        guess: Word,

        #[clap(flatten)]
        args: openers::SearchArgs,
    },
    /// Suggest answers and guesses for a game in progress
    Suggest {
        /// Word list with one `<word> <zipf frequency>` pair per line
        #[clap(long, value_parser)]
        corpus: PathBuf,

        /// Feedback so far as `guess:marks`, marks being g (correct), y
        /// (present) or b (absent), e.g. `snort:bygbb`
        #[clap(short, long, value_parser)]
        feedback: Vec<Feedback>,

        /// Ignore words rarer than this zipf frequency
        #[clap(long, value_parser, default_value_t = 0.0)]
        min_freq: f64,

        /// How many entries of each list to print
        #[clap(long, value_parser, default_value_t = 10)]
        top: usize,

        /// Rule the feedback was given under: simplified or canonical
        #[clap(long, value_parser, default_value = "simplified")]
        rule: FeedbackRule,
    },
    /// Show the feedback a guess gets against an answer
    Check {
        #[clap(value_parser)]
        guess: Word,

        #[clap(value_parser)]
        answer: Word,

        /// simplified or canonical
        #[clap(long, value_parser, default_value = "simplified")]
        rule: FeedbackRule,
    },
}

fn main() {
    let args = Cli::parse();
    logging::init_logger(args.verbose);

    let result = match &args.command {
        Commands::Search { args, output, top } => openers::search(args, output, *top),
        Commands::Score { guess, args } => openers::score(guess, args),
        Commands::Suggest {
            corpus,
            feedback,
            min_freq,
            top,
            rule,
        } => solve::suggest(corpus, feedback, *rule, *min_freq, *top),
        Commands::Check {
            guess,
            answer,
            rule,
        } => solve::check(guess, answer, *rule).map_err(Into::into),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
