//! Word-guessing puzzle helper: track letter feedback, rank guesses, and search
//! for the most informative opening guess.

pub mod config;
pub mod constraint;
pub mod corpus;
pub mod errors;
pub mod feedback;
pub mod filter;
pub mod score;
pub mod search;
pub mod word;

pub use config::SearchConfig;
pub use constraint::ConstraintState;
pub use corpus::{Corpus, FrequencyOracle};
pub use feedback::{classify, classify_canonical, classify_with, Feedback, FeedbackCode, FeedbackRule};
pub use score::{LetterFrequencyTable, ScoringContext};
pub use search::{CancelToken, GuessScoreTable, OpeningGuessSearch, SearchControl, SearchOutcome};
pub use word::{LetterSet, Word};

pub const WORD_LEN: usize = 5;
