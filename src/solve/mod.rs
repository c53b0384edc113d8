use std::error::Error;
use std::io::stdout;
use std::path::Path;

use crossterm::{
    execute,
    style::{self, Color, Stylize},
};
use itertools::Itertools;
use log::{debug, info};

use crate::ui::*;
use wordle_opener::filter::select_by_frequency;
use wordle_opener::score::rank_by_coverage;
use wordle_opener::*;

fn print_known(state: &ConstraintState) -> crossterm::Result<()> {
    let pattern = state
        .known()
        .iter()
        .map(|c| c.map_or('_', |c| c.to_ascii_uppercase()))
        .join(" ");
    execute!(
        stdout(),
        style::Print("known: "),
        style::PrintStyledContent(pattern.with(CORRECT_COL).bold()),
        style::Print(format!(
            "   must include: {}   excluded: {}\n\n",
            state.must_include(),
            state.excluded()
        ))
    )
}

fn print_no_answer_msg() -> crossterm::Result<()> {
    execute!(
        stdout(),
        style::PrintStyledContent("No word in the corpus fits this feedback.\n".with(Color::Red))
    )
}

fn print_solved_msg(answer: &Word, guess_count: usize) -> crossterm::Result<()> {
    execute!(
        stdout(),
        style::PrintStyledContent(
            format!("Solved: {} in {} guesses!\n", answer, guess_count).with(CORRECT_COL)
        )
    )
}

/// Replays the feedback of a game in progress and prints what is left to play.
pub fn suggest(
    corpus_path: &Path,
    feedback: &[Feedback],
    rule: FeedbackRule,
    min_frequency: f64,
    top: usize,
) -> Result<(), Box<dyn Error>> {
    let corpus = Corpus::load(corpus_path)?;

    let mut state = ConstraintState::new();
    for (i, f) in feedback.iter().enumerate() {
        print_feedback(f)?;
        if f.is_win() {
            print_solved_msg(&f.guess(), i + 1)?;
            return Ok(());
        }
        state.add_feedback_with(rule, f);
    }
    execute!(stdout(), style::Print("\n"))?;
    print_known(&state)?;

    let candidates = state.candidates(corpus.words(), &corpus, min_frequency);
    info!(
        "{} of {} words fit {} rounds of feedback",
        candidates.len(),
        corpus.len(),
        feedback.len()
    );
    match candidates.as_slice() {
        [] => {
            print_no_answer_msg()?;
            return Ok(());
        }
        [(answer, _)] => {
            execute!(
                stdout(),
                style::Print("Only one word fits: "),
                style::PrintStyledContent(answer.to_string().with(CORRECT_COL).bold()),
                style::Print("\n")
            )?;
            return Ok(());
        }
        _ => {}
    }

    let likely = candidates
        .iter()
        .take(top)
        .map(|(word, freq)| (*word, format!("{:.2}", freq)))
        .collect_vec();
    print_ranking("Most likely answers:", &likely)?;

    let remaining = candidates.iter().map(|(word, _)| *word).collect_vec();
    let vocabulary = select_by_frequency(&corpus, min_frequency);
    debug!("ranking {} guesses by letter coverage", vocabulary.len());
    let informative = rank_by_coverage(&state, &remaining, &vocabulary)
        .into_iter()
        .take(top)
        .collect_vec();
    execute!(stdout(), style::Print("\n"))?;
    print_ranking("Most informative guesses:", &informative)?;

    Ok(())
}

pub fn check(guess: &Word, answer: &Word, rule: FeedbackRule) -> crossterm::Result<()> {
    debug!("classifying {} against {} ({} rule)", guess, answer, rule);
    print_feedback(&classify_with(rule, guess, answer))
}
