use itertools::Itertools;

use wordle_opener::score::{rank_by_coverage, score_from_total};
use wordle_opener::*;

fn words(list: &[&str]) -> Vec<Word> {
    list.iter().map(|s| s.parse().unwrap()).collect()
}

fn corpus() -> Corpus {
    let entries = [
        ("alone", 5.1),
        ("atone", 3.9),
        ("stone", 5.0),
        ("shone", 4.2),
        ("crane", 4.4),
        ("slate", 4.3),
        ("snort", 3.5),
        ("those", 6.0),
        ("geese", 4.0),
        ("spent", 4.6),
        ("speed", 4.9),
        ("pious", 3.8),
    ];
    Corpus::from_entries(entries.iter().map(|&(w, f)| (w.parse().unwrap(), f)))
}

#[test]
fn scores_stay_between_zero_and_one() {
    let corpus = corpus();
    let context = ScoringContext::new(corpus.words(), &corpus, 0.0, FeedbackRule::Simplified);
    let answers = corpus.words();

    for guess in corpus.words() {
        let score = context.simulation_score(guess, answers);
        assert!((0.0..=1.0).contains(&score), "{} scored {}", guess, score);
        // the answer itself always remains, so no score can be zero here
        assert!(score > 0.0);
    }
}

#[test]
fn fewer_remaining_words_score_higher() {
    let corpus = corpus();
    let context = ScoringContext::new(corpus.words(), &corpus, 0.0, FeedbackRule::Simplified);
    let answers = corpus.words();

    let scored = corpus
        .words()
        .iter()
        .map(|guess| {
            (
                context.remaining_total(guess, answers),
                context.simulation_score(guess, answers),
            )
        })
        .collect_vec();

    for ((total_a, score_a), (total_b, score_b)) in scored.iter().tuple_combinations() {
        if total_a < total_b {
            assert!(score_a > score_b);
        } else if total_a == total_b {
            assert_eq!(score_a, score_b);
        }
    }
}

#[test]
fn nothing_remaining_scores_zero() {
    assert_eq!(score_from_total(0), 0.0);
    assert_eq!(score_from_total(1), 1.0);
    assert_eq!(score_from_total(4), 0.25);

    // counting threshold above every frequency: nothing is ever counted
    let corpus = corpus();
    let context = ScoringContext::new(corpus.words(), &corpus, 9.0, FeedbackRule::Simplified);
    assert!(context.counting_pool().is_empty());
    let guess = "crane".parse().unwrap();
    assert_eq!(context.simulation_score(&guess, corpus.words()), 0.0);
}

#[test]
fn counting_threshold_limits_remaining_words() {
    let corpus = corpus();
    let all = ScoringContext::new(corpus.words(), &corpus, 0.0, FeedbackRule::Simplified);
    let common = ScoringContext::new(corpus.words(), &corpus, 4.5, FeedbackRule::Simplified);

    let guess = "crane".parse().unwrap();
    let answer = "stone".parse().unwrap();
    // n and e in place, no c, r or a: stone and shone
    assert_eq!(all.remaining_after(&guess, &answer), 2);
    // only stone is common enough
    assert_eq!(common.remaining_after(&guess, &answer), 1);
}

#[test]
fn letter_table_counts_repeats_but_scores_unique_letters() {
    let table = LetterFrequencyTable::from_words(&words(&["geese", "crane"]));
    let e = b'e';

    // geese adds three e's to the table, crane one more
    assert_eq!(table.count(e), 4);
    assert!((table.weight(e) - 0.4).abs() < 1e-9);

    // geese scores its e once: g (0.1) + e (0.4) + s (0.1)
    let geese = "geese".parse().unwrap();
    assert!((table.score(&geese) - 0.6).abs() < 1e-9);
}

#[test]
fn coverage_prefers_unknown_common_letters() {
    let mut state = ConstraintState::new();
    state.add_feedback(&"crane:bbbgg".parse().unwrap());

    let candidates = words(&["stone", "shone", "alone", "atone"]);
    let vocabulary = words(&["those", "stole", "geese", "pious", "adopt"]);
    let ranked = rank_by_coverage(&state, &candidates, &vocabulary);

    let order = ranked.iter().map(|(w, _)| w.to_string()).collect_vec();
    // geese has a repeated letter and is never suggested
    assert_eq!(order, vec!["stole", "those", "adopt", "pious"]);
    assert_eq!(ranked[0].1, 9);
}
