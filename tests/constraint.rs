use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use wordle_opener::*;

const WORDS: [&str; 24] = [
    "alone", "snort", "crane", "slate", "speed", "spent", "geese", "those", "eerie", "mamma",
    "pious", "mound", "lemon", "melon", "stone", "notes", "onset", "tones", "abbey", "kayak",
    "fuzzy", "jazzy", "droll", "llama",
];

fn word(s: &str) -> Word {
    s.parse().unwrap()
}

fn all_words() -> Vec<Word> {
    WORDS.iter().map(|s| word(s)).collect()
}

struct Snapshot {
    domains: Vec<LetterSet>,
    must_include: LetterSet,
    excluded: LetterSet,
}

impl Snapshot {
    fn of(state: &ConstraintState) -> Snapshot {
        Snapshot {
            domains: (0..WORD_LEN).map(|i| state.domain(i)).collect(),
            must_include: state.must_include(),
            excluded: state.excluded(),
        }
    }

    fn refined_by(&self, later: &Snapshot) -> bool {
        self.domains
            .iter()
            .zip(&later.domains)
            .all(|(before, after)| after.is_subset(before))
            && self.must_include.is_subset(&later.must_include)
            && self.excluded.is_subset(&later.excluded)
    }
}

#[test]
fn refinement_is_monotonic() {
    let words = all_words();
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let rule = if seed % 2 == 0 {
            FeedbackRule::Simplified
        } else {
            FeedbackRule::Canonical
        };

        // feedback against a different answer each round, so it may contradict itself
        let mut state = ConstraintState::new();
        for _ in 0..6 {
            let guess = words.choose(&mut rng).unwrap();
            let answer = words.choose(&mut rng).unwrap();
            let before = Snapshot::of(&state);
            state.add_feedback_with(rule, &classify_with(rule, guess, answer));
            assert!(
                before.refined_by(&Snapshot::of(&state)),
                "seed {}: {} vs {} grew the state",
                seed,
                guess,
                answer
            );
        }
    }
}

#[test]
fn answer_stays_valid_through_a_game() {
    let alone = word("alone");
    let mut state = ConstraintState::new();

    state.add_feedback(&classify(&word("snort"), &alone));
    assert!(state.is_valid_candidate("ALONE"));
    assert!(!state.is_valid_candidate("snort"));

    state.add_feedback(&classify(&alone, &alone));
    assert!(state.is_valid_candidate("alone"));
    assert_eq!(state.known(), [Some('a'), Some('l'), Some('o'), Some('n'), Some('e')]);
}

#[test]
fn answer_is_always_a_candidate() {
    let words = all_words();
    let mut rng = StdRng::seed_from_u64(7);
    for rule in [FeedbackRule::Simplified, FeedbackRule::Canonical] {
        for answer in &words {
            let mut state = ConstraintState::new();
            for guess in words.choose_multiple(&mut rng, 4) {
                state.add_feedback_with(rule, &classify_with(rule, guess, answer));
                assert!(
                    state.admits(answer),
                    "{} ruled out by {} ({} rule)",
                    answer,
                    guess,
                    rule
                );
            }
        }
    }
}

#[test]
fn candidates_by_frequency_then_alphabetically() {
    let frequencies = [
        ("stone", 4.8),
        ("notes", 4.8),
        ("onset", 4.9),
        ("tones", 3.1),
        ("alone", 5.2),
    ]
    .into_iter()
    .map(|(w, f)| (word(w), f))
    .collect::<FxHashMap<_, _>>();
    let pool = all_words();

    let mut state = ConstraintState::new();
    state
        .add_feedback_pairs(&[('o', 1), ('n', 1), ('e', 1), ('s', 1), ('t', 1)])
        .unwrap();

    // onset has o where it was already tried and alone lacks letters; words
    // missing from the map have no known frequency
    let candidates = state.candidates(&pool, &frequencies, 4.0);
    let order = candidates.iter().map(|(w, _)| w.to_string()).collect::<Vec<_>>();
    assert_eq!(order, vec!["notes", "stone"]);
    assert_eq!(state.count_candidates(&pool, &frequencies, 4.0), 2);
    assert_eq!(state.count_candidates(&pool, &frequencies, 0.0), 3);
    assert_eq!(state.count_admitted(&pool), 3);
}

#[test]
fn malformed_pairs_change_nothing() {
    let mut state = ConstraintState::new();
    state
        .add_feedback_pairs(&[('c', 0), ('r', 0), ('a', 2), ('n', 0), ('e', 1)])
        .unwrap();
    let before = Snapshot::of(&state);

    assert!(state
        .add_feedback_pairs(&[('s', 2), ('l', 2), ('a', 9), ('t', 2), ('e', 2)])
        .is_err());
    assert!(state.add_feedback_pairs(&[('s', 2), ('l', 2)]).is_err());

    let after = Snapshot::of(&state);
    assert_eq!(before.domains, after.domains);
    assert_eq!(before.must_include, after.must_include);
    assert_eq!(before.excluded, after.excluded);
}

#[test]
fn absent_letter_is_excluded_unless_rule_is_canonical() {
    let pairs = [('e', 1), ('x', 0), ('e', 0), ('a', 0), ('d', 0)];

    let mut state = ConstraintState::new();
    state.add_feedback_pairs(&pairs).unwrap();
    assert!(state.excluded().contains(b'e'));
    assert!(state.must_include().contains(b'e'));
    assert!((0..WORD_LEN).all(|i| !state.domain(i).contains(b'e')));
    assert_eq!(state.count_admitted(&all_words()), 0);

    let feedback = Feedback::from_pairs(&pairs).unwrap();
    let mut canonical = ConstraintState::new();
    canonical.add_feedback_with(FeedbackRule::Canonical, &feedback);
    assert!(!canonical.excluded().contains(b'e'));
    assert!(canonical.domain(1).contains(b'e'));
    assert!(canonical.is_valid_candidate("lemon"));
    assert!(canonical.is_valid_candidate("melon"));
}
