//! Feedback classification of a guess against a known answer.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::{ConfigError, FeedbackError};
use crate::word::{letter_index, Word};
use crate::WORD_LEN;

/// Classification of a single guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackCode {
    /// Letter not in the answer (grey)
    Absent,
    /// Letter in the answer but elsewhere (yellow)
    Present,
    /// Letter in this exact position (green)
    Correct,
}

impl FeedbackCode {
    pub fn from_mark(c: char) -> Option<FeedbackCode> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(FeedbackCode::Correct),
            'y' | '1' => Some(FeedbackCode::Present),
            'b' | 'x' | '.' | '0' => Some(FeedbackCode::Absent),
            _ => None,
        }
    }

    pub fn to_mark(self) -> char {
        match self {
            FeedbackCode::Correct => 'g',
            FeedbackCode::Present => 'y',
            FeedbackCode::Absent => 'b',
        }
    }
}

impl TryFrom<u8> for FeedbackCode {
    type Error = u8;

    fn try_from(code: u8) -> Result<FeedbackCode, u8> {
        match code {
            0 => Ok(FeedbackCode::Absent),
            1 => Ok(FeedbackCode::Present),
            2 => Ok(FeedbackCode::Correct),
            _ => Err(code),
        }
    }
}

impl From<FeedbackCode> for u8 {
    fn from(code: FeedbackCode) -> u8 {
        match code {
            FeedbackCode::Absent => 0,
            FeedbackCode::Present => 1,
            FeedbackCode::Correct => 2,
        }
    }
}

/// One guessed letter together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mark {
    pub letter: u8,
    pub code: FeedbackCode,
}

impl Mark {
    pub fn letter_char(&self) -> char {
        self.letter as char
    }
}

/// Index-aligned feedback for a whole guess: one [`Mark`] per position.
///
/// Only constructed already validated, so applying it to a
/// [`ConstraintState`](crate::constraint::ConstraintState) cannot fail halfway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback {
    guess: Word,
    codes: [FeedbackCode; WORD_LEN],
}

impl Feedback {
    pub fn new(guess: &Word, codes: [FeedbackCode; WORD_LEN]) -> Feedback {
        Feedback {
            guess: *guess,
            codes,
        }
    }

    /// Builds feedback from raw `(letter, code)` pairs, rejecting the whole
    /// input on the first problem.
    pub fn from_pairs(pairs: &[(char, u8)]) -> Result<Feedback, FeedbackError> {
        if pairs.len() != WORD_LEN {
            return Err(FeedbackError::WrongLength { len: pairs.len() });
        }

        let mut letters = [0; WORD_LEN];
        let mut codes = [FeedbackCode::Absent; WORD_LEN];
        for (pos, &(letter, code)) in pairs.iter().enumerate() {
            if !letter.is_ascii_alphabetic() {
                return Err(FeedbackError::InvalidLetter { pos, letter });
            }
            letters[pos] = letter.to_ascii_lowercase() as u8;
            codes[pos] = FeedbackCode::try_from(code)
                .map_err(|code| FeedbackError::InvalidCode { pos, code })?;
        }

        Ok(Feedback::new(&Word::from_bytes(letters)?, codes))
    }

    /// Parses a guess and its marks, e.g. `("slate", "gybbb")` or `("slate", "21000")`.
    pub fn parse(guess: &str, marks: &str) -> Result<Feedback, FeedbackError> {
        let guess: Word = guess.parse()?;
        let len = marks.chars().count();
        if len != WORD_LEN {
            return Err(FeedbackError::WrongLength { len });
        }

        let mut codes = [FeedbackCode::Absent; WORD_LEN];
        for (pos, mark) in marks.chars().enumerate() {
            codes[pos] =
                FeedbackCode::from_mark(mark).ok_or(FeedbackError::InvalidMark { pos, mark })?;
        }
        Ok(Feedback::new(&guess, codes))
    }

    pub fn marks(&self) -> impl Iterator<Item = Mark> + '_ {
        self.guess
            .bytes()
            .iter()
            .zip(self.codes)
            .map(|(&letter, code)| Mark { letter, code })
    }

    pub fn guess(&self) -> Word {
        self.guess
    }

    pub fn codes(&self) -> [FeedbackCode; WORD_LEN] {
        self.codes
    }

    pub fn is_win(&self) -> bool {
        self.codes.iter().all(|&c| c == FeedbackCode::Correct)
    }
}

/// Parses the command-line form `word:marks`, e.g. `slate:gybbb`.
impl FromStr for Feedback {
    type Err = FeedbackError;

    fn from_str(s: &str) -> Result<Feedback, FeedbackError> {
        match s.split_once(':') {
            Some((guess, marks)) => Feedback::parse(guess, marks),
            None => Err(FeedbackError::MissingSeparator {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.guess)?;
        self.codes
            .iter()
            .try_for_each(|c| write!(f, "{}", c.to_mark()))
    }
}

/// How repeated letters are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackRule {
    /// Present whenever the letter occurs anywhere in the answer, however often it
    /// was guessed.
    #[default]
    Simplified,
    /// The puzzle's own rule: a repeat is only Present while unmatched copies of
    /// the letter remain in the answer.
    Canonical,
}

impl FromStr for FeedbackRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<FeedbackRule, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simplified" => Ok(FeedbackRule::Simplified),
            "canonical" => Ok(FeedbackRule::Canonical),
            other => Err(ConfigError::UnsupportedFeedbackRule(other.to_string())),
        }
    }
}

impl fmt::Display for FeedbackRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackRule::Simplified => f.write_str("simplified"),
            FeedbackRule::Canonical => f.write_str("canonical"),
        }
    }
}

/// Classifies `guess` against `answer` with the simplified rule.
pub fn classify(guess: &Word, answer: &Word) -> Feedback {
    let mut codes = [FeedbackCode::Absent; WORD_LEN];
    for (i, code) in codes.iter_mut().enumerate() {
        let letter = guess.letter(i);
        if answer.letter(i) == letter {
            *code = FeedbackCode::Correct;
        } else if answer.contains(letter) {
            *code = FeedbackCode::Present;
        }
    }
    Feedback::new(guess, codes)
}

/// Classifies `guess` against `answer`, counting unmatched occurrences of
/// repeated letters.
pub fn classify_canonical(guess: &Word, answer: &Word) -> Feedback {
    let mut codes = [FeedbackCode::Absent; WORD_LEN];
    let mut unmatched = [0u8; 26];

    for (i, code) in codes.iter_mut().enumerate() {
        if guess.letter(i) == answer.letter(i) {
            *code = FeedbackCode::Correct;
        } else {
            unmatched[letter_index(answer.letter(i))] += 1;
        }
    }

    for (i, code) in codes.iter_mut().enumerate() {
        if *code != FeedbackCode::Correct {
            let idx = letter_index(guess.letter(i));
            if unmatched[idx] > 0 {
                *code = FeedbackCode::Present;
                unmatched[idx] -= 1;
            }
        }
    }

    Feedback::new(guess, codes)
}

pub fn classify_with(rule: FeedbackRule, guess: &Word, answer: &Word) -> Feedback {
    match rule {
        FeedbackRule::Simplified => classify(guess, answer),
        FeedbackRule::Canonical => classify_canonical(guess, answer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_round_trips_cli_form() {
        let feedback: Feedback = "slate:gyb.x".parse().unwrap();
        assert_eq!(feedback.to_string(), "slate:gybbb");
        assert_eq!(feedback.guess(), w("slate"));
    }

    #[test]
    fn test_parse_rejects_bad_marks() {
        assert_eq!(
            Feedback::parse("slate", "gybz0"),
            Err(FeedbackError::InvalidMark { pos: 3, mark: 'z' })
        );
        assert_eq!(
            Feedback::parse("slate", "gyb"),
            Err(FeedbackError::WrongLength { len: 3 })
        );
        assert!(matches!(
            "slate".parse::<Feedback>(),
            Err(FeedbackError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn test_from_pairs_validates_before_building() {
        let ok = Feedback::from_pairs(&[('S', 0), ('n', 1), ('o', 2), ('r', 0), ('t', 0)]).unwrap();
        assert_eq!(ok, classify(&w("snort"), &w("alone")));

        assert_eq!(
            Feedback::from_pairs(&[('s', 0), ('n', 3), ('o', 2), ('r', 0), ('t', 0)]),
            Err(FeedbackError::InvalidCode { pos: 1, code: 3 })
        );
        assert_eq!(
            Feedback::from_pairs(&[('s', 0)]),
            Err(FeedbackError::WrongLength { len: 1 })
        );
    }

    #[test]
    fn test_rule_from_str() {
        assert_eq!("Canonical".parse::<FeedbackRule>().unwrap(), FeedbackRule::Canonical);
        assert!(matches!(
            "strict".parse::<FeedbackRule>(),
            Err(ConfigError::UnsupportedFeedbackRule(_))
        ));
    }
}
