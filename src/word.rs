use std::fmt;
use std::str::FromStr;

use crate::errors::WordError;
use crate::WORD_LEN;

/// Index of a lowercase ascii letter in the alphabet.
pub fn letter_index(letter: u8) -> usize {
    debug_assert!(letter.is_ascii_lowercase());
    (letter - b'a') as usize
}

/// A puzzle word: exactly [`WORD_LEN`] lowercase ascii letters.
///
/// Ordering is lexicographic, which is what the ranking tie-breaks rely on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LEN]);

impl Word {
    pub fn from_bytes(bytes: [u8; WORD_LEN]) -> Result<Word, WordError> {
        match bytes.iter().find(|b| !b.is_ascii_lowercase()) {
            Some(&b) => Err(WordError::InvalidLetter {
                word: String::from_utf8_lossy(&bytes).into_owned(),
                invalid_char: b as char,
            }),
            None => Ok(Word(bytes)),
        }
    }

    pub fn bytes(&self) -> &[u8; WORD_LEN] {
        &self.0
    }

    pub fn letter(&self, pos: usize) -> u8 {
        self.0[pos]
    }

    pub fn letters(&self) -> LetterSet {
        self.0.iter().fold(LetterSet::empty(), |mut set, &b| {
            set.insert(b);
            set
        })
    }

    pub fn contains(&self, letter: u8) -> bool {
        self.0.contains(&letter)
    }

    pub fn has_duplicate_letters(&self) -> bool {
        self.letters().len() < WORD_LEN
    }

    pub fn as_str(&self) -> &str {
        // only ascii lowercase bytes ever get in
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Word, WordError> {
        let s = s.trim();
        let len = s.chars().count();
        if len != WORD_LEN {
            return Err(WordError::WrongLength {
                word: s.to_string(),
                len,
            });
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(WordError::InvalidLetter {
                word: s.to_string(),
                invalid_char: c,
            });
        }

        let mut bytes = [0; WORD_LEN];
        bytes
            .iter_mut()
            .zip(s.bytes())
            .for_each(|(b, c)| *b = c.to_ascii_lowercase());
        Ok(Word(bytes))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.as_str())
    }
}

/// A set of lowercase letters packed into the low 26 bits of a `u32`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LetterSet(u32);

impl LetterSet {
    const FULL_MASK: u32 = (1 << 26) - 1;

    pub const fn empty() -> LetterSet {
        LetterSet(0)
    }

    pub const fn full() -> LetterSet {
        LetterSet(Self::FULL_MASK)
    }

    pub fn single(letter: u8) -> LetterSet {
        let mut set = LetterSet::empty();
        set.insert(letter);
        set
    }

    pub fn insert(&mut self, letter: u8) {
        self.0 |= 1 << letter_index(letter);
    }

    pub fn remove(&mut self, letter: u8) {
        self.0 &= !(1 << letter_index(letter));
    }

    pub fn contains(&self, letter: u8) -> bool {
        letter.is_ascii_lowercase() && self.0 & (1 << letter_index(letter)) != 0
    }

    pub fn intersection(self, other: LetterSet) -> LetterSet {
        LetterSet(self.0 & other.0)
    }

    pub fn is_subset(&self, other: &LetterSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// The only letter in the set, if it has exactly one.
    pub fn single_letter(&self) -> Option<u8> {
        (self.len() == 1).then(|| b'a' + self.0.trailing_zeros() as u8)
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (b'a'..=b'z').filter(move |&b| self.contains(b))
    }
}

impl FromStr for LetterSet {
    type Err = char;

    /// Parses a run of letters such as `"kvxzjq"`; the error is the first non-letter.
    fn from_str(s: &str) -> Result<LetterSet, char> {
        let mut set = LetterSet::empty();
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            if !c.is_ascii_alphabetic() {
                return Err(c);
            }
            set.insert(c.to_ascii_lowercase() as u8);
        }
        Ok(set)
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|b| write!(f, "{}", b as char))
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases() {
        let word: Word = "SNORT".parse().unwrap();
        assert_eq!(word.as_str(), "snort");
        assert_eq!(word.to_string(), "snort");
    }

    #[test]
    fn test_parse_rejects_bad_words() {
        assert!(matches!(
            "snorts".parse::<Word>(),
            Err(WordError::WrongLength { len: 6, .. })
        ));
        assert!(matches!(
            "sn0rt".parse::<Word>(),
            Err(WordError::InvalidLetter {
                invalid_char: '0',
                ..
            })
        ));
        assert!("".parse::<Word>().is_err());
    }

    #[test]
    fn test_duplicate_letters() {
        assert!("geese".parse::<Word>().unwrap().has_duplicate_letters());
        assert!(!"crane".parse::<Word>().unwrap().has_duplicate_letters());
    }

    #[test]
    fn test_letter_set_ops() {
        let mut set = LetterSet::full();
        assert_eq!(set.len(), 26);
        set.remove(b'q');
        assert!(!set.contains(b'q'));
        assert!(set.contains(b'a'));

        let vowels: LetterSet = "aeiou".parse().unwrap();
        assert!(vowels.is_subset(&set));
        assert_eq!(vowels.to_string(), "aeiou");
        assert_eq!(LetterSet::single(b'z').single_letter(), Some(b'z'));
        assert_eq!(vowels.single_letter(), None);
        assert_eq!("k,v x".parse::<LetterSet>().unwrap().to_string(), "kvx");
        assert_eq!("k1".parse::<LetterSet>(), Err('1'));
    }
}
