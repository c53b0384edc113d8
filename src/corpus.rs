//! Word corpus and popularity oracle backed by plain text files.
//!
//! The corpus format is one `<word> <zipf frequency>` pair per line, as
//! exported from a word-frequency list. Blank lines and `#` comments are
//! ignored, and words that are not exactly [`WORD_LEN`] letters are skipped so
//! a general dictionary can be fed in as-is.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::CorpusError;
use crate::word::Word;
use crate::WORD_LEN;

/// Popularity of a word on a logarithmic (zipf) scale.
///
/// `None` means the word is unknown, which every frequency threshold rejects.
pub trait FrequencyOracle: Sync {
    fn frequency(&self, word: &Word) -> Option<f64>;
}

impl FrequencyOracle for FxHashMap<Word, f64> {
    fn frequency(&self, word: &Word) -> Option<f64> {
        self.get(word).copied()
    }
}

/// Every known word of the puzzle length with its frequency.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// sorted alphabetically
    words: Vec<Word>,
    frequencies: FxHashMap<Word, f64>,
}

impl Corpus {
    /// Builds a corpus from `(word, frequency)` pairs. A word listed twice keeps
    /// its highest frequency.
    pub fn from_entries<I: IntoIterator<Item = (Word, f64)>>(entries: I) -> Corpus {
        let mut frequencies = FxHashMap::default();
        for (word, freq) in entries {
            let slot = frequencies.entry(word).or_insert(freq);
            if freq > *slot {
                *slot = freq;
            }
        }

        let mut words = frequencies.keys().copied().collect::<Vec<_>>();
        words.sort_unstable();
        Corpus { words, frequencies }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Corpus, CorpusError> {
        let mut entries = vec![];
        let mut skipped = 0;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }

            let mut fields = content.split_whitespace();
            let (word, freq) = match (fields.next(), fields.next()) {
                (Some(word), Some(freq)) => (word, freq),
                _ => {
                    return Err(CorpusError::Malformed {
                        line: i + 1,
                        content: content.to_string(),
                        reason: "missing frequency".to_string(),
                    })
                }
            };
            let freq = freq
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .ok_or_else(|| CorpusError::Malformed {
                    line: i + 1,
                    content: content.to_string(),
                    reason: format!("bad frequency \"{}\"", freq),
                })?;

            match word.parse::<Word>() {
                Ok(word) => entries.push((word, freq)),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("skipped {} corpus entries that are not {}-letter words", skipped, WORD_LEN);
        }
        Ok(Corpus::from_entries(entries))
    }

    pub fn load(path: &Path) -> Result<Corpus, CorpusError> {
        let file = File::open(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Corpus::from_reader(BufReader::new(file))?;
        debug!("loaded {} words from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.frequencies.contains_key(word)
    }
}

impl FrequencyOracle for Corpus {
    fn frequency(&self, word: &Word) -> Option<f64> {
        self.frequencies.get(word).copied()
    }
}

/// Reads a list of words, one per line and in any case, such as the archive
/// of previous puzzle answers. Lines that are not puzzle words are skipped.
pub fn read_word_set<R: BufRead>(reader: R) -> Result<FxHashSet<Word>, CorpusError> {
    let mut words = FxHashSet::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }
        match content.parse::<Word>() {
            Ok(word) => {
                words.insert(word);
            }
            Err(e) => warn!("line {}: skipping {}", i + 1, e),
        }
    }
    Ok(words)
}

pub fn load_word_set(path: &Path) -> Result<FxHashSet<Word>, CorpusError> {
    let file = File::open(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_word_set(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader_skips_other_lengths_and_comments() {
        let text = "# zipf list\nabout 6.1\nthe 7.7\n\nALONE 4.2\nabout 5.0\n";
        let corpus = Corpus::from_reader(text.as_bytes()).unwrap();

        assert_eq!(corpus.len(), 2);
        let about: Word = "about".parse().unwrap();
        assert_eq!(corpus.frequency(&about), Some(6.1));
        assert!(corpus.contains(&"alone".parse().unwrap()));
        assert_eq!(corpus.words()[0], about);
    }

    #[test]
    fn test_from_reader_reports_bad_frequency() {
        let err = Corpus::from_reader("crane 4.0\nslate lots\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CorpusError::Malformed { line: 2, .. }));

        let err = Corpus::from_reader("crane\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CorpusError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_unknown_word_has_no_frequency() {
        let corpus = Corpus::from_reader("crane 4.0\n".as_bytes()).unwrap();
        assert_eq!(corpus.frequency(&"slate".parse().unwrap()), None);
    }

    #[test]
    fn test_read_word_set_is_case_insensitive() {
        let set = read_word_set("CIGAR\nrebut\nnope\n".as_bytes()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"cigar".parse().unwrap()));
    }
}
