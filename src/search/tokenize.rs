//! Text tokenization and stemming utilities for document matching.

use crate::error::TokenizeError;
use ahash::AHashSet;
use rust_stemmers::{Algorithm, Stemmer};
use std::{fmt, sync::LazyLock};
use unicode_segmentation::UnicodeSegmentation;

/// Process-wide tokenizer used by the free functions.
static DEFAULT_TOKENIZER: LazyLock<Tokenizer> = LazyLock::new(Tokenizer::default);

/// Returns the shared English tokenizer.
pub fn default_tokenizer() -> &'static Tokenizer {
    &DEFAULT_TOKENIZER
}

/// Splits text into letter words and reduces each one to its stem.
pub struct Tokenizer {
    /// Reusable stemmer instance for English language stemming
    stemmer: Stemmer,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer").finish_non_exhaustive()
    }
}

impl Tokenizer {
    /// Lower-cases a single word and stems it.
    ///
    /// The word is not segmented: punctuation stays part of the input, so
    /// `"ok,"` does not stem to `"ok"`.
    pub fn stem(&self, word: &str) -> String {
        let lowercase = word.to_lowercase();
        self.stemmer.stem(&lowercase).into_owned()
    }

    /// Builds the stem set of `text`.
    ///
    /// Words are found with Unicode word-boundary segmentation. Only letter
    /// words are kept; digit runs, ideographic and kana segments, punctuation
    /// and whitespace are boundaries.
    pub fn tokenize(&self, text: &str) -> StemSet {
        text.unicode_words()
            .filter(|word| is_letter_word(word))
            .map(|word| self.stem(word))
            .collect()
    }

    /// Byte-level variant of [`Tokenizer::tokenize`].
    ///
    /// Fails only when `bytes` is not valid UTF-8.
    pub fn tokenize_bytes(&self, bytes: &[u8]) -> Result<StemSet, TokenizeError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.tokenize(text))
    }
}

/// Stems one word with the shared tokenizer.
pub fn stem(word: &str) -> String {
    default_tokenizer().stem(word)
}

/// Tokenizes text with the shared tokenizer.
pub fn tokenize(text: &str) -> StemSet {
    default_tokenizer().tokenize(text)
}

/// Tokenizes raw bytes with the shared tokenizer.
pub fn tokenize_bytes(bytes: &[u8]) -> Result<StemSet, TokenizeError> {
    default_tokenizer().tokenize_bytes(bytes)
}

/// A segment is a letter word when it has an alphabetic character and no
/// ideographic or kana ones; UAX#29 puts those in their own word classes.
fn is_letter_word(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(is_ideographic_or_kana)
}

const fn is_ideographic_or_kana(ch: char) -> bool {
    matches!(ch,
        '\u{3005}'..='\u{3007}'         // iteration marks, ideographic zero
        | '\u{3021}'..='\u{3029}'       // Hangzhou numerals
        | '\u{3038}'..='\u{303C}'
        | '\u{3040}'..='\u{30FF}'       // Hiragana, Katakana
        | '\u{31F0}'..='\u{31FF}'       // Katakana phonetic extensions
        | '\u{3400}'..='\u{4DBF}'       // CJK extension A
        | '\u{4E00}'..='\u{9FFF}'       // CJK unified ideographs
        | '\u{F900}'..='\u{FAFF}'       // CJK compatibility ideographs
        | '\u{FF66}'..='\u{FF9F}'       // halfwidth Katakana
        | '\u{1B000}'..='\u{1B16F}'     // Kana supplement, extended
        | '\u{20000}'..='\u{3134F}'     // CJK extensions B..G
    )
}

/// The distinct stems of one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StemSet {
    stems: AHashSet<String>,
}

impl StemSet {
    /// Returns true if `stem` is in the set.
    pub fn contains(&self, stem: &str) -> bool {
        self.stems.contains(stem)
    }

    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stems.iter().map(String::as_str)
    }

    /// Stems in lexicographic order, for stable display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut stems: Vec<&str> = self.iter().collect();
        stems.sort_unstable();
        stems
    }
}

impl FromIterator<String> for StemSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            stems: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for StemSet {
    type Item = String;
    type IntoIter = <AHashSet<String> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.stems.into_iter()
    }
}
