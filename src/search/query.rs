//! Query string parsing.
//!
//! A query is a whitespace-separated list of chunks:
//!
//! - `word` - an optional term, matched against field stems
//! - `"some phrase"` - an optional term, matched as a literal substring
//! - `+chunk` - a required term
//! - `-chunk` - an excluded term
//!
//! Words are lower-cased and stemmed at parse time; phrases are kept verbatim.

use crate::error::ParseError;
use crate::search::tokenize::{Tokenizer, default_tokenizer};
use serde::{Deserialize, Serialize};
use std::{fmt, iter::Peekable, str::CharIndices};

/// How a term is compared against document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermKind {
    /// Membership in a field's stem set.
    #[serde(rename = "text_stems")]
    Stem,
    /// Case-insensitive literal substring of a field's raw text.
    #[serde(rename = "text_match")]
    Phrase,
}

/// Boolean role of a term in the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermPrefix {
    /// No prefix; at least one optional term must be present.
    #[default]
    #[serde(rename = "")]
    None,
    /// `+`; the term must be present.
    #[serde(rename = "+")]
    Required,
    /// `-`; the term must be absent.
    #[serde(rename = "-")]
    Excluded,
}

impl TermPrefix {
    /// The character written before a chunk to select this prefix.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Required => "+",
            Self::Excluded => "-",
        }
    }

    const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Required),
            '-' => Some(Self::Excluded),
            _ => None,
        }
    }
}

/// One atomic unit of a parsed query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    value: String,
    kind: TermKind,
    prefix: TermPrefix,
}

impl Term {
    /// Creates a term from already-normalized parts.
    ///
    /// `Stem` values are expected to be lower-cased and stemmed; use
    /// [`Query::parse`] to get that for free.
    pub fn new(value: impl Into<String>, kind: TermKind, prefix: TermPrefix) -> Self {
        Self {
            value: value.into(),
            kind,
            prefix,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub const fn kind(&self) -> TermKind {
        self.kind
    }

    pub const fn prefix(&self) -> TermPrefix {
        self.prefix
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TermKind::Stem => write!(f, "{}{}", self.prefix.symbol(), self.value),
            TermKind::Phrase => write!(f, "{}\"{}\"", self.prefix.symbol(), self.value),
        }
    }
}

/// An ordered, immutable list of terms built from a query string.
///
/// Term order follows the input. It does not affect matching but is kept for
/// inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    terms: Vec<Term>,
}

impl Query {
    /// Parses a query string with the shared English tokenizer.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, default_tokenizer())
    }

    /// Parses a query string, stemming words with `tokenizer`.
    pub fn parse_with(input: &str, tokenizer: &Tokenizer) -> Result<Self, ParseError> {
        let query = Parser::new(input, tokenizer).parse()?;
        tracing::debug!(terms = query.len(), "parsed query {:?}", input);
        Ok(query)
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms written with `+`.
    pub fn required(&self) -> impl Iterator<Item = &Term> {
        self.with_prefix(TermPrefix::Required)
    }

    /// Terms written with `-`.
    pub fn excluded(&self) -> impl Iterator<Item = &Term> {
        self.with_prefix(TermPrefix::Excluded)
    }

    /// Terms written without a prefix.
    pub fn optional(&self) -> impl Iterator<Item = &Term> {
        self.with_prefix(TermPrefix::None)
    }

    fn with_prefix(&self, prefix: TermPrefix) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter(move |term| term.prefix == prefix)
    }
}

impl FromIterator<Term> for Query {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// Parses a query string with the shared English tokenizer.
pub fn parse(input: &str) -> Result<Query, ParseError> {
    Query::parse(input)
}

/// Single-pass scanner over the query string.
struct Parser<'a> {
    /// The original input string.
    input: &'a str,
    /// Characters with their byte offsets and one-character lookahead.
    chars: Peekable<CharIndices<'a>>,
    /// Stems bare words.
    tokenizer: &'a Tokenizer,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, tokenizer: &'a Tokenizer) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            tokenizer,
        }
    }

    fn parse(mut self) -> Result<Query, ParseError> {
        let mut terms = Vec::new();

        loop {
            self.skip_whitespace();
            if self.chars.peek().is_none() {
                break;
            }
            if let Some(term) = self.read_chunk()? {
                terms.push(term);
            }
        }

        Ok(Query { terms })
    }

    /// Reads one chunk. Returns `None` for chunks that carry no text, such as
    /// a lone `+` or `""`.
    fn read_chunk(&mut self) -> Result<Option<Term>, ParseError> {
        let prefix = match self.chars.peek() {
            Some(&(_, ch)) => match TermPrefix::from_char(ch) {
                Some(prefix) => {
                    self.chars.next();
                    prefix
                }
                None => TermPrefix::None,
            },
            None => return Ok(None),
        };

        match self.chars.peek() {
            Some(&(quote, '"')) => self.read_phrase(quote, prefix),
            _ => Ok(self.read_word(prefix)),
        }
    }

    /// Reads a quoted phrase; `quote` is the byte offset of the opening quote.
    fn read_phrase(&mut self, quote: usize, prefix: TermPrefix) -> Result<Option<Term>, ParseError> {
        self.chars.next(); // consume opening quote
        let start = quote + 1;

        for (end, ch) in self.chars.by_ref() {
            if ch == '"' {
                let text = &self.input[start..end];
                if text.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(Term::new(text, TermKind::Phrase, prefix)));
            }
        }

        Err(ParseError::UnclosedQuote { position: quote })
    }

    /// Reads a bare word up to the next whitespace and stems it.
    fn read_word(&mut self, prefix: TermPrefix) -> Option<Term> {
        let start = self.chars.peek().map_or(self.input.len(), |&(i, _)| i);
        let mut end = self.input.len();

        while let Some(&(i, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                end = i;
                break;
            }
            self.chars.next();
        }

        let word = &self.input[start..end];
        if word.is_empty() {
            return None;
        }
        Some(Term::new(self.tokenizer.stem(word), TermKind::Stem, prefix))
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&(_, ch)| ch.is_whitespace()).is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    fn stem(value: &str, prefix: TermPrefix) -> Term {
        Term::new(value, TermKind::Stem, prefix)
    }

    fn phrase(value: &str, prefix: TermPrefix) -> Term {
        Term::new(value, TermKind::Phrase, prefix)
    }

    #[rstest]
    #[case("ok", vec![stem("ok", TermPrefix::None)])]
    #[case("lol ok", vec![stem("lol", TermPrefix::None), stem("ok", TermPrefix::None)])]
    #[case("+lol ok", vec![stem("lol", TermPrefix::Required), stem("ok", TermPrefix::None)])]
    #[case("+lol -ok", vec![stem("lol", TermPrefix::Required), stem("ok", TermPrefix::Excluded)])]
    #[case("\"lol\" nope", vec![phrase("lol", TermPrefix::None), stem("nope", TermPrefix::None)])]
    #[case("Pennies", vec![stem("penni", TermPrefix::None)])]
    #[case("-\"Two Words\"", vec![phrase("Two Words", TermPrefix::Excluded)])]
    #[case("+\"ex act ma tch\" x", vec![phrase("ex act ma tch", TermPrefix::Required), stem("x", TermPrefix::None)])]
    fn test_parse_terms(#[case] input: &str, #[case] expected: Vec<Term>) {
        let_assert!(Ok(query) = parse(input));
        check!(query.terms() == expected.as_slice());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    #[case("+ -")]
    #[case("\"\"")]
    fn test_parse_empty(#[case] input: &str) {
        let_assert!(Ok(query) = parse(input));
        check!(query.is_empty());
    }

    #[test]
    fn test_whitespace_collapses() {
        let_assert!(Ok(spaced) = parse("  lol \t\n  ok  "));
        let_assert!(Ok(plain) = parse("lol ok"));
        check!(spaced == plain);
    }

    #[test]
    fn test_phrase_keeps_inner_whitespace() {
        let_assert!(Ok(query) = parse("\"ex  act\tma\""));
        check!(query.terms() == [phrase("ex  act\tma", TermPrefix::None)]);
    }

    #[test]
    fn test_closing_quote_ends_phrase() {
        let_assert!(Ok(query) = parse("\"lol\"nope"));
        check!(query.terms() == [phrase("lol", TermPrefix::None), stem("nope", TermPrefix::None)]);
    }

    #[test]
    fn test_quote_inside_word_is_literal() {
        let_assert!(Ok(query) = parse("ab\"cd"));
        check!(query.len() == 1);
        check!(query.terms()[0].kind() == TermKind::Stem);
        check!(query.terms()[0].value() == "ab\"cd");
    }

    #[test]
    fn test_only_one_prefix_is_consumed() {
        let_assert!(Ok(query) = parse("+-ok"));
        check!(query.terms() == [stem("-ok", TermPrefix::Required)]);
    }

    #[rstest]
    #[case("\"lol", 0)]
    #[case("ok +\"lol nope", 4)]
    #[case("\"a\" \"b", 4)]
    fn test_unclosed_quote(#[case] input: &str, #[case] position: usize) {
        let_assert!(Err(err) = parse(input));
        check!(err == ParseError::UnclosedQuote { position });
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = "+lol -\"no way\" Matches ok";
        let_assert!(Ok(first) = parse(input));
        let_assert!(Ok(second) = parse(input));
        check!(first == second);
    }

    #[test]
    fn test_prefix_views() {
        let_assert!(Ok(query) = parse("a +b -c d +\"e f\""));
        let required: Vec<_> = query.required().map(Term::value).collect();
        let excluded: Vec<_> = query.excluded().map(Term::value).collect();
        let optional: Vec<_> = query.optional().map(Term::value).collect();
        check!(required == ["b", "e f"]);
        check!(excluded == ["c"]);
        check!(optional == ["a", "d"]);
    }

    #[test]
    fn test_display() {
        let_assert!(Ok(query) = parse("+lol -\"No Way\"  ok"));
        check!(query.to_string() == "+lol -\"No Way\" ok");
    }

    #[test]
    fn test_serialize_inspection_format() {
        let_assert!(Ok(query) = parse("+lol \"ok\" -nope"));
        let_assert!(Ok(json) = serde_json::to_value(&query));
        check!(
            json == serde_json::json!([
                {"value": "lol", "kind": "text_stems", "prefix": "+"},
                {"value": "ok", "kind": "text_match", "prefix": ""},
                {"value": "nope", "kind": "text_stems", "prefix": "-"},
            ])
        );
        let_assert!(Ok(back) = serde_json::from_value::<Query>(json));
        check!(back == query);
    }
}
