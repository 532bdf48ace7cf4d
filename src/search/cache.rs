//! Per-document memoization of field stem sets.

use crate::search::document::{Document, FieldList};
use crate::search::matcher;
use crate::search::query::{Query, Term, TermKind};
use crate::search::tokenize::{StemSet, Tokenizer, default_tokenizer};
use std::cell::OnceCell;

/// A document bound to a field list, analyzing each field at most once.
///
/// Stem sets and lower-cased text are computed the first time a term needs
/// them and reused for every later term and query. Results are the same as
/// matching the raw document.
#[derive(Debug)]
pub struct AnalyzedDocument<'a> {
    tokenizer: &'a Tokenizer,
    fields: Vec<AnalyzedField<'a>>,
}

#[derive(Debug)]
struct AnalyzedField<'a> {
    name: &'a str,
    /// Raw text; absent fields are empty.
    text: &'a str,
    stems: OnceCell<StemSet>,
    lowercase: OnceCell<String>,
}

impl AnalyzedField<'_> {
    fn stems(&self, tokenizer: &Tokenizer) -> &StemSet {
        self.stems.get_or_init(|| tokenizer.tokenize(self.text))
    }

    fn lowercase(&self) -> &str {
        self.lowercase.get_or_init(|| self.text.to_lowercase())
    }
}

impl<'a> AnalyzedDocument<'a> {
    /// Binds `document` to `fields` using the shared English tokenizer.
    pub fn new<D: Document + ?Sized>(document: &'a D, fields: &'a FieldList) -> Self {
        Self::with_tokenizer(document, fields, default_tokenizer())
    }

    pub fn with_tokenizer<D: Document + ?Sized>(
        document: &'a D,
        fields: &'a FieldList,
        tokenizer: &'a Tokenizer,
    ) -> Self {
        let fields = fields
            .iter()
            .map(|name| AnalyzedField {
                name,
                text: document.field(name).unwrap_or_default(),
                stems: OnceCell::new(),
                lowercase: OnceCell::new(),
            })
            .collect();
        Self { tokenizer, fields }
    }

    /// Stem set of one field, or `None` if `name` is not in the field list.
    pub fn stems(&self, name: &str) -> Option<&StemSet> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.stems(self.tokenizer))
    }

    /// True if any field's stem set contains `stem`.
    pub fn contains_stem(&self, stem: &str) -> bool {
        self.fields
            .iter()
            .any(|field| field.stems(self.tokenizer).contains(stem))
    }

    /// True if any field's lower-cased text contains the lower-cased `phrase`.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let needle = phrase.to_lowercase();
        self.fields
            .iter()
            .any(|field| field.lowercase().contains(needle.as_str()))
    }

    /// True if `term` occurs in any field, ignoring its prefix.
    pub fn contains(&self, term: &Term) -> bool {
        let present = match term.kind() {
            TermKind::Stem => self.contains_stem(term.value()),
            TermKind::Phrase => self.contains_phrase(term.value()),
        };
        tracing::trace!(%term, present, "term presence");
        present
    }

    /// Evaluates `query` against this document.
    pub fn matches(&self, query: &Query) -> bool {
        matcher::evaluate(query, self)
    }
}
