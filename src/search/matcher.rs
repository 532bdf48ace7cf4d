//! Boolean evaluation of a parsed query against one document.
//!
//! Terms are partitioned by prefix:
//!
//! 1. If any excluded term is present, the document does not match.
//! 2. Otherwise, if there are required terms, all of them must be present and
//!    optional terms are not consulted.
//! 3. Otherwise, if there are optional terms, at least one must be present.
//! 4. Otherwise (empty query, or only exclusions) the document matches.
//!
//! Stem terms are looked up in each field's stem set; phrase terms are
//! case-insensitive substrings of each field's raw text, with no word-boundary
//! requirement. A term is present if any listed field has it.

use crate::search::cache::AnalyzedDocument;
use crate::search::document::{Document, FieldList};
use crate::search::query::{Query, Term, TermPrefix};
use crate::search::tokenize::{Tokenizer, default_tokenizer};
use serde::Serialize;

/// Evaluates queries against documents with a given tokenizer.
///
/// Holds no per-document state, so one `Matcher` and one [`Query`] can be
/// shared across threads scanning different documents.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'t> {
    tokenizer: &'t Tokenizer,
}

impl Default for Matcher<'static> {
    fn default() -> Self {
        Self::new(default_tokenizer())
    }
}

impl<'t> Matcher<'t> {
    pub const fn new(tokenizer: &'t Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Returns true if `document` satisfies `query` over `fields`.
    pub fn matches<D: Document + ?Sized>(
        &self,
        query: &Query,
        document: &D,
        fields: &FieldList,
    ) -> bool {
        self.analyze(document, fields).matches(query)
    }

    /// Returns true if `term` occurs in any of `fields`, ignoring its prefix.
    pub fn present<D: Document + ?Sized>(
        &self,
        term: &Term,
        document: &D,
        fields: &FieldList,
    ) -> bool {
        self.analyze(document, fields).contains(term)
    }

    /// Evaluates every term and reports why the document did or did not match.
    pub fn explain<D: Document + ?Sized>(
        &self,
        query: &Query,
        document: &D,
        fields: &FieldList,
    ) -> Explanation {
        let analyzed = self.analyze(document, fields);
        let terms: Vec<TermPresence> = query
            .terms()
            .iter()
            .map(|term| TermPresence {
                term: term.clone(),
                present: analyzed.contains(term),
            })
            .collect();
        let reason = Reason::from_presence(&terms);
        Explanation { terms, reason }
    }

    fn analyze<'a, D: Document + ?Sized>(
        &self,
        document: &'a D,
        fields: &'a FieldList,
    ) -> AnalyzedDocument<'a>
    where
        't: 'a,
    {
        AnalyzedDocument::with_tokenizer(document, fields, self.tokenizer)
    }
}

/// Core decision procedure, shared by raw and pre-analyzed documents.
pub(crate) fn evaluate(query: &Query, document: &AnalyzedDocument<'_>) -> bool {
    if let Some(term) = query.excluded().find(|term| document.contains(term)) {
        tracing::debug!(%term, "rejected: excluded term present");
        return false;
    }

    let mut required = query.required().peekable();
    if required.peek().is_some() {
        let matched = required.all(|term| document.contains(term));
        tracing::debug!(matched, "decided by required terms");
        return matched;
    }

    let mut optional = query.optional().peekable();
    if optional.peek().is_none() {
        return true;
    }
    let matched = optional.any(|term| document.contains(term));
    tracing::debug!(matched, "decided by optional terms");
    matched
}

/// Evaluates `query` against `document` with the shared English tokenizer.
pub fn matches<D: Document + ?Sized>(query: &Query, document: &D, fields: &FieldList) -> bool {
    Matcher::default().matches(query, document, fields)
}

/// Checks one term's presence with the shared English tokenizer.
pub fn present<D: Document + ?Sized>(term: &Term, document: &D, fields: &FieldList) -> bool {
    Matcher::default().present(term, document, fields)
}

/// Explains a match decision with the shared English tokenizer.
pub fn explain<D: Document + ?Sized>(
    query: &Query,
    document: &D,
    fields: &FieldList,
) -> Explanation {
    Matcher::default().explain(query, document, fields)
}

/// Whether one term was found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermPresence {
    pub term: Term,
    pub present: bool,
}

/// The rule that decided a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "term", rename_all = "snake_case")]
pub enum Reason {
    /// An excluded term is present.
    Excluded(Term),
    /// A required term is absent.
    MissingRequired(Term),
    AllRequiredPresent,
    /// No required terms; at least one optional term is present.
    OptionalPresent,
    NoOptionalPresent,
    /// Nothing to satisfy: the query is empty or only has exclusions.
    Vacuous,
}

impl Reason {
    fn from_presence(terms: &[TermPresence]) -> Self {
        let with = |prefix: TermPrefix| terms.iter().filter(move |t| t.term.prefix() == prefix);

        if let Some(hit) = with(TermPrefix::Excluded).find(|t| t.present) {
            return Self::Excluded(hit.term.clone());
        }

        let mut required = with(TermPrefix::Required).peekable();
        if required.peek().is_some() {
            return match required.find(|t| !t.present) {
                Some(miss) => Self::MissingRequired(miss.term.clone()),
                None => Self::AllRequiredPresent,
            };
        }

        let mut optional = with(TermPrefix::None).peekable();
        if optional.peek().is_none() {
            Self::Vacuous
        } else if optional.any(|t| t.present) {
            Self::OptionalPresent
        } else {
            Self::NoOptionalPresent
        }
    }

    pub const fn is_match(&self) -> bool {
        matches!(
            self,
            Self::AllRequiredPresent | Self::OptionalPresent | Self::Vacuous
        )
    }
}

/// Per-term presence plus the deciding rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub terms: Vec<TermPresence>,
    pub reason: Reason,
}

impl Explanation {
    pub const fn is_match(&self) -> bool {
        self.reason.is_match()
    }
}
