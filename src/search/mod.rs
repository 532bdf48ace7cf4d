//! Query parsing and boolean matching of documents.
//!
//! This module turns a query string into a [`Query`] and evaluates it against
//! field-based documents, including tokenization, stemming, and per-document
//! stem-set caching.

// Module declarations
pub mod cache;
pub mod document;
pub mod matcher;
pub mod query;
pub mod tokenize;

// Public re-exports (used via lib.rs)
pub use cache::AnalyzedDocument;
pub use document::{DEFAULT_FIELDS, Document, FieldList};
pub use matcher::{Explanation, Matcher, Reason, TermPresence, explain, matches, present};
pub use query::{Query, Term, TermKind, TermPrefix, parse};
pub use tokenize::{StemSet, Tokenizer, default_tokenizer, stem, tokenize, tokenize_bytes};
