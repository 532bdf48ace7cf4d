//! Full-text query engine for field-based documents.
//!
//! A query string such as `+rust -"old docs" guide` is parsed once into a
//! [`Query`] and then evaluated against any number of [`Document`]s:
//!
//! ```
//! use docstore_textsearch::{FieldList, Query, matches};
//! use serde_json::json;
//!
//! let query = Query::parse("ok -lol").unwrap();
//! let fields = FieldList::default();
//! assert!(matches(&query, &json!({"title": "Ok it works"}), &fields));
//! assert!(!matches(&query, &json!({"content": "ok lol"}), &fields));
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod search;
pub mod tracing;

pub use error::{ParseError, TokenizeError};
pub use search::{
    AnalyzedDocument, Document, Explanation, FieldList, Matcher, Query, Reason, StemSet, Term,
    TermKind, TermPrefix, Tokenizer, explain, matches, parse, present, stem, tokenize,
    tokenize_bytes,
};
