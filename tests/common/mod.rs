//! Shared test fixtures and utilities for integration tests.
//!
//! Documents are built from `(field, text)` pairs; the document-store corpus
//! mirrors the records the host application searches in its own suite.

#![allow(dead_code)] // Each test crate uses a different subset of these helpers

use docstore_textsearch::{FieldList, Query};
use rstest::fixture;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

/// Builds a document from `(field, text)` pairs.
pub fn doc(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(field, text)| ((*field).to_string(), (*text).to_string()))
        .collect()
}

/// Parses a query, panicking with the rendered error on failure.
pub fn query(qs: &str) -> Query {
    Query::parse(qs).unwrap_or_else(|err| panic!("{}", err.render(qs)))
}

/// The fields the document store searches by default.
#[fixture]
pub fn fields() -> FieldList {
    FieldList::new(["title", "content"])
}

/// A small corpus of documents, one per line, as the store would export it.
#[fixture]
pub fn corpus() -> Vec<&'static str> {
    vec![
        r#"{"id": 1, "title": "Ok it works", "content": "lol"}"#,
        r#"{"id": 2, "content": "my two pennies"}"#,
        r#"{"id": 3, "content": "lol lex act ma tch"}"#,
        r#"{"id": 4, "content": "exact match", "tags": "ok"}"#,
        r#"{"id": 5}"#,
    ]
}

/// Writes `lines` to a temporary JSON-lines file.
pub fn jsonl_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    for line in lines {
        writeln!(file, "{line}").expect("write temp file");
    }
    file.flush().expect("flush temp file");
    file
}
