//! Command implementations behind the CLI.
//!
//! Each command writes to an injected writer so it can run in-process from
//! tests as well as from `main`.

use crate::cli::{Commands, FilterArgs};
use crate::error::Result;
use crate::search::{Explanation, FieldList, Matcher, Query, tokenize};
use anyhow::{Context, anyhow};
use serde::Serialize;
use serde_json::Value;
use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
};

/// Counters reported at the end of a filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Documents evaluated.
    pub scanned: usize,
    pub matched: usize,
    /// Lines that were not JSON objects.
    pub skipped: usize,
}

/// One line of `filter --explain` output.
#[derive(Serialize)]
struct ExplainedLine<'a> {
    line: usize,
    matched: bool,
    #[serde(flatten)]
    explanation: &'a Explanation,
}

/// Runs a parsed command, reading documents from `stdin` unless a file is given.
pub fn run(command: &Commands, stdin: impl BufRead, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Parse { query } => parse_query(query, out),
        Commands::Tokenize { text } => tokenize_text(text, out),
        Commands::Filter(args) => {
            let summary = match &args.input {
                Some(path) => {
                    let file = File::open(path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    filter_documents(args, BufReader::new(file), out)?
                }
                None => filter_documents(args, stdin, out)?,
            };
            tracing::info!(
                scanned = summary.scanned,
                matched = summary.matched,
                skipped = summary.skipped,
                "filter finished"
            );
            Ok(())
        }
    }
}

/// Parses a query, rendering syntax errors with a caret under the offending byte.
pub fn compile_query(qs: &str) -> Result<Query> {
    Query::parse(qs).map_err(|err| anyhow!("{}", err.render(qs)))
}

/// Prints the parsed terms of `qs` as pretty JSON.
pub fn parse_query(qs: &str, out: &mut impl Write) -> Result<()> {
    let query = compile_query(qs)?;
    serde_json::to_writer_pretty(&mut *out, &query).context("failed to serialize query")?;
    writeln!(out)?;
    Ok(())
}

/// Prints the sorted stem set of `text`.
pub fn tokenize_text(text: &str, out: &mut impl Write) -> Result<()> {
    for stem in tokenize(text).sorted() {
        writeln!(out, "{stem}")?;
    }
    Ok(())
}

/// Streams JSON-lines documents from `input`, writing the matching lines
/// (or one explanation per document) to `out`.
pub fn filter_documents(
    args: &FilterArgs,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<FilterSummary> {
    let query = compile_query(&args.query)?;
    let fields = if args.fields.is_empty() {
        FieldList::default()
    } else {
        FieldList::new(args.fields.iter().cloned())
    };
    let matcher = Matcher::default();
    let mut summary = FilterSummary::default();

    tracing::debug!(%query, fields = fields.len(), "filtering documents");

    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("failed to read line {number}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let document: Value = match serde_json::from_str(&line) {
            Ok(document @ Value::Object(_)) => document,
            Ok(_) => {
                tracing::warn!(line = number, "skipping line: not a JSON object");
                summary.skipped += 1;
                continue;
            }
            Err(err) => {
                tracing::warn!(line = number, error = %err, "skipping line: invalid JSON");
                summary.skipped += 1;
                continue;
            }
        };
        summary.scanned += 1;

        if args.explain {
            let explanation = matcher.explain(&query, &document, &fields);
            let matched = explanation.is_match();
            summary.matched += usize::from(matched);
            let record = ExplainedLine {
                line: number,
                matched,
                explanation: &explanation,
            };
            serde_json::to_writer(&mut *out, &record).context("failed to serialize explanation")?;
            writeln!(out)?;
        } else if matcher.matches(&query, &document, &fields) {
            summary.matched += 1;
            writeln!(out, "{line}")?;
        }
    }

    Ok(summary)
}
