//! Error handling types and utilities.

/// A specialized Result type for the command layer.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods in the commands and the binary.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when a query string cannot be parsed.
///
/// Only malformed quoting is rejected; every other input, including the empty
/// string, parses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An opening `"` has no matching closing `"` before the end of input.
    #[error("unclosed quote at byte {position}")]
    UnclosedQuote {
        /// Byte offset of the opening quote.
        position: usize,
    },
}

impl ParseError {
    /// Byte offset in the query string where the error was detected.
    pub const fn position(&self) -> usize {
        match self {
            Self::UnclosedQuote { position } => *position,
        }
    }

    /// Formats the error with the query string and a caret under the offending byte.
    pub fn render(&self, input: &str) -> String {
        let caret = self.position().min(input.len());
        let mut out = format!("query syntax error: {self}\n  {input}\n  {}^", " ".repeat(caret));
        if matches!(self, Self::UnclosedQuote { .. }) {
            out.push_str("\nhint: add a closing quote (\") to complete the phrase");
        }
        out
    }
}

/// Error returned when raw bytes cannot be segmented into words.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// The input is not valid UTF-8.
    #[error("invalid UTF-8 after {valid_up_to} bytes")]
    InvalidUtf8 {
        /// Length of the longest valid UTF-8 prefix.
        valid_up_to: usize,
    },
}

impl From<std::str::Utf8Error> for TokenizeError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}
