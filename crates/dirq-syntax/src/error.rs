use crate::parser::Rule;
use pest::{
    error::{Error as PestError, InputLocation, LineColLocation},
    iterators::Pair,
};
use thiserror::Error;

/// Failure to turn query text into an expression tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Syntax error at line {line}, column {column} (offset {offset}): {message}")]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    pub source_snippet: String,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: usize, column: usize, offset: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            offset,
            source_snippet: String::new(),
        }
    }

    pub fn at(message: impl Into<String>, pair: &Pair<Rule>) -> Self {
        let (line, column) = pair.line_col();
        let mut err = Self::new(message, line, column, pair.as_span().start());
        err.source_snippet = pair
            .as_span()
            .start_pos()
            .line_of()
            .trim_end_matches(['\r', '\n'])
            .to_string();
        err
    }

    pub fn from_pest_error(err: PestError<Rule>) -> Self {
        let (line, column) = match err.line_col {
            LineColLocation::Pos((l, c)) => (l, c),
            LineColLocation::Span((l, c), _) => (l, c),
        };
        let offset = match err.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };

        SyntaxError {
            message: format!("{}", err.variant),
            line,
            column,
            offset,
            source_snippet: err.line().to_string(),
        }
    }

    /// Format error with context for display
    pub fn format_error(&self) -> String {
        if self.source_snippet.is_empty() {
            return self.to_string();
        }

        format!(
            "Syntax error at line {}, column {}:\n{}\n{}^\n{}",
            self.line,
            self.column,
            self.source_snippet,
            " ".repeat(self.column.saturating_sub(1)),
            self.message
        )
    }
}
