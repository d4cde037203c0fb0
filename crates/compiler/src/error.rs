use crate::directive::Directive;
use dirq_syntax::SyntaxError;
use thiserror::Error;

/// Failure of a single compile attempt. Nothing is recovered internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Malformed query at offset {offset}: expected a directive call or a sequence of directive calls")]
    MalformedQuery { offset: usize },

    #[error("Unknown directive '{name}' at offset {offset}")]
    UnknownDirective { name: String, offset: usize },

    #[error("Directive '{name}' appears more than once (offset {offset})")]
    DuplicateDirective { name: String, offset: usize },

    #[error("Invalid argument {index} to {directive} at offset {offset}: expected an identifier or a string")]
    InvalidFieldArgument {
        directive: Directive,
        index: usize,
        offset: usize,
    },

    #[error("Invalid argument {index} to order at offset {offset}: expected a field, optionally prefixed with '+' or '-'")]
    InvalidOrderArgument { index: usize, offset: usize },

    #[error("Invalid array element {index} at offset {offset}: expected a literal")]
    InvalidArrayElement { index: usize, offset: usize },

    #[error("Invalid argument to {directive} at offset {offset}: expected a non-negative integer")]
    InvalidIntegerArgument { directive: Directive, offset: usize },

    #[error("Invalid comparison at offset {offset}: left-hand side must be an identifier or a string")]
    InvalidComparisonField { offset: usize },

    #[error("Unknown operator '{operator}' at offset {offset}")]
    UnknownOperator { operator: String, offset: usize },

    #[error("Type mismatch at offset {offset}: expected {expected}")]
    TypeMismatch {
        expected: &'static str,
        offset: usize,
    },

    #[error("{directive} expects {expected} argument(s), found {found}")]
    ArityMismatch {
        directive: Directive,
        expected: &'static str,
        found: usize,
    },

    #[error("Unsupported expression at offset {offset}")]
    UnknownExpression { offset: usize },
}

impl CompileError {
    /// Byte offset into the query text, when the failure has one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            CompileError::EmptyQuery | CompileError::ArityMismatch { .. } => None,
            CompileError::Syntax(err) => Some(err.offset),
            CompileError::MalformedQuery { offset }
            | CompileError::UnknownDirective { offset, .. }
            | CompileError::DuplicateDirective { offset, .. }
            | CompileError::InvalidFieldArgument { offset, .. }
            | CompileError::InvalidOrderArgument { offset, .. }
            | CompileError::InvalidArrayElement { offset, .. }
            | CompileError::InvalidIntegerArgument { offset, .. }
            | CompileError::InvalidComparisonField { offset }
            | CompileError::UnknownOperator { offset, .. }
            | CompileError::TypeMismatch { offset, .. }
            | CompileError::UnknownExpression { offset } => Some(*offset),
        }
    }
}
