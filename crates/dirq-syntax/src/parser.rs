use crate::{ast::expr::Expression, builder, error::SyntaxError};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar/dirq.pest"]
pub struct DirqParser;

/// Turns query text into an expression tree.
///
/// The directive compiler only depends on this capability, so a caller with
/// its own front end can hand over trees built elsewhere.
pub trait ExpressionParser {
    fn parse_expression(&self, input: &str) -> Result<Expression, SyntaxError>;
}

/// Default parser backed by the pest grammar in `grammar/dirq.pest`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectiveParser;

impl ExpressionParser for DirectiveParser {
    fn parse_expression(&self, input: &str) -> Result<Expression, SyntaxError> {
        builder::parse(input)
    }
}
