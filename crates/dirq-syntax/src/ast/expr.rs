use crate::ast::{
    literal::Literal,
    operator::{BinaryOperator, LogicalOperator, UnaryOperator},
    span::Span,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Expression { kind, span }
    }

    /// Character offset of the node in the query source.
    pub fn offset(&self) -> usize {
        self.span.start
    }

    pub fn identifier(name: &str, span: Span) -> Self {
        Expression::new(ExpressionKind::Identifier(name.to_string()), span)
    }

    pub fn literal(literal: Literal, span: Span) -> Self {
        Expression::new(ExpressionKind::Literal(literal), span)
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            ExpressionKind::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    /// Short name of the node shape, used in diagnostics.
    pub fn shape(&self) -> &'static str {
        match &self.kind {
            ExpressionKind::Identifier(_) => "identifier",
            ExpressionKind::Literal(_) => "literal",
            ExpressionKind::Unary { .. } => "unary expression",
            ExpressionKind::Binary { .. } => "binary expression",
            ExpressionKind::Logical { .. } => "logical expression",
            ExpressionKind::Array(_) => "array",
            ExpressionKind::Call { .. } => "call",
            ExpressionKind::Sequence(_) => "sequence",
        }
    }
}

/// Expression node shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    Identifier(String),
    Literal(Literal),
    Unary {
        operator: UnaryOperator,
        argument: Box<Expression>,
    },
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    Logical {
        left: Box<Expression>,
        operator: LogicalOperator,
        right: Box<Expression>,
    },
    Array(Vec<Expression>),
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Sequence(Vec<Expression>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_accessors() {
        let span = Span::new(4, 9, 1, 5);
        let ident = Expression::identifier("field", span);

        assert_eq!(ident.as_identifier(), Some("field"));
        assert_eq!(ident.as_literal(), None);
        assert_eq!(ident.offset(), 4);
        assert_eq!(ident.shape(), "identifier");
    }
}
