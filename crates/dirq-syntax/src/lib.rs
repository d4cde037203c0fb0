pub mod ast;
pub mod builder;
pub mod error;
pub mod parser;

pub use ast::{
    expr::{Expression, ExpressionKind},
    literal::Literal,
    operator::{BinaryOperator, LogicalOperator, UnaryOperator},
    span::Span,
};
pub use builder::parse;
pub use error::SyntaxError;
pub use parser::{DirectiveParser, ExpressionParser};
