use crate::{CompileError, fields::field_name};
use dirq_syntax::ast::{
    expr::{Expression, ExpressionKind},
    operator::UnaryOperator,
};
use model::query::order::{OrderEntry, SortDirection};

pub(crate) fn compile_order(arguments: &[Expression]) -> Result<Vec<OrderEntry>, CompileError> {
    arguments
        .iter()
        .enumerate()
        .map(|(index, arg)| {
            order_entry(arg).ok_or(CompileError::InvalidOrderArgument {
                index,
                offset: arg.offset(),
            })
        })
        .collect()
}

/// `field`, `+field` or `-field`, where field is an identifier or string.
fn order_entry(arg: &Expression) -> Option<OrderEntry> {
    let (target, direction) = match &arg.kind {
        ExpressionKind::Unary {
            operator: UnaryOperator::Plus,
            argument,
        } => (argument.as_ref(), SortDirection::Ascending),
        ExpressionKind::Unary {
            operator: UnaryOperator::Minus,
            argument,
        } => (argument.as_ref(), SortDirection::Descending),
        _ => (arg, SortDirection::Ascending),
    };

    field_name(target).map(|field| OrderEntry::new(field, direction))
}
