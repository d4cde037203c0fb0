use crate::{CompileError, directive::Directive};
use dirq_syntax::ast::{
    expr::{Expression, ExpressionKind},
    literal::Literal,
};

/// Field name of an identifier or string literal.
pub(crate) fn field_name(expr: &Expression) -> Option<&str> {
    match &expr.kind {
        ExpressionKind::Identifier(name) => Some(name),
        ExpressionKind::Literal(Literal::String(name)) => Some(name),
        _ => None,
    }
}

/// Arguments of `select` and `extend`, in order, duplicates kept.
pub(crate) fn compile_field_list(
    directive: Directive,
    arguments: &[Expression],
) -> Result<Vec<String>, CompileError> {
    arguments
        .iter()
        .enumerate()
        .map(|(index, arg)| {
            field_name(arg)
                .map(str::to_string)
                .ok_or(CompileError::InvalidFieldArgument {
                    directive,
                    index,
                    offset: arg.offset(),
                })
        })
        .collect()
}
