use crate::{
    CompileError,
    directive::Directive,
    fields::field_name,
    normalize::normalize,
    operators::{self, Operator},
};
use dirq_syntax::ast::{
    expr::{Expression, ExpressionKind},
    literal::Literal,
    operator::UnaryOperator,
};
use indexmap::IndexSet;
use model::{
    core::value::Value,
    query::filter::{ComparisonOp, Filter, LogicalOp, Operand},
};
use tracing::debug;

#[derive(Debug)]
pub(crate) struct CompiledWhere {
    pub filter: Filter,
    pub fields: Vec<String>,
}

/// Compiles the arguments of `where`. Several arguments are joined by an
/// implicit `and`; the result is normalized.
pub(crate) fn compile_where(arguments: &[Expression]) -> Result<CompiledWhere, CompileError> {
    if arguments.is_empty() {
        return Err(CompileError::ArityMismatch {
            directive: Directive::Where,
            expected: "at least 1",
            found: 0,
        });
    }

    let mut compiler = WhereCompiler::default();
    let mut nodes = arguments
        .iter()
        .map(|arg| compiler.compile(arg, false))
        .collect::<Result<Vec<_>, _>>()?;

    let root = match nodes.len() {
        1 => nodes.remove(0),
        _ => Filter::and(nodes),
    };
    let filter = normalize(root);
    let fields: Vec<String> = compiler.fields.into_iter().collect();

    debug!(filter = %filter, fields = ?fields, "Compiled where clause");

    Ok(CompiledWhere { filter, fields })
}

/// Literal value, or a number literal under a single `+`/`-`.
pub(crate) fn scalar_value(expr: &Expression) -> Option<Value> {
    match &expr.kind {
        ExpressionKind::Literal(literal) => Some(literal_value(literal)),
        ExpressionKind::Unary { operator, argument } if operator.is_sign() => {
            match argument.as_literal()? {
                Literal::Number(n) if *operator == UnaryOperator::Minus => {
                    Some(Value::from_number(-n))
                }
                Literal::Number(n) => Some(Value::from_number(*n)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Number(n) => Value::from_number(*n),
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Null => Value::Null,
    }
}

#[derive(Debug, Default)]
struct WhereCompiler {
    fields: IndexSet<String>,
}

impl WhereCompiler {
    /// `inverted` is the parity of the `!` operators enclosing `expr`.
    fn compile(&mut self, expr: &Expression, inverted: bool) -> Result<Filter, CompileError> {
        match &expr.kind {
            ExpressionKind::Unary {
                operator: UnaryOperator::Not,
                argument,
            } => self.compile(argument, !inverted),
            ExpressionKind::Unary { operator, .. } => Err(CompileError::UnknownOperator {
                operator: operator.token().to_string(),
                offset: expr.offset(),
            }),
            ExpressionKind::Binary {
                left,
                operator,
                right,
            } => {
                let op = match operators::resolve(operator.token(), inverted) {
                    Some(Operator::Comparison(op)) => op,
                    _ => {
                        return Err(CompileError::UnknownOperator {
                            operator: operator.token().to_string(),
                            offset: expr.offset(),
                        });
                    }
                };
                self.compile_comparison(left, op, right)
            }
            ExpressionKind::Logical {
                left,
                operator,
                right,
            } => {
                let op = match operators::resolve(operator.token(), inverted) {
                    Some(Operator::Logical(op)) => op,
                    _ => {
                        return Err(CompileError::UnknownOperator {
                            operator: operator.token().to_string(),
                            offset: expr.offset(),
                        });
                    }
                };
                let left = self.compile(left, inverted)?;
                let right = self.compile(right, inverted)?;
                Ok(match op {
                    LogicalOp::And => Filter::and(vec![left, right]),
                    LogicalOp::Or => Filter::or(vec![left, right]),
                })
            }
            _ => Err(CompileError::UnknownExpression {
                offset: expr.offset(),
            }),
        }
    }

    fn compile_comparison(
        &mut self,
        left: &Expression,
        operator: ComparisonOp,
        right: &Expression,
    ) -> Result<Filter, CompileError> {
        let field = field_name(left).ok_or(CompileError::InvalidComparisonField {
            offset: left.offset(),
        })?;

        let value = match &right.kind {
            ExpressionKind::Array(elements) => {
                if !operator.takes_list() {
                    return Err(CompileError::TypeMismatch {
                        expected: "a scalar value",
                        offset: right.offset(),
                    });
                }
                let values = elements
                    .iter()
                    .enumerate()
                    .map(|(index, element)| {
                        scalar_value(element).ok_or(CompileError::InvalidArrayElement {
                            index,
                            offset: element.offset(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Operand::List(values)
            }
            _ => {
                if operator.takes_list() {
                    return Err(CompileError::TypeMismatch {
                        expected: "an array",
                        offset: right.offset(),
                    });
                }
                let value = scalar_value(right).ok_or(CompileError::TypeMismatch {
                    expected: "a literal, a signed number or an array",
                    offset: right.offset(),
                })?;
                Operand::Scalar(value)
            }
        };

        if !self.fields.contains(field) {
            self.fields.insert(field.to_string());
        }

        Ok(Filter::compare(field, operator, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirq_syntax::parse;

    fn compile(query: &str) -> Result<CompiledWhere, CompileError> {
        match parse(query).unwrap().kind {
            ExpressionKind::Call { arguments, .. } => compile_where(&arguments),
            other => panic!("Expected call, got {:?}", other),
        }
    }

    fn leaf(field: &str, operator: ComparisonOp, value: Value) -> Filter {
        Filter::compare(field, operator, Operand::Scalar(value))
    }

    #[test]
    fn test_single_comparison() {
        let compiled = compile("where(age >= 18)").unwrap();
        assert_eq!(
            compiled.filter,
            leaf("age", ComparisonOp::Gte, Value::Int(18))
        );
        assert_eq!(compiled.fields, vec!["age"]);
    }

    #[test]
    fn test_string_field_and_signed_number() {
        let compiled = compile(r#"where("a.b" < -2.5)"#).unwrap();
        assert_eq!(
            compiled.filter,
            leaf("a.b", ComparisonOp::Lt, Value::Float(-2.5))
        );

        let compiled = compile("where(a == +3)").unwrap();
        assert_eq!(compiled.filter, leaf("a", ComparisonOp::Eq, Value::Int(3)));
    }

    #[test]
    fn test_negation_inverts_operators() {
        let cases = [
            ("where(!(a > 1))", ComparisonOp::Lte),
            ("where(!(a < 1))", ComparisonOp::Gte),
            ("where(!(a >= 1))", ComparisonOp::Lt),
            ("where(!(a <= 1))", ComparisonOp::Gt),
            ("where(!(a == 1))", ComparisonOp::Ne),
            ("where(!(a != 1))", ComparisonOp::Eq),
            ("where(!!(a > 1))", ComparisonOp::Gt),
        ];
        for (query, expected) in cases {
            let compiled = compile(query).unwrap();
            assert_eq!(
                compiled.filter,
                leaf("a", expected, Value::Int(1)),
                "wrong operator for {}",
                query
            );
        }
    }

    #[test]
    fn test_negated_membership() {
        let compiled = compile("where(!(a in [1, 'x']))").unwrap();
        assert_eq!(
            compiled.filter,
            Filter::compare(
                "a",
                ComparisonOp::Nin,
                Operand::List(vec![Value::Int(1), Value::from("x")])
            )
        );
    }

    #[test]
    fn test_de_morgan() {
        let compiled = compile("where(!(a == 1 && b == 2))").unwrap();
        assert_eq!(
            compiled.filter,
            Filter::or(vec![
                leaf("a", ComparisonOp::Ne, Value::Int(1)),
                leaf("b", ComparisonOp::Ne, Value::Int(2)),
            ])
        );
    }

    #[test]
    fn test_multiple_arguments_are_conjoined() {
        let compiled = compile("where(a == 1, b == 2 && c == 3)").unwrap();
        assert_eq!(
            compiled.filter,
            Filter::and(vec![
                leaf("a", ComparisonOp::Eq, Value::Int(1)),
                leaf("b", ComparisonOp::Eq, Value::Int(2)),
                leaf("c", ComparisonOp::Eq, Value::Int(3)),
            ])
        );
    }

    #[test]
    fn test_fields_are_unique_in_first_occurrence_order() {
        let compiled = compile("where(b == 1 || a == 2 || b == 3 || c > 4 && a < 5)").unwrap();
        assert_eq!(compiled.fields, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_scalar_values() {
        let compiled = compile("where(a == null, b != true, c == 'x')").unwrap();
        assert_eq!(
            compiled.filter,
            Filter::and(vec![
                leaf("a", ComparisonOp::Eq, Value::Null),
                leaf("b", ComparisonOp::Ne, Value::Boolean(true)),
                leaf("c", ComparisonOp::Eq, Value::from("x")),
            ])
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            compile("where()").unwrap_err(),
            CompileError::ArityMismatch {
                directive: Directive::Where,
                found: 0,
                ..
            }
        ));
        assert!(matches!(
            compile("where(a in [1, 2, [3]])").unwrap_err(),
            CompileError::InvalidArrayElement { index: 2, .. }
        ));
        assert!(matches!(
            compile("where(a in [b])").unwrap_err(),
            CompileError::InvalidArrayElement { index: 0, .. }
        ));
        assert!(matches!(
            compile("where(a in 1)").unwrap_err(),
            CompileError::TypeMismatch { .. }
        ));
        assert!(matches!(
            compile("where(a == [1])").unwrap_err(),
            CompileError::TypeMismatch { .. }
        ));
        assert!(matches!(
            compile("where(a == b)").unwrap_err(),
            CompileError::TypeMismatch { .. }
        ));
        assert!(matches!(
            compile("where(a == -'x')").unwrap_err(),
            CompileError::TypeMismatch { .. }
        ));
        assert!(matches!(
            compile("where(a == --1)").unwrap_err(),
            CompileError::TypeMismatch { .. }
        ));
        assert!(matches!(
            compile("where(1 == a)").unwrap_err(),
            CompileError::InvalidComparisonField { offset: 6 }
        ));
        assert!(matches!(
            compile("where(-(a == 1))").unwrap_err(),
            CompileError::UnknownOperator { .. }
        ));
        assert!(matches!(
            compile("where(a)").unwrap_err(),
            CompileError::UnknownExpression { offset: 6 }
        ));
        assert!(matches!(
            compile("where(f(a))").unwrap_err(),
            CompileError::UnknownExpression { .. }
        ));
    }
}
