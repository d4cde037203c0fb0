//! Tests for building the typed expression tree from query text.

use dirq_syntax::{
    BinaryOperator, ExpressionKind, Literal, LogicalOperator, UnaryOperator, builder::parse,
};

#[test]
fn test_single_call() {
    let expr = parse("select(a, \"b.c\")").unwrap();

    match expr.kind {
        ExpressionKind::Call { callee, arguments } => {
            assert_eq!(callee.as_identifier(), Some("select"));
            assert_eq!(arguments.len(), 2);
            assert_eq!(arguments[0].as_identifier(), Some("a"));
            assert_eq!(
                arguments[1].as_literal(),
                Some(&Literal::String("b.c".to_string()))
            );
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_call_without_arguments() {
    let expr = parse("select()").unwrap();

    match expr.kind {
        ExpressionKind::Call { arguments, .. } => assert!(arguments.is_empty()),
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_sequence_of_calls() {
    let expr = parse("select(a), limit(1), offset(2)").unwrap();

    match expr.kind {
        ExpressionKind::Sequence(calls) => {
            assert_eq!(calls.len(), 3);
            assert!(
                calls
                    .iter()
                    .all(|c| matches!(c.kind, ExpressionKind::Call { .. }))
            );
        }
        other => panic!("Expected sequence, got {:?}", other),
    }
}

#[test]
fn test_membership_with_array() {
    let expr = parse("a nin [1, \"2\", null]").unwrap();

    match expr.kind {
        ExpressionKind::Binary {
            left,
            operator,
            right,
        } => {
            assert_eq!(left.as_identifier(), Some("a"));
            assert_eq!(operator, BinaryOperator::NotIn);
            match right.kind {
                ExpressionKind::Array(elements) => {
                    assert_eq!(elements.len(), 3);
                    assert_eq!(elements[2].as_literal(), Some(&Literal::Null));
                }
                other => panic!("Expected array, got {:?}", other),
            }
        }
        other => panic!("Expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_signed_number_is_unary() {
    let expr = parse("d == -1").unwrap();

    match expr.kind {
        ExpressionKind::Binary { right, .. } => match right.kind {
            ExpressionKind::Unary { operator, argument } => {
                assert_eq!(operator, UnaryOperator::Minus);
                assert_eq!(argument.as_literal(), Some(&Literal::Number(1.0)));
            }
            other => panic!("Expected unary expression, got {:?}", other),
        },
        other => panic!("Expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_abbreviated_decimals() {
    let expr = parse("f(.5, 5., 2.e1)").unwrap();

    match expr.kind {
        ExpressionKind::Call { arguments, .. } => {
            let values: Vec<_> = arguments.iter().map(|a| a.as_literal().cloned()).collect();
            assert_eq!(
                values,
                vec![
                    Some(Literal::Number(0.5)),
                    Some(Literal::Number(5.0)),
                    Some(Literal::Number(20.0)),
                ]
            );
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_trailing_comma_adds_no_argument() {
    let expr = parse("select(a, b,)").unwrap();

    match expr.kind {
        ExpressionKind::Call { arguments, .. } => {
            assert_eq!(arguments.len(), 2);
            assert_eq!(arguments[1].as_identifier(), Some("b"));
        }
        other => panic!("Expected call, got {:?}", other),
    }

    match parse("a in [1, 2,]").unwrap().kind {
        ExpressionKind::Binary { right, .. } => {
            assert!(matches!(right.kind, ExpressionKind::Array(ref e) if e.len() == 2));
        }
        other => panic!("Expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_relational_binds_tighter_than_logical() {
    let expr = parse("a > 1 || b <= 2").unwrap();

    match expr.kind {
        ExpressionKind::Logical {
            left,
            operator,
            right,
        } => {
            assert_eq!(operator, LogicalOperator::Or);
            assert!(matches!(
                left.kind,
                ExpressionKind::Binary {
                    operator: BinaryOperator::GreaterThan,
                    ..
                }
            ));
            assert!(matches!(
                right.kind,
                ExpressionKind::Binary {
                    operator: BinaryOperator::LessOrEqual,
                    ..
                }
            ));
        }
        other => panic!("Expected logical expression, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_sequence_is_kept() {
    let expr = parse("where((a == 1, b == 2))").unwrap();

    match expr.kind {
        ExpressionKind::Call { arguments, .. } => {
            assert_eq!(arguments.len(), 1);
            assert!(matches!(arguments[0].kind, ExpressionKind::Sequence(_)));
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_location() {
    let err = parse("select(a),\n  where(a === 1)").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.format_error().contains("where(a === 1)"));
}

#[test]
fn test_tree_serializes_to_json() {
    let expr = parse("limit(10)").unwrap();
    let json = serde_json::to_value(&expr).unwrap();

    assert!(json.get("kind").is_some());
    assert_eq!(json["span"]["start"], 0);
}
