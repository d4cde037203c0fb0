//! Token tables for the `where` compiler.
//!
//! `OPERATORS` maps a source token to its canonical operator. `INVERSES` maps a
//! token to the token of its logical negation, which is how `!` is compiled
//! away without a negation node.

use model::query::filter::{ComparisonOp, LogicalOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Comparison(ComparisonOp),
    Logical(LogicalOp),
}

pub const OPERATORS: &[(&str, Operator)] = &[
    (">", Operator::Comparison(ComparisonOp::Gt)),
    ("<", Operator::Comparison(ComparisonOp::Lt)),
    (">=", Operator::Comparison(ComparisonOp::Gte)),
    ("<=", Operator::Comparison(ComparisonOp::Lte)),
    ("==", Operator::Comparison(ComparisonOp::Eq)),
    ("!=", Operator::Comparison(ComparisonOp::Ne)),
    ("in", Operator::Comparison(ComparisonOp::In)),
    ("nin", Operator::Comparison(ComparisonOp::Nin)),
    ("&&", Operator::Logical(LogicalOp::And)),
    ("||", Operator::Logical(LogicalOp::Or)),
];

pub const INVERSES: &[(&str, &str)] = &[
    (">", "<="),
    ("<", ">="),
    (">=", "<"),
    ("<=", ">"),
    ("==", "!="),
    ("!=", "=="),
    ("in", "nin"),
    ("nin", "in"),
    ("&&", "||"),
    ("||", "&&"),
];

pub fn lookup(token: &str) -> Option<Operator> {
    OPERATORS
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, op)| *op)
}

pub fn inverse(token: &str) -> Option<&'static str> {
    INVERSES
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, inv)| *inv)
}

/// Canonical operator for `token`, negated when `inverted` is set.
pub fn resolve(token: &str, inverted: bool) -> Option<Operator> {
    if inverted {
        inverse(token).and_then(lookup)
    } else {
        lookup(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operator_has_an_inverse() {
        for (token, _) in OPERATORS {
            let inv = inverse(token).unwrap();
            assert_eq!(inverse(inv), Some(*token), "inverse of {} is not an involution", token);
            assert!(lookup(inv).is_some());
        }
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve(">", false),
            Some(Operator::Comparison(ComparisonOp::Gt))
        );
        assert_eq!(
            resolve(">", true),
            Some(Operator::Comparison(ComparisonOp::Lte))
        );
        assert_eq!(resolve("&&", true), Some(Operator::Logical(LogicalOp::Or)));
        assert_eq!(resolve("===", false), None);
        assert_eq!(resolve("+", true), None);
    }
}
