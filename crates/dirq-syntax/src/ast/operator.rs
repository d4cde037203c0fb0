use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison and membership operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    In,
    NotIn,
}

impl BinaryOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "==" => BinaryOperator::Equal,
            "!=" => BinaryOperator::NotEqual,
            ">" => BinaryOperator::GreaterThan,
            "<" => BinaryOperator::LessThan,
            ">=" => BinaryOperator::GreaterOrEqual,
            "<=" => BinaryOperator::LessOrEqual,
            "in" => BinaryOperator::In,
            "nin" => BinaryOperator::NotIn,
            _ => return None,
        })
    }

    pub fn token(&self) -> &'static str {
        match self {
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterOrEqual => ">=",
            BinaryOperator::LessOrEqual => "<=",
            BinaryOperator::In => "in",
            BinaryOperator::NotIn => "nin",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn token(&self) -> &'static str {
        match self {
            LogicalOperator::And => "&&",
            LogicalOperator::Or => "||",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Plus,
    Minus,
}

impl UnaryOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "!" => UnaryOperator::Not,
            "+" => UnaryOperator::Plus,
            "-" => UnaryOperator::Minus,
            _ => return None,
        })
    }

    pub fn token(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        }
    }

    /// `+` and `-`, the operators allowed in front of numbers and sort keys.
    pub fn is_sign(&self) -> bool {
        matches!(self, UnaryOperator::Plus | UnaryOperator::Minus)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operator_display() {
        assert_eq!(format!("{}", BinaryOperator::Equal), "==");
        assert_eq!(format!("{}", BinaryOperator::NotIn), "nin");
        assert_eq!(format!("{}", BinaryOperator::GreaterOrEqual), ">=");
    }

    #[test]
    fn test_binary_operator_token_roundtrip() {
        for op in [
            BinaryOperator::Equal,
            BinaryOperator::NotEqual,
            BinaryOperator::GreaterThan,
            BinaryOperator::LessThan,
            BinaryOperator::GreaterOrEqual,
            BinaryOperator::LessOrEqual,
            BinaryOperator::In,
            BinaryOperator::NotIn,
        ] {
            assert_eq!(BinaryOperator::from_token(op.token()), Some(op));
        }
        assert_eq!(BinaryOperator::from_token("==="), None);
    }

    #[test]
    fn test_unary_sign() {
        assert!(UnaryOperator::Minus.is_sign());
        assert!(UnaryOperator::Plus.is_sign());
        assert!(!UnaryOperator::Not.is_sign());
    }
}
