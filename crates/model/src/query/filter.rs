use crate::core::value::Value;
use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};
use std::fmt;

/// Canonical comparison operators of a filter leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
    Ne,
    In,
    Nin,
}

impl ComparisonOp {
    pub fn name(&self) -> &'static str {
        match self {
            ComparisonOp::Gt => "gt",
            ComparisonOp::Lt => "lt",
            ComparisonOp::Gte => "gte",
            ComparisonOp::Lte => "lte",
            ComparisonOp::Eq => "eq",
            ComparisonOp::Ne => "ne",
            ComparisonOp::In => "in",
            ComparisonOp::Nin => "nin",
        }
    }

    /// Key used on the wire, e.g. `$gte`.
    pub fn key(&self) -> String {
        format!("${}", self.name())
    }

    /// `in` and `nin` compare against a list of values.
    pub fn takes_list(&self) -> bool {
        matches!(self, ComparisonOp::In | ComparisonOp::Nin)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn name(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }

    pub fn key(&self) -> String {
        format!("${}", self.name())
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Operand {
    Scalar(Value),
    List(Vec<Value>),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Scalar(value) => write!(f, "{}", value),
            Operand::List(values) => {
                let items = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{}]", items)
            }
        }
    }
}

/// Compiled `where` tree. Negation never appears as a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Comparison {
        field: String,
        operator: ComparisonOp,
        value: Operand,
    },
    Logical {
        operator: LogicalOp,
        operands: Vec<Filter>,
    },
}

impl Filter {
    pub fn compare(field: impl Into<String>, operator: ComparisonOp, value: Operand) -> Self {
        Filter::Comparison {
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn and(operands: Vec<Filter>) -> Self {
        Filter::Logical {
            operator: LogicalOp::And,
            operands,
        }
    }

    pub fn or(operands: Vec<Filter>) -> Self {
        Filter::Logical {
            operator: LogicalOp::Or,
            operands,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Comparison {
                field,
                operator,
                value,
            } => write!(f, "{} {} {}", field, operator, value),
            Filter::Logical { operator, operands } => {
                let separator = format!(" {} ", operator);
                let parts = operands
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(separator.as_str());
                write!(f, "({})", parts)
            }
        }
    }
}

struct OperatorEntry<'a> {
    operator: ComparisonOp,
    value: &'a Operand,
}

impl Serialize for OperatorEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.operator.key(), self.value)?;
        map.end()
    }
}

struct Operands<'a>(&'a [Filter]);

impl Serialize for Operands<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for operand in self.0 {
            seq.serialize_element(operand)?;
        }
        seq.end()
    }
}

/// `{"field": {"$op": value}}` for leaves, `{"$and": [...]}` for combinators.
impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Filter::Comparison {
                field,
                operator,
                value,
            } => {
                let entry = OperatorEntry {
                    operator: *operator,
                    value,
                };
                map.serialize_entry(field, &entry)?;
            }
            Filter::Logical { operator, operands } => {
                map.serialize_entry(&operator.key(), &Operands(operands))?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eq(field: &str, value: i64) -> Filter {
        Filter::compare(field, ComparisonOp::Eq, Operand::Scalar(Value::Int(value)))
    }

    #[test]
    fn test_comparison_wire_shape() {
        let filter = Filter::compare("a.b.c", ComparisonOp::Ne, Operand::Scalar("x".into()));
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"a.b.c": {"$ne": "x"}})
        );
    }

    #[test]
    fn test_list_operand_wire_shape() {
        let filter = Filter::compare(
            "status",
            ComparisonOp::Nin,
            Operand::List(vec![Value::Int(1), Value::from("two"), Value::Null]),
        );
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"status": {"$nin": [1, "two", null]}})
        );
    }

    #[test]
    fn test_logical_wire_shape() {
        let filter = Filter::or(vec![eq("a", 1), Filter::and(vec![eq("b", 2), eq("c", 3)])]);
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"$or": [
                {"a": {"$eq": 1}},
                {"$and": [{"b": {"$eq": 2}}, {"c": {"$eq": 3}}]}
            ]})
        );
    }

    #[test]
    fn test_display() {
        let filter = Filter::and(vec![eq("a", 1), eq("b", 2)]);
        assert_eq!(filter.to_string(), "(a eq 1 and b eq 2)");

        let filter = Filter::compare(
            "c",
            ComparisonOp::Nin,
            Operand::List(vec![Value::Int(1), Value::from("x")]),
        );
        assert_eq!(filter.to_string(), "c nin [1, \"x\"]");
    }

    #[test]
    fn test_operator_keys() {
        assert_eq!(ComparisonOp::Gte.key(), "$gte");
        assert_eq!(LogicalOp::Or.key(), "$or");
        assert!(ComparisonOp::In.takes_list());
        assert!(!ComparisonOp::Lt.takes_list());
    }
}
