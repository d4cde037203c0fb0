use crate::query::{filter::Filter, order::OrderEntry};
use serde::Serialize;

/// Store-neutral result of compiling one query.
///
/// Every field is optional and is only present when the matching directive
/// appeared in the query. `where_fields` is present exactly when `filter` is.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Vec<String>>,

    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub where_fields: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<OrderEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::value::Value,
        query::filter::{ComparisonOp, Operand},
    };
    use serde_json::json;

    #[test]
    fn test_empty_descriptor_serializes_to_empty_object() {
        let descriptor = QueryDescriptor::default();
        assert_eq!(serde_json::to_string(&descriptor).unwrap(), "{}");
    }

    #[test]
    fn test_descriptor_keys() {
        let descriptor = QueryDescriptor {
            select: Some(vec!["a".into()]),
            filter: Some(Filter::compare(
                "d",
                ComparisonOp::Eq,
                Operand::Scalar(Value::Int(-1)),
            )),
            where_fields: Some(vec!["d".into()]),
            order: Some(vec![OrderEntry::descending("d")]),
            extend: Some(vec![]),
            limit: Some(0),
            offset: None,
        };

        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "select": ["a"],
                "where": {"d": {"$eq": -1}},
                "whereFields": ["d"],
                "order": [{"d": -1}],
                "extend": [],
                "limit": 0
            })
        );
    }
}
