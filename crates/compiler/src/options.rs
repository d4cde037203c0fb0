use serde::{Deserialize, Serialize};

/// What to do when a directive appears more than once in one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later occurrence replaces the earlier one.
    #[default]
    Overwrite,
    Reject,
}

/// How `limit` and `offset` read their literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerParsing {
    /// Leading-integer parse: `"12abc"` reads as 12, `3.7` as 3.
    #[default]
    Lenient,
    /// The whole literal must be an integer.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub duplicates: DuplicatePolicy,
    pub integers: IntegerParsing,
}

impl CompileOptions {
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_integers(mut self, integers: IntegerParsing) -> Self {
        self.integers = integers;
        self
    }
}
