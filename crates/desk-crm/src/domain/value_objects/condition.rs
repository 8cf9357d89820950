//! Segment Condition Value Object
//!
//! An atomic filter predicate: field, operator, comparison value and the
//! declared kind the comparison should be performed under. Conditions are
//! definition data only; evaluation lives in the segmentation engine.

use serde::{Deserialize, Serialize};

/// One atomic filter condition inside a segment definition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Field path on the target record; dotted paths reach nested
    /// structures (e.g. `visitorContactInfo.email`)
    pub field: String,
    pub operator: Operator,
    /// Comparison value, always carried as a string and parsed per `kind`
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
}

impl Condition {
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
        kind: ValueKind,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
            kind,
        }
    }
}

/// Condition operator, serialized with the compact wire codes the
/// front end sends (`c` = contains, `dne` = does not equal, ...).
///
/// `Unknown` absorbs any unrecognized code so a malformed definition
/// deserializes instead of erroring; the evaluator treats it as a
/// condition that never matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "e")]
    Equals,
    #[serde(rename = "dne")]
    NotEquals,
    #[serde(rename = "c")]
    Contains,
    #[serde(rename = "dnc")]
    NotContains,
    #[serde(rename = "igt")]
    GreaterThan,
    #[serde(rename = "ilt")]
    LessThan,
    #[serde(rename = "it")]
    IsTrue,
    #[serde(rename = "if")]
    IsFalse,
    #[serde(rename = "is")]
    IsSet,
    #[serde(rename = "ins")]
    IsNotSet,
    #[serde(other)]
    Unknown,
}

/// Declared comparison kind for a condition value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Date,
    Boolean,
    #[serde(other)]
    Unknown,
}
