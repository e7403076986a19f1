use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::NamedGeoEntity;

/// Post-filter over an entity's metadata, applied after the radius cut and
/// the distance sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeFilter {
    /// Field must be present and equal to `value`. Strings compare
    /// case-insensitively.
    Equals { field: String, value: Value },
    /// Field must be numeric and within the inclusive bounds. A missing bound
    /// is open.
    Range {
        field: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
}

impl AttributeFilter {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        AttributeFilter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        AttributeFilter::Range {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn matches(&self, entity: &NamedGeoEntity) -> bool {
        match self {
            AttributeFilter::Equals { field, value } => entity
                .attribute(field)
                .is_some_and(|actual| values_equal(actual, value)),
            AttributeFilter::Range { field, min, max } => entity
                .attribute(field)
                .and_then(numeric_value)
                .is_some_and(|n| within_bounds(n, *min, *max)),
        }
    }
}

fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::String(a), Value::String(b)) => a.eq_ignore_ascii_case(b),
        (Value::Number(_), Value::Number(_)) => numeric_value(actual) == numeric_value(expected),
        _ => actual == expected,
    }
}

fn within_bounds(n: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi)
}

/// Numbers, and strings that parse as numbers (datastores often return
/// numeric columns as text).
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
