use serde::{Deserialize, Serialize};

use crate::engine::schema::types::DataType;

/// A literal value carried by a filter predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Timestamp(i64),
    Utf8(String),
}

impl ScalarValue {
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            ScalarValue::Null => None,
            ScalarValue::Boolean(_) => Some(DataType::Int),
            ScalarValue::Int64(_) => Some(DataType::Long),
            ScalarValue::Float64(_) => Some(DataType::Double),
            ScalarValue::Timestamp(_) => Some(DataType::Timestamp),
            ScalarValue::Utf8(_) => Some(DataType::String),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_string())
    }
}

impl From<&serde_json::Value> for ScalarValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ScalarValue::Null,
            serde_json::Value::Bool(b) => ScalarValue::Boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ScalarValue::Int64(i)
                } else {
                    ScalarValue::Float64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => ScalarValue::Utf8(s.clone()),
            // nested values arrive as their serialized form
            other => ScalarValue::Utf8(other.to_string()),
        }
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}
