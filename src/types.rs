//! Core value types for conversion.
//!
//! Every parsed CSV cell becomes a [`Value`]: a closed union of the JSON-level
//! kinds the converter can produce. The integer/float split exists so the
//! metadata type summary can distinguish `integer` from `number` columns.

/// A single typed cell value produced by field coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value, or a member of the configured null vocabulary.
    Null,
    /// Boolean, from the fixed true/false token sets.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float (decimal or scientific notation, or integer overflow).
    Float64(f64),
    /// UTF-8 string (including normalized date-time strings).
    Utf8(String),
}

/// JSON-level kind of a [`Value`], as reported in the metadata type summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Date,
}

impl ValueKind {
    /// Stable lowercase name used in metadata summaries.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Date => "date",
        }
    }
}

impl Value {
    /// Classify this value for the metadata type summary.
    ///
    /// Strings are reported as [`ValueKind::String`] here; the metadata pass
    /// upgrades date-shaped strings to [`ValueKind::Date`] separately.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Int64(_) => ValueKind::Integer,
            Value::Float64(_) => ValueKind::Number,
            Value::Utf8(_) => ValueKind::String,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int64(n) => serde_json::Value::from(*n),
            // Coercion only admits finite floats, so `from` never produces Null here.
            Value::Float64(n) => serde_json::Value::from(*n),
            Value::Utf8(s) => serde_json::Value::String(s.clone()),
        }
    }
}
