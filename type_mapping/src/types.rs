//! Type mapping definitions
//!
//! This module provides the runtime values that flow from a filter struct
//! into SQL arguments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A positional argument bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Text(String),
    Int32(i32),
    Int(i64),
    Float32(f32),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Integer view of the value, used for page and limit fields
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int32(v) => Some(i64::from(*v)),
            SqlValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the value equals its type's default
    pub fn is_zero(&self) -> bool {
        match self {
            SqlValue::Text(v) => v.is_empty(),
            SqlValue::Int32(v) => *v == 0,
            SqlValue::Int(v) => *v == 0,
            SqlValue::Float32(v) => *v == 0.0,
            SqlValue::Float(v) => *v == 0.0,
            SqlValue::Bool(v) => !*v,
            SqlValue::Timestamp(v) => *v == DateTime::<Utc>::default(),
        }
    }
}

impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(val: i32) -> Self {
        SqlValue::Int32(val)
    }
}

impl From<i64> for SqlValue {
    fn from(val: i64) -> Self {
        SqlValue::Int(val)
    }
}

impl From<f32> for SqlValue {
    fn from(val: f32) -> Self {
        SqlValue::Float32(val)
    }
}

impl From<f64> for SqlValue {
    fn from(val: f64) -> Self {
        SqlValue::Float(val)
    }
}

impl From<bool> for SqlValue {
    fn from(val: bool) -> Self {
        SqlValue::Bool(val)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(val: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(val)
    }
}

/// The current value of one filter field, already classified by kind
///
/// Each variant carries exactly what its predicate form needs, so the
/// builder never inspects the declared type again.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// string, integer or float compared with a single operand
    Scalar(SqlValue),
    /// `None` when the timestamp is zero or the nullable wrapper is unset
    Temporal(Option<DateTime<Utc>>),
    /// expanded into `IN (?, ?, ...)`
    MultiValue(Vec<SqlValue>),
    /// `None` when the wrapper is unset
    Nullable(Option<SqlValue>),
    /// decodable but never a predicate (plain `bool`)
    ParamOnly(SqlValue),
    Unsupported,
}

/// Trait for converting a filter field into its classified value
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

macro_rules! scalar_field {
    ($($t:ty),+ $(,)?) => {
        $(impl ToFieldValue for $t {
            fn to_field_value(&self) -> FieldValue {
                FieldValue::Scalar(SqlValue::from(self.clone()))
            }
        })+
    };
}

macro_rules! multi_field {
    ($($t:ty),+ $(,)?) => {
        $(impl ToFieldValue for Vec<$t> {
            fn to_field_value(&self) -> FieldValue {
                FieldValue::MultiValue(self.iter().cloned().map(SqlValue::from).collect())
            }
        })+
    };
}

macro_rules! nullable_field {
    ($($t:ty),+ $(,)?) => {
        $(impl ToFieldValue for Option<$t> {
            fn to_field_value(&self) -> FieldValue {
                FieldValue::Nullable(self.clone().map(SqlValue::from))
            }
        })+
    };
}

scalar_field!(String, i32, i64, f32, f64);
multi_field!(String, i32, i64, f32, f64);
nullable_field!(String, i32, i64, f64, bool);

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::ParamOnly(SqlValue::Bool(*self))
    }
}

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> FieldValue {
        // Default (the Unix epoch) is the zero timestamp
        if *self == DateTime::<Utc>::default() {
            FieldValue::Temporal(None)
        } else {
            FieldValue::Temporal(Some(*self))
        }
    }
}

impl ToFieldValue for Option<DateTime<Utc>> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Temporal(*self)
    }
}
