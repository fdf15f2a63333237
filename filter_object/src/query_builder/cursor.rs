//! Field cursor
//!
//! A cursor views one filter field (its descriptor and current value) and
//! turns it into at most one predicate. Absent, zero and unsupported values
//! produce nothing.

use type_mapping::{FieldValue, SqlValue};

use crate::query_builder::operand::Operand;
use crate::query_builder::sql_generation::SqlGenerator;
use crate::traits::{FieldDescriptor, LIMIT_PARAM, PAGE_PARAM, SORT_BY_PARAM};

/// How a clause carries its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseForm {
    /// `?` placeholders, one per argument
    Bound,
    /// Escaped literal embedded in the text, no arguments
    Inline,
}

/// One predicate contributed by a field
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub text: String,
    pub args: Vec<SqlValue>,
    pub form: ClauseForm,
}

impl Clause {
    /// Placeholder-form clause
    ///
    /// # Panics
    ///
    /// Panics if the placeholder count differs from the argument count.
    pub fn bound(text: String, args: Vec<SqlValue>) -> Self {
        assert_eq!(
            SqlGenerator::count_placeholders(&text),
            args.len(),
            "placeholder count mismatch in `{}`",
            text
        );
        Self {
            text,
            args,
            form: ClauseForm::Bound,
        }
    }

    pub fn inline(text: String) -> Self {
        Self {
            text,
            args: Vec::new(),
            form: ClauseForm::Inline,
        }
    }
}

/// Something that can turn itself into a predicate for a field
pub trait PredicateProducer {
    /// `None` means the field contributes nothing
    fn produce(&self, cursor: &FieldCursor<'_>) -> Option<Clause>;
}

impl PredicateProducer for FieldValue {
    fn produce(&self, cursor: &FieldCursor<'_>) -> Option<Clause> {
        match self {
            FieldValue::Scalar(value) if value.is_zero() => None,
            FieldValue::Scalar(value) => cursor.scalar_clause(value),
            FieldValue::Temporal(Some(ts)) => cursor.scalar_clause(&SqlValue::Timestamp(*ts)),
            FieldValue::Temporal(None) => None,
            FieldValue::MultiValue(values) => cursor.multi_clause(values),
            // A present wrapper is a predicate even when it holds a zero value
            FieldValue::Nullable(Some(value)) => cursor.scalar_clause(value),
            FieldValue::Nullable(None) => None,
            FieldValue::ParamOnly(_) | FieldValue::Unsupported => None,
        }
    }
}

/// View over one field of a filter struct
#[derive(Debug, Clone)]
pub struct FieldCursor<'a> {
    descriptor: &'a FieldDescriptor,
    value: FieldValue,
}

impl<'a> FieldCursor<'a> {
    pub fn new(descriptor: &'a FieldDescriptor, value: FieldValue) -> Self {
        Self { descriptor, value }
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn is_page(&self) -> bool {
        self.descriptor.param == PAGE_PARAM
    }

    pub fn is_limit(&self) -> bool {
        self.descriptor.param == LIMIT_PARAM
    }

    pub fn is_sort_by(&self) -> bool {
        self.descriptor.param == SORT_BY_PARAM
    }

    /// Param or db tag missing or `-`
    pub fn is_empty(&self) -> bool {
        self.descriptor.is_empty()
    }

    pub fn operand(&self) -> Operand {
        Operand::from_param(self.descriptor.param)
    }

    pub fn multi_operand(&self) -> Operand {
        Operand::multi_from_param(self.descriptor.param)
    }

    /// The field's predicate, `None` to skip it
    pub fn make(&self) -> Option<Clause> {
        if self.is_empty() {
            return None;
        }
        self.value.produce(self)
    }

    fn scalar_clause(&self, value: &SqlValue) -> Option<Clause> {
        let column = self.descriptor.column;

        if let (Some(json_key), SqlValue::Text(text)) = (self.descriptor.json_key, value) {
            let clause = SqlGenerator::json_member(column, json_key, text);
            tracing::trace!(
                "[JSON_MEMBER] column: {}, key: {}, clause: {}",
                column,
                json_key,
                clause
            );
            return Some(Clause::inline(clause));
        }

        Some(Clause::bound(
            SqlGenerator::comparison(column, self.operand()),
            vec![value.clone()],
        ))
    }

    fn multi_clause(&self, values: &[SqlValue]) -> Option<Clause> {
        if values.is_empty() {
            return None;
        }

        Some(Clause::bound(
            SqlGenerator::multi_value(self.descriptor.column, self.multi_operand(), values.len()),
            values.to_vec(),
        ))
    }
}
