//! Comparison operands
//!
//! The operand of a predicate is inferred from the suffix of the field's
//! param name, e.g. `age__gte` compares with `>=`.

/// Predicate operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Eq,    // =
    Ne,    // !=
    Gt,    // >
    Gte,   // >=
    Lt,    // <
    Lte,   // <=
    In,    // IN
    NotIn, // NOT IN
}

/// Scalar suffixes; longer suffixes come first so `__gte` never reads as `__gt`
const SCALAR_SUFFIXES: &[(&str, Operand)] = &[
    ("__gte", Operand::Gte),
    ("__lte", Operand::Lte),
    ("__neq", Operand::Ne),
    ("__gt", Operand::Gt),
    ("__lt", Operand::Lt),
];

const NOT_IN_SUFFIX: &str = "__nin";

impl Operand {
    pub fn to_sql(&self) -> &'static str {
        match self {
            Operand::Eq => "=",
            Operand::Ne => "!=",
            Operand::Gt => ">",
            Operand::Gte => ">=",
            Operand::Lt => "<",
            Operand::Lte => "<=",
            Operand::In => "IN",
            Operand::NotIn => "NOT IN",
        }
    }

    /// Operand of a single-value predicate, `=` without a known suffix
    pub fn from_param(param: &str) -> Self {
        SCALAR_SUFFIXES
            .iter()
            .find(|(suffix, _)| param.ends_with(suffix))
            .map(|(_, operand)| *operand)
            .unwrap_or(Operand::Eq)
    }

    /// Operand of a multi-value predicate, `IN` unless the param ends with `__nin`
    pub fn multi_from_param(param: &str) -> Self {
        if param.ends_with(NOT_IN_SUFFIX) {
            Operand::NotIn
        } else {
            Operand::In
        }
    }
}
