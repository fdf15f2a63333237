//! SQL text generation
//!
//! Every fragment uses MySQL `?` placeholders, except the JSON member
//! form which embeds its escaped literal.

use std::sync::OnceLock;

use regex::Regex;

use crate::query_builder::operand::Operand;
use crate::query_builder::ordering::SortOrder;
use crate::validation::ValidatedColumnName;

pub struct SqlGenerator;

impl SqlGenerator {
    /// `<column> <operand> ?`
    pub fn comparison(column: &str, operand: Operand) -> String {
        format!("{} {} ?", column, operand.to_sql())
    }

    /// `<column> IN (?, ?, ...)`, one placeholder per value
    pub fn multi_value(column: &str, operand: Operand, count: usize) -> String {
        let placeholders = vec!["?"; count].join(", ");
        format!("{} {} ({})", column, operand.to_sql(), placeholders)
    }

    /// Match `value` against a member of the JSON document in `column`
    ///
    /// A key addressing an array element (`$[0]`, `$[3].name`) compares the
    /// extracted, unquoted member; any other key tests containment at the
    /// member path.
    pub fn json_member(column: &str, json_key: &str, value: &str) -> String {
        static ARRAY_INDEX_KEY: OnceLock<Regex> = OnceLock::new();

        let array_index_key = ARRAY_INDEX_KEY
            .get_or_init(|| Regex::new(r"^\$\[\d+\]").expect("Invalid regex"));
        let literal = Self::escape_literal(value);

        if array_index_key.is_match(json_key) {
            format!(
                "JSON_UNQUOTE(JSON_EXTRACT({}, '{}')) = '{}'",
                column, json_key, literal
            )
        } else {
            let path = if json_key.starts_with('$') {
                json_key.to_string()
            } else {
                format!("$.{}", json_key)
            };
            format!(
                "JSON_CONTAINS({}, JSON_QUOTE('{}'), '{}')",
                column, literal, path
            )
        }
    }

    /// Escape text for use inside a single-quoted MySQL string literal
    pub fn escape_literal(value: &str) -> String {
        value.replace('\\', "\\\\").replace('\'', "''")
    }

    /// Number of `?` placeholders in a placeholder-form fragment
    pub fn count_placeholders(fragment: &str) -> usize {
        fragment.matches('?').count()
    }

    /// ` WHERE a AND b`, empty without fragments
    pub fn build_where_clause(fragments: &[String]) -> String {
        if fragments.is_empty() {
            return "".to_string();
        }

        format!(" WHERE {}", fragments.join(" AND "))
    }

    /// ` ORDER BY a ASC, b DESC`, empty without keys
    pub fn build_order_clause(order_by: &[(ValidatedColumnName, SortOrder)]) -> String {
        if order_by.is_empty() {
            return "".to_string();
        }

        let order_items: Vec<String> = order_by
            .iter()
            .map(|(column, order)| format!("{} {}", column.as_str(), order.to_sql()))
            .collect();

        format!(" ORDER BY {}", order_items.join(", "))
    }

    /// ` LIMIT ?` and ` OFFSET ?`, values are bound as arguments
    pub fn build_limit_clause(limit: bool, offset: bool) -> String {
        let mut clause = String::new();

        if limit {
            clause.push_str(" LIMIT ?");
        }

        if offset {
            clause.push_str(" OFFSET ?");
        }

        clause
    }
}
