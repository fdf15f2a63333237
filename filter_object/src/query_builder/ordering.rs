//! Sort ordering
//!
//! Parses `sortBy` tokens: `column`, `column:asc`, `column:desc`,
//! `-column` and `+column`. One value may carry several comma-separated
//! tokens.

use crate::errors::QueryBuilderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    fn parse(direction: &str) -> Option<Self> {
        if direction.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if direction.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }
}

/// One requested sort column, not yet checked against the allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub order: SortOrder,
}

impl SortKey {
    /// Parse a single token; blank tokens yield `None`
    pub fn parse(token: &str) -> Result<Option<Self>, QueryBuilderError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(None);
        }

        let (column, order) = if let Some(column) = token.strip_prefix('-') {
            (column, SortOrder::Desc)
        } else if let Some(column) = token.strip_prefix('+') {
            (column, SortOrder::Asc)
        } else if let Some((column, direction)) = token.split_once(':') {
            let order = SortOrder::parse(direction.trim())
                .ok_or_else(|| QueryBuilderError::InvalidSortDirection(token.to_string()))?;
            (column, order)
        } else {
            (token, SortOrder::Asc)
        };

        let column = column.trim();
        if column.is_empty() {
            return Err(QueryBuilderError::UnknownSortColumn(token.to_string()));
        }

        Ok(Some(Self {
            column: column.to_string(),
            order,
        }))
    }

    /// Parse every comma-separated token of one `sortBy` value
    pub fn parse_list(value: &str) -> Result<Vec<Self>, QueryBuilderError> {
        let mut keys = Vec::new();
        for token in value.split(',') {
            if let Some(key) = Self::parse(token)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
