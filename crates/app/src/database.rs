//! Database connection management

use std::fmt::{self, Display};

use sqlx::PgPool;
use thiserror::Error;

/// Longest identifier `PostgreSQL` accepts without truncation.
const MAX_IDENTIFIER_LEN: usize = 63;

const RESERVED_WORDS: [&str; 15] = [
    "user", "table", "select", "insert", "update", "delete", "drop", "create", "alter", "index",
    "database", "schema", "role", "grant", "revoke",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableNameError {
    #[error("table name must be 1-63 characters long")]
    Length,

    #[error("table name must start with a letter or underscore")]
    InvalidStart,

    #[error("table name can only contain letters, digits, underscores, and dollar signs")]
    InvalidCharacter,

    #[error("table name '{0}' is a reserved word")]
    Reserved(String),
}

/// A validated table identifier, safe to splice into SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    /// Validate a table name.
    ///
    /// Table names must:
    /// - Be 1-63 characters long
    /// - Start with a letter or underscore
    /// - Contain only letters, digits, underscores, and dollar signs
    /// - Not be a `PostgreSQL` reserved word
    ///
    /// # Errors
    ///
    /// Returns the first rule the name breaks.
    pub fn parse(name: &str) -> Result<Self, TableNameError> {
        let Some(first) = name.chars().next() else {
            return Err(TableNameError::Length);
        };

        if name.len() > MAX_IDENTIFIER_LEN {
            return Err(TableNameError::Length);
        }

        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(TableNameError::InvalidStart);
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        {
            return Err(TableNameError::InvalidCharacter);
        }

        if RESERVED_WORDS
            .iter()
            .any(|word| name.eq_ignore_ascii_case(word))
        {
            return Err(TableNameError::Reserved(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
