// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Every command handler returns this; the dispatch boundary converts it
/// into a plain-text reply so no error ever escapes `handle_message`.
#[derive(Debug)]
pub enum BotError {
    /// A non-admin invoked an admin-only command.
    Unauthorized,

    /// Malformed command arguments (bad separators, wrong token counts).
    Format(String),

    /// Wrong answer count, disallowed literal for english, etc.
    Validation(String),

    /// Missing test key or submission.
    NotFound(String),

    /// Test key or submission already exists.
    Duplicate(String),

    /// Underlying read/write failure.
    Storage(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Unauthorized => write!(f, "unauthorized"),
            BotError::Format(msg) => write!(f, "format error: {}", msg),
            BotError::Validation(msg) => write!(f, "validation error: {}", msg),
            BotError::NotFound(msg) => write!(f, "not found: {}", msg),
            BotError::Duplicate(msg) => write!(f, "duplicate: {}", msg),
            BotError::Storage(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for BotError {}

impl BotError {
    /// Converts the error into the text reply sent back to the chat.
    /// Storage failures log detail for the operator and keep the reply generic.
    pub fn reply_text(&self) -> String {
        match self {
            BotError::Unauthorized => "You are not authorized to use this command.".to_string(),
            BotError::Format(msg)
            | BotError::Validation(msg)
            | BotError::NotFound(msg)
            | BotError::Duplicate(msg) => msg.clone(),
            BotError::Storage(msg) => {
                tracing::error!("Database error: {}", msg);
                "Failed to process your request. Please try again.".to_string()
            }
        }
    }
}

/// Converts `sqlx::Error` into `BotError::Storage`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for BotError {
    fn from(err: sqlx::Error) -> Self {
        BotError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::Storage(err.to_string())
    }
}

/// True when an insert failed because it hit a uniqueness constraint
/// (the primary key on `tests` or `student_results`).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
