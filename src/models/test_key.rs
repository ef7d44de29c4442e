// src/models/test_key.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::error::BotError;
use crate::grading::normalize::normalize;
use crate::models::part::Part;

/// Represents the 'tests' table in the database.
/// One row per (test_code, part); `answer_key` holds the raw key text as the
/// administrator entered it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestKey {
    pub test_code: String,
    pub part: String,
    pub answer_key: String,
    pub created_at: Option<chrono::NaiveDateTime>,
}

/// A parsed answer key: one acceptable-answer set per question, already
/// normalized for comparison. Cells are `;`-separated in storage, and each
/// cell may list several acceptable literals separated by `,`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    cells: Vec<Vec<String>>,
}

impl AnswerKey {
    /// Parses administrator input, enforcing the part's fixed cell count.
    pub fn parse(raw: &str, part: Part) -> Result<Self, BotError> {
        let key = Self::from_stored(raw);
        let expected = part.question_count();
        if key.cells.len() != expected {
            return Err(BotError::Validation(format!(
                "Expected {} answers, but got {}.",
                expected,
                key.cells.len()
            )));
        }
        Ok(key)
    }

    /// Parses a key already persisted in the `tests` table. The cell count
    /// was validated when the key was stored, so it is not re-checked here.
    pub fn from_stored(raw: &str) -> Self {
        let cells = raw
            .split(';')
            .map(|cell| cell.split(',').map(normalize).collect())
            .collect();
        Self { cells }
    }

    pub fn question_count(&self) -> usize {
        self.cells.len()
    }

    /// Acceptable-answer sets in question order.
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }
}
