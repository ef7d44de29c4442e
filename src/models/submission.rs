// src/models/submission.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// One wrong answer: question index (1-based), the full acceptable set, and
/// what the student actually wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mistake {
    pub question: usize,
    pub expected: Vec<String>,
    pub actual: String,
}

impl fmt::Display for Mistake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q{}: Correct=['{}'], Your={}",
            self.question,
            self.expected.join("', '"),
            self.actual
        )
    }
}

/// Row shape for per-student score listings.
#[derive(Debug, FromRow, Serialize)]
pub struct ScoreEntry {
    pub test_code: String,
    pub part: String,
    pub score: i64,
}

/// Row shape for the per-test rankings (scores summed across parts).
#[derive(Debug, FromRow, Serialize)]
pub struct RankingEntry {
    pub student_name: String,
    pub total_score: i64,
}
