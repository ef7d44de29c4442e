// src/commands/reports.rs
//
// Read-only reporting commands: key inspection, per-student scores,
// per-test rankings, and progress.

use std::collections::BTreeMap;

use sqlx::SqlitePool;

use crate::commands::admin::parse_part;
use crate::error::BotError;
use crate::grading::aggregate;
use crate::models::part::{REQUIRED_PARTS, total_question_count};
use crate::models::submission::{RankingEntry, ScoreEntry};
use crate::models::test_key::TestKey;

/// `/viewtest <code> <part>` - lists the stored key cells, one per question.
pub async fn view_test(pool: &SqlitePool, args: &str) -> Result<String, BotError> {
    let (test_code, part_raw) = args
        .split_once(' ')
        .ok_or_else(|| BotError::Format("Usage: /viewtest <code> <part>".to_string()))?;
    let part = parse_part(part_raw)?;

    let key: Option<TestKey> = sqlx::query_as(
        "SELECT test_code, part, answer_key, created_at FROM tests
         WHERE test_code = ? AND part = ?",
    )
    .bind(test_code)
    .bind(part.as_str())
    .fetch_optional(pool)
    .await?;

    let key = key.ok_or_else(|| {
        BotError::NotFound(format!("Test '{}' for part '{}' not found.", test_code, part))
    })?;

    let mut response = format!("Answer key for {} part of test '{}':", part, test_code);
    for (i, cell) in key.answer_key.split(';').enumerate() {
        response.push_str(&format!("\nQ{}: {}", i + 1, cell));
    }

    Ok(response)
}

/// `/studentscores <name>` - every graded part for one student.
pub async fn student_scores(pool: &SqlitePool, args: &str) -> Result<String, BotError> {
    let student_name = args.trim();
    if student_name.is_empty() {
        return Err(BotError::Format("Usage: /studentscores <name>".to_string()));
    }

    let entries: Vec<ScoreEntry> = sqlx::query_as(
        "SELECT test_code, part, score FROM student_results
         WHERE student_name = ? ORDER BY test_code, part",
    )
    .bind(student_name)
    .fetch_all(pool)
    .await?;

    if entries.is_empty() {
        return Err(BotError::NotFound(format!(
            "No scores found for {}.",
            student_name
        )));
    }

    let mut response = format!("Scores for {}:", student_name);
    for entry in entries {
        response.push_str(&format!(
            "\nTest '{}' ({}): {} points",
            entry.test_code, entry.part, entry.score
        ));
    }

    Ok(response)
}

/// `/rankings <test_code>` - students ordered by total score across parts.
pub async fn rankings(pool: &SqlitePool, args: &str) -> Result<String, BotError> {
    let test_code = args.trim();
    if test_code.is_empty() {
        return Err(BotError::Format("Usage: /rankings <test_code>".to_string()));
    }

    let entries: Vec<RankingEntry> = sqlx::query_as(
        "SELECT student_name, SUM(score) AS total_score
         FROM student_results
         WHERE test_code = ?
         GROUP BY student_name
         ORDER BY total_score DESC",
    )
    .bind(test_code)
    .fetch_all(pool)
    .await?;

    if entries.is_empty() {
        return Err(BotError::NotFound(format!(
            "No results found for test '{}'.",
            test_code
        )));
    }

    let mut response = format!("Rankings for test '{}':", test_code);
    for (rank, entry) in entries.iter().enumerate() {
        response.push_str(&format!(
            "\n{}. {}: {} points",
            rank + 1,
            entry.student_name,
            entry.total_score
        ));
    }

    Ok(response)
}

/// `/progress <student_name>` - per-test completion status. A test line
/// shows the overall score once both parts are in, otherwise which parts
/// are still pending.
pub async fn progress(pool: &SqlitePool, args: &str) -> Result<String, BotError> {
    let student_name = args.trim();
    if student_name.is_empty() {
        return Err(BotError::Format("Usage: /progress <student_name>".to_string()));
    }

    let entries: Vec<ScoreEntry> = sqlx::query_as(
        "SELECT test_code, part, score FROM student_results
         WHERE student_name = ? ORDER BY test_code, part",
    )
    .bind(student_name)
    .fetch_all(pool)
    .await?;

    if entries.is_empty() {
        return Err(BotError::NotFound(format!(
            "No submissions found for {}.",
            student_name
        )));
    }

    let mut by_test: BTreeMap<String, Vec<ScoreEntry>> = BTreeMap::new();
    for entry in entries {
        by_test.entry(entry.test_code.clone()).or_default().push(entry);
    }

    let mut response = format!("Progress for {}:", student_name);
    for (test_code, parts) in by_test {
        let part_names: Vec<String> = parts.iter().map(|e| e.part.clone()).collect();
        if aggregate::is_complete(&part_names) {
            let total: i64 = parts.iter().map(|e| e.score).sum();
            response.push_str(&format!(
                "\nTest '{}': complete, Overall Score: {}/{}",
                test_code,
                total,
                total_question_count()
            ));
        } else {
            let done = part_names.join(", ");
            let pending: Vec<&str> = REQUIRED_PARTS
                .iter()
                .filter(|p| !part_names.iter().any(|name| name == p.as_str()))
                .map(|p| p.as_str())
                .collect();
            response.push_str(&format!(
                "\nTest '{}': {} done, {} pending",
                test_code,
                done,
                pending.join(", ")
            ));
        }
    }

    Ok(response)
}
