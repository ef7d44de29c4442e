// src/commands/admin.rs
//
// Test-key administration and submission deletion. Authorization happens at
// the dispatch layer; these handlers only validate and touch storage.

use std::str::FromStr;

use sqlx::SqlitePool;

use crate::error::{BotError, is_unique_violation};
use crate::models::part::Part;
use crate::models::test_key::AnswerKey;

/// `/addtest <code> <part> <answer_key>`
///
/// Registers the answer key for one part of a test. The key text is stored
/// as entered; it is parsed here only to enforce the part's cell count.
pub async fn add_test(pool: &SqlitePool, args: &str) -> Result<String, BotError> {
    let mut tokens = args.splitn(3, ' ');
    let (test_code, part_raw, answer_key) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(code), Some(part), Some(key)) if !code.is_empty() => (code, part, key),
        _ => {
            return Err(BotError::Format(
                "Usage: /addtest <code> <part> <answer_key>".to_string(),
            ));
        }
    };

    let part = parse_part(part_raw)?;
    AnswerKey::parse(answer_key, part)?;

    let existing: Option<String> =
        sqlx::query_scalar("SELECT answer_key FROM tests WHERE test_code = ? AND part = ?")
            .bind(test_code)
            .bind(part.as_str())
            .fetch_optional(pool)
            .await?;

    if existing.is_some() {
        return Err(BotError::Duplicate(format!(
            "Test '{}' for part '{}' already exists.",
            test_code, part
        )));
    }

    sqlx::query("INSERT INTO tests (test_code, part, answer_key) VALUES (?, ?, ?)")
        .bind(test_code)
        .bind(part.as_str())
        .bind(answer_key)
        .execute(pool)
        .await
        .map_err(|e| {
            // Two admins racing on the same key hit the primary key instead.
            if is_unique_violation(&e) {
                BotError::Duplicate(format!(
                    "Test '{}' for part '{}' already exists.",
                    test_code, part
                ))
            } else {
                BotError::from(e)
            }
        })?;

    Ok(format!(
        "Answer key for {} part of test '{}' added successfully.",
        part, test_code
    ))
}

/// `/updatetest <code> <part> <new_answer_key>`
pub async fn update_test(pool: &SqlitePool, args: &str) -> Result<String, BotError> {
    let mut tokens = args.splitn(3, ' ');
    let (test_code, part_raw, answer_key) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(code), Some(part), Some(key)) if !code.is_empty() => (code, part, key),
        _ => {
            return Err(BotError::Format(
                "Usage: /updatetest <code> <part> <new_answer_key>".to_string(),
            ));
        }
    };

    let part = parse_part(part_raw)?;
    AnswerKey::parse(answer_key, part)?;

    let result = sqlx::query("UPDATE tests SET answer_key = ? WHERE test_code = ? AND part = ?")
        .bind(answer_key)
        .bind(test_code)
        .bind(part.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BotError::NotFound(format!(
            "Test '{}' for part '{}' not found.",
            test_code, part
        )));
    }

    Ok(format!(
        "Answer key for {} part of test '{}' has been updated successfully.",
        part, test_code
    ))
}

/// `/removetest <code>` - deletes both parts' keys for a test code.
pub async fn remove_test(pool: &SqlitePool, args: &str) -> Result<String, BotError> {
    let test_code = args.trim();
    if test_code.is_empty() {
        return Err(BotError::Format("Usage: /removetest <code>".to_string()));
    }

    let result = sqlx::query("DELETE FROM tests WHERE test_code = ?")
        .bind(test_code)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(BotError::NotFound(format!("Test '{}' not found.", test_code)));
    }

    Ok(format!("Test '{}' (both parts) has been removed.", test_code))
}

/// `/deletesubmission <student_name> <test_code> <part>`
///
/// The only way a submission record ever changes after creation.
pub async fn delete_submission(pool: &SqlitePool, args: &str) -> Result<String, BotError> {
    let mut tokens = args.splitn(3, ' ');
    let (student_name, test_code, part_raw) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), Some(code), Some(part)) if !name.is_empty() => (name, code, part),
        _ => {
            return Err(BotError::Format(
                "Usage: /deletesubmission <student_name> <test_code> <part>".to_string(),
            ));
        }
    };

    let part = parse_part(part_raw)?;

    let result = sqlx::query(
        "DELETE FROM student_results WHERE student_name = ? AND test_code = ? AND part = ?",
    )
    .bind(student_name)
    .bind(test_code)
    .bind(part.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BotError::NotFound(format!(
            "No submission found for {} in test '{}' ({} part).",
            student_name, test_code, part
        )));
    }

    Ok(format!(
        "Submission for {} in test '{}' ({} part) has been deleted.",
        student_name, test_code, part
    ))
}

pub(crate) fn parse_part(raw: &str) -> Result<Part, BotError> {
    Part::from_str(raw)
        .map_err(|_| BotError::Validation("Part must be 'math' or 'english'.".to_string()))
}
