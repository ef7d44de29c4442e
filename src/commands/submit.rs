// src/commands/submit.rs
//
// The submission gateway: parse, validate, grade, persist, report.
// Guards run in order and the first failure terminates the submission.

use std::str::FromStr;

use sqlx::SqlitePool;

use crate::error::{BotError, is_unique_violation};
use crate::grading::aggregate;
use crate::grading::grader::{grade, validate_choices};
use crate::grading::normalize::split_answers;
use crate::models::part::Part;
use crate::models::test_key::AnswerKey;

const ALREADY_COMPLETED: &str = "You have already completed this test. Results are saved.";

/// Splits `<test_code>_<part>*<answers>` into its pieces. The part is the
/// segment after the LAST underscore, so test codes may contain `_`.
fn parse_submission(text: &str) -> Result<(&str, Part, &str), BotError> {
    let (header, answers_raw) = text.split_once('*').ok_or_else(|| {
        BotError::Format("Invalid format. Use <test_code>_<part>*<answers>.".to_string())
    })?;

    let (test_code, part_raw) = header.rsplit_once('_').ok_or_else(|| {
        BotError::Format("Invalid format. Use <test_code>_<part>*<answers>.".to_string())
    })?;

    let part = Part::from_str(part_raw)
        .map_err(|_| BotError::Validation("Invalid part. Use 'math' or 'english'.".to_string()))?;

    Ok((test_code, part, answers_raw))
}

/// Grades one free-text submission end-to-end and returns the reply.
///
/// When the submission completes the second part of a test, the overall
/// score is appended to the same reply; it is never announced again on
/// later, unrelated actions.
pub async fn handle_submission(
    pool: &SqlitePool,
    student_name: &str,
    text: &str,
) -> Result<String, BotError> {
    let (test_code, part, answers_raw) = parse_submission(text)?;

    let answers = split_answers(answers_raw);
    tracing::info!(
        "Student '{}' submitted {} answers for the {} part of test '{}'",
        student_name,
        answers.len(),
        part,
        test_code
    );

    let expected = part.question_count();
    if answers.len() != expected {
        return Err(BotError::Validation(format!(
            "You entered {} answers, but the {} part requires {} answers.\n\
             Please check and resubmit your answers.",
            answers.len(),
            part,
            expected
        )));
    }

    let invalid = validate_choices(part, &answers);
    if !invalid.is_empty() {
        return Err(BotError::Validation(format!(
            "Invalid answers found:\n{}\nPlease correct your answers and resubmit.",
            invalid.join("; ")
        )));
    }

    let already_submitted: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM student_results WHERE student_name = ? AND test_code = ? AND part = ?",
    )
    .bind(student_name)
    .bind(test_code)
    .bind(part.as_str())
    .fetch_optional(pool)
    .await?;

    if already_submitted.is_some() {
        return Err(BotError::Duplicate(ALREADY_COMPLETED.to_string()));
    }

    let stored_key: Option<String> =
        sqlx::query_scalar("SELECT answer_key FROM tests WHERE test_code = ? AND part = ?")
            .bind(test_code)
            .bind(part.as_str())
            .fetch_optional(pool)
            .await?;

    let stored_key = stored_key.ok_or_else(|| {
        BotError::NotFound(format!(
            "Test code '{}' for part '{}' not found.",
            test_code, part
        ))
    })?;

    let key = AnswerKey::from_stored(&stored_key);
    let report = grade(&answers, &key);

    let mistakes_json = serde_json::to_string(&report.mistakes)?;

    // The primary key on (student_name, test_code, part) closes the race
    // between the duplicate check above and this insert: the loser of a
    // near-simultaneous double submission gets the same "already completed"
    // reply instead of overwriting the stored score.
    sqlx::query(
        "INSERT INTO student_results
         (student_name, test_code, part, student_answers, score, mistakes)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(student_name)
    .bind(test_code)
    .bind(part.as_str())
    .bind(answers.join(","))
    .bind(report.score)
    .bind(&mistakes_json)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            BotError::Duplicate(ALREADY_COMPLETED.to_string())
        } else {
            BotError::from(e)
        }
    })?;

    let mistakes_text = if report.mistakes.is_empty() {
        "None".to_string()
    } else {
        report
            .mistakes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut reply = format!(
        "{} part completed!\nScore: {}/{}\nMistakes:\n{}",
        part.display_name(),
        report.score,
        key.question_count(),
        mistakes_text
    );

    // Aggregate once, at the moment the second part lands.
    let submitted_parts: Vec<String> = sqlx::query_scalar(
        "SELECT part FROM student_results WHERE student_name = ? AND test_code = ?",
    )
    .bind(student_name)
    .bind(test_code)
    .fetch_all(pool)
    .await?;

    if aggregate::is_complete(&submitted_parts) {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(score) FROM student_results WHERE student_name = ? AND test_code = ?",
        )
        .bind(student_name)
        .bind(test_code)
        .fetch_one(pool)
        .await?;

        reply.push_str("\n\n");
        reply.push_str(&aggregate::overall_report(total.unwrap_or(0)));
    }

    Ok(reply)
}
