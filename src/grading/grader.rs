// src/grading/grader.rs

use crate::models::part::Part;
use crate::models::submission::Mistake;
use crate::models::test_key::AnswerKey;

/// Choices allowed on the english part. Math answers are free-form literals.
const ENGLISH_CHOICES: [&str; 4] = ["a", "b", "c", "d"];

/// Outcome of grading one part: the score plus one entry per wrong answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    pub score: i64,
    pub mistakes: Vec<Mistake>,
}

/// Checks part-specific answer validity before any grading happens.
/// Returns one diagnostic line per offending question; an empty result means
/// the submission may be graded. Only the english part restricts the
/// alphabet.
pub fn validate_choices(part: Part, answers: &[String]) -> Vec<String> {
    if part != Part::English {
        return Vec::new();
    }

    answers
        .iter()
        .enumerate()
        .filter(|(_, answer)| !ENGLISH_CHOICES.contains(&answer.as_str()))
        .map(|(i, answer)| {
            format!(
                "Q{}: Invalid answer '{}'. Must be a, b, c, or d.",
                i + 1,
                answer
            )
        })
        .collect()
}

/// Scores a submission against an answer key.
///
/// Both inputs are already normalized; the caller has checked that the answer
/// count matches the part's question count. A question is correct iff the
/// student's literal is a member of that question's acceptable set - exact
/// string membership, never numeric equivalence ("3.0" does not match "3").
pub fn grade(answers: &[String], key: &AnswerKey) -> GradeReport {
    let mut score = 0;
    let mut mistakes = Vec::new();

    for (i, (answer, acceptable)) in answers.iter().zip(key.cells()).enumerate() {
        if acceptable.iter().any(|a| a == answer) {
            score += 1;
        } else {
            mistakes.push(Mistake {
                question: i + 1,
                expected: acceptable.clone(),
                actual: answer.clone(),
            });
        }
    }

    GradeReport { score, mistakes }
}
