// src/grading/aggregate.rs

use std::collections::HashSet;
use std::str::FromStr;

use crate::models::part::{Part, REQUIRED_PARTS, total_question_count};

/// A test counts as finished only when the set of submitted parts equals
/// exactly the required enumeration {math, english}. A test that only ever
/// had one part registered can never show as complete; that is documented
/// behavior, not a bug.
pub fn is_complete(submitted_parts: &[String]) -> bool {
    let submitted: HashSet<Part> = submitted_parts
        .iter()
        .filter_map(|p| Part::from_str(p).ok())
        .collect();
    let required: HashSet<Part> = REQUIRED_PARTS.into_iter().collect();
    submitted == required
}

/// Reply line appended to the submission that completes the second part.
pub fn overall_report(total_score: i64) -> String {
    format!(
        "Both parts completed!\nOverall Score: {}/{}",
        total_score,
        total_question_count()
    )
}
