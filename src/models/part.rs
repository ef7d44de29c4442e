// src/models/part.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One section of a test. Each part has a fixed question count and every
/// test is made up of exactly these two parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    Math,
    English,
}

/// Both parts a student must complete before a test counts as finished.
pub const REQUIRED_PARTS: [Part; 2] = [Part::Math, Part::English];

impl Part {
    pub fn question_count(&self) -> usize {
        match self {
            Part::Math => 44,
            Part::English => 54,
        }
    }

    /// Lowercase form used in commands and as the database column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Part::Math => "math",
            Part::English => "english",
        }
    }

    /// Capitalized form used in replies ("Math part completed!").
    pub fn display_name(&self) -> &'static str {
        match self {
            Part::Math => "Math",
            Part::English => "English",
        }
    }
}

/// Sum of question counts across all required parts (44 + 54 = 98).
pub fn total_question_count() -> usize {
    REQUIRED_PARTS.iter().map(|p| p.question_count()).sum()
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Part {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "math" => Ok(Part::Math),
            "english" => Ok(Part::English),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("math".parse::<Part>(), Ok(Part::Math));
        assert_eq!("English".parse::<Part>(), Ok(Part::English));
        assert_eq!(" MATH ".parse::<Part>(), Ok(Part::Math));
        assert!("science".parse::<Part>().is_err());
    }

    #[test]
    fn question_counts_are_fixed() {
        assert_eq!(Part::Math.question_count(), 44);
        assert_eq!(Part::English.question_count(), 54);
        assert_eq!(total_question_count(), 98);
    }
}
