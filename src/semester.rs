//! Semester value object.
//!
//! A semester is the string `"<year>-<term>"` in the ROC calendar,
//! e.g. `110-2`. Year is bounded to [90, 130], term to {1, 2}.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GradeDistError, Result};

static SEMESTER_RE: OnceLock<Regex> = OnceLock::new();

fn semester_re() -> &'static Regex {
    SEMESTER_RE.get_or_init(|| Regex::new(r"^(\d+)-(\d+)$").expect("static semester pattern"))
}

/// A validated semester code.
///
/// No identity beyond its string form; two semesters are equal iff
/// their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Semester(String);

impl Semester {
    /// Earliest accepted ROC year
    pub const MIN_YEAR: u32 = 90;

    /// Latest accepted ROC year
    pub const MAX_YEAR: u32 = 130;

    /// Create a new semester from a raw string (with validation)
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Semester(value))
    }

    fn validate(value: &str) -> Result<()> {
        let invalid = || GradeDistError::InvalidSemesterFormat {
            value: value.to_string(),
        };
        let caps = semester_re().captures(value).ok_or_else(invalid)?;
        let year: u32 = caps[1].parse().map_err(|_| invalid())?;
        let term: u32 = caps[2].parse().map_err(|_| invalid())?;
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) || !(1..=2).contains(&term) {
            return Err(invalid());
        }
        Ok(())
    }

    /// Get the semester string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Semester {
    type Err = GradeDistError;

    fn from_str(s: &str) -> Result<Self> {
        Semester::new(s)
    }
}

impl TryFrom<String> for Semester {
    type Error = GradeDistError;

    fn try_from(value: String) -> Result<Self> {
        Semester::new(value)
    }
}

impl From<Semester> for String {
    fn from(semester: Semester) -> Self {
        semester.0
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Semester {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
