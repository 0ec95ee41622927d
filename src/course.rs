//! Course identifier value objects.
//!
//! Two code systems name a course: the course code (e.g. `CSIE1212`)
//! and the curriculum code (e.g. `902 10750`, with the
//! interior space). Both are opaque strings to this crate beyond their
//! shape.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GradeDistError, Result};

static COURSE_CODE_RE: OnceLock<Regex> = OnceLock::new();
static CURRICULUM_CODE_RE: OnceLock<Regex> = OnceLock::new();

// Unanchored: a course code is letters/symbols followed by a number
// somewhere, e.g. `CSIE1212`.
fn course_code_re() -> &'static Regex {
    COURSE_CODE_RE.get_or_init(|| Regex::new(r".+?\d+").expect("static course code pattern"))
}

fn curriculum_code_re() -> &'static Regex {
    CURRICULUM_CODE_RE
        .get_or_init(|| Regex::new(r".{3}\s.{5}").expect("static curriculum code pattern"))
}

/// A validated course code, e.g. `CSIE1212`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseCode(String);

impl CourseCode {
    /// Create a new course code from a raw string (with validation)
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !course_code_re().is_match(&value) {
            return Err(GradeDistError::InvalidCourseCode { value });
        }
        Ok(CourseCode(value))
    }

    /// Get the code string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated curriculum code, e.g. `902 10750`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurriculumCode(String);

impl CurriculumCode {
    /// Create a new curriculum code from a raw string (with validation)
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !curriculum_code_re().is_match(&value) {
            return Err(GradeDistError::InvalidCurriculumCode { value });
        }
        Ok(CurriculumCode(value))
    }

    /// Get the code string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_newtype_impls {
    ($ty:ident) => {
        impl FromStr for $ty {
            type Err = GradeDistError;

            fn from_str(s: &str) -> Result<Self> {
                $ty::new(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = GradeDistError;

            fn try_from(value: String) -> Result<Self> {
                $ty::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_newtype_impls!(CourseCode);
string_newtype_impls!(CurriculumCode);

/// A course as known to the catalog: both code systems plus the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, e.g. `CSIE1212`
    pub code: CourseCode,
    /// Curriculum code, e.g. `902 10750`
    pub curriculum: CurriculumCode,
    /// Course title
    pub title: String,
}
