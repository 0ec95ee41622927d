//! Error types for gradedist
//!
//! Every error is terminal for the call that raised it: all operations
//! are pure and deterministic, so there is nothing to retry internally.
//! The embedding service maps these onto transport status codes using
//! `error_type()` / `to_json()`.

use thiserror::Error;

/// Errors that can occur while validating grade data
#[derive(Error, Debug)]
pub enum GradeDistError {
    // Scale lookups
    #[error("rank out of range: {rank} (scale ranks are 0..=9)")]
    OutOfRange { rank: u8 },

    #[error("unknown grade label: {label}")]
    UnknownLabel { label: String },

    // Segment construction
    #[error("invalid segment range [{low}, {high}] (need 0 <= low <= high <= 9)")]
    InvalidRange { low: u8, high: u8 },

    #[error("invalid segment weight {weight} (must be non-negative)")]
    InvalidWeight { weight: f64 },

    // Distribution construction
    #[error("distribution has no segments")]
    EmptySegments,

    #[error("segments not contiguous at index {index}: expected rank {expected}, found {found}")]
    NonContiguousSegments {
        index: usize,
        expected: u8,
        found: u8,
    },

    #[error("segment weights sum to {sum}, expected 100 within tolerance 1")]
    SumMismatch { sum: f64 },

    // Value objects
    #[error("invalid semester: {value} (expected <year>-<term>, year 90..=130, term 1..=2)")]
    InvalidSemesterFormat { value: String },

    #[error("invalid course code: {value}")]
    InvalidCourseCode { value: String },

    #[error("invalid curriculum code: {value}")]
    InvalidCurriculumCode { value: String },

    #[error("invalid distribution id: {id}")]
    InvalidDistributionId { id: String },

    // Content integrity
    #[error("content decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("content checksum mismatch: declared {declared}, computed {computed}")]
    IntegrityMismatch { declared: u32, computed: u32 },
}

impl GradeDistError {
    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GradeDistError::OutOfRange { .. } => "out_of_range",
            GradeDistError::UnknownLabel { .. } => "unknown_label",
            GradeDistError::InvalidRange { .. } => "invalid_range",
            GradeDistError::InvalidWeight { .. } => "invalid_weight",
            GradeDistError::EmptySegments => "empty_segments",
            GradeDistError::NonContiguousSegments { .. } => "non_contiguous_segments",
            GradeDistError::SumMismatch { .. } => "sum_mismatch",
            GradeDistError::InvalidSemesterFormat { .. } => "invalid_semester_format",
            GradeDistError::InvalidCourseCode { .. } => "invalid_course_code",
            GradeDistError::InvalidCurriculumCode { .. } => "invalid_curriculum_code",
            GradeDistError::InvalidDistributionId { .. } => "invalid_distribution_id",
            GradeDistError::Decode(_) => "decode_error",
            GradeDistError::IntegrityMismatch { .. } => "integrity_mismatch",
        }
    }
}

/// Result type alias for gradedist operations
pub type Result<T> = std::result::Result<T, GradeDistError>;
