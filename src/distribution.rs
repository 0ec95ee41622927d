//! Validated per-offering grade distribution and its derived identifier.
//!
//! Identifier format:
//! - 16 lowercase hex characters
//! - SHA-256 over the NUL-joined key
//!   `course_code \0 class_section \0 semester`, truncated
//! - A pure function of that key: stable across processes, runtimes,
//!   and independent implementations as long as the join format and
//!   hash stay pinned. An absent class section joins as the empty
//!   string.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::course::CourseCode;
use crate::error::{GradeDistError, Result};
use crate::report::GradeReport;
use crate::scale::MAX_RANK;
use crate::segment::{Segment, WEIGHT_SUM_TOLERANCE};
use crate::semester::Semester;

/// Deterministic identifier of one course offering's distribution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DistributionId(String);

impl DistributionId {
    /// Identifier length in hex characters
    pub const LEN: usize = 16;

    /// Field delimiter in the canonical key join
    const KEY_DELIMITER: &'static str = "\u{0}";

    /// Create a DistributionId from a raw string (with validation)
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.len() != Self::LEN || !id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase())
        {
            return Err(GradeDistError::InvalidDistributionId { id });
        }
        Ok(DistributionId(id))
    }

    /// Derive the identifier for an offering key.
    ///
    /// Identical keys always produce the identical id; the hash input
    /// is the canonical join, never a language-native structure
    /// rendering. An absent class section joins as the empty string,
    /// so `None` and `Some("")` name the same offering on purpose.
    pub fn derive(course_code: &str, class_section: Option<&str>, semester: &Semester) -> Self {
        let key = [course_code, class_section.unwrap_or(""), semester.as_str()]
            .join(Self::KEY_DELIMITER);
        let digest = Sha256::digest(key.as_bytes());
        let full_hex = hex::encode(digest);
        DistributionId(full_hex[..Self::LEN].to_string())
    }

    /// Get the id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistributionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DistributionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DistributionId {
    type Error = GradeDistError;

    fn try_from(value: String) -> Result<Self> {
        DistributionId::new(value)
    }
}

impl From<DistributionId> for String {
    fn from(id: DistributionId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawGradeDistribution {
    course_code: CourseCode,
    #[serde(default)]
    class_section: Option<String>,
    semester: Semester,
    #[serde(default)]
    lecturer: Option<String>,
    segments: Vec<Segment>,
    // The id is backend-derived; a caller-supplied one is discarded
    // and recomputed.
    #[serde(default)]
    #[allow(dead_code)]
    id: Option<String>,
}

/// Full validated histogram for one course offering, run-length-encoded
/// as segments over the grade scale.
///
/// Construction is atomic: validation failure yields no object at all.
/// Deserialization funnels through [`GradeDistribution::build`], so the
/// wire cannot introduce an invalid distribution or a forged id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradeDistribution")]
pub struct GradeDistribution {
    course_code: CourseCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_section: Option<String>,
    semester: Semester,
    #[serde(skip_serializing_if = "Option::is_none")]
    lecturer: Option<String>,
    segments: Vec<Segment>,
    id: DistributionId,
}

impl GradeDistribution {
    /// Build a distribution from candidate segments.
    ///
    /// Segments are re-sorted by `low` (input is expected sorted, but
    /// order is not assumed), then checked in one linear pass: coverage
    /// starts at rank 0, each segment begins right after its
    /// predecessor ends, coverage ends at rank 9. The weight sum must
    /// land within [`WEIGHT_SUM_TOLERANCE`] of 100.
    pub fn build(
        course_code: CourseCode,
        class_section: Option<String>,
        semester: Semester,
        lecturer: Option<String>,
        mut segments: Vec<Segment>,
    ) -> Result<Self> {
        segments.sort_by_key(Segment::low);
        validate_segments(&segments)?;

        let id = DistributionId::derive(course_code.as_str(), class_section.as_deref(), &semester);
        tracing::debug!(
            id = %id,
            course_code = %course_code,
            segments = segments.len(),
            "distribution_built"
        );
        Ok(GradeDistribution {
            course_code,
            class_section,
            semester,
            lecturer,
            segments,
            id,
        })
    }

    /// Build a distribution by expanding a single submitted report.
    pub fn from_report(
        course_code: CourseCode,
        class_section: Option<String>,
        semester: Semester,
        lecturer: Option<String>,
        report: &GradeReport,
    ) -> Result<Self> {
        let segments = report.to_segments()?;
        Self::build(course_code, class_section, semester, lecturer, segments)
    }

    /// Course code of the offering
    pub fn course_code(&self) -> &CourseCode {
        &self.course_code
    }

    /// Class section, if the offering has several
    pub fn class_section(&self) -> Option<&str> {
        self.class_section.as_deref()
    }

    /// Semester of the offering
    pub fn semester(&self) -> &Semester {
        &self.semester
    }

    /// Lecturer, when known
    pub fn lecturer(&self) -> Option<&str> {
        self.lecturer.as_deref()
    }

    /// The validated segments, sorted ascending by `low`
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Derived identifier of the offering key
    pub fn id(&self) -> &DistributionId {
        &self.id
    }
}

impl TryFrom<RawGradeDistribution> for GradeDistribution {
    type Error = GradeDistError;

    fn try_from(raw: RawGradeDistribution) -> Result<Self> {
        GradeDistribution::build(
            raw.course_code,
            raw.class_section,
            raw.semester,
            raw.lecturer,
            raw.segments,
        )
    }
}

/// Check full coverage, contiguity, and the weight sum in one pass.
fn validate_segments(segments: &[Segment]) -> Result<()> {
    let first = segments.first().ok_or(GradeDistError::EmptySegments)?;
    if first.low() != 0 {
        return Err(GradeDistError::NonContiguousSegments {
            index: 0,
            expected: 0,
            found: first.low(),
        });
    }

    let mut sum = first.weight();
    for (i, pair) in segments.windows(2).enumerate() {
        // high <= 9, so +1 cannot overflow
        let expected = pair[0].high() + 1;
        if pair[1].low() != expected {
            return Err(GradeDistError::NonContiguousSegments {
                index: i + 1,
                expected,
                found: pair[1].low(),
            });
        }
        sum += pair[1].weight();
    }

    if let Some(last) = segments.last() {
        if last.high() != MAX_RANK {
            return Err(GradeDistError::NonContiguousSegments {
                index: segments.len() - 1,
                expected: MAX_RANK,
                found: last.high(),
            });
        }
    }

    if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(GradeDistError::SumMismatch { sum });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(triples: &[(u8, u8, f64)]) -> Vec<Segment> {
        triples
            .iter()
            .map(|&(l, h, w)| Segment::new(l, h, w).unwrap())
            .collect()
    }

    fn build(segments: Vec<Segment>) -> Result<GradeDistribution> {
        GradeDistribution::build(
            CourseCode::new("CSIE1212").unwrap(),
            Some("01".to_string()),
            Semester::new("110-2").unwrap(),
            Some("林軒田".to_string()),
            segments,
        )
    }

    #[test]
    fn test_valid_two_segment_histogram() {
        let dist = build(segs(&[(0, 8, 91.0), (9, 9, 9.0)])).unwrap();
        assert_eq!(dist.segments().len(), 2);
        assert_eq!(dist.id().as_str().len(), 16);
        assert!(dist.id().as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_single_full_span_segment() {
        let dist = build(segs(&[(0, 9, 100.0)])).unwrap();
        assert_eq!(dist.segments().len(), 1);
    }

    #[test]
    fn test_gap_is_rejected() {
        // sum is 100 but rank 8 is uncovered
        let err = build(segs(&[(0, 7, 50.0), (9, 9, 50.0)])).unwrap_err();
        assert!(matches!(
            err,
            GradeDistError::NonContiguousSegments {
                index: 1,
                expected: 8,
                found: 9,
            }
        ));
    }

    #[test]
    fn test_overlap_is_rejected() {
        let err = build(segs(&[(0, 5, 50.0), (5, 9, 50.0)])).unwrap_err();
        assert!(matches!(
            err,
            GradeDistError::NonContiguousSegments { index: 1, .. }
        ));
    }

    #[test]
    fn test_coverage_must_start_at_zero() {
        let err = build(segs(&[(1, 9, 100.0)])).unwrap_err();
        assert!(matches!(
            err,
            GradeDistError::NonContiguousSegments {
                index: 0,
                expected: 0,
                found: 1,
            }
        ));
    }

    #[test]
    fn test_coverage_must_end_at_nine() {
        let err = build(segs(&[(0, 8, 100.0)])).unwrap_err();
        assert!(matches!(
            err,
            GradeDistError::NonContiguousSegments {
                index: 0,
                expected: 9,
                found: 8,
            }
        ));
    }

    #[test]
    fn test_sum_tolerance() {
        // 99 and 101 are inside the tolerance window
        assert!(build(segs(&[(0, 8, 90.0), (9, 9, 9.0)])).is_ok());
        assert!(build(segs(&[(0, 8, 92.0), (9, 9, 9.0)])).is_ok());

        let err = build(segs(&[(0, 8, 80.0), (9, 9, 9.0)])).unwrap_err();
        assert!(matches!(err, GradeDistError::SumMismatch { sum } if (sum - 89.0).abs() < 1e-9));
    }

    #[test]
    fn test_empty_segments() {
        assert!(matches!(
            build(vec![]),
            Err(GradeDistError::EmptySegments)
        ));
    }

    #[test]
    fn test_unsorted_input_is_resorted() {
        let dist = build(segs(&[(9, 9, 9.0), (0, 8, 91.0)])).unwrap();
        assert_eq!(dist.segments()[0].low(), 0);
        assert_eq!(dist.segments()[1].low(), 9);
    }

    #[test]
    fn test_id_depends_only_on_offering_key() {
        let a = build(segs(&[(0, 8, 91.0), (9, 9, 9.0)])).unwrap();
        let b = build(segs(&[(0, 9, 100.0)])).unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_id_changes_with_each_key_field() {
        let base = build(segs(&[(0, 9, 100.0)])).unwrap();
        let semester = Semester::new("110-2").unwrap();
        let segments = || segs(&[(0, 9, 100.0)]);

        let other_course = GradeDistribution::build(
            CourseCode::new("MATH4008").unwrap(),
            Some("01".to_string()),
            semester.clone(),
            None,
            segments(),
        )
        .unwrap();
        assert_ne!(base.id(), other_course.id());

        let other_section = GradeDistribution::build(
            CourseCode::new("CSIE1212").unwrap(),
            Some("02".to_string()),
            semester.clone(),
            None,
            segments(),
        )
        .unwrap();
        assert_ne!(base.id(), other_section.id());

        let other_semester = GradeDistribution::build(
            CourseCode::new("CSIE1212").unwrap(),
            Some("01".to_string()),
            Semester::new("111-1").unwrap(),
            None,
            segments(),
        )
        .unwrap();
        assert_ne!(base.id(), other_semester.id());
    }

    #[test]
    fn test_lecturer_does_not_affect_id() {
        let with = build(segs(&[(0, 9, 100.0)])).unwrap();
        let without = GradeDistribution::build(
            CourseCode::new("CSIE1212").unwrap(),
            Some("01".to_string()),
            Semester::new("110-2").unwrap(),
            None,
            segs(&[(0, 9, 100.0)]),
        )
        .unwrap();
        assert_eq!(with.id(), without.id());
    }

    #[test]
    fn test_derive_is_stable() {
        // Pinned: the join format and hash must never drift, ids are
        // storage keys across process restarts.
        let id = DistributionId::derive(
            "CSIE1212",
            Some("01"),
            &Semester::new("110-2").unwrap(),
        );
        assert_eq!(id, DistributionId::derive(
            "CSIE1212",
            Some("01"),
            &Semester::new("110-2").unwrap(),
        ));
        assert_eq!(id.as_str().len(), DistributionId::LEN);
    }

    #[test]
    fn test_id_string_validation() {
        assert!(DistributionId::new("0123456789abcdef").is_ok());
        assert!(DistributionId::new("0123456789ABCDEF").is_err());
        assert!(DistributionId::new("0123456789abcde").is_err());
        assert!(DistributionId::new("0123456789abcdeg").is_err());
    }

    #[test]
    fn test_from_report() {
        let report = GradeReport::new("A+", [91.0, 9.0, 0.0]).unwrap();
        let dist = GradeDistribution::from_report(
            CourseCode::new("CSIE1212").unwrap(),
            Some("01".to_string()),
            Semester::new("110-2").unwrap(),
            None,
            &report,
        )
        .unwrap();
        let triples: Vec<_> = dist.segments().iter().map(Segment::as_triple).collect();
        assert_eq!(triples, vec![(0, 8, 91.0), (9, 9, 9.0)]);
    }
}
