//! A single submitted grade observation.
//!
//! A submission carries the student's own grade plus the share of the
//! class that scored lower, the same, and higher. Expanding those three
//! shares over the scale yields the run-length segments stored by the
//! service.

use serde::{Deserialize, Serialize};

use crate::error::{GradeDistError, Result};
use crate::scale::{self, GRADE_LABELS, MAX_RANK};
use crate::segment::{Segment, WEIGHT_SUM_TOLERANCE};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawGradeReport {
    grade: String,
    dist: [f64; 3],
}

/// One grade observation: the received grade and the percentage of the
/// class below it, at it, and above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGradeReport", into = "RawGradeReport")]
pub struct GradeReport {
    rank: u8,
    dist: [f64; 3],
}

impl GradeReport {
    /// Create a new report (with validation)
    pub fn new(grade: &str, dist: [f64; 3]) -> Result<Self> {
        let rank = scale::rank_of(grade)?;
        for &share in &dist {
            // non-finite shares would poison the sum check below
            if !share.is_finite() || share < 0.0 {
                return Err(GradeDistError::InvalidWeight { weight: share });
            }
        }
        let sum: f64 = dist.iter().sum();
        if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(GradeDistError::SumMismatch { sum });
        }
        Ok(GradeReport { rank, dist })
    }

    /// Rank of the received grade
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Label of the received grade
    pub fn grade(&self) -> &'static str {
        // rank is validated at construction, so the index is in bounds
        GRADE_LABELS[self.rank as usize]
    }

    /// The `(lower, same, higher)` percentage shares
    pub fn dist(&self) -> [f64; 3] {
        self.dist
    }

    /// Expand the three shares into scale-covering segments.
    ///
    /// `lower` fills `[0, rank-1]`, `same` fills `[rank, rank]`, and
    /// `higher` fills `[rank+1, 9]`. At the scale edges the empty range
    /// is omitted; a materially nonzero share for an omitted range then
    /// fails the weight-sum check when the segments are built into a
    /// distribution, rejecting the inconsistent report.
    pub fn to_segments(&self) -> Result<Vec<Segment>> {
        let [lower, same, higher] = self.dist;
        let mut segments = Vec::with_capacity(3);
        if self.rank > 0 {
            segments.push(Segment::new(0, self.rank - 1, lower)?);
        }
        segments.push(Segment::new(self.rank, self.rank, same)?);
        if self.rank < MAX_RANK {
            segments.push(Segment::new(self.rank + 1, MAX_RANK, higher)?);
        }
        Ok(segments)
    }
}

impl TryFrom<RawGradeReport> for GradeReport {
    type Error = GradeDistError;

    fn try_from(raw: RawGradeReport) -> Result<Self> {
        GradeReport::new(&raw.grade, raw.dist)
    }
}

impl From<GradeReport> for RawGradeReport {
    fn from(report: GradeReport) -> Self {
        RawGradeReport {
            grade: report.grade().to_string(),
            dist: report.dist,
        }
    }
}
