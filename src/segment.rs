//! One contiguous slice of the grade scale carrying a percentage weight.

use serde::{Deserialize, Serialize};

use crate::error::{GradeDistError, Result};
use crate::scale::MAX_RANK;

/// Flat wire form of a segment: `[low, high, weight]`.
pub type SegmentTriple = (u8, u8, f64);

/// Absolute tolerance around 100 for percentage sums.
///
/// Explicit epsilon comparison; never compare the sum for exact
/// floating-point equality.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1.0;

/// The share of grades falling in the inclusive rank range `[low, high]`.
///
/// Immutable once built; both construction and deserialization go
/// through the same validation, so an invalid segment cannot enter
/// through the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentTriple", into = "SegmentTriple")]
pub struct Segment {
    low: u8,
    high: u8,
    weight: f64,
}

impl Segment {
    /// Create a new segment (with validation)
    pub fn new(low: u8, high: u8, weight: f64) -> Result<Self> {
        if low > high || high > MAX_RANK {
            return Err(GradeDistError::InvalidRange { low, high });
        }
        // NaN fails every comparison, so the sum check downstream
        // would never fire; reject non-finite weights here
        if !weight.is_finite() || weight < 0.0 {
            return Err(GradeDistError::InvalidWeight { weight });
        }
        Ok(Segment { low, high, weight })
    }

    /// Lowest rank covered (inclusive)
    pub fn low(&self) -> u8 {
        self.low
    }

    /// Highest rank covered (inclusive)
    pub fn high(&self) -> u8 {
        self.high
    }

    /// Percentage weight of this range
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Triple form for interchange with flat wire encodings.
    pub fn as_triple(&self) -> SegmentTriple {
        (self.low, self.high, self.weight)
    }
}

impl TryFrom<SegmentTriple> for Segment {
    type Error = GradeDistError;

    fn try_from((low, high, weight): SegmentTriple) -> Result<Self> {
        Segment::new(low, high, weight)
    }
}

impl From<Segment> for SegmentTriple {
    fn from(segment: Segment) -> Self {
        segment.as_triple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_range() {
        assert!(Segment::new(0, 9, 100.0).is_ok());
        assert!(Segment::new(3, 3, 0.0).is_ok());

        assert!(matches!(
            Segment::new(5, 4, 10.0),
            Err(GradeDistError::InvalidRange { low: 5, high: 4 })
        ));
        assert!(matches!(
            Segment::new(0, 10, 10.0),
            Err(GradeDistError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_new_rejects_negative_weight() {
        assert!(matches!(
            Segment::new(0, 9, -0.5),
            Err(GradeDistError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_new_rejects_non_finite_weight() {
        for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Segment::new(0, 9, weight),
                Err(GradeDistError::InvalidWeight { .. })
            ));
        }
    }

    #[test]
    fn test_triple_round_trip() {
        let segment = Segment::new(2, 7, 42.5).unwrap();
        let triple = segment.as_triple();
        assert_eq!(triple, (2, 7, 42.5));
        assert_eq!(Segment::try_from(triple).unwrap(), segment);
    }

    #[test]
    fn test_wire_form_is_flat_array() {
        let segment = Segment::new(0, 8, 91.0).unwrap();
        let json = serde_json::to_string(&segment).unwrap();
        assert_eq!(json, "[0,8,91.0]");

        let back: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, segment);
    }

    #[test]
    fn test_wire_form_rejects_invalid_triple() {
        let result: std::result::Result<Segment, _> = serde_json::from_str("[4,2,10.0]");
        assert!(result.is_err());

        let result: std::result::Result<Segment, _> = serde_json::from_str("[0,9,-1.0]");
        assert!(result.is_err());
    }
}
