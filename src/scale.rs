//! The fixed ordinal grade scale.
//!
//! Ten labels, lowest to highest, each mapped to a rank in [0, 9].
//! The table is a compile-time constant; no mutation, no lazy
//! initialization.

use crate::error::{GradeDistError, Result};

/// Grade labels ordered by rank: `GRADE_LABELS[0]` is the lowest (F),
/// `GRADE_LABELS[9]` the highest (A+).
pub const GRADE_LABELS: [&str; 10] = ["F", "C-", "C", "C+", "B-", "B", "B+", "A-", "A", "A+"];

/// Highest rank on the scale.
pub const MAX_RANK: u8 = 9;

/// Look up the label for a rank.
pub fn label_of(rank: u8) -> Result<&'static str> {
    GRADE_LABELS
        .get(rank as usize)
        .copied()
        .ok_or(GradeDistError::OutOfRange { rank })
}

/// Look up the rank for a label.
pub fn rank_of(label: &str) -> Result<u8> {
    GRADE_LABELS
        .iter()
        .position(|&l| l == label)
        .map(|i| i as u8)
        .ok_or_else(|| GradeDistError::UnknownLabel {
            label: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_of_bounds() {
        assert_eq!(label_of(0).unwrap(), "F");
        assert_eq!(label_of(9).unwrap(), "A+");
        assert!(matches!(
            label_of(10),
            Err(GradeDistError::OutOfRange { rank: 10 })
        ));
    }

    #[test]
    fn test_rank_of_known_labels() {
        assert_eq!(rank_of("F").unwrap(), 0);
        assert_eq!(rank_of("B+").unwrap(), 6);
        assert_eq!(rank_of("A+").unwrap(), 9);
    }

    #[test]
    fn test_rank_of_unknown_label() {
        assert!(matches!(
            rank_of("E"),
            Err(GradeDistError::UnknownLabel { .. })
        ));
        // Case matters: the scale has exactly ten fixed strings
        assert!(rank_of("a+").is_err());
    }

    #[test]
    fn test_round_trip_all_ranks() {
        for rank in 0..=MAX_RANK {
            let label = label_of(rank).unwrap();
            assert_eq!(rank_of(label).unwrap(), rank);
        }
    }
}
