use ndarray::{Array3, ArrayViewMut1};

use crate::error::{KaleidoscopeError, Result};
use crate::ops::sample::INVALID_THRESHOLD;

/// Length of the last axis of a point field: x, y, parity.
pub const CHANNELS: usize = 3;

/// Checks that the field is a `(rows, cols, 3)` grid.
pub fn check_shape(shape: &[usize]) -> Result<()> {
    if shape.len() != 3 || shape[2] != CHANNELS {
        return Err(KaleidoscopeError::InvalidFieldShape {
            shape: shape.to_vec(),
            reason: "expected (rows, cols, 3) with x, y and parity planes",
        });
    }
    Ok(())
}

/// Builds a field of valid, even samples on a regular grid over `[-half, half]²`.
///
/// Row 0 is the top edge (largest y).
pub fn identity_field(rows: usize, cols: usize, half: f32) -> Array3<f32> {
    let step = |i: usize, n: usize| {
        if n > 1 {
            2.0 * half * i as f32 / (n - 1) as f32 - half
        } else {
            0.0
        }
    };
    Array3::from_shape_fn((rows, cols, CHANNELS), |(r, c, ch)| match ch {
        0 => step(c, cols),
        1 => -step(r, rows),
        _ => 0.0,
    })
}

#[inline(always)]
pub(crate) fn read(lane: &ArrayViewMut1<f32>) -> [f32; 3] {
    [lane[0], lane[1], lane[2]]
}

#[inline(always)]
pub(crate) fn write(lane: &mut ArrayViewMut1<f32>, raw: [f32; 3]) {
    lane[0] = raw[0];
    lane[1] = raw[1];
    lane[2] = raw[2];
}

/// Samples already excluded from the image before the pass.
#[inline(always)]
pub fn is_excluded(raw_parity: f32) -> bool {
    raw_parity.is_nan() || raw_parity < INVALID_THRESHOLD
}

/// Per-sample result of a pass, kept to build the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStatus {
    Reduced,
    Invalidated,
    Skipped,
}

/// Counts of what a field pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldSummary {
    /// Samples written back with a valid parity.
    pub reduced: usize,
    /// Samples the engine marked invalid.
    pub invalidated: usize,
    /// Samples that were already invalid and passed through.
    pub skipped: usize,
}

impl FoldSummary {
    pub fn record(&mut self, status: SampleStatus) {
        match status {
            SampleStatus::Reduced => self.reduced += 1,
            SampleStatus::Invalidated => self.invalidated += 1,
            SampleStatus::Skipped => self.skipped += 1,
        }
    }

    /// Sum of the counts of two disjoint parts of a field.
    pub fn merge(self, other: Self) -> Self {
        Self {
            reduced: self.reduced + other.reduced,
            invalidated: self.invalidated + other.invalidated,
            skipped: self.skipped + other.skipped,
        }
    }

    pub fn total(&self) -> usize {
        self.reduced + self.invalidated + self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Axis;

    #[test]
    fn test_shape_check() {
        assert!(check_shape(&[4, 5, 3]).is_ok());
        assert!(check_shape(&[0, 0, 3]).is_ok());
        assert!(matches!(
            check_shape(&[4, 5, 2]),
            Err(KaleidoscopeError::InvalidFieldShape { .. })
        ));
    }

    #[test]
    fn test_identity_field_corners() {
        let field = identity_field(3, 5, 1.0);
        assert_eq!(field.shape(), &[3, 5, 3]);
        assert_relative_eq!(field[[0, 0, 0]], -1.0);
        assert_relative_eq!(field[[0, 0, 1]], 1.0);
        assert_relative_eq!(field[[2, 4, 0]], 1.0);
        assert_relative_eq!(field[[2, 4, 1]], -1.0);
        assert_relative_eq!(field[[1, 2, 0]], 0.0);
        assert!(field.index_axis(Axis(2), 2).iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_summary_counts() {
        let mut left = FoldSummary::default();
        left.record(SampleStatus::Reduced);
        left.record(SampleStatus::Reduced);
        let mut right = FoldSummary::default();
        right.record(SampleStatus::Skipped);
        right.record(SampleStatus::Invalidated);

        let summary = left.merge(right);
        assert_eq!(
            summary,
            FoldSummary {
                reduced: 2,
                invalidated: 1,
                skipped: 1
            }
        );
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.merge(FoldSummary::default()), summary);
    }
}
