use std::f32::consts::PI;

use crate::error::{KaleidoscopeError, Result};
use crate::ops::sample::Sample;

/// Placement of the kaleidoscope in the plane: its centre and the rotation of its mirrors.
///
/// Samples are shifted and rotated into the local frame before folding and mapped back
/// afterwards, so the folded image keeps the coordinates of the input map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub center_x: f32,
    pub center_y: f32,
    /// Rotation in radians, reduced to `[0, 2π)`.
    pub angle: f32,
    sin: f32,
    cos: f32,
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame {
    pub const IDENTITY: Frame = Frame {
        center_x: 0.0,
        center_y: 0.0,
        angle: 0.0,
        sin: 0.0,
        cos: 1.0,
    };

    pub fn new(angle: f32, center: (f32, f32)) -> Result<Self> {
        let checks = [("angle", angle), ("center_x", center.0), ("center_y", center.1)];
        if let Some(&(name, value)) = checks.iter().find(|(_, v)| !v.is_finite()) {
            return Err(KaleidoscopeError::NonFiniteParameter { name, value });
        }
        let angle = angle - 2.0 * PI * (0.5 * angle / PI).floor();
        if angle == 0.0 && center == (0.0, 0.0) {
            return Ok(Self::IDENTITY);
        }
        Ok(Self {
            center_x: center.0,
            center_y: center.1,
            angle,
            sin: angle.sin(),
            cos: angle.cos(),
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Shift to the centre, then rotate by `-angle`.
    #[inline]
    pub fn to_local(&self, mut sample: Sample) -> Sample {
        let x = sample.x - self.center_x;
        let y = sample.y - self.center_y;
        sample.x = self.cos * x + self.sin * y;
        sample.y = -self.sin * x + self.cos * y;
        sample
    }

    /// Inverse of [`Frame::to_local`].
    #[inline]
    pub fn to_global(&self, mut sample: Sample) -> Sample {
        let (x, y) = (sample.x, sample.y);
        sample.x = self.cos * x - self.sin * y + self.center_x;
        sample.y = self.sin * x + self.cos * y + self.center_y;
        sample
    }
}
