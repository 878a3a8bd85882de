use std::f32::consts::PI;

use crate::error::Result;
use crate::ops::rotation::RotationTable;
use crate::ops::sample::Sample;

/// Folds needed at most before a sample stops moving; more than one only for
/// points that rounding puts just past the oblique mirror.
pub const SETTLE_PASSES: usize = 4;

/// What a single fold did to a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldStep {
    pub rotated: bool,
    pub mirrored: bool,
}

impl FoldStep {
    pub fn moved(&self) -> bool {
        self.rotated || self.mirrored
    }

    pub fn reflections(&self) -> u32 {
        self.mirrored as u32
    }
}

/// Dihedral fold of order k into the half-sector `0 <= angle <= π/k`.
#[derive(Debug, Clone)]
pub struct SectorFold {
    table: RotationTable,
    gamma: f32,
    inv_two_gamma: f32,
}

impl SectorFold {
    pub fn new(order: i32) -> Result<Self> {
        let table = RotationTable::new(order)?;
        let gamma = PI / order as f32;
        Ok(Self {
            table,
            gamma,
            inv_two_gamma: 0.5 / gamma,
        })
    }

    pub fn order(&self) -> i32 {
        self.table.order()
    }

    /// Half opening angle π/k of the canonical sector.
    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Index j of the sector `((2j-1)γ, (2j+1)γ]` holding the point.
    ///
    /// Ties on a sector boundary go to the lower index, so points on the
    /// oblique mirror stay in sector 0.
    #[inline(always)]
    pub fn sector(&self, x: f32, y: f32) -> i32 {
        (y.atan2(x) * self.inv_two_gamma - 0.5).ceil() as i32
    }

    /// Rotates the sector of the sample onto the x-axis and mirrors at the x-axis if needed.
    #[inline]
    pub fn fold(&self, sample: &mut Sample) -> FoldStep {
        let mut step = FoldStep::default();
        let sector = self.sector(sample.x, sample.y);
        if !self.table.is_identity(sector) {
            let (sine, cosine) = self.table.lookup(sector);
            let h = cosine * sample.x + sine * sample.y;
            sample.y = -sine * sample.x + cosine * sample.y;
            sample.x = h;
            step.rotated = true;
        }
        if sample.y < 0.0 {
            sample.y = -sample.y;
            sample.parity = sample.parity.flip();
            step.mirrored = true;
        }
        step
    }

    /// Folds until a fold leaves the sample unchanged and returns the reflections applied.
    ///
    /// `None` if the sample still moves after [`SETTLE_PASSES`] folds.
    pub fn settle(&self, sample: &mut Sample) -> Option<u32> {
        let mut reflections = 0;
        for _ in 0..SETTLE_PASSES {
            let step = self.fold(sample);
            if !step.moved() {
                return Some(reflections);
            }
            reflections += step.reflections();
        }
        None
    }

    /// True if the point lies in the closed canonical half-sector, up to `tolerance` radians.
    pub fn contains(&self, x: f32, y: f32, tolerance: f32) -> bool {
        let angle = y.atan2(x);
        angle >= -tolerance && angle <= self.gamma + tolerance
    }
}
