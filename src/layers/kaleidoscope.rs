use log::debug;
use ndarray::{Array3, ArrayView3, ArrayViewMut1, ArrayViewMut3, Axis};
use rayon::prelude::*;

use crate::error::Result;
use crate::layers::field::{self, FoldSummary, SampleStatus};
use crate::ops::{
    admits, reduce, FailureReason, Frame, Geometry, IterationLimits, Reduction, Sample,
    SectorFold, TriangleGroup,
};

/// Options of a field pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldOptions {
    pub max_iterations: usize,
    pub min_iterations: usize,
    /// Overwrite the input field instead of allocating a new one.
    pub in_place: bool,
    /// Centre of the kaleidoscope in map coordinates.
    pub center: (f32, f32),
    /// Rotation of the mirrors around `center`, in radians.
    pub angle: f32,
}

impl Default for FoldOptions {
    fn default() -> Self {
        let limits = IterationLimits::default();
        Self {
            max_iterations: limits.max_iterations,
            min_iterations: limits.min_iterations,
            in_place: true,
            center: (0.0, 0.0),
            angle: 0.0,
        }
    }
}

impl FoldOptions {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_min_iterations(mut self, min_iterations: usize) -> Self {
        self.min_iterations = min_iterations;
        self
    }

    pub fn with_in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }

    pub fn with_center(mut self, center_x: f32, center_y: f32) -> Self {
        self.center = (center_x, center_y);
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn frame(&self) -> Result<Frame> {
        Frame::new(self.angle, self.center)
    }

    pub fn limits(&self) -> IterationLimits {
        IterationLimits {
            max_iterations: self.max_iterations,
            min_iterations: self.min_iterations,
        }
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Identity,
    Dihedral(SectorFold),
    Triangle { fold: SectorFold, geometry: Geometry },
}

/// Everything derived from `(k, m, n)` for one pass: geometry, third mirror and rotation table.
///
/// Immutable once built, so a single instance is shared by all worker threads.
#[derive(Debug, Clone)]
pub struct Kaleidoscope {
    group: TriangleGroup,
    mode: Mode,
    limits: IterationLimits,
    frame: Frame,
}

impl Kaleidoscope {
    pub fn new(group: TriangleGroup, limits: IterationLimits) -> Result<Self> {
        let mode = if group.is_identity() {
            Mode::Identity
        } else {
            let fold = SectorFold::new(group.k)?;
            match group.classify() {
                Some(geometry) => Mode::Triangle { fold, geometry },
                None => Mode::Dihedral(fold),
            }
        };
        match &mode {
            Mode::Identity => debug!("kaleidoscope {}: identity map", group),
            Mode::Dihedral(_) => debug!("kaleidoscope {}: dihedral fold of order {}", group, group.k),
            Mode::Triangle { geometry, .. } => debug!(
                "kaleidoscope {}: angle sum {:.4}, {}",
                group,
                group.angle_sum(),
                geometry
            ),
        }
        Ok(Self {
            group,
            mode,
            limits,
            frame: Frame::IDENTITY,
        })
    }

    /// Moves the centre and rotates the mirrors of the kaleidoscope.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        if !frame.is_identity() {
            debug!(
                "kaleidoscope {}: centre ({}, {}), angle {:.4}",
                self.group, frame.center_x, frame.center_y, frame.angle
            );
        }
        self.frame = frame;
        self
    }

    pub fn from_orders(k: i32, m: i32, n: i32, limits: IterationLimits) -> Result<Self> {
        Self::new(TriangleGroup::new(k, m, n)?, limits)
    }

    pub fn group(&self) -> &TriangleGroup {
        &self.group
    }

    pub fn limits(&self) -> IterationLimits {
        self.limits
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.mode {
            Mode::Triangle { geometry, .. } => Some(geometry),
            _ => None,
        }
    }

    pub fn sector_fold(&self) -> Option<&SectorFold> {
        match &self.mode {
            Mode::Identity => None,
            Mode::Dihedral(fold) | Mode::Triangle { fold, .. } => Some(fold),
        }
    }

    /// Reduces one valid sample, including the domain checks before and after the loop.
    ///
    /// The sample is taken into the frame of the kaleidoscope first and the result is
    /// mapped back into map coordinates.
    pub fn reduce_sample(&self, sample: Sample) -> Reduction {
        if matches!(self.mode, Mode::Identity) {
            return Reduction::Converged {
                sample,
                iterations: 0,
                reflections: 0,
            };
        }
        if self.frame.is_identity() {
            return self.reduce_local(sample);
        }
        match self.reduce_local(self.frame.to_local(sample)) {
            Reduction::Converged {
                sample,
                iterations,
                reflections,
            } => {
                let sample = self.frame.to_global(sample);
                if !sample.is_finite() {
                    return Reduction::Failed {
                        iterations,
                        reason: FailureReason::Degenerate,
                    };
                }
                Reduction::Converged {
                    sample,
                    iterations,
                    reflections,
                }
            }
            failed => failed,
        }
    }

    fn reduce_local(&self, mut sample: Sample) -> Reduction {
        match &self.mode {
            Mode::Identity => Reduction::Converged {
                sample,
                iterations: 0,
                reflections: 0,
            },
            Mode::Dihedral(fold) => {
                if !sample.is_finite() {
                    return Reduction::Failed {
                        iterations: 0,
                        reason: FailureReason::OutsideDomain,
                    };
                }
                match fold.settle(&mut sample) {
                    Some(reflections) if sample.is_finite() => Reduction::Converged {
                        sample,
                        iterations: 0,
                        reflections,
                    },
                    Some(_) => Reduction::Failed {
                        iterations: 0,
                        reason: FailureReason::Degenerate,
                    },
                    None => Reduction::Failed {
                        iterations: 0,
                        reason: FailureReason::Exhausted,
                    },
                }
            }
            Mode::Triangle { fold, geometry } => {
                if !admits(geometry, &sample) {
                    return Reduction::Failed {
                        iterations: 0,
                        reason: FailureReason::OutsideDomain,
                    };
                }
                match reduce(fold, geometry, sample, self.limits) {
                    // rounding may push a converged point onto the disc boundary
                    Reduction::Converged { sample, iterations, .. } if !admits(geometry, &sample) => {
                        Reduction::Failed {
                            iterations,
                            reason: FailureReason::OutsideDomain,
                        }
                    }
                    reduction => reduction,
                }
            }
        }
    }

    /// Maps one `(x, y, parity)` triple the same way a field pass does.
    pub fn fold_point(&self, raw: [f32; 3]) -> [f32; 3] {
        if field::is_excluded(raw[2]) || matches!(self.mode, Mode::Identity) {
            return raw;
        }
        self.reduce_sample(Sample::from_raw(raw)).output().to_raw()
    }

    fn fold_cell(&self, lane: &mut ArrayViewMut1<f32>) -> SampleStatus {
        let raw = field::read(lane);
        if field::is_excluded(raw[2]) {
            return SampleStatus::Skipped;
        }
        if matches!(self.mode, Mode::Identity) {
            return SampleStatus::Reduced;
        }
        let reduction = self.reduce_sample(Sample::from_raw(raw));
        field::write(lane, reduction.output().to_raw());
        if reduction.is_converged() {
            SampleStatus::Reduced
        } else {
            SampleStatus::Invalidated
        }
    }

    /// Folds every sample of a `(rows, cols, 3)` field in place.
    pub fn fold_field_inplace(&self, field: ArrayViewMut3<f32>) -> Result<FoldSummary> {
        field::check_shape(field.shape())?;
        Ok(self.fold_rows(field))
    }

    /// Folds a copy of the field; the input is left untouched.
    pub fn fold_field_copy(&self, field: ArrayView3<f32>) -> Result<(Array3<f32>, FoldSummary)> {
        field::check_shape(field.shape())?;
        let mut output = field.to_owned();
        let summary = self.fold_rows(output.view_mut());
        Ok((output, summary))
    }

    /// One rayon task per row; the shape is already checked.
    fn fold_rows(&self, mut field: ArrayViewMut3<f32>) -> FoldSummary {
        let summary = field
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .map(|mut row| {
                let mut summary = FoldSummary::default();
                for mut lane in row.lanes_mut(Axis(1)) {
                    summary.record(self.fold_cell(&mut lane));
                }
                summary
            })
            .reduce(FoldSummary::default, FoldSummary::merge);

        debug!(
            "kaleidoscope {}: {} reduced, {} invalidated, {} skipped",
            self.group, summary.reduced, summary.invalidated, summary.skipped
        );
        summary
    }
}

/// Result of [`fold_field`]: the input buffer itself, or a new field of the same shape.
#[derive(Debug)]
pub enum FoldedField<'a> {
    InPlace {
        field: &'a mut Array3<f32>,
        summary: FoldSummary,
    },
    Copied {
        field: Array3<f32>,
        summary: FoldSummary,
    },
}

impl FoldedField<'_> {
    pub fn view(&self) -> ArrayView3<'_, f32> {
        match self {
            FoldedField::InPlace { field, .. } => field.view(),
            FoldedField::Copied { field, .. } => field.view(),
        }
    }

    pub fn summary(&self) -> FoldSummary {
        match self {
            FoldedField::InPlace { summary, .. } | FoldedField::Copied { summary, .. } => *summary,
        }
    }

    pub fn is_in_place(&self) -> bool {
        matches!(self, FoldedField::InPlace { .. })
    }

    pub fn into_owned(self) -> Array3<f32> {
        match self {
            FoldedField::InPlace { field, .. } => field.clone(),
            FoldedField::Copied { field, .. } => field,
        }
    }
}

/// Folds a `(rows, cols, 3)` field of `(x, y, parity)` samples into the fundamental
/// triangle of the `(k, m, n)` group.
///
/// `options.center` and `options.angle` place the kaleidoscope in the map; with the
/// defaults its centre is the origin and the first mirror is the x-axis.
///
/// Parameter errors are reported before any sample is touched. Samples that cannot be
/// reduced are marked invalid in the returned field.
pub fn fold_field(
    field: &mut Array3<f32>,
    k: i32,
    m: i32,
    n: i32,
    options: FoldOptions,
) -> Result<FoldedField<'_>> {
    let kaleidoscope =
        Kaleidoscope::from_orders(k, m, n, options.limits())?.with_frame(options.frame()?);
    if options.in_place {
        let summary = kaleidoscope.fold_field_inplace(field.view_mut())?;
        Ok(FoldedField::InPlace { field, summary })
    } else {
        let (field, summary) = kaleidoscope.fold_field_copy(field.view())?;
        Ok(FoldedField::Copied { field, summary })
    }
}
