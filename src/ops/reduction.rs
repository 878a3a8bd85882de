use crate::ops::geometry::{Geometry, Reflection};
use crate::ops::sample::Sample;
use crate::ops::sector::SectorFold;

pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Bounds of the reduction loop.
///
/// `min_iterations > 0` rejects samples that reach the fundamental domain too
/// quickly, which cuts a symmetric hole around the centre of the tiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationLimits {
    pub max_iterations: usize,
    pub min_iterations: usize,
}

impl Default for IterationLimits {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            min_iterations: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Rejected by the domain check before or after the reduction.
    OutsideDomain,
    /// `max_iterations` passes without reaching a fixed point.
    Exhausted,
    /// Converged in fewer mapping steps than `min_iterations`.
    Hole,
    /// An inversion too close to the circle centre.
    Degenerate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reduction {
    Converged {
        sample: Sample,
        /// Loop passes including the final one that changed nothing.
        iterations: usize,
        /// Orientation-reversing operations applied, initial fold included.
        reflections: u32,
    },
    Failed {
        iterations: usize,
        reason: FailureReason,
    },
}

impl Reduction {
    pub fn is_converged(&self) -> bool {
        matches!(self, Reduction::Converged { .. })
    }

    pub fn iterations(&self) -> usize {
        match self {
            Reduction::Converged { iterations, .. } | Reduction::Failed { iterations, .. } => {
                *iterations
            }
        }
    }

    /// The sample to write back: the reduced point, or the invalid marker.
    pub fn output(&self) -> Sample {
        match self {
            Reduction::Converged { sample, .. } => *sample,
            Reduction::Failed { .. } => Sample::INVALID,
        }
    }
}

/// Folds the sample into the fundamental triangle.
///
/// One initial fold puts the sample into the canonical sector, then every pass
/// applies the third mirror followed by another fold. A pass in which neither
/// moves the sample ends the loop.
pub fn reduce(
    fold: &SectorFold,
    geometry: &Geometry,
    mut sample: Sample,
    limits: IterationLimits,
) -> Reduction {
    let mut reflections = fold.fold(&mut sample).reflections();

    for pass in 1..=limits.max_iterations {
        let inverted = match geometry.reflect(&mut sample) {
            Reflection::None => false,
            Reflection::Applied => {
                reflections += 1;
                true
            }
            Reflection::Degenerate => {
                return Reduction::Failed {
                    iterations: pass,
                    reason: FailureReason::Degenerate,
                }
            }
        };
        let step = fold.fold(&mut sample);
        reflections += step.reflections();

        if !inverted && !step.moved() {
            // the last pass only confirms the fixed point
            if pass <= limits.min_iterations {
                return Reduction::Failed {
                    iterations: pass,
                    reason: FailureReason::Hole,
                };
            }
            return Reduction::Converged {
                sample,
                iterations: pass,
                reflections,
            };
        }
    }

    Reduction::Failed {
        iterations: limits.max_iterations,
        reason: FailureReason::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::geometry::TriangleGroup;
    use crate::ops::sample::Parity;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn setup(k: i32, m: i32, n: i32) -> (SectorFold, Geometry) {
        let group = TriangleGroup::new(k, m, n).unwrap();
        (SectorFold::new(k).unwrap(), group.classify().unwrap())
    }

    #[test]
    fn test_point_in_base_triangle_converges_at_once() {
        let (fold, geometry) = setup(5, 4, 2);
        let reduction = reduce(
            &fold,
            &geometry,
            Sample::new(0.3, 0.2, Parity::Even),
            IterationLimits::default(),
        );
        assert_eq!(
            reduction,
            Reduction::Converged {
                sample: Sample::new(0.3, 0.2, Parity::Even),
                iterations: 1,
                reflections: 0,
            }
        );
    }

    #[test]
    fn test_euclidean_442_lattice_point() {
        let (fold, geometry) = setup(4, 4, 2);
        let reduction = reduce(
            &fold,
            &geometry,
            Sample::new(1.3, -0.2, Parity::Odd),
            IterationLimits::default(),
        );
        let Reduction::Converged { sample, iterations, reflections } = reduction else {
            panic!("expected convergence, got {:?}", reduction);
        };
        // mirror at x-axis, mirror at x = 0.5, half turn, mirror at x-axis
        assert_eq!(iterations, 2);
        assert_eq!(reflections, 3);
        assert_eq!(sample.parity, Parity::Even);
        assert_relative_eq!(sample.x, 0.3, epsilon = EPSILON);
        assert_relative_eq!(sample.y, 0.2, epsilon = EPSILON);
    }

    #[test]
    fn test_hyperbolic_sample_outside_triangle_is_inverted() {
        let (fold, geometry) = setup(5, 4, 2);
        let reduction = reduce(
            &fold,
            &geometry,
            Sample::new(0.5, 0.1, Parity::Even),
            IterationLimits::default(),
        );
        let Reduction::Converged { sample, iterations, reflections } = reduction else {
            panic!("expected convergence, got {:?}", reduction);
        };
        assert!(iterations >= 2);
        assert!(sample.norm_sq() < 1.0);
        assert!(fold.contains(sample.x, sample.y, 1e-5));
        let expected = if reflections % 2 == 0 { Parity::Even } else { Parity::Odd };
        assert_eq!(sample.parity, expected);
    }

    #[test]
    fn test_min_iterations_cut_a_hole() {
        let (fold, geometry) = setup(5, 4, 2);
        let sample = Sample::new(0.3, 0.2, Parity::Even);
        let limits = IterationLimits {
            max_iterations: 100,
            min_iterations: 3,
        };
        assert_eq!(
            reduce(&fold, &geometry, sample, limits),
            Reduction::Failed {
                iterations: 1,
                reason: FailureReason::Hole,
            }
        );
    }

    #[test]
    fn test_iteration_bound() {
        let (fold, geometry) = setup(4, 4, 2);
        // a far lattice point needs one pass per unit cell it crosses
        let sample = Sample::new(10.3, 7.2, Parity::Even);
        let limits = IterationLimits {
            max_iterations: 2,
            min_iterations: 0,
        };
        let reduction = reduce(&fold, &geometry, sample, limits);
        assert_eq!(
            reduction,
            Reduction::Failed {
                iterations: 2,
                reason: FailureReason::Exhausted,
            }
        );

        let reduction = reduce(&fold, &geometry, sample, IterationLimits::default());
        assert!(reduction.is_converged());
        assert!(reduction.iterations() <= DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_zero_max_iterations_never_converges() {
        let (fold, geometry) = setup(5, 4, 2);
        let limits = IterationLimits {
            max_iterations: 0,
            min_iterations: 0,
        };
        let reduction = reduce(&fold, &geometry, Sample::new(0.3, 0.2, Parity::Even), limits);
        assert_eq!(reduction.output(), Sample::INVALID);
    }
}
