use std::f32::consts::PI;
use std::fmt;

use approx::abs_diff_eq;

use crate::error::{KaleidoscopeError, Result};
use crate::ops::sample::Sample;

/// Largest supported order of the dihedral group at the centre.
pub const MAX_ORDER: i32 = 100;

/// Tolerance on `1/k + 1/m + 1/n` when deciding for Euclidean geometry.
pub const ANGLE_SUM_EPS: f32 = 1e-3;

/// The Euclidean mirror passes through `(EUCLIDEAN_MIRROR_X, 0)`. Its position only sets the scale.
pub const EUCLIDEAN_MIRROR_X: f32 = 0.5;

/// Inversions closer than this to the circle centre are not carried out.
pub const DEGENERATE_DIST_SQ: f32 = 1e-12;

/// Orders `(k, m, n)` of the triangle group: mirror angles π/k at the centre,
/// π/m between the oblique line and the third side, π/n between the x-axis and the third side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriangleGroup {
    pub k: i32,
    pub m: i32,
    pub n: i32,
}

impl TriangleGroup {
    pub fn new(k: i32, m: i32, n: i32) -> Result<Self> {
        if k > MAX_ORDER {
            return Err(KaleidoscopeError::InvalidParameter {
                name: "k",
                value: k as i64,
                reason: "the order at the centre is limited to 100",
            });
        }
        Ok(Self { k, m, n })
    }

    /// `k < 1` leaves every sample untouched.
    pub fn is_identity(&self) -> bool {
        self.k < 1
    }

    /// No triangle exists: only the dihedral group of order k acts.
    ///
    /// `k == 1` is included because both straight mirrors then coincide with the x-axis.
    pub fn is_dihedral(&self) -> bool {
        !self.is_identity() && (self.k == 1 || self.m < 2 || self.n < 2)
    }

    pub fn angle_sum(&self) -> f32 {
        1.0 / self.k as f32 + 1.0 / self.m as f32 + 1.0 / self.n as f32
    }

    /// Computes the geometry and its third mirror, `None` when there is no triangle.
    pub fn classify(&self) -> Option<Geometry> {
        if self.is_identity() || self.is_dihedral() {
            return None;
        }
        let alpha = PI / self.n as f32;
        let beta = PI / self.m as f32;
        let gamma = PI / self.k as f32;
        let angle_sum = self.angle_sum();

        let geometry = if abs_diff_eq!(angle_sum, 1.0, epsilon = ANGLE_SUM_EPS) {
            Geometry::Euclidean(Mirror {
                anchor_x: EUCLIDEAN_MIRROR_X,
                normal_x: alpha.sin(),
                normal_y: alpha.cos(),
            })
        } else if angle_sum > 1.0 {
            // circle of radius 1 first, then scaled so the equator of the
            // stereographic projection has radius 1
            let center_y = -alpha.cos();
            let center_x = -(center_y / gamma.tan() + beta.cos() / gamma.sin());
            let factor = 1.0 / (1.0 - center_x * center_x - center_y * center_y).sqrt();
            Geometry::Elliptic(Circle::scaled(center_x, center_y, factor))
        } else {
            // scaled so the Poincaré disc has radius 1
            let center_y = alpha.cos();
            let center_x = center_y / gamma.tan() + beta.cos() / gamma.sin();
            let factor = 1.0 / (center_x * center_x + center_y * center_y - 1.0).sqrt();
            Geometry::Hyperbolic(Circle::scaled(center_x, center_y, factor))
        };
        Some(geometry)
    }
}

impl fmt::Display for TriangleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            write!(f, "identity")
        } else if self.is_dihedral() {
            write!(f, "*{}", self.k)
        } else if self.k < 10 && self.m < 10 && self.n < 10 {
            write!(f, "*{}{}{}", self.k, self.m, self.n)
        } else {
            write!(f, "*{},{},{}", self.k, self.m, self.n)
        }
    }
}

/// Inverting circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center_x: f32,
    pub center_y: f32,
    pub radius2: f32,
}

impl Circle {
    fn scaled(center_x: f32, center_y: f32, factor: f32) -> Self {
        Self {
            center_x: factor * center_x,
            center_y: factor * center_y,
            radius2: factor * factor,
        }
    }

    #[inline(always)]
    fn dist_sq(&self, sample: &Sample) -> (f32, f32, f32) {
        let dx = sample.x - self.center_x;
        let dy = sample.y - self.center_y;
        (dx, dy, dx * dx + dy * dy)
    }

    #[inline(always)]
    fn invert(&self, sample: &mut Sample, dx: f32, dy: f32, d2: f32) {
        let factor = self.radius2 / d2;
        sample.x = self.center_x + factor * dx;
        sample.y = self.center_y + factor * dy;
        sample.parity = sample.parity.flip();
    }
}

/// Mirror line through `(anchor_x, 0)` with outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mirror {
    pub anchor_x: f32,
    pub normal_x: f32,
    pub normal_y: f32,
}

/// Result of one application of the third mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reflection {
    /// The sample already lies on the inner side.
    None,
    Applied,
    /// The inversion would divide by (almost) zero or leave the finite floats.
    Degenerate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Elliptic(Circle),
    Euclidean(Mirror),
    Hyperbolic(Circle),
}

impl Geometry {
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Elliptic(_) => "elliptic",
            Geometry::Euclidean(_) => "euclidean",
            Geometry::Hyperbolic(_) => "hyperbolic",
        }
    }

    pub fn is_hyperbolic(&self) -> bool {
        matches!(self, Geometry::Hyperbolic(_))
    }

    /// Maps the sample across the third side of the triangle if it lies outside.
    #[inline]
    pub fn reflect(&self, sample: &mut Sample) -> Reflection {
        match self {
            Geometry::Hyperbolic(circle) => {
                // inside-out
                let (dx, dy, d2) = circle.dist_sq(sample);
                if d2 >= circle.radius2 {
                    return Reflection::None;
                }
                if d2 < DEGENERATE_DIST_SQ {
                    return Reflection::Degenerate;
                }
                circle.invert(sample, dx, dy, d2);
            }
            Geometry::Elliptic(circle) => {
                // outside-in
                let (dx, dy, d2) = circle.dist_sq(sample);
                if d2 <= circle.radius2 {
                    return Reflection::None;
                }
                circle.invert(sample, dx, dy, d2);
            }
            Geometry::Euclidean(mirror) => {
                let d = (sample.x - mirror.anchor_x) * mirror.normal_x + sample.y * mirror.normal_y;
                if d <= 0.0 {
                    return Reflection::None;
                }
                let d = d + d;
                sample.x -= d * mirror.normal_x;
                sample.y -= d * mirror.normal_y;
                sample.parity = sample.parity.flip();
            }
        }
        if sample.is_finite() {
            Reflection::Applied
        } else {
            Reflection::Degenerate
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Elliptic(c) | Geometry::Hyperbolic(c) => write!(
                f,
                "{} (circle center=({:.4}, {:.4}), r²={:.4})",
                self.name(),
                c.center_x,
                c.center_y,
                c.radius2
            ),
            Geometry::Euclidean(m) => write!(
                f,
                "{} (mirror through ({:.4}, 0), normal=({:.4}, {:.4}))",
                self.name(),
                m.anchor_x,
                m.normal_x,
                m.normal_y
            ),
        }
    }
}
