//! Kaleidoscope folding engine.
//!
//! Folds arbitrary points of the plane into the fundamental triangle of a
//! `(k, m, n)` reflection group, for spherical (stereographic projection),
//! Euclidean and hyperbolic (Poincaré disc) tilings, and records the parity
//! of the reflections needed for checkerboard colouring.

pub mod error;
pub mod layers;
pub mod ops;

#[cfg(feature = "python")]
pub mod bindings;

pub use error::{KaleidoscopeError, Result};
pub use layers::{fold_field, FoldOptions, FoldSummary, FoldedField, Kaleidoscope};
pub use ops::{Frame, Geometry, IterationLimits, Parity, Reduction, Sample, TriangleGroup};
