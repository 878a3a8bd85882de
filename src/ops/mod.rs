pub mod domain;
pub mod frame;
pub mod geometry;
pub mod reduction;
pub mod rotation;
pub mod sample;
pub mod sector;

pub use self::domain::admits;
pub use self::frame::Frame;
pub use self::geometry::{
    Circle, Geometry, Mirror, Reflection, TriangleGroup, ANGLE_SUM_EPS, MAX_ORDER,
};
pub use self::reduction::{reduce, FailureReason, IterationLimits, Reduction};
pub use self::rotation::RotationTable;
pub use self::sample::{Parity, Sample, INVALID, INVALID_THRESHOLD};
pub use self::sector::{FoldStep, SectorFold};
