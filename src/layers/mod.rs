pub mod field;
pub mod kaleidoscope;

#[cfg(test)]
mod __test__;

pub use self::field::{identity_field, FoldSummary, SampleStatus, CHANNELS};
pub use self::kaleidoscope::{fold_field, FoldOptions, FoldedField, Kaleidoscope};
