use thiserror::Error;

/// Call-level failures. Per-sample problems never show up here; they are
/// written into the parity plane of the output field instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KaleidoscopeError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },

    #[error("parameter `{name}` must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f32 },

    #[error("invalid field shape {shape:?}: {reason}")]
    InvalidFieldShape {
        shape: Vec<usize>,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, KaleidoscopeError>;
