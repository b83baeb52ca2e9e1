use thiserror::Error;

/// Construction-time failures. Cycle operations never produce these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotifError {
    /// A threshold outside [0, 1] (or NaN).
    #[error("threshold `{name}` must be within [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    /// A TTL or capacity that must be strictly positive.
    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: i64 },

    /// A rate or physical parameter that is negative or not finite.
    #[error("parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    /// Engine group bounds where min exceeds max.
    #[error("min group count {min} exceeds max group count {max}")]
    GroupBounds { min: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, MotifError>;
