//! Small numeric helpers shared by every stage.
//!
//! All of these are total: empty slices and non-finite values resolve to
//! documented fallbacks instead of NaN.

/// Guard against NaN and Infinity.
/// If the value is not finite, replace it with `fallback`.
#[inline]
pub fn sanitize(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!("NaN/Inf detected, resetting to fallback {}", fallback);
        fallback
    }
}

/// Sanitize (fallback 0) and clamp into [0, 1].
#[inline]
pub fn unit(v: f32) -> f32 {
    sanitize(v, 0.0).clamp(0.0, 1.0)
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Population variance, 0 for an empty slice.
pub fn variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f32>() / values.len() as f32
}

/// Population standard deviation, 0 for an empty slice.
pub fn std_dev(values: &[f32]) -> f32 {
    variance(values).sqrt()
}
