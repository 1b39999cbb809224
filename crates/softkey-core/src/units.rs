/// Density helpers used across the engine to keep unit scaling consistent.
///
/// This module intentionally does not depend on any platform layer; callers
/// provide the density factor (physical px per device-independent unit) as
/// `f64`.

/// Sanitized density factor: non-finite or non-positive input falls back to
/// `1.0` (raw pixels are then treated as device-independent units).
#[inline]
pub fn density_or_default(density_factor: f64) -> f64 {
    if density_factor.is_finite() && density_factor > 0.0 {
        density_factor
    } else {
        1.0
    }
}

/// Convert a raw pixel measurement to device-independent units.
///
/// Pure linear scaling `raw_px / density_factor`. Negative raw input clamps
/// to `0`; the output is never negative.
#[inline]
pub fn normalize(raw_px: f64, density_factor: f64) -> f64 {
    raw_px.max(0.0) / density_or_default(density_factor)
}
