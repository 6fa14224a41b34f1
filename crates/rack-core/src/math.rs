//! Mathematical helpers for the engine and kernels.
//!
//! - [`db_to_linear`] - level conversion
//! - [`wet_dry_mix`] - blend processed and unprocessed signal
//! - [`mean_square`] - block level used by the auto-quit gate
//! - [`flush_denormal`] - keep feedback paths out of denormal range

use libm::expf;

/// Convert decibels to linear gain.
///
/// ```rust
/// use rack_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Blend dry and wet signals.
///
/// `mix` 0.0 is all dry, 1.0 is all wet; equivalent to
/// `dry * (1 - mix) + wet * mix`.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Mean of squared samples; `0.0` for an empty block.
#[inline]
pub fn mean_square(block: &[f32]) -> f32 {
    if block.is_empty() {
        return 0.0;
    }
    block.iter().map(|s| s * s).sum::<f32>() / block.len() as f32
}

/// Flush denormal values to zero.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_endpoints() {
        assert_eq!(wet_dry_mix(0.2, 0.8, 0.0), 0.2);
        assert!((wet_dry_mix(0.2, 0.8, 1.0) - 0.8).abs() < 1e-6);
        assert!((wet_dry_mix(0.2, 0.8, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn mean_square_of_block() {
        assert_eq!(mean_square(&[]), 0.0);
        assert_eq!(mean_square(&[0.5, -0.5]), 0.25);
    }

    #[test]
    fn denormals_flushed() {
        assert_eq!(flush_denormal(1e-30), 0.0);
        assert_eq!(flush_denormal(0.25), 0.25);
    }
}
