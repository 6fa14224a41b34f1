//! Parameter smoothing for zipper-free changes.
//!
//! Control-thread writes land on the audio thread once per block, so a wet
//! level jump would otherwise be audible as a step. [`SmoothedParam`] ramps
//! towards its target with a one-pole lowpass.
//!
//! ```rust
//! use rack_core::SmoothedParam;
//!
//! let mut wet = SmoothedParam::with_config(1.0, 48000.0, 5.0);
//! wet.set_target(0.5);
//! for _ in 0..4800 {
//!     wet.advance();
//! }
//! assert!((wet.get() - 0.5).abs() < 1e-3);
//! ```

use libm::expf;

/// A parameter with built-in exponential smoothing.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    /// One-pole coefficient (1.0 = instant).
    coeff: f32,
    sample_rate: f32,
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create an unsmoothed parameter (instant changes until configured).
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate: 48000.0,
            smoothing_time_ms: 0.0,
        }
    }

    /// Create a smoothed parameter with full configuration.
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.sample_rate = sample_rate;
        param.smoothing_time_ms = smoothing_time_ms;
        param.recalculate_coeff();
        param
    }

    /// Set the value to smooth towards.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and snap to it.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update sample rate and recalculate the coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coeff();
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Current smoothed value.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Jump to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// `coeff = 1 - exp(-1 / (tau * sample_rate))`, tau in seconds.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let samples = self.smoothing_time_ms / 1000.0 * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_is_instant() {
        let mut p = SmoothedParam::new(0.0);
        p.set_target(1.0);
        assert_eq!(p.advance(), 1.0);
    }

    #[test]
    fn converges_towards_target() {
        let mut p = SmoothedParam::with_config(0.0, 48000.0, 10.0);
        p.set_target(1.0);
        let first = p.advance();
        assert!(first > 0.0 && first < 0.1);
        for _ in 0..48000 {
            p.advance();
        }
        assert!((p.get() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn snap_and_immediate() {
        let mut p = SmoothedParam::with_config(0.0, 48000.0, 10.0);
        p.set_target(0.7);
        p.snap_to_target();
        assert_eq!(p.get(), 0.7);
        p.set_immediate(0.2);
        assert_eq!((p.get(), p.target()), (0.2, 0.2));
    }
}
