//! Kernel trait for the DSP inside an effect slot.
//!
//! The [`Effect`] trait is the opaque processing unit an engine wraps. Kernels
//! are mono, sample-oriented and allocation-free in their processing paths so
//! they can run on the audio thread.

/// Core trait for all effect kernels.
///
/// # Example
///
/// ```rust
/// use rack_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Process a single sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls [`process`](Self::process) per sample.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Update the sample rate and recompute rate-dependent state.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal state (delay lines, filter history) without touching
    /// parameters. Called when an auto-stopped engine starts running again.
    fn reset(&mut self);
}
