//! Auto-quit scheduling: decay time to whole audio buffers.
//!
//! The engine stops processing after a number of consecutive near-silent
//! buffers. Users set that window as a decay time in milliseconds, so the
//! buffer count depends on the host's sample rate and buffer size and must be
//! recomputed whenever either changes.

/// Lower bound of the decay control, in milliseconds.
pub const DECAY_MIN_MS: f32 = 1.0;

/// Upper bound of the decay control, in milliseconds.
pub const DECAY_MAX_MS: f32 = 8000.0;

/// Converts a decay time into the number of buffers the engine keeps running.
///
/// `samples = sample_rate * decay_ms / 1000`, then
/// `1 + floor(samples) / frames_per_buffer` with integer division. The extra
/// buffer rounds towards processing more, so even a 1 ms decay yields at
/// least one buffer. A zero `frames_per_buffer` is treated as one frame.
///
/// ```rust
/// use rack_core::buffer_count;
///
/// // 4410 samples / 256 frames = 17 whole buffers, plus one.
/// assert_eq!(buffer_count(100.0, 44100, 256), 18);
/// assert_eq!(buffer_count(1.0, 44100, 256), 1);
/// ```
pub fn buffer_count(decay_ms: f32, sample_rate: u32, frames_per_buffer: u32) -> u32 {
    let samples = f64::from(sample_rate) * f64::from(decay_ms.max(0.0)) / 1000.0;
    let whole = samples.floor() as u64;
    let buffers = 1 + whole / u64::from(frames_per_buffer.max(1));
    u32::try_from(buffers).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_example() {
        assert_eq!(buffer_count(100.0, 44100, 256), 18);
    }

    #[test]
    fn range_endpoints() {
        assert_eq!(buffer_count(DECAY_MIN_MS, 48000, 256), 1);
        // 384000 samples / 256 = 1500 exactly.
        assert_eq!(buffer_count(DECAY_MAX_MS, 48000, 256), 1501);
    }

    #[test]
    fn exact_multiple_still_adds_one() {
        // 8 ms at 64 kHz is exactly two 256-frame buffers.
        assert_eq!(buffer_count(8.0, 64000, 256), 3);
    }

    #[test]
    fn smaller_buffers_mean_more_of_them() {
        let large = buffer_count(500.0, 48000, 1024);
        let small = buffer_count(500.0, 48000, 64);
        assert!(small > large);
        assert_eq!(large, 1 + 24000 / 1024);
        assert_eq!(small, 1 + 24000 / 64);
    }

    #[test]
    fn degenerate_frames_per_buffer() {
        assert_eq!(buffer_count(1.0, 1000, 0), 2);
    }
}
