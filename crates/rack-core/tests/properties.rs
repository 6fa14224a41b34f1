//! Property-based tests for auto-quit scheduling and parameter clamping.

use proptest::prelude::*;
use rack_core::{DECAY_MAX_MS, DECAY_MIN_MS, ParamDescriptor, buffer_count};

const SAMPLE_RATES: [u32; 5] = [22050, 44100, 48000, 96000, 192000];
const BUFFER_SIZES: [u32; 6] = [32, 64, 128, 256, 512, 1024];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Every decay in range yields at least one buffer.
    #[test]
    fn buffer_count_never_zero(
        ms in DECAY_MIN_MS..=DECAY_MAX_MS,
        sr in prop::sample::select(SAMPLE_RATES.to_vec()),
        fpb in prop::sample::select(BUFFER_SIZES.to_vec()),
    ) {
        prop_assert!(buffer_count(ms, sr, fpb) >= 1);
    }

    /// Longer decays never produce fewer buffers.
    #[test]
    fn buffer_count_monotonic_in_decay(
        a in DECAY_MIN_MS..=DECAY_MAX_MS,
        b in DECAY_MIN_MS..=DECAY_MAX_MS,
        sr in prop::sample::select(SAMPLE_RATES.to_vec()),
        fpb in prop::sample::select(BUFFER_SIZES.to_vec()),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(buffer_count(lo, sr, fpb) <= buffer_count(hi, sr, fpb));
    }

    /// The buffers cover at least the decay time.
    #[test]
    fn buffer_count_covers_decay(
        ms in DECAY_MIN_MS..=DECAY_MAX_MS,
        sr in prop::sample::select(SAMPLE_RATES.to_vec()),
        fpb in prop::sample::select(BUFFER_SIZES.to_vec()),
    ) {
        let buffers = u64::from(buffer_count(ms, sr, fpb));
        let samples = (f64::from(sr) * f64::from(ms) / 1000.0).floor() as u64;
        prop_assert!(buffers * u64::from(fpb) > samples);
    }

    /// Clamping any finite input lands inside the descriptor range.
    #[test]
    fn ratio_clamp_stays_in_range(v in -1.0e6f32..1.0e6f32) {
        let d = ParamDescriptor::ratio("Wet", "W/D", 1.0);
        let c = d.clamp(v);
        prop_assert!((0.0..=1.0).contains(&c));
        if (0.0..=1.0).contains(&v) {
            prop_assert_eq!(c, v);
        }
    }
}
