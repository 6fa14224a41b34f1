//! Smoothed gain stage.

use rack_core::{Effect, ParamDescriptor, ParameterInfo, SmoothedParam, db_to_linear};

const GAIN_MIN_DB: f32 = -24.0;
const GAIN_MAX_DB: f32 = 24.0;

/// Gain stage with 10 ms smoothing.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Gain | -24.0–24.0 dB | 0.0 |
#[derive(Debug, Clone)]
pub struct Amplifier {
    gain_db: f32,
    gain: SmoothedParam,
}

impl Amplifier {
    /// Create a unity-gain amplifier.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            gain_db: 0.0,
            gain: SmoothedParam::with_config(1.0, sample_rate, 10.0),
        }
    }

    /// Set gain in dB, clamped to ±24 dB.
    pub fn set_gain_db(&mut self, db: f32) {
        self.gain_db = db.clamp(GAIN_MIN_DB, GAIN_MAX_DB);
        self.gain.set_target(db_to_linear(self.gain_db));
    }
}

impl Effect for Amplifier {
    fn process(&mut self, input: f32) -> f32 {
        input * self.gain.advance()
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.gain.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.gain.snap_to_target();
    }
}

impl ParameterInfo for Amplifier {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::gain_db("Gain", "Gain", GAIN_MIN_DB, GAIN_MAX_DB, 0.0)
                    .with_string_id("amp_gain"),
            ),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.gain_db,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_gain_db(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_by_default() {
        let mut amp = Amplifier::new(48000.0);
        assert_eq!(amp.process(0.5), 0.5);
    }

    #[test]
    fn gain_settles_to_target() {
        let mut amp = Amplifier::new(48000.0);
        amp.set_param(0, 6.0);
        amp.reset();
        assert!((amp.process(0.5) - 0.5 * db_to_linear(6.0)).abs() < 1e-4);
    }

    #[test]
    fn gain_is_clamped() {
        let mut amp = Amplifier::new(48000.0);
        amp.set_param(0, 60.0);
        assert_eq!(amp.get_param(0), GAIN_MAX_DB);
    }
}
