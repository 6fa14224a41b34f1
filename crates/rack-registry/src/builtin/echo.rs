//! Feedback echo.
//!
//! The delayed tail outlives its input, which makes it the effect the decay
//! control exists for: a short auto-quit window clips the repeats.

use rack_core::{Effect, ParamDescriptor, ParamUnit, ParameterInfo, flush_denormal};

const MAX_DELAY_MS: f32 = 2000.0;

/// Single-tap feedback delay, fully wet.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Delay Time | 1.0–2000.0 ms | 250.0 |
/// | 1 | Feedback | 0–95% | 40.0 |
#[derive(Debug, Clone)]
pub struct Echo {
    buffer: Vec<f32>,
    write_pos: usize,
    delay_ms: f32,
    delay_samples: usize,
    feedback_pct: f32,
    sample_rate: f32,
}

impl Echo {
    /// Create an echo with a 2-second line.
    pub fn new(sample_rate: f32) -> Self {
        let mut echo = Self {
            buffer: Vec::new(),
            write_pos: 0,
            delay_ms: 250.0,
            delay_samples: 1,
            feedback_pct: 40.0,
            sample_rate,
        };
        echo.set_sample_rate(sample_rate);
        echo
    }

    fn update_delay_samples(&mut self) {
        let samples = (self.delay_ms / 1000.0 * self.sample_rate) as usize;
        self.delay_samples = samples.clamp(1, self.buffer.len().max(1));
    }
}

impl Effect for Echo {
    fn process(&mut self, input: f32) -> f32 {
        let len = self.buffer.len();
        let read_pos = (self.write_pos + len - self.delay_samples) % len;
        let delayed = self.buffer[read_pos];
        let feedback = self.feedback_pct / 100.0;
        self.buffer[self.write_pos] = flush_denormal(input + delayed * feedback);
        self.write_pos = (self.write_pos + 1) % len;
        delayed
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        let len = ((MAX_DELAY_MS / 1000.0) * sample_rate) as usize + 1;
        self.buffer = vec![0.0; len.max(2)];
        self.write_pos = 0;
        self.update_delay_samples();
    }

    fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

impl ParameterInfo for Echo {
    fn param_count(&self) -> usize {
        2
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(
                ParamDescriptor::time_ms("Delay Time", "Time", 1.0, MAX_DELAY_MS, 250.0)
                    .with_string_id("echo_time"),
            ),
            1 => Some(ParamDescriptor {
                name: "Feedback",
                short_name: "Fdbk",
                unit: ParamUnit::Percent,
                min: 0.0,
                max: 95.0,
                default: 40.0,
                step: 1.0,
                string_id: "echo_feedback",
            }),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.delay_ms,
            1 => self.feedback_pct,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => {
                self.delay_ms = value.clamp(1.0, MAX_DELAY_MS);
                self.update_delay_samples();
            }
            1 => self.feedback_pct = value.clamp(0.0, 95.0),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_returns_after_delay() {
        let mut echo = Echo::new(1000.0);
        echo.set_param(0, 10.0); // 10 samples at 1 kHz
        echo.set_param(1, 50.0);
        let mut out = Vec::new();
        out.push(echo.process(1.0));
        for _ in 0..25 {
            out.push(echo.process(0.0));
        }
        assert_eq!(out[10], 1.0);
        assert!((out[20] - 0.5).abs() < 1e-6);
        assert!(out[..10].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn reset_clears_tail() {
        let mut echo = Echo::new(1000.0);
        echo.set_param(0, 5.0);
        echo.process(1.0);
        echo.reset();
        for _ in 0..20 {
            assert_eq!(echo.process(0.0), 0.0);
        }
    }

    #[test]
    fn params_clamp() {
        let mut echo = Echo::new(48000.0);
        echo.set_param(0, 10_000.0);
        echo.set_param(1, 200.0);
        assert_eq!(echo.get_param(0), MAX_DELAY_MS);
        assert_eq!(echo.get_param(1), 95.0);
    }
}
