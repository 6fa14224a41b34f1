//! Polarity inversion.

use rack_core::{Effect, ParamDescriptor, ParameterInfo};

/// Flips the sign of every sample. Has no editable parameters, so a slot
/// hosting it shows no control editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invert;

impl Effect for Invert {
    fn process(&mut self, input: f32) -> f32 {
        -input
    }

    fn set_sample_rate(&mut self, _sample_rate: f32) {}

    fn reset(&mut self) {}
}

impl ParameterInfo for Invert {
    fn param_count(&self) -> usize {
        0
    }

    fn param_info(&self, _index: usize) -> Option<ParamDescriptor> {
        None
    }

    fn get_param(&self, _index: usize) -> f32 {
        0.0
    }

    fn set_param(&mut self, _index: usize, _value: f32) {}
}
