//! Combined `Effect` + `ParameterInfo` trait for boxed kernels.
//!
//! `Box<dyn Effect>` does not give access to [`ParameterInfo`], so
//! [`EffectWithParams`] exposes prefixed parameter methods through a single
//! vtable. A blanket impl covers every type implementing both traits.

use crate::effect::Effect;
use crate::param_info::{ParamDescriptor, ParameterInfo};

/// Object-safe view of a kernel with parameters.
pub trait EffectWithParams: Effect {
    /// Parameter count.
    fn effect_param_count(&self) -> usize;

    /// Parameter descriptor by index.
    fn effect_param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Parameter value by index.
    fn effect_get_param(&self, index: usize) -> f32;

    /// Set parameter value by index.
    fn effect_set_param(&mut self, index: usize, value: f32);
}

impl<T: Effect + ParameterInfo> EffectWithParams for T {
    fn effect_param_count(&self) -> usize {
        self.param_count()
    }

    fn effect_param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.param_info(index)
    }

    fn effect_get_param(&self, index: usize) -> f32 {
        self.get_param(index)
    }

    fn effect_set_param(&mut self, index: usize, value: f32) {
        self.set_param(index, value)
    }
}
