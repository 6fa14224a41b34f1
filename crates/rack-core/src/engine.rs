//! The control-side contract of an effect engine.
//!
//! An engine is split in two halves that share one [`EngineShared`]:
//!
//! ```text
//! control thread ──► EngineHandle (EffectEngine) ──► atomics
//!                                                      │
//! audio thread   ◄── EngineProcessor::process_block ◄──┘
//! ```
//!
//! The slot controller owns the handle; the processor is handed to the audio
//! thread. [`engine_pair`] builds both from a kernel.

use std::sync::Arc;

use crate::effect_with_params::EffectWithParams;
use crate::param_info::ParamDescriptor;
use crate::processor::EngineProcessor;
use crate::shared::EngineShared;

/// Capabilities a slot needs from the engine it wraps.
///
/// All setters are wait-free stores; none of them block on the audio thread.
pub trait EffectEngine: Send {
    /// `true` processes, `false` passes input through untouched.
    fn set_active(&self, active: bool);

    /// Wet/dry blend, 0.0 (dry) to 1.0 (wet).
    fn set_wet_level(&self, wet: f32);

    /// Output level below which buffers count towards auto-quit.
    fn set_gate_level(&self, gate: f32);

    /// Consecutive quiet buffers tolerated before the engine auto-stops.
    fn set_timeout_buffers(&self, buffers: u32);

    /// Human-readable name of the wrapped effect.
    fn display_name(&self) -> &str;

    /// Number of parameters the detail editor can edit.
    fn editable_param_count(&self) -> usize;

    /// Descriptor of an editable parameter.
    fn param_descriptor(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of an editable parameter.
    fn param(&self, index: usize) -> f32;

    /// Sets an editable parameter (clamped to its range).
    fn set_param(&self, index: usize, value: f32);

    /// `false` while the engine is auto-stopped.
    fn is_running(&self) -> bool;

    /// Stops the audio thread from touching the engine. Irreversible; must
    /// happen before the engine is destroyed.
    fn quiesce(&self);

    /// Whether [`quiesce`](Self::quiesce) has been called.
    fn is_quiesced(&self) -> bool;
}

/// Control-thread handle backed by [`EngineShared`] atomics.
#[derive(Debug)]
pub struct EngineHandle {
    shared: Arc<EngineShared>,
}

impl EngineHandle {
    /// The shared state behind this handle.
    pub fn shared(&self) -> &Arc<EngineShared> {
        &self.shared
    }
}

impl EffectEngine for EngineHandle {
    fn set_active(&self, active: bool) {
        self.shared.set_active(active);
    }

    fn set_wet_level(&self, wet: f32) {
        self.shared.set_wet(wet);
    }

    fn set_gate_level(&self, gate: f32) {
        self.shared.set_gate(gate);
    }

    fn set_timeout_buffers(&self, buffers: u32) {
        self.shared.set_timeout_buffers(buffers);
    }

    fn display_name(&self) -> &str {
        self.shared.name()
    }

    fn editable_param_count(&self) -> usize {
        self.shared.descriptors().len()
    }

    fn param_descriptor(&self, index: usize) -> Option<ParamDescriptor> {
        self.shared.descriptors().get(index).copied()
    }

    fn param(&self, index: usize) -> f32 {
        self.shared.param(index)
    }

    fn set_param(&self, index: usize, value: f32) {
        self.shared.set_param(index, value);
    }

    fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    fn quiesce(&self) {
        self.shared.set_active(false);
        self.shared.retire();
    }

    fn is_quiesced(&self) -> bool {
        self.shared.is_retired()
    }
}

/// Builds the control handle and audio processor for a kernel.
///
/// Descriptors and initial values are read from the kernel. `max_block` sizes
/// the processor's scratch buffer; longer blocks are processed in chunks.
pub fn engine_pair(
    name: impl Into<String>,
    kernel: Box<dyn EffectWithParams + Send>,
    sample_rate: f32,
    max_block: usize,
) -> (EngineHandle, EngineProcessor) {
    // Shared index i must stay kernel index i, so collection stops at the
    // first missing descriptor.
    let count = kernel.effect_param_count();
    let mut descriptors = Vec::with_capacity(count);
    let mut initial = Vec::with_capacity(count);
    for i in 0..count {
        let Some(desc) = kernel.effect_param_info(i) else {
            break;
        };
        descriptors.push(desc);
        initial.push(kernel.effect_get_param(i));
    }
    let shared = Arc::new(EngineShared::new(name, descriptors, &initial));
    let processor = EngineProcessor::new(Arc::clone(&shared), kernel, sample_rate, max_block);
    (EngineHandle { shared }, processor)
}
