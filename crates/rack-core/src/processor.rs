//! Audio-thread half of an engine, including the auto-quit state machine.
//!
//! Each block the processor reads the control atomics, runs its kernel, blends
//! wet and dry signal, and tracks how long the output has stayed at or below
//! the gate:
//!
//! ```text
//!            quiet buffers > timeout
//!  Running ───────────────────────────► Stopped
//!     ▲                                    │
//!     └──────── input above gate ──────────┘
//! ```
//!
//! While inactive, retired or stopped, the buffer passes through untouched
//! and the kernel is not called.

use std::sync::Arc;

use crate::effect_with_params::EffectWithParams;
use crate::math::{mean_square, wet_dry_mix};
use crate::param::SmoothedParam;
use crate::shared::EngineShared;

/// Wet level smoothing time.
const WET_SMOOTHING_MS: f32 = 5.0;

/// Run state of an engine on the audio thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Processing audio.
    Running,
    /// Auto-stopped after the output stayed below the gate for longer than
    /// the timeout.
    Stopped,
}

/// Audio-thread processor for one engine.
pub struct EngineProcessor {
    shared: Arc<EngineShared>,
    kernel: Box<dyn EffectWithParams + Send>,
    wet: SmoothedParam,
    state: RunState,
    quiet_buffers: u32,
    scratch: Vec<f32>,
}

impl EngineProcessor {
    /// Creates a processor. Prefer [`engine_pair`](crate::engine_pair), which
    /// also builds the matching control handle.
    pub fn new(
        shared: Arc<EngineShared>,
        mut kernel: Box<dyn EffectWithParams + Send>,
        sample_rate: f32,
        max_block: usize,
    ) -> Self {
        kernel.set_sample_rate(sample_rate);
        let wet = SmoothedParam::with_config(shared.wet(), sample_rate, WET_SMOOTHING_MS);
        Self {
            shared,
            kernel,
            wet,
            state: RunState::Running,
            quiet_buffers: 0,
            scratch: vec![0.0; max_block.max(1)],
        }
    }

    /// Current run state.
    pub fn run_state(&self) -> RunState {
        self.state
    }

    /// Consecutive quiet buffers counted so far.
    pub fn quiet_buffers(&self) -> u32 {
        self.quiet_buffers
    }

    /// Whether the control side has retired this engine.
    pub fn is_retired(&self) -> bool {
        self.shared.is_retired()
    }

    /// The shared state.
    pub fn shared(&self) -> &Arc<EngineShared> {
        &self.shared
    }

    /// Swaps in a kernel already prepared for `sample_rate` and returns the
    /// old one.
    ///
    /// Nothing is allocated or freed here: the caller builds the new kernel
    /// off the audio thread and disposes of the returned one there too.
    pub fn replace_kernel(
        &mut self,
        kernel: Box<dyn EffectWithParams + Send>,
        sample_rate: f32,
    ) -> Box<dyn EffectWithParams + Send> {
        self.wet.set_sample_rate(sample_rate);
        self.quiet_buffers = 0;
        std::mem::replace(&mut self.kernel, kernel)
    }

    /// Processes one host buffer in place.
    ///
    /// Returns `true` when the kernel ran, `false` when the buffer passed
    /// through (inactive, retired or auto-stopped).
    pub fn process_block(&mut self, buffer: &mut [f32]) -> bool {
        if self.shared.is_retired() || !self.shared.is_active() {
            return false;
        }

        if self.shared.take_params_dirty() {
            for (i, _) in self.shared.descriptors().iter().enumerate() {
                self.kernel.effect_set_param(i, self.shared.param(i));
            }
        }

        let gate = self.shared.gate();
        let gate_sq = gate * gate;

        if self.state == RunState::Stopped {
            if mean_square(buffer) <= gate_sq {
                return false;
            }
            self.restart();
        }

        self.wet.set_target(self.shared.wet());
        let mut out_sum = 0.0f32;
        let chunk_len = self.scratch.len();
        for chunk in buffer.chunks_mut(chunk_len) {
            let wet_buf = &mut self.scratch[..chunk.len()];
            self.kernel.process_block(chunk, wet_buf);
            for (sample, &wet_sample) in chunk.iter_mut().zip(wet_buf.iter()) {
                *sample = wet_dry_mix(*sample, wet_sample, self.wet.advance());
                out_sum += *sample * *sample;
            }
        }

        let level = if buffer.is_empty() {
            0.0
        } else {
            out_sum / buffer.len() as f32
        };
        self.check_gate(level, gate_sq);
        true
    }

    fn check_gate(&mut self, level: f32, gate_sq: f32) {
        if level <= gate_sq {
            self.quiet_buffers += 1;
            if self.quiet_buffers > self.shared.timeout_buffers() {
                self.state = RunState::Stopped;
                self.quiet_buffers = 0;
                self.shared.set_running(false);
            }
        } else {
            self.quiet_buffers = 0;
        }
    }

    fn restart(&mut self) {
        self.kernel.reset();
        self.wet.set_immediate(self.shared.wet());
        self.quiet_buffers = 0;
        self.state = RunState::Running;
        self.shared.set_running(true);
    }
}

impl std::fmt::Debug for EngineProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineProcessor")
            .field("name", &self.shared.name())
            .field("state", &self.state)
            .field("quiet_buffers", &self.quiet_buffers)
            .finish_non_exhaustive()
    }
}
