//! Lock-free state shared between an engine's control handle and its
//! audio-thread processor.
//!
//! [`EngineShared`] is the atomic bridge between the two threads. Scalar
//! controls and kernel parameter values live in atomics (`f32` bit-cast to
//! `u32`); the control thread only stores, the audio thread only loads, so
//! neither side can block the other. The audio thread publishes its run state
//! back through the `running` flag.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::param_info::ParamDescriptor;

/// Shared engine state, always held behind an `Arc`.
#[derive(Debug)]
pub struct EngineShared {
    name: String,
    active: AtomicBool,
    wet: AtomicU32,
    gate: AtomicU32,
    timeout_buffers: AtomicU32,
    /// Set once on removal; the processor stops touching its kernel.
    retired: AtomicBool,
    /// Published by the audio thread: `false` while auto-stopped.
    running: AtomicBool,
    descriptors: Vec<ParamDescriptor>,
    values: Vec<AtomicU32>,
    /// Raised by the control thread after a parameter store, cleared by the
    /// audio thread once it has pushed values into the kernel.
    params_dirty: AtomicBool,
}

impl EngineShared {
    /// Creates shared state for a kernel with the given descriptors and
    /// initial parameter values. The engine starts active, fully wet, with a
    /// zero gate and a one-buffer timeout.
    pub fn new(name: impl Into<String>, descriptors: Vec<ParamDescriptor>, initial: &[f32]) -> Self {
        let values = descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| AtomicU32::new(initial.get(i).copied().unwrap_or(d.default).to_bits()))
            .collect();
        Self {
            name: name.into(),
            active: AtomicBool::new(true),
            wet: AtomicU32::new(1.0f32.to_bits()),
            gate: AtomicU32::new(0.0f32.to_bits()),
            timeout_buffers: AtomicU32::new(1),
            retired: AtomicBool::new(false),
            running: AtomicBool::new(true),
            descriptors,
            values,
            params_dirty: AtomicBool::new(false),
        }
    }

    /// Display name of the wrapped effect.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores the active flag.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// Loads the active flag.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Stores the wet level.
    pub fn set_wet(&self, wet: f32) {
        self.wet.store(wet.to_bits(), Ordering::Release);
    }

    /// Loads the wet level.
    pub fn wet(&self) -> f32 {
        f32::from_bits(self.wet.load(Ordering::Acquire))
    }

    /// Stores the gate threshold.
    pub fn set_gate(&self, gate: f32) {
        self.gate.store(gate.to_bits(), Ordering::Release);
    }

    /// Loads the gate threshold.
    pub fn gate(&self) -> f32 {
        f32::from_bits(self.gate.load(Ordering::Acquire))
    }

    /// Stores the auto-quit timeout in buffers.
    pub fn set_timeout_buffers(&self, buffers: u32) {
        self.timeout_buffers.store(buffers, Ordering::Release);
    }

    /// Loads the auto-quit timeout in buffers.
    pub fn timeout_buffers(&self) -> u32 {
        self.timeout_buffers.load(Ordering::Acquire)
    }

    /// Marks the engine retired. Irreversible.
    pub fn retire(&self) {
        self.retired.store(true, Ordering::Release);
    }

    /// Whether the engine has been retired.
    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::Acquire)
    }

    /// Publishes the audio-thread run state.
    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    /// Last run state published by the audio thread.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Kernel parameter descriptors.
    pub fn descriptors(&self) -> &[ParamDescriptor] {
        &self.descriptors
    }

    /// Kernel parameter value, `0.0` when out of range.
    pub fn param(&self, index: usize) -> f32 {
        self.values
            .get(index)
            .map_or(0.0, |v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Stores a kernel parameter value clamped to its descriptor range.
    /// Out-of-range indices are ignored.
    pub fn set_param(&self, index: usize, value: f32) {
        if let Some((atomic, desc)) = self.values.get(index).zip(self.descriptors.get(index)) {
            atomic.store(desc.clamp(value).to_bits(), Ordering::Release);
            self.params_dirty.store(true, Ordering::Release);
        }
    }

    /// Clears the dirty flag, returning whether parameters changed since the
    /// last call.
    pub fn take_params_dirty(&self) -> bool {
        self.params_dirty.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> EngineShared {
        let descs = vec![
            ParamDescriptor::gain_db("Gain", "Gain", -24.0, 24.0, 0.0).with_string_id("g"),
        ];
        EngineShared::new("Test", descs, &[3.0])
    }

    #[test]
    fn initial_state() {
        let s = shared();
        assert_eq!(s.name(), "Test");
        assert!(s.is_active());
        assert_eq!(s.wet(), 1.0);
        assert_eq!(s.gate(), 0.0);
        assert_eq!(s.timeout_buffers(), 1);
        assert!(s.is_running());
        assert!(!s.is_retired());
        assert_eq!(s.param(0), 3.0);
    }

    #[test]
    fn param_store_clamps_and_marks_dirty() {
        let s = shared();
        assert!(!s.take_params_dirty());
        s.set_param(0, 100.0);
        assert_eq!(s.param(0), 24.0);
        assert!(s.take_params_dirty());
        assert!(!s.take_params_dirty());
    }

    #[test]
    fn out_of_range_param_ignored() {
        let s = shared();
        s.set_param(5, 1.0);
        assert_eq!(s.param(5), 0.0);
        assert!(!s.take_params_dirty());
    }
}
