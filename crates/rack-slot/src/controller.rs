//! Control logic for one effect slot.
//!
//! The controller owns one engine for its whole life. It turns the slot's
//! user-facing controls into engine state, derives the auto-quit timeout
//! from the decay time and the host audio configuration, persists itself to
//! an [`Element`], and emits [`SlotEvent`]s for everything that changes the
//! chain around it.

use crossbeam_channel::Sender;
use rack_config::attrs::{
    format_bool_attr, format_float_attr, parse_bool_attr, parse_float_attr, slot_keys,
};
use rack_config::{AudioConfig, Element};
use rack_core::{EffectEngine, buffer_count};
use rack_registry::EffectRegistry;

use crate::error::SlotError;
use crate::event::{SlotEvent, SlotId};
use crate::host::HostContext;
use crate::port::AudioPort;
use crate::slot_controls;

/// Controller for one effect slot.
pub struct EffectSlotController {
    slot: SlotId,
    identity: &'static str,
    label: &'static str,
    editor_tag: &'static str,
    engine: Box<dyn EffectEngine>,
    port: AudioPort,
    events: Sender<SlotEvent>,
    audio: AudioConfig,
    bypassed: bool,
    wet_level: f32,
    decay_ms: f32,
    gate_level: f32,
    timeout_buffers: u32,
    control_editor_visible: bool,
    quiesced: bool,
}

impl EffectSlotController {
    /// Create a slot for `identity` and attach its engine to `port`.
    ///
    /// The engine starts enabled, fully wet, with the minimum decay and an
    /// open gate.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownEffect`] when the registry has no such effect.
    pub fn new(
        identity: &str,
        host: &HostContext,
        port: AudioPort,
        events: Sender<SlotEvent>,
    ) -> Result<Self, SlotError> {
        let descriptor = host.registry.descriptor(identity)?;
        let (handle, processor) = host.registry.instantiate(
            identity,
            host.audio.sample_rate as f32,
            host.max_block(),
        )?;

        let slot = SlotId::next();
        port.attach(slot, processor);

        let mut controller = Self {
            slot,
            identity: descriptor.id,
            label: descriptor.short_name,
            editor_tag: descriptor.editor_tag,
            engine: Box::new(handle),
            port,
            events,
            audio: host.audio,
            bypassed: false,
            wet_level: slot_controls::WET.descriptor.default,
            decay_ms: slot_controls::DECAY.descriptor.default,
            gate_level: slot_controls::GATE.descriptor.default,
            timeout_buffers: 1,
            control_editor_visible: false,
            quiesced: false,
        };
        controller.push_all();

        tracing::info!(slot = %slot, identity = controller.identity, "slot attached");
        Ok(controller)
    }

    fn push_all(&mut self) {
        self.set_bypassed(self.bypassed);
        self.set_wet_level(self.wet_level);
        self.set_decay(self.decay_ms);
        self.set_gate(self.gate_level);
    }

    /// Enable or bypass the effect.
    pub fn set_bypassed(&mut self, bypassed: bool) {
        self.bypassed = bypassed;
        self.engine.set_active(!bypassed);
        tracing::debug!(slot = %self.slot, bypassed, "bypass pushed");
    }

    /// Set the wet/dry mix, clamped to `[0, 1]`.
    pub fn set_wet_level(&mut self, wet: f32) {
        self.wet_level = slot_controls::WET.descriptor.clamp(wet);
        self.engine.set_wet_level(self.wet_level);
        tracing::debug!(slot = %self.slot, wet = self.wet_level, "wet level pushed");
    }

    /// Set the decay time, clamped to `[1, 8000]` ms, and recompute the
    /// auto-quit timeout from the current audio configuration.
    pub fn set_decay(&mut self, decay_ms: f32) {
        self.decay_ms = slot_controls::DECAY.descriptor.clamp(decay_ms);
        self.timeout_buffers = buffer_count(
            self.decay_ms,
            self.audio.sample_rate,
            self.audio.frames_per_buffer,
        );
        self.engine.set_timeout_buffers(self.timeout_buffers);
        tracing::debug!(
            slot = %self.slot,
            decay_ms = self.decay_ms,
            buffers = self.timeout_buffers,
            "timeout pushed"
        );
    }

    /// Replace the audio configuration and recompute the timeout.
    pub fn apply_audio_config(&mut self, audio: AudioConfig) {
        self.audio = audio;
        self.set_decay(self.decay_ms);
    }

    /// Build a fresh kernel for `sample_rate` carrying the current parameter
    /// values and queue it to replace the running one.
    ///
    /// # Errors
    ///
    /// [`SlotError::UnknownEffect`] if the registry no longer knows this
    /// slot's effect.
    pub fn rebuild_kernel(
        &self,
        registry: &EffectRegistry,
        sample_rate: f32,
    ) -> Result<(), SlotError> {
        if self.quiesced {
            return Ok(());
        }
        let mut kernel = registry.create(self.identity, sample_rate)?;
        for i in 0..self.engine.editable_param_count() {
            kernel.effect_set_param(i, self.engine.param(i));
        }
        self.port.replace_kernel(self.slot, kernel, sample_rate);
        tracing::debug!(slot = %self.slot, sample_rate, "kernel rebuilt");
        Ok(())
    }

    /// Set the silence gate, clamped to `[0, 1]`.
    pub fn set_gate(&mut self, gate: f32) {
        self.gate_level = slot_controls::GATE.descriptor.clamp(gate);
        self.engine.set_gate_level(self.gate_level);
        tracing::debug!(slot = %self.slot, gate = self.gate_level, "gate pushed");
    }

    /// Show the parameter editor if hidden, hide it if shown.
    pub fn toggle_control_editor(&mut self) {
        self.control_editor_visible = !self.control_editor_visible;
        if self.control_editor_visible {
            self.emit(SlotEvent::EditorShown(self.slot));
        } else {
            self.emit(SlotEvent::EditorHidden(self.slot));
        }
    }

    /// The editor window was closed by its own means.
    pub fn close_control_editor(&mut self) {
        if self.control_editor_visible {
            self.control_editor_visible = false;
            self.emit(SlotEvent::EditorHidden(self.slot));
        }
    }

    /// Whether the engine has any parameters worth an editor.
    pub fn has_control_editor(&self) -> bool {
        self.engine.editable_param_count() > 0
    }

    /// Ask the coordinator to move this slot toward the chain input.
    pub fn request_move_earlier(&self) {
        self.emit(SlotEvent::MoveEarlier(self.slot));
    }

    /// Ask the coordinator to move this slot toward the chain output.
    pub fn request_move_later(&self) {
        self.emit(SlotEvent::MoveLater(self.slot));
    }

    /// Ask the coordinator to remove this slot.
    pub fn request_removal(&self) {
        self.emit(SlotEvent::Remove(self.slot));
    }

    fn emit(&self, event: SlotEvent) {
        tracing::debug!(?event, "slot event");
        if self.events.send(event).is_err() {
            tracing::warn!(slot = %self.slot, ?event, "no coordinator listening, event dropped");
        }
    }

    /// Serialize the slot controls and the engine's parameters.
    pub fn save_state(&self) -> Element {
        Element::new(slot_keys::SLOT_TAG)
            .with_attribute(slot_keys::ON, format_bool_attr(!self.bypassed))
            .with_attribute(slot_keys::WET, format_float_attr(self.wet_level))
            .with_attribute(slot_keys::AUTOQUIT, format_float_attr(self.decay_ms))
            .with_attribute(slot_keys::GATE, format_float_attr(self.gate_level))
            .with_child(self.save_editor_state())
    }

    fn save_editor_state(&self) -> Element {
        let mut editor = Element::new(self.editor_tag);
        for i in 0..self.engine.editable_param_count() {
            if let Some(desc) = self.engine.param_descriptor(i) {
                let value = format_float_attr(self.engine.param(i));
                editor.set_attribute(param_key(desc.string_id, i), value);
            }
        }
        editor
    }

    /// Apply saved state.
    ///
    /// Each control is restored on its own: a missing or malformed attribute
    /// leaves that control unchanged. The first child tagged with this
    /// effect's editor tag restores the engine parameters; other children are
    /// ignored.
    pub fn restore_state(&mut self, element: &Element) {
        if let Some(on) = self.read_attr(element, slot_keys::ON, parse_bool_attr) {
            self.set_bypassed(!on);
        }
        if let Some(wet) = self.read_attr(element, slot_keys::WET, parse_float_attr) {
            self.set_wet_level(wet);
        }
        if let Some(decay) = self.read_attr(element, slot_keys::AUTOQUIT, parse_float_attr) {
            self.set_decay(decay);
        }
        if let Some(gate) = self.read_attr(element, slot_keys::GATE, parse_float_attr) {
            self.set_gate(gate);
        }

        if let Some(editor) = element.first_child(self.editor_tag) {
            self.restore_editor_state(editor);
        }
    }

    fn restore_editor_state(&mut self, editor: &Element) {
        for i in 0..self.engine.editable_param_count() {
            let Some(desc) = self.engine.param_descriptor(i) else {
                continue;
            };
            let key = param_key(desc.string_id, i);
            if let Some(value) = self.read_attr(editor, &key, parse_float_attr) {
                self.engine.set_param(i, value);
            }
        }
    }

    fn read_attr<T>(
        &self,
        element: &Element,
        key: &str,
        parse: fn(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = element.attribute(key)?;
        let value = parse(raw);
        if value.is_none() {
            tracing::warn!(slot = %self.slot, key, raw, "ignoring malformed attribute");
        }
        value
    }

    /// Stop the engine touching its kernel and queue its detach.
    ///
    /// Called by the coordinator before dropping a removed slot. Idempotent.
    pub fn quiesce(&mut self) {
        if self.quiesced {
            return;
        }
        self.quiesced = true;
        self.engine.quiesce();
        self.port.detach(self.slot);
        tracing::info!(slot = %self.slot, identity = self.identity, "slot detached");
    }

    /// Whether [`quiesce`](Self::quiesce) has run.
    pub fn is_quiesced(&self) -> bool {
        self.quiesced
    }

    /// Help text for the slot.
    pub fn help_text(&self) -> &'static str {
        slot_controls::SLOT_HELP
    }

    /// Slot reference used in events.
    pub fn slot(&self) -> SlotId {
        self.slot
    }

    /// Registry identity of the hosted effect.
    pub fn identity(&self) -> &'static str {
        self.identity
    }

    /// Engine display name.
    pub fn display_name(&self) -> &str {
        self.engine.display_name()
    }

    /// Short label shown on the slot.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Tag of the nested editor element in saved state.
    pub fn editor_tag(&self) -> &'static str {
        self.editor_tag
    }

    /// Whether the effect is bypassed.
    pub fn bypassed(&self) -> bool {
        self.bypassed
    }

    /// Wet/dry mix in `[0, 1]`.
    pub fn wet_level(&self) -> f32 {
        self.wet_level
    }

    /// Decay time in milliseconds.
    pub fn decay_ms(&self) -> f32 {
        self.decay_ms
    }

    /// Silence gate in `[0, 1]`.
    pub fn gate_level(&self) -> f32 {
        self.gate_level
    }

    /// Auto-quit timeout in host buffers, derived from the decay time.
    pub fn timeout_buffers(&self) -> u32 {
        self.timeout_buffers
    }

    /// Whether the parameter editor is shown.
    pub fn control_editor_visible(&self) -> bool {
        self.control_editor_visible
    }

    /// Audio configuration the timeout was derived from.
    pub fn audio_config(&self) -> AudioConfig {
        self.audio
    }

    /// Whether the engine was running as of the last audio block.
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// The engine's editable parameter count.
    pub fn param_count(&self) -> usize {
        self.engine.editable_param_count()
    }

    /// An engine parameter value.
    pub fn param(&self, index: usize) -> f32 {
        self.engine.param(index)
    }

    /// Set an engine parameter. The engine clamps to the parameter range.
    pub fn set_param(&mut self, index: usize, value: f32) {
        self.engine.set_param(index, value);
    }

    /// Descriptor of an engine parameter.
    pub fn param_descriptor(&self, index: usize) -> Option<rack_core::ParamDescriptor> {
        self.engine.param_descriptor(index)
    }
}

impl Drop for EffectSlotController {
    fn drop(&mut self) {
        self.quiesce();
    }
}

impl std::fmt::Debug for EffectSlotController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectSlotController")
            .field("slot", &self.slot)
            .field("identity", &self.identity)
            .field("bypassed", &self.bypassed)
            .field("wet_level", &self.wet_level)
            .field("decay_ms", &self.decay_ms)
            .field("gate_level", &self.gate_level)
            .field("timeout_buffers", &self.timeout_buffers)
            .finish_non_exhaustive()
    }
}

/// Persistence key for a parameter. Kernels without string ids fall back to
/// the index.
fn param_key(string_id: &str, index: usize) -> String {
    if string_id.is_empty() {
        format!("param{index}")
    } else {
        string_id.to_owned()
    }
}
