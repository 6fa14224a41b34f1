//! Read-only services a slot needs from its host.

use std::sync::Arc;

use rack_config::AudioConfig;
use rack_registry::EffectRegistry;

/// Host services handed to a slot at construction.
#[derive(Clone)]
pub struct HostContext {
    /// Current audio configuration. Slots copy it; later changes reach them
    /// through `apply_audio_config`.
    pub audio: AudioConfig,
    /// Effect registry used to resolve identities.
    pub registry: Arc<EffectRegistry>,
}

impl HostContext {
    /// Bundle an audio configuration with a registry.
    pub fn new(audio: AudioConfig, registry: Arc<EffectRegistry>) -> Self {
        Self { audio, registry }
    }

    /// Largest block the host will deliver.
    pub fn max_block(&self) -> usize {
        self.audio.frames_per_buffer as usize
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new(AudioConfig::default(), Arc::new(EffectRegistry::new()))
    }
}
