//! CLI command implementations.

pub mod effects;
pub mod render;
pub mod timeout;

use anyhow::Context;
use rack_config::AudioConfig;

/// Audio configuration from explicit flags, falling back to the user's
/// config file and then to defaults.
pub fn resolve_audio_config(
    sample_rate: Option<u32>,
    frames: Option<u32>,
) -> anyhow::Result<AudioConfig> {
    let base = AudioConfig::load_user().context("reading user audio config")?;
    let config = AudioConfig::new(
        sample_rate.unwrap_or(base.sample_rate),
        frames.unwrap_or(base.frames_per_buffer),
    );
    config.validate()?;
    Ok(config)
}
