//! Host audio configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::paths;

/// Highest sample rate accepted from a config file.
pub const MAX_SAMPLE_RATE: u32 = 768_000;

/// Largest host buffer accepted from a config file.
pub const MAX_FRAMES_PER_BUFFER: u32 = 16_384;

/// Sample rate and buffer size of the host.
///
/// Slot controllers read this to turn a decay time into a number of host
/// buffers.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 44100
/// frames_per_buffer = 256
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Samples per second.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Frames delivered per host callback.
    #[serde(default = "default_frames_per_buffer")]
    pub frames_per_buffer: u32,
}

fn default_sample_rate() -> u32 {
    48000
}

fn default_frames_per_buffer() -> u32 {
    256
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            frames_per_buffer: default_frames_per_buffer(),
        }
    }
}

impl AudioConfig {
    /// Create a config from explicit values.
    pub fn new(sample_rate: u32, frames_per_buffer: u32) -> Self {
        Self {
            sample_rate,
            frames_per_buffer,
        }
    }

    /// Check both values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            return Err(ConfigError::InvalidAudioConfig(format!(
                "sample_rate {} outside 1..={MAX_SAMPLE_RATE}",
                self.sample_rate
            )));
        }
        if self.frames_per_buffer == 0 || self.frames_per_buffer > MAX_FRAMES_PER_BUFFER {
            return Err(ConfigError::InvalidAudioConfig(format!(
                "frames_per_buffer {} outside 1..={MAX_FRAMES_PER_BUFFER}",
                self.frames_per_buffer
            )));
        }
        Ok(())
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.display(),
            sample_rate = config.sample_rate,
            frames_per_buffer = config.frames_per_buffer,
            "loaded audio config"
        );
        Ok(config)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Load the user's config file, or defaults when none exists.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_user() -> Result<Self, ConfigError> {
        let path = paths::audio_config_path();
        if path.is_file() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no audio config, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = AudioConfig::default();
        assert_eq!(c.sample_rate, 48000);
        assert_eq!(c.frames_per_buffer, 256);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c = AudioConfig::from_toml("sample_rate = 44100").unwrap();
        assert_eq!(c, AudioConfig::new(44100, 256));
    }

    #[test]
    fn zero_values_rejected() {
        assert!(matches!(
            AudioConfig::from_toml("frames_per_buffer = 0"),
            Err(ConfigError::InvalidAudioConfig(_))
        ));
        assert!(AudioConfig::new(0, 256).validate().is_err());
        assert!(AudioConfig::new(48000, MAX_FRAMES_PER_BUFFER + 1).validate().is_err());
    }

    #[test]
    fn negative_is_parse_error() {
        assert!(matches!(
            AudioConfig::from_toml("sample_rate = -1"),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
