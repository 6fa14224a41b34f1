//! Platform-specific paths for saved slots and configuration.
//!
//! - **User config**: `~/.config/effect-rack/` (Linux), `~/Library/Application Support/effect-rack/` (macOS), `%APPDATA%\effect-rack\` (Windows)
//! - **Saved slots**: `slots/` under the user config directory
//! - **Audio config**: `audio.toml` under the user config directory

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const APP_NAME: &str = "effect-rack";
const SLOTS_SUBDIR: &str = "slots";
const AUDIO_CONFIG_FILE: &str = "audio.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the directory for saved slot state files.
pub fn user_slots_dir() -> PathBuf {
    user_config_dir().join(SLOTS_SUBDIR)
}

/// Returns the path of the user's audio config file.
pub fn audio_config_path() -> PathBuf {
    user_config_dir().join(AUDIO_CONFIG_FILE)
}

/// Find a saved slot file by path or by name.
///
/// A name without a `.toml` extension gets one. An existing file path wins
/// over the user slots directory.
pub fn find_slot_state(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let user_path = user_slots_dir().join(state_file_name(name));
    user_path.is_file().then_some(user_path)
}

/// Where to save a slot given a path or a bare name.
///
/// A bare name (no directory part) lands in the user slots directory, which is
/// created on demand, and gets a `.toml` extension if it lacks one. Anything
/// else is used as given. Pairs with [`find_slot_state`].
///
/// # Errors
///
/// Returns an error if the user slots directory cannot be created.
pub fn slot_save_path(name: &str) -> Result<PathBuf, ConfigError> {
    if is_bare_name(name) {
        Ok(ensure_user_slots_dir()?.join(state_file_name(name)))
    } else {
        Ok(PathBuf::from(name))
    }
}

fn is_bare_name(name: &str) -> bool {
    let path = Path::new(name);
    !path.is_absolute() && path.components().count() == 1 && path.file_name().is_some()
}

fn state_file_name(name: &str) -> String {
    if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    }
}

/// Ensure the user slots directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_slots_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_slots_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}

/// List `.toml` files in a directory. Missing or unreadable directories give
/// an empty list.
pub fn list_state_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    files
}

fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::create_dir(dir, e))?;
    }
    Ok(())
}
