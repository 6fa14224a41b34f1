//! Persistence and configuration for effect-rack.
//!
//! - [`Element`]: the attribute tree a slot saves into and restores from
//! - [`attrs`]: slot attribute keys and tolerant value parsers
//! - [`AudioConfig`]: host sample rate and buffer size, stored as TOML
//! - [`paths`]: platform directories for user files
//!
//! # Example
//!
//! ```rust
//! use rack_config::{Element, attrs::{parse_float_attr, slot_keys}};
//!
//! let saved = Element::new(slot_keys::SLOT_TAG).with_attribute(slot_keys::WET, 0.5);
//! let text = saved.to_toml().unwrap();
//!
//! let restored = Element::from_toml(&text).unwrap();
//! let wet = restored.attribute(slot_keys::WET).and_then(parse_float_attr);
//! assert_eq!(wet, Some(0.5));
//! ```

pub mod attrs;
mod audio;
mod element;
mod error;
pub mod paths;

pub use audio::{AudioConfig, MAX_FRAMES_PER_BUFFER, MAX_SAMPLE_RATE};
pub use element::Element;
pub use error::ConfigError;
pub use paths::{
    audio_config_path, ensure_user_slots_dir, find_slot_state, list_state_files,
    slot_save_path, user_config_dir, user_slots_dir,
};
