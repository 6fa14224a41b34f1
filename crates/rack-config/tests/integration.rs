//! File round trips for rack-config.

use rack_config::attrs::{parse_bool_attr, parse_float_attr, slot_keys};
use rack_config::{AudioConfig, ConfigError, Element, find_slot_state, list_state_files};
use std::error::Error;
use tempfile::TempDir;

fn slot_element() -> Element {
    Element::new(slot_keys::SLOT_TAG)
        .with_attribute(slot_keys::ON, "0")
        .with_attribute(slot_keys::WET, 0.4)
        .with_attribute(slot_keys::AUTOQUIT, 1200)
        .with_attribute(slot_keys::GATE, 0.05)
        .with_child(
            Element::new("echocontrols")
                .with_attribute("echo_time", 375)
                .with_attribute("echo_feedback", 60),
        )
}

#[test]
fn element_file_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("slot.toml");

    let saved = slot_element();
    saved.save(&path).unwrap();
    assert!(path.is_file());

    let loaded = Element::load(&path).unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.attribute(slot_keys::ON).and_then(parse_bool_attr), Some(false));
    assert_eq!(loaded.attribute(slot_keys::AUTOQUIT).and_then(parse_float_attr), Some(1200.0));
    assert_eq!(
        loaded.first_child("echocontrols").and_then(|c| c.attribute("echo_time")),
        Some("375")
    );
}

#[test]
fn saved_file_is_findable_and_listed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("chorus_slot.toml");
    slot_element().save(&path).unwrap();

    assert_eq!(find_slot_state(path.to_str().unwrap()), Some(path.clone()));
    assert_eq!(list_state_files(temp.path()), vec![path]);
}

#[test]
fn load_missing_file_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.toml");
    let err = Element::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("missing.toml"));
    assert!(err.source().is_some());
}

#[test]
fn load_garbage_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.toml");
    std::fs::write(&path, "tag = [unclosed").unwrap();
    assert!(matches!(Element::load(&path), Err(ConfigError::TomlParse(_))));
}

#[test]
fn audio_config_file_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("audio.toml");
    let config = AudioConfig::new(44100, 128);
    config.save(&path).unwrap();
    assert_eq!(AudioConfig::load(&path).unwrap(), config);
}

#[test]
fn audio_config_rejects_invalid_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("audio.toml");
    std::fs::write(&path, "sample_rate = 0\nframes_per_buffer = 256\n").unwrap();
    assert!(matches!(
        AudioConfig::load(&path),
        Err(ConfigError::InvalidAudioConfig(_))
    ));
}

#[test]
fn save_into_file_path_fails_with_create_dir() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let err = slot_element().save(blocker.join("sub").join("slot.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::CreateDir { .. }));
}
