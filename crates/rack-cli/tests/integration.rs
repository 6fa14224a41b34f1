//! Integration tests for the `rack` binary.

use rack_config::Element;
use std::process::Command;
use tempfile::TempDir;

fn rack_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rack"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn effects_lists_builtins() {
    let output = rack_bin().arg("effects").output().expect("failed to run rack effects");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in ["amplifier", "echo", "invert"] {
        assert!(stdout.contains(id), "listing should contain '{id}'");
    }
}

#[test]
fn effects_details_show_keys() {
    let output = rack_bin().args(["effects", "echo"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("echo_time"));
    assert!(stdout.contains("echocontrols"));
}

#[test]
fn effects_unknown_fails() {
    let output = rack_bin().args(["effects", "fuzzbox"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown effect"));
}

#[test]
fn timeout_documented_example() {
    let output = rack_bin()
        .args(["timeout", "--decay-ms", "100", "--sample-rate", "44100", "--frames", "256"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("18 buffers"));
}

#[test]
fn render_save_then_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("echo.toml");

    let output = rack_bin()
        .args(["render", "--effect", "echo", "--wet", "0.5", "--decay-ms", "900"])
        .args(["--buffers", "20", "--sample-rate", "48000", "--frames", "256", "--save"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let saved = Element::load(&path).unwrap();
    assert_eq!(saved.attribute("wet"), Some("0.5"));
    assert_eq!(saved.attribute("autoquit"), Some("900"));
    assert!(saved.first_child("echocontrols").is_some());

    let output = rack_bin()
        .args(["render", "--effect", "echo", "--buffers", "10", "--sample-rate", "48000"])
        .args(["--frames", "256", "--load"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("still running"));
}

#[cfg(unix)]
#[test]
fn render_save_by_name_uses_user_slots_dir() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config");
    let with_home = |cmd: &mut Command| {
        cmd.env("HOME", home.path()).env("XDG_CONFIG_HOME", &config);
    };

    let mut save = rack_bin();
    with_home(&mut save);
    let output = save
        .args(["render", "--effect", "amplifier", "--gate", "0.25", "--buffers", "4"])
        .args(["--sample-rate", "48000", "--frames", "256", "--save", "quiet-amp"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let saved = rack_config::list_state_files(&home_slots_dir(home.path()));
    assert_eq!(saved.len(), 1);
    assert!(saved[0].ends_with("quiet-amp.toml"));
    assert_eq!(Element::load(&saved[0]).unwrap().attribute("gate"), Some("0.25"));

    let mut load = rack_bin();
    with_home(&mut load);
    let output = load
        .args(["render", "--effect", "amplifier", "--buffers", "4"])
        .args(["--sample-rate", "48000", "--frames", "256", "--load", "quiet-amp"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

/// The slots directory the binary sees when `HOME` is `home` and
/// `XDG_CONFIG_HOME` is `home/config`.
#[cfg(unix)]
fn home_slots_dir(home: &std::path::Path) -> std::path::PathBuf {
    let base = if cfg!(target_os = "macos") {
        home.join("Library").join("Application Support")
    } else {
        home.join("config")
    };
    base.join("effect-rack").join("slots")
}

#[test]
fn render_unknown_effect_fails() {
    let output = rack_bin()
        .args(["render", "--effect", "fuzzbox", "--sample-rate", "48000", "--frames", "256"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
