// tests/config_load.rs
//
// Config resolution order and env overrides. These tests mutate process env
// and CWD, so they run serially.

use std::{env, fs};

use profile_pulse::config::app::{
    AppConfig, ENV_CONFIG_PATH, ENV_FEED_PATH, ENV_UTC_OFFSET_MINUTES,
};

fn clear_env() {
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_UTC_OFFSET_MINUTES);
    env::remove_var(ENV_FEED_PATH);
}

#[serial_test::serial]
#[test]
fn defaults_when_no_file_present() {
    clear_env();
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    let cfg = AppConfig::load_default();

    env::set_current_dir(&old).unwrap();
    let cfg = cfg.expect("defaults load");
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.feed.refresh_secs, 300);
}

#[serial_test::serial]
#[test]
fn env_path_takes_precedence_and_must_exist() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("pulse.toml");
    fs::write(
        &p,
        "[calendar]\nutc_offset_minutes = -300\n[feed]\npath = \"feed.json\"\nrefresh_secs = 60\n",
    )
    .unwrap();

    env::set_var(ENV_CONFIG_PATH, p.display().to_string());
    let cfg = AppConfig::load_default().expect("load from env path");
    assert_eq!(cfg.calendar.utc_offset_minutes, -300);
    assert_eq!(cfg.feed.path.to_str(), Some("feed.json"));
    assert_eq!(cfg.refresh_interval().as_secs(), 60);

    env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(AppConfig::load_default().is_err());
    clear_env();
}

#[serial_test::serial]
#[test]
fn env_overrides_apply_after_file() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("pulse.toml");
    fs::write(&p, "[calendar]\nutc_offset_minutes = 60\n").unwrap();

    env::set_var(ENV_UTC_OFFSET_MINUTES, "330");
    env::set_var(ENV_FEED_PATH, "/srv/feed.json");
    let cfg = AppConfig::load_from_file(&p).expect("load with overrides");
    assert_eq!(cfg.calendar.utc_offset_minutes, 330);
    assert_eq!(cfg.feed.path.to_str(), Some("/srv/feed.json"));

    env::set_var(ENV_UTC_OFFSET_MINUTES, "east");
    assert!(AppConfig::load_from_file(&p).is_err());

    env::set_var(ENV_UTC_OFFSET_MINUTES, "2000");
    assert!(AppConfig::load_from_file(&p).is_err());
    clear_env();
}

#[serial_test::serial]
#[test]
fn broken_toml_reports_path() {
    clear_env();
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("pulse.toml");
    fs::write(&p, "[calendar\nutc_offset_minutes = ").unwrap();
    let err = AppConfig::load_from_file(&p).unwrap_err();
    assert!(format!("{err:#}").contains("pulse.toml"));
}
