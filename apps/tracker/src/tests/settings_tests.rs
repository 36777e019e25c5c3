use super::{load_settings_from, normalize_database_url, Settings};

use std::{fs, path::PathBuf};

use config::Map;

fn env(vars: &[(&str, &str)]) -> Map<String, String> {
    vars.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
}

#[test]
fn keeps_memory_and_full_urls() {
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url("sqlite://./data/test.db"),
        "sqlite://./data/test.db"
    );
}

#[test]
fn empty_url_falls_back_to_default() {
    assert_eq!(
        normalize_database_url("   "),
        Settings::default().database_url
    );
}

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings =
        load_settings_from(&dir.path().join("absent.toml"), env(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn settings_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tracker.toml");
    fs::write(
        &path,
        "database_url = \"./state/jobs.db\"\nexport_dir = \"exports\"\nreminder_window_days = 3\n",
    )
    .expect("write settings");

    let settings = load_settings_from(&path, env(&[])).expect("settings");
    assert_eq!(settings.database_url, "sqlite://./state/jobs.db");
    assert_eq!(settings.export_dir, PathBuf::from("exports"));
    assert_eq!(settings.reminder_window_days, 3);
}

#[test]
fn plain_database_url_overrides_settings_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tracker.toml");
    fs::write(&path, "database_url = \"./state/jobs.db\"\n").expect("write settings");

    let settings = load_settings_from(&path, env(&[("DATABASE_URL", "./other/jobs.db")]))
        .expect("settings");
    assert_eq!(settings.database_url, "sqlite://./other/jobs.db");
}

#[test]
fn prefixed_variables_win_over_plain_database_url() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(
        &dir.path().join("absent.toml"),
        env(&[
            ("DATABASE_URL", "./other/jobs.db"),
            ("TRACKER__DATABASE_URL", "sqlite::memory:"),
            ("TRACKER__REMINDER_WINDOW_DAYS", "14"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.database_url, "sqlite::memory:");
    assert_eq!(settings.reminder_window_days, 14);
}
