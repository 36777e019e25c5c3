use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat, Map};
use serde::Deserialize;
use tracker_core::DEFAULT_REMINDER_WINDOW_DAYS;

pub const SETTINGS_FILE: &str = "tracker.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub export_dir: PathBuf,
    pub reminder_window_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/job-tracker.db".into(),
            export_dir: PathBuf::from("."),
            reminder_window_days: DEFAULT_REMINDER_WINDOW_DAYS,
        }
    }
}

/// Defaults, then `tracker.toml` in the working directory, then the plain
/// `DATABASE_URL` variable, then `TRACKER__*` environment variables.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), std::env::vars().collect())
}

/// Same layering over an explicit environment.
pub fn load_settings_from(path: &Path, env: Map<String, String>) -> anyhow::Result<Settings> {
    let plain_database_url: Map<String, String> = env
        .iter()
        .filter(|(key, _)| key.as_str() == "DATABASE_URL")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let defaults = Settings::default();
    let raw = Config::builder()
        .set_default("database_url", defaults.database_url)?
        .set_default(
            "export_dir",
            defaults.export_dir.to_string_lossy().into_owned(),
        )?
        .set_default("reminder_window_days", defaults.reminder_window_days)?
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(Environment::default().source(Some(plain_database_url)))
        .add_source(
            Environment::with_prefix("TRACKER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(Some(env)),
        )
        .build()
        .with_context(|| format!("failed to load settings from '{}'", path.display()))?;

    let mut settings: Settings = raw
        .try_deserialize()
        .context("invalid tracker settings")?;
    settings.database_url = normalize_database_url(&settings.database_url);
    Ok(settings)
}

/// Accepts either a full sqlite url or a bare file path.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
