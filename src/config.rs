//! Layered settings.
//!
//! Settings are resolved from built-in defaults, then an optional TOML file
//! (`--config`, or `sensorscope.toml` in the working directory), then
//! `SENSORSCOPE_*` environment variables. Command-line flags are applied on
//! top by the binary.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::date::parse_date;

/// Which color theme to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Path to the sensor report.
    pub file: PathBuf,
    /// Index of the sensor shown first.
    pub sensor: usize,
    /// Initial start date (dd.mm.yyyy or yyyy-mm-dd).
    #[serde(default)]
    pub start: Option<String>,
    /// Initial end date.
    #[serde(default)]
    pub end: Option<String>,
    pub theme: ThemeChoice,
    /// How often to check the report file for changes, in seconds.
    pub refresh_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("report.json"),
            sensor: 0,
            start: None,
            end: None,
            theme: ThemeChoice::Auto,
            refresh_secs: 1,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let builder = Config::builder()
            .set_default("file", "report.json")?
            .set_default("sensor", 0_i64)?
            .set_default("theme", "auto")?
            .set_default("refresh_secs", 1_i64)?;

        let builder = match config_path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("sensorscope").required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix("SENSORSCOPE"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Parse the configured start date, if any.
    pub fn start_date(&self) -> Result<Option<NaiveDate>> {
        self.start.as_deref().map(parse_date).transpose()
    }

    /// Parse the configured end date, if any.
    pub fn end_date(&self) -> Result<Option<NaiveDate>> {
        self.end.as_deref().map(parse_date).transpose()
    }
}
