use crate::core::MalformedTimestampPolicy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub timestamps: TimestampSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportSettings {
    /// Path to the `matches.json` export
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimestampSettings {
    /// Skip and count malformed timestamps instead of aborting
    #[serde(default)]
    pub skip_malformed: bool,
}

impl TimestampSettings {
    pub fn policy(&self) -> MalformedTimestampPolicy {
        if self.skip_malformed {
            MalformedTimestampPolicy::Skip
        } else {
            MalformedTimestampPolicy::Abort
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_chart_enabled")]
    pub enabled: bool,
    #[serde(default = "default_chart_output")]
    pub output: PathBuf,
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            enabled: default_chart_enabled(),
            output: default_chart_output(),
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

fn default_chart_enabled() -> bool { true }
fn default_chart_output() -> PathBuf { PathBuf::from("hinge_charts.svg") }
fn default_chart_width() -> u32 { 1200 }
fn default_chart_height() -> u32 { 800 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HINGE__)
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder(None)?.try_deserialize()
    }

    /// Load configuration with an explicit file layered over the defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::builder(Some(path.as_ref()))?.try_deserialize()
    }

    fn builder(extra: Option<&Path>) -> Result<Config, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path));
        }

        // e.g., HINGE__EXPORT__PATH -> export.path
        builder
            .add_source(
                Environment::with_prefix("HINGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
    }
}
