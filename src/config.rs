use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub artifacts: ArtifactSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub screening: ScreeningSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactSettings {
    #[serde(default = "default_model_path")]
    pub model_path: String,
    #[serde(default = "default_encoder_path")]
    pub encoder_path: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            encoder_path: default_encoder_path(),
        }
    }
}

fn default_model_path() -> String {
    "models/modelo_obesidade.json".to_string()
}
fn default_encoder_path() -> String {
    "models/codificador_rotulos.json".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetSettings {
    /// Optional patient-records file for dashboard statistics; absence is
    /// handled by falling back to placeholder figures.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningSettings {
    /// Show per-label probabilities alongside the diagnosis.
    #[serde(default)]
    pub show_probabilities: bool,
}

impl Default for ScreeningSettings {
    fn default() -> Self {
        Self {
            show_probabilities: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_report_url")]
    pub url: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            url: default_report_url(),
        }
    }
}

fn default_report_url() -> String {
    "https://lookerstudio.google.com/embed/reporting/29f80ed0-090c-437e-a0e8-a3fd3b00e5be/page/2V5oF"
        .to_string()
}

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

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with VIDA_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with VIDA_)
            // e.g., VIDA_ARTIFACTS__MODEL_PATH -> artifacts.model_path
            .add_source(
                Environment::with_prefix("VIDA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply plain environment overrides for the artifact locations
        settings = apply_path_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("VIDA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Plain (unprefixed) environment variables override the file paths, which
/// keeps deployment scripts that export MODEL_PATH and friends working.
fn apply_path_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let model_path = env::var("MODEL_PATH").ok();
    let encoder_path = env::var("ENCODER_PATH").ok();
    let dataset_path = env::var("DATASET_PATH").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(path) = model_path {
        builder = builder.set_override("artifacts.model_path", path)?;
    }
    if let Some(path) = encoder_path {
        builder = builder.set_override("artifacts.encoder_path", path)?;
    }
    if let Some(path) = dataset_path {
        builder = builder.set_override("dataset.path", path)?;
    }

    builder.build()
}
