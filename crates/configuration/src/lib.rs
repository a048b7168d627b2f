use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{LoggingSettings, PolicySettings, Settings};

/// The file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `SALES_INSIGHT__POLICY__HORIZON_MONTHS=6`.
pub const ENV_PREFIX: &str = "SALES_INSIGHT";

/// Loads the application settings.
///
/// Sources are layered lowest to highest priority: built-in defaults, the TOML
/// file, then `SALES_INSIGHT__*` environment variables. An explicit `path` must
/// exist; the default `config.toml` is optional. The merged result is validated
/// before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Missing keys fall back to `Settings::default()` through `#[serde(default)]`.
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Configuration loaded.");
    Ok(settings)
}
