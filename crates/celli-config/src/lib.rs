//! Configuration management for celli.
//!
//! Parses `celli.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `author.name`
//! - `author.link`
//! - `author.avatar`
//! - `author.about`
//! - `template.filename`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override pretty-printed notebook output.
    pub pretty: Option<bool>,
    /// Override HTTP fetch timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override author name.
    pub author_name: Option<String>,
    /// Override author profile link.
    pub author_link: Option<String>,
    /// Override author avatar URL.
    pub author_avatar: Option<String>,
    /// Override author description.
    pub author_about: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "celli.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion configuration.
    pub convert: ConvertConfig,
    /// Content fetch configuration.
    pub fetch: FetchConfig,
    /// Default author for new templates.
    pub author: AuthorConfig,
    /// Template scaffolding configuration.
    pub template: TemplateConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Conversion configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Write tab-indented notebook JSON.
    pub pretty: bool,
}

/// Content fetch configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// HTTP timeout in seconds. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl FetchConfig {
    /// HTTP timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Default author for new templates.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    /// Display name.
    pub name: Option<String>,
    /// Profile link.
    pub link: Option<String>,
    /// Avatar image URL.
    pub avatar: Option<String>,
    /// Free-form description.
    pub about: Option<String>,
}

/// Template scaffolding configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// File name used when the output path is a directory.
    pub filename: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            filename: "template.md".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`author.name`").
        field: String,
        /// Error message (e.g., "${`USER`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Expand an optional string field in place.
fn expand_optional(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand::expand_env(raw, field)?);
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `celli.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(pretty) = settings.pretty {
            self.convert.pretty = pretty;
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.fetch.timeout_secs = Some(timeout_secs);
        }
        if let Some(name) = &settings.author_name {
            self.author.name = Some(name.clone());
        }
        if let Some(link) = &settings.author_link {
            self.author.link = Some(link.clone());
        }
        if let Some(avatar) = &settings.author_avatar {
            self.author.avatar = Some(avatar.clone());
        }
        if let Some(about) = &settings.author_about {
            self.author.about = Some(about.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_fetch()?;
        self.validate_author()?;
        require_non_empty(&self.template.filename, "template.filename")?;
        Ok(())
    }

    /// Validate fetch configuration.
    fn validate_fetch(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "fetch.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate author configuration.
    fn validate_author(&self) -> Result<(), ConfigError> {
        if let Some(ref link) = self.author.link {
            require_http_url(link, "author.link")?;
        }
        if let Some(ref avatar) = self.author.avatar {
            require_http_url(avatar, "author.avatar")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand_optional(&mut self.author.name, "author.name")?;
        expand_optional(&mut self.author.link, "author.link")?;
        expand_optional(&mut self.author.avatar, "author.avatar")?;
        expand_optional(&mut self.author.about, "author.about")?;
        self.template.filename = expand::expand_env(&self.template.filename, "template.filename")?;
        Ok(())
    }
}
