//! Configuration module for `cs-amc-graph`

use crate::core::builder::IdPolicy;
use crate::core::render::{OutputFormat, RenderOptions};
use crate::shared::logger;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in string values
const DIR_VARIABLE: &str = "$CSGRAPH";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    pub level: String,
    /// Log file path (empty logs to the console)
    pub file: String,
    /// Enable verbose output
    pub verbose: bool,
}

/// Input and output locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// JSON document to read
    pub input: String,
    /// File to write
    pub output: String,
}

/// Graph construction settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Duplicate id policy (merge, reject, qualify)
    pub id_policy: String,
}

/// Rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output format (html, dot, json)
    pub format: String,
    /// Enable the physics layout in HTML output
    pub physics: bool,
    /// Page title
    pub title: String,
    /// Local vis-network script to inline into HTML output (empty loads it from the CDN)
    pub library: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: String::new(),
            physics: true,
            title: String::new(),
            library: String::new(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Graph settings
    #[serde(default)]
    pub graph: GraphConfig,
    /// Render settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override input path
    pub input: Option<String>,
    /// Override output path
    pub output: Option<String>,
    /// Override id policy
    pub id_policy: Option<String>,
    /// Override output format
    pub format: Option<String>,
    /// Override physics flag
    pub physics: Option<bool>,
    /// Override inlined vis-network script
    pub library: Option<String>,
}

/// Errors raised while persisting the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config could not be serialized
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The config file could not be written or removed
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl Config {
    /// Get the `$CSGRAPH` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/csgraph`
    /// - macOS: `~/Library/Application Support/csgraph`
    /// - Windows: `%APPDATA%\csgraph`
    #[must_use]
    pub fn get_csgraph_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("csgraph")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// updated, so upgrading picks up new settings without touching user
    /// values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let pairs: [(&mut String, &String); 7] = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.input, &defaults.paths.input),
            (&mut self.paths.output, &defaults.paths.output),
            (&mut self.graph.id_policy, &defaults.graph.id_policy),
            (&mut self.render.format, &defaults.render.format),
            (&mut self.render.title, &defaults.render.title),
        ];

        let mut changed = false;
        for (value, default) in pairs {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }
        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; the config file is not modified.
    /// Only non-`None` values replace config values. When the format is
    /// overridden but the output path is not, the configured path takes the
    /// format's extension.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(input) = &overrides.input {
            self.paths.input.clone_from(input);
        }
        if let Some(output) = &overrides.output {
            self.paths.output.clone_from(output);
        }

        if let Some(policy) = &overrides.id_policy {
            self.graph.id_policy.clone_from(policy);
        }

        if let Some(format) = &overrides.format {
            self.render.format.clone_from(format);
        }
        if let Some(physics) = overrides.physics {
            self.render.physics = physics;
        }
        if let Some(library) = &overrides.library {
            self.render.library.clone_from(library);
        }

        if overrides.format.is_some() && overrides.output.is_none() {
            if let Ok(format) = self.output_format() {
                self.paths.output = Path::new(&self.paths.output)
                    .with_extension(format.extension())
                    .to_string_lossy()
                    .into_owned();
            }
        }
    }

    /// Get the user config file path
    ///
    /// Returns the full path to the configuration file:
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds (allows separate debug config)
    ///
    /// The file is located in the directory returned by [`get_csgraph_dir`].
    ///
    /// [`get_csgraph_dir`]: Self::get_csgraph_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_csgraph_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CSGRAPH` in a string to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_csgraph_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing sections and fields take their serde defaults; `$CSGRAPH` is
    /// expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.input = Self::expand_variables(&config.paths.input);
        config.paths.output = Self::expand_variables(&config.paths.output);
        config.render.library = Self::expand_variables(&config.render.library);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// - If the file exists: load it, merge missing fields from defaults, save if changed
    /// - If it doesn't (first run): write the defaults to it
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// [`load`](Self::load) against an explicit config file path
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(config_file);
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save_to(config_file);
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to an explicit path, creating parent directories
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written
    pub fn save_to(&self, config_file: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: config_file.to_path_buf(),
            source,
        };
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str).map_err(io_err)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `input`, `output`,
    /// `id_policy`, `format`, `physics`, `title`, `library`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "input" => Some(self.paths.input.clone()),
            "output" => Some(self.paths.output.clone()),
            "id_policy" | "id-policy" => Some(self.graph.id_policy.clone()),
            "format" => Some(self.render.format.clone()),
            "physics" => Some(self.render.physics.to_string()),
            "title" => Some(self.render.title.clone()),
            "library" => Some(self.render.library.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Values are validated before being stored. Call [`save()`](Config::save)
    /// to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value is invalid
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                if logger::parse_level(value).is_none() {
                    return Err(format!("Invalid log level: '{value}'"));
                }
                self.logging.level = value.to_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "input" => self.paths.input = value.to_string(),
            "output" => self.paths.output = value.to_string(),
            "id_policy" | "id-policy" => {
                self.graph.id_policy = IdPolicy::from_str(value)?.to_string();
            }
            "format" => self.render.format = OutputFormat::from_str(value)?.to_string(),
            "physics" => self.render.physics = parse_bool(key, value)?,
            "title" => self.render.title = value.to_string(),
            "library" => self.render.library = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "input" => self.paths.input.clone_from(&defaults.paths.input),
            "output" => self.paths.output.clone_from(&defaults.paths.output),
            "id_policy" | "id-policy" => self.graph.id_policy.clone_from(&defaults.graph.id_policy),
            "format" => self.render.format.clone_from(&defaults.render.format),
            "physics" => self.render.physics = defaults.render.physics,
            "title" => self.render.title.clone_from(&defaults.render.title),
            "library" => self.render.library.clone_from(&defaults.render.library),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), ConfigError> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(&config_file).map_err(|source| ConfigError::Io {
                path: config_file.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Parsed id policy, falling back to [`IdPolicy::Merge`] when empty
    ///
    /// # Errors
    /// Returns an error if the configured value is not a known policy
    pub fn id_policy(&self) -> Result<IdPolicy, String> {
        if self.graph.id_policy.is_empty() {
            return Ok(IdPolicy::default());
        }
        IdPolicy::from_str(&self.graph.id_policy)
    }

    /// Parsed output format, falling back to HTML when empty
    ///
    /// # Errors
    /// Returns an error if the configured value is not a known format
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        if self.render.format.is_empty() {
            return Ok(OutputFormat::default());
        }
        OutputFormat::from_str(&self.render.format)
    }

    /// Renderer options derived from the `[render]` section
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            title: if self.render.title.is_empty() {
                defaults.title
            } else {
                self.render.title.clone()
            },
            physics: self.render.physics,
            library: (!self.render.library.is_empty())
                .then(|| PathBuf::from(&self.render.library)),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  input = \"{}\"", self.paths.input)?;
        writeln!(f, "  output = \"{}\"", self.paths.output)?;

        writeln!(f, "\n[graph]")?;
        writeln!(f, "  id_policy = \"{}\"", self.graph.id_policy)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  format = \"{}\"", self.render.format)?;
        writeln!(f, "  physics = {}", self.render.physics)?;
        writeln!(f, "  title = \"{}\"", self.render.title)?;
        writeln!(f, "  library = \"{}\"", self.render.library)?;

        Ok(())
    }
}
