//! Configuration management for pagemap.
//!
//! Parses `pagemap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [routes]
//! file = "routes.yaml"
//! match_suffix = "?"
//! not_found = "NotFoundPage"
//!
//! [sitemap]
//! base_url = "${SITE_URL:-http://localhost:8080}"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `routes.file`
//! - `sitemap.base_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the declaration file.
    pub routes_file: Option<PathBuf>,
    /// Override the dispatcher match suffix.
    pub match_suffix: Option<String>,
    /// Override the sitemap base URL.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pagemap.toml";

/// Default declaration file, relative to the config directory.
const DEFAULT_ROUTES_FILE: &str = "routes.yaml";

/// Optional-trailing-slash marker of the default dispatcher pattern syntax.
const DEFAULT_MATCH_SUFFIX: &str = "?";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Route configuration (file path is a relative string from TOML).
    routes: RoutesConfigRaw,
    /// Sitemap configuration.
    pub sitemap: SitemapConfig,

    /// Resolved route configuration (set after loading).
    #[serde(skip)]
    pub routes_resolved: RoutesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw route configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RoutesConfigRaw {
    file: Option<String>,
    match_suffix: Option<String>,
    not_found: Option<String>,
}

/// Resolved route configuration with an absolute declaration file path.
#[derive(Debug, Default)]
pub struct RoutesConfig {
    /// Declaration file.
    pub file: PathBuf,
    /// Suffix appended to resolved paths to form dispatcher patterns.
    pub match_suffix: String,
    /// Render target for the catch-all not-found route.
    pub not_found: String,
}

/// Sitemap configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Base URL prefixed to every path in `sitemap.xml`.
    pub base_url: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
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
        /// Config field path (e.g., "`sitemap.base_url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `pagemap.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(routes_file) = &settings.routes_file {
            self.routes_resolved.file.clone_from(routes_file);
        }
        if let Some(match_suffix) = &settings.match_suffix {
            self.routes_resolved.match_suffix.clone_from(match_suffix);
        }
        if let Some(base_url) = &settings.base_url {
            self.sitemap.base_url.clone_from(base_url);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            routes: RoutesConfigRaw::default(),
            sitemap: SitemapConfig::default(),
            routes_resolved: RoutesConfig {
                file: base.join(DEFAULT_ROUTES_FILE),
                match_suffix: DEFAULT_MATCH_SUFFIX.to_owned(),
                not_found: "NotFoundPage".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_routes()?;
        self.validate_sitemap()?;
        Ok(())
    }

    /// Validate route configuration.
    fn validate_routes(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.routes_resolved.not_found, "routes.not_found")?;

        // A slash would make patterns disagree with canonical paths
        if self.routes_resolved.match_suffix.contains('/') {
            return Err(ConfigError::Validation(
                "routes.match_suffix cannot contain '/'".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate sitemap configuration.
    fn validate_sitemap(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.sitemap.base_url, "sitemap.base_url")?;
        require_http_url(&self.sitemap.base_url, "sitemap.base_url")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref file) = self.routes.file {
            self.routes.file = Some(expand::expand_env(file, "routes.file")?);
        }
        self.sitemap.base_url = expand::expand_env(&self.sitemap.base_url, "sitemap.base_url")?;
        Ok(())
    }

    /// Resolve the declaration file path against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.routes_resolved = RoutesConfig {
            file: config_dir.join(self.routes.file.as_deref().unwrap_or(DEFAULT_ROUTES_FILE)),
            match_suffix: self
                .routes
                .match_suffix
                .clone()
                .unwrap_or_else(|| DEFAULT_MATCH_SUFFIX.to_owned()),
            not_found: self
                .routes
                .not_found
                .clone()
                .unwrap_or_else(|| "NotFoundPage".to_owned()),
        };
    }
}
