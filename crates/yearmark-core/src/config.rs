//! Configuration loading and typed config structures.
//!
//! Configuration comes from an optional YAML file whose every field has a
//! default, followed by environment overrides. The API key is normally only
//! supplied through the environment. The resulting [`AppConfig`] is read
//! once at startup and handed to the components that need it.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid {name}: {message}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Text-generation backend settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Reference page lookup settings.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Prompt template settings.
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Event catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] for a malformed override.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for a malformed override.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// See [`AppConfig::apply_overrides`] for the variables consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for a malformed override.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides read through `lookup`.
    ///
    /// - `YEARMARK_API_KEY`, else `OPENAI_API_KEY` -- `llm.api_key`
    /// - `YEARMARK_BACKEND` -- `llm.backend`
    /// - `YEARMARK_API_URL` -- `llm.api_url`
    /// - `YEARMARK_MODEL` -- `llm.model`
    /// - `YEARMARK_MAX_TOKENS` -- `llm.max_tokens`
    /// - `YEARMARK_GENERATION_TIMEOUT_MS` -- `llm.timeout_ms`
    /// - `YEARMARK_LOOKUP_BASE_URL` -- `lookup.base_url`
    /// - `YEARMARK_LOOKUP_TIMEOUT_MS` -- `lookup.timeout_ms`
    /// - `YEARMARK_TEMPLATES_DIR` -- `prompt.templates_dir`
    /// - `YEARMARK_CATALOG` -- `catalog.path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for a malformed override.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(key) = lookup("YEARMARK_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.llm.api_key = Some(key);
        }
        if let Some(val) = lookup("YEARMARK_BACKEND") {
            self.llm.backend = val.parse().map_err(|message| ConfigError::InvalidEnv {
                name: "YEARMARK_BACKEND",
                message,
            })?;
        }
        if let Some(val) = lookup("YEARMARK_API_URL") {
            self.llm.api_url = val;
        }
        if let Some(val) = lookup("YEARMARK_MODEL") {
            self.llm.model = val;
        }
        if let Some(val) = lookup("YEARMARK_MAX_TOKENS") {
            self.llm.max_tokens = parse_number("YEARMARK_MAX_TOKENS", &val)?;
        }
        if let Some(val) = lookup("YEARMARK_GENERATION_TIMEOUT_MS") {
            self.llm.timeout_ms = parse_number("YEARMARK_GENERATION_TIMEOUT_MS", &val)?;
        }
        if let Some(val) = lookup("YEARMARK_LOOKUP_BASE_URL") {
            self.lookup.base_url = val;
        }
        if let Some(val) = lookup("YEARMARK_LOOKUP_TIMEOUT_MS") {
            self.lookup.timeout_ms = parse_number("YEARMARK_LOOKUP_TIMEOUT_MS", &val)?;
        }
        if let Some(val) = lookup("YEARMARK_TEMPLATES_DIR") {
            self.prompt.templates_dir = Some(PathBuf::from(val));
        }
        if let Some(val) = lookup("YEARMARK_CATALOG") {
            self.catalog.path = Some(PathBuf::from(val));
        }
        Ok(())
    }
}

/// Parse a numeric override, naming the variable on failure.
fn parse_number<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnv {
            name,
            message: format!("{value:?}: {e}"),
        })
}

/// Supported LLM backend types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// `OpenAI`-compatible API (works with `OpenAI`, `DeepSeek`, Ollama).
    #[default]
    #[serde(alias = "deepseek", alias = "ollama")]
    OpenAi,
    /// Anthropic Messages API (different request format).
    #[serde(alias = "claude")]
    Anthropic,
}

impl FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "deepseek" | "ollama" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(format!("unknown backend type: {other}")),
        }
    }
}

/// Configuration for the text-generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LlmConfig {
    /// The backend wire format.
    #[serde(default)]
    pub backend: BackendType,

    /// Base API URL (e.g. `https://api.openai.com/v1`).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API key. Blank counts as absent.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Deadline for one generation call, in milliseconds.
    #[serde(default = "default_generation_timeout_ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// The API key, if one is set and not blank.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// The generation deadline.
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::default(),
            api_url: default_api_url(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_generation_timeout_ms(),
        }
    }
}

/// Reference page lookup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupConfig {
    /// Base URL that event names are appended to.
    #[serde(default = "default_lookup_base_url")]
    pub base_url: String,

    /// Fetch timeout in milliseconds.
    #[serde(default = "default_lookup_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with lookups.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Largest reference page body accepted, in bytes.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

impl LookupConfig {
    /// The fetch timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_lookup_base_url(),
            timeout_ms: default_lookup_timeout_ms(),
            user_agent: default_user_agent(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

/// Prompt template configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromptConfig {
    /// Directory holding `system.j2` and `user.j2` overrides.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

/// Event catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// YAML catalog file replacing the built-in one.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".to_owned()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_owned()
}

const fn default_max_tokens() -> u32 {
    150
}

const fn default_generation_timeout_ms() -> u64 {
    30_000
}

fn default_lookup_base_url() -> String {
    crate::resolver::DEFAULT_BASE_URL.to_owned()
}

const fn default_lookup_timeout_ms() -> u64 {
    10_000
}

const fn default_max_document_bytes() -> usize {
    crate::fetch::DEFAULT_MAX_DOCUMENT_BYTES
}

fn default_user_agent() -> String {
    format!("yearmark/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_owned()
}
