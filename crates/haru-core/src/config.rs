use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use url::Url;

use crate::category::Category;
use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a single-line summary of all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Provider API keys; usually supplied through the environment or `.env`
    #[serde(default)]
    pub api_keys: ApiKeys,

    /// Provider base URLs
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Chat completion settings for recipes and quotes
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address, must be an IP literal
    pub host: String,

    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("server.host '{}': {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Provider API keys. Empty strings are treated as unset.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kakao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<String>,
}

impl ApiKeys {
    /// Key for the provider behind `category`, if one is configured
    pub fn for_category(&self, category: Category) -> Option<&str> {
        let key = match category {
            Category::Weather => &self.kma,
            Category::Transit => &self.kakao,
            Category::Stock => &self.stock,
            Category::Recipe | Category::Quote => &self.openai,
        };
        key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<String> {
        match category {
            Category::Weather => &mut self.kma,
            Category::Transit => &mut self.kakao,
            Category::Stock => &mut self.stock,
            Category::Recipe | Category::Quote => &mut self.openai,
        }
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = |category| {
            if self.for_category(category).is_some() {
                "set"
            } else {
                "unset"
            }
        };
        f.debug_struct("ApiKeys")
            .field("kma", &state(Category::Weather))
            .field("kakao", &state(Category::Transit))
            .field("stock", &state(Category::Stock))
            .field("openai", &state(Category::Recipe))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// KMA short-term forecast service (VilageFcstInfoService_2.0)
    pub kma_url: String,

    /// Kakao Local API host
    pub kakao_url: String,

    /// Public data portal stock price service
    pub stock_url: String,

    /// OpenAI-compatible API root, `/chat/completions` is appended
    pub openai_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            kma_url: "http://apis.data.go.kr/1360000/VilageFcstInfoService_2.0".to_string(),
            kakao_url: "https://dapi.kakao.com".to_string(),
            stock_url: "http://apis.data.go.kr/1160100/service/GetStockSecuritiesInfoService"
                .to_string(),
            openai_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the user config file (if any) and the environment
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults when it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Apply environment-style overrides; `lookup` maps a variable name to its value
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for category in [
            Category::Weather,
            Category::Transit,
            Category::Stock,
            Category::Recipe,
        ] {
            if let Some(value) = lookup(category.api_key_env()) {
                *self.api_keys.slot_mut(category) = Some(value);
            }
        }

        if let Some(host) = lookup("HARU_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("HARU_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("Ignoring HARU_PORT '{}': {}", port, e),
            }
        }
        if let Some(model) = lookup("HARU_LLM_MODEL") {
            self.llm.model = model;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if let Err(e) = self.server.socket_addr() {
            result.add_error("server.host", e.to_string());
        }
        if self.server.port == 0 {
            result.add_error("server.port", "Port cannot be 0");
        }

        self.validate_url(&self.endpoints.kma_url, "endpoints.kma_url", &mut result);
        self.validate_url(&self.endpoints.kakao_url, "endpoints.kakao_url", &mut result);
        self.validate_url(&self.endpoints.stock_url, "endpoints.stock_url", &mut result);
        self.validate_url(&self.endpoints.openai_url, "endpoints.openai_url", &mut result);

        if self.llm.model.trim().is_empty() {
            result.add_error("llm.model", "Model name cannot be empty");
        }

        // Missing keys only disable their categories
        for (field, category) in [
            ("api_keys.kma", Category::Weather),
            ("api_keys.kakao", Category::Transit),
            ("api_keys.stock", Category::Stock),
            ("api_keys.openai", Category::Recipe),
        ] {
            if self.api_keys.for_category(category).is_none() {
                result.add_warning(
                    field,
                    format!(
                        "{} not set - '{}' lookups will report a missing key",
                        category.api_key_env(),
                        category.label()
                    ),
                );
            }
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("haru");

        Ok(config_dir.join("config.toml"))
    }
}
