use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown alias strategy '{0}' (expected 'counter' or 'random')")]
pub struct UnknownAliasStrategy(pub String);

/// How relation alias tokens are produced
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasStrategy {
    /// `{prefix}{n}`, reproducible across runs
    #[default]
    Counter,
    /// Fixed-length random alphanumeric tokens
    Random,
}

impl FromStr for AliasStrategy {
    type Err = UnknownAliasStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counter" => Ok(AliasStrategy::Counter),
            "random" => Ok(AliasStrategy::Random),
            other => Err(UnknownAliasStrategy(other.to_string())),
        }
    }
}

/// Planner configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    /// Alias token strategy
    pub alias_strategy: AliasStrategy,

    /// Prefix for counter-based aliases
    #[validate(custom(function = "validate_alias_prefix"))]
    pub alias_prefix: String,

    /// Token length for random aliases
    #[validate(range(
        min = 3,
        max = 32,
        message = "Alias length must be between 3 and 32"
    ))]
    pub alias_length: usize,

    /// Bind unreferenced ancestor relations so every nested hop is alias-chained
    pub synthesize_ancestors: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            alias_strategy: AliasStrategy::Counter,
            alias_prefix: "r".to_string(),
            alias_length: 5,
            synthesize_ancestors: false,
        }
    }
}

impl PlannerConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            alias_strategy: parse_env_var("RELGRAPH_ALIAS_STRATEGY", "counter")?,
            alias_prefix: env::var("RELGRAPH_ALIAS_PREFIX").unwrap_or_else(|_| "r".to_string()),
            alias_length: parse_env_var("RELGRAPH_ALIAS_LENGTH", "5")?,
            synthesize_ancestors: parse_env_var("RELGRAPH_SYNTHESIZE_ANCESTORS", "false")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        Self::from_yaml_str(&content)
    }

    /// Create configuration from YAML text; missing keys take their defaults
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content.to_string(),
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }
}

fn validate_alias_prefix(prefix: &str) -> Result<(), ValidationError> {
    let starts_with_letter = prefix
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic());
    let well_formed = prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if prefix.len() > 16 || !starts_with_letter || !well_formed {
        let mut err = ValidationError::new("alias_prefix");
        err.message = Some(
            "Alias prefix must be 1-16 characters, start with a letter and contain only letters, digits or '_'"
                .into(),
        );
        return Err(err);
    }
    Ok(())
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
