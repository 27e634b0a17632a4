//! Configuration resolution.
//!
//! Settings are layered, highest precedence last:
//! 1. Defaults
//! 2. Environment variables (`DOCTAG_FORMAT`, `DOCTAG_BASE_OFFSET`)
//! 3. CLI flags
//!
//! Every resolved value remembers where it came from so the CLI can report it.

use thiserror::Error;
use tracing::debug;

use crate::format::DocStringFormat;

/// Environment variable selecting the docstring format.
pub const ENV_FORMAT: &str = "DOCTAG_FORMAT";

/// Environment variable giving the base offset added to reported ranges.
pub const ENV_BASE_OFFSET: &str = "DOCTAG_BASE_OFFSET";

/// Errors raised while resolving configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The docstring format name is not recognized.
    #[error("unknown docstring format '{name}' (expected plain, epytext, rest, numpy or google)")]
    UnknownFormat { name: String },

    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: String,
        value: String,
        reason: String,
    },
}

/// Configuration value source (for precedence tracking).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigSource {
    /// Built-in default value.
    Default = 0,
    /// From environment variable.
    EnvVar = 1,
    /// From CLI flag (highest precedence).
    CliFlag = 2,
}

impl ConfigSource {
    /// Lowercase name for output.
    pub fn name(self) -> &'static str {
        match self {
            ConfigSource::Default => "default",
            ConfigSource::EnvVar => "env",
            ConfigSource::CliFlag => "cli",
        }
    }
}

/// A configuration value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue<T> {
    /// The actual value.
    pub value: T,
    /// Where the value came from.
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    /// Create a new config value with the given source.
    pub fn new(value: T, source: ConfigSource) -> Self {
        ConfigValue { value, source }
    }
}

/// CLI configuration overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// --format flag.
    pub format: Option<DocStringFormat>,
    /// --base-offset flag.
    pub base_offset: Option<usize>,
}

/// Resolved configuration with precedence information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Docstring format to scan for.
    pub format: ConfigValue<DocStringFormat>,
    /// Offset added to every reported range.
    pub base_offset: ConfigValue<usize>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ResolvedConfig {
            format: ConfigValue::new(DocStringFormat::default(), ConfigSource::Default),
            base_offset: ConfigValue::new(0, ConfigSource::Default),
        }
    }
}

impl ResolvedConfig {
    /// Resolve configuration from the process environment and CLI flags.
    pub fn resolve(cli_overrides: &CliOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(|var| std::env::var(var).ok(), cli_overrides)
    }

    /// Resolve configuration using `env` to look up environment variables.
    pub fn resolve_with<F>(env: F, cli_overrides: &CliOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ResolvedConfig::default();
        config.apply_env_vars(env)?;
        config.apply_cli_overrides(cli_overrides);
        debug!(
            format = %config.format.value,
            format_source = config.format.source.name(),
            base_offset = config.base_offset.value,
            "resolved configuration"
        );
        Ok(config)
    }

    fn apply_env_vars<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(format) = env(ENV_FORMAT) {
            let format = format.parse::<DocStringFormat>()?;
            self.format = ConfigValue::new(format, ConfigSource::EnvVar);
        }

        if let Some(raw) = env(ENV_BASE_OFFSET) {
            let offset = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidValue {
                    var: ENV_BASE_OFFSET.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            self.base_offset = ConfigValue::new(offset, ConfigSource::EnvVar);
        }

        Ok(())
    }

    fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(format) = overrides.format {
            self.format = ConfigValue::new(format, ConfigSource::CliFlag);
        }

        if let Some(offset) = overrides.base_offset {
            self.base_offset = ConfigValue::new(offset, ConfigSource::CliFlag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_env_or_flags() {
        let config = ResolvedConfig::resolve_with(env_of(&[]), &CliOverrides::default()).unwrap();
        assert_eq!(config.format.value, DocStringFormat::Plain);
        assert_eq!(config.format.source, ConfigSource::Default);
        assert_eq!(config.base_offset.value, 0);
    }

    #[test]
    fn env_overrides_defaults() {
        let env = env_of(&[(ENV_FORMAT, "epytext"), (ENV_BASE_OFFSET, "42")]);
        let config = ResolvedConfig::resolve_with(env, &CliOverrides::default()).unwrap();
        assert_eq!(config.format, ConfigValue::new(DocStringFormat::Epytext, ConfigSource::EnvVar));
        assert_eq!(config.base_offset, ConfigValue::new(42, ConfigSource::EnvVar));
    }

    #[test]
    fn cli_overrides_env() {
        let env = env_of(&[(ENV_FORMAT, "epytext")]);
        let overrides = CliOverrides {
            format: Some(DocStringFormat::Rest),
            base_offset: Some(7),
        };
        let config = ResolvedConfig::resolve_with(env, &overrides).unwrap();
        assert_eq!(config.format.value, DocStringFormat::Rest);
        assert_eq!(config.format.source, ConfigSource::CliFlag);
        assert_eq!(config.base_offset.value, 7);
    }

    #[test]
    fn bad_env_format_is_reported() {
        let env = env_of(&[(ENV_FORMAT, "doxygen")]);
        let err = ResolvedConfig::resolve_with(env, &CliOverrides::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownFormat {
                name: "doxygen".to_string()
            }
        );
    }

    #[test]
    fn bad_env_offset_is_reported() {
        let env = env_of(&[(ENV_BASE_OFFSET, "-3")]);
        let err = ResolvedConfig::resolve_with(env, &CliOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == ENV_BASE_OFFSET));
    }

    #[test]
    fn cli_flag_alone_overrides_default() {
        let overrides = CliOverrides {
            format: None,
            base_offset: Some(3),
        };
        let config = ResolvedConfig::resolve_with(env_of(&[]), &overrides).unwrap();
        assert_eq!(config.base_offset, ConfigValue::new(3, ConfigSource::CliFlag));
        assert_eq!(config.format.source, ConfigSource::Default);
    }
}
