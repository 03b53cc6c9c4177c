//! Runtime configuration, read from environment variables at startup.

use std::time::Duration;

use thiserror::Error;

use crate::workflow::DEFAULT_DELAY;

/// Default port if not specified via environment variable.
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port the HTTP server listens on (`SHELTERWATCH_PORT`).
    pub port: u16,

    /// Simulated ingestion latency (`SHELTERWATCH_WORKFLOW_DELAY_MS`).
    pub workflow_delay: Duration,

    /// Whether to load the seed shelters at startup (`SHELTERWATCH_SEED_DATA`).
    pub seed_data: bool,

    /// Fixed seed for the record generator (`SHELTERWATCH_RNG_SEED`).
    /// Unset means seeded from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            workflow_delay: DEFAULT_DELAY,
            seed_data: true,
            rng_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("SHELTERWATCH_PORT") {
            Some(value) => parse_number("SHELTERWATCH_PORT", value)?,
            None => defaults.port,
        };

        let workflow_delay = match lookup("SHELTERWATCH_WORKFLOW_DELAY_MS") {
            Some(value) => {
                Duration::from_millis(parse_number("SHELTERWATCH_WORKFLOW_DELAY_MS", value)?)
            }
            None => defaults.workflow_delay,
        };

        let seed_data = match lookup("SHELTERWATCH_SEED_DATA") {
            Some(value) => parse_bool("SHELTERWATCH_SEED_DATA", value)?,
            None => defaults.seed_data,
        };

        let rng_seed = lookup("SHELTERWATCH_RNG_SEED")
            .map(|value| parse_number("SHELTERWATCH_RNG_SEED", value))
            .transpose()?;

        Ok(Self {
            port,
            workflow_delay,
            seed_data,
            rng_seed,
        })
    }
}

fn parse_number<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.workflow_delay, Duration::from_millis(1200));
        assert!(config.seed_data);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHELTERWATCH_PORT", "8080"),
            ("SHELTERWATCH_WORKFLOW_DELAY_MS", "250"),
            ("SHELTERWATCH_SEED_DATA", "off"),
            ("SHELTERWATCH_RNG_SEED", "42"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.workflow_delay, Duration::from_millis(250));
        assert!(!config.seed_data);
        assert_eq!(config.rng_seed, Some(42));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("SHELTERWATCH_PORT", "99999")]).unwrap_err();

        let ConfigError::Invalid { var, value, .. } = &err;
        assert_eq!(*var, "SHELTERWATCH_PORT");
        assert_eq!(value, "99999");
        assert!(err.to_string().contains("SHELTERWATCH_PORT"));
    }

    #[test]
    fn test_invalid_bool() {
        let err = load(&[("SHELTERWATCH_SEED_DATA", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("expected true or false"));
    }
}
