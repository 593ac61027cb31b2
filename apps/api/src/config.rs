use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::predict::COVER_LETTER_MODEL;

/// Application configuration loaded from environment variables.
/// Every setting has a default so the service starts with an empty environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding one sub-directory per model artifact.
    pub models_dir: PathBuf,
    /// Model identifier used when a request omits `type`.
    pub default_model_type: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source, applying defaults for absent keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            models_dir: PathBuf::from(var("MODELS_DIR", "models")),
            default_model_type: var("DEFAULT_MODEL_TYPE", COVER_LETTER_MODEL),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.models_dir, PathBuf::from("models"));
        assert_eq!(config.default_model_type, "cover-letter");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("RUST_LOG", "debug"),
            ("MODELS_DIR", "/srv/models"),
            ("DEFAULT_MODEL_TYPE", "interview-questions"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.models_dir, PathBuf::from("/srv/models"));
        assert_eq!(config.default_model_type, "interview-questions");
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        for port in ["not-a-port", "70000", "-1", ""] {
            let err = config_from(&[("PORT", port)]).unwrap_err();
            assert!(
                err.to_string().contains("PORT must be a valid port number"),
                "{port}: {err}"
            );
        }
    }
}
