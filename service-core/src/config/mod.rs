use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;
use std::env;

/// Settings shared by every service in the workspace.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load from `configuration.*` (optional), `APP__*` variables and the
    /// conventional `PORT` variable, in increasing priority.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .set_override_option("port", non_empty_var("PORT"))?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// An environment variable, treating an empty value as unset.
pub fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Whether `ENVIRONMENT` selects the production profile.
pub fn is_production() -> bool {
    env::var("ENVIRONMENT").is_ok_and(|v| v == "prod")
}

/// Read an environment variable, falling back to `default` outside production.
///
/// In production every variable must be set explicitly. Empty values count
/// as unset.
pub fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    if let Some(val) = non_empty_var(key) {
        return Ok(val);
    }

    match default {
        Some(_) if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        Some(def) => Ok(def.to_string()),
        None => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required but not set",
            key
        ))),
    }
}
