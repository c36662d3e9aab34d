use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::workflow::TransitionPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("environment variable {key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub admin_key: String,
    pub transition_policy: TransitionPolicy,
}

impl EnvConfig {
    fn get_env(key: &'static str) -> Result<String, ConfigError> {
        env::var(key).map_err(|_| ConfigError::Missing(key))
    }

    fn get_env_or<T: FromStr>(key: &'static str, fallback: T) -> Result<T, ConfigError> {
        match env::var(key) {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
            Err(_) => Ok(fallback),
        }
    }

    /// Reads the process environment, after loading `.env` if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Ok(EnvConfig {
            port: Self::get_env_or("PORT", 8080)?,
            db_url: Self::get_env("DATABASE_URL")?,
            admin_key: Self::get_env("ADMIN_KEY")?,
            transition_policy: Self::get_env_or("TRANSITION_POLICY", TransitionPolicy::Permissive)?,
        })
    }
}
