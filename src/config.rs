use crate::constants::{
    DEFAULT_HOST, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
    ENV_API_KEY, ENV_API_URL, ENV_HOST, ENV_MAX_UPLOAD, ENV_MODEL, ENV_PORT, ENV_TIMEOUT,
    GEMINI_API_URL,
};
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid value for {var}: '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` puts the service in placeholder mode.
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            api_key: non_blank(ENV_API_KEY),
            model: non_blank(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_url: non_blank(ENV_API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| GEMINI_API_URL.to_string()),
            host: non_blank(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(ENV_PORT, non_blank(ENV_PORT), DEFAULT_PORT)?,
            request_timeout: Duration::from_secs(parse_or(
                ENV_TIMEOUT,
                non_blank(ENV_TIMEOUT),
                DEFAULT_TIMEOUT_SECS,
            )?),
            max_upload_bytes: parse_or(
                ENV_MAX_UPLOAD,
                non_blank(ENV_MAX_UPLOAD),
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { var, value }),
        None => Ok(default),
    }
}
