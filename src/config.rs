use crate::utils::duration_format::DurationLocale;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub jwt_secret: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    /// JSON file replacing the built-in department rules.
    pub rules_file: Option<PathBuf>,
    pub duration_locale: DurationLocale,
    pub log_dir: String,
}

fn var_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{key} has an invalid value `{raw}`: {e}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080".to_string())?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            rate_protected_per_min: var_or("RATE_PROTECTED_PER_MIN", 1000)?,
            api_prefix: var_or("API_PREFIX", "/api/v1".to_string())?,
            rules_file: env::var("RULES_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            duration_locale: var_or("DURATION_LOCALE", DurationLocale::En)?,
            log_dir: var_or("LOG_DIR", "logs".to_string())?,
        })
    }
}
