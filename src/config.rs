// src/config.rs
//
// Runtime configuration, read once from the environment at startup.

use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use log::{info, warn};

use crate::db::default_database_path;
use crate::error::{AppError, AppResult};
use crate::integrations::anilist::ANILIST_GRAPHQL_URL;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub catalog_url: String,
    pub db_path: PathBuf,
    pub data_file: PathBuf,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, so tests don't touch the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let db_path = match lookup("ANILOG_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_database_path().unwrap_or_else(|e| {
                warn!("{e}, storing the database in the working directory");
                PathBuf::from("anilog.db")
            }),
        };

        Ok(Self {
            port: try_load(&lookup, "ANILOG_PORT", "3000")?,
            catalog_url: try_load(&lookup, "ANILOG_CATALOG_URL", ANILIST_GRAPHQL_URL)?,
            db_path,
            data_file: try_load(&lookup, "ANILOG_DATA_FILE", "data.json")?,
            http_timeout: Duration::from_secs(try_load(&lookup, "ANILOG_HTTP_TIMEOUT_SECS", "30")?),
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> AppResult<T>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {key} value: {e}")))
}
