use crate::content::Essay;
use crate::reveal::RevealLatch;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const MAP_ACCESS_TOKEN: &str = "MAP_ACCESS_TOKEN";
pub const MAP_STYLE_PATH: &str = "MAP_STYLE_PATH";
pub const REVEAL_THRESHOLD: &str = "REVEAL_THRESHOLD";
pub const START_ESSAY: &str = "START_ESSAY";
pub const LOG_DIR: &str = "LOG_DIR";
pub const DEBUG: &str = "DEBUG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("REVEAL_THRESHOLD must be a number in (0, 1], got {0:?}")]
    InvalidThreshold(String),
    #[error("unknown essay {0:?}, expected heritage, exports or rugs")]
    UnknownEssay(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Absent or blank means the map is unavailable, which is not an error.
    pub map_token: Option<String>,
    pub map_style_path: Option<PathBuf>,
    pub reveal_threshold: f32,
    pub start_essay: Essay,
    pub log_dir: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map_token: None,
            map_style_path: None,
            reveal_threshold: RevealLatch::DEFAULT_THRESHOLD,
            start_essay: Essay::Heritage,
            log_dir: PathBuf::from("./logs"),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let reveal_threshold = match non_blank(REVEAL_THRESHOLD) {
            Some(raw) => parse_threshold(&raw)?,
            None => defaults.reveal_threshold,
        };

        let start_essay = match non_blank(START_ESSAY) {
            Some(raw) => Essay::parse(&raw).ok_or(ConfigError::UnknownEssay(raw))?,
            None => defaults.start_essay,
        };

        Ok(Self {
            map_token: non_blank(MAP_ACCESS_TOKEN),
            map_style_path: non_blank(MAP_STYLE_PATH).map(PathBuf::from),
            reveal_threshold,
            start_essay,
            log_dir: non_blank(LOG_DIR).map_or(defaults.log_dir, PathBuf::from),
            debug: non_blank(DEBUG).is_some_and(|value| value == "1" || value == "true"),
        })
    }
}

fn parse_threshold(raw: &str) -> Result<f32, ConfigError> {
    match raw.parse::<f32>() {
        Ok(value) if value > 0.0 && value <= 1.0 => Ok(value),
        _ => Err(ConfigError::InvalidThreshold(raw.to_string())),
    }
}
