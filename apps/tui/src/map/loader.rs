//! Basemap style loading, memoized for the whole process.
//!
//! However many times a page mounts a map, the credential check and style
//! parse run at most once; later mounts receive the cached outcome.

use crate::map::widget::MapEvent;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const EMBEDDED_STYLE: &str = include_str!("../../assets/basemap_style.json");
const PUBLIC_TOKEN_PREFIX: &str = "pk.";
const MIN_TOKEN_LEN: usize = 12;

static BASEMAP: OnceCell<Result<Arc<BasemapStyle>, MapError>> = OnceCell::const_new();
static LOAD_ATTEMPTS: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("no map access token configured")]
    MissingToken,
    #[error("map access token rejected: {0}")]
    InvalidToken(String),
    #[error("failed to read basemap style {path}: {message}")]
    Io { path: String, message: String },
    #[error("failed to parse basemap style: {0}")]
    Style(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleResolution {
    Low,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasemapStyle {
    pub name: String,
    pub resolution: StyleResolution,
    pub land: [u8; 3],
    pub graticule: [u8; 3],
    pub marker: [u8; 3],
    pub selected: [u8; 3],
    pub dimmed: [u8; 3],
    /// `[lng, lat]`
    pub default_center: [f64; 2],
    pub default_zoom: f64,
    pub fly_to_zoom: f64,
    pub fly_to_duration_ms: u64,
}

impl BasemapStyle {
    pub fn embedded() -> Result<Self, MapError> {
        parse_style(EMBEDDED_STYLE)
    }
}

pub fn parse_style(json: &str) -> Result<BasemapStyle, MapError> {
    let style: BasemapStyle =
        serde_json::from_str(json).map_err(|error| MapError::Style(error.to_string()))?;
    if style.default_zoom <= 0.0 || style.fly_to_zoom <= 0.0 {
        return Err(MapError::Style("zoom levels must be positive".to_string()));
    }
    Ok(style)
}

/// Public tokens carry a `pk.` prefix followed by an opaque body.
pub fn validate_token(token: &str) -> Result<(), MapError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(MapError::MissingToken);
    }
    if !token.starts_with(PUBLIC_TOKEN_PREFIX) {
        return Err(MapError::InvalidToken(format!(
            "expected a public token starting with {PUBLIC_TOKEN_PREFIX:?}"
        )));
    }
    if token.len() < MIN_TOKEN_LEN {
        return Err(MapError::InvalidToken("token is too short".to_string()));
    }
    Ok(())
}

/// Number of times the loader body actually ran in this process.
pub fn load_attempts() -> usize {
    LOAD_ATTEMPTS.load(Ordering::SeqCst)
}

/// Loads the basemap style once per process. A custom style file, when
/// given, replaces the embedded one.
pub async fn load_basemap(
    token: &str,
    style_path: Option<&Path>,
) -> Result<Arc<BasemapStyle>, MapError> {
    BASEMAP
        .get_or_init(|| async {
            LOAD_ATTEMPTS.fetch_add(1, Ordering::SeqCst);
            info!("loading basemap style");
            validate_token(token)?;

            let style = match style_path {
                Some(path) => {
                    let json = tokio::fs::read_to_string(path)
                        .await
                        .map_err(|error| MapError::Io {
                            path: path.display().to_string(),
                            message: error.to_string(),
                        })?;
                    parse_style(&json)?
                }
                None => BasemapStyle::embedded()?,
            };

            debug!(style = %style.name, "basemap style parsed");
            Ok(Arc::new(style))
        })
        .await
        .clone()
}

/// Runs [`load_basemap`] in the background and reports the outcome as a
/// widget event tagged with `generation`, so a stale load for an unmounted
/// map can be told apart.
pub fn spawn_load(
    token: String,
    style_path: Option<PathBuf>,
    generation: u64,
    events: UnboundedSender<(u64, MapEvent)>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match load_basemap(&token, style_path.as_deref()).await {
            Ok(style) => MapEvent::Loaded(style),
            Err(error) => {
                warn!(%error, "basemap load failed");
                MapEvent::LoadFailed(error.to_string())
            }
        };
        if events.send((generation, event)).is_err() {
            debug!("map event receiver dropped before load finished");
        }
    })
}
