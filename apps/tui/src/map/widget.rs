use crate::domain::{LngLat, SizeTier};
use crate::map::loader::BasemapStyle;
use std::sync::Arc;
use std::time::Duration;

/// Opaque reference to a marker owned by a [`MapWidget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LngLat,
    pub tier: SizeTier,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub opacity: f32,
    pub scale: f32,
    pub stroke: bool,
    pub shadow: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            stroke: false,
            shadow: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub center: LngLat,
    pub zoom: f64,
    pub duration: Duration,
}

/// Events a widget emits back to whoever owns it.
#[derive(Debug, Clone)]
pub enum MapEvent {
    Loaded(Arc<BasemapStyle>),
    LoadFailed(String),
    MarkerClicked(MarkerHandle),
    MarkerHovered(MarkerHandle, bool),
}

/// The imperative surface of a slippy map: markers are created once and
/// then only restyled, the camera is driven by animated commands.
pub trait MapWidget {
    fn load_style(&mut self, style: Arc<BasemapStyle>);
    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerHandle;
    fn set_marker_style(&mut self, marker: MarkerHandle, style: MarkerStyle);
    fn bind_popup(&mut self, marker: MarkerHandle, text: &str);
    fn fly_to(&mut self, target: CameraTarget);
    fn release(&mut self);
}
