// Map module for lions_essays
// Bridges filter state to an imperative map widget

pub mod adapter;
pub mod canvas;
pub mod loader;
pub mod widget;

pub use adapter::{CameraSettings, MapPhase, MapSyncAdapter};
pub use canvas::CanvasMap;
pub use loader::{load_basemap, spawn_load, BasemapStyle, MapError};
pub use widget::{CameraTarget, MapEvent, MapWidget, MarkerHandle, MarkerSpec, MarkerStyle};
