//! Terminal map widget drawn on a ratatui canvas.

use crate::domain::LngLat;
use crate::map::loader::{BasemapStyle, StyleResolution};
use crate::map::widget::{CameraTarget, MapWidget, MarkerHandle, MarkerSpec, MarkerStyle};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Map, MapResolution};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use std::sync::Arc;
use std::time::{Duration, Instant};

const FALLBACK_CENTER: LngLat = LngLat::new(11.0, 32.0);
const FALLBACK_ZOOM: f64 = 7.0;
const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 120.0;
/// Marker radius as a share of the visible longitude span.
const MARKER_RADIUS_SHARE: f64 = 1.0 / 140.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: LngLat,
    pub zoom: f64,
}

impl Camera {
    /// Longitude and latitude bounds visible at this zoom.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let half_lng = 180.0 / self.zoom;
        let half_lat = 90.0 / self.zoom;
        (
            [self.center.lng - half_lng, self.center.lng + half_lng],
            [self.center.lat - half_lat, self.center.lat + half_lat],
        )
    }

    pub fn contains(&self, point: LngLat) -> bool {
        let ([west, east], [south, north]) = self.bounds();
        (west..=east).contains(&point.lng) && (south..=north).contains(&point.lat)
    }
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    from: Camera,
    to: Camera,
    started: Instant,
    duration: Duration,
}

/// Ease-in-out position of a flight `progress` (0..=1) of the way through.
pub fn interpolate_camera(from: Camera, to: Camera, progress: f64) -> Camera {
    let t = progress.clamp(0.0, 1.0);
    let eased = t * t * 2.0_f64.mul_add(-t, 3.0);
    let lerp = |a: f64, b: f64| (b - a).mul_add(eased, a);
    Camera {
        center: LngLat::new(
            lerp(from.center.lng, to.center.lng),
            lerp(from.center.lat, to.center.lat),
        ),
        zoom: lerp(from.zoom, to.zoom),
    }
}

#[derive(Debug, Clone)]
struct CanvasMarker {
    spec: MarkerSpec,
    style: MarkerStyle,
    popup: Option<String>,
}

#[derive(Debug)]
pub struct CanvasMap {
    style: Option<Arc<BasemapStyle>>,
    markers: Vec<CanvasMarker>,
    camera: Camera,
    flight: Option<Flight>,
    released: bool,
}

impl Default for CanvasMap {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasMap {
    pub const fn new() -> Self {
        Self {
            style: None,
            markers: Vec::new(),
            camera: Camera {
                center: FALLBACK_CENTER,
                zoom: FALLBACK_ZOOM,
            },
            flight: None,
            released: false,
        }
    }

    pub const fn camera(&self) -> Camera {
        self.camera
    }

    pub const fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub const fn is_released(&self) -> bool {
        self.released
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker_style(&self, handle: MarkerHandle) -> Option<MarkerStyle> {
        self.markers.get(handle.0).map(|marker| marker.style)
    }

    /// Popup text of the stroked (selected) marker, if one is bound.
    pub fn active_popup(&self) -> Option<(&str, &str)> {
        self.markers
            .iter()
            .find(|marker| marker.style.stroke)
            .and_then(|marker| {
                marker
                    .popup
                    .as_deref()
                    .map(|popup| (marker.spec.label.as_str(), popup))
            })
    }

    /// Nearest visible marker to a point, within the marker's drawn radius.
    pub fn marker_at(&self, point: LngLat) -> Option<MarkerHandle> {
        let ([west, east], _) = self.camera.bounds();
        let base_radius = (east - west) * MARKER_RADIUS_SHARE;
        self.markers
            .iter()
            .enumerate()
            .filter(|(_, marker)| marker.style.opacity >= 0.5)
            .map(|(index, marker)| {
                let dx = marker.spec.position.lng - point.lng;
                let dy = marker.spec.position.lat - point.lat;
                (index, dx.hypot(dy), base_radius * f64::from(marker.style.scale) * 2.0)
            })
            .filter(|(_, distance, reach)| distance <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _, _)| MarkerHandle(index))
    }

    /// Advances any camera flight to `now`.
    pub fn tick(&mut self, now: Instant) {
        let Some(flight) = self.flight else {
            return;
        };
        let elapsed = now.saturating_duration_since(flight.started);
        if flight.duration.is_zero() || elapsed >= flight.duration {
            self.camera = flight.to;
            self.flight = None;
            return;
        }
        let progress = elapsed.as_secs_f64() / flight.duration.as_secs_f64();
        self.camera = interpolate_camera(flight.from, flight.to, progress);
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.flight = None;
        self.camera.zoom = (self.camera.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn pan_by(&mut self, dx_share: f64, dy_share: f64) {
        self.flight = None;
        let ([west, east], [south, north]) = self.camera.bounds();
        self.camera.center.lng = dx_share.mul_add(east - west, self.camera.center.lng);
        self.camera.center.lat =
            dy_share.mul_add(north - south, self.camera.center.lat).clamp(-85.0, 85.0);
    }

    pub fn reset_camera(&mut self) {
        self.flight = None;
        self.camera = self.home_camera();
    }

    fn home_camera(&self) -> Camera {
        self.style.as_ref().map_or(
            Camera {
                center: FALLBACK_CENTER,
                zoom: FALLBACK_ZOOM,
            },
            |style| Camera {
                center: LngLat::new(style.default_center[0], style.default_center[1]),
                zoom: style.default_zoom,
            },
        )
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect, title: &str) {
        let block = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let palette = Palette::from_style(self.style.as_deref());
        let resolution = match self.style.as_ref().map(|style| style.resolution) {
            Some(StyleResolution::Low) => MapResolution::Low,
            _ => MapResolution::High,
        };
        let (x_bounds, y_bounds) = self.camera.bounds();
        let base_radius = (x_bounds[1] - x_bounds[0]) * MARKER_RADIUS_SHARE;

        let canvas = Canvas::default()
            .block(block)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: palette.land,
                    resolution,
                });
                ctx.layer();

                // Faded markers first so visible ones draw on top.
                let mut order = self.markers.iter().collect::<Vec<_>>();
                order.sort_by(|a, b| a.style.opacity.total_cmp(&b.style.opacity));

                for marker in order {
                    let visible = marker.style.opacity >= 0.5;
                    let color = if !visible {
                        palette.dimmed
                    } else if marker.style.stroke {
                        palette.selected
                    } else {
                        palette.marker
                    };
                    let radius = base_radius * f64::from(marker.style.scale);
                    let position = marker.spec.position;

                    for step in 1..=3 {
                        ctx.draw(&Circle {
                            x: position.lng,
                            y: position.lat,
                            radius: radius * f64::from(step) / 3.0,
                            color,
                        });
                    }
                    if marker.style.shadow {
                        ctx.draw(&Circle {
                            x: position.lng,
                            y: position.lat,
                            radius: radius * 1.6,
                            color: palette.graticule,
                        });
                    }
                    if marker.style.stroke {
                        ctx.draw(&Circle {
                            x: position.lng,
                            y: position.lat,
                            radius: radius * 2.0,
                            color: palette.selected,
                        });
                        ctx.print(
                            position.lng + radius * 2.5,
                            position.lat,
                            TextLine::from(Span::styled(
                                marker.spec.label.clone(),
                                Style::default().fg(palette.selected),
                            )),
                        );
                    }
                }
            });

        f.render_widget(canvas, area);
    }
}

struct Palette {
    land: Color,
    graticule: Color,
    marker: Color,
    selected: Color,
    dimmed: Color,
}

impl Palette {
    fn from_style(style: Option<&BasemapStyle>) -> Self {
        let rgb = |[r, g, b]: [u8; 3]| Color::Rgb(r, g, b);
        style.map_or(
            Self {
                land: Color::DarkGray,
                graticule: Color::DarkGray,
                marker: Color::Yellow,
                selected: Color::LightYellow,
                dimmed: Color::DarkGray,
            },
            |style| Self {
                land: rgb(style.land),
                graticule: rgb(style.graticule),
                marker: rgb(style.marker),
                selected: rgb(style.selected),
                dimmed: rgb(style.dimmed),
            },
        )
    }
}

impl MapWidget for CanvasMap {
    fn load_style(&mut self, style: Arc<BasemapStyle>) {
        self.style = Some(style);
        self.camera = self.home_camera();
    }

    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerHandle {
        self.markers.push(CanvasMarker {
            spec,
            style: MarkerStyle::default(),
            popup: None,
        });
        MarkerHandle(self.markers.len() - 1)
    }

    fn set_marker_style(&mut self, marker: MarkerHandle, style: MarkerStyle) {
        if let Some(marker) = self.markers.get_mut(marker.0) {
            marker.style = style;
        }
    }

    fn bind_popup(&mut self, marker: MarkerHandle, text: &str) {
        if let Some(marker) = self.markers.get_mut(marker.0) {
            marker.popup = Some(text.to_string());
        }
    }

    fn fly_to(&mut self, target: CameraTarget) {
        self.flight = Some(Flight {
            from: self.camera,
            to: Camera {
                center: target.center,
                zoom: target.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            },
            started: Instant::now(),
            duration: target.duration,
        });
    }

    fn release(&mut self) {
        self.markers.clear();
        self.flight = None;
        self.style = None;
        self.released = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SizeTier;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    fn spec(lng: f64, lat: f64) -> MarkerSpec {
        MarkerSpec {
            position: LngLat::new(lng, lat),
            tier: SizeTier::Medium,
            label: "pin".to_string(),
        }
    }

    #[test]
    fn interpolation_hits_endpoints_and_eases() {
        let from = Camera {
            center: LngLat::new(0.0, 0.0),
            zoom: 2.0,
        };
        let to = Camera {
            center: LngLat::new(10.0, 20.0),
            zoom: 10.0,
        };
        assert_eq!(interpolate_camera(from, to, 0.0), from);
        assert_eq!(interpolate_camera(from, to, 1.0), to);
        let middle = interpolate_camera(from, to, 0.5);
        assert_close(middle.center.lng, 5.0);
        let early = interpolate_camera(from, to, 0.1);
        assert!(early.center.lng < 1.0);
    }

    #[test]
    fn flight_settles_on_target_after_duration() {
        let mut map = CanvasMap::new();
        let target = LngLat::new(-4.9731, 34.0648);
        map.fly_to(CameraTarget {
            center: target,
            zoom: 40.0,
            duration: Duration::from_millis(100),
        });
        assert!(map.is_flying());
        map.tick(Instant::now() + Duration::from_millis(150));
        assert!(!map.is_flying());
        assert_eq!(map.camera().center, target);
        assert!(map.camera().contains(target));
    }

    #[test]
    fn marker_hit_testing_ignores_faded_markers() {
        let mut map = CanvasMap::new();
        let near = map.add_marker(spec(-8.0, 31.6));
        let faded = map.add_marker(spec(-7.99, 31.61));
        map.set_marker_style(
            faded,
            MarkerStyle {
                opacity: 0.15,
                ..MarkerStyle::default()
            },
        );
        assert_eq!(map.marker_at(LngLat::new(-7.995, 31.605)), Some(near));
        assert_eq!(map.marker_at(LngLat::new(40.0, 0.0)), None);
    }

    #[test]
    fn popup_follows_the_stroked_marker() {
        let mut map = CanvasMap::new();
        let first = map.add_marker(spec(0.0, 0.0));
        map.bind_popup(first, "Founded 859");
        assert_eq!(map.active_popup(), None);
        map.set_marker_style(
            first,
            MarkerStyle {
                stroke: true,
                ..MarkerStyle::default()
            },
        );
        assert_eq!(map.active_popup(), Some(("pin", "Founded 859")));
    }

    #[test]
    fn release_drops_markers() {
        let mut map = CanvasMap::new();
        map.add_marker(spec(0.0, 0.0));
        map.release();
        assert!(map.is_released());
        assert_eq!(map.marker_count(), 0);
    }
}
