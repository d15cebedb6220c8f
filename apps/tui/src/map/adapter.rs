//! Keeps an imperative map widget in step with a [`FilterState`].
//!
//! Markers are created exactly once, after the widget reports its style as
//! loaded. Every later filter change only restyles the existing handles.

use crate::domain::{MapRecord, SizeTier};
use crate::filter::FilterState;
use crate::map::loader::BasemapStyle;
use crate::map::widget::{CameraTarget, MapEvent, MapWidget, MarkerHandle, MarkerSpec, MarkerStyle};
use std::time::Duration;
use tracing::{debug, info, warn};

const HIDDEN_OPACITY: f32 = 0.15;
const SELECTED_SCALE: f32 = 1.5;
const HOVER_SCALE: f32 = 1.2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapPhase {
    /// No credential was supplied; the map never starts.
    Uninitialized,
    Loading,
    Ready,
    /// The widget could not load. Rendered exactly like `Uninitialized`.
    Failed(String),
    Destroyed,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraSettings {
    pub zoom: f64,
    pub duration: Duration,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            zoom: 40.0,
            duration: Duration::from_millis(1200),
        }
    }
}

impl CameraSettings {
    /// Fly-to behaviour declared by a loaded basemap style.
    pub fn from_style(style: &BasemapStyle) -> Self {
        Self {
            zoom: style.fly_to_zoom,
            duration: Duration::from_millis(style.fly_to_duration_ms),
        }
    }
}

#[derive(Debug)]
struct MarkerBinding {
    handle: MarkerHandle,
    record_index: usize,
    tier: SizeTier,
    pointer_over: bool,
}

#[derive(Debug)]
pub struct MapSyncAdapter<W: MapWidget> {
    phase: MapPhase,
    widget: Option<W>,
    markers: Vec<MarkerBinding>,
    markers_created: bool,
    synced_revision: Option<u64>,
    flown_to: Option<usize>,
    camera: CameraSettings,
}

impl<W: MapWidget> MapSyncAdapter<W> {
    /// Starts loading only when a non-blank credential is present. The
    /// widget is built lazily so a missing token never touches it.
    pub fn mount(token: Option<&str>, build: impl FnOnce(&str) -> W) -> Self {
        let token = token.map(str::trim).filter(|token| !token.is_empty());
        let (phase, widget) = match token {
            Some(token) => {
                info!("map credential present, loading widget");
                (MapPhase::Loading, Some(build(token)))
            }
            None => {
                info!("no map credential configured, map stays unavailable");
                (MapPhase::Uninitialized, None)
            }
        };

        Self {
            phase,
            widget,
            markers: Vec::new(),
            markers_created: false,
            synced_revision: None,
            flown_to: None,
            camera: CameraSettings::default(),
        }
    }

    pub const fn camera(&self) -> CameraSettings {
        self.camera
    }

    pub const fn phase(&self) -> &MapPhase {
        &self.phase
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self.phase, MapPhase::Ready)
    }

    /// Why the page should show its "map unavailable" fallback, if it should.
    pub fn unavailable_reason(&self) -> Option<String> {
        match &self.phase {
            MapPhase::Uninitialized => Some("no map access token configured".to_string()),
            MapPhase::Failed(reason) => Some(reason.clone()),
            MapPhase::Destroyed => Some("map released".to_string()),
            MapPhase::Loading | MapPhase::Ready => None,
        }
    }

    pub const fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Applies a widget event. Returns the record index the user clicked,
    /// which the caller feeds into [`FilterState::select`].
    pub fn handle_event<R: MapRecord>(
        &mut self,
        event: MapEvent,
        records: &[R],
        filter: &FilterState,
    ) -> Option<usize> {
        match (event, self.phase.clone()) {
            (MapEvent::Loaded(style), MapPhase::Loading) => {
                self.camera = CameraSettings::from_style(&style);
                if let Some(widget) = self.widget.as_mut() {
                    widget.load_style(style);
                }
                self.phase = MapPhase::Ready;
                info!(records = records.len(), "map ready, creating markers");
                self.create_or_update(records, filter);
                None
            }
            (MapEvent::LoadFailed(reason), MapPhase::Loading) => {
                warn!(%reason, "map failed to load");
                if let Some(mut widget) = self.widget.take() {
                    widget.release();
                }
                self.phase = MapPhase::Failed(reason);
                None
            }
            (MapEvent::MarkerClicked(handle), MapPhase::Ready) => self
                .binding(handle)
                .map(|binding| binding.record_index),
            (MapEvent::MarkerHovered(handle, over), MapPhase::Ready) => {
                let Some(position) = self.markers.iter().position(|b| b.handle == handle) else {
                    return None;
                };
                self.markers[position].pointer_over = over;
                let index = self.markers[position].record_index;
                if let Some(record) = records.get(index) {
                    let style = self.style_for(&self.markers[position], record, filter);
                    if let Some(widget) = self.widget.as_mut() {
                        widget.set_marker_style(handle, style);
                    }
                }
                None
            }
            (event, phase) => {
                debug!(?event, ?phase, "ignoring map event");
                None
            }
        }
    }

    /// Creates markers on the first call after the widget is ready, then on
    /// every call where the filter revision moved restyles each marker once
    /// and flies to a newly selected record.
    pub fn create_or_update<R: MapRecord>(&mut self, records: &[R], filter: &FilterState) {
        if !self.is_ready() {
            return;
        }

        if !self.markers_created {
            self.create_markers(records);
        }

        if self.synced_revision == Some(filter.revision()) {
            return;
        }

        let styles = self
            .markers
            .iter()
            .filter_map(|binding| {
                records
                    .get(binding.record_index)
                    .map(|record| (binding.handle, self.style_for(binding, record, filter)))
            })
            .collect::<Vec<_>>();

        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        for (handle, style) in styles {
            widget.set_marker_style(handle, style);
        }

        let selected = filter.selected_index();
        if selected != self.flown_to {
            if let Some(record) = selected.and_then(|index| records.get(index)) {
                debug!(name = record.name(), "flying to selected record");
                widget.fly_to(CameraTarget {
                    center: record.coordinates(),
                    zoom: self.camera.zoom,
                    duration: self.camera.duration,
                });
            }
            self.flown_to = selected;
        }

        self.synced_revision = Some(filter.revision());
    }

    /// Releases the widget and every marker at once.
    pub fn destroy(&mut self) {
        if matches!(self.phase, MapPhase::Destroyed) {
            return;
        }
        if let Some(mut widget) = self.widget.take() {
            widget.release();
        }
        self.markers.clear();
        self.phase = MapPhase::Destroyed;
        debug!("map adapter destroyed");
    }

    fn create_markers<R: MapRecord>(&mut self, records: &[R]) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };

        for (record_index, record) in records.iter().enumerate() {
            let tier = record.size_tier();
            let handle = widget.add_marker(MarkerSpec {
                position: record.coordinates(),
                tier,
                label: record.name().to_string(),
            });
            if let Some(text) = record.popup_text() {
                widget.bind_popup(handle, text);
            }
            self.markers.push(MarkerBinding {
                handle,
                record_index,
                tier,
                pointer_over: false,
            });
        }

        self.markers_created = true;
    }

    fn binding(&self, handle: MarkerHandle) -> Option<&MarkerBinding> {
        self.markers.iter().find(|binding| binding.handle == handle)
    }

    fn style_for<R: MapRecord>(
        &self,
        binding: &MarkerBinding,
        record: &R,
        filter: &FilterState,
    ) -> MarkerStyle {
        let visible = filter.is_visible(record);
        let selected = visible && filter.is_selected(binding.record_index);
        let emphasized = binding.pointer_over || filter.is_highlighted(binding.record_index, record);

        let emphasis = if selected {
            SELECTED_SCALE
        } else if emphasized {
            HOVER_SCALE
        } else {
            1.0
        };

        MarkerStyle {
            opacity: if visible { 1.0 } else { HIDDEN_OPACITY },
            scale: binding.tier.base_scale() * emphasis,
            stroke: selected,
            shadow: emphasized && visible,
        }
    }
}

impl<W: MapWidget> Drop for MapSyncAdapter<W> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, LngLat, Region, Tagged};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct Calls {
        created: usize,
        styled: usize,
        popups: usize,
        flights: Vec<CameraTarget>,
        released: usize,
        styles: HashMap<MarkerHandle, MarkerStyle>,
    }

    #[derive(Debug)]
    struct RecordingWidget {
        calls: Rc<RefCell<Calls>>,
    }

    impl MapWidget for RecordingWidget {
        fn load_style(&mut self, _style: Arc<BasemapStyle>) {}

        fn add_marker(&mut self, _spec: MarkerSpec) -> MarkerHandle {
            let mut calls = self.calls.borrow_mut();
            calls.created += 1;
            MarkerHandle(calls.created - 1)
        }

        fn set_marker_style(&mut self, marker: MarkerHandle, style: MarkerStyle) {
            let mut calls = self.calls.borrow_mut();
            calls.styled += 1;
            calls.styles.insert(marker, style);
        }

        fn bind_popup(&mut self, _marker: MarkerHandle, _text: &str) {
            self.calls.borrow_mut().popups += 1;
        }

        fn fly_to(&mut self, target: CameraTarget) {
            self.calls.borrow_mut().flights.push(target);
        }

        fn release(&mut self) {
            self.calls.borrow_mut().released += 1;
        }
    }

    struct Pin {
        name: &'static str,
        region: Region,
        category: Category,
        at: LngLat,
    }

    impl Tagged for Pin {
        fn has_category(&self, category: Category) -> bool {
            self.category == category
        }

        fn has_region(&self, region: Region) -> bool {
            self.region == region
        }

        fn search_text(&self) -> &str {
            self.name
        }
    }

    impl MapRecord for Pin {
        fn name(&self) -> &str {
            self.name
        }

        fn coordinates(&self) -> LngLat {
            self.at
        }

        fn size_tier(&self) -> SizeTier {
            SizeTier::Medium
        }

        fn popup_text(&self) -> Option<&str> {
            Some(self.name)
        }
    }

    fn pins() -> Vec<Pin> {
        vec![
            Pin {
                name: "Koutoubia",
                region: Region::Morocco,
                category: Category::Mosque,
                at: LngLat::new(-7.9934, 31.6237),
            },
            Pin {
                name: "Kasbah of the Udayas",
                region: Region::Morocco,
                category: Category::Kasbah,
                at: LngLat::new(-6.8367, 34.0311),
            },
            Pin {
                name: "Zitouna",
                region: Region::Tunisia,
                category: Category::Mosque,
                at: LngLat::new(10.1711, 36.7975),
            },
        ]
    }

    fn style() -> Arc<BasemapStyle> {
        Arc::new(BasemapStyle::embedded().unwrap())
    }

    fn mounted(calls: &Rc<RefCell<Calls>>) -> MapSyncAdapter<RecordingWidget> {
        let calls = calls.clone();
        MapSyncAdapter::mount(Some("pk.test-token-0123456789"), move |_| RecordingWidget {
            calls,
        })
    }

    #[test]
    fn missing_token_stays_uninitialized_and_reports_fallback() {
        let mut built = false;
        let adapter: MapSyncAdapter<RecordingWidget> = MapSyncAdapter::mount(None, |_| {
            built = true;
            RecordingWidget {
                calls: Rc::default(),
            }
        });
        assert!(!built);
        assert_eq!(adapter.phase(), &MapPhase::Uninitialized);
        assert!(adapter.unavailable_reason().is_some());

        let blank: MapSyncAdapter<RecordingWidget> =
            MapSyncAdapter::mount(Some("   "), |_| RecordingWidget {
                calls: Rc::default(),
            });
        assert_eq!(blank.phase(), &MapPhase::Uninitialized);
    }

    #[test]
    fn markers_are_created_only_after_load() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let records = pins();
        let filter = FilterState::new();
        let mut adapter = mounted(&calls);

        adapter.create_or_update(&records, &filter);
        assert_eq!(calls.borrow().created, 0);
        assert_eq!(adapter.phase(), &MapPhase::Loading);

        adapter.handle_event(MapEvent::Loaded(style()), &records, &filter);
        assert_eq!(adapter.phase(), &MapPhase::Ready);
        assert_eq!(calls.borrow().created, 3);
        assert_eq!(calls.borrow().popups, 3);
    }

    #[test]
    fn filter_changes_restyle_without_creating_markers() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let records = pins();
        let mut filter = FilterState::new();
        let mut adapter = mounted(&calls);
        adapter.handle_event(MapEvent::Loaded(style()), &records, &filter);
        let styled_after_load = calls.borrow().styled;

        for _ in 0..5 {
            filter.toggle_category(Category::Mosque);
            adapter.create_or_update(&records, &filter);
            filter.toggle_region(Region::Morocco);
            adapter.create_or_update(&records, &filter);
        }

        let calls = calls.borrow();
        assert_eq!(calls.created, records.len());
        assert_eq!(calls.styled, styled_after_load + 10 * records.len());
    }

    #[test]
    fn unchanged_revision_is_a_no_op() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let records = pins();
        let filter = FilterState::new();
        let mut adapter = mounted(&calls);
        adapter.handle_event(MapEvent::Loaded(style()), &records, &filter);
        let styled = calls.borrow().styled;

        adapter.create_or_update(&records, &filter);
        adapter.create_or_update(&records, &filter);
        assert_eq!(calls.borrow().styled, styled);
    }

    #[test]
    fn hidden_markers_fade_and_selection_flies_once() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let records = pins();
        let mut filter = FilterState::new();
        let mut adapter = mounted(&calls);
        adapter.handle_event(MapEvent::Loaded(style()), &records, &filter);

        filter.toggle_region(Region::Tunisia);
        filter.select(Some(2));
        adapter.create_or_update(&records, &filter);

        {
            let calls = calls.borrow();
            assert_eq!(calls.flights.len(), 1);
            assert_eq!(calls.flights[0].center, records[2].at);
            let hidden = calls.styles[&MarkerHandle(0)];
            let chosen = calls.styles[&MarkerHandle(2)];
            assert!(hidden.opacity < 0.5);
            assert!(chosen.stroke);
            assert!(chosen.scale > hidden.scale);
        }

        filter.hover(Some(1));
        adapter.create_or_update(&records, &filter);
        assert_eq!(calls.borrow().flights.len(), 1);
    }

    #[test]
    fn flights_follow_the_loaded_style() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let records = pins();
        let mut filter = FilterState::new();
        let mut adapter = mounted(&calls);
        let custom = BasemapStyle {
            fly_to_zoom: 12.0,
            fly_to_duration_ms: 300,
            ..BasemapStyle::embedded().unwrap()
        };
        adapter.handle_event(MapEvent::Loaded(Arc::new(custom)), &records, &filter);
        assert!((adapter.camera().zoom - 12.0).abs() < f64::EPSILON);

        filter.select(Some(0));
        adapter.create_or_update(&records, &filter);
        let calls = calls.borrow();
        assert_eq!(calls.flights.len(), 1);
        assert!((calls.flights[0].zoom - 12.0).abs() < f64::EPSILON);
        assert_eq!(calls.flights[0].duration, Duration::from_millis(300));
        assert_eq!(calls.flights[0].center, records[0].at);
    }

    #[test]
    fn marker_click_reports_record_index() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let records = pins();
        let mut filter = FilterState::new();
        let mut adapter = mounted(&calls);
        adapter.handle_event(MapEvent::Loaded(style()), &records, &filter);

        let clicked = adapter.handle_event(MapEvent::MarkerClicked(MarkerHandle(1)), &records, &filter);
        assert_eq!(clicked, Some(1));
        filter.select(clicked);
        adapter.create_or_update(&records, &filter);
        assert_eq!(calls.borrow().flights.len(), 1);
    }

    #[test]
    fn pointer_hover_only_touches_that_marker() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let records = pins();
        let filter = FilterState::new();
        let mut adapter = mounted(&calls);
        adapter.handle_event(MapEvent::Loaded(style()), &records, &filter);
        let styled = calls.borrow().styled;

        adapter.handle_event(MapEvent::MarkerHovered(MarkerHandle(0), true), &records, &filter);
        let calls = calls.borrow();
        assert_eq!(calls.styled, styled + 1);
        assert!(calls.styles[&MarkerHandle(0)].shadow);
        assert_eq!(calls.created, 3);
    }

    #[test]
    fn load_failure_degrades_like_missing_token() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let records = pins();
        let filter = FilterState::new();
        let mut adapter = mounted(&calls);

        adapter.handle_event(MapEvent::LoadFailed("invalid token".into()), &records, &filter);
        assert_eq!(adapter.phase(), &MapPhase::Failed("invalid token".into()));
        assert_eq!(adapter.unavailable_reason().as_deref(), Some("invalid token"));
        assert_eq!(calls.borrow().released, 1);

        adapter.handle_event(MapEvent::Loaded(style()), &records, &filter);
        assert_eq!(calls.borrow().created, 0);
    }

    #[test]
    fn destroy_releases_everything_once() {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let records = pins();
        let filter = FilterState::new();
        let mut adapter = mounted(&calls);
        adapter.handle_event(MapEvent::Loaded(style()), &records, &filter);

        adapter.destroy();
        assert_eq!(adapter.phase(), &MapPhase::Destroyed);
        assert_eq!(adapter.marker_count(), 0);
        drop(adapter);
        assert_eq!(calls.borrow().released, 1);
    }
}
