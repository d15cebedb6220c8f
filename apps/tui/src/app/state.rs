use lions_essays::config::AppConfig;
use lions_essays::content::exports;
use lions_essays::content::heritage::SITES;
use lions_essays::content::rugs::RUGS;
use lions_essays::content::Essay;
use lions_essays::domain::LngLat;
use lions_essays::filter::FilterState;
use lions_essays::geometry::{layout_arcs, ArcLayoutConfig, ArcSegment, Segment};
use lions_essays::map::{spawn_load, CanvasMap, MapEvent, MapPhase, MapSyncAdapter, MarkerHandle};
use lions_essays::reveal::{intersection_ratio, RevealLatch, RowSpan};
use ratatui::layout::Rect;
use ratatui::style::Color;
use std::cell::Cell;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tachyonfx::{fx, Effect, Interpolation};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

const REVEAL_FADE_MS: u32 = 700;

/// Scroll position and reveal latches of one essay page.
#[derive(Debug)]
pub struct PageState {
    pub scroll: u16,
    pub latches: Vec<RevealLatch>,
}

impl PageState {
    fn new(essay: Essay, threshold: f32) -> Self {
        Self {
            scroll: 0,
            latches: essay
                .sections()
                .iter()
                .map(|_| RevealLatch::new(threshold))
                .collect(),
        }
    }

    pub fn is_revealed(&self, section: usize) -> bool {
        self.latches
            .get(section)
            .is_some_and(RevealLatch::is_revealed)
    }
}

pub struct RevealFx {
    pub essay: Essay,
    pub section: usize,
    pub effect: Effect,
}

pub struct App {
    pub running: bool,
    pub essay: Essay,
    pub show_help: bool,
    pub status_message: String,
    pub config: AppConfig,
    pub pages: Vec<PageState>,
    /// Page rows visible below the tab bar, refreshed from the terminal size.
    pub viewport_rows: u16,

    pub heritage_filter: FilterState,
    /// Position in the visible site list, not a record index.
    pub site_cursor: usize,
    /// `Some` while the search prompt is open.
    pub search_input: Option<String>,
    pub map: Option<MapSyncAdapter<CanvasMap>>,
    pub map_area: Cell<Option<Rect>>,
    map_generation: u64,
    map_sender: UnboundedSender<(u64, MapEvent)>,
    map_events: UnboundedReceiver<(u64, MapEvent)>,
    pointer_marker: Option<MarkerHandle>,

    pub export_segments: Vec<Segment>,
    pub export_layout: ArcLayoutConfig,
    pub export_arcs: Vec<ArcSegment>,
    pub export_error: Option<String>,
    pub export_hover: Option<usize>,
    pub chart_area: Cell<Option<Rect>>,

    pub rug_filter: FilterState,
    pub rug_cursor: usize,

    pub reveal_fx: Mutex<Vec<RevealFx>>,
    pub throbber: ThrobberState,
    pub last_tick: Duration,
    last_frame: Instant,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (map_sender, map_events) = unbounded_channel();
        let export_layout = ArcLayoutConfig::default();
        let export_segments = exports::segments();
        let (export_arcs, export_error) = match layout_arcs(&export_segments, &export_layout) {
            Ok(arcs) => (arcs, None),
            Err(error) => (Vec::new(), Some(error.to_string())),
        };

        let pages = Essay::ALL
            .iter()
            .map(|essay| PageState::new(*essay, config.reveal_threshold))
            .collect();

        let mut app = Self {
            running: true,
            essay: config.start_essay,
            show_help: false,
            status_message: String::new(),
            pages,
            viewport_rows: 0,
            heritage_filter: FilterState::new(),
            site_cursor: 0,
            search_input: None,
            map: None,
            map_area: Cell::new(None),
            map_generation: 0,
            map_sender,
            map_events,
            pointer_marker: None,
            export_segments,
            export_layout,
            export_arcs,
            export_error,
            export_hover: None,
            chart_area: Cell::new(None),
            rug_filter: FilterState::new(),
            rug_cursor: 0,
            reveal_fx: Mutex::new(Vec::new()),
            throbber: ThrobberState::default(),
            last_tick: Duration::ZERO,
            last_frame: Instant::now(),
            config,
        };

        if app.essay == Essay::Heritage {
            app.mount_map();
        }
        app
    }

    pub fn page(&self) -> &PageState {
        &self.pages[self.essay.index()]
    }

    fn page_mut(&mut self) -> &mut PageState {
        let index = self.essay.index();
        &mut self.pages[index]
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;

        self.drain_map_events();
        if let Some(map) = self.map.as_mut() {
            map.create_or_update(SITES, &self.heritage_filter);
            if let Some(widget) = map.widget_mut() {
                widget.tick(now);
            }
            if matches!(map.phase(), MapPhase::Loading) {
                self.throbber.calc_next();
            }
        }

        let visible_sites = self.visible_sites().len();
        self.site_cursor = self.site_cursor.min(visible_sites.saturating_sub(1));
        let visible_rugs = self.visible_rugs().len();
        self.rug_cursor = self.rug_cursor.min(visible_rugs.saturating_sub(1));

        self.observe_reveals();
        if let Ok(mut effects) = self.reveal_fx.lock() {
            effects.retain(|fx| !fx.effect.done());
        }
    }

    pub fn switch_essay(&mut self, essay: Essay) {
        if essay == self.essay {
            return;
        }
        info!(from = self.essay.as_str(), to = essay.as_str(), "switching essay");

        for latch in &mut self.page_mut().latches {
            latch.cancel();
        }
        match self.essay {
            Essay::Heritage => self.unmount_map(),
            Essay::Rugs => {
                self.rug_filter.reset();
                self.rug_cursor = 0;
            }
            Essay::Exports => self.export_hover = None,
        }
        if let Ok(mut effects) = self.reveal_fx.lock() {
            effects.clear();
        }

        self.essay = essay;
        *self.page_mut() = PageState::new(essay, self.config.reveal_threshold);
        if essay == Essay::Heritage {
            self.mount_map();
        }
        self.status_message.clear();
    }

    pub fn next_essay(&mut self) {
        let index = (self.essay.index() + 1) % Essay::ALL.len();
        if let Some(essay) = Essay::from_index(index) {
            self.switch_essay(essay);
        }
    }

    pub fn previous_essay(&mut self) {
        let index = (self.essay.index() + Essay::ALL.len() - 1) % Essay::ALL.len();
        if let Some(essay) = Essay::from_index(index) {
            self.switch_essay(essay);
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = self
            .essay
            .page_rows()
            .saturating_sub(u32::from(self.viewport_rows));
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        let page = self.page_mut();
        let next = i32::from(page.scroll) + delta;
        page.scroll = u16::try_from(next.max(0)).unwrap_or(u16::MAX).min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.page_mut().scroll = 0;
    }

    /// Feeds every still-observing latch of the current page with its
    /// section's visibility, starting a fade for each one that flips.
    fn observe_reveals(&mut self) {
        if self.viewport_rows == 0 {
            return;
        }
        let essay = self.essay;
        let viewport_rows = self.viewport_rows;
        let page = self.page_mut();
        let viewport = RowSpan::new(u32::from(page.scroll), u32::from(viewport_rows));

        let mut flipped = Vec::new();
        for (section, (span, latch)) in essay
            .section_spans()
            .into_iter()
            .zip(page.latches.iter_mut())
            .enumerate()
        {
            if latch.observe(intersection_ratio(span, viewport)) {
                flipped.push(section);
            }
        }

        if flipped.is_empty() {
            return;
        }
        if let Ok(mut effects) = self.reveal_fx.lock() {
            for section in flipped {
                debug!(essay = essay.as_str(), section, "section revealed");
                effects.push(RevealFx {
                    essay,
                    section,
                    effect: fx::fade_from_fg(Color::Black, (REVEAL_FADE_MS, Interpolation::QuadOut)),
                });
            }
        }
    }

    fn mount_map(&mut self) {
        let token = self.config.map_token.clone();
        let adapter = MapSyncAdapter::mount(token.as_deref(), |_| CanvasMap::new());
        if matches!(adapter.phase(), MapPhase::Loading) {
            if let Some(token) = token {
                self.map_generation += 1;
                spawn_load(
                    token,
                    self.config.map_style_path.clone(),
                    self.map_generation,
                    self.map_sender.clone(),
                );
            }
        }
        self.map = Some(adapter);
    }

    /// Leaving the page releases the widget and restores the filter to its
    /// initial state, as a fresh mount would see it.
    fn unmount_map(&mut self) {
        if let Some(mut map) = self.map.take() {
            map.destroy();
        }
        self.map_area.set(None);
        self.pointer_marker = None;
        self.heritage_filter.reset();
        self.site_cursor = 0;
        self.search_input = None;
    }

    fn drain_map_events(&mut self) {
        while let Ok((generation, event)) = self.map_events.try_recv() {
            if generation != self.map_generation || self.map.is_none() {
                debug!(generation, "dropping map event for an unmounted map");
                continue;
            }
            self.dispatch_map_event(event);
        }
    }

    /// Routes a widget event through the adapter and applies any selection
    /// it reports.
    pub fn dispatch_map_event(&mut self, event: MapEvent) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        if let Some(index) = map.handle_event(event, SITES, &self.heritage_filter) {
            self.heritage_filter.select(Some(index));
            if let Some(position) = self.visible_sites().iter().position(|i| *i == index) {
                self.site_cursor = position;
            }
        }
        if let Some(reason) = self.map.as_ref().and_then(MapSyncAdapter::unavailable_reason) {
            self.status_message = format!("Map unavailable: {reason}");
        }
    }

    pub fn marker_at(&self, point: LngLat) -> Option<MarkerHandle> {
        self.map
            .as_ref()
            .filter(|map| map.is_ready())
            .and_then(MapSyncAdapter::widget)
            .and_then(|widget| widget.marker_at(point))
    }

    pub fn click_marker(&mut self, point: LngLat) {
        if let Some(handle) = self.marker_at(point) {
            self.dispatch_map_event(MapEvent::MarkerClicked(handle));
        }
    }

    pub fn hover_marker(&mut self, point: Option<LngLat>) {
        let next = point.and_then(|point| self.marker_at(point));
        if next == self.pointer_marker {
            return;
        }
        if let Some(previous) = self.pointer_marker.take() {
            self.dispatch_map_event(MapEvent::MarkerHovered(previous, false));
        }
        if let Some(handle) = next {
            self.dispatch_map_event(MapEvent::MarkerHovered(handle, true));
        }
        self.pointer_marker = next;
    }

    pub fn with_map(&mut self, action: impl FnOnce(&mut CanvasMap)) {
        if let Some(widget) = self.map.as_mut().and_then(MapSyncAdapter::widget_mut) {
            action(widget);
        }
    }

    pub fn visible_sites(&self) -> Vec<usize> {
        self.heritage_filter.visible_indices(SITES)
    }

    pub fn visible_rugs(&self) -> Vec<usize> {
        self.rug_filter.visible_indices(RUGS)
    }

    /// Record index under the site list cursor.
    pub fn cursor_site(&self) -> Option<usize> {
        self.visible_sites().get(self.site_cursor).copied()
    }

    pub fn sync_cursor_hover(&mut self) {
        let hovered = self.cursor_site();
        self.heritage_filter.hover(hovered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lions_essays::domain::Region;

    fn app_on(essay: Essay) -> App {
        let config = AppConfig {
            start_essay: essay,
            ..AppConfig::default()
        };
        App::new(config)
    }

    #[test]
    fn heritage_without_token_shows_fallback() {
        let app = app_on(Essay::Heritage);
        let map = app.map.as_ref().unwrap();
        assert_eq!(map.phase(), &MapPhase::Uninitialized);
        assert!(map.unavailable_reason().is_some());
    }

    #[test]
    fn leaving_heritage_resets_filter_and_releases_map() {
        let mut app = app_on(Essay::Heritage);
        app.heritage_filter.toggle_region(Region::Tunisia);
        app.switch_essay(Essay::Rugs);
        assert!(app.map.is_none());
        assert!(!app.heritage_filter.has_active_filters());

        app.switch_essay(Essay::Heritage);
        assert!(app.map.is_some());
        assert_eq!(app.heritage_filter.active_region(), None);
    }

    #[test]
    fn sections_in_view_reveal_once() {
        let mut app = app_on(Essay::Exports);
        app.viewport_rows = 10;
        app.update();
        assert!(app.page().is_revealed(0));
        assert!(!app.page().is_revealed(2));
        assert_eq!(app.reveal_fx.lock().unwrap().len(), 1);

        app.scroll_by(40);
        app.update();
        assert!(app.page().is_revealed(2));
        app.scroll_to_top();
        app.update();
        assert!(app.page().is_revealed(2));
    }

    #[test]
    fn scrolling_is_clamped_to_page() {
        let mut app = app_on(Essay::Rugs);
        app.viewport_rows = 20;
        app.scroll_by(-5);
        assert_eq!(app.page().scroll, 0);
        app.scroll_by(10_000);
        let max = Essay::Rugs.page_rows() - 20;
        assert_eq!(u32::from(app.page().scroll), max);
    }

    #[test]
    fn export_chart_is_laid_out_on_start() {
        let app = app_on(Essay::Exports);
        assert!(app.export_error.is_none());
        assert_eq!(app.export_arcs.len(), app.export_segments.len());
    }
}
