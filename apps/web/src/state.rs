//! Keyboard-driven view state of the dashboard, kept free of rendering.

use crate::animation::advance_fade;

pub const TAB_COUNT: usize = 3;
pub const REGIONS: [&str; 5] = ["morocco", "algeria", "tunisia", "egypt", "spain"];
const MAX_ROW_OFFSET: usize = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub tab: usize,
    /// `None` shows every region.
    pub region: Option<&'static str>,
    pub hovered_arc: Option<usize>,
    pub row_offset: usize,
    /// Per-tab fade; once a panel is fully in it stays in.
    pub fades: [f64; TAB_COUNT],
    last_tick: Option<f64>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub const fn new() -> Self {
        Self {
            tab: 0,
            region: None,
            hovered_arc: None,
            row_offset: 0,
            fades: [0.0; TAB_COUNT],
            last_tick: None,
        }
    }

    pub fn select_tab(&mut self, tab: usize) {
        if tab < TAB_COUNT && tab != self.tab {
            self.tab = tab;
            self.row_offset = 0;
            self.hovered_arc = None;
        }
    }

    pub fn next_tab(&mut self) {
        self.select_tab((self.tab + 1) % TAB_COUNT);
    }

    pub fn previous_tab(&mut self) {
        self.select_tab((self.tab + TAB_COUNT - 1) % TAB_COUNT);
    }

    /// Selecting the active region again clears the filter.
    pub fn toggle_region(&mut self, region: &'static str) {
        self.region = if self.region == Some(region) {
            None
        } else {
            Some(region)
        };
        self.row_offset = 0;
    }

    pub fn cycle_region(&mut self) {
        let next = match self.region {
            None => REGIONS.first().copied(),
            Some(active) => REGIONS
                .iter()
                .position(|region| *region == active)
                .and_then(|position| REGIONS.get(position + 1).copied()),
        };
        match (next, self.region) {
            (Some(region), _) | (None, Some(region)) => self.toggle_region(region),
            (None, None) => {}
        }
    }

    pub fn matches_region(&self, region: &str) -> bool {
        self.region.map_or(true, |active| active == region)
    }

    pub fn step_arc(&mut self, forward: bool, count: usize) {
        if count == 0 {
            self.hovered_arc = None;
            return;
        }
        self.hovered_arc = Some(match (self.hovered_arc, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(index), true) => (index + 1) % count,
            (Some(index), false) => (index + count - 1) % count,
        });
    }

    pub fn scroll(&mut self, down: bool) {
        self.row_offset = if down {
            (self.row_offset + 1).min(MAX_ROW_OFFSET)
        } else {
            self.row_offset.saturating_sub(1)
        };
    }

    /// Advances the fade of the visible tab only.
    pub fn tick(&mut self, now_seconds: f64) {
        let (progress, last_tick) = advance_fade(self.fades[self.tab], self.last_tick, now_seconds);
        self.fades[self.tab] = progress;
        self.last_tick = last_tick;
    }

    pub fn fade(&self) -> f64 {
        self.fades[self.tab]
    }
}
