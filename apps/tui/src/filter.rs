//! Selection and filter state shared by every surface that shows a dataset.
//!
//! Each axis is single-select and nullable; a `None` axis matches
//! everything. Active axes combine with logical AND.

use crate::domain::{Category, Region, Tagged};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::sync::LazyLock;

static MATCHER: LazyLock<SkimMatcherV2> = LazyLock::new(SkimMatcherV2::default);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    active_category: Option<Category>,
    active_region: Option<Region>,
    query: Option<String>,
    selected_index: Option<usize>,
    hovered_index: Option<usize>,
    revision: u64,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn active_category(&self) -> Option<Category> {
        self.active_category
    }

    pub const fn active_region(&self) -> Option<Region> {
        self.active_region
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub const fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub const fn hovered_index(&self) -> Option<usize> {
        self.hovered_index
    }

    /// Bumped on every mutation; lets consumers skip work when nothing moved.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Clicking the active category clears it, clicking another replaces it.
    pub fn toggle_category(&mut self, category: Category) {
        self.active_category = toggled(self.active_category, category);
        self.bump();
    }

    pub fn toggle_region(&mut self, region: Region) {
        self.active_region = toggled(self.active_region, region);
        self.bump();
    }

    pub fn set_query(&mut self, query: &str) {
        let trimmed = query.trim();
        self.query = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self.bump();
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected_index = index;
        self.bump();
    }

    pub fn hover(&mut self, index: Option<usize>) {
        if self.hovered_index != index {
            self.hovered_index = index;
            self.bump();
        }
    }

    /// Back to the freshly mounted state. The revision keeps counting so a
    /// reset is still observed as a change.
    pub fn reset(&mut self) {
        let revision = self.revision;
        *self = Self {
            revision,
            ..Self::default()
        };
        self.bump();
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_category.is_some() || self.active_region.is_some() || self.query.is_some()
    }

    pub fn is_visible<R: Tagged + ?Sized>(&self, record: &R) -> bool {
        let category_ok = self
            .active_category
            .map_or(true, |category| record.has_category(category));
        let region_ok = self
            .active_region
            .map_or(true, |region| record.has_region(region));
        let query_ok = self.query.as_deref().map_or(true, |query| {
            MATCHER
                .fuzzy_match(record.search_text(), query)
                .is_some()
        });

        category_ok && region_ok && query_ok
    }

    /// Visible and currently pointed at, either by selection or hover.
    pub fn is_highlighted<R: Tagged + ?Sized>(&self, index: usize, record: &R) -> bool {
        (self.selected_index == Some(index) || self.hovered_index == Some(index))
            && self.is_visible(record)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_index == Some(index)
    }

    pub fn visible_indices<R: Tagged>(&self, records: &[R]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.is_visible(*record))
            .map(|(index, _)| index)
            .collect()
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn toggled<T: PartialEq>(current: Option<T>, clicked: T) -> Option<T> {
    match current {
        Some(active) if active == clicked => None,
        _ => Some(clicked),
    }
}
