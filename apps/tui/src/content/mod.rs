//! Embedded essay content. Everything here is immutable and compiled in.

pub mod exports;
pub mod heritage;
pub mod rugs;

use crate::reveal::RowSpan;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Essay {
    Heritage,
    Exports,
    Rugs,
}

/// A vertically stacked block of an essay page, `rows` tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub rows: u16,
}

const HERITAGE_SECTIONS: &[Section] = &[
    Section { title: "Prologue", rows: 7 },
    Section { title: "Map", rows: 24 },
    Section { title: "Sites", rows: 16 },
    Section { title: "Coda", rows: 6 },
];

const EXPORTS_SECTIONS: &[Section] = &[
    Section { title: "Prologue", rows: 7 },
    Section { title: "Harvest wheel", rows: 26 },
    Section { title: "Ledger", rows: 13 },
    Section { title: "Coda", rows: 6 },
];

const RUGS_SECTIONS: &[Section] = &[
    Section { title: "Prologue", rows: 7 },
    Section { title: "Knot density", rows: 14 },
    Section { title: "Traditions", rows: 18 },
    Section { title: "Coda", rows: 6 },
];

impl Essay {
    pub const ALL: [Self; 3] = [Self::Heritage, Self::Exports, Self::Rugs];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heritage => "heritage",
            Self::Exports => "exports",
            Self::Rugs => "rugs",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Heritage),
            1 => Some(Self::Exports),
            2 => Some(Self::Rugs),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Heritage => 0,
            Self::Exports => 1,
            Self::Rugs => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "heritage" | "sites" => Some(Self::Heritage),
            "exports" | "agriculture" => Some(Self::Exports),
            "rugs" | "carpets" => Some(Self::Rugs),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Heritage => "Stone & Faith",
            Self::Exports => "The Harvest",
            Self::Rugs => "Knots",
        }
    }

    pub const fn sections(self) -> &'static [Section] {
        match self {
            Self::Heritage => HERITAGE_SECTIONS,
            Self::Exports => EXPORTS_SECTIONS,
            Self::Rugs => RUGS_SECTIONS,
        }
    }

    /// Total page height in rows.
    pub fn page_rows(self) -> u32 {
        self.sections()
            .iter()
            .map(|section| u32::from(section.rows))
            .sum()
    }

    /// Row span of each section, stacked from row zero.
    pub fn section_spans(self) -> Vec<RowSpan> {
        let mut start = 0;
        self.sections()
            .iter()
            .map(|section| {
                let span = RowSpan::new(start, u32::from(section.rows));
                start = span.end();
                span
            })
            .collect()
    }

    pub const fn prologue(self) -> &'static str {
        match self {
            Self::Heritage => {
                "From Kairouan to Cordoba, the mosques, madrasas and zaouias of the western \
                 Islamic world trace a thousand years of scholarship, patronage and pilgrimage. \
                 Filter by what a building is and where it stands; select one to fly there."
            }
            Self::Exports => {
                "Morocco feeds a good share of Europe's winter table. Each wedge is one product \
                 family; its sweep is its share of export value and its reach is its size \
                 relative to the largest."
            }
            Self::Rugs => {
                "Before the looms of the cities, rugs were made by the families who slept on \
                 them. Knot density separates a blanket for the mountains from a carpet for a \
                 palace floor."
            }
        }
    }

    pub const fn coda(self) -> &'static str {
        match self {
            Self::Heritage => {
                "Many of these buildings are still in daily use. Visit respectfully; most prayer \
                 halls are closed to non-Muslims."
            }
            Self::Exports => {
                "Figures are rounded annual values. Fishing remains the single largest family, \
                 while berries and avocados are the fastest growing."
            }
            Self::Rugs => {
                "Flat weaves carry no knots at all and so sit at zero; their value is in the \
                 weave, not the pile."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn essay_round_trips_through_index_and_name() {
        for (index, essay) in Essay::ALL.iter().enumerate() {
            assert_eq!(Essay::from_index(index), Some(*essay));
            assert_eq!(essay.index(), index);
            assert_eq!(Essay::parse(essay.as_str()), Some(*essay));
        }
        assert_eq!(Essay::parse(" Carpets "), Some(Essay::Rugs));
        assert_eq!(Essay::parse("weather"), None);
    }

    #[test]
    fn every_page_has_sections() {
        for essay in Essay::ALL {
            assert!(!essay.sections().is_empty());
            assert!(essay.page_rows() > 0);
            let spans = essay.section_spans();
            assert_eq!(spans[0].start, 0);
            assert!(spans.windows(2).all(|pair| pair[0].end() == pair[1].start));
            assert_eq!(spans.last().map(|span| span.end()), Some(essay.page_rows()));
        }
    }
}
