use crate::domain::{Category, Region, Tagged};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RugTradition {
    pub name: &'static str,
    pub makers: &'static str,
    pub region: Region,
    /// Knots per square decimetre; zero for flat weaves.
    pub knot_density: u32,
    pub palette: &'static [&'static str],
    pub description: &'static str,
}

impl Tagged for RugTradition {
    fn has_category(&self, _category: Category) -> bool {
        false
    }

    fn has_region(&self, region: Region) -> bool {
        self.region == region
    }

    fn search_text(&self) -> &str {
        self.name
    }
}

pub static RUGS: &[RugTradition] = &[
    RugTradition {
        name: "Beni Ourain",
        makers: "Beni Ourain confederation, Middle Atlas",
        region: Region::Morocco,
        knot_density: 400,
        palette: &["undyed ivory", "brown-black"],
        description: "Deep-pile wool with sparse lozenge lattices, woven for cold mountain winters.",
    },
    RugTradition {
        name: "Azilal",
        makers: "Azilal province, High Atlas",
        region: Region::Morocco,
        knot_density: 600,
        palette: &["ivory", "saffron", "madder red", "indigo"],
        description: "Bright symbolic motifs on a white ground, often with recycled dyed wool.",
    },
    RugTradition {
        name: "Boucherouite",
        makers: "Urban and rural households",
        region: Region::Morocco,
        knot_density: 250,
        palette: &["mixed textile scraps"],
        description: "Rag rugs knotted from worn clothing, a twentieth century economy of reuse.",
    },
    RugTradition {
        name: "Hanbel",
        makers: "Zemmour and Zaer tribes",
        region: Region::Morocco,
        knot_density: 0,
        palette: &["red", "black", "white"],
        description: "Flat-woven kilims in banded geometry, used as blankets and tent dividers.",
    },
    RugTradition {
        name: "Rabat",
        makers: "Rabat-Sale urban workshops",
        region: Region::Morocco,
        knot_density: 1_600,
        palette: &["crimson", "green", "blue"],
        description: "City carpets with a central medallion and borders, descended from Anatolian models.",
    },
    RugTradition {
        name: "Kairouan mergoum",
        makers: "Kairouan workshops",
        region: Region::Tunisia,
        knot_density: 1_000,
        palette: &["natural wool", "brown", "red"],
        description: "Knotted carpets in restrained natural tones with a lozenge medallion.",
    },
    RugTradition {
        name: "Guergour",
        makers: "Kabylia and the Babors",
        region: Region::Algeria,
        knot_density: 900,
        palette: &["red", "blue", "yellow"],
        description: "High Algerian knotted rugs with stepped borders and bold field motifs.",
    },
    RugTradition {
        name: "Alpujarra",
        makers: "Alpujarras, Granada",
        region: Region::Spain,
        knot_density: 200,
        palette: &["blue", "red", "green"],
        description: "Looped-pile rugs that carry Nasrid patterns into the early modern period.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;

    #[test]
    fn region_filter_applies_to_rug_cards() {
        let mut filter = FilterState::new();
        filter.toggle_region(Region::Tunisia);
        let visible = filter.visible_indices(RUGS);
        assert_eq!(visible.len(), 1);
        assert_eq!(RUGS[visible[0]].name, "Kairouan mergoum");
    }

    #[test]
    fn category_axis_hides_every_rug() {
        let mut filter = FilterState::new();
        filter.toggle_category(Category::Mosque);
        assert!(filter.visible_indices(RUGS).is_empty());
    }
}
