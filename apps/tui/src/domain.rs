use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Morocco,
    Algeria,
    Tunisia,
    Egypt,
    Spain,
}

impl Region {
    pub const ALL: [Self; 5] = [
        Self::Morocco,
        Self::Algeria,
        Self::Tunisia,
        Self::Egypt,
        Self::Spain,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morocco => "morocco",
            Self::Algeria => "algeria",
            Self::Tunisia => "tunisia",
            Self::Egypt => "egypt",
            Self::Spain => "spain",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Morocco),
            1 => Some(Self::Algeria),
            2 => Some(Self::Tunisia),
            3 => Some(Self::Egypt),
            4 => Some(Self::Spain),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "morocco" => Some(Self::Morocco),
            "algeria" => Some(Self::Algeria),
            "tunisia" => Some(Self::Tunisia),
            "egypt" => Some(Self::Egypt),
            "spain" | "al-andalus" => Some(Self::Spain),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Morocco => "Morocco",
            Self::Algeria => "Algeria",
            Self::Tunisia => "Tunisia",
            Self::Egypt => "Egypt",
            Self::Spain => "Al-Andalus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mosque,
    Madrasa,
    Zaouia,
    Kasbah,
    Medina,
    Palace,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Mosque,
        Self::Madrasa,
        Self::Zaouia,
        Self::Kasbah,
        Self::Medina,
        Self::Palace,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mosque => "mosque",
            Self::Madrasa => "madrasa",
            Self::Zaouia => "zaouia",
            Self::Kasbah => "kasbah",
            Self::Medina => "medina",
            Self::Palace => "palace",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Mosque),
            1 => Some(Self::Madrasa),
            2 => Some(Self::Zaouia),
            3 => Some(Self::Kasbah),
            4 => Some(Self::Medina),
            5 => Some(Self::Palace),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mosque" => Some(Self::Mosque),
            "madrasa" | "medersa" => Some(Self::Madrasa),
            "zaouia" | "zawiya" => Some(Self::Zaouia),
            "kasbah" => Some(Self::Kasbah),
            "medina" => Some(Self::Medina),
            "palace" => Some(Self::Palace),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mosque => "Mosques",
            Self::Madrasa => "Madrasas",
            Self::Zaouia => "Zaouias",
            Self::Kasbah => "Kasbahs",
            Self::Medina => "Medinas",
            Self::Palace => "Palaces",
        }
    }
}

/// Visual size bucket for a map marker. Chosen once from an ordinal
/// significance, never interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const fn from_significance(significance: u8) -> Self {
        match significance {
            0..=2 => Self::Small,
            3 => Self::Medium,
            _ => Self::Large,
        }
    }

    pub const fn base_scale(self) -> f32 {
        match self {
            Self::Small => 0.75,
            Self::Medium => 1.0,
            Self::Large => 1.35,
        }
    }
}

/// WGS84 coordinate pair, longitude first as map libraries expect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Membership tests used by the filter controller. Records carry zero or
/// more categories and regions; no hierarchy is implied.
pub trait Tagged {
    fn has_category(&self, category: Category) -> bool;
    fn has_region(&self, region: Region) -> bool;
    fn search_text(&self) -> &str;
}

/// A record that can be pinned on a map.
pub trait MapRecord: Tagged {
    fn name(&self) -> &str;
    fn coordinates(&self) -> LngLat;
    fn size_tier(&self) -> SizeTier;
    fn popup_text(&self) -> Option<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_parse_round_trips_every_variant() {
        for (index, region) in Region::ALL.iter().enumerate() {
            assert_eq!(Region::from_index(index), Some(*region));
            assert_eq!(Region::parse(region.as_str()), Some(*region));
        }
        assert_eq!(Region::parse("  MOROCCO "), Some(Region::Morocco));
        assert_eq!(Region::parse("atlantis"), None);
    }

    #[test]
    fn category_accepts_transliterations() {
        assert_eq!(Category::parse("zawiya"), Some(Category::Zaouia));
        assert_eq!(Category::parse("Medersa"), Some(Category::Madrasa));
        assert_eq!(Category::from_index(6), None);
    }

    #[test]
    fn size_tiers_bucket_significance() {
        assert_eq!(SizeTier::from_significance(1), SizeTier::Small);
        assert_eq!(SizeTier::from_significance(2), SizeTier::Small);
        assert_eq!(SizeTier::from_significance(3), SizeTier::Medium);
        assert_eq!(SizeTier::from_significance(4), SizeTier::Large);
        assert_eq!(SizeTier::from_significance(5), SizeTier::Large);
        assert!(SizeTier::Large.base_scale() > SizeTier::Small.base_scale());
    }
}
