use crate::domain::{Category, LngLat, MapRecord, Region, SizeTier, Tagged};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Site {
    pub name: &'static str,
    pub city: &'static str,
    pub region: Region,
    pub categories: &'static [Category],
    pub lat: f64,
    pub lng: f64,
    /// 1 (local landmark) to 5 (landmark of the whole Maghreb).
    pub significance: u8,
    pub founded: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    search: &'static str,
}

impl Tagged for Site {
    fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    fn has_region(&self, region: Region) -> bool {
        self.region == region
    }

    fn search_text(&self) -> &str {
        self.search
    }
}

impl MapRecord for Site {
    fn name(&self) -> &str {
        self.name
    }

    fn coordinates(&self) -> LngLat {
        LngLat::new(self.lng, self.lat)
    }

    fn size_tier(&self) -> SizeTier {
        SizeTier::from_significance(self.significance)
    }

    fn popup_text(&self) -> Option<&str> {
        Some(self.description)
    }
}

macro_rules! site {
    (
        $name:literal, $city:literal, $region:ident, [$($category:ident),+],
        $lat:literal, $lng:literal, $significance:literal, $founded:literal, $description:literal
    ) => {
        Site {
            name: $name,
            city: $city,
            region: Region::$region,
            categories: &[$(Category::$category),+],
            lat: $lat,
            lng: $lng,
            significance: $significance,
            founded: $founded,
            description: $description,
            search: concat!($name, " ", $city),
        }
    };
}

pub static SITES: &[Site] = &[
    site!(
        "Al-Qarawiyyin", "Fez", Morocco, [Mosque, Madrasa],
        34.0648, -4.9731, 5, "857",
        "Founded by Fatima al-Fihri; mosque and seat of learning at the heart of Fez el-Bali."
    ),
    site!(
        "Bou Inania Madrasa", "Fez", Morocco, [Madrasa, Mosque],
        34.0620, -4.9830, 4, "1351",
        "Marinid college with a working minaret, carved cedar and a water clock across the street."
    ),
    site!(
        "Al-Attarine Madrasa", "Fez", Morocco, [Madrasa],
        34.0649, -4.9745, 3, "1325",
        "Small Marinid madrasa beside the spice market, famous for its zellige and stucco."
    ),
    site!(
        "Zaouia of Moulay Idriss II", "Fez", Morocco, [Zaouia],
        34.0643, -4.9760, 4, "1437",
        "Shrine of the city's founder, rebuilt by the Wattasids and still a place of pilgrimage."
    ),
    site!(
        "Koutoubia Mosque", "Marrakech", Morocco, [Mosque],
        31.6237, -7.9934, 5, "1158",
        "Almohad mosque whose minaret set the pattern for the Giralda and Hassan Tower."
    ),
    site!(
        "Ben Youssef Madrasa", "Marrakech", Morocco, [Madrasa],
        31.6317, -7.9862, 4, "1565",
        "Saadian college that once housed some nine hundred students around a single courtyard."
    ),
    site!(
        "Zaouia of Sidi Bel Abbes", "Marrakech", Morocco, [Zaouia],
        31.6379, -7.9906, 3, "1605",
        "Shrine of the patron saint of Marrakech, one of the city's seven saints."
    ),
    site!(
        "Bahia Palace", "Marrakech", Morocco, [Palace],
        31.6216, -7.9830, 3, "1867",
        "Late nineteenth century vizier's palace of painted ceilings and riad gardens."
    ),
    site!(
        "Medina of Marrakech", "Marrakech", Morocco, [Medina],
        31.6295, -7.9811, 4, "1070",
        "Almoravid walled city centred on Jemaa el-Fnaa."
    ),
    site!(
        "Hassan II Mosque", "Casablanca", Morocco, [Mosque],
        33.6083, -7.6325, 4, "1993",
        "Built partly over the Atlantic, with one of the tallest minarets in the world."
    ),
    site!(
        "Kasbah of the Udayas", "Rabat", Morocco, [Kasbah],
        34.0311, -6.8367, 3, "1150",
        "Almohad citadel at the mouth of the Bou Regreg, later garrisoned by the Udaya tribe."
    ),
    site!(
        "Ait Benhaddou", "Ouarzazate", Morocco, [Kasbah],
        31.0470, -7.1319, 4, "1600",
        "Fortified village of earthen kasbahs on the old caravan route over the High Atlas."
    ),
    site!(
        "Tinmel Mosque", "Tinmel", Morocco, [Mosque],
        30.9833, -8.2281, 3, "1148",
        "Roofless Almohad mosque in the High Atlas, birthplace of the Almohad movement."
    ),
    site!(
        "Zaouia of Moulay Idriss I", "Moulay Idriss Zerhoun", Morocco, [Zaouia],
        34.0547, -5.5216, 4, "791",
        "Tomb of the founder of the Idrisid dynasty on a hill above Volubilis."
    ),
    site!(
        "Medina of Chefchaouen", "Chefchaouen", Morocco, [Medina, Kasbah],
        35.1688, -5.2636, 2, "1471",
        "Blue-washed mountain medina founded as a fortress against the Portuguese."
    ),
    site!(
        "Great Mosque of Tlemcen", "Tlemcen", Algeria, [Mosque],
        34.8828, -1.3167, 4, "1136",
        "Almoravid mosque with one of the finest ribbed domes of the western Islamic world."
    ),
    site!(
        "Ketchaoua Mosque", "Algiers", Algeria, [Mosque],
        36.7853, 3.0608, 3, "1612",
        "Ottoman mosque at the foot of the Casbah of Algiers, restored in 2018."
    ),
    site!(
        "Casbah of Algiers", "Algiers", Algeria, [Kasbah, Medina],
        36.7847, 3.0600, 4, "1516",
        "Ottoman citadel and old town descending to the sea."
    ),
    site!(
        "Great Mosque of Kairouan", "Kairouan", Tunisia, [Mosque],
        35.6814, 10.1038, 5, "670",
        "Oldest mosque in the Maghreb and the model for much of its mosque architecture."
    ),
    site!(
        "Zitouna Mosque", "Tunis", Tunisia, [Mosque, Madrasa],
        36.7975, 10.1711, 4, "698",
        "Mosque-university around which the medina of Tunis grew."
    ),
    site!(
        "Zaouia of Sidi Sahab", "Kairouan", Tunisia, [Zaouia],
        35.6856, 10.0886, 3, "1629",
        "Mausoleum of a companion of the Prophet, known as the Mosque of the Barber."
    ),
    site!(
        "Al-Azhar Mosque", "Cairo", Egypt, [Mosque, Madrasa],
        30.0457, 31.2627, 5, "972",
        "Fatimid foundation and one of the oldest continuously operating universities."
    ),
    site!(
        "Mosque-Madrasa of Sultan Hassan", "Cairo", Egypt, [Mosque, Madrasa],
        30.0322, 31.2565, 4, "1356",
        "Mamluk complex with four teaching iwans, one for each school of law."
    ),
    site!(
        "Great Mosque of Cordoba", "Cordoba", Spain, [Mosque],
        37.8789, -4.7794, 5, "785",
        "Umayyad hypostyle hall of double arches, extended over two centuries."
    ),
    site!(
        "Alhambra", "Granada", Spain, [Palace, Kasbah],
        37.1761, -3.5881, 5, "1238",
        "Nasrid palace city on the Sabika hill, the last great court of al-Andalus."
    ),
    site!(
        "Madrasa of Granada", "Granada", Spain, [Madrasa],
        37.1756, -3.5978, 2, "1349",
        "Yusuf I's university, whose mihrab survives inside a later palace."
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;

    #[test]
    fn coordinates_are_in_range_and_names_unique() {
        let mut names = std::collections::HashSet::new();
        for site in SITES {
            assert!((-90.0..=90.0).contains(&site.lat), "{}", site.name);
            assert!((-180.0..=180.0).contains(&site.lng), "{}", site.name);
            assert!((1..=5).contains(&site.significance), "{}", site.name);
            assert!(names.insert(site.name), "duplicate {}", site.name);
        }
    }

    #[test]
    fn moroccan_mosques_then_all_mosques() {
        let mut filter = FilterState::new();
        filter.toggle_region(Region::Morocco);
        filter.toggle_category(Category::Mosque);
        let moroccan = filter.visible_indices(SITES);
        assert!(!moroccan.is_empty());
        assert!(moroccan.iter().all(|index| {
            SITES[*index].region == Region::Morocco
                && SITES[*index].categories.contains(&Category::Mosque)
        }));

        filter.toggle_region(Region::Morocco);
        let everywhere = filter.visible_indices(SITES);
        let expected = SITES
            .iter()
            .filter(|site| site.categories.contains(&Category::Mosque))
            .count();
        assert_eq!(everywhere.len(), expected);
        assert!(everywhere.len() > moroccan.len());
    }

    #[test]
    fn search_covers_city() {
        let mut filter = FilterState::new();
        filter.set_query("granada");
        let found = filter.visible_indices(SITES);
        assert!(found.iter().all(|index| SITES[*index].city == "Granada"));
        assert_eq!(found.len(), 2);
    }
}
