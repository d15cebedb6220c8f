use crate::geometry::Segment;

/// Moroccan agri-food exports by product family, USD millions, rounded.
const EXPORTS: &[(&str, f64, &str)] = &[
    ("Tomatoes", 1_250.0, "#c0392b"),
    ("Citrus", 720.0, "#e67e22"),
    ("Red berries", 690.0, "#8e44ad"),
    ("Fish & seafood", 2_400.0, "#2874a6"),
    ("Olives & olive oil", 410.0, "#7d8f3a"),
    ("Peppers & vegetables", 530.0, "#27ae60"),
    ("Avocados", 300.0, "#1e8449"),
    ("Argan oil", 45.0, "#b9770e"),
    ("Dates & dried fruit", 60.0, "#a04000"),
];

pub const TITLE: &str = "What Morocco sells the world";
pub const UNIT: &str = "USD millions";

pub fn segments() -> Vec<Segment> {
    EXPORTS
        .iter()
        .map(|(label, value, color)| Segment::new(*label, *value, *color))
        .collect()
}

/// Export share of a single product, as a percentage of the total.
pub fn share_percent(segments: &[Segment], index: usize) -> Option<f64> {
    let total: f64 = segments.iter().map(|segment| segment.value).sum();
    if total <= 0.0 {
        return None;
    }
    segments
        .get(index)
        .map(|segment| segment.value / total * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{layout_arcs, ArcLayoutConfig};

    #[test]
    fn dataset_lays_out_cleanly() {
        let segments = segments();
        let arcs = layout_arcs(&segments, &ArcLayoutConfig::default()).unwrap();
        assert_eq!(arcs.len(), segments.len());
        let widest = arcs
            .iter()
            .max_by(|a, b| a.sweep().total_cmp(&b.sweep()))
            .unwrap();
        assert_eq!(widest.label, "Fish & seafood");
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let segments = segments();
        let total: f64 = (0..segments.len())
            .filter_map(|index| share_percent(&segments, index))
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(share_percent(&segments, segments.len()), None);
    }
}
