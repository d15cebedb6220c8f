//! Radial proportional chart layout.
//!
//! Each segment sweeps an angle proportional to its share of the total and
//! reaches an outer radius proportional to its value relative to the largest
//! segment, with a floor of 40% of the radius band so small values never
//! collapse into slivers.

use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write as _;
use thiserror::Error;

/// Share of the radius band every segment reaches regardless of its value.
pub const RADIUS_FLOOR: f64 = 0.4;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("segment {label:?} has negative value {value}")]
    NegativeValue { label: String, value: f64 },
    #[error("segment {label:?} has non-finite value")]
    NonFiniteValue { label: String },
    #[error("segment values sum to zero")]
    ZeroTotal,
    #[error("gap must be a finite, non-negative angle, got {0}")]
    InvalidGap(f64),
    #[error("gap of {gap} rad across {count} segments leaves no room to sweep")]
    GapTooLarge { gap: f64, count: usize },
    #[error("inner radius {inner} must be non-negative and below outer radius {outer}")]
    InvalidRadii { inner: f64, outer: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub label: String,
    pub value: f64,
    /// Display color, passed through untouched.
    pub color: String,
}

impl Segment {
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcLayoutConfig {
    pub start_angle: f64,
    pub inner_radius: f64,
    pub max_outer_radius: f64,
    pub gap: f64,
}

impl Default for ArcLayoutConfig {
    fn default() -> Self {
        Self {
            start_angle: -FRAC_PI_2,
            inner_radius: 90.0,
            max_outer_radius: 320.0,
            gap: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcSegment {
    pub label: String,
    pub color: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub outer_radius: f64,
}

impl ArcSegment {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Lays out `segments` around the circle in order, starting at
/// `config.start_angle` and leaving `config.gap` radians after each one.
///
/// An empty input yields an empty layout. Negative or non-finite values and
/// an all-zero total are rejected instead of producing `NaN` angles.
pub fn layout_arcs(
    segments: &[Segment],
    config: &ArcLayoutConfig,
) -> Result<Vec<ArcSegment>, GeometryError> {
    if segments.is_empty() {
        return Ok(Vec::new());
    }

    if !(config.gap.is_finite() && config.gap >= 0.0) {
        return Err(GeometryError::InvalidGap(config.gap));
    }

    if !(config.inner_radius >= 0.0 && config.inner_radius < config.max_outer_radius) {
        return Err(GeometryError::InvalidRadii {
            inner: config.inner_radius,
            outer: config.max_outer_radius,
        });
    }

    for segment in segments {
        if !segment.value.is_finite() {
            return Err(GeometryError::NonFiniteValue {
                label: segment.label.clone(),
            });
        }
        if segment.value < 0.0 {
            return Err(GeometryError::NegativeValue {
                label: segment.label.clone(),
                value: segment.value,
            });
        }
    }

    let total_value: f64 = segments.iter().map(|segment| segment.value).sum();
    if total_value <= 0.0 {
        return Err(GeometryError::ZeroTotal);
    }
    let max_value = segments
        .iter()
        .map(|segment| segment.value)
        .fold(0.0_f64, f64::max);

    let count = segments.len();
    let total_angle = (config.gap * count as f64).mul_add(-1.0, TAU);
    if total_angle <= 0.0 {
        return Err(GeometryError::GapTooLarge {
            gap: config.gap,
            count,
        });
    }

    let band = config.max_outer_radius - config.inner_radius;
    let mut current_angle = config.start_angle;
    let mut arcs = Vec::with_capacity(count);

    for segment in segments {
        let sweep = segment.value / total_value * total_angle;
        let start_angle = current_angle;
        let end_angle = current_angle + sweep;
        let reach = (1.0 - RADIUS_FLOOR).mul_add(segment.value / max_value, RADIUS_FLOOR);

        arcs.push(ArcSegment {
            label: segment.label.clone(),
            color: segment.color.clone(),
            value: segment.value,
            start_angle,
            end_angle,
            mid_angle: start_angle + sweep / 2.0,
            outer_radius: band.mul_add(reach, config.inner_radius),
        });

        current_angle = end_angle + config.gap;
    }

    Ok(arcs)
}

/// Screen-space point for an angle measured clockwise from the positive x
/// axis with y growing downwards (SVG convention).
pub fn polar_to_cartesian(center_x: f64, center_y: f64, radius: f64, angle: f64) -> (f64, f64) {
    (
        radius.mul_add(angle.cos(), center_x),
        radius.mul_add(angle.sin(), center_y),
    )
}

/// Closed SVG path for a donut wedge: inner start, out to the outer ring,
/// along the outer arc, back in, and along the inner arc to the start.
pub fn wedge_path(
    center: (f64, f64),
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> String {
    let (cx, cy) = center;
    let large_arc = u8::from(end_angle - start_angle > PI);

    let inner_start = polar_to_cartesian(cx, cy, inner_radius, start_angle);
    let outer_start = polar_to_cartesian(cx, cy, outer_radius, start_angle);
    let outer_end = polar_to_cartesian(cx, cy, outer_radius, end_angle);
    let inner_end = polar_to_cartesian(cx, cy, inner_radius, end_angle);

    let mut path = String::new();
    let _ = write!(path, "M {:.3} {:.3} ", inner_start.0, inner_start.1);
    let _ = write!(path, "L {:.3} {:.3} ", outer_start.0, outer_start.1);
    let _ = write!(
        path,
        "A {outer_radius:.3} {outer_radius:.3} 0 {large_arc} 1 {:.3} {:.3} ",
        outer_end.0, outer_end.1
    );
    let _ = write!(path, "L {:.3} {:.3} ", inner_end.0, inner_end.1);
    let _ = write!(
        path,
        "A {inner_radius:.3} {inner_radius:.3} 0 {large_arc} 0 {:.3} {:.3} Z",
        inner_start.0, inner_start.1
    );
    path
}

/// Index of the arc whose angular span contains `angle`, if any. Angles in
/// the gaps between segments hit nothing.
pub fn arc_at_angle(arcs: &[ArcSegment], angle: f64) -> Option<usize> {
    let first = arcs.first()?.start_angle;
    let normalized = (angle - first).rem_euclid(TAU) + first;
    arcs.iter()
        .position(|arc| normalized >= arc.start_angle && normalized <= arc.end_angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    fn abc() -> Vec<Segment> {
        vec![
            Segment::new("A", 50.0, "#c2410c"),
            Segment::new("B", 30.0, "#15803d"),
            Segment::new("C", 20.0, "#1d4ed8"),
        ]
    }

    #[test]
    fn largest_segment_sweeps_its_share_and_reaches_the_rim() {
        let config = ArcLayoutConfig {
            start_angle: -FRAC_PI_2,
            inner_radius: 90.0,
            max_outer_radius: 320.0,
            gap: 0.01,
        };
        let arcs = layout_arcs(&abc(), &config).unwrap();

        assert_eq!(arcs.len(), 3);
        assert_close(arcs[0].sweep(), 0.5 * (TAU - 0.03));
        assert_close(arcs[0].outer_radius, 320.0);
        assert_close(arcs[0].start_angle, -FRAC_PI_2);
        assert_close(arcs[2].outer_radius, 230.0_f64.mul_add(0.4 + 0.6 * 0.4, 90.0));
    }

    #[test]
    fn sweeps_plus_gaps_close_the_circle() {
        let config = ArcLayoutConfig::default();
        let arcs = layout_arcs(&abc(), &config).unwrap();
        let last = arcs.last().unwrap();
        assert_close(last.end_angle + config.gap, config.start_angle + TAU);
    }

    #[test]
    fn empty_input_yields_no_segments() {
        let arcs = layout_arcs(&[], &ArcLayoutConfig::default()).unwrap();
        assert!(arcs.is_empty());
    }

    #[test]
    fn all_zero_total_is_rejected() {
        let segments = vec![Segment::new("A", 0.0, "#000"), Segment::new("B", 0.0, "#000")];
        assert_eq!(
            layout_arcs(&segments, &ArcLayoutConfig::default()),
            Err(GeometryError::ZeroTotal)
        );
    }

    #[test]
    fn negative_value_is_rejected() {
        let segments = vec![Segment::new("A", 4.0, "#000"), Segment::new("B", -1.0, "#000")];
        assert!(matches!(
            layout_arcs(&segments, &ArcLayoutConfig::default()),
            Err(GeometryError::NegativeValue { ref label, .. }) if label == "B"
        ));
    }

    #[test]
    fn nan_value_is_rejected() {
        let segments = vec![Segment::new("A", f64::NAN, "#000")];
        assert!(matches!(
            layout_arcs(&segments, &ArcLayoutConfig::default()),
            Err(GeometryError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn oversized_gap_is_rejected() {
        let config = ArcLayoutConfig {
            gap: 4.0,
            ..ArcLayoutConfig::default()
        };
        assert!(matches!(
            layout_arcs(&abc(), &config),
            Err(GeometryError::GapTooLarge { count: 3, .. })
        ));
    }

    #[test]
    fn negative_or_nan_gap_is_rejected() {
        for gap in [-0.01, f64::NAN, f64::INFINITY] {
            let config = ArcLayoutConfig {
                gap,
                ..ArcLayoutConfig::default()
            };
            assert!(
                matches!(layout_arcs(&abc(), &config), Err(GeometryError::InvalidGap(_))),
                "gap {gap} accepted"
            );
        }
    }

    #[test]
    fn inverted_radii_are_rejected() {
        let config = ArcLayoutConfig {
            inner_radius: 400.0,
            ..ArcLayoutConfig::default()
        };
        assert!(matches!(
            layout_arcs(&abc(), &config),
            Err(GeometryError::InvalidRadii { .. })
        ));
    }

    #[test]
    fn zero_value_segment_gets_zero_sweep_but_keeps_radius_floor() {
        let segments = vec![Segment::new("A", 10.0, "#000"), Segment::new("B", 0.0, "#000")];
        let config = ArcLayoutConfig::default();
        let arcs = layout_arcs(&segments, &config).unwrap();
        assert_close(arcs[1].sweep(), 0.0);
        assert_close(arcs[1].outer_radius, 230.0_f64.mul_add(0.4, 90.0));
    }

    #[test]
    fn wedge_path_is_closed_and_uses_large_arc_flag() {
        let small = wedge_path((0.0, 0.0), 10.0, 20.0, 0.0, FRAC_PI_2);
        assert!(small.starts_with("M 10.000 0.000 L 20.000 0.000 A 20.000 20.000 0 0 1"));
        assert!(small.ends_with('Z'));

        let large = wedge_path((0.0, 0.0), 10.0, 20.0, 0.0, 1.5 * PI);
        assert!(large.contains("A 20.000 20.000 0 1 1"));
        assert!(large.contains("A 10.000 10.000 0 1 0"));
    }

    #[test]
    fn polar_origin_points_right_and_quarter_turn_points_down() {
        let (x, y) = polar_to_cartesian(5.0, 5.0, 2.0, 0.0);
        assert_close(x, 7.0);
        assert_close(y, 5.0);
        let (x, y) = polar_to_cartesian(5.0, 5.0, 2.0, FRAC_PI_2);
        assert_close(x, 5.0);
        assert_close(y, 7.0);
    }

    #[test]
    fn arc_lookup_finds_segment_and_misses_gaps() {
        let arcs = layout_arcs(&abc(), &ArcLayoutConfig::default()).unwrap();
        assert_eq!(arc_at_angle(&arcs, arcs[1].mid_angle), Some(1));
        assert_eq!(arc_at_angle(&arcs, arcs[0].mid_angle + TAU), Some(0));
        assert_eq!(arc_at_angle(&arcs, arcs[0].end_angle + 0.005), None);
    }

    fn segment_values() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.0_f64..1_000.0, 1..24)
            .prop_filter("needs a positive total", |values| {
                values.iter().sum::<f64>() > 1e-6
            })
    }

    fn to_segments(values: &[f64]) -> Vec<Segment> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| Segment::new(format!("s{index}"), *value, "#888"))
            .collect()
    }

    proptest! {
        #[test]
        fn sweep_is_proportional_to_value(values in segment_values(), gap in 0.0_f64..0.05) {
            let config = ArcLayoutConfig { gap, ..ArcLayoutConfig::default() };
            let arcs = layout_arcs(&to_segments(&values), &config).unwrap();
            let total: f64 = values.iter().sum();
            let total_angle = TAU - gap * values.len() as f64;
            for (arc, value) in arcs.iter().zip(&values) {
                prop_assert!((arc.sweep() / total_angle - value / total).abs() < 1e-9);
            }
        }

        #[test]
        fn layout_is_deterministic(values in segment_values()) {
            let segments = to_segments(&values);
            let config = ArcLayoutConfig::default();
            let first = layout_arcs(&segments, &config).unwrap();
            let second = layout_arcs(&segments, &config).unwrap();
            for (a, b) in first.iter().zip(&second) {
                prop_assert_eq!(a.start_angle.to_bits(), b.start_angle.to_bits());
                prop_assert_eq!(a.end_angle.to_bits(), b.end_angle.to_bits());
                prop_assert_eq!(a.outer_radius.to_bits(), b.outer_radius.to_bits());
            }
        }

        #[test]
        fn consecutive_segments_are_separated_by_the_gap(values in segment_values(), gap in 0.0_f64..0.05) {
            let config = ArcLayoutConfig { gap, ..ArcLayoutConfig::default() };
            let arcs = layout_arcs(&to_segments(&values), &config).unwrap();
            for pair in arcs.windows(2) {
                prop_assert!((pair[1].start_angle - pair[0].end_angle - gap).abs() < 1e-12);
            }
        }

        #[test]
        fn outer_radius_never_drops_below_floor(values in segment_values()) {
            let config = ArcLayoutConfig::default();
            let arcs = layout_arcs(&to_segments(&values), &config).unwrap();
            let floor = RADIUS_FLOOR.mul_add(config.max_outer_radius - config.inner_radius, config.inner_radius);
            for arc in &arcs {
                prop_assert!(arc.outer_radius >= floor - 1e-9);
                prop_assert!(arc.outer_radius <= config.max_outer_radius + 1e-9);
            }
        }
    }
}
