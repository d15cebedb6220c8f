//! One-way "has this scrolled into view yet" latch.

/// A contiguous run of rows, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub start: u32,
    pub len: u32,
}

impl RowSpan {
    pub const fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    pub const fn end(self) -> u32 {
        self.start.saturating_add(self.len)
    }
}

/// Fraction of `element` that lies inside `viewport`, like an intersection
/// observer entry's ratio. Zero-height elements count as fully visible once
/// their row is inside the viewport.
pub fn intersection_ratio(element: RowSpan, viewport: RowSpan) -> f32 {
    if element.len == 0 {
        let inside = element.start >= viewport.start && element.start < viewport.end();
        return if inside { 1.0 } else { 0.0 };
    }

    let top = element.start.max(viewport.start);
    let bottom = element.end().min(viewport.end());
    if bottom <= top {
        return 0.0;
    }
    #[allow(clippy::cast_possible_truncation)]
    let ratio = (f64::from(bottom - top) / f64::from(element.len)) as f32;
    ratio
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealLatch {
    threshold: f32,
    revealed: bool,
    observing: bool,
}

impl RevealLatch {
    pub const DEFAULT_THRESHOLD: f32 = 0.25;

    /// `threshold` is clamped into `(0, 1]`.
    pub fn new(threshold: f32) -> Self {
        let threshold = if threshold.is_finite() {
            threshold.clamp(f32::EPSILON, 1.0)
        } else {
            Self::DEFAULT_THRESHOLD
        };
        Self {
            threshold,
            revealed: false,
            observing: true,
        }
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_observing(&self) -> bool {
        self.observing
    }

    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Feeds one intersection sample. Returns `true` only on the call that
    /// flips the latch; after that observation stops for good.
    pub fn observe(&mut self, ratio: f32) -> bool {
        if !self.observing || ratio < self.threshold {
            return false;
        }
        self.revealed = true;
        self.observing = false;
        true
    }

    /// Stops observing without revealing, as when the element unmounts
    /// before it was ever seen.
    pub fn cancel(&mut self) {
        self.observing = false;
    }
}

impl Default for RevealLatch {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ratio_of_partially_visible_element() {
        let viewport = RowSpan::new(10, 20);
        assert!((intersection_ratio(RowSpan::new(25, 10), viewport) - 0.5).abs() < f32::EPSILON);
        assert!((intersection_ratio(RowSpan::new(12, 4), viewport) - 1.0).abs() < f32::EPSILON);
        assert!(intersection_ratio(RowSpan::new(30, 5), viewport).abs() < f32::EPSILON);
        assert!(intersection_ratio(RowSpan::new(0, 10), viewport).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_height_element_counts_when_inside() {
        let viewport = RowSpan::new(0, 5);
        assert!((intersection_ratio(RowSpan::new(4, 0), viewport) - 1.0).abs() < f32::EPSILON);
        assert!(intersection_ratio(RowSpan::new(5, 0), viewport).abs() < f32::EPSILON);
    }

    #[test]
    fn flips_once_at_threshold_and_stays_revealed() {
        let mut latch = RevealLatch::new(0.5);
        assert!(!latch.observe(0.49));
        assert!(!latch.is_revealed());
        assert!(latch.observe(0.5));
        assert!(latch.is_revealed());
        assert!(!latch.is_observing());
        assert!(!latch.observe(1.0));
        assert!(!latch.observe(0.0));
        assert!(latch.is_revealed());
    }

    #[test]
    fn cancel_before_first_sighting_never_reveals() {
        let mut latch = RevealLatch::default();
        latch.cancel();
        assert!(!latch.observe(1.0));
        assert!(!latch.is_revealed());
    }

    #[test]
    fn threshold_is_clamped() {
        assert!((RevealLatch::new(3.0).threshold() - 1.0).abs() < f32::EPSILON);
        assert!(RevealLatch::new(-1.0).threshold() > 0.0);
        assert!(
            (RevealLatch::new(f32::NAN).threshold() - RevealLatch::DEFAULT_THRESHOLD).abs()
                < f32::EPSILON
        );
    }

    proptest! {
        #[test]
        fn latch_is_monotonic(samples in prop::collection::vec(0.0_f32..=1.0, 0..64)) {
            let mut latch = RevealLatch::default();
            let mut flips = 0;
            let mut was_revealed = false;
            for ratio in samples {
                if latch.observe(ratio) {
                    flips += 1;
                }
                prop_assert!(!(was_revealed && !latch.is_revealed()));
                was_revealed = latch.is_revealed();
            }
            prop_assert!(flips <= 1);
        }
    }
}
