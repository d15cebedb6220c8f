use ratzilla::ratatui::style::Color;

/// Fade progress per second; a panel is fully in after ~0.6 s.
const FADE_SPEED: f64 = 1.6;
const MAX_FRAME_DELTA: f64 = 0.25;

/// Advances a one-way fade towards 1.0 by the clamped time since the last
/// frame. The first frame only records the clock.
pub fn advance_fade(progress: f64, last_tick: Option<f64>, now_seconds: f64) -> (f64, Option<f64>) {
    let delta = last_tick
        .map(|last| (now_seconds - last).max(0.0).min(MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    let next = delta.mul_add(FADE_SPEED, progress).clamp(0.0, 1.0);
    (next, Some(now_seconds))
}

/// `color` blended up from black by `progress`.
pub fn fade_color(color: Color, progress: f64) -> Color {
    let progress = progress.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let scale = |channel: u8| (f64::from(channel) * progress).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other if progress >= 0.5 => other,
        _ => Color::DarkGray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn first_tick_initializes_time_without_advancing() {
        let (progress, last_tick) = advance_fade(0.2, None, 10.0);
        assert_close(progress, 0.2);
        assert_eq!(last_tick, Some(10.0));
    }

    #[test]
    fn fade_advances_and_saturates() {
        let (progress, _) = advance_fade(0.0, Some(4.0), 4.2);
        assert_close(progress, 0.2 * FADE_SPEED);
        let (progress, _) = advance_fade(0.95, Some(4.0), 4.2);
        assert_close(progress, 1.0);
    }

    #[test]
    fn large_frame_gap_is_clamped() {
        let (progress, _) = advance_fade(0.0, Some(3.0), 30.0);
        assert_close(progress, MAX_FRAME_DELTA * FADE_SPEED);
    }

    #[test]
    fn backwards_time_does_not_reverse_the_fade() {
        let (progress, last_tick) = advance_fade(0.5, Some(10.0), 9.0);
        assert_close(progress, 0.5);
        assert_eq!(last_tick, Some(9.0));
    }

    #[test]
    fn colors_blend_from_black() {
        assert_eq!(fade_color(Color::Rgb(200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(fade_color(Color::Rgb(200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(fade_color(Color::Cyan, 0.1), Color::DarkGray);
        assert_eq!(fade_color(Color::Cyan, 0.9), Color::Cyan);
    }
}
