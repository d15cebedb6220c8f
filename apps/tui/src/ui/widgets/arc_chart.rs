//! Radial proportional chart drawn on a braille canvas.

use lions_essays::geometry::{polar_to_cartesian, ArcSegment};
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

/// Radians between two radial strokes when filling a wedge.
const FILL_STEP: f64 = 0.012;
const HOVER_REACH: f64 = 1.06;
const PADDING: f64 = 1.12;

/// Canvas bounds that keep the chart round inside a bordered `area`,
/// given terminal cells roughly twice as tall as they are wide.
pub fn chart_bounds(area: Rect, extent: f64) -> ([f64; 2], [f64; 2]) {
    let inner = area.inner(Margin::new(1, 1));
    let width = f64::from(inner.width.max(1));
    let height = f64::from(inner.height.max(1)) * 2.0;
    let span = extent * PADDING;

    let (half_x, half_y) = if width >= height {
        (span * width / height, span)
    } else {
        (span, span * height / width)
    };
    ([-half_x, half_x], [-half_y, half_y])
}

pub fn segment_color(arc: &ArcSegment) -> Color {
    arc.color.parse::<Color>().unwrap_or(Color::Gray)
}

pub fn render_arc_chart(
    f: &mut Frame<'_>,
    area: Rect,
    arcs: &[ArcSegment],
    inner_radius: f64,
    extent: f64,
    hovered: Option<usize>,
) {
    let (x_bounds, y_bounds) = chart_bounds(area, extent);
    let block = Block::default()
        .title("Export value by product")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(block)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for (index, arc) in arcs.iter().enumerate() {
                let is_hovered = hovered == Some(index);
                let color = match hovered {
                    Some(_) if !is_hovered => Color::DarkGray,
                    _ => segment_color(arc),
                };
                let outer = if is_hovered {
                    arc.outer_radius * HOVER_REACH
                } else {
                    arc.outer_radius
                };

                // Truncation is fine: the stroke count only sets fill density.
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let strokes = (arc.sweep() / FILL_STEP).ceil().max(1.0) as usize;
                for stroke in 0..=strokes {
                    let angle = (arc.sweep() * stroke as f64 / strokes as f64) + arc.start_angle;
                    let (x1, y1) = polar_to_cartesian(0.0, 0.0, inner_radius, angle);
                    let (x2, y2) = polar_to_cartesian(0.0, 0.0, outer, angle);
                    // Layout angles grow with y pointing down; the canvas points up.
                    ctx.draw(&Line {
                        x1,
                        y1: -y1,
                        x2,
                        y2: -y2,
                        color,
                    });
                }
            }

            ctx.layer();
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: inner_radius,
                color: Color::Gray,
            });

            if let Some(arc) = hovered.and_then(|index| arcs.get(index)) {
                let (x, y) =
                    polar_to_cartesian(0.0, 0.0, arc.outer_radius * HOVER_REACH * 1.04, arc.mid_angle);
                ctx.print(
                    x,
                    -y,
                    TextLine::from(Span::styled(
                        arc.label.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )),
                );
            }
        });

    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_keep_the_chart_round() {
        let (x, y) = chart_bounds(Rect::new(0, 0, 82, 22), 100.0);
        // 80 x 20 cells inside the border: 80 units wide, 40 tall.
        assert!((x[1] / y[1] - 2.0).abs() < 1e-9);
        assert!(y[1] >= 100.0);

        let (x, y) = chart_bounds(Rect::new(0, 0, 12, 52), 100.0);
        assert!(x[1] >= 100.0);
        assert!(y[1] > x[1]);
    }

    #[test]
    fn hex_colors_parse() {
        let arc = ArcSegment {
            label: "Citrus".to_string(),
            color: "#e67e22".to_string(),
            value: 1.0,
            start_angle: 0.0,
            end_angle: 1.0,
            mid_angle: 0.5,
            outer_radius: 10.0,
        };
        assert_eq!(segment_color(&arc), Color::Rgb(0xe6, 0x7e, 0x22));
    }
}
