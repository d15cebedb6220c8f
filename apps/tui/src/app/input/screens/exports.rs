use crate::app::input::helpers::{cell_to_canvas, wrap_decrement, wrap_increment};
use crate::app::state::App;
use crate::ui::widgets::arc_chart::chart_bounds;
use crossterm::event::{KeyCode, MouseEvent, MouseEventKind};
use lions_essays::geometry::arc_at_angle;

pub fn handle_exports_input(app: &mut App, key: KeyCode) {
    let count = app.export_arcs.len();
    match key {
        KeyCode::Right | KeyCode::Down => {
            app.export_hover = Some(app.export_hover.map_or(0, |index| wrap_increment(index, count)));
        }
        KeyCode::Left | KeyCode::Up => {
            app.export_hover = Some(
                app.export_hover
                    .map_or(count.saturating_sub(1), |index| wrap_decrement(index, count)),
            );
        }
        KeyCode::Esc => app.export_hover = None,
        _ => {}
    }
}

pub fn handle_exports_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind == MouseEventKind::Moved {
        app.export_hover = hovered_arc(app, mouse.column, mouse.row);
    }
}

/// Arc under the pointer, by angle and radius from the chart centre.
fn hovered_arc(app: &App, column: u16, row: u16) -> Option<usize> {
    let area = app.chart_area.get()?;
    let extent = app.export_layout.max_outer_radius;
    let (x_bounds, y_bounds) = chart_bounds(area, extent);
    let (x, y) = cell_to_canvas(area, x_bounds, y_bounds, column, row)?;
    // Canvas y grows upwards; the layout measures angles with y down.
    let (dx, dy) = (x, -y);
    let radius = dx.hypot(dy);
    let index = arc_at_angle(&app.export_arcs, dy.atan2(dx))?;
    let arc = app.export_arcs.get(index)?;
    (radius >= app.export_layout.inner_radius && radius <= arc.outer_radius).then_some(index)
}
