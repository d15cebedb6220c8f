use crate::app::input::helpers::{cell_to_canvas, cycle_category, cycle_region, wrap_decrement, wrap_increment};
use crate::app::state::App;
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use lions_essays::domain::LngLat;
use lions_essays::map::MapSyncAdapter;

const ZOOM_STEP: f64 = 1.5;
const PAN_STEP: f64 = 0.1;

pub fn handle_heritage_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => {
            let visible = app.visible_sites().len();
            app.site_cursor = wrap_decrement(app.site_cursor, visible);
            app.sync_cursor_hover();
        }
        KeyCode::Down => {
            let visible = app.visible_sites().len();
            app.site_cursor = wrap_increment(app.site_cursor, visible);
            app.sync_cursor_hover();
        }
        KeyCode::Enter => {
            let cursor = app.cursor_site();
            let next = if cursor == app.heritage_filter.selected_index() {
                None
            } else {
                cursor
            };
            app.heritage_filter.select(next);
        }
        KeyCode::Esc => {
            app.heritage_filter.select(None);
            app.heritage_filter.hover(None);
        }
        KeyCode::Char('c') => {
            cycle_category(&mut app.heritage_filter);
            app.site_cursor = 0;
        }
        KeyCode::Char('r') => {
            cycle_region(&mut app.heritage_filter);
            app.site_cursor = 0;
        }
        KeyCode::Char('x') => {
            app.heritage_filter.reset();
            app.site_cursor = 0;
            app.status_message = "Filters cleared".to_string();
        }
        KeyCode::Char('/') => {
            app.search_input = Some(app.heritage_filter.query().unwrap_or_default().to_string());
        }
        KeyCode::Char('+' | '=') => app.with_map(|map| map.zoom_by(ZOOM_STEP)),
        KeyCode::Char('-') => app.with_map(|map| map.zoom_by(ZOOM_STEP.recip())),
        KeyCode::Char('0') => app.with_map(|map| map.reset_camera()),
        KeyCode::Char('a') => app.with_map(|map| map.pan_by(-PAN_STEP, 0.0)),
        KeyCode::Char('d') => app.with_map(|map| map.pan_by(PAN_STEP, 0.0)),
        KeyCode::Char('w') => app.with_map(|map| map.pan_by(0.0, PAN_STEP)),
        KeyCode::Char('s') => app.with_map(|map| map.pan_by(0.0, -PAN_STEP)),
        _ => {}
    }
}

/// Live fuzzy search: every keystroke narrows the list and the map.
pub fn handle_search_input(app: &mut App, key: KeyCode) {
    let Some(input) = app.search_input.as_mut() else {
        return;
    };
    match key {
        KeyCode::Char(ch) => input.push(ch),
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Enter => {
            app.search_input = None;
            return;
        }
        KeyCode::Esc => {
            app.search_input = None;
            app.heritage_filter.set_query("");
            app.site_cursor = 0;
            return;
        }
        _ => return,
    }
    let query = input.clone();
    app.heritage_filter.set_query(&query);
    app.site_cursor = 0;
}

pub fn handle_heritage_mouse(app: &mut App, mouse: MouseEvent) {
    let point = map_point(app, mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(point) = point {
                app.click_marker(point);
            }
        }
        MouseEventKind::Moved => app.hover_marker(point),
        _ => {}
    }
}

fn map_point(app: &App, column: u16, row: u16) -> Option<LngLat> {
    let area = app.map_area.get()?;
    let camera = app
        .map
        .as_ref()
        .and_then(MapSyncAdapter::widget)
        .map(|widget| widget.camera())?;
    let (x_bounds, y_bounds) = camera.bounds();
    cell_to_canvas(area, x_bounds, y_bounds, column, row).map(|(lng, lat)| LngLat::new(lng, lat))
}
