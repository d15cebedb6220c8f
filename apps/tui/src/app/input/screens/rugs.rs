use crate::app::input::helpers::{cycle_region, wrap_decrement, wrap_increment};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_rugs_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => {
            let visible = app.visible_rugs().len();
            app.rug_cursor = wrap_decrement(app.rug_cursor, visible);
        }
        KeyCode::Down => {
            let visible = app.visible_rugs().len();
            app.rug_cursor = wrap_increment(app.rug_cursor, visible);
        }
        KeyCode::Char('r') => {
            cycle_region(&mut app.rug_filter);
            app.rug_cursor = 0;
        }
        KeyCode::Char('x') | KeyCode::Esc => {
            app.rug_filter.reset();
            app.rug_cursor = 0;
        }
        _ => {}
    }
}
