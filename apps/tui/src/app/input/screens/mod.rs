use crate::app::state::App;
use crossterm::event::{KeyCode, MouseEvent, MouseEventKind};
use lions_essays::content::Essay;

mod exports;
mod help;
mod heritage;
mod rugs;

const SCROLL_STEP: i32 = 3;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    // The search prompt owns the keyboard until it closes.
    if app.search_input.is_some() {
        heritage::handle_search_input(app, key);
        return;
    }

    if handle_page_input(app, key) {
        return;
    }

    match app.essay {
        Essay::Heritage => heritage::handle_heritage_input(app, key),
        Essay::Exports => exports::handle_exports_input(app, key),
        Essay::Rugs => rugs::handle_rugs_input(app, key),
    }
}

pub fn dispatch_mouse(app: &mut App, mouse: MouseEvent) {
    if app.show_help {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollDown => return app.scroll_by(1),
        MouseEventKind::ScrollUp => return app.scroll_by(-1),
        _ => {}
    }
    match app.essay {
        Essay::Heritage => heritage::handle_heritage_mouse(app, mouse),
        Essay::Exports => exports::handle_exports_mouse(app, mouse),
        Essay::Rugs => {}
    }
}

/// Keys shared by every essay page. Returns `true` when consumed.
fn handle_page_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Tab => app.next_essay(),
        KeyCode::BackTab => app.previous_essay(),
        KeyCode::Char(digit @ '1'..='3') => {
            let index = (digit as usize) - ('1' as usize);
            if let Some(essay) = Essay::from_index(index) {
                app.switch_essay(essay);
            }
        }
        KeyCode::PageDown | KeyCode::Char('j') => app.scroll_by(SCROLL_STEP),
        KeyCode::PageUp | KeyCode::Char('k') => app.scroll_by(-SCROLL_STEP),
        KeyCode::Home => app.scroll_to_top(),
        _ => return false,
    }
    true
}
