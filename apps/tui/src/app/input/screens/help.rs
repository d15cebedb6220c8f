use crate::app::state::App;
use crossterm::event::KeyCode;

/// F1 or `?` toggles the help popup. While it is open every other key is
/// swallowed so the page underneath does not move.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    let search_open = app.search_input.is_some();
    match key {
        KeyCode::F(1) => app.show_help = !app.show_help,
        KeyCode::Char('?') if !search_open => app.show_help = !app.show_help,
        KeyCode::Esc | KeyCode::Char('q') if app.show_help => app.show_help = false,
        _ => return app.show_help,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use lions_essays::config::AppConfig;
    use lions_essays::content::Essay;

    fn app() -> App {
        App::new(AppConfig {
            start_essay: Essay::Rugs,
            ..AppConfig::default()
        })
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = app();
        assert!(!handle_help_toggle(&mut app, KeyCode::Down));
        assert!(handle_help_toggle(&mut app, KeyCode::Char('?')));
        assert!(app.show_help);
        assert!(handle_help_toggle(&mut app, KeyCode::Down));
        assert!(handle_help_toggle(&mut app, KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn question_mark_types_into_open_search() {
        let mut app = app();
        app.search_input = Some(String::new());
        assert!(!handle_help_toggle(&mut app, KeyCode::Char('?')));
        assert!(!app.show_help);
    }
}
