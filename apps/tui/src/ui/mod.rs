pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let layout = chrome_layout(f.area());

    screens::tabs::render_tabs(app, f, layout[0]);
    screens::page::render_page(app, f, layout[1]);
    screens::status::render_status(app, f, layout[2]);

    if app.show_help {
        screens::help::render_help_popup(f, layout[1]);
    }
}

fn chrome_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Essay page
            Constraint::Length(1), // Status / shortcuts
        ])
        .split(area.inner(Margin::new(1, 0)))
        .to_vec()
}

/// Rows available to the scrolled essay page in a terminal of this size.
pub fn page_viewport_rows(area: Rect) -> u16 {
    chrome_layout(area)[1].height
}
