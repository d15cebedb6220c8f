use crate::app::App;
use lions_essays::content::Essay;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let line = if let Some(input) = &app.search_input {
        TextLine::from(vec![
            Span::styled(
                "Search: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{input}_")),
            Span::styled("  (Enter keep, Esc clear)", Style::default().fg(Color::Gray)),
        ])
    } else if app.status_message.is_empty() {
        shortcuts_line(app.essay)
    } else {
        let style = if app.status_message.starts_with("Map unavailable") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        TextLine::from(Span::styled(app.status_message.clone(), style))
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn shortcuts_line(essay: Essay) -> TextLine<'static> {
    let page_keys = match essay {
        Essay::Heritage => "↑↓ site  Enter select  c/r filter  / search  +/- zoom",
        Essay::Exports => "←→ segment  Esc clear",
        Essay::Rugs => "↑↓ rug  r region  x clear",
    };
    TextLine::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" essay  "),
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(" scroll  "),
        Span::styled(page_keys, Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled("F1", Style::default().fg(Color::Yellow)),
        Span::raw(" help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ])
}
