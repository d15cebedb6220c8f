use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const SHORTCUTS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "Next / previous essay"),
    ("1 2 3", "Jump to an essay"),
    ("j k / PgDn PgUp", "Scroll the page"),
    ("Home", "Back to the top"),
    ("↑ ↓", "Move through the site or rug list"),
    ("Enter", "Select the site under the cursor and fly to it"),
    ("c / r", "Cycle the category / region filter"),
    ("/", "Search sites by name or city"),
    ("x", "Clear every filter"),
    ("+ - 0", "Zoom the map in, out, or back home"),
    ("w a s d", "Pan the map"),
    ("← →", "Step through export segments"),
    ("Mouse", "Click a marker to select, hover to highlight"),
    ("F1 / ? / Esc", "Toggle or close this help"),
    ("q", "Close this help, otherwise quit"),
];

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(70, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(Span::styled(
            "Dancing with Lions",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Three visual essays on the Maghreb. Sections fade in as you scroll to them.",
        ),
        TextLine::from(""),
    ];

    lines.extend(SHORTCUTS.iter().map(|(keys, action)| {
        TextLine::from(vec![
            Span::styled(
                format!("  {keys:<18}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(*action),
        ])
    }));

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        "CLI Options:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let help_text = crate::cli::CliArgs::help_text();
    lines.extend(
        help_text
            .lines()
            .filter(|line| {
                !(line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty())
            })
            .map(|line| TextLine::from(line.to_string())),
    );

    lines
}
