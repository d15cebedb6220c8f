use crate::app::App;
use crate::ui::screens::page::render_prose;
use crate::ui::widgets::arc_chart::{render_arc_chart, segment_color};
use lions_essays::content::exports::{share_percent, TITLE, UNIT};
use lions_essays::content::Essay;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

const LEDGER_BAR_WIDTH: f64 = 24.0;

pub fn render_section(app: &App, f: &mut Frame<'_>, index: usize, area: Rect) {
    match index {
        0 => render_prose(f, area, TITLE, Essay::Exports.prologue()),
        1 => render_wheel(app, f, area),
        2 => render_ledger(app, f, area),
        _ => render_prose(f, area, "Coda", Essay::Exports.coda()),
    }
}

fn render_wheel(app: &App, f: &mut Frame<'_>, area: Rect) {
    app.chart_area.set(None);
    if let Some(error) = &app.export_error {
        let paragraph = Paragraph::new(format!("Chart unavailable: {error}"))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Red));
        f.render_widget(paragraph, area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(area);

    render_arc_chart(
        f,
        layout[0],
        &app.export_arcs,
        app.export_layout.inner_radius,
        app.export_layout.max_outer_radius,
        app.export_hover,
    );
    app.chart_area.set(Some(layout[0]));

    render_segment_detail(app, f, layout[1]);
}

fn render_segment_detail(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Detail")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let total: f64 = app.export_segments.iter().map(|segment| segment.value).sum();
    let text = match app
        .export_hover
        .and_then(|index| app.export_segments.get(index).map(|segment| (index, segment)))
    {
        Some((index, segment)) => Text::from(vec![
            TextLine::from(Span::styled(
                segment.label.clone(),
                Style::default()
                    .fg(segment.color.parse::<Color>().unwrap_or(Color::White))
                    .add_modifier(Modifier::BOLD),
            )),
            TextLine::from(""),
            TextLine::from(format!("{:.0} {UNIT}", segment.value)),
            TextLine::from(format!(
                "{:.1}% of the total",
                share_percent(&app.export_segments, index).unwrap_or_default()
            )),
        ]),
        None => Text::from(vec![
            TextLine::from(Span::styled(
                format!("{total:.0} {UNIT}"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            TextLine::from(format!("across {} product families", app.export_segments.len())),
            TextLine::from(""),
            TextLine::from(Span::styled(
                "Use ← → or hover a wedge.",
                Style::default().fg(Color::Gray),
            )),
        ]),
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_ledger(app: &App, f: &mut Frame<'_>, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Product"),
        Cell::from(UNIT),
        Cell::from("Share"),
        Cell::from(""),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows = app
        .export_arcs
        .iter()
        .enumerate()
        .map(|(index, arc)| {
            let share = share_percent(&app.export_segments, index).unwrap_or_default();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let bar = "█".repeat((share / 100.0 * LEDGER_BAR_WIDTH).round() as usize);
            let style = if app.export_hover == Some(index) {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(arc.label.clone()),
                Cell::from(format!("{:>8.0}", arc.value)),
                Cell::from(format!("{share:>5.1}%")),
                Cell::from(Span::styled(bar, Style::default().fg(segment_color(arc)))),
            ])
            .style(style)
        })
        .collect::<Vec<_>>();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(34),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title("Ledger")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(table, area);
}
