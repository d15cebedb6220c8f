use crate::app::App;
use crate::ui::screens::page::render_prose;
use crate::ui::widgets::charts::{region_color, render_knot_barchart};
use crate::ui::widgets::chips::region_chips;
use crate::ui::widgets::tables::scroll_offset;
use lions_essays::content::rugs::{RugTradition, RUGS};
use lions_essays::content::Essay;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render_section(app: &App, f: &mut Frame<'_>, index: usize, area: Rect) {
    match index {
        0 => render_prose(f, area, "Prologue", Essay::Rugs.prologue()),
        1 => {
            let rugs = visible_rugs(app);
            render_knot_barchart(f, area, &rugs, Some(app.rug_cursor));
        }
        2 => render_traditions(app, f, area),
        _ => render_prose(f, area, "Coda", Essay::Rugs.coda()),
    }
}

fn visible_rugs(app: &App) -> Vec<&'static RugTradition> {
    app.visible_rugs().into_iter().map(|index| &RUGS[index]).collect()
}

fn render_traditions(app: &App, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);
    f.render_widget(Paragraph::new(region_chips(&app.rug_filter)), layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(layout[1]);

    let rugs = visible_rugs(app);
    render_rug_table(app, f, body[0], &rugs);
    render_rug_card(f, body[1], rugs.get(app.rug_cursor).copied());
}

fn render_rug_table(app: &App, f: &mut Frame<'_>, area: Rect, rugs: &[&RugTradition]) {
    let block = Block::default()
        .title(format!("Traditions ({} of {})", rugs.len(), RUGS.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if rugs.is_empty() {
        let paragraph = Paragraph::new("No tradition in this region.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![Cell::from("Name"), Cell::from("Region"), Cell::from("Knots")])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let max_visible_rows = usize::from(area.height.saturating_sub(3));
    let offset = scroll_offset(rugs.len(), max_visible_rows, app.rug_cursor);

    let rows = rugs
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(position, rug)| {
            let style = if position == app.rug_cursor {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(region_color(rug))
            };
            let knots = if rug.knot_density == 0 {
                "flat".to_string()
            } else {
                rug.knot_density.to_string()
            };
            Row::new(vec![
                Cell::from(rug.name),
                Cell::from(rug.region.label()),
                Cell::from(knots),
            ])
            .style(style)
        })
        .collect::<Vec<_>>();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}

fn render_rug_card(f: &mut Frame<'_>, area: Rect, rug: Option<&RugTradition>) {
    let block = Block::default()
        .title("Card")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let Some(rug) = rug else {
        f.render_widget(block, area);
        return;
    };

    let text = Text::from(vec![
        TextLine::from(Span::styled(
            rug.name,
            Style::default()
                .fg(region_color(rug))
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(rug.makers, Style::default().fg(Color::Gray))),
        TextLine::from(format!("Palette: {}", rug.palette.join(", "))),
        TextLine::from(""),
        TextLine::from(rug.description),
    ]);

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
