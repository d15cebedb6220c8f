use crate::app::App;
use crate::ui::screens::page::render_prose;
use crate::ui::widgets::chips::{category_chips, query_line, region_chips};
use crate::ui::widgets::tables::scroll_offset;
use lions_essays::content::heritage::{Site, SITES};
use lions_essays::content::Essay;
use lions_essays::map::{MapPhase, MapSyncAdapter};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn render_section(app: &App, f: &mut Frame<'_>, index: usize, area: Rect) {
    match index {
        0 => render_prose(f, area, "Prologue", Essay::Heritage.prologue()),
        1 => render_map_section(app, f, area),
        2 => render_site_list(app, f, area),
        _ => render_prose(f, area, "Coda", Essay::Heritage.coda()),
    }
}

fn render_map_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let filter = &app.heritage_filter;
    let chips = Paragraph::new(Text::from(vec![
        category_chips(filter),
        region_chips(filter),
        query_line(filter),
    ]));
    f.render_widget(chips, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(layout[1]);

    render_map(app, f, body[0]);
    render_site_details(app, f, body[1]);
}

fn render_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    app.map_area.set(None);
    let Some(map) = app.map.as_ref() else {
        render_map_fallback(f, area, "map released");
        return;
    };

    match map.phase() {
        MapPhase::Ready => {
            if let Some(widget) = map.widget() {
                let visible = app.visible_sites().len();
                widget.render(f, area, &format!("Map ({visible} of {})", SITES.len()));
                app.map_area.set(Some(area));
            }
        }
        MapPhase::Loading => render_map_loading(app, f, area),
        MapPhase::Uninitialized | MapPhase::Failed(_) | MapPhase::Destroyed => {
            let reason = map.unavailable_reason().unwrap_or_default();
            render_map_fallback(f, area, &reason);
        }
    }
}

fn render_map_loading(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Map")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let throbber = Throbber::default()
        .label("Loading basemap...")
        .style(Style::default().fg(Color::Gray))
        .throbber_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);
    let line = Rect {
        y: inner.y + inner.height / 2,
        height: 1.min(inner.height),
        ..inner
    };
    let mut state = app.throbber.clone();
    f.render_stateful_widget(throbber, line, &mut state);
}

/// Shown both when no credential is configured and when the widget failed
/// to load; the page stays fully usable without the map.
fn render_map_fallback(f: &mut Frame<'_>, area: Rect, reason: &str) {
    let block = Block::default()
        .title("Map unavailable")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = Text::from(vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            reason.to_string(),
            Style::default().fg(Color::Gray),
        )),
        TextLine::from(""),
        TextLine::from("Set MAP_ACCESS_TOKEN (or pass --map-token) to enable the map."),
        TextLine::from("Every site is still listed and filterable below."),
    ]);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_site_details(app: &App, f: &mut Frame<'_>, area: Rect) {
    let filter = &app.heritage_filter;
    let focus = filter
        .selected_index()
        .or_else(|| filter.hovered_index())
        .and_then(|index| SITES.get(index));

    let title = if filter.selected_index().is_some() {
        "Selected"
    } else {
        "Site"
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let Some(site) = focus else {
        let paragraph = Paragraph::new("Move through the list or click a marker.")
            .block(block)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    };

    // A ready map carries the popup bound to the selected marker.
    let popup = app
        .map
        .as_ref()
        .and_then(MapSyncAdapter::widget)
        .and_then(|widget| widget.active_popup())
        .filter(|(label, _)| *label == site.name)
        .map_or(site.description, |(_, text)| text);

    let paragraph = Paragraph::new(site_card(site, popup))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn site_card<'a>(site: &'a Site, description: &'a str) -> Text<'a> {
    let categories = site
        .categories
        .iter()
        .map(|category| category.label())
        .collect::<Vec<_>>()
        .join(", ");

    Text::from(vec![
        TextLine::from(Span::styled(
            site.name,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(format!("{}, {}", site.city, site.region.label())),
        TextLine::from(Span::styled(
            format!("Founded {} · {categories}", site.founded),
            Style::default().fg(Color::Gray),
        )),
        TextLine::from(""),
        TextLine::from(description),
    ])
}

fn render_site_list(app: &App, f: &mut Frame<'_>, area: Rect) {
    let visible = app.visible_sites();
    let block = Block::default()
        .title(format!("Sites ({} of {})", visible.len(), SITES.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if visible.is_empty() {
        let paragraph = Paragraph::new("No site matches these filters. Press x to clear them.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Name"),
        Cell::from("City"),
        Cell::from("Region"),
        Cell::from("Founded"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let max_visible_rows = usize::from(area.height.saturating_sub(3));
    let offset = scroll_offset(visible.len(), max_visible_rows, app.site_cursor);
    let filter = &app.heritage_filter;

    let rows = visible
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(position, index)| {
            let site = &SITES[*index];
            let style = if position == app.site_cursor {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if filter.is_selected(*index) { "●" } else { " " };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(site.name),
                Cell::from(site.city),
                Cell::from(site.region.label()),
                Cell::from(site.founded),
            ])
            .style(style)
        })
        .collect::<Vec<_>>();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Percentage(42),
            Constraint::Percentage(22),
            Constraint::Percentage(18),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use crate::app::{handle_input, App};
    use crate::ui::{page_viewport_rows, ui};
    use crossterm::event::KeyCode;
    use lions_essays::config::AppConfig;
    use lions_essays::content::heritage::SITES;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    const WIDTH: u16 = 120;
    const HEIGHT: u16 = 44;

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(terminal: &mut Terminal<TestBackend>, app: &App) -> String {
        terminal.draw(|f| ui(app, f)).unwrap();
        screen_text(terminal.backend().buffer())
    }

    #[test]
    fn page_without_token_shows_fallback_and_stays_interactive() {
        let mut app = App::new(AppConfig::default());
        app.viewport_rows = page_viewport_rows(Rect::new(0, 0, WIDTH, HEIGHT));
        app.update();
        assert!(app.page().is_revealed(1));

        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        let screen = draw(&mut terminal, &app);
        assert!(screen.contains("Map unavailable"));
        assert!(screen.contains("no map access token configured"));

        assert_eq!(app.visible_sites().len(), SITES.len());
        handle_input(&mut app, KeyCode::Char('r'));
        let by_region = app.visible_sites().len();
        assert!(by_region > 0 && by_region < SITES.len());
        handle_input(&mut app, KeyCode::Char('c'));
        let by_both = app.visible_sites().len();
        assert!(by_both > 0 && by_both < by_region);

        handle_input(&mut app, KeyCode::Down);
        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.heritage_filter.selected_index(), app.cursor_site());
        app.update();

        let screen = draw(&mut terminal, &app);
        assert!(screen.contains("Map unavailable"));
        assert!(app.running);
    }
}
