mod animation;
mod state;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use animation::fade_color;
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Circle, Line},
        Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table, Tabs, Wrap,
    },
    Frame, Terminal,
};
use ratzilla::event::KeyCode;
use ratzilla::{DomBackend, WebRenderer};
use state::{Dashboard, REGIONS};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

const EXPORT_URL: &str = "essays.json";
const FILL_STEP: f64 = 0.02;

#[derive(serde::Deserialize)]
struct EssaysExport {
    generated_at: String,
    essays: Vec<EssayHeader>,
    heritage: Vec<Site>,
    exports: ExportsPanel,
    rugs: Vec<Rug>,
}

#[derive(serde::Deserialize)]
struct EssayHeader {
    title: String,
    prologue: String,
}

#[derive(serde::Deserialize)]
#[allow(dead_code)]
struct Site {
    name: String,
    city: String,
    region: String,
    categories: Vec<String>,
    lat: f64,
    lng: f64,
    significance: u8,
    founded: String,
    description: String,
}

#[derive(serde::Deserialize)]
struct ExportsPanel {
    title: String,
    unit: String,
    layout: ArcLayout,
    arcs: Vec<ExportArc>,
}

#[derive(serde::Deserialize)]
#[allow(dead_code)]
struct ArcLayout {
    start_angle: f64,
    inner_radius: f64,
    max_outer_radius: f64,
    gap: f64,
}

#[derive(serde::Deserialize)]
#[allow(dead_code)]
struct ExportArc {
    label: String,
    color: String,
    value: f64,
    start_angle: f64,
    end_angle: f64,
    mid_angle: f64,
    outer_radius: f64,
    share_percent: f64,
    path: String,
}

#[derive(serde::Deserialize)]
#[allow(dead_code)]
struct Rug {
    name: String,
    makers: String,
    region: String,
    knot_density: u32,
    palette: Vec<String>,
    description: String,
}

fn main() -> io::Result<()> {
    let data = Rc::new(RefCell::new(None::<EssaysExport>));
    let dashboard = Rc::new(RefCell::new(Dashboard::new()));

    spawn_local(fetch_export(data.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let data = data.clone();
        let dashboard = dashboard.clone();
        move |event| {
            let arc_count = data
                .borrow()
                .as_ref()
                .map_or(0, |export| export.exports.arcs.len());
            let mut dashboard = dashboard.borrow_mut();
            match event.code {
                KeyCode::Left if dashboard.tab == 1 => dashboard.step_arc(false, arc_count),
                KeyCode::Right if dashboard.tab == 1 => dashboard.step_arc(true, arc_count),
                KeyCode::Left => dashboard.previous_tab(),
                KeyCode::Right | KeyCode::Tab => dashboard.next_tab(),
                KeyCode::Up => dashboard.scroll(false),
                KeyCode::Down => dashboard.scroll(true),
                KeyCode::Char('r') => dashboard.cycle_region(),
                KeyCode::Char(digit @ '1'..='3') => {
                    if let Some(tab) = digit.to_digit(10) {
                        dashboard.select_tab(tab as usize - 1);
                    }
                }
                _ => {}
            }
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title("Dancing with Lions")
            .title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        let data = data.borrow();
        if let Some(export) = data.as_ref() {
            let mut dashboard = dashboard.borrow_mut();
            if let Some(now) = now_seconds() {
                dashboard.tick(now);
            }
            render_dashboard(export, &dashboard, f, inner);
        } else {
            let paragraph = Paragraph::new(Text::from(TextLine::from(format!(
                "Loading {EXPORT_URL}..."
            ))))
            .alignment(Alignment::Center);
            f.render_widget(paragraph, inner);
        }
    });

    Ok(())
}

fn now_seconds() -> Option<f64> {
    let performance = web_sys::window()?.performance()?;
    Some(performance.now() / 1000.0)
}

fn render_dashboard(export: &EssaysExport, dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    render_tabs(export, dashboard.tab, f, layout[0]);
    render_header(export, dashboard, f, layout[1]);

    match dashboard.tab {
        0 => render_heritage(export, dashboard, f, layout[2]),
        1 => render_exports(export, dashboard, f, layout[2]),
        2 => render_rugs(export, dashboard, f, layout[2]),
        _ => {}
    }

    render_footer(export, dashboard, f, layout[3]);
}

fn render_tabs(export: &EssaysExport, tab: usize, f: &mut Frame<'_>, area: Rect) {
    let titles = export
        .essays
        .iter()
        .enumerate()
        .map(|(index, essay)| TextLine::from(format!("{} {}", index + 1, essay.title)))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(tab)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));
    f.render_widget(tabs, area);
}

fn render_header(export: &EssaysExport, dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let Some(essay) = export.essays.get(dashboard.tab) else {
        return;
    };
    let block = Block::default()
        .title(essay.title.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(fade_color(Color::Rgb(230, 190, 90), dashboard.fade())));

    let paragraph = Paragraph::new(essay.prologue.as_str())
        .block(block)
        .style(Style::default().fg(fade_color(Color::Rgb(235, 235, 235), dashboard.fade())))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_footer(export: &EssaysExport, dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let region = dashboard.region.map_or("all regions", region_label);
    let info = TextLine::from(vec![
        Span::styled("1-3/Tab", Style::default().fg(Color::Gray)),
        Span::raw(" essays  "),
        Span::styled("Arrows", Style::default().fg(Color::Gray)),
        Span::raw(" move  "),
        Span::styled("r", Style::default().fg(Color::Gray)),
        Span::raw(format!(" region: {region}  ")),
        Span::styled(
            format!("generated {}", export.generated_at),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(info).alignment(Alignment::Center), area);
}

fn render_heritage(export: &EssaysExport, dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let fade = dashboard.fade();
    let sites = export
        .heritage
        .iter()
        .filter(|site| dashboard.matches_region(&site.region))
        .collect::<Vec<_>>();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let chips = std::iter::once(None)
        .chain(REGIONS.iter().copied().map(Some))
        .flat_map(|region| {
            let active = region == dashboard.region;
            let label = region.map_or("All", region_label);
            let style = if active {
                Style::default()
                    .fg(Color::Black)
                    .bg(fade_color(Color::Rgb(230, 190, 90), fade))
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {label} "), style), Span::raw(" ")]
        })
        .collect::<Vec<_>>();
    f.render_widget(Paragraph::new(TextLine::from(chips)), layout[0]);

    let block = Block::default()
        .title(format!("Sites ({} of {})", sites.len(), export.heritage.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(fade_color(Color::Rgb(90, 170, 200), fade)));
    let visible_rows = usize::from(block.inner(layout[1]).height.saturating_sub(1)).max(1);
    let offset = dashboard
        .row_offset
        .min(sites.len().saturating_sub(visible_rows));

    let text = Style::default().fg(fade_color(Color::Rgb(235, 235, 235), fade));
    let rows = sites.iter().skip(offset).take(visible_rows).map(|site| {
        Row::new(vec![
            Cell::from(site.name.as_str()),
            Cell::from(site.city.as_str()),
            Cell::from(region_label(&site.region)),
            Cell::from(site.categories.join(", ")),
            Cell::from(site.founded.as_str()),
            Cell::from("★".repeat(usize::from(site.significance))),
        ])
        .style(text)
    });

    let header = Row::new(vec!["Site", "City", "Region", "Kind", "Founded", "Weight"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Percentage(18),
            Constraint::Percentage(9),
            Constraint::Percentage(11),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, layout[1]);

    if sites.len() > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(sites.len().saturating_sub(visible_rows)).position(offset);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(
            scrollbar,
            layout[1].inner(Margin::new(0, 1)),
            &mut scrollbar_state,
        );
    }
}

fn render_exports(export: &EssaysExport, dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let panel = &export.exports;
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_arc_chart(panel, dashboard, f, layout[0]);

    let fade = dashboard.fade();
    let rows = panel.arcs.iter().enumerate().map(|(index, arc)| {
        let color = fade_color(hex_color(&arc.color), fade);
        let style = if dashboard.hovered_arc == Some(index) {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(Span::styled("██", Style::default().fg(color))),
            Cell::from(arc.label.as_str()),
            Cell::from(format!("{:.0}", arc.value)),
            Cell::from(format!("{:.1}%", arc.share_percent)),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec!["", "Product", "Value", "Share"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .block(
        Block::default()
            .title(format!("Ledger ({})", panel.unit))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(table, layout[1]);
}

fn render_arc_chart(panel: &ExportsPanel, dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(panel.title.as_str())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Cells are about twice as tall as wide; widen the x range to stay round.
    let extent = panel.layout.max_outer_radius * 1.15;
    let aspect = f64::from(inner.width.max(1)) / (f64::from(inner.height.max(1)) * 2.0);
    let fade = dashboard.fade();
    // Wedges grow outwards while the panel fades in.
    let reach = 0.4f64.mul_add(fade, 0.6);
    let inner_radius = panel.layout.inner_radius;

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                for (index, arc) in panel.arcs.iter().enumerate() {
                    let base = match dashboard.hovered_arc {
                        Some(hovered) if hovered != index => Color::DarkGray,
                        _ => hex_color(&arc.color),
                    };
                    let color = fade_color(base, fade);
                    let outer = inner_radius + (arc.outer_radius - inner_radius) * reach;
                    let sweep = arc.end_angle - arc.start_angle;

                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let strokes = (sweep / FILL_STEP).ceil().max(1.0) as usize;
                    for stroke in 0..=strokes {
                        #[allow(clippy::cast_precision_loss)]
                        let angle = sweep.mul_add(stroke as f64 / strokes as f64, arc.start_angle);
                        let (cos, sin) = (angle.cos(), angle.sin());
                        ctx.draw(&Line {
                            x1: cos * inner_radius,
                            y1: -sin * inner_radius,
                            x2: cos * outer,
                            y2: -sin * outer,
                            color,
                        });
                    }
                }

                ctx.layer();
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: inner_radius,
                    color: Color::Gray,
                });

                if let Some(arc) = dashboard.hovered_arc.and_then(|index| panel.arcs.get(index)) {
                    let radius = arc.outer_radius * 1.08;
                    ctx.print(
                        arc.mid_angle.cos() * radius,
                        -arc.mid_angle.sin() * radius,
                        TextLine::from(Span::styled(
                            arc.label.clone(),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        )),
                    );
                }
            })
            .x_bounds([-extent * aspect.max(1.0), extent * aspect.max(1.0)])
            .y_bounds([-extent / aspect.min(1.0), extent / aspect.min(1.0)]),
        inner,
    );
}

fn render_rugs(export: &EssaysExport, dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let fade = dashboard.fade();
    let rugs = export
        .rugs
        .iter()
        .filter(|rug| dashboard.matches_region(&rug.region))
        .collect::<Vec<_>>();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let bars = rugs
        .iter()
        .map(|rug| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = (f64::from(rug.knot_density) * fade).round() as u64;
            Bar::default()
                .value(value)
                .text_value(rug.knot_density.to_string())
                .label(TextLine::from(short_label(&rug.name)))
                .style(Style::default().fg(fade_color(region_color(&rug.region), fade)))
        })
        .collect::<Vec<_>>();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Knots per square decimetre")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(2)
        .max(rugs.iter().map(|rug| u64::from(rug.knot_density)).max().unwrap_or(1));
    f.render_widget(chart, layout[0]);

    let text = Style::default().fg(fade_color(Color::Rgb(235, 235, 235), fade));
    let lines = rugs
        .iter()
        .skip(dashboard.row_offset.min(rugs.len().saturating_sub(1)))
        .flat_map(|rug| {
            [
                TextLine::from(vec![
                    Span::styled(
                        rug.name.as_str(),
                        Style::default()
                            .fg(fade_color(region_color(&rug.region), fade))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {} · {}", rug.makers, region_label(&rug.region)),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
                TextLine::from(Span::styled(rug.description.as_str(), text)),
            ]
        })
        .collect::<Vec<_>>();

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(format!("Traditions ({})", rugs.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, layout[1]);
}

fn short_label(name: &str) -> String {
    name.split_whitespace().next().unwrap_or(name).chars().take(7).collect()
}

fn region_label(region: &str) -> &'static str {
    match region {
        "morocco" => "Morocco",
        "algeria" => "Algeria",
        "tunisia" => "Tunisia",
        "egypt" => "Egypt",
        "spain" => "Al-Andalus",
        _ => "Elsewhere",
    }
}

fn region_color(region: &str) -> Color {
    match region {
        "morocco" => Color::Rgb(193, 68, 14),
        "algeria" => Color::Rgb(46, 139, 87),
        "tunisia" => Color::Rgb(70, 130, 180),
        "egypt" => Color::Rgb(218, 165, 32),
        "spain" => Color::Rgb(147, 112, 219),
        _ => Color::Gray,
    }
}

fn hex_color(hex: &str) -> Color {
    hex.parse::<Color>().unwrap_or(Color::Gray)
}

async fn fetch_export(store: Rc<RefCell<Option<EssaysExport>>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let Ok(request) = Request::new_with_str_and_init(EXPORT_URL, &opts) else {
        return;
    };

    let Ok(response_value) =
        wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request)).await
    else {
        web_sys::console::error_1(&format!("Failed to fetch {EXPORT_URL}").into());
        return;
    };

    let Ok(response) = response_value.dyn_into::<Response>() else {
        web_sys::console::error_1(&"Failed to read response".into());
        return;
    };

    let Ok(body) = response.json() else {
        web_sys::console::error_1(&format!("{EXPORT_URL} has no JSON body").into());
        return;
    };

    let Ok(json) = wasm_bindgen_futures::JsFuture::from(body).await else {
        web_sys::console::error_1(&format!("Failed to read {EXPORT_URL} body").into());
        return;
    };

    let data = match serde_wasm_bindgen::from_value::<EssaysExport>(json) {
        Ok(data) => data,
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to parse {EXPORT_URL}: {error}").into());
            return;
        }
    };

    *store.borrow_mut() = Some(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_json_deserializes() {
        let json = r##"{
            "generated_at": "2026-01-01T00:00:00+00:00",
            "essays": [{"id": "heritage", "title": "Stone & Faith", "prologue": "..."}],
            "heritage": [{
                "name": "Alhambra", "city": "Granada", "region": "spain",
                "categories": ["palace", "kasbah"], "lat": 37.1, "lng": -3.5,
                "significance": 5, "founded": "1238", "description": "Nasrid palace"
            }],
            "exports": {
                "title": "Harvest", "unit": "USD millions",
                "layout": {"start_angle": -1.57, "inner_radius": 90.0, "max_outer_radius": 320.0, "gap": 0.01},
                "segments": [],
                "arcs": [{
                    "label": "Citrus", "color": "#f4a259", "value": 720.0,
                    "start_angle": 0.0, "end_angle": 1.0, "mid_angle": 0.5,
                    "outer_radius": 200.0, "share_percent": 10.0, "path": "M 0 0"
                }]
            },
            "rugs": [{
                "name": "Beni Ourain", "makers": "Beni Ourain confederation", "region": "morocco",
                "knot_density": 40, "palette": ["ivory"], "description": "Deep pile"
            }]
        }"##;
        let export: EssaysExport = serde_json::from_str(json).unwrap();
        assert_eq!(export.heritage[0].region, "spain");
        assert_eq!(export.exports.arcs.len(), 1);
        assert_eq!(export.rugs[0].knot_density, 40);
    }

    #[test]
    fn labels_and_colors() {
        assert_eq!(region_label("spain"), "Al-Andalus");
        assert_eq!(hex_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(hex_color("nope"), Color::Gray);
        assert_eq!(short_label("Kairouan mergoum"), "Kairoua");
    }
}
