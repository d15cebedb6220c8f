use lions_essays::content::rugs::RugTradition;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

const REGION_COLORS: [Color; 5] = [
    Color::Rgb(192, 57, 43),
    Color::Rgb(39, 174, 96),
    Color::Rgb(41, 128, 185),
    Color::Rgb(243, 156, 18),
    Color::Rgb(142, 68, 173),
];

pub fn region_color(rug: &RugTradition) -> Color {
    REGION_COLORS[rug.region as usize % REGION_COLORS.len()]
}

/// Knot density of each rug, the highlighted one drawn bold.
pub fn render_knot_barchart(
    f: &mut Frame<'_>,
    area: Rect,
    rugs: &[&RugTradition],
    highlighted: Option<usize>,
) {
    let block = Block::default()
        .title("Knots per dm²")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if rugs.is_empty() {
        let paragraph = Paragraph::new("No rugs in this region")
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar<'_>> = rugs
        .iter()
        .enumerate()
        .map(|(index, rug)| {
            let mut style = Style::default().fg(region_color(rug));
            if highlighted == Some(index) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Bar::default()
                .value(u64::from(rug.knot_density))
                .label(TextLine::from(rug.name))
                .style(style)
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = rugs
        .iter()
        .map(|rug| u64::from(rug.knot_density))
        .max()
        .unwrap_or(0)
        .max(1);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(9);

    f.render_widget(chart, area);
}
