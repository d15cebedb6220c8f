//! One-line chip rows describing the active filter axes.

use lions_essays::domain::{Category, Region};
use lions_essays::filter::FilterState;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

fn chip(label: &'static str, active: bool) -> Span<'static> {
    if active {
        Span::styled(
            format!(" {label} "),
            Style::default()
                .bg(Color::Rgb(0, 0, 238))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {label} "), Style::default().fg(Color::Gray))
    }
}

fn chip_row(
    heading: &'static str,
    key: &'static str,
    all_active: bool,
    chips: impl Iterator<Item = Span<'static>>,
) -> TextLine<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{heading:<9}"),
            Style::default().fg(Color::Yellow),
        ),
        chip("All", all_active),
    ];
    spans.extend(chips);
    spans.push(Span::styled(format!("  [{key}]"), Style::default().fg(Color::DarkGray)));
    TextLine::from(spans)
}

pub fn category_chips(filter: &FilterState) -> TextLine<'static> {
    let active = filter.active_category();
    chip_row(
        "Category",
        "c",
        active.is_none(),
        Category::ALL
            .iter()
            .map(move |category| chip(category.label(), active == Some(*category))),
    )
}

pub fn region_chips(filter: &FilterState) -> TextLine<'static> {
    let active = filter.active_region();
    chip_row(
        "Region",
        "r",
        active.is_none(),
        Region::ALL
            .iter()
            .map(move |region| chip(region.label(), active == Some(*region))),
    )
}

pub fn query_line(filter: &FilterState) -> TextLine<'static> {
    let query = filter.query().map_or_else(
        || Span::styled(" any ", Style::default().fg(Color::Gray)),
        |query| {
            Span::styled(
                format!(" \"{query}\" "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        },
    );
    TextLine::from(vec![
        Span::styled(format!("{:<9}", "Search"), Style::default().fg(Color::Yellow)),
        query,
        Span::styled("  [/]", Style::default().fg(Color::DarkGray)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &TextLine<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn active_chip_is_highlighted() {
        let mut filter = FilterState::new();
        filter.toggle_region(Region::Egypt);
        let line = region_chips(&filter);
        let egypt = line
            .spans
            .iter()
            .find(|span| span.content.trim() == "Egypt")
            .unwrap();
        assert_eq!(egypt.style.bg, Some(Color::Rgb(0, 0, 238)));
        let all = line.spans.iter().find(|span| span.content.trim() == "All").unwrap();
        assert_eq!(all.style.bg, None);
    }

    #[test]
    fn query_line_shows_the_query() {
        let mut filter = FilterState::new();
        assert!(text(&query_line(&filter)).contains("any"));
        filter.set_query("fez");
        assert!(text(&query_line(&filter)).contains("\"fez\""));
    }
}
