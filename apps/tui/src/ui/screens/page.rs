use crate::app::App;
use crate::ui::screens::{exports, heritage, rugs};
use lions_essays::content::{Essay, Section};
use lions_essays::reveal::RowSpan;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};
use ratatui::Frame;
use tachyonfx::EffectRenderer;

/// Draws the slice of the current essay that falls inside `area`. Sections
/// that have not been revealed yet show only their frame.
pub fn render_page(app: &App, f: &mut Frame<'_>, area: Rect) {
    let essay = app.essay;
    let page = app.page();
    let viewport = RowSpan::new(u32::from(page.scroll), u32::from(area.height));
    let content = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };

    for (index, (section, span)) in essay
        .sections()
        .iter()
        .zip(essay.section_spans())
        .enumerate()
    {
        let Some(rect) = section_rect(span, viewport, content) else {
            continue;
        };

        if page.is_revealed(index) {
            render_section(app, f, essay, index, rect);
        } else {
            render_placeholder(f, section, rect);
        }

        if let Ok(mut effects) = app.reveal_fx.lock() {
            for fx in effects
                .iter_mut()
                .filter(|fx| fx.essay == essay && fx.section == index)
            {
                f.buffer_mut().render_effect(&mut fx.effect, rect, app.last_tick);
            }
        }
    }

    let mut scrollbar_state = ScrollbarState::new(essay.page_rows() as usize)
        .viewport_content_length(usize::from(area.height))
        .position(usize::from(page.scroll));
    f.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area.inner(Margin::new(0, 1)),
        &mut scrollbar_state,
    );
}

/// Screen rows of `span` that fall inside `viewport`, placed in `area`.
pub fn section_rect(span: RowSpan, viewport: RowSpan, area: Rect) -> Option<Rect> {
    let top = span.start.max(viewport.start);
    let bottom = span.end().min(viewport.end());
    if bottom <= top {
        return None;
    }
    let y = area.y.checked_add(u16::try_from(top - viewport.start).ok()?)?;
    let height = u16::try_from(bottom - top).ok()?;
    Some(Rect {
        x: area.x,
        y,
        width: area.width,
        height: height.min(area.height),
    })
}

fn render_section(app: &App, f: &mut Frame<'_>, essay: Essay, index: usize, area: Rect) {
    match essay {
        Essay::Heritage => heritage::render_section(app, f, index, area),
        Essay::Exports => exports::render_section(app, f, index, area),
        Essay::Rugs => rugs::render_section(app, f, index, area),
    }
}

fn render_placeholder(f: &mut Frame<'_>, section: &Section, area: Rect) {
    let block = Block::default()
        .title(section.title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title_style(Style::default().fg(Color::DarkGray));
    f.render_widget(block, area);
}

pub fn render_prose(f: &mut Frame<'_>, area: Rect, title: &str, text: &str) {
    let block = Block::default()
        .title(title.to_string())
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let paragraph = Paragraph::new(text.to_string())
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area.inner(Margin::new(1, 0)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_rect_clips_to_viewport() {
        let area = Rect::new(2, 4, 40, 10);
        let viewport = RowSpan::new(5, 10);

        let partly_above = section_rect(RowSpan::new(0, 8), viewport, area).unwrap();
        assert_eq!((partly_above.y, partly_above.height), (4, 3));

        let inside = section_rect(RowSpan::new(8, 4), viewport, area).unwrap();
        assert_eq!((inside.y, inside.height), (7, 4));

        let partly_below = section_rect(RowSpan::new(12, 20), viewport, area).unwrap();
        assert_eq!((partly_below.y, partly_below.height), (11, 3));

        assert_eq!(section_rect(RowSpan::new(15, 3), viewport, area), None);
    }
}
