use lions_essays::domain::{Category, Region};
use lions_essays::filter::FilterState;
use ratatui::layout::{Margin, Rect};

pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Steps the category filter through every category and back to "all".
pub fn cycle_category(filter: &mut FilterState) {
    let next = match filter.active_category() {
        None => Category::ALL.first().copied(),
        Some(active) => {
            let position = Category::ALL.iter().position(|c| *c == active).unwrap_or(0);
            Category::ALL.get(position + 1).copied()
        }
    };
    match (next, filter.active_category()) {
        (Some(category), _) => filter.toggle_category(category),
        (None, Some(active)) => filter.toggle_category(active),
        (None, None) => {}
    }
}

pub fn cycle_region(filter: &mut FilterState) {
    let next = match filter.active_region() {
        None => Region::ALL.first().copied(),
        Some(active) => {
            let position = Region::ALL.iter().position(|r| *r == active).unwrap_or(0);
            Region::ALL.get(position + 1).copied()
        }
    };
    match (next, filter.active_region()) {
        (Some(region), _) => filter.toggle_region(region),
        (None, Some(active)) => filter.toggle_region(active),
        (None, None) => {}
    }
}

/// Canvas coordinates of the centre of a terminal cell inside a bordered
/// canvas drawn over `area`.
pub fn cell_to_canvas(
    area: Rect,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    column: u16,
    row: u16,
) -> Option<(f64, f64)> {
    let inner = area.inner(Margin::new(1, 1));
    if inner.width == 0
        || inner.height == 0
        || column < inner.x
        || row < inner.y
        || column >= inner.x + inner.width
        || row >= inner.y + inner.height
    {
        return None;
    }
    let x_share = (f64::from(column - inner.x) + 0.5) / f64::from(inner.width);
    let y_share = (f64::from(row - inner.y) + 0.5) / f64::from(inner.height);
    Some((
        x_share.mul_add(x_bounds[1] - x_bounds[0], x_bounds[0]),
        (-y_share).mul_add(y_bounds[1] - y_bounds[0], y_bounds[1]),
    ))
}
