/// First row to draw so that `selected_index` stays on screen when only
/// `max_visible_rows` of `total_rows` fit.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || max_visible_rows == 0 {
        return 0;
    }

    if selected_index >= max_visible_rows {
        let offset = selected_index + 1 - max_visible_rows;
        let last_page = total_rows - max_visible_rows;
        return if offset > last_page { last_page } else { offset };
    }

    0
}
