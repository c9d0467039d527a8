//! Viewport arithmetic for the device table.

/// Screen rows taken by everything except device rows: title, spacer, table
/// header, footer, message line, error line and key legend.
pub const CHROME_ROWS: u16 = 7;

/// Rows used when the terminal is too small to report a usable height.
pub const FALLBACK_ROWS: usize = 10;

/// Number of device rows that fit in a terminal `height` rows tall.
pub fn visible_rows(height: u16) -> usize {
    match height.checked_sub(CHROME_ROWS) {
        Some(rows) if rows > 0 => usize::from(rows),
        _ => FALLBACK_ROWS,
    }
}

/// Clamps `cursor` into `0..len`, or to 0 for an empty list.
pub fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// Returns the scroll offset that keeps `cursor` on screen.
///
/// The offset is first pulled back so the window never extends past the
/// end of a list that shrank, then moved the minimum distance needed for
/// `offset <= cursor < offset + visible`.
pub fn follow_cursor(cursor: usize, offset: usize, visible: usize, total: usize) -> usize {
    let visible = visible.max(1);
    let offset = offset.min(total.saturating_sub(visible));
    if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}
