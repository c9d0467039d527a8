//! Shared test utilities for TUI testing with ratatui TestBackend.

use crate::tui::app::App;
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    (0..buffer.area().height).find(|row| row_contains(buffer, *row, text))
}

/// Column of the first occurrence of `text` in `row`.
///
/// Counts characters rather than bytes so rows containing `●` or `█` map
/// back to buffer cells.
fn column_of(buffer: &Buffer, row: u16, text: &str) -> u16 {
    let row_string = row_text(buffer, row);
    let byte = row_string
        .find(text)
        .unwrap_or_else(|| panic!("text '{}' not found in row {}: '{}'", text, row, row_string));
    row_string[..byte].chars().count() as u16
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// Asserts that the cell at (col, row) has the specified background color.
pub fn assert_bg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.bg, color,
        "expected bg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.bg
    );
}

/// Checks the foreground color of the first character of `text` in `row`.
pub fn assert_text_fg_in_row(buffer: &Buffer, row: u16, text: &str, color: Color) {
    assert_fg_color(buffer, column_of(buffer, row, text), row, color);
}

/// Checks the background color of the first character of `text` in `row`.
pub fn assert_text_bg_in_row(buffer: &Buffer, row: u16, text: &str, color: Color) {
    assert_bg_color(buffer, column_of(buffer, row, text), row, color);
}

/// Renders the full dashboard to a buffer for inspection.
pub fn render_dashboard_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| crate::tui::ui::render_dashboard(frame, app))
        .expect("draw failed");
    terminal.backend().buffer().clone()
}
