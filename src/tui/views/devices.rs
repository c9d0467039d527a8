//! Device table rendering.

use crate::tui::app::App;
use crate::Device;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

/// Glyph for a connected device.
pub const CONNECTED_SYMBOL: &str = "●";
/// Glyph for a paired but disconnected device.
pub const DISCONNECTED_SYMBOL: &str = "○";

const NAME_WIDTH: u16 = 24;
const TYPE_WIDTH: u16 = 14;
const BATTERY_BAR_CELLS: usize = 10;

const COLUMNS: [Constraint; 6] = [
    Constraint::Length(1),
    Constraint::Length(NAME_WIDTH),
    Constraint::Length(TYPE_WIDTH),
    Constraint::Length(17),
    Constraint::Length(8),
    Constraint::Min(16),
];

/// Renders the header row and the devices inside the viewport.
pub fn render_device_table(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(["", "NAME", "TYPE", "ADDRESS", "SIGNAL", "BATTERY"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    if app.devices().is_empty() {
        let [header_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        frame.render_widget(
            Table::new(Vec::<Row>::new(), COLUMNS).header(header),
            header_area,
        );
        frame.render_widget(
            Paragraph::new("  No devices found").style(Style::default().fg(Color::DarkGray)),
            body,
        );
        return;
    }

    let rows = app
        .visible_devices()
        .map(|(index, device)| device_row(device, index == app.cursor()));
    frame.render_widget(Table::new(rows, COLUMNS).header(header), area);
}

fn device_row(device: &Device, selected: bool) -> Row<'static> {
    let symbol = if device.connected {
        CONNECTED_SYMBOL
    } else {
        DISCONNECTED_SYMBOL
    };
    let category = device.category.as_deref().unwrap_or("-");

    let style = if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else if device.connected {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Row::new(vec![
        Cell::from(symbol),
        Cell::from(truncate(&device.name, usize::from(NAME_WIDTH))),
        Cell::from(truncate(category, usize::from(TYPE_WIDTH))),
        Cell::from(device.address.clone()),
        Cell::from(format_signal(device.rssi)),
        Cell::from(battery_line(device.battery)),
    ])
    .style(style)
}

/// Shortens `s` to at most `max` characters, marking the cut with `~`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('~');
    out
}

/// `-52 dBm`, or `-` when unknown.
pub fn format_signal(rssi: Option<i32>) -> String {
    match rssi {
        Some(dbm) => format!("{dbm} dBm"),
        None => "-".to_string(),
    }
}

/// Ten-cell bar such as `[██████░░░░]`.
pub fn battery_bar(level: u8) -> String {
    let filled = usize::from(level.min(100)) * BATTERY_BAR_CELLS / 100;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(BATTERY_BAR_CELLS - filled)
    )
}

/// Green above 60%, yellow from 20%, red below.
pub fn battery_color(level: u8) -> Color {
    if level > 60 {
        Color::Green
    } else if level >= 20 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn battery_line(battery: Option<u8>) -> Line<'static> {
    match battery {
        Some(level) => Line::from(vec![
            Span::styled(battery_bar(level), Style::default().fg(battery_color(level))),
            Span::raw(format!(" {level}%")),
        ]),
        None => Line::from("-"),
    }
}
