//! Top-level rendering for the dashboard.
//!
//! Composes the title, device table, footer and message lines. The row
//! budget here must match [`viewport::CHROME_ROWS`](crate::tui::viewport::CHROME_ROWS).

use crate::tui::app::{App, Mode};
use crate::tui::views::devices::render_device_table;
use crate::tui::views::help::{render_help, short_help_line};
use crate::connected_count;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Name shown in the title bar.
const TITLE_TEXT: &str = "bluetooth-console";

/// Version string shown after the title.
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Renders the whole screen from `app`. Never mutates state.
pub fn render_dashboard(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if matches!(app.mode(), Mode::HelpShown) {
        let [title, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        render_title(frame, title, app);
        render_help(frame, body);
        return;
    }

    let [title, _spacer, table, footer, message, error, keys] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_title(frame, title, app);
    render_device_table(frame, table, app);
    render_footer(frame, footer, app);

    if let Some(action) = app.pending_action() {
        let prompt = Paragraph::new(action.prompt()).style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(prompt, message);
        return;
    }

    if let Some(status) = app.status_message() {
        let color = if status.is_error() {
            Color::Red
        } else {
            Color::Cyan
        };
        frame.render_widget(
            Paragraph::new(status.text()).style(Style::default().fg(color)),
            message,
        );
    }

    if let Some(err) = app.last_error() {
        frame.render_widget(
            Paragraph::new(format!("Error: {err}")).style(Style::default().fg(Color::Red)),
            error,
        );
    }

    frame.render_widget(Paragraph::new(short_help_line()), keys);
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!("{TITLE_TEXT} {VERSION_TEXT}"),
        Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
    )];
    if !app.helper_available() {
        spans.push(Span::styled(
            format!(" [{} not installed]", app.helper()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let devices = app.devices();
    if devices.is_empty() {
        return;
    }
    let text = format!(
        "  {} devices ({} connected)",
        devices.len(),
        connected_count(devices)
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
