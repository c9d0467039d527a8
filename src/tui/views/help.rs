//! Key legend rendering: the one-line summary and the full help screen.

use crate::tui::event::{FULL_HELP, SHORT_HELP};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SEPARATOR: &str = " • ";

/// Dismissal hint at the bottom of the help screen.
pub const DISMISS_HINT: &str = "Press any key to return";

/// `k/up up • j/down down • ...` built from [`SHORT_HELP`].
pub fn short_help_line() -> Line<'static> {
    legend_line(SHORT_HELP)
}

/// Renders every binding, one group per line, followed by the dismissal hint.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = FULL_HELP.iter().map(|group| legend_line(group)).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        DISMISS_HINT,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(lines), area);
}

fn legend_line(entries: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::with_capacity(entries.len() * 4);
    for (i, (key, desc)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, desc_style));
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(" ", desc_style));
        spans.push(Span::styled(*desc, desc_style));
    }
    Line::from(spans)
}
