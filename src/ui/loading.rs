use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::{Modal, centered};
use crate::config::ThemeConfig;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

/// Spinner popup shown over the table while a page is being fetched
pub fn render_loading(f: &mut Frame, area: Rect, tick: usize, message: &str, theme: &ThemeConfig) {
    let inner = Modal::new(" Loading ", theme).open(f, centered(area, 44, 5));
    let [spinner, text] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

    f.render_widget(
        Paragraph::new(Line::styled(
            spinner_frame(tick),
            Style::default().fg(theme.primary()),
        ))
        .centered(),
        spinner,
    );
    f.render_widget(
        Paragraph::new(Line::styled(message, Style::default().fg(theme.fg_muted()))).centered(),
        text,
    );
}
