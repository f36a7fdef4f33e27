use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::Mode;
use crate::config::ThemeConfig;

fn hints(mode: Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Browse => &[
            ("j/k", "row"),
            ("h/l", "page"),
            ("s", "rows/page"),
            ("f", "responds"),
            ("d", "date"),
            ("[/]", "day"),
            ("t", "today"),
            ("b", "body"),
            ("Enter", "details"),
            ("R", "reload"),
            ("q", "quit"),
        ],
        Mode::DateInput => &[("Enter", "apply"), ("Esc", "cancel"), ("YYYY-MM-DD", "")],
        Mode::Detail => &[("Esc/Enter", "close"), ("q", "close")],
    }
}

pub fn render_help(f: &mut Frame, area: Rect, mode: Mode, base_url: &str, theme: &ThemeConfig) {
    let key_style = Style::default().fg(theme.primary());
    let text_style = Style::default().fg(theme.fg_subtle());

    let mut spans = Vec::new();
    for (key, text) in hints(mode) {
        spans.push(Span::styled(*key, key_style));
        if !text.is_empty() {
            spans.push(Span::styled(format!(" {}", text), text_style));
        }
        spans.push(Span::raw("  "));
    }

    spans.push(Span::styled("│  ", Style::default().fg(theme.border())));
    spans.push(Span::styled(base_url.to_string(), Style::default().fg(theme.fg_muted())));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg_panel()));
    f.render_widget(paragraph, area);
}
