use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{Modal, centered, format_timestamp};
use crate::api::EmailRecord;
use crate::config::ThemeConfig;

/// Label/value pairs shown in the detail popup
pub fn detail_fields(record: &EmailRecord) -> Vec<(&'static str, String)> {
    vec![
        ("ID", record.id.to_string()),
        ("Sender", record.sender_email.clone()),
        ("Receiver", record.receiver_email.clone()),
        ("First name", record.first_name.clone()),
        ("Company", record.company.clone()),
        ("Status", record.status.clone()),
        ("Status message", record.status_message.clone()),
        ("Sent at", format_timestamp(&record.sent_at)),
        ("Created at", format_timestamp(&record.created_at)),
        ("Responds", record.responds.clone()),
        ("Subject", record.subject_display().to_string()),
    ]
}

pub fn render_detail(f: &mut Frame, area: Rect, record: &EmailRecord, theme: &ThemeConfig) {
    let inner = Modal::new(" Record ", theme).open(f, centered(area, 90, 30));

    let label = Style::default().fg(theme.fg_muted());
    let value = Style::default().fg(theme.fg());

    let mut lines: Vec<Line> = detail_fields(record)
        .into_iter()
        .map(|(name, v)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", name), label),
                Span::styled(v, value),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Body",
        label.add_modifier(Modifier::BOLD),
    )));
    lines.extend(
        record
            .body_display()
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), value))),
    );

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
