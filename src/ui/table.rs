use chrono::{DateTime, Local, NaiveDateTime};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use super::Pane;
use crate::api::EmailRecord;
use crate::app::TableGeometry;
use crate::config::{LayoutConfig, ThemeConfig};

pub const COLUMNS: [&str; 7] = [
    "Sender Mail",
    "Receiver Mail",
    "Status",
    "Sent At",
    "Responds",
    "Sub",
    "Body",
];

const COLUMN_SPACING: u16 = 1;

fn column_widths(layout: &LayoutConfig) -> [Constraint; 7] {
    [
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(23),
        Constraint::Length(15),
        Constraint::Length(layout.subject_width),
        Constraint::Length(layout.body_width),
    ]
}

/// Render the records table. Returns where the rows and body column ended
/// up so mouse hover can be mapped back to a record.
pub fn render_records(
    f: &mut Frame,
    area: Rect,
    records: &[&EmailRecord],
    state: &mut TableState,
    status: &str,
    theme: &ThemeConfig,
    layout: &LayoutConfig,
) -> TableGeometry {
    let widths = column_widths(layout);

    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c))).style(
        Style::default()
            .fg(theme.fg())
            .bg(theme.header_bg())
            .add_modifier(Modifier::BOLD),
    );

    let body_width = layout.body_width as usize;
    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let bg = if i % 2 == 0 { theme.bg() } else { theme.row_alt_bg() };
            Row::new(vec![
                Cell::from(r.sender_email.clone()),
                Cell::from(r.receiver_email.clone()),
                Cell::from(r.status.clone()),
                Cell::from(format_timestamp(&r.sent_at)),
                Cell::from(r.responds.clone()).style(responds_style(&r.responds, theme)),
                Cell::from(r.subject_display().to_string()),
                Cell::from(truncate(&single_line(r.body_display()), body_width)),
            ])
            .style(Style::default().fg(theme.fg_subtle()).bg(bg))
        })
        .collect();

    let block = Pane::new(" Email Logs ", theme).status(status).block();
    let inner = block.inner(area);

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Start)
        .row_highlight_style(
            Style::default()
                .bg(theme.selected_bg())
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(table, area, state);

    let columns = Layout::horizontal(widths)
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .split(inner);
    let body = columns[COLUMNS.len() - 1];

    TableGeometry {
        first_row_y: inner.y + 1,
        visible_rows: inner.height.saturating_sub(1),
        body_x: body.x,
        body_width: body.width,
    }
}

fn responds_style(responds: &str, theme: &ThemeConfig) -> Style {
    match responds {
        "Responds" => Style::default().fg(theme.success()),
        "Unsubscribed" => Style::default().fg(theme.error()),
        _ => Style::default(),
    }
}

fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn truncate(s: &str, max: usize) -> String {
    if max < 4 {
        return s.chars().take(max).collect();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a send timestamp as local time, e.g. "6/1/2025, 9:30:00 AM".
/// RFC 3339 values are converted to the local zone; naive values are shown
/// as-is. Anything unparseable is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format(DISPLAY).to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn record(id: i64, body: Option<&str>) -> EmailRecord {
        EmailRecord {
            id,
            sender_email: "ops@acme.io".to_string(),
            receiver_email: format!("lead{}@client.io", id),
            status: "sent".to_string(),
            sent_at: "2025-06-01 09:30:00".to_string(),
            responds: "Responds".to_string(),
            body: body.map(str::to_string),
            ..Default::default()
        }
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn naive_timestamp_formats_like_locale_string() {
        assert_eq!(format_timestamp("2025-06-01 09:30:00"), "6/1/2025, 9:30:00 AM");
        assert_eq!(format_timestamp("2025-06-01T21:05:09"), "6/1/2025, 9:05:09 PM");
        assert_eq!(format_timestamp("not a date"), "not a date");
    }

    #[test]
    fn renders_headers_and_placeholders() {
        let records = [record(1, None), record(2, Some("a very long body that will not fit"))];
        let refs: Vec<&EmailRecord> = records.iter().collect();
        let mut terminal = Terminal::new(TestBackend::new(180, 8)).unwrap();
        let mut state = TableState::default();
        let theme = ThemeConfig::default();
        let layout = LayoutConfig {
            body_width: 12,
            ..LayoutConfig::default()
        };

        let mut geometry = TableGeometry::default();
        terminal
            .draw(|f| {
                geometry =
                    render_records(f, f.area(), &refs, &mut state, " Logs ", &theme, &layout);
            })
            .unwrap();

        let text = screen(&terminal);
        for column in COLUMNS {
            assert!(text.contains(column), "missing column {column}");
        }
        assert!(text.contains("N/A"));
        assert!(text.contains("a very lo..."));
        assert!(!text.contains("will not fit"));

        assert_eq!(geometry.first_row_y, 2);
        assert_eq!(geometry.visible_rows, 5);
        assert_eq!(geometry.body_width, 12);
        assert_eq!(geometry.body_x + geometry.body_width, 179);
    }
}
