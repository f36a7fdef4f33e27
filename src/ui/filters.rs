use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::ThemeConfig;
use crate::logs::{DATE_FORMAT, ListView};

/// Date, responds filter and record count above the table. `date_input` is
/// the in-progress text while the date is being edited.
pub fn render_filter_bar(
    f: &mut Frame,
    area: Rect,
    view: &ListView,
    date_input: Option<&str>,
    theme: &ThemeConfig,
) {
    let label = Style::default().fg(theme.fg_muted());
    let value = Style::default().fg(theme.fg()).add_modifier(Modifier::BOLD);
    let cursor = Style::default().fg(theme.primary());

    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(28)]).areas(area);

    let mut spans = vec![Span::styled("Date: ", label)];
    match date_input {
        Some(input) => {
            spans.push(Span::styled(input.to_string(), value));
            spans.push(Span::styled("_", cursor));
        }
        None => spans.push(Span::styled(
            view.date().format(DATE_FORMAT).to_string(),
            value,
        )),
    }
    spans.push(Span::raw("    "));
    spans.push(Span::styled("Responds: ", label));
    spans.push(Span::styled(view.responds_filter().label(), value));
    f.render_widget(Paragraph::new(Line::from(spans)), left);

    let total = Line::from(vec![
        Span::styled("Total Records: ", label),
        Span::styled(view.total_records().to_string(), value),
    ]);
    f.render_widget(Paragraph::new(total).alignment(Alignment::Right), right);
}
