use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use super::{
    render_detail, render_filter_bar, render_help, render_loading, render_pagination,
    render_records, render_toast, render_tooltip,
};
use crate::app::{App, Mode, TableGeometry};

pub const TITLE: &str = "Email Automation Summary";

/// Draw the whole dashboard and refresh the hit-test areas on `app`
pub fn render(app: &mut App, f: &mut Frame, tick: usize, base_url: &str) {
    let config = app.config.clone();
    let theme = &config.theme;

    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg())),
        f.area(),
    );

    let [title, filters, table, pagination, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    f.render_widget(
        Paragraph::new(TITLE)
            .style(
                Style::default()
                    .fg(theme.primary())
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center),
        title,
    );

    let date_input = (app.mode == Mode::DateInput).then_some(app.date_input.as_str());
    render_filter_bar(f, filters, &app.view, date_input, theme);

    if app.view.is_loading() {
        app.table_geometry = TableGeometry::default();
        app.page_targets.clear();
        render_loading(f, table, tick, "Fetching email logs...", theme);
    } else {
        let records = app.view.visible_records();
        let status = format!(
            " Page {} of {} ({} shown) ",
            app.view.page(),
            app.view.total_pages(),
            records.len()
        );
        app.table_geometry = render_records(
            f,
            table,
            &records,
            &mut app.table_state,
            &status,
            theme,
            &config.layout,
        );
        app.page_targets = render_pagination(f, pagination, &app.view, theme);
    }

    render_help(f, help, app.mode, base_url, theme);

    match app.mode {
        Mode::Detail => {
            if let Some(record) = app.selected_record() {
                render_detail(f, table, record, theme);
            }
        }
        _ => {
            if let Some(preview) = &app.hover {
                render_tooltip(f, preview, theme);
            }
        }
    }

    if let Some(toast) = &app.toast {
        render_toast(f, &toast.notification, theme);
    }
}
