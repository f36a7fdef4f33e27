use chrono::NaiveDate;
use ratatui::{layout::Rect, widgets::TableState};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::EmailRecord;
use crate::config::Config;
use crate::logs::{
    EmailLogSource, FetchEvent, FetchResult, FetchWorker, ListQuery, ListView, Notification,
    NotificationLevel, parse_date,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Browse,
    DateInput,
    Detail,
}

/// Clickable element of the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    Previous,
    Page(u32),
    Next,
}

/// Where the table's data rows and body column landed on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableGeometry {
    pub first_row_y: u16,
    pub visible_rows: u16,
    pub body_x: u16,
    pub body_width: u16,
}

/// Full body text shown next to the cell it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverPreview {
    pub content: String,
    pub anchor: Rect,
    pub row: usize,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

pub struct App {
    pub config: Arc<Config>,
    pub view: ListView,
    pub mode: Mode,
    pub table_state: TableState,
    pub should_quit: bool,
    pub toast: Option<Toast>,
    pub hover: Option<HoverPreview>,
    pub date_input: String,
    // Mouse tracking, refreshed on every render
    pub table_geometry: TableGeometry,
    pub page_targets: Vec<(Rect, PageTarget)>,
    worker: FetchWorker,
    last_requested: Option<ListQuery>,
    // Shown once the fetch it belongs to has started
    deferred_notice: Option<Notification>,
}

impl App {
    pub fn new(config: Arc<Config>, source: Arc<dyn EmailLogSource>, today: NaiveDate) -> Self {
        Self {
            config,
            view: ListView::new(today),
            mode: Mode::Browse,
            table_state: TableState::default(),
            should_quit: false,
            toast: None,
            hover: None,
            date_input: String::new(),
            table_geometry: TableGeometry::default(),
            page_targets: Vec::new(),
            worker: FetchWorker::new(source),
            last_requested: None,
            deferred_notice: None,
        }
    }

    /// Start a fetch if page, size or date changed since the last one
    pub fn sync_fetch(&mut self) -> bool {
        if self.last_requested == Some(self.view.query()) {
            return false;
        }
        self.begin_fetch();
        true
    }

    /// Re-issue the current query
    pub fn reload(&mut self) {
        self.begin_fetch();
    }

    fn begin_fetch(&mut self) {
        let query = self.view.query();
        self.view.apply(FetchEvent::Started);
        self.toast = None;
        self.hover = None;
        self.last_requested = Some(query);
        self.worker.spawn(query.to_request());
        if let Some(notice) = self.deferred_notice.take() {
            self.notify(notice);
        }
    }

    pub fn fetch_in_flight(&self) -> bool {
        self.worker.in_flight()
    }

    /// Apply any finished fetch. Returns true if state changed.
    pub fn poll_fetch(&mut self) -> bool {
        let mut changed = false;
        while let Some(result) = self.worker.try_next() {
            self.apply_result(result);
            changed = true;
        }
        changed
    }

    /// Block up to `timeout` for the outstanding fetch
    pub fn wait_for_fetch(&mut self, timeout: Duration) -> bool {
        match self.worker.next_timeout(timeout) {
            Some(result) => {
                self.apply_result(result);
                true
            }
            None => false,
        }
    }

    fn apply_result(&mut self, result: FetchResult) {
        let event = match result.outcome {
            Ok(data) => {
                tracing::info!(
                    "fetch #{} loaded {} records (page {}/{}, {} total)",
                    result.generation,
                    data.records.len(),
                    data.pagination.page,
                    data.pagination.total_pages,
                    data.pagination.total_records
                );
                FetchEvent::Succeeded(data)
            }
            Err(e) => {
                tracing::error!(
                    "Error fetching emails for {:?}: {}",
                    result.request,
                    e
                );
                FetchEvent::Failed(e.to_string())
            }
        };

        if let Some(notification) = self.view.apply(event) {
            self.notify(notification);
        }
        self.reset_selection();
    }

    /// Stop reacting to in-flight fetches. Results that arrive later are dropped.
    pub fn teardown(&mut self) {
        self.worker.cancel();
    }

    pub fn notify(&mut self, notification: Notification) {
        self.toast = Some(Toast {
            notification,
            shown_at: Instant::now(),
        });
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Drop the toast once it has been up long enough
    pub fn expire_toast(&mut self, now: Instant) {
        let ttl = Duration::from_secs(self.config.layout.toast_secs);
        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.duration_since(t.shown_at) >= ttl)
        {
            self.toast = None;
        }
    }

    pub fn visible_records(&self) -> Vec<&EmailRecord> {
        self.view.visible_records()
    }

    pub fn selected_record(&self) -> Option<&EmailRecord> {
        let idx = self.table_state.selected()?;
        self.view.visible_records().get(idx).copied()
    }

    fn reset_selection(&mut self) {
        self.hover = None;
        *self.table_state.offset_mut() = 0;
        if self.view.visible_records().is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(0));
        }
    }

    pub fn next_row(&mut self) {
        let len = self.view.visible_records().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(i));
        self.hover = None;
    }

    pub fn previous_row(&mut self) {
        if self.view.visible_records().is_empty() {
            return;
        }
        let i = self.table_state.selected().unwrap_or(0).saturating_sub(1);
        self.table_state.select(Some(i));
        self.hover = None;
    }

    pub fn cycle_responds_filter(&mut self) {
        self.view.cycle_responds_filter();
        self.reset_selection();
    }

    pub fn start_date_input(&mut self) {
        self.date_input = self.view.date().format(crate::logs::DATE_FORMAT).to_string();
        self.mode = Mode::DateInput;
    }

    pub fn push_date_char(&mut self, c: char) {
        if (c.is_ascii_digit() || c == '-') && self.date_input.len() < 10 {
            self.date_input.push(c);
        }
    }

    pub fn pop_date_char(&mut self) {
        self.date_input.pop();
    }

    pub fn cancel_date_input(&mut self) {
        self.date_input.clear();
        self.mode = Mode::Browse;
    }

    /// Apply the typed date. Invalid input leaves the date unchanged.
    pub fn confirm_date_input(&mut self) {
        match parse_date(&self.date_input) {
            Some(date) => {
                self.view.set_date(date);
                if date > self.view.today() {
                    let notice = Notification::new(
                        NotificationLevel::Info,
                        "Dates after today are not available, showing today",
                    );
                    if self.last_requested == Some(self.view.query()) {
                        self.notify(notice);
                    } else {
                        self.deferred_notice = Some(notice);
                    }
                }
            }
            None => self.notify(Notification::new(
                NotificationLevel::Error,
                format!("Invalid date \"{}\", expected YYYY-MM-DD", self.date_input),
            )),
        }
        self.date_input.clear();
        self.mode = Mode::Browse;
    }

    pub fn open_detail(&mut self) {
        if self.selected_record().is_some() {
            self.hover = None;
            self.mode = Mode::Detail;
        }
    }

    pub fn close_detail(&mut self) {
        self.mode = Mode::Browse;
    }

    /// Screen rect of the body cell for visible row `row`, if it is on screen
    pub fn body_cell_rect(&self, row: usize) -> Option<Rect> {
        let g = self.table_geometry;
        let offset = self.table_state.offset();
        if row < offset || row - offset >= g.visible_rows as usize || g.body_width == 0 {
            return None;
        }
        let y = g.first_row_y + (row - offset) as u16;
        Some(Rect::new(g.body_x, y, g.body_width, 1))
    }

    /// Mouse moved to (x, y): show or hide the body preview
    pub fn hover_at(&mut self, x: u16, y: u16) {
        let g = self.table_geometry;
        let in_column = x >= g.body_x && x < g.body_x + g.body_width;
        let in_rows = y >= g.first_row_y && y < g.first_row_y + g.visible_rows;
        if !in_column || !in_rows || self.mode != Mode::Browse {
            self.hover = None;
            return;
        }

        let row = (y - g.first_row_y) as usize + self.table_state.offset();
        self.hover = self.preview_for_row(row);
    }

    /// Keyboard counterpart of hovering: toggle the preview on the selected row
    pub fn toggle_preview(&mut self) {
        if self.hover.is_some() {
            self.hover = None;
            return;
        }
        if let Some(row) = self.table_state.selected() {
            self.hover = self.preview_for_row(row);
        }
    }

    fn preview_for_row(&self, row: usize) -> Option<HoverPreview> {
        let records = self.view.visible_records();
        let record = records.get(row)?;
        let anchor = self.body_cell_rect(row)?;
        Some(HoverPreview {
            content: record.body_display().to_string(),
            anchor,
            row,
        })
    }

    /// Handle a click; returns true if the query changed
    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        let target = self
            .page_targets
            .iter()
            .find(|(rect, _)| {
                x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
            })
            .map(|(_, t)| *t);

        if let Some(target) = target {
            let before = self.view.query();
            self.go_to(target);
            return self.view.query() != before;
        }

        // Click on a data row selects it
        let g = self.table_geometry;
        if y >= g.first_row_y && y < g.first_row_y + g.visible_rows {
            let row = (y - g.first_row_y) as usize + self.table_state.offset();
            if row < self.view.visible_records().len() {
                self.table_state.select(Some(row));
            }
        }
        false
    }

    pub fn go_to(&mut self, target: PageTarget) {
        match target {
            PageTarget::Previous => self.view.previous_page(),
            PageTarget::Next => self.view.next_page(),
            PageTarget::Page(p) => self.view.set_page(p),
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}
