use chrono::{Duration, NaiveDate};

use super::filter::RespondsFilter;
use super::query::{ListQuery, PageSize};
use crate::api::{EmailListData, EmailRecord, PaginationInfo};

pub const LOAD_ERROR_MESSAGE: &str =
    "Unable to load email data. Please check your connection and try again.";
pub const EMPTY_RESULT_MESSAGE: &str = "No records found for the selected date";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    Started,
    Succeeded(EmailListData),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A toast for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Pagination, date and filter state plus the last successfully fetched page.
///
/// Records and pagination are only ever overwritten by a successful fetch,
/// so a failed fetch leaves the previous page on screen.
#[derive(Debug, Clone)]
pub struct ListView {
    query: ListQuery,
    today: NaiveDate,
    responds: RespondsFilter,
    records: Vec<EmailRecord>,
    pagination: PaginationInfo,
    state: FetchState,
}

impl ListView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            query: ListQuery::new(today),
            today,
            responds: RespondsFilter::default(),
            records: Vec::new(),
            pagination: PaginationInfo::default(),
            state: FetchState::Idle,
        }
    }

    pub fn query(&self) -> ListQuery {
        self.query
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Move "today" forward (e.g. after midnight) so the cap follows the clock
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn date(&self) -> NaiveDate {
        self.query.date
    }

    /// Select a date, capped at today. Resets to the first page.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.query.date = date.min(self.today);
        self.query.page = 1;
    }

    pub fn shift_date(&mut self, days: i64) {
        if let Some(date) = self.query.date.checked_add_signed(Duration::days(days)) {
            self.set_date(date);
        }
    }

    pub fn page(&self) -> u32 {
        self.query.page
    }

    pub fn page_size(&self) -> PageSize {
        self.query.page_size
    }

    /// Change the page size. Resets to the first page.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.query.page_size = size;
        self.query.page = 1;
    }

    pub fn cycle_page_size(&mut self) {
        self.set_page_size(self.query.page_size.next());
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination.total_pages.max(1)
    }

    pub fn total_records(&self) -> u64 {
        self.pagination.total_records
    }

    /// Jump to a page; ignored when the size is unbounded
    pub fn set_page(&mut self, page: u32) {
        if self.query.page_size.is_unbounded() {
            return;
        }
        self.query.page = page.clamp(1, self.total_pages());
    }

    pub fn can_go_previous(&self) -> bool {
        !self.query.page_size.is_unbounded() && self.query.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        !self.query.page_size.is_unbounded() && self.query.page < self.total_pages()
    }

    pub fn previous_page(&mut self) {
        if self.can_go_previous() {
            self.query.page -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.can_go_next() {
            self.query.page += 1;
        }
    }

    /// Page numbers to link: the first, the last and every page within
    /// `radius` of the current one. Empty when unbounded.
    pub fn page_links(&self, radius: u32) -> Vec<u32> {
        if self.query.page_size.is_unbounded() {
            return Vec::new();
        }
        let last = self.total_pages();
        let current = self.query.page.clamp(1, last);
        let lo = current.saturating_sub(radius).max(1);
        let hi = current.saturating_add(radius).min(last);

        let mut pages = Vec::with_capacity((hi - lo) as usize + 3);
        if lo > 1 {
            pages.push(1);
        }
        pages.extend(lo..=hi);
        if hi < last {
            pages.push(last);
        }
        pages
    }

    /// Whether `page_links(radius)` lists every page
    pub fn links_cover_all(&self, radius: u32) -> bool {
        let current = self.query.page;
        current.saturating_sub(radius) <= 1 && current.saturating_add(radius) >= self.total_pages()
    }

    pub fn responds_filter(&self) -> RespondsFilter {
        self.responds
    }

    pub fn set_responds_filter(&mut self, filter: RespondsFilter) {
        self.responds = filter;
    }

    pub fn cycle_responds_filter(&mut self) {
        self.responds = self.responds.next();
    }

    pub fn records(&self) -> &[EmailRecord] {
        &self.records
    }

    pub fn pagination(&self) -> PaginationInfo {
        self.pagination
    }

    /// Loaded records narrowed by the responds filter
    pub fn visible_records(&self) -> Vec<&EmailRecord> {
        self.responds.apply(&self.records)
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    /// Single transition function for the fetch lifecycle. Returns the
    /// notification to show, if any. A `Started` event returns `None`; the
    /// caller dismisses whatever toast is up.
    pub fn apply(&mut self, event: FetchEvent) -> Option<Notification> {
        match event {
            FetchEvent::Started => {
                self.state = FetchState::Loading;
                None
            }
            FetchEvent::Succeeded(data) => {
                self.records = data.records;
                self.pagination = data.pagination;
                self.state = FetchState::Loaded;
                let n = self.records.len();
                Some(if n > 0 {
                    Notification::new(
                        NotificationLevel::Success,
                        format!("Successfully loaded {} records", n),
                    )
                } else {
                    Notification::new(NotificationLevel::Info, EMPTY_RESULT_MESSAGE)
                })
            }
            FetchEvent::Failed(reason) => {
                self.state = FetchState::Failed(reason);
                Some(Notification::new(NotificationLevel::Error, LOAD_ERROR_MESSAGE))
            }
        }
    }
}
