use chrono::NaiveDate;

use crate::api::EmailListRequest;

/// per_page sent when "All" is selected. Results beyond this are silently
/// truncated by the server.
pub const UNBOUNDED_PER_PAGE: u32 = 100_000;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Bounded(u32),
    Unbounded,
}

impl PageSize {
    /// Selectable sizes, in cycling order
    pub const OPTIONS: [PageSize; 6] = [
        PageSize::Bounded(10),
        PageSize::Bounded(20),
        PageSize::Bounded(50),
        PageSize::Bounded(100),
        PageSize::Bounded(500),
        PageSize::Unbounded,
    ];

    pub fn per_page(self) -> u32 {
        match self {
            PageSize::Bounded(n) => n.max(1),
            PageSize::Unbounded => UNBOUNDED_PER_PAGE,
        }
    }

    pub fn is_unbounded(self) -> bool {
        self == PageSize::Unbounded
    }

    /// Next option in `OPTIONS`, wrapping. Sizes not in the list go to the first.
    pub fn next(self) -> Self {
        let idx = Self::OPTIONS.iter().position(|s| *s == self);
        match idx {
            Some(i) => Self::OPTIONS[(i + 1) % Self::OPTIONS.len()],
            None => Self::OPTIONS[0],
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Bounded(20)
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSize::Bounded(n) => write!(f, "{}", n),
            PageSize::Unbounded => f.write_str("All"),
        }
    }
}

/// The server-side part of the view state. A change to any field means a refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: PageSize,
    pub date: NaiveDate,
}

impl ListQuery {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            date,
        }
    }

    pub fn to_request(&self) -> EmailListRequest {
        EmailListRequest {
            page: self.page,
            per_page: self.page_size.per_page(),
            date: self.date.format(DATE_FORMAT).to_string(),
        }
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn request_mirrors_query() {
        let query = ListQuery {
            page: 3,
            page_size: PageSize::Bounded(50),
            date: day("2025-03-09"),
        };
        assert_eq!(
            query.to_request(),
            EmailListRequest {
                page: 3,
                per_page: 50,
                date: "2025-03-09".to_string(),
            }
        );
    }

    #[test]
    fn unbounded_sends_sentinel() {
        let mut query = ListQuery::new(day("2025-03-09"));
        query.page_size = PageSize::Unbounded;
        assert_eq!(query.to_request().per_page, UNBOUNDED_PER_PAGE);
    }

    #[test]
    fn page_size_cycles_through_all() {
        let mut size = PageSize::default();
        let mut seen = vec![size];
        for _ in 0..PageSize::OPTIONS.len() {
            size = size.next();
            seen.push(size);
        }
        assert_eq!(seen.first(), seen.last());
        assert!(seen.contains(&PageSize::Unbounded));
        assert_eq!(PageSize::Bounded(7).next(), PageSize::Bounded(10));
    }

    #[test]
    fn page_size_labels() {
        assert_eq!(PageSize::Bounded(100).to_string(), "100");
        assert_eq!(PageSize::Unbounded.to_string(), "All");
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2025-02-30").is_none());
        assert!(parse_date("yesterday").is_none());
        assert_eq!(parse_date(" 2025-02-28 "), Some(day("2025-02-28")));
    }
}
