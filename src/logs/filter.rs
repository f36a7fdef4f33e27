use crate::api::EmailRecord;

/// Client-side narrowing of the loaded page by the `responds` field.
/// Never sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RespondsFilter {
    #[default]
    All,
    Responds,
    NoResponseYet,
    Unsubscribed,
}

impl RespondsFilter {
    pub const OPTIONS: [RespondsFilter; 4] = [
        RespondsFilter::All,
        RespondsFilter::Responds,
        RespondsFilter::NoResponseYet,
        RespondsFilter::Unsubscribed,
    ];

    /// Value of `EmailRecord::responds` this filter keeps
    pub fn value(self) -> Option<&'static str> {
        match self {
            RespondsFilter::All => None,
            RespondsFilter::Responds => Some("Responds"),
            RespondsFilter::NoResponseYet => Some("No Response Yet"),
            RespondsFilter::Unsubscribed => Some("Unsubscribed"),
        }
    }

    pub fn label(self) -> &'static str {
        self.value().unwrap_or("All")
    }

    pub fn next(self) -> Self {
        let i = Self::OPTIONS.iter().position(|f| *f == self).unwrap_or(0);
        Self::OPTIONS[(i + 1) % Self::OPTIONS.len()]
    }

    pub fn matches(self, record: &EmailRecord) -> bool {
        match self.value() {
            None => true,
            Some(v) => record.responds == v,
        }
    }

    pub fn apply(self, records: &[EmailRecord]) -> Vec<&EmailRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, responds: &str) -> EmailRecord {
        EmailRecord {
            id,
            responds: responds.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn unsubscribed_keeps_only_unsubscribed() {
        let records = vec![record(1, "Responds"), record(2, "Unsubscribed")];
        let ids: Vec<i64> = RespondsFilter::Unsubscribed
            .apply(&records)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn all_is_identity() {
        let records = vec![record(1, "Responds"), record(2, "Unsubscribed")];
        let kept: Vec<EmailRecord> = RespondsFilter::All
            .apply(&records)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(kept, records);
    }

    #[test]
    fn match_is_exact() {
        assert!(!RespondsFilter::Responds.matches(&record(1, "responds")));
        assert!(RespondsFilter::NoResponseYet.matches(&record(1, "No Response Yet")));
    }

    #[test]
    fn cycle_wraps() {
        assert_eq!(RespondsFilter::Unsubscribed.next(), RespondsFilter::All);
        assert_eq!(RespondsFilter::All.next().label(), "Responds");
    }
}
