use serde::{Deserialize, Deserializer, Serialize};

/// One logged send attempt
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct EmailRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sender_email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub receiver_email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status_message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sent_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub responds: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

impl EmailRecord {
    /// Subject for display, "N/A" when absent or blank
    pub fn subject_display(&self) -> &str {
        non_blank(self.subject.as_deref())
    }

    /// Body for display, "N/A" when absent or blank
    pub fn body_display(&self) -> &str {
        non_blank(self.body.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> &str {
    match s {
        Some(s) if !s.is_empty() => s,
        _ => "N/A",
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationInfo {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_records: u64,
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 0,
            total_pages: 1,
            total_records: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct FiltersApplied {
    pub date: Option<String>,
    pub receiver_email: Option<String>,
    pub sender_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct EmailListData {
    pub records: Vec<EmailRecord>,
    #[serde(default)]
    pub pagination: PaginationInfo,
    #[serde(default)]
    pub filters_applied: FiltersApplied,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EmailListResponse {
    pub status: i64,
    #[serde(default)]
    pub message: String,
    pub data: EmailListData,
}

/// Body of `POST email_send_import/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailListRequest {
    pub page: u32,
    pub per_page: u32,
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
}

/// Body of `POST email_tracking/unsub`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsubscribeRequest {
    pub k: String,
    pub to: String,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SubscriptionRecord {
    pub is_subscribed: u8,
    pub k: String,
    pub receiver_email: String,
    pub sender_email: String,
}

impl SubscriptionRecord {
    pub fn is_subscribed(&self) -> bool {
        self.is_subscribed != 0
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UnsubscribeResponse {
    pub status: i64,
    #[serde(default)]
    pub message: String,
    pub data: SubscriptionRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tolerates_nulls() {
        let json = r#"{
            "id": 7,
            "sender_email": "a@x.io",
            "receiver_email": "b@y.io",
            "status": "sent",
            "status_message": null,
            "sent_at": "2025-06-01T09:30:00Z",
            "responds": "Responds",
            "subject": null,
            "body": "",
            "first_name": null,
            "company": "Acme",
            "created_at": "2025-06-01T09:29:00Z"
        }"#;
        let record: EmailRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.status_message, "");
        assert_eq!(record.first_name, "");
        assert_eq!(record.subject_display(), "N/A");
        assert_eq!(record.body_display(), "N/A");
        assert_eq!(record.company, "Acme");
    }

    #[test]
    fn unsubscribe_request_uses_wire_names() {
        let req = UnsubscribeRequest {
            k: "tok".to_string(),
            to: "b@y.io".to_string(),
            from: "a@x.io".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"k": "tok", "to": "b@y.io", "from": "a@x.io"})
        );
    }

    #[test]
    fn subscription_flag() {
        let json = r#"{"is_subscribed":0,"k":"tok","receiver_email":"b@y.io","sender_email":"a@x.io"}"#;
        let record: SubscriptionRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_subscribed());
    }
}
