use reqwest::blocking::Client;
use serde::{Serialize, de::DeserializeOwned};

use super::error::{ApiError, Result};
use super::types::{EmailListRequest, EmailListResponse, UnsubscribeRequest, UnsubscribeResponse};
use crate::config::ApiConfig;

pub const LIST_ENDPOINT: &str = "email_send_import/list";
pub const UNSUBSCRIBE_ENDPOINT: &str = "email_tracking/unsub";

/// Thin wrapper over the two REST endpoints. One POST per call, no retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of send logs
    pub fn get_emails(&self, request: &EmailListRequest) -> Result<EmailListResponse> {
        self.post(LIST_ENDPOINT, request)
    }

    /// Flip the subscription flag for a receiver/sender pair
    pub fn unsubscribe_email(&self, request: &UnsubscribeRequest) -> Result<UnsubscribeResponse> {
        self.post(UNSUBSCRIBE_ENDPOINT, request)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + std::fmt::Debug,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!("POST {} payload={:?}", url, body);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| {
                tracing::error!("Request to {} failed: {}", url, e);
                ApiError::Network(e)
            })?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!("API error response from {}: {} {}", url, status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        let text = response.text().map_err(ApiError::Network)?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Could not decode response from {}: {}", url, e);
            ApiError::Decode(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base.to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn endpoint_joins_with_or_without_slash() {
        assert_eq!(
            client("http://host/api/").endpoint(LIST_ENDPOINT),
            "http://host/api/email_send_import/list"
        );
        assert_eq!(
            client("http://host/api").endpoint(UNSUBSCRIBE_ENDPOINT),
            "http://host/api/email_tracking/unsub"
        );
        assert_eq!(client("http://host/api/").base_url(), "http://host/api/");
    }
}
