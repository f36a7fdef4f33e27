//! Unsubscribe confirmation: one POST, one outcome.

use crate::api::{ApiClient, SubscriptionRecord, UnsubscribeRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum UnsubscribeState {
    Pending,
    Confirmed(SubscriptionRecord),
    Failed(String),
}

#[derive(Debug)]
pub struct UnsubscribeFlow {
    request: UnsubscribeRequest,
    state: UnsubscribeState,
}

impl UnsubscribeFlow {
    pub fn new(k: impl Into<String>, to: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            request: UnsubscribeRequest {
                k: k.into(),
                to: to.into(),
                from: from.into(),
            },
            state: UnsubscribeState::Pending,
        }
    }

    pub fn request(&self) -> &UnsubscribeRequest {
        &self.request
    }

    pub fn state(&self) -> &UnsubscribeState {
        &self.state
    }

    /// Issue the request. Only the first call hits the network; later calls
    /// return the settled state.
    pub fn submit(&mut self, client: &ApiClient) -> &UnsubscribeState {
        if self.state != UnsubscribeState::Pending {
            return &self.state;
        }

        self.state = match client.unsubscribe_email(&self.request) {
            Ok(response) => {
                tracing::info!(
                    "Unsubscribed {} from {} (is_subscribed={})",
                    response.data.receiver_email,
                    response.data.sender_email,
                    response.data.is_subscribed
                );
                UnsubscribeState::Confirmed(response.data)
            }
            Err(e) => {
                tracing::error!("Unsubscribe failed: {}", e);
                UnsubscribeState::Failed(e.to_string())
            }
        };
        &self.state
    }

    /// Line to show the user for the current state
    pub fn summary(&self) -> String {
        match &self.state {
            UnsubscribeState::Pending => "Unsubscribe request not sent yet".to_string(),
            UnsubscribeState::Confirmed(record) if !record.is_subscribed() => format!(
                "{} will no longer receive emails from {}",
                record.receiver_email, record.sender_email
            ),
            UnsubscribeState::Confirmed(record) => format!(
                "{} is still subscribed to {}",
                record.receiver_email, record.sender_email
            ),
            UnsubscribeState::Failed(reason) => format!("Unsubscribe failed: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reflects_state() {
        let mut flow = UnsubscribeFlow::new("tok", "b@y.io", "a@x.io");
        assert_eq!(flow.summary(), "Unsubscribe request not sent yet");
        assert_eq!(flow.request().k, "tok");
        assert_eq!(flow.request().to, "b@y.io");
        assert_eq!(flow.request().from, "a@x.io");

        flow.state = UnsubscribeState::Confirmed(SubscriptionRecord {
            is_subscribed: 0,
            k: "tok".to_string(),
            receiver_email: "b@y.io".to_string(),
            sender_email: "a@x.io".to_string(),
        });
        assert_eq!(flow.summary(), "b@y.io will no longer receive emails from a@x.io");

        flow.state = UnsubscribeState::Failed("boom".to_string());
        assert_eq!(flow.summary(), "Unsubscribe failed: boom");
    }
}
