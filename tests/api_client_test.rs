//! Integration tests for the HTTP client and unsubscribe flow against a mock server

use mockito::Matcher;
use sendlog::api::{ApiClient, ApiError, EmailListRequest, UnsubscribeRequest};
use sendlog::config::ApiConfig;
use sendlog::unsubscribe::{UnsubscribeFlow, UnsubscribeState};
use serde_json::json;
use std::time::Duration;

fn client(base_url: String) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn list_body() -> String {
    json!({
        "status": 200,
        "message": "ok",
        "data": {
            "records": [
                {
                    "id": 1,
                    "sender_email": "ops@acme.io",
                    "receiver_email": "lead@client.io",
                    "status": "sent",
                    "status_message": "250 OK",
                    "sent_at": "2025-06-01T09:30:00Z",
                    "responds": "Responds",
                    "subject": "Hello",
                    "body": null,
                    "first_name": "Dana",
                    "company": "Client",
                    "created_at": "2025-06-01T09:29:00Z"
                }
            ],
            "pagination": {"page": 2, "per_page": 10, "total_pages": 4, "total_records": 31},
            "filters_applied": {"date": "2025-06-01", "receiver_email": null, "sender_email": null}
        }
    })
    .to_string()
}

#[test]
fn get_emails_posts_json_payload() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/email_send_import/list")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(
            json!({"page": 2, "per_page": 10, "date": "2025-06-01"}),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(list_body())
        .create();

    let response = client(format!("{}/api/", server.url()))
        .get_emails(&EmailListRequest {
            page: 2,
            per_page: 10,
            date: "2025-06-01".to_string(),
        })
        .unwrap();

    mock.assert();
    assert_eq!(response.status, 200);
    assert_eq!(response.data.records.len(), 1);
    assert_eq!(response.data.records[0].body_display(), "N/A");
    assert_eq!(response.data.pagination.total_records, 31);
    assert_eq!(
        response.data.filters_applied.date.as_deref(),
        Some("2025-06-01")
    );
}

#[test]
fn non_success_status_carries_body() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/email_send_import/list")
        .with_status(500)
        .with_body("database unavailable")
        .create();

    let err = client(server.url())
        .get_emails(&EmailListRequest {
            page: 1,
            per_page: 20,
            date: "2025-06-01".to_string(),
        })
        .unwrap_err();

    match err {
        ApiError::Status {
            status,
            status_text,
            body,
        } => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, "database unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn malformed_body_is_decode_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/email_send_import/list")
        .with_status(200)
        .with_body("<html>proxy login</html>")
        .create();

    let err = client(server.url())
        .get_emails(&EmailListRequest {
            page: 1,
            per_page: 20,
            date: "2025-06-01".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn unreachable_host_is_network_error() {
    // Nothing listens on the discard port
    let err = client("http://127.0.0.1:9".to_string())
        .unsubscribe_email(&UnsubscribeRequest {
            k: "tok".to_string(),
            to: "b@y.io".to_string(),
            from: "a@x.io".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
}

#[test]
fn unsubscribe_flow_confirms() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/email_tracking/unsub")
        .match_body(Matcher::Json(
            json!({"k": "tok", "to": "b@y.io", "from": "a@x.io"}),
        ))
        .with_status(200)
        .with_body(
            json!({
                "status": 200,
                "message": "Unsubscribed",
                "data": {"is_subscribed": 0, "k": "tok", "receiver_email": "b@y.io", "sender_email": "a@x.io"}
            })
            .to_string(),
        )
        .expect(1)
        .create();

    let client = client(server.url());
    let mut flow = UnsubscribeFlow::new("tok", "b@y.io", "a@x.io");
    flow.submit(&client);
    // settled; no second request
    flow.submit(&client);

    mock.assert();
    match flow.state() {
        UnsubscribeState::Confirmed(record) => assert!(!record.is_subscribed()),
        other => panic!("expected confirmation, got {other:?}"),
    }
    assert_eq!(
        flow.summary(),
        "b@y.io will no longer receive emails from a@x.io"
    );
}

#[test]
fn unsubscribe_flow_surfaces_http_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/email_tracking/unsub")
        .with_status(404)
        .with_body("unknown token")
        .create();

    let mut flow = UnsubscribeFlow::new("bad", "b@y.io", "a@x.io");
    flow.submit(&client(server.url()));

    match flow.state() {
        UnsubscribeState::Failed(reason) => {
            assert!(reason.contains("404"));
            assert!(reason.contains("unknown token"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
