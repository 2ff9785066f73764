mod common;

use common::{harness, tokens, ScriptedTransport};
use fleetdesk_client::{
    error_message, ApiRequest, ApiResponse, ClientError, ClientResult, MemorySessionStore,
    SessionStore,
};
use fleetdesk_types::LoginRequest;
use http::{Method, StatusCode};
use serde_json::json;

fn unauthorized() -> ApiResponse {
    ApiResponse::new(StatusCode::UNAUTHORIZED, Some(json!({ "message": "Token expired" })))
}

/// Accepts only `Bearer fresh`; `/auth/refresh` trades `r1` for a new pair.
fn rotating_api(request: &ApiRequest) -> ClientResult<ApiResponse> {
    if request.path == "/auth/refresh" {
        let body = request.body.clone().unwrap_or_default();
        return Ok(if body["refreshToken"] == "r1" {
            ApiResponse::ok(json!({ "accessToken": "fresh", "refreshToken": "r2" }))
        } else {
            ApiResponse::new(StatusCode::UNAUTHORIZED, Some(json!({ "message": "Refresh token revoked" })))
        });
    }

    if request.bearer_token() == Some("fresh") {
        Ok(ApiResponse::ok(json!({ "success": true, "data": [] })))
    } else {
        Ok(unauthorized())
    }
}

#[tokio::test]
async fn attaches_stored_access_token() {
    let h = harness(
        ScriptedTransport::new(rotating_api),
        MemorySessionStore::with_tokens(&tokens("fresh", "r1")),
    );

    h.client.get_json("/devices").await.unwrap();

    let calls = h.transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].bearer_token(), Some("fresh"));
    assert!(!calls[0].retried);
}

#[tokio::test]
async fn anonymous_request_proceeds_without_header() {
    let h = harness(
        ScriptedTransport::new(|_| Ok(ApiResponse::ok(json!([])))),
        MemorySessionStore::new(),
    );

    h.client.get_json("/companies").await.unwrap();
    assert_eq!(h.transport.calls()[0].bearer_token(), None);
}

#[tokio::test]
async fn unauthorized_triggers_exactly_one_refresh_and_one_retry() {
    let h = harness(
        ScriptedTransport::new(rotating_api),
        MemorySessionStore::with_tokens(&tokens("stale", "r1")),
    );

    let devices = h.client.list_devices().await.unwrap();
    assert!(devices.is_empty());

    assert_eq!(h.transport.count(Method::POST, "/auth/refresh"), 1);
    assert_eq!(h.transport.count(Method::GET, "/devices"), 2);

    let calls = h.transport.calls();
    let retry = calls.last().unwrap();
    assert!(retry.retried);
    assert_eq!(retry.bearer_token(), Some("fresh"));

    assert_eq!(h.session.access_token().as_deref(), Some("fresh"));
    assert_eq!(h.session.refresh_token().as_deref(), Some("r2"));
    assert_eq!(h.events.refreshed(), 1);
    assert_eq!(h.events.expired(), 0);
}

#[tokio::test]
async fn refresh_request_is_anonymous_and_carries_refresh_token() {
    let h = harness(
        ScriptedTransport::new(rotating_api),
        MemorySessionStore::with_tokens(&tokens("stale", "r1")),
    );

    h.client.get_json("/users").await.unwrap();

    let refresh = h
        .transport
        .calls()
        .into_iter()
        .find(|r| r.path == "/auth/refresh")
        .unwrap();
    assert_eq!(refresh.bearer_token(), None);
    assert_eq!(refresh.body, Some(json!({ "refreshToken": "r1" })));
}

#[tokio::test]
async fn second_unauthorized_after_retry_does_not_loop() {
    // Refresh succeeds but the API keeps rejecting the new token.
    let h = harness(
        ScriptedTransport::new(|request| {
            if request.path == "/auth/refresh" {
                Ok(ApiResponse::ok(json!({ "accessToken": "fresh", "refreshToken": "r2" })))
            } else {
                Ok(unauthorized())
            }
        }),
        MemorySessionStore::with_tokens(&tokens("stale", "r1")),
    );

    let err = h.client.get_json("/roles").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(h.transport.count(Method::POST, "/auth/refresh"), 1);
    assert_eq!(h.transport.count(Method::GET, "/roles"), 2);
}

#[tokio::test]
async fn refresh_failure_clears_session_and_reports_expiry() {
    let h = harness(
        ScriptedTransport::new(rotating_api),
        MemorySessionStore::with_tokens(&tokens("stale", "revoked")),
    );

    let err = h.client.get_json("/devices").await.unwrap_err();

    // The refresh error is what the caller sees.
    assert_eq!(error_message(&err), "Refresh token revoked");
    assert_eq!(h.transport.count(Method::POST, "/auth/refresh"), 1);
    assert_eq!(h.transport.count(Method::GET, "/devices"), 1);
    assert_eq!(h.session.access_token(), None);
    assert_eq!(h.session.refresh_token(), None);
    assert_eq!(h.events.expired(), 1);
    assert_eq!(h.events.refreshed(), 0);
}

#[tokio::test]
async fn refresh_transport_failure_also_ends_session() {
    let h = harness(
        ScriptedTransport::new(|request| {
            if request.path == "/auth/refresh" {
                Err(ClientError::Transport("connection refused".into()))
            } else {
                Ok(unauthorized())
            }
        }),
        MemorySessionStore::with_tokens(&tokens("stale", "r1")),
    );

    let err = h.client.get_json("/devices").await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(!h.session.is_authenticated());
    assert_eq!(h.events.expired(), 1);
}

#[tokio::test]
async fn missing_refresh_token_propagates_without_refresh() {
    let h = harness(
        ScriptedTransport::new(rotating_api),
        MemorySessionStore::with_access_token("stale"),
    );

    let err = h.client.get_json("/devices").await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(error_message(&err), "Token expired");
    assert_eq!(h.transport.count(Method::POST, "/auth/refresh"), 0);
    assert_eq!(h.transport.calls().len(), 1);
    assert_eq!(h.session.access_token(), None);
    assert_eq!(h.events.expired(), 0);
}

#[tokio::test]
async fn other_failures_are_not_retried() {
    let h = harness(
        ScriptedTransport::new(|_| {
            Ok(ApiResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(json!({ "message": "Database unavailable" })),
            ))
        }),
        MemorySessionStore::with_tokens(&tokens("fresh", "r1")),
    );

    let err = h.client.get_json("/devices").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(error_message(&err), "Database unavailable");
    assert_eq!(h.transport.calls().len(), 1);
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
    let h = harness(
        ScriptedTransport::new(rotating_api).yielding(),
        MemorySessionStore::with_tokens(&tokens("stale", "r1")),
    );

    let (devices, users, roles) = futures::join!(
        h.client.get_json("/devices"),
        h.client.get_json("/users"),
        h.client.get_json("/roles"),
    );

    assert!(devices.is_ok());
    assert!(users.is_ok());
    assert!(roles.is_ok());
    assert_eq!(h.transport.count(Method::POST, "/auth/refresh"), 1);
    assert_eq!(h.events.refreshed(), 1);
    for path in ["/devices", "/users", "/roles"] {
        assert_eq!(h.transport.count(Method::GET, path), 2, "{path}");
    }
}

#[tokio::test]
async fn login_persists_both_tokens() {
    let h = harness(
        ScriptedTransport::new(|request| {
            assert_eq!(request.path, "/auth/login");
            let body = request.body.clone().unwrap_or_default();
            if body == json!({ "email": "a@b.com", "password": "secret1" }) {
                Ok(ApiResponse::ok(json!({
                    "success": true,
                    "data": { "accessToken": "acc", "refreshToken": "ref" }
                })))
            } else {
                Ok(ApiResponse::new(
                    StatusCode::UNAUTHORIZED,
                    Some(json!({ "message": "Invalid credentials" })),
                ))
            }
        }),
        MemorySessionStore::new(),
    );

    let pair = h
        .client
        .login(&LoginRequest {
            email: "a@b.com".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();

    assert_eq!(pair, tokens("acc", "ref"));
    assert_eq!(h.session.access_token().as_deref(), Some("acc"));
    assert_eq!(h.session.refresh_token().as_deref(), Some("ref"));
    assert_eq!(h.transport.calls()[0].bearer_token(), None);
}

#[tokio::test]
async fn bad_credentials_do_not_trigger_refresh() {
    let h = harness(
        ScriptedTransport::new(|_| {
            Ok(ApiResponse::new(
                StatusCode::UNAUTHORIZED,
                Some(json!({ "message": "Invalid credentials" })),
            ))
        }),
        MemorySessionStore::with_tokens(&tokens("old", "r1")),
    );

    let err = h
        .client
        .login(&LoginRequest {
            email: "a@b.com".into(),
            password: "wrong-one".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(error_message(&err), "Invalid credentials");
    assert_eq!(h.transport.calls().len(), 1);
    assert_eq!(h.events.expired(), 0);
}

#[tokio::test]
async fn logout_clears_session() {
    let h = harness(
        ScriptedTransport::new(rotating_api),
        MemorySessionStore::with_tokens(&tokens("fresh", "r1")),
    );

    h.client.logout();

    assert!(!h.client.is_authenticated());
    assert_eq!(h.session.refresh_token(), None);
}
