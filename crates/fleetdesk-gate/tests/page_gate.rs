use axum::{body::Body, http::Request, middleware, routing::get, Router};
use fleetdesk_gate::{require_page_auth, GateConfig};
use http::{header, StatusCode};
use tower::ServiceExt;

fn app() -> Router {
    Router::new()
        .route("/", get(|| async { "dashboard" }))
        .route("/devices", get(|| async { "devices" }))
        .route("/login", get(|| async { "login" }))
        .route("/pkg/fleetdesk.js", get(|| async { "bundle" }))
        .route("/api/health", get(|| async { "ok" }))
        .layer(middleware::from_fn_with_state(
            GateConfig::default(),
            require_page_auth,
        ))
}

async fn status_and_location(uri: &str, cookie: Option<&str>) -> (StatusCode, Option<String>) {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let response = app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (response.status(), location)
}

#[tokio::test]
async fn protected_page_without_cookie_redirects_to_login() {
    for uri in ["/", "/devices"] {
        let (status, location) = status_and_location(uri, None).await;
        assert!(status.is_redirection(), "{uri}: {status}");
        assert_eq!(location.as_deref(), Some("/login"));
    }
}

#[tokio::test]
async fn refresh_cookie_alone_is_not_a_session() {
    let (status, location) = status_and_location("/devices", Some("refreshToken=r1")).await;
    assert!(status.is_redirection());
    assert_eq!(location.as_deref(), Some("/login"));

    let (status, _) = status_and_location("/devices", Some("accessToken=")).await;
    assert!(status.is_redirection());
}

#[tokio::test]
async fn any_access_cookie_lets_the_page_through() {
    // Presence is enough; validity is the API's call.
    let (status, location) =
        status_and_location("/devices", Some("theme=dark; accessToken=not-even-a-jwt")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
}

#[tokio::test]
async fn login_assets_and_api_are_exempt() {
    for uri in ["/login", "/pkg/fleetdesk.js", "/api/health"] {
        let (status, _) = status_and_location(uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}

#[test]
fn exemptions_match_prefixes_only() {
    let config = GateConfig::default();
    assert!(config.is_exempt("/login"));
    assert!(config.is_exempt("/favicon.svg"));
    assert!(!config.is_exempt("/login/extra"));
    assert!(!config.is_exempt("/apis"));
}
