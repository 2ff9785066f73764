use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use fleetdesk_types::ACCESS_TOKEN_COOKIE;

#[derive(Clone, Debug)]
pub struct GateConfig {
    pub login_path: String,
    /// Path prefixes served without a session: API proxying and static assets.
    pub exempt_prefixes: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".into(),
            exempt_prefixes: vec![
                "/api/".into(),
                "/pkg/".into(),
                "/assets/".into(),
                "/favicon".into(),
            ],
        }
    }
}

impl GateConfig {
    pub fn is_exempt(&self, path: &str) -> bool {
        path == self.login_path
            || self
                .exempt_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// Middleware for page routes: redirects to the login page when there is no
/// `accessToken` cookie. The token itself is not validated; the API is.
pub async fn require_page_auth(
    State(config): State<GateConfig>,
    jar: CookieJar,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if config.is_exempt(&path) {
        return next.run(request).await;
    }

    let hasSession = jar
        .get(ACCESS_TOKEN_COOKIE)
        .is_some_and(|cookie| !cookie.value().is_empty());

    if !hasSession {
        tracing::debug!(%path, "no session cookie, redirecting to login");
        return Redirect::to(&config.login_path).into_response();
    }

    next.run(request).await
}
