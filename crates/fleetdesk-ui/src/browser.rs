//! Browser-side session plumbing: cookie-backed token storage and the
//! redirect to the login page once a session cannot be refreshed.

use std::sync::Arc;

use fleetdesk_client::session::{cookie_value, expired_cookie, session_cookies};
use fleetdesk_client::{AuthClient, ClientConfig, ReqwestTransport, SessionEvents, SessionStore};
use fleetdesk_types::{TokenPair, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use wasm_bindgen::JsCast;

use crate::app::API_URL_META;

fn html_document() -> Option<web_sys::HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}

fn read_cookie(name: &str) -> Option<String> {
    let cookies = html_document()?.cookie().ok()?;
    cookie_value(&cookies, name)
}

fn write_cookie(assignment: &str) {
    if let Some(document) = html_document() {
        if document.set_cookie(assignment).is_err() {
            tracing::warn!("failed to write session cookie");
        }
    }
}

/// Full page load, so the server-side gate sees the current cookies.
pub fn navigate_hard(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

/// Tokens live in two script-readable cookies, `accessToken` and
/// `refreshToken`, so the page gate on the server can see them too.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieSessionStore;

impl SessionStore for CookieSessionStore {
    fn access_token(&self) -> Option<String> {
        read_cookie(ACCESS_TOKEN_COOKIE)
    }

    fn refresh_token(&self) -> Option<String> {
        read_cookie(REFRESH_TOKEN_COOKIE)
    }

    fn store(&self, tokens: &TokenPair) {
        for assignment in session_cookies(tokens) {
            write_cookie(&assignment);
        }
    }

    fn clear_access(&self) {
        write_cookie(&expired_cookie(ACCESS_TOKEN_COOKIE));
    }

    fn clear(&self) {
        write_cookie(&expired_cookie(ACCESS_TOKEN_COOKIE));
        write_cookie(&expired_cookie(REFRESH_TOKEN_COOKIE));
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RedirectOnExpiry;

impl SessionEvents for RedirectOnExpiry {
    fn on_session_expired(&self) {
        navigate_hard("/login");
    }
}

/// API root from the server-rendered meta tag, else the compile-time default.
fn api_config() -> ClientConfig {
    let selector = format!("meta[name=\"{API_URL_META}\"]");
    let fromMeta = html_document()
        .and_then(|document| document.query_selector(&selector).ok().flatten())
        .and_then(|element| element.get_attribute("content"))
        .filter(|url| !url.trim().is_empty());

    match fromMeta {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    }
}

pub fn build_client() -> Option<AuthClient> {
    match ReqwestTransport::new(api_config()) {
        Ok(transport) => Some(
            AuthClient::new(Arc::new(transport), Arc::new(CookieSessionStore))
                .with_events(Arc::new(RedirectOnExpiry)),
        ),
        Err(e) => {
            tracing::error!("failed to build API client: {e}");
            None
        }
    }
}
