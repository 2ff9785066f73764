//! Session context handed to the auth client at construction.

use std::sync::{Mutex, MutexGuard, PoisonError};

use fleetdesk_types::{
    TokenPair, ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_MAX_AGE_SECS, REFRESH_TOKEN_COOKIE,
    REFRESH_TOKEN_MAX_AGE_SECS,
};

/// Where the credential pair lives between requests.
pub trait SessionStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn store(&self, tokens: &TokenPair);
    fn clear_access(&self);
    fn clear(&self);

    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

/// Hooks fired by the refresh protocol.
pub trait SessionEvents: Send + Sync {
    fn on_refresh(&self, _tokens: &TokenPair) {}

    /// The refresh token was rejected and the session is gone. Browser
    /// front-ends send the user to the login page here.
    fn on_session_expired(&self) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEvents;

impl SessionEvents for NoopEvents {}

#[derive(Debug, Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// In-process store, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    tokens: Mutex<Tokens>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: &TokenPair) -> Self {
        let store = Self::default();
        store.store(tokens);
        store
    }

    /// Session holding only an access token, as left behind once the
    /// refresh cookie has expired.
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            tokens: Mutex::new(Tokens {
                access: Some(token.into()),
                refresh: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tokens> {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<String> {
        self.lock().access.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.lock().refresh.clone()
    }

    fn store(&self, tokens: &TokenPair) {
        let mut guard = self.lock();
        guard.access = Some(tokens.access_token.clone());
        guard.refresh = Some(tokens.refresh_token.clone());
    }

    fn clear_access(&self) {
        self.lock().access = None;
    }

    fn clear(&self) {
        let mut guard = self.lock();
        guard.access = None;
        guard.refresh = None;
    }
}

/// `document.cookie` assignment string for a session cookie.
pub fn session_cookie(name: &str, value: &str, max_age_secs: u64) -> String {
    format!("{name}={value}; Max-Age={max_age_secs}; Path=/; SameSite=Lax")
}

/// Assignment that deletes `name`.
pub fn expired_cookie(name: &str) -> String {
    session_cookie(name, "", 0)
}

/// Both cookies for a freshly issued pair, with their respective lifetimes.
pub fn session_cookies(tokens: &TokenPair) -> [String; 2] {
    [
        session_cookie(
            ACCESS_TOKEN_COOKIE,
            &tokens.access_token,
            ACCESS_TOKEN_MAX_AGE_SECS,
        ),
        session_cookie(
            REFRESH_TOKEN_COOKIE,
            &tokens.refresh_token,
            REFRESH_TOKEN_MAX_AGE_SECS,
        ),
    ]
}

/// Value of `name` in a `Cookie` header or `document.cookie` string.
pub fn cookie_value(cookieHeader: &str, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    cookieHeader
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(prefix.as_str()))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "a1".into(),
            refresh_token: "r1".into(),
        }
    }

    #[test]
    fn memory_store_lifecycle() {
        let store = MemorySessionStore::with_tokens(&pair());
        assert!(store.is_authenticated());
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));

        store.clear_access();
        assert!(!store.is_authenticated());
        assert_eq!(store.refresh_token().as_deref(), Some("r1"));

        store.clear();
        assert_eq!(store.refresh_token(), None);
    }

    #[test]
    fn cookies_carry_lifetimes() {
        let [access, refresh] = session_cookies(&pair());
        assert_eq!(access, "accessToken=a1; Max-Age=86400; Path=/; SameSite=Lax");
        assert_eq!(refresh, "refreshToken=r1; Max-Age=604800; Path=/; SameSite=Lax");
        assert!(expired_cookie("accessToken").contains("Max-Age=0"));
    }

    #[test]
    fn cookie_lookup() {
        let header = "theme=dark; accessToken=a1;refreshToken=r1; accessTokenOld=x";
        assert_eq!(cookie_value(header, "accessToken").as_deref(), Some("a1"));
        assert_eq!(cookie_value(header, "refreshToken").as_deref(), Some("r1"));
        assert_eq!(cookie_value("accessToken=", "accessToken"), None);
        assert_eq!(cookie_value("", "accessToken"), None);
    }
}
