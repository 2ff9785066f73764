//! Auth-aware request client.
//!
//! Every API call goes through [`AuthClient::send`]: the stored access token
//! is attached as a bearer credential, and a 401 triggers at most one token
//! refresh followed by one resubmission of the original request.

use std::sync::Arc;

use fleetdesk_types::{normalize_token_pair, LoginRequest, RefreshRequest, TokenPair};
use futures::lock::Mutex;
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::session::{NoopEvents, SessionEvents, SessionStore};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::{ClientError, ClientResult};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
    events: Arc<dyn SessionEvents>,
    /// Held for the duration of a refresh so concurrent 401s share one call.
    refresh_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("authenticated", &self.session.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl AuthClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            transport,
            session,
            events: Arc::new(NoopEvents),
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn SessionEvents>) -> Self {
        self.events = events;
        self
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn decorate(&self, request: &mut ApiRequest) {
        if request.anonymous {
            return;
        }
        if let Some(token) = self.session.access_token() {
            request.set_bearer(&token);
        }
    }

    /// Sends `request`, running the refresh protocol on a 401.
    pub async fn send(&self, mut request: ApiRequest) -> ClientResult<ApiResponse> {
        loop {
            self.decorate(&mut request);
            tracing::debug!(method = %request.method, path = %request.path, retried = request.retried, "sending request");

            let response = self.transport.send(request.clone()).await?;
            if response.status != StatusCode::UNAUTHORIZED || request.anonymous {
                return response.into_result();
            }

            if request.retried {
                tracing::warn!(path = %request.path, "request still unauthorized after token refresh");
                return response.into_result();
            }
            request.retried = true;

            if self.session.refresh_token().is_none() {
                tracing::debug!(path = %request.path, "unauthorized without refresh token");
                self.session.clear_access();
                return response.into_result();
            }

            let staleAccess = request.bearer_token().map(str::to_string);
            let tokens = self.refresh(staleAccess, response).await?;
            request.set_bearer(&tokens.access_token);
        }
    }

    /// Single-flight refresh. A caller that waited on the lock while another
    /// rotated the pair reuses the stored tokens instead of refreshing again.
    async fn refresh(
        &self,
        staleAccess: Option<String>,
        unauthorized: ApiResponse,
    ) -> ClientResult<TokenPair> {
        let _guard = self.refresh_lock.lock().await;

        let Some(refreshToken) = self.session.refresh_token() else {
            // A concurrent refresh failed and cleared the session.
            self.session.clear_access();
            return Err(ClientError::Unauthorized {
                body: unauthorized.body,
            });
        };

        if let Some(current) = self.session.access_token() {
            if staleAccess.as_deref() != Some(current.as_str()) {
                tracing::debug!("access token already rotated by a concurrent refresh");
                return Ok(TokenPair {
                    access_token: current,
                    refresh_token: refreshToken,
                });
            }
        }

        match self.request_refresh(refreshToken).await {
            Ok(tokens) => {
                self.session.store(&tokens);
                self.events.on_refresh(&tokens);
                tracing::info!("access token refreshed");
                Ok(tokens)
            }
            Err(e) => {
                tracing::warn!("token refresh failed, ending session: {e}");
                self.session.clear();
                self.events.on_session_expired();
                Err(e)
            }
        }
    }

    async fn request_refresh(&self, refreshToken: String) -> ClientResult<TokenPair> {
        let body = serde_json::to_value(RefreshRequest {
            refresh_token: refreshToken,
        })?;
        let request = ApiRequest::post(REFRESH_PATH, body).anonymous();
        let response = self.transport.send(request).await?.into_result()?;
        Ok(normalize_token_pair(response.into_body())?)
    }

    /// Exchanges credentials for a token pair and persists it.
    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<TokenPair> {
        let request = ApiRequest::post(LOGIN_PATH, serde_json::to_value(credentials)?).anonymous();
        let response = self.transport.send(request).await?.into_result()?;
        let tokens = normalize_token_pair(response.into_body())?;

        self.session.store(&tokens);
        tracing::info!(email = %credentials.email, "logged in");
        Ok(tokens)
    }

    /// Local sign-out; the API has no logout endpoint.
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("logged out");
    }

    pub async fn get_json(&self, path: &str) -> ClientResult<Value> {
        Ok(self.send(ApiRequest::get(path)).await?.into_body())
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        let request = ApiRequest::post(path, serde_json::to_value(body)?);
        Ok(self.send(request).await?.into_body())
    }

    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        let request = ApiRequest::put(path, serde_json::to_value(body)?);
        Ok(self.send(request).await?.into_body())
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        Ok(self.send(ApiRequest::delete(path)).await?.into_body())
    }
}
