//! Transport seam between the auth client and the network.

use async_trait::async_trait;
use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use reqwest::Client;
use serde_json::Value;

use crate::{ClientConfig, ClientError, ClientResult};

/// An API call before it reaches the transport.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root, e.g. `/devices/7`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    /// Set once the request has been resubmitted after a token refresh.
    pub retried: bool,
    /// Skips credential decoration and the refresh protocol (login, refresh).
    pub anonymous: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
            retried: false,
            anonymous: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn set_bearer(&mut self, token: &str) {
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            self.headers.insert(AUTHORIZATION, value);
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}

/// Status and decoded JSON body. Empty or non-JSON bodies decode to `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, Some(body))
    }

    /// Maps non-success statuses to the matching error.
    pub fn into_result(self) -> ClientResult<ApiResponse> {
        if self.status.is_success() {
            Ok(self)
        } else if self.status == StatusCode::UNAUTHORIZED {
            Err(ClientError::Unauthorized { body: self.body })
        } else {
            Err(ClientError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn into_body(self) -> Value {
        self.body.unwrap_or(Value::Null)
    }
}

/// Sends one request and returns whatever the server answered. Only failures
/// to get a response at all are errors here; status handling is the client's.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = self.config.url(&request.path);
        let mut builder = self
            .client
            .request(request.method, &url)
            .headers(request.headers)
            .header(CONTENT_TYPE, "application/json");

        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        Ok(ApiResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bearer_round_trip() {
        let mut request = ApiRequest::get("/users");
        assert_eq!(request.bearer_token(), None);

        request.set_bearer("abc");
        assert_eq!(request.bearer_token(), Some("abc"));

        request.set_bearer("def");
        assert_eq!(request.bearer_token(), Some("def"));
        assert_eq!(request.headers.get_all(AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn statuses_map_to_errors() {
        assert!(ApiResponse::ok(json!([])).into_result().is_ok());

        let err = ApiResponse::new(StatusCode::UNAUTHORIZED, None)
            .into_result()
            .unwrap_err();
        assert!(err.is_unauthorized());

        let err = ApiResponse::new(StatusCode::NOT_FOUND, Some(json!({ "message": "gone" })))
            .into_result()
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.server_message().as_deref(), Some("gone"));
    }
}
