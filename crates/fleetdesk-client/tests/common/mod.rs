#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fleetdesk_client::{
    ApiRequest, ApiResponse, AuthClient, ClientResult, MemorySessionStore, SessionEvents,
    SessionStore, Transport,
};
use fleetdesk_types::TokenPair;
use http::Method;

type Handler = dyn Fn(&ApiRequest) -> ClientResult<ApiResponse> + Send + Sync;

/// Fake API: answers with `handler` and records every request it saw.
pub struct ScriptedTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<ApiRequest>>,
    yield_first: bool,
}

impl ScriptedTransport {
    pub fn new(
        handler: impl Fn(&ApiRequest) -> ClientResult<ApiResponse> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
            yield_first: false,
        }
    }

    /// Suspends once per request so concurrent callers interleave.
    pub fn yielding(mut self) -> Self {
        self.yield_first = true;
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.calls.lock().unwrap().push(request.clone());
        if self.yield_first {
            tokio::task::yield_now().await;
        }
        (self.handler)(&request)
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    pub refreshed: AtomicUsize,
    pub expired: AtomicUsize,
}

impl SessionEvents for RecordingEvents {
    fn on_refresh(&self, _tokens: &TokenPair) {
        self.refreshed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_session_expired(&self) {
        self.expired.fetch_add(1, Ordering::SeqCst);
    }
}

impl RecordingEvents {
    pub fn refreshed(&self) -> usize {
        self.refreshed.load(Ordering::SeqCst)
    }

    pub fn expired(&self) -> usize {
        self.expired.load(Ordering::SeqCst)
    }
}

pub fn tokens(access: &str, refresh: &str) -> TokenPair {
    TokenPair {
        access_token: access.into(),
        refresh_token: refresh.into(),
    }
}

pub struct Harness {
    pub client: AuthClient,
    pub transport: Arc<ScriptedTransport>,
    pub session: Arc<MemorySessionStore>,
    pub events: Arc<RecordingEvents>,
}

pub fn harness(transport: ScriptedTransport, session: MemorySessionStore) -> Harness {
    let transport = Arc::new(transport);
    let session = Arc::new(session);
    let events = Arc::new(RecordingEvents::default());

    let client = AuthClient::new(transport.clone(), session.clone() as Arc<dyn SessionStore>)
        .with_events(events.clone());

    Harness {
        client,
        transport,
        session,
        events,
    }
}
