#![allow(non_snake_case)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;
pub mod views;

pub use client::AuthClient;
pub use config::ClientConfig;
pub use error::{error_message, ClientError, ClientResult, FALLBACK_ERROR_MESSAGE};
pub use session::{MemorySessionStore, NoopEvents, SessionEvents, SessionStore};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
