#![allow(non_snake_case)]

pub mod middleware;

pub use middleware::auth::{require_page_auth, GateConfig};
