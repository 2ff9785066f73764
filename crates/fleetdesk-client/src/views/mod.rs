//! Page view-models: per-page state plus the async flows that drive it.
//!
//! State transitions are plain methods so a reactive front-end can apply
//! results to its own signals; the `async` helpers compose them for callers
//! that own the state outright.

pub mod crud;
pub mod dashboard;
pub mod login;
pub mod pagination;
pub mod reference;
pub mod resource;

pub use crud::{CrudPage, Modal};
pub use dashboard::{DashboardState, DASHBOARD_POLL_INTERVAL};
pub use login::{LoginForm, LoginState};
pub use pagination::Pagination;
pub use reference::ReferenceData;
pub use resource::{Companies, Devices, Resource, Roles, Users};
