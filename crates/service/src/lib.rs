//! Collaborator layer behind the portal routes.
//! - Domain views over upstream data (settings, templates, stacks).
//! - Async ports the route handlers depend on.
//! - An HTTP client implementing every port, and in-memory mocks for tests.

pub mod domain;
pub mod errors;
pub mod http;
pub mod mock;
pub mod ports;

pub use errors::ServiceError;
pub use http::HttpUpstream;
pub use ports::{SessionStore, SettingsService, StackService, TemplateService};
