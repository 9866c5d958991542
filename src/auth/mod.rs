//! Authentication layer: shared-secret login and cookie session gating.

pub mod credentials;
pub mod middleware;
pub mod session;

pub use credentials::verify_credentials;
pub use middleware::{AdminSession, AppState, SESSION_COOKIE};
pub use session::{issue_token, validate_token};
