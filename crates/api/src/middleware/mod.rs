pub mod auth;
pub mod rate_limit;

pub use auth::{require_auth, AuthUser};
pub use rate_limit::{rate_limit_login, rate_limit_registration};
