// Tenant context binding for pooled database connections.
//
// Physical connections are shared across users over their lifetime, so the
// session variable that row-security policies read must be re-issued on
// every checkout and reset whenever a connection goes back to the pool.
// The binder receives the current request's tenant explicitly at checkout;
// it never caches an identity on the connection.

pub mod binder;
pub mod context;
pub mod error;

pub use binder::{BindState, SessionConnection, TenantBinder, NEUTRAL_TENANT, TENANT_VARIABLE};
pub use context::TenantContext;
pub use error::{Result, TenantError};
