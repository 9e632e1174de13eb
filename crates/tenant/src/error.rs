use thiserror::Error;

pub type Result<T> = std::result::Result<T, TenantError>;

#[derive(Debug, Error)]
pub enum TenantError {
    /// The side-channel bind statement could not be executed. The unit of
    /// work must not continue on an unscoped connection.
    #[error("tenant binding failed: {0}")]
    BindFailed(String),
}
