// Postgres side of the binder's connection seam.

use async_trait::async_trait;
use nutriguide_tenant::{SessionConnection, TenantError};
use sqlx::PgConnection;

/// Adapts a borrowed `PgConnection` to the binder's statement trait.
/// `set_config` keeps both the variable name and the value as bind
/// parameters, so no tenant id is ever spliced into SQL text.
pub struct PgSessionConnection<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgSessionConnection<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SessionConnection for PgSessionConnection<'_> {
    async fn set_variable(&mut self, var: &str, value: &str) -> nutriguide_tenant::Result<()> {
        sqlx::query("SELECT set_config($1, $2, false)")
            .bind(var)
            .bind(value)
            .execute(&mut *self.conn)
            .await
            .map(|_| ())
            .map_err(|e| TenantError::BindFailed(e.to_string()))
    }

    async fn execute(&mut self, sql: &str) -> nutriguide_tenant::Result<()> {
        sqlx::query(sql)
            .execute(&mut *self.conn)
            .await
            .map(|_| ())
            .map_err(|e| TenantError::BindFailed(e.to_string()))
    }
}
