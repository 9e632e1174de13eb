use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;

/// Session variable read by row-security policies via
/// `current_setting(TENANT_VARIABLE, true)`.
pub const TENANT_VARIABLE: &str = "app.current_tenant";

/// Value bound for anonymous units of work. The empty string matches no
/// tenant id, so row-security policies see an empty result set instead of
/// whatever the previous checkout left behind.
pub const NEUTRAL_TENANT: &str = "";

/// The statements the binder needs from a connection. `PgConnection` gets
/// the real implementation in the database crate; tests use recording and
/// failing fakes.
#[async_trait]
pub trait SessionConnection: Send {
    /// Set a session-local variable, surviving until the next set on the
    /// same connection.
    async fn set_variable(&mut self, var: &str, value: &str) -> Result<()>;

    /// Run a one-time setup statement. Must be idempotent on the server
    /// side (`IF NOT EXISTS` and friends).
    async fn execute(&mut self, sql: &str) -> Result<()>;
}

/// Binding applied to a connection after the latest checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
    Unbound,
    Bound(Uuid),
}

/// Scopes pooled connections to the tenant of the current unit of work.
///
/// A physical connection serves many tenants over its lifetime, so the
/// binder never trusts leftover state: every checkout re-issues the bind,
/// anonymous checkouts reset to [`NEUTRAL_TENANT`], and the release hook
/// resets again defensively. A failed bind is fatal to the unit of work;
/// the caller must drop the connection rather than query unscoped.
#[derive(Debug, Clone)]
pub struct TenantBinder {
    variable: String,
    setup_statements: Vec<String>,
}

impl Default for TenantBinder {
    fn default() -> Self {
        Self::new()
    }
}

impl TenantBinder {
    pub fn new() -> Self {
        Self {
            variable: TENANT_VARIABLE.to_string(),
            setup_statements: Vec::new(),
        }
    }

    /// Override the session variable name (store-specific deployments).
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Add an idempotent statement run once per physical connection.
    pub fn with_setup(mut self, sql: impl Into<String>) -> Self {
        self.setup_statements.push(sql.into());
        self
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Bind the connection for the unit of work that just checked it out.
    ///
    /// Runs before any tenant-sensitive query on this connection: both
    /// share the connection, and the store serializes statements per
    /// connection, so the ordering needs no further synchronization.
    pub async fn on_acquire<C>(&self, conn: &mut C, tenant: Option<Uuid>) -> Result<BindState>
    where
        C: SessionConnection + ?Sized,
    {
        match tenant {
            Some(id) => {
                conn.set_variable(&self.variable, &id.to_string()).await?;
                tracing::debug!(tenant_id = %id, "connection bound to tenant");
                Ok(BindState::Bound(id))
            }
            None => {
                conn.set_variable(&self.variable, NEUTRAL_TENANT).await?;
                tracing::debug!("connection bound to neutral scope");
                Ok(BindState::Unbound)
            }
        }
    }

    /// Reset the binding as the connection returns to the pool. The next
    /// checkout re-binds regardless; this guards the window in between.
    pub async fn on_release<C>(&self, conn: &mut C) -> Result<()>
    where
        C: SessionConnection + ?Sized,
    {
        conn.set_variable(&self.variable, NEUTRAL_TENANT).await
    }

    /// One-time setup for a freshly created physical connection. Gates
    /// optional capabilities only, so failures are logged and swallowed,
    /// never propagated into connection establishment.
    pub async fn on_connect<C>(&self, conn: &mut C)
    where
        C: SessionConnection + ?Sized,
    {
        for sql in &self.setup_statements {
            if let Err(err) = conn.execute(sql).await {
                tracing::warn!(statement = %sql, error = %err, "connection setup statement failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TenantError;
    use std::sync::Arc;

    /// Fake connection that records every statement in order and can be
    /// told to fail specific operations.
    #[derive(Default)]
    struct RecordingConnection {
        log: Vec<String>,
        fail_next_set: bool,
        fail_repeated_setup: bool,
        applied_setup: Vec<String>,
    }

    #[async_trait]
    impl SessionConnection for RecordingConnection {
        async fn set_variable(&mut self, var: &str, value: &str) -> Result<()> {
            if self.fail_next_set {
                self.fail_next_set = false;
                return Err(TenantError::BindFailed("connection refused SET".into()));
            }
            self.log.push(format!("set {var}='{value}'"));
            Ok(())
        }

        async fn execute(&mut self, sql: &str) -> Result<()> {
            if self.applied_setup.iter().any(|s| s == sql) {
                if self.fail_repeated_setup {
                    return Err(TenantError::BindFailed("already applied".into()));
                }
            } else {
                self.applied_setup.push(sql.to_string());
            }
            self.log.push(format!("exec {sql}"));
            Ok(())
        }
    }

    fn tenant(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[tokio::test]
    async fn test_bind_sequence_across_reuse() {
        // One physical connection, three consecutive requests:
        // tenant 42, anonymous, tenant 7. The recorded sequence must show
        // each binding issued before that request's queries, with the
        // anonymous request resetting rather than inheriting '42'.
        let binder = TenantBinder::new();
        let mut conn = RecordingConnection::default();

        let s1 = binder.on_acquire(&mut conn, Some(tenant(42))).await.unwrap();
        assert_eq!(s1, BindState::Bound(tenant(42)));
        conn.execute("SELECT * FROM nutrition_entries").await.unwrap();
        binder.on_release(&mut conn).await.unwrap();

        let s2 = binder.on_acquire(&mut conn, None).await.unwrap();
        assert_eq!(s2, BindState::Unbound);
        conn.execute("SELECT * FROM nutrition_entries").await.unwrap();
        binder.on_release(&mut conn).await.unwrap();

        let s3 = binder.on_acquire(&mut conn, Some(tenant(7))).await.unwrap();
        assert_eq!(s3, BindState::Bound(tenant(7)));
        conn.execute("SELECT * FROM nutrition_entries").await.unwrap();

        let var = TENANT_VARIABLE;
        let t42 = tenant(42).to_string();
        let t7 = tenant(7).to_string();
        assert_eq!(
            conn.log,
            vec![
                format!("set {var}='{t42}'"),
                "exec SELECT * FROM nutrition_entries".to_string(),
                format!("set {var}=''"),
                format!("set {var}=''"),
                "exec SELECT * FROM nutrition_entries".to_string(),
                format!("set {var}=''"),
                format!("set {var}='{t7}'"),
                "exec SELECT * FROM nutrition_entries".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_anonymous_acquire_never_inherits_previous_tenant() {
        let binder = TenantBinder::new();
        let mut conn = RecordingConnection::default();

        binder.on_acquire(&mut conn, Some(tenant(42))).await.unwrap();
        // Pool returns the connection without a release reset (worst case),
        // then hands it to an anonymous request.
        let state = binder.on_acquire(&mut conn, None).await.unwrap();

        assert_eq!(state, BindState::Unbound);
        assert_eq!(
            conn.log.last().unwrap(),
            &format!("set {}=''", TENANT_VARIABLE)
        );
    }

    #[tokio::test]
    async fn test_bind_failure_fails_closed() {
        let binder = TenantBinder::new();
        let mut conn = RecordingConnection {
            fail_next_set: true,
            ..Default::default()
        };

        let err = binder.on_acquire(&mut conn, Some(tenant(42))).await;
        assert!(matches!(err, Err(TenantError::BindFailed(_))));
        // Nothing was issued on the connection: the unit of work aborts
        // before any query can run unscoped.
        assert!(conn.log.is_empty());
    }

    #[tokio::test]
    async fn test_one_time_setup_is_idempotent() {
        let binder = TenantBinder::new().with_setup("CREATE EXTENSION IF NOT EXISTS vector");
        let mut conn = RecordingConnection::default();

        binder.on_connect(&mut conn).await;
        binder.on_connect(&mut conn).await;

        // Applied once; the second run is a server-side no-op.
        assert_eq!(conn.applied_setup.len(), 1);
    }

    #[tokio::test]
    async fn test_setup_failure_is_swallowed() {
        let binder = TenantBinder::new().with_setup("CREATE EXTENSION IF NOT EXISTS vector");
        let mut conn = RecordingConnection {
            fail_repeated_setup: true,
            ..Default::default()
        };

        binder.on_connect(&mut conn).await;
        // Second application errors on the fake; on_connect must not panic
        // or propagate, and binding afterwards still works.
        binder.on_connect(&mut conn).await;
        let state = binder.on_acquire(&mut conn, Some(tenant(1))).await.unwrap();
        assert_eq!(state, BindState::Bound(tenant(1)));
    }

    #[tokio::test]
    async fn test_custom_variable_name() {
        let binder = TenantBinder::new().with_variable("nile.tenant_id");
        let mut conn = RecordingConnection::default();

        binder.on_acquire(&mut conn, Some(tenant(3))).await.unwrap();
        assert_eq!(
            conn.log,
            vec![format!("set nile.tenant_id='{}'", tenant(3))]
        );
    }

    #[tokio::test]
    async fn test_pool_checkout_is_exclusive() {
        // The binder relies on the pool never handing one connection to two
        // in-flight units of work. Model the pool as a mutex-guarded slot
        // and assert the second checkout observes the first one finished.
        let pool = Arc::new(tokio::sync::Mutex::new(RecordingConnection::default()));
        let binder = Arc::new(TenantBinder::new());

        let mut handles = Vec::new();
        for n in [42u128, 7u128] {
            let pool = Arc::clone(&pool);
            let binder = Arc::clone(&binder);
            handles.push(tokio::spawn(async move {
                let mut conn = pool.lock().await;
                binder.on_acquire(&mut *conn, Some(tenant(n))).await.unwrap();
                conn.execute("SELECT 1").await.unwrap();
                binder.on_release(&mut *conn).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Each unit of work appears as an uninterrupted bind/query/reset
        // triple; interleaving would split a triple across the log.
        let log = &pool.lock().await.log;
        assert_eq!(log.len(), 6);
        for chunk in log.chunks(3) {
            assert!(chunk[0].starts_with("set "));
            assert_eq!(chunk[1], "exec SELECT 1");
            assert_eq!(chunk[2], format!("set {}=''", TENANT_VARIABLE));
        }
    }
}
