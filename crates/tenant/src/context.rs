// Tenant context for request handling

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The tenant identity attached to one unit of work. Established by the
/// auth middleware after token validation; absent on anonymous requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    pub user_id: Uuid,
}

impl TenantContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    pub fn tenant_id(&self) -> Uuid {
        self.user_id
    }
}

impl From<Uuid> for TenantContext {
    fn from(user_id: Uuid) -> Self {
        Self::new(user_id)
    }
}
