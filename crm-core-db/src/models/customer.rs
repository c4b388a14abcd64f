use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crm_core_api::domain::{CustomerStatus, RecordState};

use crate::models::append_log::AppendOnlyLog;
use crate::models::audit::AuditEntry;
use crate::models::engagement::EngagementEntry;
use crate::models::identifiable::Identifiable;
use crate::models::tenant_scoped::TenantScoped;

/// Database model for Customer
///
/// `assigned_to` holds employee ids from the same tenant. The store does
/// not enforce that reference; the assignment cascade does, at the point
/// of employee deactivation. Both history sequences are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerModel {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: HeaplessString<100>,
    pub contact_name: Option<HeaplessString<100>>,
    pub email: Option<HeaplessString<100>>,
    pub phone: Option<HeaplessString<30>>,
    pub status: CustomerStatus,
    pub lead_source: Option<HeaplessString<50>>,
    /// Unordered, expected unique; removal is always by value, never by
    /// index, so duplicate or missing entries cannot corrupt it.
    pub assigned_to: Vec<Uuid>,
    pub audit: AppendOnlyLog<AuditEntry>,
    pub engagement_history: AppendOnlyLog<EngagementEntry>,
    pub state: RecordState,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerModel {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Removes one employee reference by set-difference.
    pub fn unassign_employee(&mut self, employee_id: Uuid) {
        self.assigned_to.retain(|id| *id != employee_id);
    }
}

impl Identifiable for CustomerModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl TenantScoped for CustomerModel {
    fn get_company_id(&self) -> Uuid {
        self.company_id
    }
}
