use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crm_core_api::domain::{TicketPriority, TicketStatus};

use crate::models::append_log::AppendOnlyLog;
use crate::models::audit::AuditEntry;
use crate::models::identifiable::Identifiable;
use crate::models::tenant_scoped::TenantScoped;

/// Database model for Ticket
///
/// References exactly one Customer in the same tenant. Tickets have no
/// delete path in this subsystem; the audit trail only grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketModel {
    pub id: Uuid,
    pub company_id: Uuid,
    pub customer_id: Uuid,
    pub subject: HeaplessString<150>,
    pub description: HeaplessString<1000>,
    pub category: Option<HeaplessString<50>>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub assigned_to: Vec<Uuid>,
    pub sla_deadline: Option<DateTime<Utc>>,
    /// Agent scratch area (e.g. `internalNote`). Shallow-merged on update
    /// and deliberately excluded from audit diffs.
    #[serde(default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
    pub audit: AppendOnlyLog<AuditEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TicketModel {
    /// Removes one employee reference by set-difference.
    pub fn unassign_employee(&mut self, employee_id: Uuid) {
        self.assigned_to.retain(|id| *id != employee_id);
    }

    /// Folds incoming meta keys into the stored map, replacing on key
    /// collision (shallow merge).
    pub fn merge_meta(&mut self, incoming: serde_json::Map<String, serde_json::Value>) {
        for (key, value) in incoming {
            self.meta.insert(key, value);
        }
    }
}

impl Identifiable for TicketModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl TenantScoped for TicketModel {
    fn get_company_id(&self) -> Uuid {
        self.company_id
    }
}
