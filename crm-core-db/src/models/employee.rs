use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crm_core_api::domain::EmployeeStatus;

use crate::models::identifiable::Identifiable;
use crate::models::tenant_scoped::TenantScoped;

/// Database model for Employee
///
/// Employees are never hard-deleted in this subsystem; `status` is the
/// lifecycle switch, and flipping it to Inactive is what drives the
/// assignment cascade over customers and tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeModel {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: HeaplessString<100>,
    /// Unique within the tenant, enforced at creation time.
    pub email: HeaplessString<100>,
    pub department: Option<HeaplessString<50>>,
    pub role: HeaplessString<50>,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for EmployeeModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl TenantScoped for EmployeeModel {
    fn get_company_id(&self) -> Uuid {
        self.company_id
    }
}
