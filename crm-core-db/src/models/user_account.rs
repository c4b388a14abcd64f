use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crm_core_api::domain::EmployeeStatus;

use crate::models::identifiable::Identifiable;
use crate::models::tenant_scoped::TenantScoped;

/// Login-account record mirrored from an Employee.
///
/// Looked up by email during status transitions so the login side stays in
/// step with the employee record; a missing mirror is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountModel {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: HeaplessString<100>,
    pub email: HeaplessString<100>,
    pub status: EmployeeStatus,
}

impl Identifiable for UserAccountModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl TenantScoped for UserAccountModel {
    fn get_company_id(&self) -> Uuid {
        self.company_id
    }
}
