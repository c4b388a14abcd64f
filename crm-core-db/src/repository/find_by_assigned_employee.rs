use async_trait::async_trait;
use uuid::Uuid;

use crate::models::tenant_scoped::TenantScoped;

/// Generic repository trait for the cascade's fan-out scans
///
/// Finds every document in one tenant whose `assigned_to` set contains the
/// given employee id. Implementations over Customer must exclude
/// soft-deleted documents; an index on `assigned_to` is advisable for any
/// real store since this is a full scan otherwise.
#[async_trait]
pub trait FindByAssignedEmployee<T: TenantScoped>: Send + Sync {
    /// Find all documents in `company_id` currently assigned to `employee_id`
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The affected documents (possibly empty)
    /// * `Err` - An error if the query could not be executed
    async fn find_by_assigned_employee(
        &self,
        employee_id: Uuid,
        company_id: Uuid,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
