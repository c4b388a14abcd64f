use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    AuthenticatedUser, CustomerUpdatePayload, CustomerView, EmployeeStatus, EngagementOutcome,
    NewEngagement, StatusToggleOutcome, TicketUpdateOutcome, TicketUpdatePayload,
};
use crate::error::ApiResult;

/// Customer-side operations of the assignment/audit subsystem.
///
/// Every mutation runs the full pipeline: resolve, tenant check, diff,
/// apply, audit append, single persist.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Applies a partial update and appends exactly one audit entry when
    /// anything actually changed.
    async fn update_customer(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
        payload: CustomerUpdatePayload,
    ) -> ApiResult<CustomerView>;

    /// Appends one immutable entry to the customer's engagement history.
    async fn append_engagement(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
        engagement: NewEngagement,
    ) -> ApiResult<EngagementOutcome>;

    /// Marks the customer deactivated without removing it from the store.
    async fn soft_delete_customer(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> ApiResult<()>;

    /// Reverses a soft delete.
    async fn restore_customer(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> ApiResult<()>;

    /// Converts a Lead to Converted; rejects customers already converted.
    async fn convert_lead(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> ApiResult<CustomerView>;
}

#[async_trait]
pub trait TicketService: Send + Sync {
    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        caller: &AuthenticatedUser,
        payload: TicketUpdatePayload,
    ) -> ApiResult<TicketUpdateOutcome>;
}

/// Employee lifecycle operations, including the assignment cascade fired
/// on deactivation.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Sets the status explicitly. Setting the current status is a no-op
    /// (no write, no cascade), which is what makes repeated deactivation
    /// idempotent.
    async fn set_employee_status(
        &self,
        employee_id: Uuid,
        new_status: EmployeeStatus,
        caller: &AuthenticatedUser,
    ) -> ApiResult<StatusToggleOutcome>;

    /// Flips Active <-> Inactive.
    async fn toggle_employee_status(
        &self,
        employee_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> ApiResult<StatusToggleOutcome>;
}
