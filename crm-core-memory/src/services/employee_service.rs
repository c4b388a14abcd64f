use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crm_core_api::domain::{AuthenticatedUser, EmployeeStatus, StatusToggleOutcome};
use crm_core_api::error::{ApiError, ApiResult};
use crm_core_api::service::EmployeeService;
use crm_core_db::models::{
    AuditAction, AuditEntry, CustomerModel, EmployeeModel, FieldChange, TicketModel,
    UserAccountModel,
};
use crm_core_db::repository::{FindByAssignedEmployee, FindByEmail, FindById, Save};

/// Employee status transitions and the assignment cascade they trigger.
///
/// Deactivation removes the employee from every customer and ticket
/// assignment in the tenant, appending one audit entry per touched
/// document. Each document is saved independently; a failed save loses
/// that one document's unassignment, never the employee's own status
/// change, and the reported count only covers customers actually
/// persisted.
pub struct EmployeeServiceImpl<PR, UR, CR, TR> {
    employees: Arc<PR>,
    user_accounts: Arc<UR>,
    customers: Arc<CR>,
    tickets: Arc<TR>,
}

impl<PR, UR, CR, TR> EmployeeServiceImpl<PR, UR, CR, TR> {
    pub fn new(
        employees: Arc<PR>,
        user_accounts: Arc<UR>,
        customers: Arc<CR>,
        tickets: Arc<TR>,
    ) -> Self {
        Self {
            employees,
            user_accounts,
            customers,
            tickets,
        }
    }
}

impl<PR, UR, CR, TR> EmployeeServiceImpl<PR, UR, CR, TR>
where
    PR: FindById<EmployeeModel> + Save<EmployeeModel> + Send + Sync,
    UR: FindByEmail<UserAccountModel> + Save<UserAccountModel> + Send + Sync,
    CR: FindByAssignedEmployee<CustomerModel> + Save<CustomerModel> + Send + Sync + 'static,
    TR: FindByAssignedEmployee<TicketModel> + Save<TicketModel> + Send + Sync + 'static,
{
    /// Keeps the login-account mirror's status in step with the employee
    /// record. Best effort: the employee save already committed, so a
    /// mirror failure is logged, not surfaced.
    async fn sync_user_account(&self, employee: &EmployeeModel, new_status: EmployeeStatus) {
        match self.user_accounts.find_by_email(employee.email.as_str()).await {
            Ok(Some(mut account)) => {
                account.status = new_status;
                if let Err(err) = self.user_accounts.save(&account).await {
                    warn!(employee_id = %employee.id, error = %err, "failed to sync user account status");
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(employee_id = %employee.id, error = %err, "failed to look up user account mirror");
            }
        }
    }

    /// Removes the employee from every assigned customer in the tenant.
    /// Returns how many customers were successfully persisted.
    async fn cascade_customers(
        &self,
        employee: &EmployeeModel,
        caller: &AuthenticatedUser,
    ) -> ApiResult<usize> {
        let affected = self
            .customers
            .find_by_assigned_employee(employee.id, employee.company_id)
            .await
            .map_err(ApiError::persistence)?;

        let note = format!(
            "Employee {} deactivated. Removed from customer assignment.",
            employee.name.as_str()
        );
        let mut tasks = JoinSet::new();
        for mut customer in affected {
            let repository = Arc::clone(&self.customers);
            let employee_id = employee.id;
            let caller_id = caller.id;
            let by_name = caller.display_name().to_string();
            let note = note.clone();
            tasks.spawn(async move {
                customer.unassign_employee(employee_id);
                customer.audit.append(AuditEntry::new(
                    AuditAction::AssignmentRemoved,
                    caller_id,
                    &by_name,
                    Some(&note),
                    BTreeMap::new(),
                ));
                customer.updated_at = Utc::now();
                let outcome = repository.save(&customer).await;
                (customer.id, outcome)
            });
        }

        let mut persisted = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(()))) => persisted += 1,
                Ok((customer_id, Err(err))) => {
                    warn!(%customer_id, error = %err, "failed to persist customer unassignment");
                }
                Err(err) => {
                    warn!(error = %err, "customer unassignment task panicked");
                }
            }
        }
        Ok(persisted)
    }

    /// Ticket side of the cascade. The diff records display names, with
    /// "Unassigned" standing in for the removed employee.
    async fn cascade_tickets(
        &self,
        employee: &EmployeeModel,
        caller: &AuthenticatedUser,
    ) -> ApiResult<usize> {
        let affected = self
            .tickets
            .find_by_assigned_employee(employee.id, employee.company_id)
            .await
            .map_err(ApiError::persistence)?;

        let note = format!(
            "Employee {} became inactive. Ticket marked as Unassigned.",
            employee.name.as_str()
        );
        let employee_name = employee.name.as_str().to_string();
        let mut tasks = JoinSet::new();
        for mut ticket in affected {
            let repository = Arc::clone(&self.tickets);
            let employee_id = employee.id;
            let caller_id = caller.id;
            let by_name = caller.display_name().to_string();
            let note = note.clone();
            let employee_name = employee_name.clone();
            tasks.spawn(async move {
                ticket.unassign_employee(employee_id);
                let mut diff = BTreeMap::new();
                diff.insert(
                    "assignedTo".to_string(),
                    FieldChange::new(employee_name, "Unassigned"),
                );
                ticket.audit.append(AuditEntry::new(
                    AuditAction::AssignmentRemoved,
                    caller_id,
                    &by_name,
                    Some(&note),
                    diff,
                ));
                ticket.updated_at = Utc::now();
                let outcome = repository.save(&ticket).await;
                (ticket.id, outcome)
            });
        }

        let mut persisted = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(()))) => persisted += 1,
                Ok((ticket_id, Err(err))) => {
                    warn!(%ticket_id, error = %err, "failed to persist ticket unassignment");
                }
                Err(err) => {
                    warn!(error = %err, "ticket unassignment task panicked");
                }
            }
        }
        Ok(persisted)
    }
}

#[async_trait]
impl<PR, UR, CR, TR> EmployeeService for EmployeeServiceImpl<PR, UR, CR, TR>
where
    PR: FindById<EmployeeModel> + Save<EmployeeModel> + Send + Sync,
    UR: FindByEmail<UserAccountModel> + Save<UserAccountModel> + Send + Sync,
    CR: FindByAssignedEmployee<CustomerModel> + Save<CustomerModel> + Send + Sync + 'static,
    TR: FindByAssignedEmployee<TicketModel> + Save<TicketModel> + Send + Sync + 'static,
{
    async fn set_employee_status(
        &self,
        employee_id: Uuid,
        new_status: EmployeeStatus,
        caller: &AuthenticatedUser,
    ) -> ApiResult<StatusToggleOutcome> {
        let mut employee = self
            .employees
            .find_by_id(employee_id)
            .await
            .map_err(ApiError::persistence)?
            .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;
        if employee.company_id != caller.company_id {
            return Err(ApiError::Forbidden(
                "employee belongs to a different company".to_string(),
            ));
        }

        // Setting the current status again is a no-op; this is what makes
        // repeated deactivation idempotent.
        if employee.status == new_status {
            return Ok(StatusToggleOutcome {
                status: new_status,
                affected_customer_count: 0,
                message: format!(
                    "Employee {} is already {}.",
                    employee.name.as_str(),
                    new_status
                ),
            });
        }

        employee.status = new_status;
        self.employees
            .save(&employee)
            .await
            .map_err(ApiError::persistence)?;
        self.sync_user_account(&employee, new_status).await;

        let mut affected_customer_count = 0;
        if new_status == EmployeeStatus::Inactive {
            affected_customer_count = self.cascade_customers(&employee, caller).await?;
            let affected_tickets = self.cascade_tickets(&employee, caller).await?;
            info!(
                employee_id = %employee.id,
                customers = affected_customer_count,
                tickets = affected_tickets,
                "assignment cascade completed"
            );
        }

        let message = match new_status {
            EmployeeStatus::Active => {
                format!("Employee {} activated successfully.", employee.name.as_str())
            }
            EmployeeStatus::Inactive => format!(
                "Employee {} deactivated successfully. Removed from {} customer assignments.",
                employee.name.as_str(),
                affected_customer_count
            ),
        };

        Ok(StatusToggleOutcome {
            status: new_status,
            affected_customer_count,
            message,
        })
    }

    async fn toggle_employee_status(
        &self,
        employee_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> ApiResult<StatusToggleOutcome> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await
            .map_err(ApiError::persistence)?
            .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;
        self.set_employee_status(employee_id, employee.status.toggled(), caller)
            .await
    }
}
