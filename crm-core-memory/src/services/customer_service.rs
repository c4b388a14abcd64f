use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crm_core_api::domain::{
    AuthenticatedUser, CustomerStatus, CustomerUpdatePayload, CustomerView, EngagementOutcome,
    NewEngagement, RecordState,
};
use crm_core_api::error::{ApiError, ApiResult};
use crm_core_api::service::CustomerService;
use crm_core_db::models::{
    AuditAction, AuditEntry, CustomerModel, EmployeeModel, EngagementEntry, FieldChange,
};
use crm_core_db::repository::{FindById, FindByIds, Save};

use crate::diff::{apply_customer_payload, diff_customer};
use crate::directory::EmployeeDirectory;

/// Customer side of the update pipeline: resolve, tenant check, diff,
/// apply, audit append, one persist call, denormalized response.
pub struct CustomerServiceImpl<CR, ER> {
    customers: Arc<CR>,
    directory: EmployeeDirectory<ER>,
}

impl<CR, ER> CustomerServiceImpl<CR, ER> {
    pub fn new(customers: Arc<CR>, directory: EmployeeDirectory<ER>) -> Self {
        Self {
            customers,
            directory,
        }
    }
}

impl<CR, ER> CustomerServiceImpl<CR, ER>
where
    CR: FindById<CustomerModel> + Save<CustomerModel> + Send + Sync,
    ER: FindByIds<EmployeeModel> + Send + Sync,
{
    /// Loads the customer and enforces tenant isolation before anything
    /// else can observe it.
    async fn load_scoped(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> ApiResult<CustomerModel> {
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await
            .map_err(ApiError::persistence)?
            .ok_or_else(|| ApiError::NotFound("Customer not found".to_string()))?;
        if customer.company_id != caller.company_id {
            return Err(ApiError::Forbidden(
                "customer belongs to a different company".to_string(),
            ));
        }
        Ok(customer)
    }

    async fn view(&self, customer: &CustomerModel) -> ApiResult<CustomerView> {
        let assigned_to = self
            .directory
            .summaries(&customer.assigned_to)
            .await
            .map_err(ApiError::persistence)?;
        Ok(CustomerView {
            id: customer.id,
            name: customer.name.as_str().to_string(),
            contact_name: customer.contact_name.as_ref().map(|s| s.as_str().to_string()),
            email: customer.email.as_ref().map(|s| s.as_str().to_string()),
            phone: customer.phone.as_ref().map(|s| s.as_str().to_string()),
            status: customer.status,
            lead_source: customer.lead_source.as_ref().map(|s| s.as_str().to_string()),
            assigned_to,
            state: customer.state,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}

#[async_trait]
impl<CR, ER> CustomerService for CustomerServiceImpl<CR, ER>
where
    CR: FindById<CustomerModel> + Save<CustomerModel> + Send + Sync,
    ER: FindByIds<EmployeeModel> + Send + Sync,
{
    async fn update_customer(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
        payload: CustomerUpdatePayload,
    ) -> ApiResult<CustomerView> {
        let mut customer = self.load_scoped(customer_id, caller).await?;
        payload.validate()?;

        let diff = diff_customer(&customer, &payload, &self.directory).await?;
        apply_customer_payload(&mut customer, &payload)?;

        if diff.is_empty() {
            // No-op update: no audit noise, no write.
            debug!(customer_id = %customer.id, "update produced no changes");
        } else {
            customer.audit.append(AuditEntry::new(
                AuditAction::Updated,
                caller.id,
                caller.display_name(),
                None,
                diff,
            ));
            customer.updated_at = Utc::now();
            self.customers
                .save(&customer)
                .await
                .map_err(ApiError::persistence)?;
        }

        self.view(&customer).await
    }

    async fn append_engagement(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
        engagement: NewEngagement,
    ) -> ApiResult<EngagementOutcome> {
        let mut customer = self.load_scoped(customer_id, caller).await?;
        engagement.validate()?;

        let entry = EngagementEntry::new(
            &engagement.kind,
            &engagement.summary,
            engagement.at.unwrap_or_else(Utc::now),
            caller.id,
            caller.display_name(),
        );
        customer.engagement_history.append(entry);
        self.customers
            .save(&customer)
            .await
            .map_err(ApiError::persistence)?;
        Ok(EngagementOutcome {
            message: "Engagement logged".to_string(),
        })
    }

    async fn soft_delete_customer(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> ApiResult<()> {
        let mut customer = self.load_scoped(customer_id, caller).await?;

        customer.state = RecordState::Deactive;
        customer.deleted_at = Some(Utc::now());
        customer.deleted_by = Some(caller.id);
        customer.audit.append(AuditEntry::new(
            AuditAction::Deleted,
            caller.id,
            caller.display_name(),
            Some("Customer deactivated"),
            BTreeMap::new(),
        ));
        customer.updated_at = Utc::now();
        self.customers
            .save(&customer)
            .await
            .map_err(ApiError::persistence)?;
        Ok(())
    }

    async fn restore_customer(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> ApiResult<()> {
        let mut customer = self.load_scoped(customer_id, caller).await?;

        customer.state = RecordState::Active;
        customer.deleted_at = None;
        customer.deleted_by = None;
        customer.audit.append(AuditEntry::new(
            AuditAction::Restored,
            caller.id,
            caller.display_name(),
            Some("Customer restored"),
            BTreeMap::new(),
        ));
        customer.updated_at = Utc::now();
        self.customers
            .save(&customer)
            .await
            .map_err(ApiError::persistence)?;
        Ok(())
    }

    async fn convert_lead(
        &self,
        customer_id: Uuid,
        caller: &AuthenticatedUser,
    ) -> ApiResult<CustomerView> {
        let mut customer = self.load_scoped(customer_id, caller).await?;
        if customer.status == CustomerStatus::Converted {
            return Err(ApiError::ValidationError(
                "Customer already converted".to_string(),
            ));
        }

        let mut diff = BTreeMap::new();
        diff.insert(
            "status".to_string(),
            FieldChange::new(
                customer.status.to_string(),
                CustomerStatus::Converted.to_string(),
            ),
        );
        customer.status = CustomerStatus::Converted;
        customer.audit.append(AuditEntry::new(
            AuditAction::Converted,
            caller.id,
            caller.display_name(),
            None,
            diff,
        ));
        customer.updated_at = Utc::now();
        self.customers
            .save(&customer)
            .await
            .map_err(ApiError::persistence)?;

        self.view(&customer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::TestContext;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn update_unknown_customer_is_not_found() {
        let ctx = TestContext::new();
        let caller = ctx.caller(Uuid::new_v4());
        let result = ctx
            .customer_service()
            .update_customer(Uuid::new_v4(), &caller, CustomerUpdatePayload::default())
            .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn cross_tenant_update_is_forbidden_and_applies_nothing() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;
        let outsider = ctx.caller(Uuid::new_v4());

        let payload = CustomerUpdatePayload {
            name: Some("Hijacked".to_string()),
            ..Default::default()
        };
        let result = ctx
            .customer_service()
            .update_customer(customer.id, &outsider, payload)
            .await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        let stored = ctx
            .repos
            .customer_repository
            .find_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name.as_str(), "Acme Corp");
        assert!(stored.audit.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn noop_update_appends_no_audit_entry() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;
        let caller = ctx.caller(company_id);

        let payload = CustomerUpdatePayload {
            name: Some("Acme Corp".to_string()),
            status: Some(customer.status),
            ..Default::default()
        };
        assert_ok!(
            ctx.customer_service()
                .update_customer(customer.id, &caller, payload)
                .await
        );

        let stored = ctx
            .repos
            .customer_repository
            .find_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.audit.len(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn multi_field_update_appends_one_entry_with_all_keys() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Old Customer Name", &[]).await?;
        let caller = ctx.caller(company_id);

        let payload = CustomerUpdatePayload {
            name: Some("Updated Customer Name".to_string()),
            phone: Some("555-0100".to_string()),
            status: Some(CustomerStatus::Contact),
            ..Default::default()
        };
        let view = ctx
            .customer_service()
            .update_customer(customer.id, &caller, payload)
            .await?;
        assert_eq!(view.name, "Updated Customer Name");

        let stored = ctx
            .repos
            .customer_repository
            .find_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.audit.len(), 1);
        let entry = stored.audit.last().unwrap();
        assert_eq!(entry.action, AuditAction::Updated);
        assert_eq!(entry.by, caller.id);
        assert_eq!(entry.by_name.as_str(), "Manager John");
        assert_eq!(entry.diff.len(), 3);
        assert_eq!(
            entry.diff["name"],
            FieldChange::new("Old Customer Name", "Updated Customer Name")
        );
        Ok(())
    }

    #[tokio::test]
    async fn reassignment_diff_records_display_names() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let old_emp = ctx.seed_employee(company_id, "Old Employee").await?;
        let new_emp = ctx.seed_employee(company_id, "New Employee").await?;
        let customer = ctx
            .seed_customer(company_id, "Customer A", &[old_emp.id])
            .await?;
        let caller = ctx.caller(company_id);

        let payload = CustomerUpdatePayload {
            assigned_to: Some(vec![new_emp.id]),
            ..Default::default()
        };
        let view = ctx
            .customer_service()
            .update_customer(customer.id, &caller, payload)
            .await?;
        assert_eq!(view.assigned_to.len(), 1);
        assert_eq!(view.assigned_to[0].name, "New Employee");

        let stored = ctx
            .repos
            .customer_repository
            .find_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.assigned_to, vec![new_emp.id]);
        assert_eq!(
            stored.audit.last().unwrap().diff["assignedTo"],
            FieldChange::new("Old Employee", "New Employee")
        );
        Ok(())
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_any_write() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;
        let caller = ctx.caller(company_id);

        let payload = CustomerUpdatePayload {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        let result = ctx
            .customer_service()
            .update_customer(customer.id, &caller, payload)
            .await;
        assert!(matches!(result, Err(ApiError::ValidationError(_))));

        let stored = ctx
            .repos
            .customer_repository
            .find_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.email.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn engagement_history_is_append_only() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;
        let caller = ctx.caller(company_id);
        let service = ctx.customer_service();

        let mut snapshots = Vec::new();
        for i in 0..5 {
            service
                .append_engagement(
                    customer.id,
                    &caller,
                    NewEngagement {
                        kind: "call".to_string(),
                        summary: format!("Call number {i}"),
                        at: None,
                    },
                )
                .await?;
            let stored = ctx
                .repos
                .customer_repository
                .find_by_id(customer.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(stored.engagement_history.len(), i + 1);
            snapshots.push(stored.engagement_history.as_slice().to_vec());
        }

        // Every earlier prefix must be identical inside the final history.
        let last = snapshots.last().unwrap();
        for (i, snapshot) in snapshots.iter().enumerate() {
            assert_eq!(&last[..=i], snapshot.as_slice());
        }
        Ok(())
    }

    #[tokio::test]
    async fn engagement_by_name_falls_back_to_email() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;
        let caller = AuthenticatedUser {
            id: Uuid::new_v4(),
            name: None,
            email: "test@test.com".to_string(),
            company_id,
        };

        let outcome = ctx
            .customer_service()
            .append_engagement(
                customer.id,
                &caller,
                NewEngagement {
                    kind: "meeting".to_string(),
                    summary: "Product demo".to_string(),
                    at: None,
                },
            )
            .await?;
        assert_eq!(outcome.message, "Engagement logged");

        let stored = ctx
            .repos
            .customer_repository
            .find_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        let entry = stored.engagement_history.last().unwrap();
        assert_eq!(entry.by_name.as_str(), "test@test.com");
        assert_eq!(entry.kind.as_str(), "meeting");
        Ok(())
    }

    #[tokio::test]
    async fn engagement_on_unknown_customer_is_not_found() {
        let ctx = TestContext::new();
        let caller = ctx.caller(Uuid::new_v4());
        let result = ctx
            .customer_service()
            .append_engagement(
                Uuid::new_v4(),
                &caller,
                NewEngagement {
                    kind: "call".to_string(),
                    summary: "Test".to_string(),
                    at: None,
                },
            )
            .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn soft_delete_and_restore_append_their_actions() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;
        let caller = ctx.caller(company_id);
        let service = ctx.customer_service();

        service.soft_delete_customer(customer.id, &caller).await?;
        let stored = ctx
            .repos
            .customer_repository
            .find_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.state, RecordState::Deactive);
        assert_eq!(stored.deleted_by, Some(caller.id));
        assert!(stored.deleted_at.is_some());
        assert_eq!(stored.audit.last().unwrap().action, AuditAction::Deleted);

        service.restore_customer(customer.id, &caller).await?;
        let stored = ctx
            .repos
            .customer_repository
            .find_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.state, RecordState::Active);
        assert!(stored.deleted_at.is_none());
        assert!(stored.deleted_by.is_none());
        assert_eq!(stored.audit.len(), 2);
        assert_eq!(stored.audit.last().unwrap().action, AuditAction::Restored);
        Ok(())
    }

    #[tokio::test]
    async fn convert_lead_once_then_reject() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Fresh Lead", &[]).await?;
        let caller = ctx.caller(company_id);
        let service = ctx.customer_service();

        let view = service.convert_lead(customer.id, &caller).await?;
        assert_eq!(view.status, CustomerStatus::Converted);

        let stored = ctx
            .repos
            .customer_repository
            .find_by_id(customer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.audit.last().unwrap().action, AuditAction::Converted);

        let again = service.convert_lead(customer.id, &caller).await;
        assert!(matches!(again, Err(ApiError::ValidationError(_))));
        Ok(())
    }
}
