//! Field-level diff computation for the update pipeline.
//!
//! Each function compares an entity's current values against a typed
//! partial payload and returns only the fields that actually differ,
//! keyed by their wire names. `assignedTo` is special-cased: the old and
//! new id sets are resolved to employee display names and the diff
//! records the joined-name strings, never raw ids.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use uuid::Uuid;

use crm_core_api::domain::{CustomerUpdatePayload, TicketUpdatePayload};
use crm_core_api::error::{ApiError, ApiResult};
use crm_core_db::models::{CustomerModel, EmployeeModel, FieldChange, TicketModel};
use crm_core_db::repository::FindByIds;
use crm_core_db::utils::try_bounded;

use crate::directory::EmployeeDirectory;

fn text(value: &str) -> Value {
    Value::String(value.to_string())
}

fn opt_text(value: Option<&str>) -> Value {
    value.map(text).unwrap_or(Value::Null)
}

fn opt_datetime(value: Option<chrono::DateTime<chrono::Utc>>) -> Value {
    value
        .map(|dt| Value::String(dt.to_rfc3339()))
        .unwrap_or(Value::Null)
}

/// Compares two assignment id sets; when they differ, resolves both to
/// joined display-name strings for the diff entry.
async fn assigned_to_change<R: FindByIds<EmployeeModel>>(
    old_ids: &[Uuid],
    new_ids: &[Uuid],
    directory: &EmployeeDirectory<R>,
) -> ApiResult<Option<FieldChange>> {
    let old_set: BTreeSet<Uuid> = old_ids.iter().copied().collect();
    let new_set: BTreeSet<Uuid> = new_ids.iter().copied().collect();
    if old_set == new_set {
        return Ok(None);
    }
    let from = directory
        .joined_names(old_ids)
        .await
        .map_err(ApiError::persistence)?;
    let to = directory
        .joined_names(new_ids)
        .await
        .map_err(ApiError::persistence)?;
    Ok(Some(FieldChange::new(from, to)))
}

/// Diff for a Customer update. Fields absent from the payload contribute
/// nothing; equal values contribute nothing.
pub async fn diff_customer<R: FindByIds<EmployeeModel>>(
    current: &CustomerModel,
    payload: &CustomerUpdatePayload,
    directory: &EmployeeDirectory<R>,
) -> ApiResult<BTreeMap<String, FieldChange>> {
    let mut diff = BTreeMap::new();

    if let Some(name) = &payload.name {
        if current.name.as_str() != name {
            diff.insert(
                "name".to_string(),
                FieldChange::new(text(current.name.as_str()), text(name)),
            );
        }
    }
    if let Some(contact_name) = &payload.contact_name {
        let old = current.contact_name.as_ref().map(|s| s.as_str());
        if old != Some(contact_name.as_str()) {
            diff.insert(
                "contactName".to_string(),
                FieldChange::new(opt_text(old), text(contact_name)),
            );
        }
    }
    if let Some(email) = &payload.email {
        let old = current.email.as_ref().map(|s| s.as_str());
        if old != Some(email.as_str()) {
            diff.insert(
                "email".to_string(),
                FieldChange::new(opt_text(old), text(email)),
            );
        }
    }
    if let Some(phone) = &payload.phone {
        let old = current.phone.as_ref().map(|s| s.as_str());
        if old != Some(phone.as_str()) {
            diff.insert(
                "phone".to_string(),
                FieldChange::new(opt_text(old), text(phone)),
            );
        }
    }
    if let Some(status) = payload.status {
        if current.status != status {
            diff.insert(
                "status".to_string(),
                FieldChange::new(current.status.to_string(), status.to_string()),
            );
        }
    }
    if let Some(lead_source) = &payload.lead_source {
        let old = current.lead_source.as_ref().map(|s| s.as_str());
        if old != Some(lead_source.as_str()) {
            diff.insert(
                "leadSource".to_string(),
                FieldChange::new(opt_text(old), text(lead_source)),
            );
        }
    }
    if let Some(new_ids) = &payload.assigned_to {
        if let Some(change) =
            assigned_to_change(&current.assigned_to, new_ids, directory).await?
        {
            diff.insert("assignedTo".to_string(), change);
        }
    }

    Ok(diff)
}

/// Applies every field the payload names onto the in-memory document.
/// Runs after the diff so the audit entry and the mutation agree.
pub fn apply_customer_payload(
    customer: &mut CustomerModel,
    payload: &CustomerUpdatePayload,
) -> ApiResult<()> {
    if let Some(name) = &payload.name {
        customer.name = try_bounded(name, "name").map_err(ApiError::ValidationError)?;
    }
    if let Some(contact_name) = &payload.contact_name {
        customer.contact_name =
            Some(try_bounded(contact_name, "contactName").map_err(ApiError::ValidationError)?);
    }
    if let Some(email) = &payload.email {
        customer.email = Some(try_bounded(email, "email").map_err(ApiError::ValidationError)?);
    }
    if let Some(phone) = &payload.phone {
        customer.phone = Some(try_bounded(phone, "phone").map_err(ApiError::ValidationError)?);
    }
    if let Some(status) = payload.status {
        customer.status = status;
    }
    if let Some(lead_source) = &payload.lead_source {
        customer.lead_source =
            Some(try_bounded(lead_source, "leadSource").map_err(ApiError::ValidationError)?);
    }
    if let Some(assigned_to) = &payload.assigned_to {
        customer.assigned_to = assigned_to.clone();
    }
    Ok(())
}

/// Diff for a Ticket update. `meta` is deliberately not diffed — it is
/// merged, not tracked.
pub async fn diff_ticket<R: FindByIds<EmployeeModel>>(
    current: &TicketModel,
    payload: &TicketUpdatePayload,
    directory: &EmployeeDirectory<R>,
) -> ApiResult<BTreeMap<String, FieldChange>> {
    let mut diff = BTreeMap::new();

    if let Some(subject) = &payload.subject {
        if current.subject.as_str() != subject {
            diff.insert(
                "subject".to_string(),
                FieldChange::new(text(current.subject.as_str()), text(subject)),
            );
        }
    }
    if let Some(description) = &payload.description {
        if current.description.as_str() != description {
            diff.insert(
                "description".to_string(),
                FieldChange::new(text(current.description.as_str()), text(description)),
            );
        }
    }
    if let Some(category) = &payload.category {
        let old = current.category.as_ref().map(|s| s.as_str());
        if old != Some(category.as_str()) {
            diff.insert(
                "category".to_string(),
                FieldChange::new(opt_text(old), text(category)),
            );
        }
    }
    if let Some(priority) = payload.priority {
        if current.priority != priority {
            diff.insert(
                "priority".to_string(),
                FieldChange::new(current.priority.to_string(), priority.to_string()),
            );
        }
    }
    if let Some(status) = payload.status {
        if current.status != status {
            diff.insert(
                "status".to_string(),
                FieldChange::new(current.status.to_string(), status.to_string()),
            );
        }
    }
    if let Some(sla_deadline) = payload.sla_deadline {
        if current.sla_deadline != Some(sla_deadline) {
            diff.insert(
                "slaDeadline".to_string(),
                FieldChange::new(
                    opt_datetime(current.sla_deadline),
                    opt_datetime(Some(sla_deadline)),
                ),
            );
        }
    }
    if let Some(new_ids) = &payload.assigned_to {
        if let Some(change) =
            assigned_to_change(&current.assigned_to, new_ids, directory).await?
        {
            diff.insert("assignedTo".to_string(), change);
        }
    }

    Ok(diff)
}

/// Applies a ticket payload, including the shallow meta merge.
pub fn apply_ticket_payload(ticket: &mut TicketModel, payload: &TicketUpdatePayload) -> ApiResult<()> {
    if let Some(subject) = &payload.subject {
        ticket.subject = try_bounded(subject, "subject").map_err(ApiError::ValidationError)?;
    }
    if let Some(description) = &payload.description {
        ticket.description =
            try_bounded(description, "description").map_err(ApiError::ValidationError)?;
    }
    if let Some(category) = &payload.category {
        ticket.category =
            Some(try_bounded(category, "category").map_err(ApiError::ValidationError)?);
    }
    if let Some(priority) = payload.priority {
        ticket.priority = priority;
    }
    if let Some(status) = payload.status {
        ticket.status = status;
    }
    if let Some(sla_deadline) = payload.sla_deadline {
        ticket.sla_deadline = Some(sla_deadline);
    }
    if let Some(assigned_to) = &payload.assigned_to {
        ticket.assigned_to = assigned_to.clone();
    }
    if let Some(meta) = &payload.meta {
        ticket.merge_meta(meta.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helper::TestContext;
    use serde_json::json;

    #[tokio::test]
    async fn identical_payload_produces_empty_diff() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;

        let payload = CustomerUpdatePayload {
            name: Some("Acme Corp".to_string()),
            status: Some(customer.status),
            assigned_to: Some(customer.assigned_to.clone()),
            ..Default::default()
        };
        let diff = diff_customer(&customer, &payload, &ctx.directory()).await?;
        assert!(diff.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn each_changed_field_contributes_one_key() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;

        let payload = CustomerUpdatePayload {
            name: Some("Updated Customer Name".to_string()),
            phone: Some("555-0100".to_string()),
            lead_source: Some("Web".to_string()),
            ..Default::default()
        };
        let diff = diff_customer(&customer, &payload, &ctx.directory()).await?;
        assert_eq!(diff.len(), 3);
        assert_eq!(
            diff["name"],
            FieldChange::new("Acme Corp", "Updated Customer Name")
        );
        assert_eq!(diff["phone"], FieldChange::new(Value::Null, "555-0100"));
        Ok(())
    }

    #[tokio::test]
    async fn assigned_to_diff_uses_display_names_not_ids() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let old_emp = ctx.seed_employee(company_id, "Old Employee").await?;
        let new_emp = ctx.seed_employee(company_id, "New Employee").await?;
        let customer = ctx
            .seed_customer(company_id, "Customer A", &[old_emp.id])
            .await?;

        let payload = CustomerUpdatePayload {
            assigned_to: Some(vec![new_emp.id]),
            ..Default::default()
        };
        let diff = diff_customer(&customer, &payload, &ctx.directory()).await?;
        assert_eq!(
            diff["assignedTo"],
            FieldChange::new("Old Employee", "New Employee")
        );
        Ok(())
    }

    #[tokio::test]
    async fn unresolvable_employee_contributes_nothing() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let known = ctx.seed_employee(company_id, "Known Employee").await?;
        let customer = ctx
            .seed_customer(company_id, "Customer A", &[Uuid::new_v4()])
            .await?;

        let payload = CustomerUpdatePayload {
            assigned_to: Some(vec![known.id]),
            ..Default::default()
        };
        let diff = diff_customer(&customer, &payload, &ctx.directory()).await?;
        // The stale id resolves to nothing, so "from" is the empty join.
        assert_eq!(diff["assignedTo"], FieldChange::new("", "Known Employee"));
        Ok(())
    }

    #[tokio::test]
    async fn same_id_set_in_different_order_is_no_change() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let a = ctx.seed_employee(company_id, "Emp A").await?;
        let b = ctx.seed_employee(company_id, "Emp B").await?;
        let customer = ctx
            .seed_customer(company_id, "Customer A", &[a.id, b.id])
            .await?;

        let payload = CustomerUpdatePayload {
            assigned_to: Some(vec![b.id, a.id]),
            ..Default::default()
        };
        let diff = diff_customer(&customer, &payload, &ctx.directory()).await?;
        assert!(diff.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn ticket_meta_never_appears_in_diff() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;
        let ticket = ctx
            .seed_ticket(company_id, customer.id, "Login broken", &[])
            .await?;

        let mut meta = serde_json::Map::new();
        meta.insert("internalNote".to_string(), json!("call back monday"));
        let payload = TicketUpdatePayload {
            meta: Some(meta),
            ..Default::default()
        };
        let diff = diff_ticket(&ticket, &payload, &ctx.directory()).await?;
        assert!(diff.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn ticket_sla_deadline_is_diffed_as_rfc3339() -> anyhow::Result<()> {
        let ctx = TestContext::new();
        let company_id = Uuid::new_v4();
        let customer = ctx.seed_customer(company_id, "Acme Corp", &[]).await?;
        let ticket = ctx
            .seed_ticket(company_id, customer.id, "Login broken", &[])
            .await?;

        let deadline = "2025-12-31T23:59:59Z".parse()?;
        let payload = TicketUpdatePayload {
            sla_deadline: Some(deadline),
            ..Default::default()
        };
        let diff = diff_ticket(&ticket, &payload, &ctx.directory()).await?;
        assert_eq!(
            diff["slaDeadline"],
            FieldChange::new(Value::Null, "2025-12-31T23:59:59+00:00")
        );
        Ok(())
    }
}
