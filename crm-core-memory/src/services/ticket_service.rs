use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crm_core_api::domain::{
    AuthenticatedUser, TicketUpdateOutcome, TicketUpdatePayload, TicketView,
};
use crm_core_api::error::{ApiError, ApiResult};
use crm_core_api::service::TicketService;
use crm_core_db::models::{AuditAction, AuditEntry, EmployeeModel, TicketModel};
use crm_core_db::repository::{FindById, FindByIds, Save};

use crate::diff::{apply_ticket_payload, diff_ticket};
use crate::directory::EmployeeDirectory;

/// Ticket side of the update pipeline. Same shape as the customer side,
/// plus the shallow `meta` merge that participates in persistence but
/// never in the audit diff.
pub struct TicketServiceImpl<TR, ER> {
    tickets: Arc<TR>,
    directory: EmployeeDirectory<ER>,
}

impl<TR, ER> TicketServiceImpl<TR, ER> {
    pub fn new(tickets: Arc<TR>, directory: EmployeeDirectory<ER>) -> Self {
        Self { tickets, directory }
    }
}

impl<TR, ER> TicketServiceImpl<TR, ER>
where
    TR: FindById<TicketModel> + Save<TicketModel> + Send + Sync,
    ER: FindByIds<EmployeeModel> + Send + Sync,
{
    async fn view(&self, ticket: &TicketModel) -> ApiResult<TicketView> {
        let assigned_to = self
            .directory
            .summaries(&ticket.assigned_to)
            .await
            .map_err(ApiError::persistence)?;
        Ok(TicketView {
            id: ticket.id,
            customer_id: ticket.customer_id,
            subject: ticket.subject.as_str().to_string(),
            description: ticket.description.as_str().to_string(),
            category: ticket.category.as_ref().map(|s| s.as_str().to_string()),
            priority: ticket.priority,
            status: ticket.status,
            assigned_to,
            sla_deadline: ticket.sla_deadline,
            meta: ticket.meta.clone(),
            updated_at: ticket.updated_at,
        })
    }
}

#[async_trait]
impl<TR, ER> TicketService for TicketServiceImpl<TR, ER>
where
    TR: FindById<TicketModel> + Save<TicketModel> + Send + Sync,
    ER: FindByIds<EmployeeModel> + Send + Sync,
{
    async fn update_ticket(
        &self,
        ticket_id: Uuid,
        caller: &AuthenticatedUser,
        payload: TicketUpdatePayload,
    ) -> ApiResult<TicketUpdateOutcome> {
        let mut ticket = self
            .tickets
            .find_by_id(ticket_id)
            .await
            .map_err(ApiError::persistence)?
            .ok_or_else(|| ApiError::NotFound("Ticket not found".to_string()))?;
        if ticket.company_id != caller.company_id {
            return Err(ApiError::Forbidden(
                "ticket belongs to a different company".to_string(),
            ));
        }
        payload.validate()?;

        let diff = diff_ticket(&ticket, &payload, &self.directory).await?;
        let changed = !diff.is_empty();
        // A meta-only update still persists (the merge changed the
        // document) but stays out of the audit log.
        let meta_touched = payload.meta.as_ref().is_some_and(|m| !m.is_empty());
        apply_ticket_payload(&mut ticket, &payload)?;

        if changed {
            ticket.audit.append(AuditEntry::new(
                AuditAction::Updated,
                caller.id,
                caller.display_name(),
                None,
                diff,
            ));
        }

        if changed || meta_touched {
            ticket.updated_at = Utc::now();
            self.tickets
                .save(&ticket)
                .await
                .map_err(ApiError::persistence)?;
        } else {
            debug!(ticket_id = %ticket.id, "update produced no changes");
        }

        let view = self.view(&ticket).await?;
        Ok(TicketUpdateOutcome {
            message: "Ticket updated".to_string(),
            ticket: view,
        })
    }
}
