use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common_enums::{
    CustomerStatus, EmployeeStatus, RecordState, TicketPriority, TicketStatus,
};

/// Denormalized employee reference for presentation. Assignment id sets
/// are resolved into these before an update response leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Updated-customer success shape: the already-mutated entity, with
/// `assigned_to` resolved to display objects. Never re-fetched after the
/// write, so it matches what the audit log claims happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: Uuid,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: CustomerStatus,
    pub lead_source: Option<String>,
    pub assigned_to: Vec<EmployeeSummary>,
    pub state: RecordState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub subject: String,
    pub description: String,
    pub category: Option<String>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub assigned_to: Vec<EmployeeSummary>,
    pub sla_deadline: Option<DateTime<Utc>>,
    pub meta: serde_json::Map<String, serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

/// Engagement append success shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementOutcome {
    pub message: String,
}

/// Ticket update success shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketUpdateOutcome {
    pub message: String,
    pub ticket: TicketView,
}

/// Outcome of an employee status transition.
///
/// Only the customer side of the cascade is counted here; the ticket side
/// is logged but not surfaced, matching the existing caller contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusToggleOutcome {
    pub status: EmployeeStatus,
    pub affected_customer_count: usize,
    pub message: String,
}
