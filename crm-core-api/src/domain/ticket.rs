use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::common_enums::{TicketPriority, TicketStatus};

/// Partial update for a Ticket document.
///
/// `meta` is the one field outside the diff allow-list: its keys (agent
/// scratch notes such as `internalNote`) are shallow-merged into the
/// ticket's meta object and never appear in audit diffs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdatePayload {
    #[validate(length(min = 1, max = 150, message = "subject must be 1-150 characters"))]
    pub subject: Option<String>,
    #[validate(length(max = 1000, message = "description too long"))]
    pub description: Option<String>,
    #[validate(length(max = 50, message = "category too long"))]
    pub category: Option<String>,
    pub priority: Option<TicketPriority>,
    pub status: Option<TicketStatus>,
    pub assigned_to: Option<Vec<Uuid>>,
    pub sla_deadline: Option<DateTime<Utc>>,
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}
