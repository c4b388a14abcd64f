use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::common_enums::CustomerStatus;

/// Partial update for a Customer document.
///
/// The tagged optional fields double as the diff allow-list: a field the
/// payload does not name is never touched and never produces a diff entry,
/// and unknown keys in the incoming JSON are dropped at deserialization.
/// Field bounds match the stored document so an accepted payload always
/// applies cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdatePayload {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "contact name too long"))]
    pub contact_name: Option<String>,
    #[validate(email(message = "invalid email"), length(max = 100))]
    pub email: Option<String>,
    #[validate(length(max = 30, message = "phone too long"))]
    pub phone: Option<String>,
    pub status: Option<CustomerStatus>,
    #[validate(length(max = 50, message = "lead source too long"))]
    pub lead_source: Option<String>,
    /// Replaces the full assignment set; compared as a set, diffed by
    /// resolved employee names.
    pub assigned_to: Option<Vec<Uuid>>,
}
