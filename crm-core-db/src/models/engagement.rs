use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::bounded;

/// One immutable customer-interaction record.
///
/// `kind` is stored as free text; call/sms/email/note/meeting are the
/// documented values but membership is not enforced at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementEntry {
    #[serde(rename = "type")]
    pub kind: HeaplessString<20>,
    pub summary: HeaplessString<250>,
    pub at: DateTime<Utc>,
    pub by: Uuid,
    pub by_name: HeaplessString<100>,
}

impl EngagementEntry {
    pub fn new(kind: &str, summary: &str, at: DateTime<Utc>, by: Uuid, by_name: &str) -> Self {
        Self {
            kind: bounded(kind),
            summary: bounded(summary),
            at,
            by,
            by_name: bounded(by_name),
        }
    }
}
