use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::{bounded, hash_as_i64};

/// Closed set of auditable actions. Wire strings are snake_case to stay
/// byte-compatible with existing documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    AssignmentRemoved,
    Converted,
    Deleted,
    Restored,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditAction::Created => write!(f, "created"),
            AuditAction::Updated => write!(f, "updated"),
            AuditAction::AssignmentRemoved => write!(f, "assignment_removed"),
            AuditAction::Converted => write!(f, "converted"),
            AuditAction::Deleted => write!(f, "deleted"),
            AuditAction::Restored => write!(f, "restored"),
        }
    }
}

impl FromStr for AuditAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(AuditAction::Created),
            "updated" => Ok(AuditAction::Updated),
            "assignment_removed" => Ok(AuditAction::AssignmentRemoved),
            "converted" => Ok(AuditAction::Converted),
            "deleted" => Ok(AuditAction::Deleted),
            "restored" => Ok(AuditAction::Restored),
            _ => Err(()),
        }
    }
}

/// Before/after pair for one field. Values are JSON so the pair can carry
/// strings, dates, numbers or nulls; the `assignedTo` field records joined
/// display names here, never raw ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub from: serde_json::Value,
    pub to: serde_json::Value,
}

impl FieldChange {
    pub fn new(from: impl Into<serde_json::Value>, to: impl Into<serde_json::Value>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// One immutable mutation record in an entity's audit trail.
///
/// Entries are only ever appended, in event order. `hash` is an integrity
/// hash over the entry with the hash field itself zeroed, computed once at
/// append time; 0 means the entry could not be hashed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub action: AuditAction,
    pub by: Uuid,
    pub by_name: HeaplessString<100>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<HeaplessString<255>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub diff: BTreeMap<String, FieldChange>,
    pub at: DateTime<Utc>,
    pub hash: i64,
}

impl AuditEntry {
    /// Builds a sealed entry stamped with the current time and its
    /// integrity hash. Over-long names and notes are truncated to the
    /// stored bounds rather than rejected; an audit append must not fail
    /// on account of a display string.
    pub fn new(
        action: AuditAction,
        by: Uuid,
        by_name: &str,
        note: Option<&str>,
        diff: BTreeMap<String, FieldChange>,
    ) -> Self {
        let mut entry = Self {
            action,
            by,
            by_name: bounded(by_name),
            note: note.map(bounded),
            diff,
            at: Utc::now(),
            hash: 0,
        };
        entry.hash = hash_as_i64(&entry).unwrap_or(0);
        entry
    }

    /// Recomputes the integrity hash with the stored hash zeroed and
    /// compares it against the stamped value.
    pub fn verify_hash(&self) -> bool {
        let mut unsealed = self.clone();
        unsealed.hash = 0;
        match hash_as_i64(&unsealed) {
            Ok(expected) => expected == self.hash,
            Err(_) => false,
        }
    }
}
