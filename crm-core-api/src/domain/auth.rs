use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated caller behind every operation in this subsystem.
///
/// Produced by the (out-of-scope) HTTP/auth layer; carries exactly the
/// identity fields audit entries and tenant checks need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    /// Display name; may be unset for accounts created before profile
    /// completion.
    pub name: Option<String>,
    pub email: String,
    /// The caller's tenant. Every read and write is scoped to it.
    pub company_id: Uuid,
}

impl AuthenticatedUser {
    /// Display name with email fallback when no name is set.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }
}
