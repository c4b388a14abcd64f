use async_trait::async_trait;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for email lookups
///
/// Used to locate the login-account mirror of an employee during status
/// transitions. Email uniqueness within a tenant is enforced at creation,
/// so at most one record comes back.
#[async_trait]
pub trait FindByEmail<T: Identifiable>: Send + Sync {
    /// Find an entity by its email address
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The found entity
    /// * `Ok(None)` - If no entity carries this email
    /// * `Err` - An error if the query could not be executed
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>;
}
