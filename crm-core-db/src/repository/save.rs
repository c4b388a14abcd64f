use async_trait::async_trait;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for persisting one whole document
///
/// One document, one write: field mutations and appended audit entries
/// committed by the same call, so a saved document can never show updated
/// fields without the audit entry that explains them (or vice versa).
/// There is no cross-document transaction on top of this.
#[async_trait]
pub trait Save<T: Identifiable>: Send + Sync {
    /// Persist the entity, replacing the stored document
    ///
    /// # Returns
    /// * `Ok(())` - The document was written
    /// * `Err` - An error if the write could not be executed
    async fn save(&self, entity: &T) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
