use async_trait::async_trait;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for bulk-loading entities by ID
///
/// Used by the diff engine to resolve employee id sets to display names.
/// Ids that do not resolve are simply absent from the result; a partially
/// resolvable set is not an error.
#[async_trait]
pub trait FindByIds<T: Identifiable>: Send + Sync {
    /// Find every entity whose id appears in `ids`
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The found entities, in no guaranteed order;
    ///   missing ids contribute nothing
    /// * `Err` - An error if the query could not be executed
    async fn find_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
