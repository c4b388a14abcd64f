use moka::future::Cache;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crm_core_api::domain::EmployeeSummary;
use crm_core_db::models::EmployeeModel;
use crm_core_db::repository::FindByIds;

/// Read-shared employee lookup used by diff resolution and view building.
///
/// Display names are cached; employee display names do not change inside
/// this subsystem, so entries never need invalidation. Ids that do not
/// resolve (deleted or foreign employees) contribute nothing — a partial
/// resolution is not an error.
pub struct EmployeeDirectory<R> {
    repository: Arc<R>,
    name_cache: Cache<Uuid, String>,
}

impl<R> Clone for EmployeeDirectory<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            name_cache: self.name_cache.clone(),
        }
    }
}

impl<R: FindByIds<EmployeeModel>> EmployeeDirectory<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            name_cache: Cache::new(10_000),
        }
    }

    /// Resolves ids to display names, in input order, skipping ids that
    /// do not resolve.
    pub async fn resolve_names(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<String>, Box<dyn Error + Send + Sync>> {
        let mut resolved: HashMap<Uuid, String> = HashMap::new();
        let mut misses = Vec::new();
        for id in ids {
            if resolved.contains_key(id) {
                continue;
            }
            match self.name_cache.get(id).await {
                Some(name) => {
                    resolved.insert(*id, name);
                }
                None => misses.push(*id),
            }
        }

        if !misses.is_empty() {
            for employee in self.repository.find_by_ids(&misses).await? {
                let name = employee.name.as_str().to_string();
                self.name_cache.insert(employee.id, name.clone()).await;
                resolved.insert(employee.id, name);
            }
        }

        Ok(ids.iter().filter_map(|id| resolved.get(id).cloned()).collect())
    }

    /// Resolved names joined into one human-readable string.
    pub async fn joined_names(
        &self,
        ids: &[Uuid],
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        Ok(self.resolve_names(ids).await?.join(", "))
    }

    /// Full display objects for presentation, unresolvable ids dropped.
    pub async fn summaries(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<EmployeeSummary>, Box<dyn Error + Send + Sync>> {
        let employees = self.repository.find_by_ids(ids).await?;
        Ok(employees
            .into_iter()
            .map(|employee| EmployeeSummary {
                id: employee.id,
                name: employee.name.as_str().to_string(),
                email: employee.email.as_str().to_string(),
                role: employee.role.as_str().to_string(),
            })
            .collect())
    }
}
