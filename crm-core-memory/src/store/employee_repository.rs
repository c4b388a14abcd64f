use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crm_core_db::models::EmployeeModel;
use crm_core_db::repository::{FindById, FindByIds, Save};

use super::MemoryStore;

#[derive(Clone)]
pub struct EmployeeRepositoryImpl {
    store: Arc<MemoryStore>,
}

impl EmployeeRepositoryImpl {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FindById<EmployeeModel> for EmployeeRepositoryImpl {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<EmployeeModel>, Box<dyn Error + Send + Sync>> {
        let employees = self.store.employees.read().await;
        Ok(employees.get(&id).cloned())
    }
}

#[async_trait]
impl FindByIds<EmployeeModel> for EmployeeRepositoryImpl {
    async fn find_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<EmployeeModel>, Box<dyn Error + Send + Sync>> {
        let employees = self.store.employees.read().await;
        Ok(ids.iter().filter_map(|id| employees.get(id).cloned()).collect())
    }
}

#[async_trait]
impl Save<EmployeeModel> for EmployeeRepositoryImpl {
    async fn save(&self, entity: &EmployeeModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut employees = self.store.employees.write().await;
        employees.insert(entity.id, entity.clone());
        Ok(())
    }
}
