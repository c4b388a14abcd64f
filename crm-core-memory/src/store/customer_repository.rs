use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crm_core_db::models::CustomerModel;
use crm_core_db::repository::{FindByAssignedEmployee, FindById, Save};

use super::MemoryStore;

#[derive(Clone)]
pub struct CustomerRepositoryImpl {
    store: Arc<MemoryStore>,
}

impl CustomerRepositoryImpl {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FindById<CustomerModel> for CustomerRepositoryImpl {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<CustomerModel>, Box<dyn Error + Send + Sync>> {
        let customers = self.store.customers.read().await;
        Ok(customers.get(&id).cloned())
    }
}

#[async_trait]
impl FindByAssignedEmployee<CustomerModel> for CustomerRepositoryImpl {
    /// Tenant-scoped scan excluding soft-deleted documents.
    async fn find_by_assigned_employee(
        &self,
        employee_id: Uuid,
        company_id: Uuid,
    ) -> Result<Vec<CustomerModel>, Box<dyn Error + Send + Sync>> {
        let customers = self.store.customers.read().await;
        Ok(customers
            .values()
            .filter(|customer| {
                customer.company_id == company_id
                    && !customer.is_deleted()
                    && customer.assigned_to.contains(&employee_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Save<CustomerModel> for CustomerRepositoryImpl {
    async fn save(&self, entity: &CustomerModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut customers = self.store.customers.write().await;
        customers.insert(entity.id, entity.clone());
        Ok(())
    }
}
