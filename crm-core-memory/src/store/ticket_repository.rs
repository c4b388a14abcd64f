use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crm_core_db::models::TicketModel;
use crm_core_db::repository::{FindByAssignedEmployee, FindById, Save};

use super::MemoryStore;

#[derive(Clone)]
pub struct TicketRepositoryImpl {
    store: Arc<MemoryStore>,
}

impl TicketRepositoryImpl {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FindById<TicketModel> for TicketRepositoryImpl {
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<TicketModel>, Box<dyn Error + Send + Sync>> {
        let tickets = self.store.tickets.read().await;
        Ok(tickets.get(&id).cloned())
    }
}

#[async_trait]
impl FindByAssignedEmployee<TicketModel> for TicketRepositoryImpl {
    async fn find_by_assigned_employee(
        &self,
        employee_id: Uuid,
        company_id: Uuid,
    ) -> Result<Vec<TicketModel>, Box<dyn Error + Send + Sync>> {
        let tickets = self.store.tickets.read().await;
        Ok(tickets
            .values()
            .filter(|ticket| {
                ticket.company_id == company_id && ticket.assigned_to.contains(&employee_id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Save<TicketModel> for TicketRepositoryImpl {
    async fn save(&self, entity: &TicketModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut tickets = self.store.tickets.write().await;
        tickets.insert(entity.id, entity.clone());
        Ok(())
    }
}
