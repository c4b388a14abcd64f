use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;

use crm_core_db::models::UserAccountModel;
use crm_core_db::repository::{FindByEmail, Save};

use super::MemoryStore;

#[derive(Clone)]
pub struct UserAccountRepositoryImpl {
    store: Arc<MemoryStore>,
}

impl UserAccountRepositoryImpl {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FindByEmail<UserAccountModel> for UserAccountRepositoryImpl {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccountModel>, Box<dyn Error + Send + Sync>> {
        let accounts = self.store.user_accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.email.as_str() == email)
            .cloned())
    }
}

#[async_trait]
impl Save<UserAccountModel> for UserAccountRepositoryImpl {
    async fn save(&self, entity: &UserAccountModel) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut accounts = self.store.user_accounts.write().await;
        accounts.insert(entity.id, entity.clone());
        Ok(())
    }
}
