pub mod customer_repository;
pub mod employee_repository;
pub mod ticket_repository;
pub mod user_account_repository;

// Re-exports
pub use customer_repository::CustomerRepositoryImpl;
pub use employee_repository::EmployeeRepositoryImpl;
pub use ticket_repository::TicketRepositoryImpl;
pub use user_account_repository::UserAccountRepositoryImpl;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crm_core_db::models::{CustomerModel, EmployeeModel, TicketModel, UserAccountModel};

/// Shared in-memory document store backing all repository handles.
///
/// Each map is keyed by document id; a save replaces the whole document,
/// so field mutations and appended audit entries land in one write.
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) employees: RwLock<HashMap<Uuid, EmployeeModel>>,
    pub(crate) user_accounts: RwLock<HashMap<Uuid, UserAccountModel>>,
    pub(crate) customers: RwLock<HashMap<Uuid, CustomerModel>>,
    pub(crate) tickets: RwLock<HashMap<Uuid, TicketModel>>,
}

/// Aggregate of every repository handle over one shared store.
pub struct MemoryRepositories {
    pub employee_repository: EmployeeRepositoryImpl,
    pub user_account_repository: UserAccountRepositoryImpl,
    pub customer_repository: CustomerRepositoryImpl,
    pub ticket_repository: TicketRepositoryImpl,
}

impl MemoryRepositories {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            employee_repository: EmployeeRepositoryImpl::new(Arc::clone(&store)),
            user_account_repository: UserAccountRepositoryImpl::new(Arc::clone(&store)),
            customer_repository: CustomerRepositoryImpl::new(Arc::clone(&store)),
            ticket_repository: TicketRepositoryImpl::new(store),
        }
    }
}

impl Default for MemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}
