//! Shared setup for service and diff tests: one in-memory store, seeded
//! documents, and fully wired service instances.

use anyhow::anyhow;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crm_core_api::domain::{
    AuthenticatedUser, CustomerStatus, EmployeeStatus, RecordState, TicketPriority, TicketStatus,
};
use crm_core_db::models::{
    AppendOnlyLog, CustomerModel, EmployeeModel, TicketModel, UserAccountModel,
};
use crm_core_db::repository::Save;
use crm_core_db::utils::bounded;

use crate::directory::EmployeeDirectory;
use crate::services::{CustomerServiceImpl, EmployeeServiceImpl, TicketServiceImpl};
use crate::store::{
    CustomerRepositoryImpl, EmployeeRepositoryImpl, MemoryRepositories, TicketRepositoryImpl,
    UserAccountRepositoryImpl,
};

pub struct TestContext {
    pub repos: MemoryRepositories,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            repos: MemoryRepositories::new(),
        }
    }

    pub fn directory(&self) -> EmployeeDirectory<EmployeeRepositoryImpl> {
        EmployeeDirectory::new(Arc::new(self.repos.employee_repository.clone()))
    }

    pub fn customer_service(
        &self,
    ) -> CustomerServiceImpl<CustomerRepositoryImpl, EmployeeRepositoryImpl> {
        CustomerServiceImpl::new(
            Arc::new(self.repos.customer_repository.clone()),
            self.directory(),
        )
    }

    pub fn ticket_service(&self) -> TicketServiceImpl<TicketRepositoryImpl, EmployeeRepositoryImpl> {
        TicketServiceImpl::new(
            Arc::new(self.repos.ticket_repository.clone()),
            self.directory(),
        )
    }

    pub fn employee_service(
        &self,
    ) -> EmployeeServiceImpl<
        EmployeeRepositoryImpl,
        UserAccountRepositoryImpl,
        CustomerRepositoryImpl,
        TicketRepositoryImpl,
    > {
        EmployeeServiceImpl::new(
            Arc::new(self.repos.employee_repository.clone()),
            Arc::new(self.repos.user_account_repository.clone()),
            Arc::new(self.repos.customer_repository.clone()),
            Arc::new(self.repos.ticket_repository.clone()),
        )
    }

    pub fn caller(&self, company_id: Uuid) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            name: Some("Manager John".to_string()),
            email: "manager@test.com".to_string(),
            company_id,
        }
    }

    pub async fn seed_employee(
        &self,
        company_id: Uuid,
        name: &str,
    ) -> anyhow::Result<EmployeeModel> {
        let email = format!("{}@test.com", name.to_lowercase().replace(' ', "."));
        let employee = EmployeeModel {
            id: Uuid::new_v4(),
            company_id,
            name: bounded(name),
            email: bounded(&email),
            department: Some(bounded("Support")),
            role: bounded("Employee"),
            status: EmployeeStatus::Active,
            created_at: Utc::now(),
        };
        self.repos
            .employee_repository
            .save(&employee)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(employee)
    }

    pub async fn seed_user_account(
        &self,
        company_id: Uuid,
        name: &str,
        email: &str,
    ) -> anyhow::Result<UserAccountModel> {
        let account = UserAccountModel {
            id: Uuid::new_v4(),
            company_id,
            name: bounded(name),
            email: bounded(email),
            status: EmployeeStatus::Active,
        };
        self.repos
            .user_account_repository
            .save(&account)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(account)
    }

    pub async fn seed_customer(
        &self,
        company_id: Uuid,
        name: &str,
        assigned_to: &[Uuid],
    ) -> anyhow::Result<CustomerModel> {
        let customer = CustomerModel {
            id: Uuid::new_v4(),
            company_id,
            name: bounded(name),
            contact_name: None,
            email: None,
            phone: None,
            status: CustomerStatus::Lead,
            lead_source: None,
            assigned_to: assigned_to.to_vec(),
            audit: AppendOnlyLog::new(),
            engagement_history: AppendOnlyLog::new(),
            state: RecordState::Active,
            deleted_at: None,
            deleted_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.repos
            .customer_repository
            .save(&customer)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(customer)
    }

    pub async fn seed_ticket(
        &self,
        company_id: Uuid,
        customer_id: Uuid,
        subject: &str,
        assigned_to: &[Uuid],
    ) -> anyhow::Result<TicketModel> {
        let ticket = TicketModel {
            id: Uuid::new_v4(),
            company_id,
            customer_id,
            subject: bounded(subject),
            description: bounded("seeded ticket"),
            category: None,
            priority: TicketPriority::Medium,
            status: TicketStatus::Open,
            assigned_to: assigned_to.to_vec(),
            sla_deadline: None,
            meta: serde_json::Map::new(),
            audit: AppendOnlyLog::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.repos
            .ticket_repository
            .save(&ticket)
            .await
            .map_err(|e| anyhow!(e))?;
        Ok(ticket)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
