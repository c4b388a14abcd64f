pub mod diff;
pub mod directory;
pub mod services;
pub mod store;

pub use directory::EmployeeDirectory;
pub use services::{CustomerServiceImpl, EmployeeServiceImpl, TicketServiceImpl};
pub use store::MemoryRepositories;

#[cfg(test)]
pub mod test_helper;
