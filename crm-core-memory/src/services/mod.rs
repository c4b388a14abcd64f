pub mod customer_service;
pub mod employee_service;
pub mod ticket_service;

// Re-exports
pub use customer_service::CustomerServiceImpl;
pub use employee_service::EmployeeServiceImpl;
pub use ticket_service::TicketServiceImpl;
