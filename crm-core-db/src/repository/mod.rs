pub mod find_by_assigned_employee;
pub mod find_by_email;
pub mod find_by_id;
pub mod find_by_ids;
pub mod save;

// Re-exports
pub use find_by_assigned_employee::*;
pub use find_by_email::*;
pub use find_by_id::*;
pub use find_by_ids::*;
pub use save::*;
