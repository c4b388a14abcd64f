pub mod append_log;
pub mod audit;
pub mod customer;
pub mod employee;
pub mod engagement;
pub mod identifiable;
pub mod tenant_scoped;
pub mod ticket;
pub mod user_account;

// Re-exports
pub use append_log::*;
pub use audit::*;
pub use customer::*;
pub use employee::*;
pub use engagement::*;
pub use identifiable::*;
pub use tenant_scoped::*;
pub use ticket::*;
pub use user_account::*;
