pub mod auth;
pub mod common_enums;
pub mod customer;
pub mod engagement;
pub mod ticket;
pub mod views;

// Re-exports
pub use auth::*;
pub use common_enums::*;
pub use customer::*;
pub use engagement::*;
pub use ticket::*;
pub use views::*;
