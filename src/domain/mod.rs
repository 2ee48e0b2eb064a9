//! Domain module
//!
//! Core domain types and business logic.

pub mod account;
pub mod error;
pub mod event;

pub use account::Account;
pub use error::DomainError;
pub use event::{Event, EventRequest};
