//! ledger_api Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod handlers;
pub mod store;

pub mod config;
mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use domain::{Account, DomainError, Event, EventRequest};
pub use store::{AccountStore, StoreError};
