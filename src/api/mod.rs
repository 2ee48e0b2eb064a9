//! API module
//!
//! HTTP routes for the ledger service.

pub mod routes;

pub use routes::create_router;
