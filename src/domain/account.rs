//! Account type
//!
//! The one entity this service manages: an opaque id and its balance.
//! Accounts exist implicitly; a missing document reads as "no account" and a
//! first deposit (or a transfer credit) creates one.

use rust_decimal::Decimal;
use serde::Serialize;

/// A ledger account as reported back to clients.
///
/// Balances serialize as JSON numbers, so a response reads
/// `{"id": "alice", "balance": 60.0}` rather than a quoted decimal string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
}

impl Account {
    pub fn new(id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id: id.into(),
            balance,
        }
    }
}
