//! Withdraw Handler
//!
//! Debits an origin account, refusing to take it below zero.

use rust_decimal::Decimal;

use crate::domain::{Account, DomainError};
use crate::error::AppError;
use crate::store::AccountStore;

/// Handler for withdraw events
pub struct WithdrawHandler {
    store: AccountStore,
}

impl WithdrawHandler {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    /// Debit `amount` from `origin`.
    ///
    /// A missing origin is the zero-balance signal; an origin with less than
    /// `amount` fails with no partial withdrawal. Same read-then-write race
    /// caveat as deposit.
    pub async fn execute(&self, origin: String, amount: Decimal) -> Result<Account, AppError> {
        let current = self
            .store
            .get(&origin)
            .await
            .ok_or(DomainError::AccountMissing)?;

        if current < amount {
            return Err(DomainError::InsufficientFunds.into());
        }

        let balance = current - amount;
        self.store.set(&origin, balance).await;

        tracing::debug!(account = %origin, %balance, "withdraw applied");

        Ok(Account::new(origin, balance))
    }
}
