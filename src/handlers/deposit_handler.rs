//! Deposit Handler
//!
//! Credits a destination account, creating it on first touch.

use rust_decimal::Decimal;

use crate::domain::Account;
use crate::error::AppError;
use crate::store::AccountStore;

/// Handler for deposit events
pub struct DepositHandler {
    store: AccountStore,
}

impl DepositHandler {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    /// Credit `amount` to `destination`. A missing account starts at zero.
    ///
    /// Plain read-then-write: two concurrent deposits to the same account can
    /// lose an update. Single-key mutations deliberately skip the transaction
    /// path; only transfer pays for it.
    pub async fn execute(&self, destination: String, amount: Decimal) -> Result<Account, AppError> {
        let current = self
            .store
            .get(&destination)
            .await
            .unwrap_or(Decimal::ZERO);
        let balance = current + amount;
        self.store.set(&destination, balance).await;

        tracing::debug!(account = %destination, %balance, "deposit applied");

        Ok(Account::new(destination, balance))
    }
}
