//! Transfer Handler
//!
//! Moves funds between two accounts inside a single store transaction, so the
//! debit and credit land together or not at all.

use rust_decimal::Decimal;

use crate::domain::{Account, DomainError};
use crate::error::AppError;
use crate::store::{AccountStore, TxOutcome};

/// Both sides of a committed transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferResult {
    pub origin: Account,
    pub destination: Account,
}

/// Outcome of the transaction body. Business aborts are values so the store
/// can distinguish them from transaction-level failures.
enum TransferOutcome {
    Committed {
        origin_balance: Decimal,
        destination_balance: Decimal,
    },
    OriginMissing,
    InsufficientFunds,
}

/// Handler for transfer events
pub struct TransferHandler {
    store: AccountStore,
}

impl TransferHandler {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    /// Move `amount` from `origin` to `destination` atomically.
    ///
    /// A missing destination is created as part of the commit, starting from
    /// zero. Conservation holds for every committed transfer: the two new
    /// balances sum to the two old ones. Conflicting concurrent transfers are
    /// retried by the store; retry exhaustion surfaces as a store error.
    pub async fn execute(
        &self,
        origin: String,
        amount: Decimal,
        destination: String,
    ) -> Result<TransferResult, AppError> {
        let outcome = self
            .store
            .run_transaction(&[origin.as_str(), destination.as_str()], |snap| {
                let Some(origin_balance) = snap.balance(&origin) else {
                    return TxOutcome::Abort(TransferOutcome::OriginMissing);
                };
                if origin_balance < amount {
                    return TxOutcome::Abort(TransferOutcome::InsufficientFunds);
                }
                let destination_balance =
                    snap.balance(&destination).unwrap_or(Decimal::ZERO);

                let new_origin = origin_balance - amount;
                let new_destination = destination_balance + amount;

                TxOutcome::Commit {
                    writes: vec![
                        (origin.clone(), new_origin),
                        (destination.clone(), new_destination),
                    ],
                    value: TransferOutcome::Committed {
                        origin_balance: new_origin,
                        destination_balance: new_destination,
                    },
                }
            })
            .await?;

        match outcome {
            TransferOutcome::Committed {
                origin_balance,
                destination_balance,
            } => {
                tracing::debug!(
                    from = %origin,
                    to = %destination,
                    %amount,
                    "transfer committed"
                );
                Ok(TransferResult {
                    origin: Account::new(origin, origin_balance),
                    destination: Account::new(destination, destination_balance),
                })
            }
            TransferOutcome::OriginMissing => Err(DomainError::AccountMissing.into()),
            TransferOutcome::InsufficientFunds => Err(DomainError::InsufficientFunds.into()),
        }
    }
}
