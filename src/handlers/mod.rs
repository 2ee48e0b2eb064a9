//! Event handlers
//!
//! One handler per event kind, each constructed over the account store.
//! Deposit and withdraw are single-document read-then-write; transfer is the
//! only path that runs inside a store transaction.

mod deposit_handler;
mod transfer_handler;
mod withdraw_handler;


pub use deposit_handler::DepositHandler;
pub use transfer_handler::{TransferHandler, TransferResult};
pub use withdraw_handler::WithdrawHandler;
