//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Business-rule violations and request-shape failures.
///
/// These are independent of the web layer; `AppError` decides the HTTP
/// mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required request field is absent.
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    /// The `type` field names no known event kind.
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),

    /// Amount is zero, negative, or otherwise unusable.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Withdraw or transfer would push the origin balance below zero.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Transfer where origin and destination are the same account.
    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,

    /// An account was absent where one was expected (withdraw origin,
    /// transfer origin, balance query). Surfaced on the wire as the literal
    /// zero-balance signal, not as an error body.
    #[error("Account not found")]
    AccountMissing,
}

impl DomainError {
    /// Validation errors are detected before any mutation is attempted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParam(_) | Self::UnknownEventType(_) | Self::InvalidAmount(_)
        )
    }
}
