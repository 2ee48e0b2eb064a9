//! Ledger events
//!
//! The `/event` endpoint dispatches on a `type` field. Requests arrive as a
//! loose bag of optional fields ([`EventRequest`]) and are validated into an
//! [`Event`] before any store access, so every missing field is reported by
//! name and nothing is mutated on a bad request.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::DomainError;

/// Raw `/event` request body. Every field optional; `validate` enforces what
/// each event kind actually requires.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// A validated mutation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Deposit {
        destination: String,
        amount: Decimal,
    },
    Withdraw {
        origin: String,
        amount: Decimal,
    },
    Transfer {
        origin: String,
        amount: Decimal,
        destination: String,
    },
}

impl EventRequest {
    /// Check required fields for the named event kind and build the event.
    pub fn validate(self) -> Result<Event, DomainError> {
        let kind = self.kind.ok_or(DomainError::MissingParam("type"))?;

        match kind.as_str() {
            "deposit" => Ok(Event::Deposit {
                destination: self
                    .destination
                    .ok_or(DomainError::MissingParam("destination"))?,
                amount: validate_amount(self.amount)?,
            }),
            "withdraw" => Ok(Event::Withdraw {
                origin: self.origin.ok_or(DomainError::MissingParam("origin"))?,
                amount: validate_amount(self.amount)?,
            }),
            "transfer" => {
                let origin = self.origin.ok_or(DomainError::MissingParam("origin"))?;
                let amount = validate_amount(self.amount)?;
                let destination = self
                    .destination
                    .ok_or(DomainError::MissingParam("destination"))?;
                if origin == destination {
                    return Err(DomainError::SameAccountTransfer);
                }
                Ok(Event::Transfer {
                    origin,
                    amount,
                    destination,
                })
            }
            other => Err(DomainError::UnknownEventType(other.to_string())),
        }
    }
}

fn validate_amount(amount: Option<Decimal>) -> Result<Decimal, DomainError> {
    let amount = amount.ok_or(DomainError::MissingParam("amount"))?;
    if amount <= Decimal::ZERO {
        return Err(DomainError::InvalidAmount(format!(
            "must be positive (got {amount})"
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(json: &str) -> EventRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deposit_validates() {
        let event = request(r#"{"type":"deposit","destination":"alice","amount":100}"#)
            .validate()
            .unwrap();
        assert_eq!(
            event,
            Event::Deposit {
                destination: "alice".to_string(),
                amount: dec!(100),
            }
        );
    }

    #[test]
    fn missing_type_is_named() {
        let err = request(r#"{"destination":"alice","amount":100}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingParam("type"));
    }

    #[test]
    fn deposit_without_destination_is_named() {
        let err = request(r#"{"type":"deposit","amount":100}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingParam("destination"));
    }

    #[test]
    fn withdraw_without_origin_is_named() {
        let err = request(r#"{"type":"withdraw","amount":10}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingParam("origin"));
    }

    #[test]
    fn transfer_requires_all_three_fields() {
        let err = request(r#"{"type":"transfer","origin":"a","amount":10}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, DomainError::MissingParam("destination"));
    }

    #[test]
    fn transfer_to_self_is_rejected() {
        let err = request(r#"{"type":"transfer","origin":"a","amount":10,"destination":"a"}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, DomainError::SameAccountTransfer);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = request(r#"{"type":"mint","destination":"a","amount":10}"#)
            .validate()
            .unwrap_err();
        assert_eq!(err, DomainError::UnknownEventType("mint".to_string()));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let err = request(r#"{"type":"deposit","destination":"a","amount":0}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));

        let err = request(r#"{"type":"deposit","destination":"a","amount":-5}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
    }

    #[test]
    fn string_amounts_parse_too() {
        let event = request(r#"{"type":"deposit","destination":"a","amount":"10.50"}"#)
            .validate()
            .unwrap();
        assert_eq!(
            event,
            Event::Deposit {
                destination: "a".to_string(),
                amount: dec!(10.50),
            }
        );
    }
}
