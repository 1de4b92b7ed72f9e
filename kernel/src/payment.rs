// Card Check
//
// Shape validation for card details supplied with an order. No
// payment network is contacted.

use serde::{Deserialize, Serialize};

/// Required length of a card number, in characters.
pub const CARD_NUMBER_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    pub password: String,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("card number must be {CARD_NUMBER_LEN} characters, got {0}")]
    CardNumberLength(usize),

    #[error("card password is empty")]
    MissingPassword,
}

pub fn validate_card(number: &str, password: &str) -> Result<(), PaymentError> {
    let len = number.chars().count();
    if len != CARD_NUMBER_LEN {
        return Err(PaymentError::CardNumberLength(len));
    }
    if password.is_empty() {
        return Err(PaymentError::MissingPassword);
    }
    Ok(())
}

impl CardDetails {
    pub fn validate(&self) -> Result<(), PaymentError> {
        validate_card(&self.number, &self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_chars_with_password_passes() {
        assert_eq!(validate_card("4111111111111111", "1234"), Ok(()));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            validate_card("4111", "1234"),
            Err(PaymentError::CardNumberLength(4))
        );
    }

    #[test]
    fn empty_password_is_rejected() {
        let card = CardDetails {
            number: "4111111111111111".into(),
            password: String::new(),
        };
        assert_eq!(card.validate(), Err(PaymentError::MissingPassword));
    }
}
