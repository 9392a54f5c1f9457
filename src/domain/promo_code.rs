use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a promo code cannot be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PromoCodeError {
    #[error("promo code `{0}` is not active")]
    Inactive(String),
    #[error("promo code `{0}` is not valid yet")]
    NotYetValid(String),
    #[error("promo code `{0}` has expired")]
    Expired(String),
}

/// Discount code redeemable against a quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoCode {
    pub id: i32,
    /// Upper-case code entered by customers.
    pub code: String,
    /// Percentage taken off the total, 0..=100.
    pub percent_off: Option<i32>,
    /// Fixed amount taken off the total.
    pub amount_off: Option<Decimal>,
    pub active: bool,
    pub valid_from: NaiveDateTime,
    pub valid_to: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl PromoCode {
    /// Ensure the code may be redeemed at `now`; both bounds are inclusive.
    pub fn check_valid_at(&self, now: NaiveDateTime) -> Result<(), PromoCodeError> {
        if !self.active {
            return Err(PromoCodeError::Inactive(self.code.clone()));
        }
        if now < self.valid_from {
            return Err(PromoCodeError::NotYetValid(self.code.clone()));
        }
        if now > self.valid_to {
            return Err(PromoCodeError::Expired(self.code.clone()));
        }
        Ok(())
    }
}

/// Payload required to insert a new promo code.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromoCode {
    pub code: String,
    pub percent_off: Option<i32>,
    pub amount_off: Option<Decimal>,
    pub active: bool,
    pub valid_from: NaiveDateTime,
    pub valid_to: NaiveDateTime,
}

impl NewPromoCode {
    /// Build an active code valid between the given bounds. The code is
    /// normalised to upper case.
    pub fn new(code: &str, valid_from: NaiveDateTime, valid_to: NaiveDateTime) -> Self {
        Self {
            code: normalize_code(code),
            percent_off: None,
            amount_off: None,
            active: true,
            valid_from,
            valid_to,
        }
    }

    #[must_use]
    pub fn with_percent_off(mut self, percent_off: i32) -> Self {
        self.percent_off = Some(percent_off);
        self
    }

    #[must_use]
    pub fn with_amount_off(mut self, amount_off: Decimal) -> Self {
        self.amount_off = Some(amount_off);
        self
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// Canonical form used for storage and lookups.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
