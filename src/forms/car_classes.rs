use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::car_class::NewCarClass;
use crate::forms::sanitize_inline_text;

/// Maximum length allowed for a car class name.
const NAME_MAX_LEN: usize = 64;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the car class form helpers.
pub type CarClassFormResult<T> = Result<T, CarClassFormError>;

/// Errors that can occur while processing car class forms.
#[derive(Debug, Error)]
pub enum CarClassFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("car class name cannot be empty")]
    EmptyName,
    #[error("{field} cannot be negative")]
    NegativeAmount { field: &'static str },
}

/// JSON payload submitted to add a car class.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCarClassForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    pub base_price: Decimal,
    #[serde(default)]
    pub per_km_rate: Decimal,
    #[serde(default)]
    pub per_hour_rate: Decimal,
    #[validate(range(min = 0, max = 24))]
    pub min_hours: i32,
    #[serde(default)]
    pub airport_fee: Decimal,
}

impl AddCarClassForm {
    /// Validates and sanitizes the payload into a domain `NewCarClass`.
    pub fn into_new_car_class(self) -> CarClassFormResult<NewCarClass> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CarClassFormError::EmptyName);
        }

        for (field, amount) in [
            ("base price", self.base_price),
            ("per km rate", self.per_km_rate),
            ("per hour rate", self.per_hour_rate),
            ("airport fee", self.airport_fee),
        ] {
            if amount < Decimal::ZERO {
                return Err(CarClassFormError::NegativeAmount { field });
            }
        }

        Ok(NewCarClass::new(name)
            .with_base_price(self.base_price)
            .with_per_km_rate(self.per_km_rate)
            .with_hourly(self.per_hour_rate, self.min_hours)
            .with_airport_fee(self.airport_fee))
    }
}
