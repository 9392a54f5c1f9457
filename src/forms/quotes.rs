use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::promo_code::normalize_code;
use crate::domain::trip::{BookingType, InvalidTripError};

/// Longest transfer distance accepted, in kilometres.
pub const MAX_DISTANCE_KM: Decimal = dec!(100000);
/// Longest hourly booking accepted, in hours.
pub const MAX_DURATION_HOURS: Decimal = dec!(1000);

/// Result type returned by the quote form helpers.
pub type QuoteFormResult<T> = Result<T, QuoteFormError>;

/// Errors that can occur while processing a quote request.
#[derive(Debug, Error)]
pub enum QuoteFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The trip details cannot be priced.
    #[error(transparent)]
    InvalidTrip(#[from] InvalidTripError),
    /// The currency is not a three letter code.
    #[error("invalid currency code `{0}`")]
    InvalidCurrency(String),
    /// A trip measure exceeds the accepted maximum.
    #[error("{field} must not exceed {max}")]
    OutOfRange { field: &'static str, max: Decimal },
}

/// JSON payload submitted to request a price for a trip.
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequestForm {
    /// Car class whose rate card is used.
    #[validate(range(min = 1))]
    pub car_class_id: i32,
    /// `transfer` or `hourly`.
    #[validate(length(min = 1, max = 32))]
    pub booking_type: String,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    /// Required for transfers.
    #[serde(default)]
    pub distance_km: Option<Decimal>,
    /// Required for hourly bookings.
    #[serde(default)]
    pub duration_hours: Option<Decimal>,
    #[serde(default)]
    #[validate(range(min = 0, max = 1440))]
    pub waiting_minutes: i32,
    #[serde(default)]
    pub is_airport_pickup: bool,
    /// ISO 4217 code; the configured default is used when absent.
    #[serde(default)]
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 20))]
    pub promo_code: Option<String>,
}

/// Normalized quote request.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub car_class_id: i32,
    pub booking_type: BookingType,
    pub pickup_datetime: NaiveDateTime,
    pub distance_km: Option<Decimal>,
    pub duration_hours: Option<Decimal>,
    pub waiting_minutes: i32,
    pub is_airport_pickup: bool,
    /// Upper-case currency code, if the caller supplied one.
    pub currency: Option<String>,
    /// Upper-case promo code, if the caller supplied one.
    pub promo_code: Option<String>,
}

impl QuoteRequestForm {
    /// Validates the payload and converts it into a [`QuoteRequest`].
    pub fn into_quote_request(self) -> QuoteFormResult<QuoteRequest> {
        self.validate()?;

        let booking_type = self.booking_type.parse::<BookingType>()?;
        check_at_most(self.distance_km, MAX_DISTANCE_KM, "distance_km")?;
        check_at_most(self.duration_hours, MAX_DURATION_HOURS, "duration_hours")?;

        let currency = match self.currency {
            Some(code) => {
                let code = code.trim().to_uppercase();
                if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(QuoteFormError::InvalidCurrency(code));
                }
                Some(code)
            }
            None => None,
        };

        let promo_code = self
            .promo_code
            .map(|code| normalize_code(&code))
            .filter(|code| !code.is_empty());

        Ok(QuoteRequest {
            car_class_id: self.car_class_id,
            booking_type,
            pickup_datetime: NaiveDateTime::new(self.pickup_date, self.pickup_time),
            distance_km: self.distance_km,
            duration_hours: self.duration_hours,
            waiting_minutes: self.waiting_minutes,
            is_airport_pickup: self.is_airport_pickup,
            currency,
            promo_code,
        })
    }
}

fn check_at_most(value: Option<Decimal>, max: Decimal, field: &'static str) -> QuoteFormResult<()> {
    match value {
        Some(value) if value > max => Err(QuoteFormError::OutOfRange { field, max }),
        _ => Ok(()),
    }
}
