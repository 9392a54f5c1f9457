use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::car_class::CarClass;
use crate::domain::money::DEFAULT_CURRENCY;

/// Reasons a trip cannot be priced. These are caller input errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidTripError {
    /// A transfer was submitted without a distance.
    #[error("distance in kilometres is required for transfers")]
    MissingDistance,
    /// An hourly booking was submitted without a duration.
    #[error("duration in hours is required for hourly bookings")]
    MissingDuration,
    /// A numeric input that must not be negative was negative.
    #[error("{field} cannot be negative")]
    NegativeValue { field: &'static str },
    /// The booking type string is not recognised.
    #[error("unknown booking type `{0}`")]
    UnknownBookingType(String),
    /// The price component does not fit in a decimal.
    #[error("{field} is too large to price")]
    ValueTooLarge { field: &'static str },
}

/// How a booking is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    /// Point-to-point ride billed by distance.
    Transfer,
    /// Chauffeur at disposal billed by the hour.
    Hourly,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Transfer => "transfer",
            BookingType::Hourly => "hourly",
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingType {
    type Err = InvalidTripError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "transfer" => Ok(BookingType::Transfer),
            "hourly" => Ok(BookingType::Hourly),
            other => Err(InvalidTripError::UnknownBookingType(other.to_string())),
        }
    }
}

/// Everything needed to price one trip: the car class rates plus the
/// booking details.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPricingInput {
    pub booking_type: BookingType,
    pub base_price: Decimal,
    pub per_km_rate: Decimal,
    pub per_hour_rate: Decimal,
    pub min_hours: i32,
    pub airport_fee: Decimal,
    /// Required for transfers, ignored for hourly bookings.
    pub distance_km: Option<Decimal>,
    /// Required for hourly bookings, ignored for transfers.
    pub duration_hours: Option<Decimal>,
    /// Local pickup time; drives the night and weekend surcharges.
    pub pickup_datetime: NaiveDateTime,
    pub waiting_minutes: i32,
    pub is_airport_pickup: bool,
    /// ISO 4217 currency code of the booking.
    pub currency: String,
}

impl TripPricingInput {
    /// Start a trip from the rate card of `car_class`, with no waiting time,
    /// no airport pickup and the default currency.
    pub fn from_car_class(
        car_class: &CarClass,
        booking_type: BookingType,
        pickup_datetime: NaiveDateTime,
    ) -> Self {
        Self {
            booking_type,
            base_price: car_class.base_price,
            per_km_rate: car_class.per_km_rate,
            per_hour_rate: car_class.per_hour_rate,
            min_hours: car_class.min_hours,
            airport_fee: car_class.airport_fee,
            distance_km: None,
            duration_hours: None,
            pickup_datetime,
            waiting_minutes: 0,
            is_airport_pickup: false,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    #[must_use]
    pub fn with_distance_km(mut self, distance_km: Decimal) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    #[must_use]
    pub fn with_duration_hours(mut self, duration_hours: Decimal) -> Self {
        self.duration_hours = Some(duration_hours);
        self
    }

    #[must_use]
    pub fn with_waiting_minutes(mut self, waiting_minutes: i32) -> Self {
        self.waiting_minutes = waiting_minutes;
        self
    }

    #[must_use]
    pub fn with_airport_pickup(mut self, is_airport_pickup: bool) -> Self {
        self.is_airport_pickup = is_airport_pickup;
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Reject negative rates and quantities so that every priced component is
    /// non-negative.
    pub fn check_non_negative(&self) -> Result<(), InvalidTripError> {
        let decimals = [
            ("base price", Some(self.base_price)),
            ("per km rate", Some(self.per_km_rate)),
            ("per hour rate", Some(self.per_hour_rate)),
            ("airport fee", Some(self.airport_fee)),
            ("distance", self.distance_km),
            ("duration", self.duration_hours),
        ];

        for (field, value) in decimals {
            if value.is_some_and(|value| value.is_sign_negative() && !value.is_zero()) {
                return Err(InvalidTripError::NegativeValue { field });
            }
        }

        if self.min_hours < 0 {
            return Err(InvalidTripError::NegativeValue {
                field: "minimum hours",
            });
        }
        if self.waiting_minutes < 0 {
            return Err(InvalidTripError::NegativeValue {
                field: "waiting minutes",
            });
        }

        Ok(())
    }
}
