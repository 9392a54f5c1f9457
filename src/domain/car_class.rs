use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Vehicle class with the rate card used to price trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CarClass {
    /// Unique identifier of the car class.
    pub id: i32,
    /// Unique display name, e.g. "Business".
    pub name: String,
    /// Flat amount charged for every trip.
    pub base_price: Decimal,
    /// Rate per kilometre for transfers.
    pub per_km_rate: Decimal,
    /// Rate per hour for hourly bookings.
    pub per_hour_rate: Decimal,
    /// Minimum billed hours for hourly bookings.
    pub min_hours: i32,
    /// Flat fee added to airport pickups.
    pub airport_fee: Decimal,
    /// Timestamp for when the car class was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the car class.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new car class.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCarClass {
    pub name: String,
    pub base_price: Decimal,
    pub per_km_rate: Decimal,
    pub per_hour_rate: Decimal,
    pub min_hours: i32,
    pub airport_fee: Decimal,
}

impl NewCarClass {
    /// Construct a car class with a trimmed name, zero rates and a one hour minimum.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            base_price: Decimal::ZERO,
            per_km_rate: Decimal::ZERO,
            per_hour_rate: Decimal::ZERO,
            min_hours: 1,
            airport_fee: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn with_base_price(mut self, base_price: Decimal) -> Self {
        self.base_price = base_price;
        self
    }

    #[must_use]
    pub fn with_per_km_rate(mut self, per_km_rate: Decimal) -> Self {
        self.per_km_rate = per_km_rate;
        self
    }

    /// Set the hourly rate together with the minimum billed hours.
    #[must_use]
    pub fn with_hourly(mut self, per_hour_rate: Decimal, min_hours: i32) -> Self {
        self.per_hour_rate = per_hour_rate;
        self.min_hours = min_hours;
        self
    }

    #[must_use]
    pub fn with_airport_fee(mut self, airport_fee: Decimal) -> Self {
        self.airport_fee = airport_fee;
        self
    }
}
