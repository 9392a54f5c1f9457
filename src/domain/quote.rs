use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Itemized price for a single trip. Not persisted; the booking flow copies
/// `total` and `currency` onto the booking record.
///
/// Line items are shown rounded to minor units. `total` is the rounded sum of
/// the exact items, so it can differ by a cent from the sum of the shown items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    /// Car class base price plus the distance or duration component.
    pub base_amount: Decimal,
    /// Distance (transfer) or billed hours (hourly) times the class rate.
    pub distance_or_duration_amount: Decimal,
    pub night_surcharge: Decimal,
    pub weekend_surcharge: Decimal,
    pub waiting_fee: Decimal,
    pub airport_fee: Decimal,
    /// Promo code reduction, zero unless a code was applied.
    pub discount: Decimal,
    /// Amount due, rounded to minor units.
    pub total: Decimal,
    /// Share of `total` that counts towards driver commission.
    pub commissionable_amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Code that produced `discount`, stored upper-case.
    pub promo_code: Option<String>,
}
