use chrono::{Datelike, Timelike};
use rust_decimal::Decimal;

use crate::domain::fare_rule::FareRule;
use crate::domain::money::round_money;
use crate::domain::quote::Quote;
use crate::domain::trip::{BookingType, InvalidTripError, TripPricingInput};

/// Price `trip` under `rule`.
///
/// Night and weekend surcharges are each computed from the same base amount
/// and added, never compounded. Every component is kept exact until the end:
/// only `total` (and `commissionable_amount`) is rounded half-up to minor
/// units. The line items on the returned quote are rounded for display.
pub fn compute_quote(rule: &FareRule, trip: &TripPricingInput) -> Result<Quote, InvalidTripError> {
    trip.check_non_negative()?;

    let distance_or_duration_amount = match trip.booking_type {
        BookingType::Transfer => {
            let distance_km = trip.distance_km.ok_or(InvalidTripError::MissingDistance)?;
            checked_mul(distance_km, trip.per_km_rate, "distance amount")?
        }
        BookingType::Hourly => {
            let duration_hours = trip
                .duration_hours
                .ok_or(InvalidTripError::MissingDuration)?;
            let billed_hours = duration_hours.max(Decimal::from(trip.min_hours));
            checked_mul(billed_hours, trip.per_hour_rate, "duration amount")?
        }
    };
    let base_amount = checked_add(trip.base_price, distance_or_duration_amount, "base amount")?;

    let pickup = trip.pickup_datetime;
    // hour() is always in 0..24
    let night_surcharge = if rule.night_enabled && rule.is_night_hour(pickup.hour() as i32) {
        surcharge(base_amount, rule.night_multiplier, "night surcharge")?
    } else {
        Decimal::ZERO
    };

    let weekend_surcharge = if rule.weekend_enabled && rule.is_weekend_day(pickup.weekday()) {
        surcharge(base_amount, rule.weekend_multiplier, "weekend surcharge")?
    } else {
        Decimal::ZERO
    };

    let chargeable_minutes = (trip.waiting_minutes - rule.waiting_free_minutes).max(0);
    let waiting_fee = checked_mul(
        Decimal::from(chargeable_minutes),
        rule.waiting_charge_per_minute,
        "waiting fee",
    )?;

    let airport_fee = if trip.is_airport_pickup {
        trip.airport_fee
    } else {
        Decimal::ZERO
    };

    let mut exact_total = base_amount;
    for item in [night_surcharge, weekend_surcharge, waiting_fee, airport_fee] {
        exact_total = checked_add(exact_total, item, "total")?;
    }
    let total = round_money(exact_total);
    let commissionable_amount = if rule.commission_applies_to_waiting {
        total
    } else {
        round_money(exact_total - waiting_fee)
    };

    Ok(Quote {
        base_amount: round_money(base_amount),
        distance_or_duration_amount: round_money(distance_or_duration_amount),
        night_surcharge: round_money(night_surcharge),
        weekend_surcharge: round_money(weekend_surcharge),
        waiting_fee: round_money(waiting_fee),
        airport_fee: round_money(airport_fee),
        discount: Decimal::ZERO,
        total,
        commissionable_amount,
        currency: trip.currency.clone(),
        promo_code: None,
    })
}

/// Exact `base * (multiplier - 1)`, floored at zero.
fn surcharge(
    base: Decimal,
    multiplier: Decimal,
    field: &'static str,
) -> Result<Decimal, InvalidTripError> {
    let factor = multiplier - Decimal::ONE;
    if factor <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    checked_mul(base, factor, field)
}

fn checked_mul(
    left: Decimal,
    right: Decimal,
    field: &'static str,
) -> Result<Decimal, InvalidTripError> {
    left.checked_mul(right)
        .ok_or(InvalidTripError::ValueTooLarge { field })
}

fn checked_add(
    left: Decimal,
    right: Decimal,
    field: &'static str,
) -> Result<Decimal, InvalidTripError> {
    left.checked_add(right)
        .ok_or(InvalidTripError::ValueTooLarge { field })
}
