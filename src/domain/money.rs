use rust_decimal::{Decimal, RoundingStrategy};

/// Currency used when neither the booking nor the configuration names one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Number of decimal places kept for monetary amounts and multipliers.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Round an amount to minor-unit precision, half-up.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Build a decimal from an integer count of minor units (`1250` => `12.50`).
pub fn from_minor_units(value: i64) -> Decimal {
    Decimal::new(value, MINOR_UNIT_SCALE)
}

/// Convert a decimal into integer minor units, rounding half-up and saturating
/// at the `i64` bounds.
pub fn to_minor_units(value: Decimal) -> i64 {
    let mut rounded = round_money(value);
    rounded.rescale(MINOR_UNIT_SCALE);
    let mantissa = rounded.mantissa();
    i64::try_from(mantissa).unwrap_or(if mantissa.is_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
