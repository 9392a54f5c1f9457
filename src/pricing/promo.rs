use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::domain::money::round_money;
use crate::domain::promo_code::{PromoCode, PromoCodeError};
use crate::domain::quote::Quote;

/// Apply `promo` to `quote` at `now`.
///
/// The percentage is taken from the quoted total first, then the fixed
/// amount. The discount never exceeds the total. Commission is reduced by the
/// same amount, floored at zero.
pub fn apply_promo_code(
    quote: Quote,
    promo: &PromoCode,
    now: NaiveDateTime,
) -> Result<Quote, PromoCodeError> {
    promo.check_valid_at(now)?;

    let mut discount = Decimal::ZERO;
    if let Some(percent_off) = promo.percent_off {
        let percent = Decimal::from(percent_off.clamp(0, 100));
        discount += round_money(quote.total * (percent / Decimal::ONE_HUNDRED));
    }
    if let Some(amount_off) = promo.amount_off {
        discount = discount.saturating_add(amount_off.max(Decimal::ZERO));
    }
    let discount = round_money(discount.min(quote.total));

    Ok(Quote {
        total: quote.total - discount,
        commissionable_amount: (quote.commissionable_amount - discount).max(Decimal::ZERO),
        discount,
        promo_code: Some(promo.code.clone()),
        ..quote
    })
}
