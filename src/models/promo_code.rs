use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::money::{from_minor_units, to_minor_units};
use crate::domain::promo_code::{NewPromoCode as DomainNewPromoCode, PromoCode as DomainPromoCode};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::promo_codes)]
pub struct PromoCode {
    pub id: i32,
    pub code: String,
    pub percent_off: Option<i32>,
    pub amount_off_cents: Option<i64>,
    pub active: bool,
    pub valid_from: NaiveDateTime,
    pub valid_to: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::promo_codes)]
pub struct NewPromoCode<'a> {
    pub code: &'a str,
    pub percent_off: Option<i32>,
    pub amount_off_cents: Option<i64>,
    pub active: bool,
    pub valid_from: NaiveDateTime,
    pub valid_to: NaiveDateTime,
}

impl From<PromoCode> for DomainPromoCode {
    fn from(value: PromoCode) -> Self {
        Self {
            id: value.id,
            code: value.code,
            percent_off: value.percent_off,
            amount_off: value.amount_off_cents.map(from_minor_units),
            active: value.active,
            valid_from: value.valid_from,
            valid_to: value.valid_to,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewPromoCode> for NewPromoCode<'a> {
    fn from(value: &'a DomainNewPromoCode) -> Self {
        Self {
            code: value.code.as_str(),
            percent_off: value.percent_off,
            amount_off_cents: value.amount_off.map(to_minor_units),
            active: value.active,
            valid_from: value.valid_from,
            valid_to: value.valid_to,
        }
    }
}
