use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::car_class::{CarClass as DomainCarClass, NewCarClass as DomainNewCarClass};
use crate::domain::money::{from_minor_units, to_minor_units};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::car_classes)]
pub struct CarClass {
    pub id: i32,
    pub name: String,
    pub base_price_cents: i64,
    pub per_km_rate_cents: i64,
    pub per_hour_rate_cents: i64,
    pub min_hours: i32,
    pub airport_fee_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::car_classes)]
pub struct NewCarClass<'a> {
    pub name: &'a str,
    pub base_price_cents: i64,
    pub per_km_rate_cents: i64,
    pub per_hour_rate_cents: i64,
    pub min_hours: i32,
    pub airport_fee_cents: i64,
}

impl From<CarClass> for DomainCarClass {
    fn from(value: CarClass) -> Self {
        Self {
            id: value.id,
            name: value.name,
            base_price: from_minor_units(value.base_price_cents),
            per_km_rate: from_minor_units(value.per_km_rate_cents),
            per_hour_rate: from_minor_units(value.per_hour_rate_cents),
            min_hours: value.min_hours,
            airport_fee: from_minor_units(value.airport_fee_cents),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCarClass> for NewCarClass<'a> {
    fn from(value: &'a DomainNewCarClass) -> Self {
        Self {
            name: value.name.as_str(),
            base_price_cents: to_minor_units(value.base_price),
            per_km_rate_cents: to_minor_units(value.per_km_rate),
            per_hour_rate_cents: to_minor_units(value.per_hour_rate),
            min_hours: value.min_hours,
            airport_fee_cents: to_minor_units(value.airport_fee),
        }
    }
}
