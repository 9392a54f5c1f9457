use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::fare_rule::{
    FareRule as DomainFareRule, NewFareRule as DomainNewFareRule,
    UpdateFareRule as DomainUpdateFareRule, WeekendDays,
};
use crate::domain::money::{from_minor_units, to_minor_units};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::fare_rules)]
pub struct FareRule {
    pub id: i32,
    pub name: String,
    pub active: bool,
    pub night_enabled: bool,
    pub night_start_hour: i32,
    pub night_end_hour: i32,
    pub night_multiplier_percent: i64,
    pub weekend_enabled: bool,
    pub weekend_multiplier_percent: i64,
    pub weekend_days: String,
    pub waiting_free_minutes: i32,
    pub waiting_charge_per_minute_cents: i64,
    pub commission_applies_to_waiting: bool,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::fare_rules)]
pub struct NewFareRule<'a> {
    pub name: &'a str,
    pub active: bool,
    pub night_enabled: bool,
    pub night_start_hour: i32,
    pub night_end_hour: i32,
    pub night_multiplier_percent: i64,
    pub weekend_enabled: bool,
    pub weekend_multiplier_percent: i64,
    pub weekend_days: String,
    pub waiting_free_minutes: i32,
    pub waiting_charge_per_minute_cents: i64,
    pub commission_applies_to_waiting: bool,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::fare_rules)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateFareRule<'a> {
    pub name: &'a str,
    pub active: bool,
    pub night_enabled: bool,
    pub night_start_hour: i32,
    pub night_end_hour: i32,
    pub night_multiplier_percent: i64,
    pub weekend_enabled: bool,
    pub weekend_multiplier_percent: i64,
    pub weekend_days: String,
    pub waiting_free_minutes: i32,
    pub waiting_charge_per_minute_cents: i64,
    pub commission_applies_to_waiting: bool,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl From<FareRule> for DomainFareRule {
    fn from(value: FareRule) -> Self {
        Self {
            id: value.id,
            name: value.name,
            active: value.active,
            night_enabled: value.night_enabled,
            night_start_hour: value.night_start_hour,
            night_end_hour: value.night_end_hour,
            night_multiplier: from_minor_units(value.night_multiplier_percent),
            weekend_enabled: value.weekend_enabled,
            weekend_multiplier: from_minor_units(value.weekend_multiplier_percent),
            weekend_days: WeekendDays::from_stored(&value.weekend_days),
            waiting_free_minutes: value.waiting_free_minutes,
            waiting_charge_per_minute: from_minor_units(value.waiting_charge_per_minute_cents),
            commission_applies_to_waiting: value.commission_applies_to_waiting,
            starts_at: value.starts_at,
            ends_at: value.ends_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewFareRule> for NewFareRule<'a> {
    fn from(value: &'a DomainNewFareRule) -> Self {
        Self {
            name: value.name.as_str(),
            active: value.active,
            night_enabled: value.night_enabled,
            night_start_hour: value.night_start_hour,
            night_end_hour: value.night_end_hour,
            night_multiplier_percent: to_minor_units(value.night_multiplier),
            weekend_enabled: value.weekend_enabled,
            weekend_multiplier_percent: to_minor_units(value.weekend_multiplier),
            weekend_days: value.weekend_days.to_string(),
            waiting_free_minutes: value.waiting_free_minutes,
            waiting_charge_per_minute_cents: to_minor_units(value.waiting_charge_per_minute),
            commission_applies_to_waiting: value.commission_applies_to_waiting,
            starts_at: value.starts_at,
            ends_at: value.ends_at,
            created_at: value.created_at,
            updated_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateFareRule> for UpdateFareRule<'a> {
    fn from(value: &'a DomainUpdateFareRule) -> Self {
        let rule = &value.values;
        Self {
            name: rule.name.as_str(),
            active: rule.active,
            night_enabled: rule.night_enabled,
            night_start_hour: rule.night_start_hour,
            night_end_hour: rule.night_end_hour,
            night_multiplier_percent: to_minor_units(rule.night_multiplier),
            weekend_enabled: rule.weekend_enabled,
            weekend_multiplier_percent: to_minor_units(rule.weekend_multiplier),
            weekend_days: rule.weekend_days.to_string(),
            waiting_free_minutes: rule.waiting_free_minutes,
            waiting_charge_per_minute_cents: to_minor_units(rule.waiting_charge_per_minute),
            commission_applies_to_waiting: rule.commission_applies_to_waiting,
            starts_at: rule.starts_at,
            ends_at: rule.ends_at,
            updated_at: value.updated_at,
        }
    }
}
