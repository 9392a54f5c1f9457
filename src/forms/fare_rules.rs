use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::fare_rule::{NewFareRule, UpdateFareRule, WeekendDays, WeekendDaysError};
use crate::forms::sanitize_inline_text;

/// Maximum length allowed for a fare rule name.
const NAME_MAX_LEN: usize = 64;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Largest multiplier or per-minute charge that fits the stored precision.
const MAX_FACTOR: Decimal = dec!(999.99);

/// Result type returned by the fare rule form helpers.
pub type FareRuleFormResult<T> = Result<T, FareRuleFormError>;

/// Errors that can occur while processing fare rule forms.
#[derive(Debug, Error)]
pub enum FareRuleFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("fare rule name cannot be empty")]
    EmptyName,
    /// The weekend day list could not be parsed.
    #[error(transparent)]
    WeekendDays(#[from] WeekendDaysError),
    /// Multipliers below one would lower prices.
    #[error("{field} must be at least 1.00")]
    MultiplierBelowOne { field: &'static str },
    /// The value does not fit the stored precision.
    #[error("{field} must not exceed 999.99")]
    TooLarge { field: &'static str },
    #[error("waiting charge per minute cannot be negative")]
    NegativeWaitingCharge,
    /// `starts_at` is after `ends_at`.
    #[error("fare rule window starts after it ends")]
    InvalidWindow,
}

fn default_true() -> bool {
    true
}

/// JSON payload for creating or replacing a fare rule.
#[derive(Debug, Deserialize, Validate)]
pub struct FareRuleForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    pub night_enabled: bool,
    #[validate(range(min = 0, max = 23))]
    pub night_start_hour: i32,
    #[validate(range(min = 0, max = 23))]
    pub night_end_hour: i32,
    pub night_multiplier: Decimal,
    pub weekend_enabled: bool,
    pub weekend_multiplier: Decimal,
    /// Comma separated weekday indexes, 0 = Monday.
    #[validate(length(max = 16))]
    pub weekend_days: String,
    #[validate(range(min = 0, max = 1440))]
    pub waiting_free_minutes: i32,
    pub waiting_charge_per_minute: Decimal,
    #[serde(default = "default_true")]
    pub commission_applies_to_waiting: bool,
    #[serde(default)]
    pub starts_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub ends_at: Option<NaiveDateTime>,
}

impl FareRuleForm {
    /// Validates and sanitizes the payload into a domain `NewFareRule`.
    pub fn into_new_fare_rule(self) -> FareRuleFormResult<NewFareRule> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(FareRuleFormError::EmptyName);
        }

        check_multiplier("night multiplier", self.night_multiplier)?;
        check_multiplier("weekend multiplier", self.weekend_multiplier)?;

        if self.waiting_charge_per_minute < Decimal::ZERO {
            return Err(FareRuleFormError::NegativeWaitingCharge);
        }
        if self.waiting_charge_per_minute > MAX_FACTOR {
            return Err(FareRuleFormError::TooLarge {
                field: "waiting charge per minute",
            });
        }

        if matches!((self.starts_at, self.ends_at), (Some(starts_at), Some(ends_at)) if starts_at > ends_at)
        {
            return Err(FareRuleFormError::InvalidWindow);
        }

        let weekend_days = self.weekend_days.parse::<WeekendDays>()?;

        let mut rule = NewFareRule::new(name)
            .with_night(
                self.night_start_hour,
                self.night_end_hour,
                self.night_multiplier,
            )
            .with_weekend(weekend_days, self.weekend_multiplier)
            .with_waiting(self.waiting_free_minutes, self.waiting_charge_per_minute)
            .with_commission_on_waiting(self.commission_applies_to_waiting)
            .with_window(self.starts_at, self.ends_at)
            .with_active(self.active);
        rule.night_enabled = self.night_enabled;
        rule.weekend_enabled = self.weekend_enabled;

        Ok(rule)
    }

    /// Validates and sanitizes the payload into a domain `UpdateFareRule`.
    pub fn into_update_fare_rule(self) -> FareRuleFormResult<UpdateFareRule> {
        Ok(UpdateFareRule::new(self.into_new_fare_rule()?))
    }
}

fn check_multiplier(field: &'static str, value: Decimal) -> FareRuleFormResult<()> {
    if value < Decimal::ONE {
        return Err(FareRuleFormError::MultiplierBelowOne { field });
    }
    if value > MAX_FACTOR {
        return Err(FareRuleFormError::TooLarge { field });
    }
    Ok(())
}
