use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Weekday};
use pushkind_common::pagination::Pagination;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name given to a rule that was created because no active rule matched.
pub const AUTO_DEFAULT_RULE_NAME: &str = "Auto-Default";

/// Name given to a rule created without an explicit name.
pub const DEFAULT_RULE_NAME: &str = "Default Fare Rule";

/// Errors produced while parsing a weekend day list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeekendDaysError {
    /// A token was not an integer in `0..=6`.
    #[error("invalid weekend day `{0}`, expected a number from 0 (Monday) to 6 (Sunday)")]
    InvalidDay(String),
}

/// Set of weekday indexes (0 = Monday .. 6 = Sunday) that count as weekend.
///
/// Stored as comma separated text, e.g. `"5,6"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct WeekendDays(BTreeSet<u8>);

impl WeekendDays {
    /// Saturday and Sunday.
    pub fn saturday_sunday() -> Self {
        Self(BTreeSet::from([5, 6]))
    }

    /// Build a set from day indexes, rejecting values outside `0..=6`.
    pub fn from_days(days: impl IntoIterator<Item = u8>) -> Result<Self, WeekendDaysError> {
        let mut set = BTreeSet::new();
        for day in days {
            if day > 6 {
                return Err(WeekendDaysError::InvalidDay(day.to_string()));
            }
            set.insert(day);
        }
        Ok(Self(set))
    }

    /// Parse a stored value, skipping tokens that are not valid days.
    pub fn from_stored(value: &str) -> Self {
        Self(
            value
                .split(',')
                .filter_map(|token| token.trim().parse::<u8>().ok())
                .filter(|day| *day <= 6)
                .collect(),
        )
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        // chrono's Monday-based index always fits in a u8
        self.0.contains(&(weekday.num_days_from_monday() as u8))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl FromStr for WeekendDays {
    type Err = WeekendDaysError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut set = BTreeSet::new();
        for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<u8>() {
                Ok(day) if day <= 6 => {
                    set.insert(day);
                }
                _ => return Err(WeekendDaysError::InvalidDay(token.to_string())),
            }
        }
        Ok(Self(set))
    }
}

impl fmt::Display for WeekendDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

impl From<WeekendDays> for Vec<u8> {
    fn from(value: WeekendDays) -> Self {
        value.0.into_iter().collect()
    }
}

impl TryFrom<Vec<u8>> for WeekendDays {
    type Error = WeekendDaysError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_days(value)
    }
}

/// Returns `true` when `hour` lies in the half-open window `[start, end)`.
///
/// A window with `start > end` wraps past midnight; `start == end` is empty.
pub fn hour_in_window(hour: i32, start: i32, end: i32) -> bool {
    if start <= end {
        hour >= start && hour < end
    } else {
        hour >= start || hour < end
    }
}

/// Pricing policy applied on top of the car class rates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FareRule {
    /// Unique identifier of the rule.
    pub id: i32,
    /// Human-readable name of the rule.
    pub name: String,
    /// Only active rules are considered when quoting.
    pub active: bool,
    /// Whether the night multiplier is applied at all.
    pub night_enabled: bool,
    /// First hour (0..=23) of the night window.
    pub night_start_hour: i32,
    /// Hour (0..=23) at which the night window ends, exclusive.
    pub night_end_hour: i32,
    /// Multiplier applied to the base amount during the night window.
    pub night_multiplier: Decimal,
    /// Whether the weekend multiplier is applied at all.
    pub weekend_enabled: bool,
    /// Multiplier applied to the base amount on weekend days.
    pub weekend_multiplier: Decimal,
    /// Days that count as weekend.
    pub weekend_days: WeekendDays,
    /// Waiting minutes at pickup that are not charged.
    pub waiting_free_minutes: i32,
    /// Charge for each waiting minute beyond the free allowance.
    pub waiting_charge_per_minute: Decimal,
    /// Whether waiting fees count towards driver commission.
    pub commission_applies_to_waiting: bool,
    /// Optional start of the effective window; `None` is unbounded.
    pub starts_at: Option<NaiveDateTime>,
    /// Optional end of the effective window; `None` is unbounded.
    pub ends_at: Option<NaiveDateTime>,
    /// Timestamp for when the rule was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the rule.
    pub updated_at: NaiveDateTime,
}

impl FareRule {
    /// Materialize a stored rule from an insert payload. Used where a rule is
    /// needed without a round-trip through the database.
    pub fn from_new(id: i32, new: NewFareRule) -> Self {
        Self {
            id,
            name: new.name,
            active: new.active,
            night_enabled: new.night_enabled,
            night_start_hour: new.night_start_hour,
            night_end_hour: new.night_end_hour,
            night_multiplier: new.night_multiplier,
            weekend_enabled: new.weekend_enabled,
            weekend_multiplier: new.weekend_multiplier,
            weekend_days: new.weekend_days,
            waiting_free_minutes: new.waiting_free_minutes,
            waiting_charge_per_minute: new.waiting_charge_per_minute,
            commission_applies_to_waiting: new.commission_applies_to_waiting,
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            created_at: new.created_at,
            updated_at: new.created_at,
        }
    }

    /// Whether `hour` falls inside this rule's night window. Ignores
    /// `night_enabled`.
    pub fn is_night_hour(&self, hour: i32) -> bool {
        hour_in_window(hour, self.night_start_hour, self.night_end_hour)
    }

    /// Whether `weekday` is one of this rule's weekend days. Ignores
    /// `weekend_enabled`.
    pub fn is_weekend_day(&self, weekday: Weekday) -> bool {
        self.weekend_days.contains(weekday)
    }

    /// Whether the rule is active and its effective window contains `now`.
    pub fn is_effective_at(&self, now: NaiveDateTime) -> bool {
        self.active
            && self.starts_at.is_none_or(|starts_at| starts_at <= now)
            && self.ends_at.is_none_or(|ends_at| ends_at >= now)
    }
}

/// Payload required to insert a new fare rule.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFareRule {
    pub name: String,
    pub active: bool,
    pub night_enabled: bool,
    pub night_start_hour: i32,
    pub night_end_hour: i32,
    pub night_multiplier: Decimal,
    pub weekend_enabled: bool,
    pub weekend_multiplier: Decimal,
    pub weekend_days: WeekendDays,
    pub waiting_free_minutes: i32,
    pub waiting_charge_per_minute: Decimal,
    pub commission_applies_to_waiting: bool,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    /// Timestamp captured when the payload was created.
    pub created_at: NaiveDateTime,
}

impl Default for NewFareRule {
    fn default() -> Self {
        Self::new(DEFAULT_RULE_NAME)
    }
}

impl NewFareRule {
    /// Build a rule with the stock policy: night 22:00-06:00 at x1.20,
    /// weekend (Sat, Sun) at x1.10, 5 free waiting minutes then 0.75 per minute.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            active: true,
            night_enabled: true,
            night_start_hour: 22,
            night_end_hour: 6,
            night_multiplier: dec!(1.20),
            weekend_enabled: true,
            weekend_multiplier: dec!(1.10),
            weekend_days: WeekendDays::saturday_sunday(),
            waiting_free_minutes: 5,
            waiting_charge_per_minute: dec!(0.75),
            commission_applies_to_waiting: true,
            starts_at: None,
            ends_at: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// The rule synthesized when nothing is active: stock policy, unbounded.
    pub fn auto_default() -> Self {
        Self::new(AUTO_DEFAULT_RULE_NAME)
    }

    /// Configure the night window and its multiplier.
    #[must_use]
    pub fn with_night(mut self, start_hour: i32, end_hour: i32, multiplier: Decimal) -> Self {
        self.night_enabled = true;
        self.night_start_hour = start_hour;
        self.night_end_hour = end_hour;
        self.night_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn without_night(mut self) -> Self {
        self.night_enabled = false;
        self
    }

    /// Configure the weekend days and their multiplier.
    #[must_use]
    pub fn with_weekend(mut self, days: WeekendDays, multiplier: Decimal) -> Self {
        self.weekend_enabled = true;
        self.weekend_days = days;
        self.weekend_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn without_weekend(mut self) -> Self {
        self.weekend_enabled = false;
        self
    }

    /// Configure the free waiting allowance and the per-minute charge after it.
    #[must_use]
    pub fn with_waiting(mut self, free_minutes: i32, charge_per_minute: Decimal) -> Self {
        self.waiting_free_minutes = free_minutes;
        self.waiting_charge_per_minute = charge_per_minute;
        self
    }

    #[must_use]
    pub fn with_commission_on_waiting(mut self, applies: bool) -> Self {
        self.commission_applies_to_waiting = applies;
        self
    }

    /// Restrict the rule to an effective window.
    #[must_use]
    pub fn with_window(
        mut self,
        starts_at: Option<NaiveDateTime>,
        ends_at: Option<NaiveDateTime>,
    ) -> Self {
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    /// Active rules with no effective window bounds.
    pub fn is_unbounded_active(&self) -> bool {
        self.active && self.starts_at.is_none() && self.ends_at.is_none()
    }
}

/// Patch data replacing every editable field of an existing rule.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateFareRule {
    /// New values for the rule; `created_at` is ignored.
    pub values: NewFareRule,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateFareRule {
    pub fn new(values: NewFareRule) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            values,
            updated_at: now,
        }
    }
}

/// Query definition used to list fare rules.
#[derive(Debug, Clone, Default)]
pub struct FareRuleListQuery {
    /// Restrict the listing to active rules.
    pub active_only: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl FareRuleListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return rules flagged as active.
    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
