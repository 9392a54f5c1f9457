//! Fare engine: picks the fare rule in force and prices trips under it.
//!
//! [`compute_quote`] is a pure function of the rule and the trip.
//! [`select_active_rule`] reads the policy store and, when nothing is in
//! force, asks the store to create the stock rule atomically.

use chrono::NaiveDateTime;
use pushkind_common::repository::errors::RepositoryError;

use crate::domain::fare_rule::FareRule;
use crate::domain::quote::Quote;
use crate::domain::trip::TripPricingInput;
use crate::repository::{FareRuleReader, FareRuleWriter};

mod calculator;
mod errors;
mod promo;

pub use calculator::compute_quote;
pub use errors::{PricingError, PricingResult};
pub use promo::apply_promo_code;

/// Return the rule in force at `now`, creating the stock default if no
/// active rule covers `now`.
///
/// Candidates are ordered newest first, so the most recently created
/// matching rule wins.
pub fn select_active_rule<S>(store: &S, now: NaiveDateTime) -> PricingResult<FareRule>
where
    S: FareRuleReader + FareRuleWriter + ?Sized,
{
    if let Some(rule) = store
        .find_active_rules(now)?
        .into_iter()
        .find(|rule| rule.is_effective_at(now))
    {
        return Ok(rule);
    }

    match store.find_or_create_default_rule(now) {
        Ok(rule) => Ok(rule),
        Err(RepositoryError::NotFound) => Err(PricingError::PolicyNotFound),
        Err(err) => Err(err.into()),
    }
}

/// Prices trips against a policy store.
pub struct FareEngine<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> FareEngine<'a, S>
where
    S: FareRuleReader + FareRuleWriter + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// See [`select_active_rule`].
    pub fn select_active_rule(&self, now: NaiveDateTime) -> PricingResult<FareRule> {
        select_active_rule(self.store, now)
    }

    /// Price `trip` under the rule in force at `now`.
    pub fn quote(&self, trip: &TripPricingInput, now: NaiveDateTime) -> PricingResult<Quote> {
        let rule = self.select_active_rule(now)?;
        log::debug!("pricing {} trip with fare rule {}", trip.booking_type, rule.id);
        Ok(compute_quote(&rule, trip)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    use crate::domain::car_class::CarClass;
    use crate::domain::fare_rule::{
        AUTO_DEFAULT_RULE_NAME, FareRuleListQuery, NewFareRule, UpdateFareRule,
    };
    use crate::domain::trip::{BookingType, InvalidTripError};
    use crate::repository::mock::{MockFareRuleReader, MockFareRuleWriter};
    use pushkind_common::repository::errors::RepositoryResult;

    struct CombinedFareRuleRepo {
        reader: MockFareRuleReader,
        writer: MockFareRuleWriter,
    }

    impl CombinedFareRuleRepo {
        fn new() -> Self {
            Self {
                reader: MockFareRuleReader::new(),
                writer: MockFareRuleWriter::new(),
            }
        }
    }

    impl FareRuleReader for CombinedFareRuleRepo {
        fn get_fare_rule_by_id(&self, id: i32) -> RepositoryResult<Option<FareRule>> {
            self.reader.get_fare_rule_by_id(id)
        }

        fn list_fare_rules(
            &self,
            query: FareRuleListQuery,
        ) -> RepositoryResult<(usize, Vec<FareRule>)> {
            self.reader.list_fare_rules(query)
        }

        fn find_active_rules(&self, now: NaiveDateTime) -> RepositoryResult<Vec<FareRule>> {
            self.reader.find_active_rules(now)
        }
    }

    impl FareRuleWriter for CombinedFareRuleRepo {
        fn create_fare_rule(&self, new_rule: &NewFareRule) -> RepositoryResult<FareRule> {
            self.writer.create_fare_rule(new_rule)
        }

        fn update_fare_rule(
            &self,
            rule_id: i32,
            updates: &UpdateFareRule,
        ) -> RepositoryResult<FareRule> {
            self.writer.update_fare_rule(rule_id, updates)
        }

        fn delete_fare_rule(&self, rule_id: i32) -> RepositoryResult<()> {
            self.writer.delete_fare_rule(rule_id)
        }

        fn find_or_create_default_rule(&self, now: NaiveDateTime) -> RepositoryResult<FareRule> {
            self.writer.find_or_create_default_rule(now)
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 12)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .expect("valid datetime")
    }

    fn rule(id: i32, name: &str) -> FareRule {
        FareRule::from_new(id, NewFareRule::new(name).with_created_at(now()))
    }

    fn car_class() -> CarClass {
        CarClass {
            id: 1,
            name: "Business".to_string(),
            base_price: dec!(10),
            per_km_rate: dec!(2),
            per_hour_rate: dec!(40),
            min_hours: 2,
            airport_fee: dec!(5),
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn select_active_rule_returns_first_candidate() {
        let mut repo = CombinedFareRuleRepo::new();
        repo.reader
            .expect_find_active_rules()
            .with(eq(now()))
            .times(1)
            .returning(|_| Ok(vec![rule(7, "Newest"), rule(3, "Older")]));
        repo.writer.expect_find_or_create_default_rule().never();

        let selected = select_active_rule(&repo, now()).expect("rule selected");

        assert_eq!(selected.id, 7);
    }

    #[test]
    fn select_active_rule_creates_default_when_nothing_matches() {
        let mut repo = CombinedFareRuleRepo::new();
        repo.reader
            .expect_find_active_rules()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        repo.writer
            .expect_find_or_create_default_rule()
            .with(eq(now()))
            .times(1)
            .returning(|_| Ok(rule(1, AUTO_DEFAULT_RULE_NAME)));

        let selected = select_active_rule(&repo, now()).expect("rule selected");

        assert_eq!(selected.name, AUTO_DEFAULT_RULE_NAME);
    }

    #[test]
    fn select_active_rule_reports_missing_policy() {
        let mut repo = CombinedFareRuleRepo::new();
        repo.reader
            .expect_find_active_rules()
            .returning(|_| Ok(Vec::new()));
        repo.writer
            .expect_find_or_create_default_rule()
            .returning(|_| Err(RepositoryError::NotFound));

        let result = select_active_rule(&repo, now());

        assert!(matches!(result, Err(PricingError::PolicyNotFound)));
    }

    #[test]
    fn select_active_rule_skips_rules_not_in_force() {
        let mut repo = CombinedFareRuleRepo::new();
        repo.reader.expect_find_active_rules().returning(|_| {
            let retired = FareRule::from_new(9, NewFareRule::new("Retired").with_active(false));
            let expired = FareRule::from_new(
                8,
                NewFareRule::new("Expired").with_window(None, Some(now() - chrono::Duration::days(1))),
            );
            Ok(vec![retired, expired, rule(3, "Current")])
        });
        repo.writer.expect_find_or_create_default_rule().never();

        let selected = select_active_rule(&repo, now()).expect("rule selected");

        assert_eq!(selected.id, 3);
    }

    #[test]
    fn engine_quotes_with_selected_rule() {
        let mut repo = CombinedFareRuleRepo::new();
        repo.reader.expect_find_active_rules().returning(|_| {
            Ok(vec![FareRule::from_new(
                2,
                NewFareRule::new("Flat").without_night().without_weekend(),
            )])
        });

        let pickup = now();
        let trip = TripPricingInput::from_car_class(&car_class(), BookingType::Transfer, pickup)
            .with_distance_km(dec!(10))
            .with_airport_pickup(true);

        let quote = FareEngine::new(&repo)
            .quote(&trip, now())
            .expect("quote computed");

        assert_eq!(quote.base_amount, dec!(30));
        assert_eq!(quote.airport_fee, dec!(5));
        assert_eq!(quote.total, dec!(35));
        assert_eq!(quote.currency, "EUR");
    }

    #[test]
    fn engine_reports_invalid_trip() {
        let mut repo = CombinedFareRuleRepo::new();
        repo.reader
            .expect_find_active_rules()
            .returning(|_| Ok(vec![rule(1, "Any")]));

        let trip = TripPricingInput::from_car_class(&car_class(), BookingType::Transfer, now());

        let result = FareEngine::new(&repo).quote(&trip, now());

        assert!(matches!(
            result,
            Err(PricingError::InvalidTrip(InvalidTripError::MissingDistance))
        ));
    }
}
