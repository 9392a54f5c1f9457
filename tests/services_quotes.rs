use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use pushkind_common::domain::auth::AuthenticatedUser;
use ride_fares::config::PricingConfig;
use ride_fares::domain::car_class::NewCarClass;
use ride_fares::domain::fare_rule::{AUTO_DEFAULT_RULE_NAME, FareRuleListQuery};
use ride_fares::domain::promo_code::NewPromoCode;
use ride_fares::forms::fare_rules::FareRuleForm;
use ride_fares::forms::quotes::QuoteRequestForm;
use ride_fares::repository::{CarClassWriter, DieselRepository, FareRuleReader, PromoCodeWriter};
use ride_fares::services::ServiceError;
use ride_fares::services::fare_rules::{create_fare_rule, load_active_fare_rule};
use ride_fares::services::quotes::quote_trip;
use ride_fares::{CUSTOMER_ROLE, SERVICE_ACCESS_ROLE};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod common;

fn user_with_roles(roles: &[&str]) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user-1".to_string(),
        email: "user@example.com".to_string(),
        hub_id: 1,
        name: "Tester".to_string(),
        roles: roles.iter().map(|role| (*role).to_string()).collect(),
        exp: 0,
    }
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .expect("valid datetime")
}

fn quote_form(car_class_id: i32, day: u32, hour: u32) -> QuoteRequestForm {
    QuoteRequestForm {
        car_class_id,
        booking_type: "transfer".to_string(),
        pickup_date: NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date"),
        pickup_time: NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"),
        distance_km: Some(dec!(20)),
        duration_hours: None,
        waiting_minutes: 0,
        is_airport_pickup: false,
        currency: None,
        promo_code: None,
    }
}

fn seed_car_class(repo: &DieselRepository) -> i32 {
    repo.create_car_class(
        &NewCarClass::new("Business")
            .with_base_price(dec!(10))
            .with_per_km_rate(dec!(1.50))
            .with_hourly(dec!(45), 2)
            .with_airport_fee(dec!(8)),
    )
    .unwrap()
    .id
}

#[test]
fn test_first_quote_creates_default_rule_and_applies_night_surcharge() {
    let test_db = common::TestDb::new("test_first_quote_creates_default_rule.db");
    let repo = DieselRepository::new(test_db.pool());
    let car_class_id = seed_car_class(&repo);
    let customer = user_with_roles(&[CUSTOMER_ROLE]);

    // Wednesday 23:00 falls in the stock 22:00-06:00 night window.
    let quote = quote_trip(
        &repo,
        &customer,
        quote_form(car_class_id, 12, 23),
        &PricingConfig::default(),
        at(12, 12),
    )
    .unwrap();

    assert_eq!(quote.base_amount, dec!(40));
    assert_eq!(quote.night_surcharge, dec!(8));
    assert_eq!(quote.weekend_surcharge, Decimal::ZERO);
    assert_eq!(quote.total, dec!(48));
    assert_eq!(quote.currency, "EUR");

    let (total, rules) = repo.list_fare_rules(FareRuleListQuery::new()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(rules[0].name, AUTO_DEFAULT_RULE_NAME);
}

#[test]
fn test_newest_admin_rule_prices_later_quotes() {
    let test_db = common::TestDb::new("test_newest_admin_rule_prices_later_quotes.db");
    let repo = DieselRepository::new(test_db.pool());
    let car_class_id = seed_car_class(&repo);
    let admin = user_with_roles(&[SERVICE_ACCESS_ROLE]);
    let customer = user_with_roles(&[CUSTOMER_ROLE]);

    let default_rule = load_active_fare_rule(&repo, &admin, at(1, 9)).unwrap();
    assert_eq!(default_rule.name, AUTO_DEFAULT_RULE_NAME);

    let form = FareRuleForm {
        name: "Weekend premium".to_string(),
        active: true,
        night_enabled: false,
        night_start_hour: 22,
        night_end_hour: 6,
        night_multiplier: dec!(1.20),
        weekend_enabled: true,
        weekend_multiplier: dec!(1.50),
        weekend_days: "5,6".to_string(),
        waiting_free_minutes: 0,
        waiting_charge_per_minute: dec!(1),
        commission_applies_to_waiting: false,
        starts_at: None,
        ends_at: None,
    };
    let premium = create_fare_rule(&repo, &admin, form, at(2, 9)).unwrap();

    let default_rule = repo.get_fare_rule_by_id(default_rule.id).unwrap().unwrap();
    assert!(!default_rule.active);

    // Saturday 23:00 with ten waiting minutes.
    let mut form = quote_form(car_class_id, 15, 23);
    form.waiting_minutes = 10;
    form.is_airport_pickup = true;
    let quote = quote_trip(&repo, &customer, form, &PricingConfig::default(), at(3, 9)).unwrap();

    assert_eq!(quote.night_surcharge, Decimal::ZERO);
    assert_eq!(quote.weekend_surcharge, dec!(20));
    assert_eq!(quote.waiting_fee, dec!(10));
    assert_eq!(quote.airport_fee, dec!(8));
    assert_eq!(quote.total, dec!(78));
    assert_eq!(quote.commissionable_amount, dec!(68));

    let active = load_active_fare_rule(&repo, &admin, at(3, 9)).unwrap();
    assert_eq!(active.id, premium.id);
}

#[test]
fn test_quote_with_promo_code() {
    let test_db = common::TestDb::new("test_quote_with_promo_code.db");
    let repo = DieselRepository::new(test_db.pool());
    let car_class_id = seed_car_class(&repo);
    let customer = user_with_roles(&[CUSTOMER_ROLE]);

    repo.create_promo_code(&NewPromoCode::new("WELCOME", at(1, 0), at(31, 0)).with_percent_off(50))
        .unwrap();
    repo.create_promo_code(
        &NewPromoCode::new("LATE", at(1, 0), at(31, 0))
            .with_amount_off(dec!(5))
            .with_active(false),
    )
    .unwrap();

    let mut form = quote_form(car_class_id, 12, 12);
    form.promo_code = Some("welcome".to_string());
    form.currency = Some("usd".to_string());
    let quote = quote_trip(&repo, &customer, form, &PricingConfig::default(), at(12, 9)).unwrap();

    assert_eq!(quote.total, dec!(20));
    assert_eq!(quote.discount, dec!(20));
    assert_eq!(quote.promo_code.as_deref(), Some("WELCOME"));
    assert_eq!(quote.currency, "USD");

    let mut form = quote_form(car_class_id, 12, 12);
    form.promo_code = Some("late".to_string());
    let err = quote_trip(&repo, &customer, form, &PricingConfig::default(), at(12, 9))
        .expect_err("inactive promo code must be rejected");
    assert!(matches!(err, ServiceError::Form(_)));
}

#[test]
fn test_hourly_quote_bills_minimum_hours() {
    let test_db = common::TestDb::new("test_hourly_quote_bills_minimum_hours.db");
    let repo = DieselRepository::new(test_db.pool());
    let car_class_id = seed_car_class(&repo);
    let customer = user_with_roles(&[CUSTOMER_ROLE]);

    let mut form = quote_form(car_class_id, 12, 12);
    form.booking_type = "hourly".to_string();
    form.distance_km = None;
    form.duration_hours = Some(dec!(1));

    let quote = quote_trip(&repo, &customer, form, &PricingConfig::default(), at(12, 9)).unwrap();

    assert_eq!(quote.distance_or_duration_amount, dec!(90));
    assert_eq!(quote.total, dec!(100));

    let mut form = quote_form(car_class_id, 12, 12);
    form.booking_type = "hourly".to_string();
    form.duration_hours = None;
    let err = quote_trip(&repo, &customer, form, &PricingConfig::default(), at(12, 9))
        .expect_err("duration is required for hourly bookings");
    assert!(matches!(err, ServiceError::Form(_)));
}

#[test]
fn test_oversized_distance_is_rejected_as_form_error() {
    let test_db = common::TestDb::new("test_oversized_distance_is_rejected.db");
    let repo = DieselRepository::new(test_db.pool());
    let car_class_id = seed_car_class(&repo);
    let customer = user_with_roles(&[CUSTOMER_ROLE]);

    let mut form = quote_form(car_class_id, 12, 12);
    form.distance_km = Some(Decimal::MAX);
    let err = quote_trip(&repo, &customer, form, &PricingConfig::default(), at(12, 9))
        .expect_err("distance beyond the accepted maximum must be rejected");

    assert!(matches!(err, ServiceError::Form(message) if message.contains("distance_km")));
}
