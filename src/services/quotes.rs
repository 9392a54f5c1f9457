use chrono::NaiveDateTime;
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::config::PricingConfig;
use crate::domain::quote::Quote;
use crate::domain::trip::{BookingType, TripPricingInput};
use crate::forms::quotes::{QuoteRequest, QuoteRequestForm};
use crate::permissions::{Action, Resource, authorize};
use crate::pricing::{FareEngine, apply_promo_code};
use crate::repository::{CarClassReader, FareRuleReader, FareRuleWriter, PromoCodeReader};
use crate::services::{ServiceError, ServiceResult};

/// Price a trip for the authenticated user under the fare rule in force at
/// `now`, applying the requested promo code if any.
pub fn quote_trip<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: QuoteRequestForm,
    config: &PricingConfig,
    now: NaiveDateTime,
) -> ServiceResult<Quote>
where
    R: CarClassReader + PromoCodeReader + FareRuleReader + FareRuleWriter + ?Sized,
{
    if !authorize(user, Action::View, Resource::Quote).is_allowed() {
        return Err(ServiceError::Unauthorized);
    }

    let request = form
        .into_quote_request()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let car_class = repo
        .get_car_class_by_id(request.car_class_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let QuoteRequest {
        booking_type,
        pickup_datetime,
        distance_km,
        duration_hours,
        waiting_minutes,
        is_airport_pickup,
        currency,
        promo_code,
        ..
    } = request;

    let mut trip = TripPricingInput::from_car_class(&car_class, booking_type, pickup_datetime)
        .with_waiting_minutes(waiting_minutes)
        .with_airport_pickup(is_airport_pickup)
        .with_currency(currency.unwrap_or_else(|| config.default_currency.clone()));
    match booking_type {
        BookingType::Transfer => trip.distance_km = distance_km,
        BookingType::Hourly => trip.duration_hours = duration_hours,
    }

    let quote = FareEngine::new(repo).quote(&trip, now)?;

    let Some(code) = promo_code else {
        return Ok(quote);
    };

    let promo = repo
        .get_promo_code(&code)
        .map_err(ServiceError::from)?
        .ok_or_else(|| ServiceError::Form(format!("unknown promo code `{code}`")))?;

    let quote = apply_promo_code(quote, &promo, now)
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    log::info!(
        "promo code {} took {} off a {} quote",
        promo.code,
        quote.discount,
        quote.currency
    );

    Ok(quote)
}
