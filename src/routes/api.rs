use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::config::PricingConfig;
use crate::forms::car_classes::AddCarClassForm;
use crate::forms::fare_rules::FareRuleForm;
use crate::forms::quotes::QuoteRequestForm;
use crate::repository::DieselRepository;
use crate::services::car_classes::{create_car_class, load_car_classes};
use crate::services::fare_rules::{
    FareRuleQuery, create_fare_rule, load_active_fare_rule, load_fare_rules, modify_fare_rule,
    remove_fare_rule,
};
use crate::services::quotes::quote_trip;
use crate::services::ServiceError;

/// Map a failed service call onto an HTTP response. Unexpected errors are
/// logged with `action` and hidden from the client.
fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => HttpResponse::Unauthorized().finish(),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({ "error": message })),
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Conflict => HttpResponse::Conflict().finish(),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/v1/quotes")]
/// Price a trip under the fare rule in force right now.
///
/// Customers and holders of `can_view_quote` may call this endpoint.
pub async fn api_v1_quote(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<PricingConfig>,
    form: web::Json<QuoteRequestForm>,
) -> impl Responder {
    let now = Utc::now().naive_utc();
    match quote_trip(repo.get_ref(), &user, form.into_inner(), config.get_ref(), now) {
        Ok(quote) => HttpResponse::Ok().json(quote),
        Err(err) => error_response(err, "price trip"),
    }
}

#[get("/v1/fare-rules")]
/// Return a page of fare rules, newest first.
pub async fn api_v1_fare_rules(
    params: web::Query<FareRuleQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_fare_rules(repo.get_ref(), &user, params.0) {
        Ok(rules) => HttpResponse::Ok().json(rules),
        Err(err) => error_response(err, "list fare rules"),
    }
}

#[get("/v1/fare-rules/active")]
/// Return the fare rule that prices trips requested now.
pub async fn api_v1_active_fare_rule(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_active_fare_rule(repo.get_ref(), &user, Utc::now().naive_utc()) {
        Ok(rule) => HttpResponse::Ok().json(rule),
        Err(err) => error_response(err, "load active fare rule"),
    }
}

#[post("/v1/fare-rules")]
pub async fn api_v1_add_fare_rule(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<FareRuleForm>,
) -> impl Responder {
    match create_fare_rule(
        repo.get_ref(),
        &user,
        form.into_inner(),
        Utc::now().naive_utc(),
    ) {
        Ok(rule) => HttpResponse::Created().json(rule),
        Err(err) => error_response(err, "create fare rule"),
    }
}

#[post("/v1/fare-rules/{rule_id}")]
pub async fn api_v1_edit_fare_rule(
    rule_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<FareRuleForm>,
) -> impl Responder {
    match modify_fare_rule(
        repo.get_ref(),
        &user,
        rule_id.into_inner(),
        form.into_inner(),
        Utc::now().naive_utc(),
    ) {
        Ok(rule) => HttpResponse::Ok().json(rule),
        Err(err) => error_response(err, "update fare rule"),
    }
}

#[post("/v1/fare-rules/{rule_id}/delete")]
pub async fn api_v1_delete_fare_rule(
    rule_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match remove_fare_rule(repo.get_ref(), &user, rule_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, "delete fare rule"),
    }
}

#[get("/v1/car-classes")]
pub async fn api_v1_car_classes(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_car_classes(repo.get_ref(), &user) {
        Ok(car_classes) => HttpResponse::Ok().json(car_classes),
        Err(err) => error_response(err, "list car classes"),
    }
}

#[post("/v1/car-classes")]
pub async fn api_v1_add_car_class(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCarClassForm>,
) -> impl Responder {
    match create_car_class(repo.get_ref(), &user, form.into_inner()) {
        Ok(car_class) => HttpResponse::Created().json(car_class),
        Err(err) => error_response(err, "create car class"),
    }
}
