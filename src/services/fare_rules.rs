use chrono::NaiveDateTime;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::fare_rule::{FareRule, FareRuleListQuery};
use crate::forms::fare_rules::FareRuleForm;
use crate::permissions::{Action, Resource, authorize};
use crate::pricing::select_active_rule;
use crate::repository::{FareRuleReader, FareRuleWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the fare rule listing.
#[derive(Debug, Default, Deserialize)]
pub struct FareRuleQuery {
    /// Only list active rules.
    #[serde(default)]
    pub active_only: bool,
    /// Page number requested (1-based).
    pub page: Option<usize>,
}

fn ensure_allowed(user: &AuthenticatedUser, action: Action) -> ServiceResult<()> {
    if authorize(user, action, Resource::FareRule).is_allowed() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Paginated fare rules, newest first.
pub fn load_fare_rules<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: FareRuleQuery,
) -> ServiceResult<Paginated<FareRule>>
where
    R: FareRuleReader + ?Sized,
{
    ensure_allowed(user, Action::View)?;

    let page = query.page.unwrap_or(1);
    let mut list_query = FareRuleListQuery::new();
    if query.active_only {
        list_query = list_query.active_only();
    }
    list_query = list_query.paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, rules) = repo.list_fare_rules(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(Paginated::new(rules, page, total_pages))
}

/// The rule that would price a trip requested at `now`. Creates the stock
/// rule when nothing is in force.
pub fn load_active_fare_rule<R>(
    repo: &R,
    user: &AuthenticatedUser,
    now: NaiveDateTime,
) -> ServiceResult<FareRule>
where
    R: FareRuleReader + FareRuleWriter + ?Sized,
{
    ensure_allowed(user, Action::View)?;

    Ok(select_active_rule(repo, now)?)
}

/// Create a fare rule. An active rule without a window replaces the current
/// unbounded active rule.
pub fn create_fare_rule<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: FareRuleForm,
    now: NaiveDateTime,
) -> ServiceResult<FareRule>
where
    R: FareRuleWriter + ?Sized,
{
    ensure_allowed(user, Action::Add)?;

    let new_rule = form
        .into_new_fare_rule()
        .map_err(|err| ServiceError::Form(err.to_string()))?
        .with_created_at(now);

    let rule = repo.create_fare_rule(&new_rule).map_err(ServiceError::from)?;
    log::info!("fare rule {} `{}` created by {}", rule.id, rule.name, user.email);
    Ok(rule)
}

/// Replace every setting of an existing fare rule.
pub fn modify_fare_rule<R>(
    repo: &R,
    user: &AuthenticatedUser,
    rule_id: i32,
    form: FareRuleForm,
    now: NaiveDateTime,
) -> ServiceResult<FareRule>
where
    R: FareRuleReader + FareRuleWriter + ?Sized,
{
    ensure_allowed(user, Action::Update)?;

    let mut update = form
        .into_update_fare_rule()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    update.updated_at = now;

    if repo
        .get_fare_rule_by_id(rule_id)
        .map_err(ServiceError::from)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let rule = repo
        .update_fare_rule(rule_id, &update)
        .map_err(ServiceError::from)?;
    log::info!("fare rule {} updated by {}", rule.id, user.email);
    Ok(rule)
}

/// Delete a fare rule.
pub fn remove_fare_rule<R>(repo: &R, user: &AuthenticatedUser, rule_id: i32) -> ServiceResult<()>
where
    R: FareRuleWriter + ?Sized,
{
    ensure_allowed(user, Action::Delete)?;

    repo.delete_fare_rule(rule_id).map_err(ServiceError::from)?;
    log::info!("fare rule {rule_id} deleted by {}", user.email);
    Ok(())
}
