use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::fare_rule::{
        FareRule as DomainFareRule, FareRuleListQuery, NewFareRule as DomainNewFareRule,
        UpdateFareRule as DomainUpdateFareRule,
    },
    models::fare_rule::{
        FareRule as DbFareRule, NewFareRule as DbNewFareRule, UpdateFareRule as DbUpdateFareRule,
    },
    repository::{DieselRepository, FareRuleReader, FareRuleWriter},
    schema::fare_rules,
};

/// Active rules in force at `now`, newest first.
fn effective_rules(now: NaiveDateTime) -> fare_rules::BoxedQuery<'static, Sqlite> {
    fare_rules::table
        .filter(fare_rules::active.eq(true))
        .filter(
            fare_rules::starts_at
                .is_null()
                .or(fare_rules::starts_at.le(now)),
        )
        .filter(fare_rules::ends_at.is_null().or(fare_rules::ends_at.ge(now)))
        .order((fare_rules::created_at.desc(), fare_rules::id.desc()))
        .into_boxed()
}

/// Deactivate every active rule without window bounds, except `keep`.
fn retire_unbounded_active(
    conn: &mut SqliteConnection,
    keep: Option<i32>,
    updated_at: NaiveDateTime,
) -> QueryResult<usize> {
    let ids = fare_rules::table
        .select(fare_rules::id)
        .filter(fare_rules::active.eq(true))
        .filter(fare_rules::starts_at.is_null())
        .filter(fare_rules::ends_at.is_null())
        .load::<i32>(conn)?
        .into_iter()
        .filter(|id| Some(*id) != keep)
        .collect::<Vec<_>>();

    if ids.is_empty() {
        return Ok(0);
    }

    log::info!("deactivating superseded fare rules {ids:?}");

    diesel::update(fare_rules::table.filter(fare_rules::id.eq_any(&ids)))
        .set((
            fare_rules::active.eq(false),
            fare_rules::updated_at.eq(updated_at),
        ))
        .execute(conn)
}

impl FareRuleReader for DieselRepository {
    fn get_fare_rule_by_id(&self, id: i32) -> RepositoryResult<Option<DomainFareRule>> {
        let mut conn = self.conn()?;
        let rule = fare_rules::table
            .find(id)
            .first::<DbFareRule>(&mut conn)
            .optional()?;

        Ok(rule.map(Into::into))
    }

    fn list_fare_rules(
        &self,
        query: FareRuleListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainFareRule>)> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = fare_rules::table.into_boxed::<Sqlite>();

            if query.active_only {
                items = items.filter(fare_rules::active.eq(true));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items =
            query_builder().order((fare_rules::created_at.desc(), fare_rules::id.desc()));

        if let Some(pagination) = &query.pagination {
            let offset = pagination
                .page
                .max(1)
                .saturating_sub(1)
                .saturating_mul(pagination.per_page);
            let offset = i64::try_from(offset).unwrap_or(i64::MAX);
            let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
            items = items.offset(offset).limit(limit);
        }

        let db_rules = items.load::<DbFareRule>(&mut conn)?;

        Ok((total, db_rules.into_iter().map(Into::into).collect()))
    }

    fn find_active_rules(&self, now: NaiveDateTime) -> RepositoryResult<Vec<DomainFareRule>> {
        let mut conn = self.conn()?;
        let rules = effective_rules(now).load::<DbFareRule>(&mut conn)?;

        Ok(rules.into_iter().map(Into::into).collect())
    }
}

impl FareRuleWriter for DieselRepository {
    fn create_fare_rule(&self, new_rule: &DomainNewFareRule) -> RepositoryResult<DomainFareRule> {
        let mut conn = self.conn()?;

        conn.immediate_transaction::<DomainFareRule, RepositoryError, _>(|conn| {
            if new_rule.is_unbounded_active() {
                retire_unbounded_active(conn, None, new_rule.created_at)?;
            }

            let created = diesel::insert_into(fare_rules::table)
                .values(&DbNewFareRule::from(new_rule))
                .get_result::<DbFareRule>(conn)?;

            Ok(created.into())
        })
    }

    fn update_fare_rule(
        &self,
        rule_id: i32,
        updates: &DomainUpdateFareRule,
    ) -> RepositoryResult<DomainFareRule> {
        let mut conn = self.conn()?;
        let db_updates = DbUpdateFareRule::from(updates);

        conn.immediate_transaction::<DomainFareRule, RepositoryError, _>(|conn| {
            if updates.values.is_unbounded_active() {
                retire_unbounded_active(conn, Some(rule_id), updates.updated_at)?;
            }

            let updated = diesel::update(fare_rules::table.find(rule_id))
                .set(&db_updates)
                .get_result::<DbFareRule>(conn)?;

            Ok(updated.into())
        })
    }

    fn delete_fare_rule(&self, rule_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(fare_rules::table.find(rule_id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn find_or_create_default_rule(&self, now: NaiveDateTime) -> RepositoryResult<DomainFareRule> {
        let mut conn = self.conn()?;

        let default_rule = DomainNewFareRule::auto_default().with_created_at(now);

        // BEGIN IMMEDIATE takes the write lock up front, so concurrent callers
        // queue here instead of racing between the lookup and the insert.
        conn.immediate_transaction::<DomainFareRule, RepositoryError, _>(|conn| {
            if let Some(existing) = effective_rules(now).first::<DbFareRule>(conn).optional()? {
                return Ok(existing.into());
            }

            // The partial unique index on unbounded active rules turns a
            // duplicate default into a no-op.
            let inserted = diesel::insert_or_ignore_into(fare_rules::table)
                .values(&DbNewFareRule::from(&default_rule))
                .execute(conn)?;
            if inserted > 0 {
                log::info!(
                    "no fare rule in force at {now}, created `{}`",
                    default_rule.name
                );
            }

            effective_rules(now)
                .first::<DbFareRule>(conn)
                .optional()?
                .map(Into::into)
                .ok_or(RepositoryError::NotFound)
        })
    }
}
