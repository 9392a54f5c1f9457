use chrono::NaiveDateTime;
use diesel::connection::SimpleConnection;
use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::car_class::{CarClass, NewCarClass};
use crate::domain::fare_rule::{FareRule, FareRuleListQuery, NewFareRule, UpdateFareRule};
use crate::domain::promo_code::{NewPromoCode, PromoCode};

pub mod car_class;
pub mod fare_rule;
pub mod promo_code;

#[cfg(test)]
pub mod mock;

/// How long a connection waits for SQLite's write lock before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Check out a connection that waits for SQLite's write lock instead of
    /// failing with `database is locked`.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        let mut conn = self.pool.get()?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))?;
        Ok(conn)
    }
}

/// Read-only operations over fare rules.
pub trait FareRuleReader {
    fn get_fare_rule_by_id(&self, id: i32) -> RepositoryResult<Option<FareRule>>;
    fn list_fare_rules(&self, query: FareRuleListQuery) -> RepositoryResult<(usize, Vec<FareRule>)>;
    /// Active rules whose effective window contains `now`, newest first.
    fn find_active_rules(&self, now: NaiveDateTime) -> RepositoryResult<Vec<FareRule>>;
}

/// Write operations over fare rules.
pub trait FareRuleWriter {
    /// Insert a rule. An active rule without window bounds replaces any
    /// previous unbounded active rule, which is deactivated.
    fn create_fare_rule(&self, new_rule: &NewFareRule) -> RepositoryResult<FareRule>;
    fn update_fare_rule(&self, rule_id: i32, updates: &UpdateFareRule)
    -> RepositoryResult<FareRule>;
    fn delete_fare_rule(&self, rule_id: i32) -> RepositoryResult<()>;
    /// Atomically return the newest rule in force at `now`, inserting the
    /// stock default when there is none. Safe to call concurrently.
    fn find_or_create_default_rule(&self, now: NaiveDateTime) -> RepositoryResult<FareRule>;
}

/// Read-only operations over car classes.
pub trait CarClassReader {
    fn get_car_class_by_id(&self, id: i32) -> RepositoryResult<Option<CarClass>>;
    fn list_car_classes(&self) -> RepositoryResult<Vec<CarClass>>;
}

/// Write operations over car classes.
pub trait CarClassWriter {
    fn create_car_class(&self, new_car_class: &NewCarClass) -> RepositoryResult<CarClass>;
}

/// Read-only operations over promo codes.
pub trait PromoCodeReader {
    /// Look up a code case-insensitively.
    fn get_promo_code(&self, code: &str) -> RepositoryResult<Option<PromoCode>>;
}

/// Write operations over promo codes.
pub trait PromoCodeWriter {
    fn create_promo_code(&self, new_promo_code: &NewPromoCode) -> RepositoryResult<PromoCode>;
}
