use chrono::NaiveDateTime;
use mockall::mock;

use super::{
    CarClassReader, CarClassWriter, FareRuleReader, FareRuleWriter, PromoCodeReader,
    PromoCodeWriter,
};
use crate::domain::{
    car_class::{CarClass, NewCarClass},
    fare_rule::{FareRule, FareRuleListQuery, NewFareRule, UpdateFareRule},
    promo_code::{NewPromoCode, PromoCode},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    pub FareRuleReader {}

    impl FareRuleReader for FareRuleReader {
        fn get_fare_rule_by_id(&self, id: i32) -> RepositoryResult<Option<FareRule>>;
        fn list_fare_rules(&self, query: FareRuleListQuery) -> RepositoryResult<(usize, Vec<FareRule>)>;
        fn find_active_rules(&self, now: NaiveDateTime) -> RepositoryResult<Vec<FareRule>>;
    }
}

mock! {
    pub FareRuleWriter {}

    impl FareRuleWriter for FareRuleWriter {
        fn create_fare_rule(&self, new_rule: &NewFareRule) -> RepositoryResult<FareRule>;
        fn update_fare_rule(&self, rule_id: i32, updates: &UpdateFareRule) -> RepositoryResult<FareRule>;
        fn delete_fare_rule(&self, rule_id: i32) -> RepositoryResult<()>;
        fn find_or_create_default_rule(&self, now: NaiveDateTime) -> RepositoryResult<FareRule>;
    }
}

mock! {
    pub CarClassReader {}

    impl CarClassReader for CarClassReader {
        fn get_car_class_by_id(&self, id: i32) -> RepositoryResult<Option<CarClass>>;
        fn list_car_classes(&self) -> RepositoryResult<Vec<CarClass>>;
    }
}

mock! {
    pub CarClassWriter {}

    impl CarClassWriter for CarClassWriter {
        fn create_car_class(&self, new_car_class: &NewCarClass) -> RepositoryResult<CarClass>;
    }
}

mock! {
    pub PromoCodeReader {}

    impl PromoCodeReader for PromoCodeReader {
        fn get_promo_code(&self, code: &str) -> RepositoryResult<Option<PromoCode>>;
    }
}

mock! {
    pub PromoCodeWriter {}

    impl PromoCodeWriter for PromoCodeWriter {
        fn create_promo_code(&self, new_promo_code: &NewPromoCode) -> RepositoryResult<PromoCode>;
    }
}
