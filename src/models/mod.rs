pub mod car_class;
pub mod fare_rule;
pub mod promo_code;
