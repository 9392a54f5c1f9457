pub mod car_class;
pub mod fare_rule;
pub mod money;
pub mod promo_code;
pub mod quote;
pub mod trip;
