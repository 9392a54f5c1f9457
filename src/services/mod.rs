pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

use crate::pricing::PricingError;

pub mod car_classes;
pub mod fare_rules;
pub mod quotes;

impl From<PricingError> for ServiceError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidTrip(err) => ServiceError::Form(err.to_string()),
            PricingError::PolicyNotFound => ServiceError::NotFound,
            PricingError::Repository(err) => ServiceError::from(err),
        }
    }
}
