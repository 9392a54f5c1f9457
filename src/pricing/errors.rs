use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;

use crate::domain::trip::InvalidTripError;

/// Result type returned by the fare engine.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors surfaced while selecting a rule or pricing a trip.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The trip inputs are missing or contradictory.
    #[error("invalid trip: {0}")]
    InvalidTrip(#[from] InvalidTripError),
    /// No rule matched and none could be created. Not expected in practice.
    #[error("no active fare rule is available")]
    PolicyNotFound,
    /// The policy store failed.
    #[error("fare rule storage failed: {0}")]
    Repository(#[from] RepositoryError),
}
