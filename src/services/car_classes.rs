use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::car_class::CarClass;
use crate::forms::car_classes::AddCarClassForm;
use crate::permissions::{Action, Resource, authorize};
use crate::repository::{CarClassReader, CarClassWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every car class, ordered by name.
pub fn load_car_classes<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<CarClass>>
where
    R: CarClassReader + ?Sized,
{
    if !authorize(user, Action::View, Resource::CarClass).is_allowed() {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_car_classes().map_err(ServiceError::from)
}

/// Creates a new car class rate card.
pub fn create_car_class<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCarClassForm,
) -> ServiceResult<CarClass>
where
    R: CarClassWriter + ?Sized,
{
    if !authorize(user, Action::Add, Resource::CarClass).is_allowed() {
        return Err(ServiceError::Unauthorized);
    }

    let new_car_class = form
        .into_new_car_class()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_car_class(&new_car_class)
        .map_err(ServiceError::from)
}
