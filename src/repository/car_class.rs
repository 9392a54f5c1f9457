use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::car_class::{CarClass as DomainCarClass, NewCarClass as DomainNewCarClass};
use crate::models::car_class::{CarClass as DbCarClass, NewCarClass as DbNewCarClass};
use crate::repository::{CarClassReader, CarClassWriter, DieselRepository};

impl CarClassReader for DieselRepository {
    fn get_car_class_by_id(&self, id: i32) -> RepositoryResult<Option<DomainCarClass>> {
        use crate::schema::car_classes;

        let mut conn = self.conn()?;
        let car_class = car_classes::table
            .find(id)
            .first::<DbCarClass>(&mut conn)
            .optional()?;

        Ok(car_class.map(Into::into))
    }

    fn list_car_classes(&self) -> RepositoryResult<Vec<DomainCarClass>> {
        use crate::schema::car_classes;

        let mut conn = self.conn()?;
        let items = car_classes::table
            .order(car_classes::name.asc())
            .load::<DbCarClass>(&mut conn)?;

        Ok(items.into_iter().map(Into::into).collect())
    }
}

impl CarClassWriter for DieselRepository {
    fn create_car_class(&self, new_car_class: &DomainNewCarClass) -> RepositoryResult<DomainCarClass> {
        use crate::schema::car_classes;

        let mut conn = self.conn()?;
        let insertable = DbNewCarClass::from(new_car_class);

        let created = diesel::insert_into(car_classes::table)
            .values(&insertable)
            .get_result::<DbCarClass>(&mut conn)?;

        Ok(created.into())
    }
}
