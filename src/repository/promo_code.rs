use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::promo_code::{
    NewPromoCode as DomainNewPromoCode, PromoCode as DomainPromoCode, normalize_code,
};
use crate::models::promo_code::{NewPromoCode as DbNewPromoCode, PromoCode as DbPromoCode};
use crate::repository::{DieselRepository, PromoCodeReader, PromoCodeWriter};

impl PromoCodeReader for DieselRepository {
    fn get_promo_code(&self, code: &str) -> RepositoryResult<Option<DomainPromoCode>> {
        use crate::schema::promo_codes;

        let mut conn = self.conn()?;
        let promo_code = promo_codes::table
            .filter(promo_codes::code.eq(normalize_code(code)))
            .first::<DbPromoCode>(&mut conn)
            .optional()?;

        Ok(promo_code.map(Into::into))
    }
}

impl PromoCodeWriter for DieselRepository {
    fn create_promo_code(
        &self,
        new_promo_code: &DomainNewPromoCode,
    ) -> RepositoryResult<DomainPromoCode> {
        use crate::schema::promo_codes;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(promo_codes::table)
            .values(&DbNewPromoCode::from(new_promo_code))
            .get_result::<DbPromoCode>(&mut conn)?;

        Ok(created.into())
    }
}
