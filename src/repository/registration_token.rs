use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::{
        customer::{Customer as DomainCustomer, NewCustomer as DomainNewCustomer},
        registration_token::{
            NewRegistrationToken as DomainNewRegistrationToken,
            RegistrationToken as DomainRegistrationToken,
        },
    },
    models::{
        customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer},
        registration_token::{
            NewRegistrationToken as DbNewRegistrationToken,
            RegistrationToken as DbRegistrationToken,
        },
    },
    repository::{DieselRepository, RegistrationTokenReader, RegistrationTokenWriter},
};

impl RegistrationTokenReader for DieselRepository {
    fn get_registration_token(
        &self,
        hub_id: i32,
        token: &str,
    ) -> RepositoryResult<Option<DomainRegistrationToken>> {
        use crate::schema::registration_tokens;

        let mut conn = self.conn()?;
        let found = registration_tokens::table
            .filter(registration_tokens::hub_id.eq(hub_id))
            .filter(registration_tokens::token.eq(token))
            .first::<DbRegistrationToken>(&mut conn)
            .optional()?;

        Ok(found.map(Into::into))
    }
}

impl RegistrationTokenWriter for DieselRepository {
    fn create_registration_token(
        &self,
        new_token: &DomainNewRegistrationToken,
    ) -> RepositoryResult<DomainRegistrationToken> {
        use crate::schema::registration_tokens;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(registration_tokens::table)
            .values(&DbNewRegistrationToken::from(new_token))
            .get_result::<DbRegistrationToken>(&mut conn)?;

        Ok(created.into())
    }

    fn redeem_registration_token(
        &self,
        hub_id: i32,
        token: &str,
        new_customer: &DomainNewCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        use crate::schema::{customers, registration_tokens};

        let mut conn = self.conn()?;

        conn.transaction::<DomainCustomer, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(customers::table)
                .values(&DbNewCustomer::from(new_customer))
                .get_result::<DbCustomer>(conn)?;

            let redeemed = diesel::update(
                registration_tokens::table
                    .filter(registration_tokens::hub_id.eq(hub_id))
                    .filter(registration_tokens::token.eq(token))
                    .filter(registration_tokens::redeemed_at.is_null()),
            )
            .set((
                registration_tokens::customer_id.eq(Some(created.id)),
                registration_tokens::redeemed_at.eq(Some(chrono::Local::now().naive_utc())),
            ))
            .execute(conn)?;

            // Rolls the customer back as well.
            if redeemed == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(created.into())
        })
    }
}
