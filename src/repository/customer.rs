use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::{
    domain::customer::{
        Customer as DomainCustomer, CustomerListQuery, NewCustomer as DomainNewCustomer,
        UpdateCustomer as DomainUpdateCustomer,
    },
    models::customer::{
        Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
    },
    repository::{CustomerReader, CustomerWriter, DieselRepository},
};

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id))
            .filter(customers::hub_id.eq(hub_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn find_customer_by_public_id(
        &self,
        public_id: &str,
    ) -> RepositoryResult<Option<DomainCustomer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::public_id.eq(public_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCustomer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let search_pattern = query.search.as_ref().map(|term| format!("%{term}%"));

        let mut count_query = customers::table
            .filter(customers::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pattern) = search_pattern.as_ref() {
            count_query = count_query.filter(
                customers::name
                    .like(pattern.clone())
                    .or(customers::email.like(pattern.clone())),
            );
        }

        if query.pending_only {
            count_query = count_query.filter(customers::pending_registration.eq(true));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = customers::table
            .filter(customers::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pattern) = search_pattern.as_ref() {
            items = items.filter(
                customers::name
                    .like(pattern.clone())
                    .or(customers::email.like(pattern.clone())),
            );
        }

        if query.pending_only {
            items = items.filter(customers::pending_registration.eq(true));
        }

        items = items.order(customers::name.asc());

        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_customers = items.load::<DbCustomer>(&mut conn)?;

        Ok((total, db_customers.into_iter().map(Into::into).collect()))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(
        &self,
        new_customer: &DomainNewCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(customers::table)
            .values(&DbNewCustomer::from(new_customer))
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(created.into())
    }

    fn update_customer(
        &self,
        customer_id: i32,
        hub_id: i32,
        updates: &DomainUpdateCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCustomer::from(updates);

        let target = customers::table
            .filter(customers::id.eq(customer_id))
            .filter(customers::hub_id.eq(hub_id));

        let updated = if updates.pending_registration == Some(false) {
            // Registration completes only once.
            diesel::update(target.filter(customers::pending_registration.eq(true)))
                .set(&db_updates)
                .get_result::<DbCustomer>(&mut conn)?
        } else {
            diesel::update(target)
                .set(&db_updates)
                .get_result::<DbCustomer>(&mut conn)?
        };

        Ok(updated.into())
    }
}
