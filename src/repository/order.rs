use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::order::{
        NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery,
        UpdateOrder as DomainUpdateOrder,
    },
    models::order::{NewOrder as DbNewOrder, Order as DbOrder, UpdateOrder as DbUpdateOrder},
    repository::{DieselRepository, OrderReader, OrderWriter},
};

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .filter(orders::hub_id.eq(hub_id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        order.map(DomainOrder::try_from).transpose()
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let OrderListQuery {
            hub_id,
            customer_id,
            week_number,
            year,
            day_of_week,
            status,
            pagination,
        } = query;

        let status_filter: Option<&'static str> = status.map(Into::into);

        let build = || {
            let mut query = orders::table
                .filter(orders::hub_id.eq(hub_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(customer) = customer_id {
                query = query.filter(orders::customer_id.eq(customer));
            }
            if let Some(week) = week_number {
                query = query.filter(orders::week_number.eq(week));
            }
            if let Some(year) = year {
                query = query.filter(orders::year.eq(year));
            }
            if let Some(day) = day_of_week {
                query = query.filter(orders::day_of_week.eq(day));
            }
            if let Some(status) = status_filter {
                query = query.filter(orders::status.eq(status));
            }

            query
        };

        let total = build().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = build().order((
            orders::year.desc(),
            orders::week_number.desc(),
            orders::day_of_week.asc(),
            orders::customer_id.asc(),
        ));

        if let Some(pagination) = pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let orders = items
            .load::<DbOrder>(&mut conn)?
            .into_iter()
            .map(DomainOrder::try_from)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, orders))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let db_new = DbNewOrder::try_from(new_order)?;

        let created = diesel::insert_into(orders::table)
            .values(&db_new)
            .get_result::<DbOrder>(&mut conn)?;

        created.try_into()
    }

    fn update_order(
        &self,
        order_id: i32,
        hub_id: i32,
        updates: &DomainUpdateOrder,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::orders;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateOrder::try_from(updates)?;

        let target = orders::table
            .filter(orders::id.eq(order_id))
            .filter(orders::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbOrder>(&mut conn)?;

        updated.try_into()
    }

    fn delete_order(&self, order_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        let target = orders::table
            .filter(orders::id.eq(order_id))
            .filter(orders::hub_id.eq(hub_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
