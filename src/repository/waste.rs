use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::waste::{
        NewWasteRecord as DomainNewWasteRecord, WasteListQuery,
        WasteRecord as DomainWasteRecord,
    },
    models::waste::{
        NewWasteRecord as DbNewWasteRecord, ReplaceWasteRecord, WasteRecord as DbWasteRecord,
    },
    repository::{DieselRepository, WasteReader, WasteWriter},
};

impl WasteReader for DieselRepository {
    fn list_waste_records(&self, query: WasteListQuery) -> RepositoryResult<Vec<DomainWasteRecord>> {
        use crate::schema::waste_records;

        let mut conn = self.conn()?;

        let mut items = waste_records::table
            .filter(waste_records::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(customer) = query.customer_id {
            items = items.filter(waste_records::customer_id.eq(customer));
        }
        if let Some(week) = query.week_number {
            items = items.filter(waste_records::week_number.eq(week));
        }
        if let Some(year) = query.year {
            items = items.filter(waste_records::year.eq(year));
        }
        if let Some(day) = query.day_of_week {
            items = items.filter(waste_records::day_of_week.eq(day));
        }

        items
            .order((
                waste_records::year.asc(),
                waste_records::week_number.asc(),
                waste_records::day_of_week.asc(),
            ))
            .load::<DbWasteRecord>(&mut conn)?
            .into_iter()
            .map(DomainWasteRecord::try_from)
            .collect()
    }
}

impl WasteWriter for DieselRepository {
    fn save_waste_record(
        &self,
        record: &DomainNewWasteRecord,
    ) -> RepositoryResult<DomainWasteRecord> {
        use crate::schema::waste_records;

        let mut conn = self.conn()?;

        conn.transaction::<DomainWasteRecord, RepositoryError, _>(|conn| {
            let existing = waste_records::table
                .filter(waste_records::hub_id.eq(record.hub_id))
                .filter(waste_records::customer_id.eq(record.customer_id))
                .filter(waste_records::week_number.eq(record.week_number))
                .filter(waste_records::year.eq(record.year))
                .filter(waste_records::day_of_week.eq(record.day_of_week))
                .select(waste_records::id)
                .first::<i32>(conn)
                .optional()?;

            let saved = match existing {
                Some(id) => diesel::update(waste_records::table.find(id))
                    .set(&ReplaceWasteRecord::try_from(record)?)
                    .get_result::<DbWasteRecord>(conn)?,
                None => diesel::insert_into(waste_records::table)
                    .values(&DbNewWasteRecord::try_from(record)?)
                    .get_result::<DbWasteRecord>(conn)?,
            };

            saved.try_into()
        })
    }
}
