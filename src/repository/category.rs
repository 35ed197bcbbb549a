use chrono::Local;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::category::{
    Category as DomainCategory, CategoryListQuery, CategoryType as DomainCategoryType,
    NewCategory as DomainNewCategory, NewCategoryType as DomainNewCategoryType,
    UpdateCategory as DomainUpdateCategory,
};
use crate::models::category::{
    Category as DbCategory, CategoryType as DbCategoryType, NewCategory as DbNewCategory,
    NewCategoryType as DbNewCategoryType, UpdateCategory,
};
use crate::repository::{
    CategoryReader, CategoryTypeReader, CategoryTypeWriter, CategoryWriter, DieselRepository,
};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(
        &self,
        category_id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::hub_id.eq(hub_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }

    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let mut items_query = categories::table
            .filter(categories::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items_query = items_query.filter(categories::is_active.eq(true));
        }

        if let Some(category_type) = query.category_type.as_ref() {
            items_query = items_query.filter(categories::category_type.eq(category_type));
        }

        let categories = items_query
            .order((
                categories::level.asc(),
                categories::position.asc(),
                categories::name.asc(),
            ))
            .load::<DbCategory>(&mut conn)?;

        Ok(categories.into_iter().map(DomainCategory::from).collect())
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        if let Some(parent_id) = new_category.parent_id {
            ensure_category_with_hub(&mut conn, new_category.hub_id, parent_id)?;
        }

        let insertable = DbNewCategory::from(new_category);

        let created = diesel::insert_into(categories::table)
            .values(&insertable)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category(
        &self,
        category_id: i32,
        hub_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let db_updates = UpdateCategory::from(updates);

        let target = categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            ensure_category_with_hub(conn, hub_id, category_id)?;

            // Children move to the top of the tree.
            diesel::update(
                categories::table
                    .filter(categories::hub_id.eq(hub_id))
                    .filter(categories::parent_id.eq(Some(category_id))),
            )
            .set((
                categories::parent_id.eq::<Option<i32>>(None),
                categories::level.eq(1),
                categories::updated_at.eq(Local::now().naive_utc()),
            ))
            .execute(conn)?;

            diesel::delete(
                categories::table
                    .filter(categories::id.eq(category_id))
                    .filter(categories::hub_id.eq(hub_id)),
            )
            .execute(conn)?;

            Ok(())
        })
    }
}

impl CategoryTypeReader for DieselRepository {
    fn list_category_types(&self, hub_id: i32) -> RepositoryResult<Vec<DomainCategoryType>> {
        use crate::schema::category_types;

        let mut conn = self.conn()?;

        let types = category_types::table
            .filter(category_types::hub_id.eq(hub_id))
            .order((category_types::position.asc(), category_types::label.asc()))
            .load::<DbCategoryType>(&mut conn)?;

        Ok(types.into_iter().map(Into::into).collect())
    }
}

impl CategoryTypeWriter for DieselRepository {
    fn create_category_type(
        &self,
        new_type: &DomainNewCategoryType,
    ) -> RepositoryResult<DomainCategoryType> {
        use crate::schema::category_types;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(category_types::table)
            .values(&DbNewCategoryType::from(new_type))
            .get_result::<DbCategoryType>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category_type(
        &self,
        type_id: i32,
        hub_id: i32,
        updates: &DomainNewCategoryType,
    ) -> RepositoryResult<DomainCategoryType> {
        use crate::schema::category_types;

        let mut conn = self.conn()?;

        let target = category_types::table
            .filter(category_types::id.eq(type_id))
            .filter(category_types::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&DbNewCategoryType::from(updates))
            .get_result::<DbCategoryType>(&mut conn)?;

        Ok(updated.into())
    }
}

fn ensure_category_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    category_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::categories;

    let exists = select(exists(
        categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::hub_id.eq(hub_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
