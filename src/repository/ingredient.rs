use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::ingredient::{
        Ingredient as DomainIngredient, IngredientListQuery, NewIngredient as DomainNewIngredient,
        UpdateIngredient as DomainUpdateIngredient,
    },
    models::ingredient::{
        Ingredient as DbIngredient, NewIngredient as DbNewIngredient,
        UpdateIngredient as DbUpdateIngredient,
    },
    repository::{DieselRepository, IngredientReader, IngredientWriter},
};

impl IngredientReader for DieselRepository {
    fn get_ingredient_by_id(
        &self,
        id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainIngredient>> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;
        let ingredient = ingredients::table
            .filter(ingredients::id.eq(id))
            .filter(ingredients::hub_id.eq(hub_id))
            .first::<DbIngredient>(&mut conn)
            .optional()?;

        Ok(ingredient.map(Into::into))
    }

    fn list_ingredients(
        &self,
        query: IngredientListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainIngredient>)> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let IngredientListQuery {
            hub_id,
            search,
            include_inactive,
            pagination,
        } = query;

        let search_pattern = search.map(|term| format!("%{term}%"));

        let mut count_query = ingredients::table
            .filter(ingredients::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !include_inactive {
            count_query = count_query.filter(ingredients::is_active.eq(true));
        }

        if let Some(pattern) = search_pattern.as_ref() {
            count_query = count_query.filter(ingredients::name.like(pattern.clone()));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = ingredients::table
            .filter(ingredients::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !include_inactive {
            items = items.filter(ingredients::is_active.eq(true));
        }

        if let Some(pattern) = search_pattern.as_ref() {
            items = items.filter(ingredients::name.like(pattern.clone()));
        }

        items = items.order(ingredients::name.asc());

        if let Some(pagination) = pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbIngredient>(&mut conn)?;

        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl IngredientWriter for DieselRepository {
    fn create_ingredient(
        &self,
        new_ingredient: &DomainNewIngredient,
    ) -> RepositoryResult<DomainIngredient> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let created = diesel::insert_into(ingredients::table)
            .values(&DbNewIngredient::from(new_ingredient))
            .get_result::<DbIngredient>(&mut conn)?;

        Ok(created.into())
    }

    fn update_ingredient(
        &self,
        ingredient_id: i32,
        hub_id: i32,
        updates: &DomainUpdateIngredient,
    ) -> RepositoryResult<DomainIngredient> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let target = ingredients::table
            .filter(ingredients::id.eq(ingredient_id))
            .filter(ingredients::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&DbUpdateIngredient::from(updates))
            .get_result::<DbIngredient>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_ingredient(&self, ingredient_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;

        let target = ingredients::table
            .filter(ingredients::id.eq(ingredient_id))
            .filter(ingredients::hub_id.eq(hub_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
