use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::recipe::{
        NewRecipe as DomainNewRecipe, Recipe as DomainRecipe, RecipeListQuery,
        UpdateRecipe as DomainUpdateRecipe,
    },
    models::recipe::{
        NewRecipe as DbNewRecipe, Recipe as DbRecipe, UpdateRecipe as DbUpdateRecipe,
    },
    repository::{DieselRepository, RecipeReader, RecipeWriter},
};

impl RecipeReader for DieselRepository {
    fn get_recipe_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainRecipe>> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;
        let recipe = recipes::table
            .filter(recipes::id.eq(id))
            .filter(recipes::hub_id.eq(hub_id))
            .first::<DbRecipe>(&mut conn)
            .optional()?;

        recipe.map(DomainRecipe::try_from).transpose()
    }

    fn list_recipes(&self, query: RecipeListQuery) -> RepositoryResult<(usize, Vec<DomainRecipe>)> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        let RecipeListQuery {
            hub_id,
            include_inactive,
            search,
            pagination,
        } = query;

        let search_pattern = search.map(|term| format!("%{term}%"));

        let mut count_query = recipes::table
            .filter(recipes::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !include_inactive {
            count_query = count_query.filter(recipes::is_active.eq(true));
        }

        if let Some(pattern) = search_pattern.as_ref() {
            count_query = count_query.filter(recipes::name.like(pattern.clone()));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = recipes::table
            .filter(recipes::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !include_inactive {
            items = items.filter(recipes::is_active.eq(true));
        }

        if let Some(pattern) = search_pattern.as_ref() {
            items = items.filter(recipes::name.like(pattern.clone()));
        }

        items = items.order(recipes::name.asc());

        if let Some(pagination) = pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let recipes = items
            .load::<DbRecipe>(&mut conn)?
            .into_iter()
            .map(DomainRecipe::try_from)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, recipes))
    }
}

impl RecipeWriter for DieselRepository {
    fn create_recipe(&self, new_recipe: &DomainNewRecipe) -> RepositoryResult<DomainRecipe> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;
        let db_new = DbNewRecipe::try_from(new_recipe)?;

        let created = diesel::insert_into(recipes::table)
            .values(&db_new)
            .get_result::<DbRecipe>(&mut conn)?;

        created.try_into()
    }

    fn update_recipe(
        &self,
        recipe_id: i32,
        hub_id: i32,
        updates: &DomainUpdateRecipe,
    ) -> RepositoryResult<DomainRecipe> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateRecipe::try_from(updates)?;

        let target = recipes::table
            .filter(recipes::id.eq(recipe_id))
            .filter(recipes::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbRecipe>(&mut conn)?;

        updated.try_into()
    }

    fn delete_recipe(&self, recipe_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        let target = recipes::table
            .filter(recipes::id.eq(recipe_id))
            .filter(recipes::hub_id.eq(hub_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
