use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;
use serde::{Deserialize, Serialize};

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::quantity::{format_currency, parse_quantity};
use crate::domain::recipe::{
    Recipe, RecipeTotals, UpdateRecipe, adjust_recipe_quantities, calculate_recipe_totals,
    factor_for_cubas, factor_for_target_weight,
};
use crate::forms::recipes::SaveRecipeForm;
use crate::repository::{RecipeReader, RecipeWriter};
use crate::services::{ServiceError, ServiceResult};

/// Scaling requested on the recipe cost page. Values are typed by users and
/// may use a comma decimal separator.
#[derive(Debug, Default, Deserialize)]
pub struct RecipeCostQuery {
    /// Desired yield in kilograms.
    pub target_weight: Option<String>,
    /// Desired number of cubas; takes precedence over `target_weight`.
    pub cubas: Option<String>,
}

/// Cost breakdown of one ingredient line after scaling.
#[derive(Debug, Serialize)]
pub struct IngredientCost {
    pub step: String,
    pub name: String,
    pub initial_weight: f64,
    pub final_weight: f64,
    pub yield_percent: f64,
    pub cost: f64,
}

/// Data required to render the recipe cost page.
#[derive(Debug, Serialize)]
pub struct RecipeCostData {
    /// Recipe with every quantity scaled by `factor`.
    pub recipe: Recipe,
    pub factor: f64,
    pub totals: RecipeTotals,
    pub lines: Vec<IngredientCost>,
    pub total_cost_label: String,
    pub cost_per_kg_label: String,
}

fn positive(value: Option<&str>) -> Option<f64> {
    value
        .map(|raw| parse_quantity(raw, 0.0))
        .filter(|value| *value > 0.0)
}

/// Loads a recipe and scales it to the requested yield.
pub fn load_recipe_cost<R>(
    repo: &R,
    user: &AuthenticatedUser,
    recipe_id: i32,
    query: RecipeCostQuery,
) -> ServiceResult<RecipeCostData>
where
    R: RecipeReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let recipe = repo
        .get_recipe_by_id(recipe_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let cubas = positive(query.cubas.as_deref());
    let target_weight = positive(query.target_weight.as_deref());

    let factor = match (cubas, recipe.cuba_weight, target_weight) {
        (Some(cubas), Some(cuba_weight), _) => {
            factor_for_cubas(cubas, cuba_weight, recipe.yield_weight)
        }
        (_, _, Some(target)) => factor_for_target_weight(target, recipe.yield_weight),
        _ => 1.0,
    };

    let scaled = adjust_recipe_quantities(&recipe, factor).into_owned();
    let totals = calculate_recipe_totals(&scaled.steps, 1.0);

    let lines = scaled
        .steps
        .iter()
        .flat_map(|step| {
            step.ingredients.iter().map(move |line| IngredientCost {
                step: step.title.clone(),
                name: line.name.clone(),
                initial_weight: line.initial_weight(),
                final_weight: line.final_weight(),
                yield_percent: line.yield_percent(),
                cost: line.unit_price * line.quantity,
            })
        })
        .collect();

    Ok(RecipeCostData {
        recipe: scaled,
        factor,
        total_cost_label: format_currency(totals.total_cost),
        cost_per_kg_label: format_currency(totals.cost_per_kg_rendimento),
        totals,
        lines,
    })
}

/// Creates a recipe, or replaces it when the form carries an id.
pub fn save_recipe<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveRecipeForm,
) -> ServiceResult<Recipe>
where
    R: RecipeReader + RecipeWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let recipe_id = form.id;

    let new_recipe = form
        .into_new_recipe(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    match recipe_id {
        Some(recipe_id) => {
            repo.get_recipe_by_id(recipe_id, user.hub_id)
                .map_err(ServiceError::from)?
                .ok_or(ServiceError::NotFound)?;

            repo.update_recipe(recipe_id, user.hub_id, &UpdateRecipe::from(new_recipe))
                .map_err(ServiceError::from)
        }
        None => repo
            .create_recipe(&new_recipe)
            .map_err(ServiceError::from),
    }
}
