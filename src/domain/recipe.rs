use std::borrow::Cow;

use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Ingredient used by a preparation step, with the weights recorded at each
/// processing stage. Weights are in kilograms.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct IngredientLine {
    /// Weak reference to the ingredient catalog.
    #[serde(default)]
    pub ingredient_id: Option<i32>,
    /// Display name copied from the catalog when the line was added.
    #[serde(default)]
    pub name: String,
    /// Purchased quantity.
    #[serde(default)]
    pub quantity: f64,
    /// Price per purchased unit.
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub weight_frozen: Option<f64>,
    #[serde(default)]
    pub weight_raw: Option<f64>,
    #[serde(default)]
    pub weight_thawed: Option<f64>,
    #[serde(default)]
    pub weight_clean: Option<f64>,
    #[serde(default)]
    pub weight_cooked: Option<f64>,
    #[serde(default)]
    pub weight_portioned: Option<f64>,
}

impl IngredientLine {
    /// Weight entering the preparation: frozen, then raw, then the quantity.
    pub fn initial_weight(&self) -> f64 {
        self.weight_frozen
            .or(self.weight_raw)
            .unwrap_or(self.quantity)
    }

    /// Weight leaving the preparation: portioned, cooked, clean, thawed, then
    /// the quantity.
    pub fn final_weight(&self) -> f64 {
        self.weight_portioned
            .or(self.weight_cooked)
            .or(self.weight_clean)
            .or(self.weight_thawed)
            .unwrap_or(self.quantity)
    }

    pub fn yield_percent(&self) -> f64 {
        yield_percent(self.initial_weight(), self.final_weight())
    }

    fn scale(&mut self, factor: f64) {
        let scale = |value: &mut Option<f64>| {
            if let Some(weight) = value.as_mut() {
                *weight *= factor;
            }
        };

        self.quantity *= factor;
        scale(&mut self.weight_frozen);
        scale(&mut self.weight_raw);
        scale(&mut self.weight_thawed);
        scale(&mut self.weight_clean);
        scale(&mut self.weight_cooked);
        scale(&mut self.weight_portioned);
    }
}

/// Reference to another recipe assembled into this one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubComponentRef {
    pub recipe_id: i32,
    #[serde(default)]
    pub name: String,
    /// Weight of the sub-recipe used in the assembly, in kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
}

/// One ordered step of a recipe.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PreparationStep {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub sub_components: Vec<SubComponentRef>,
}

/// Domain representation of a recipe belonging to a hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub category: Option<String>,
    /// Ordered preparation steps.
    pub steps: Vec<PreparationStep>,
    /// Total yield (rendimento) in kilograms.
    pub yield_weight: f64,
    /// Weight of one cuba of the finished recipe, in kilograms.
    pub cuba_weight: Option<f64>,
    pub cost_per_gram_raw: f64,
    pub cost_per_gram_yield: f64,
    /// Selling price per ordered unit, used to price portal orders.
    pub sale_price: Option<f64>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Recipe {
    pub fn totals(&self) -> RecipeTotals {
        calculate_recipe_totals(&self.steps, 1.0)
    }
}

/// Aggregated weights and cost of a recipe.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct RecipeTotals {
    pub total_bruto_weight: f64,
    pub total_rendimento_weight: f64,
    pub total_cost: f64,
    pub cost_per_kg_rendimento: f64,
}

/// Sum raw weight, yield weight and cost across every ingredient line, each
/// multiplied by `adjustment_factor`.
pub fn calculate_recipe_totals(steps: &[PreparationStep], adjustment_factor: f64) -> RecipeTotals {
    let mut totals = RecipeTotals::default();

    for line in steps.iter().flat_map(|step| step.ingredients.iter()) {
        totals.total_bruto_weight += line.initial_weight() * adjustment_factor;
        totals.total_rendimento_weight += line.final_weight() * adjustment_factor;
        totals.total_cost += line.unit_price * line.quantity * adjustment_factor;
    }

    totals.cost_per_kg_rendimento = if totals.total_rendimento_weight != 0.0 {
        totals.total_cost / totals.total_rendimento_weight
    } else {
        0.0
    };

    totals
}

/// Share of the initial weight that survives preparation, in percent. An
/// initial weight of zero yields 100.
pub fn yield_percent(initial_weight: f64, final_weight: f64) -> f64 {
    if initial_weight == 0.0 {
        return 100.0;
    }
    final_weight / initial_weight * 100.0
}

/// Scale every quantity and weight of the recipe by `factor`.
///
/// A factor of exactly 1 borrows the input unchanged.
pub fn adjust_recipe_quantities(recipe: &Recipe, factor: f64) -> Cow<'_, Recipe> {
    if factor == 1.0 {
        return Cow::Borrowed(recipe);
    }

    let mut scaled = recipe.clone();
    for step in &mut scaled.steps {
        for line in &mut step.ingredients {
            line.scale(factor);
        }
        for component in &mut step.sub_components {
            if let Some(weight) = component.weight.as_mut() {
                *weight *= factor;
            }
        }
    }
    scaled.yield_weight *= factor;

    Cow::Owned(scaled)
}

/// Factor that scales a recipe yielding `current_yield` kg to `target_weight` kg.
pub fn factor_for_target_weight(target_weight: f64, current_yield: f64) -> f64 {
    if current_yield <= 0.0 || !target_weight.is_finite() || target_weight <= 0.0 {
        return 1.0;
    }
    target_weight / current_yield
}

/// Factor that scales a recipe to fill `cubas` trays of `cuba_weight` kg each.
pub fn factor_for_cubas(cubas: f64, cuba_weight: f64, current_yield: f64) -> f64 {
    factor_for_target_weight(cubas * cuba_weight, current_yield)
}

/// Values derived from the preparation steps and stored with the recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeMetrics {
    pub yield_weight: f64,
    pub cost_per_gram_raw: f64,
    pub cost_per_gram_yield: f64,
}

impl RecipeMetrics {
    pub fn from_steps(steps: &[PreparationStep]) -> Self {
        let totals = calculate_recipe_totals(steps, 1.0);
        let per_gram = |weight_kg: f64| {
            if weight_kg > 0.0 {
                totals.total_cost / (weight_kg * 1000.0)
            } else {
                0.0
            }
        };

        Self {
            yield_weight: totals.total_rendimento_weight,
            cost_per_gram_raw: per_gram(totals.total_bruto_weight),
            cost_per_gram_yield: per_gram(totals.total_rendimento_weight),
        }
    }
}

/// Payload required to insert a new recipe for a hub.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub hub_id: i32,
    pub name: String,
    pub category: Option<String>,
    pub steps: Vec<PreparationStep>,
    pub cuba_weight: Option<f64>,
    pub sale_price: Option<f64>,
    pub is_active: bool,
    pub metrics: RecipeMetrics,
    pub updated_at: NaiveDateTime,
}

impl NewRecipe {
    pub fn new(hub_id: i32, name: impl Into<String>, steps: Vec<PreparationStep>) -> Self {
        Self {
            hub_id,
            name: name.into(),
            category: None,
            metrics: RecipeMetrics::from_steps(&steps),
            steps,
            cuba_weight: None,
            sale_price: None,
            is_active: true,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_cuba_weight(mut self, cuba_weight: f64) -> Self {
        self.cuba_weight = Some(cuba_weight);
        self
    }

    pub fn with_sale_price(mut self, sale_price: f64) -> Self {
        self.sale_price = Some(sale_price);
        self
    }
}

/// Full replacement of a recipe's editable fields. Metrics are recomputed
/// from the new steps.
#[derive(Debug, Clone)]
pub struct UpdateRecipe {
    pub name: String,
    pub category: Option<String>,
    pub steps: Vec<PreparationStep>,
    pub cuba_weight: Option<f64>,
    pub sale_price: Option<f64>,
    pub is_active: bool,
    pub metrics: RecipeMetrics,
    pub updated_at: NaiveDateTime,
}

impl From<NewRecipe> for UpdateRecipe {
    fn from(value: NewRecipe) -> Self {
        Self {
            name: value.name,
            category: value.category,
            steps: value.steps,
            cuba_weight: value.cuba_weight,
            sale_price: value.sale_price,
            is_active: value.is_active,
            metrics: value.metrics,
            updated_at: value.updated_at,
        }
    }
}

/// Query definition used to list recipes for a hub.
#[derive(Debug, Clone)]
pub struct RecipeListQuery {
    pub hub_id: i32,
    pub include_inactive: bool,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl RecipeListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            include_inactive: false,
            search: None,
            pagination: None,
        }
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
