use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::quantity::QuantityValue;
use crate::domain::recipe::{IngredientLine, NewRecipe, PreparationStep, SubComponentRef};
use crate::forms::{optional_text, sanitize_inline_text, sanitize_multiline_text};

/// Maximum length allowed for a recipe name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

const INSTRUCTIONS_MAX_LEN_VALIDATOR: u64 = 8192;

/// Result type returned by the recipe form helpers.
pub type RecipeFormResult<T> = Result<T, RecipeFormError>;

/// Errors that can occur while processing the recipe editor payload.
#[derive(Debug, Error)]
pub enum RecipeFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("recipe name cannot be empty")]
    EmptyName,
    #[error("a recipe cannot use itself as a component")]
    SelfReference,
}

/// Read an optional weight, treating blank or unparsable input as absent.
fn optional_quantity(value: Option<&QuantityValue>) -> Option<f64> {
    value
        .map(|value| value.to_f64(f64::NAN))
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[derive(Debug, Deserialize)]
pub struct IngredientLineForm {
    #[serde(default)]
    pub ingredient_id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: QuantityValue,
    #[serde(default)]
    pub unit_price: QuantityValue,
    #[serde(default)]
    pub weight_frozen: Option<QuantityValue>,
    #[serde(default)]
    pub weight_raw: Option<QuantityValue>,
    #[serde(default)]
    pub weight_thawed: Option<QuantityValue>,
    #[serde(default)]
    pub weight_clean: Option<QuantityValue>,
    #[serde(default)]
    pub weight_cooked: Option<QuantityValue>,
    #[serde(default)]
    pub weight_portioned: Option<QuantityValue>,
}

impl From<IngredientLineForm> for IngredientLine {
    fn from(form: IngredientLineForm) -> Self {
        IngredientLine {
            ingredient_id: form.ingredient_id,
            name: sanitize_inline_text(&form.name),
            quantity: form.quantity.to_f64(0.0).max(0.0),
            unit_price: form.unit_price.to_f64(0.0).max(0.0),
            weight_frozen: optional_quantity(form.weight_frozen.as_ref()),
            weight_raw: optional_quantity(form.weight_raw.as_ref()),
            weight_thawed: optional_quantity(form.weight_thawed.as_ref()),
            weight_clean: optional_quantity(form.weight_clean.as_ref()),
            weight_cooked: optional_quantity(form.weight_cooked.as_ref()),
            weight_portioned: optional_quantity(form.weight_portioned.as_ref()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubComponentForm {
    pub recipe_id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weight: Option<QuantityValue>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PreparationStepForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = INSTRUCTIONS_MAX_LEN_VALIDATOR))]
    pub instructions: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLineForm>,
    #[serde(default)]
    pub sub_components: Vec<SubComponentForm>,
}

impl From<PreparationStepForm> for PreparationStep {
    fn from(form: PreparationStepForm) -> Self {
        PreparationStep {
            title: sanitize_inline_text(&form.title),
            instructions: form
                .instructions
                .as_deref()
                .map(sanitize_multiline_text)
                .filter(|value| !value.is_empty()),
            // Lines without a name or a quantity are the editor's blank rows.
            ingredients: form
                .ingredients
                .into_iter()
                .map(IngredientLine::from)
                .filter(|line| !line.name.is_empty() || line.quantity > 0.0)
                .collect(),
            sub_components: form
                .sub_components
                .into_iter()
                .map(|component| SubComponentRef {
                    recipe_id: component.recipe_id,
                    name: sanitize_inline_text(&component.name),
                    weight: optional_quantity(component.weight.as_ref()),
                })
                .collect(),
        }
    }
}

/// Payload posted by the recipe editor. A missing `id` creates a recipe.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveRecipeForm {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub steps: Vec<PreparationStepForm>,
    #[serde(default)]
    pub cuba_weight: Option<QuantityValue>,
    #[serde(default)]
    pub sale_price: Option<QuantityValue>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl SaveRecipeForm {
    /// Validates and sanitizes the payload into a domain `NewRecipe`, whose
    /// stored metrics are derived from the steps.
    pub fn into_new_recipe(self, hub_id: i32) -> RecipeFormResult<NewRecipe> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(RecipeFormError::EmptyName);
        }

        let steps: Vec<PreparationStep> =
            self.steps.into_iter().map(PreparationStep::from).collect();

        let references_itself = self.id.is_some_and(|id| {
            steps
                .iter()
                .flat_map(|step| step.sub_components.iter())
                .any(|component| component.recipe_id == id)
        });
        if references_itself {
            return Err(RecipeFormError::SelfReference);
        }

        let mut recipe = NewRecipe::new(hub_id, name, steps);
        recipe.is_active = self.is_active;
        if let Some(category) = optional_text(self.category.as_deref()) {
            recipe = recipe.with_category(category);
        }
        if let Some(cuba_weight) = optional_quantity(self.cuba_weight.as_ref()) {
            recipe = recipe.with_cuba_weight(cuba_weight);
        }
        if let Some(sale_price) = optional_quantity(self.sale_price.as_ref()) {
            recipe = recipe.with_sale_price(sale_price);
        }

        Ok(recipe)
    }
}
