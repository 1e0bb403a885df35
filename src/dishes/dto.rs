use serde::Deserialize;
use uuid::Uuid;

use super::model::DishCategory;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientInput {
    pub food_id: Uuid,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDish {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: DishCategory,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// Validated in the service so a bad count maps to `InvalidServings`.
    #[serde(default = "one")]
    pub servings: i64,
    #[serde(default)]
    pub is_public: bool,
}

fn one() -> i64 {
    1
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<DishCategory>,
    pub ingredients: Option<Vec<IngredientInput>>,
    pub servings: Option<i64>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DishFilter {
    pub category: Option<DishCategory>,
    pub search: Option<String>,
    /// Only dishes the caller owns.
    #[serde(default)]
    pub mine: bool,
}
