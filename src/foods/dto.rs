use serde::{Deserialize, Serialize};

use super::model::{BaseUnit, FoodCategory, FoodUnit};
use crate::nutrition::NutritionalValues;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFood {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: FoodCategory,
    pub nutrition: NutritionalValues,
    #[serde(default)]
    pub base_unit: BaseUnit,
    /// Defaults to just the base unit.
    #[serde(default)]
    pub available_units: Vec<FoodUnit>,
    #[serde(default)]
    pub default_unit: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<FoodCategory>,
    pub nutrition: Option<NutritionalValues>,
    pub base_unit: Option<BaseUnit>,
    pub available_units: Option<Vec<FoodUnit>>,
    pub default_unit: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FoodFilter {
    pub category: Option<FoodCategory>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NutritionQuery {
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionResponse {
    pub quantity: f64,
    pub unit: String,
    pub nutrition: NutritionalValues,
}
