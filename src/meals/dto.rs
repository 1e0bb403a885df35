use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::MealType;

fn one() -> f64 {
    1.0
}

/// One line of a meal: a food in one of its units, or servings of a dish.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemInput {
    #[serde(rename_all = "camelCase")]
    Food {
        food_id: Uuid,
        quantity: f64,
        unit: String,
    },
    #[serde(rename_all = "camelCase")]
    Dish {
        dish_id: Uuid,
        #[serde(default = "one")]
        servings: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeal {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieProgress {
    pub date: String,
    pub consumed: f64,
    pub goal: f64,
    pub percent: f64,
}
