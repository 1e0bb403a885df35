use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    error::AppError,
    foods::Food,
    nutrition::{round1, validate_quantity, NutritionalValues, Servings},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DishCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
    Beverage,
    #[default]
    Other,
}

/// A food portion inside a dish, with the nutrition it contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishIngredient {
    pub food_id: Uuid,
    pub food_name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub nutrition: NutritionalValues,
}

impl DishIngredient {
    pub fn new(food: &Food, quantity: f64, unit: &str) -> Result<Self, AppError> {
        let quantity = validate_quantity(quantity)?;
        let unit = unit.trim();
        if unit.is_empty() {
            return Err(AppError::invalid("unit is required"));
        }
        let nutrition = food.nutrition_for(quantity, unit)?;
        Ok(Self {
            food_id: food.id,
            food_name: food.name.clone(),
            quantity: round1(quantity),
            unit: unit.to_string(),
            nutrition,
        })
    }
}

fn unix_epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: DishCategory,
    #[serde(default)]
    pub ingredients: Vec<DishIngredient>,
    #[serde(default)]
    pub servings: Servings,
    #[serde(default)]
    pub total_nutrition: NutritionalValues,
    #[serde(default)]
    pub nutrition_per_serving: NutritionalValues,
    pub user_id: Uuid,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default = "unix_epoch", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default = "unix_epoch", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Dish {
    /// Re-derives both nutrition blocks from the ingredient snapshots.
    pub fn recompute(&mut self) {
        self.total_nutrition = NutritionalValues::sum(self.ingredients.iter().map(|i| &i.nutrition));
        self.nutrition_per_serving = self.total_nutrition.per_serving(self.servings);
    }

    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}
