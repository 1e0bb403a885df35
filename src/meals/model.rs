use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    dishes::Dish,
    error::AppError,
    foods::Food,
    nutrition::{round1, validate_quantity, NutritionalValues},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
    Dinner,
    EveningSnack,
}

impl MealType {
    pub fn display_name(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::MorningSnack => "Morning snack",
            MealType::Lunch => "Lunch",
            MealType::AfternoonSnack => "Afternoon snack",
            MealType::Dinner => "Dinner",
            MealType::EveningSnack => "Evening snack",
        }
    }
}

/// What a logged item was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemSource {
    Food {
        #[serde(rename = "foodId")]
        food_id: Uuid,
    },
    Dish {
        #[serde(rename = "dishId")]
        dish_id: Uuid,
    },
}

pub const SERVING_UNIT: &str = "serving";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealItem {
    pub id: Uuid,
    #[serde(flatten)]
    pub source: ItemSource,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub nutrition: NutritionalValues,
}

impl MealItem {
    pub fn from_food(food: &Food, quantity: f64, unit: &str) -> Result<Self, AppError> {
        let quantity = validate_quantity(quantity)?;
        let unit = unit.trim();
        let nutrition = food.nutrition_for(quantity, unit)?;
        Ok(Self {
            id: Uuid::new_v4(),
            source: ItemSource::Food { food_id: food.id },
            name: food.name.clone(),
            quantity: round1(quantity),
            unit: unit.to_string(),
            nutrition,
        })
    }

    /// `portions` servings of the dish's per-serving nutrition.
    pub fn from_dish(dish: &Dish, portions: f64) -> Result<Self, AppError> {
        let portions = validate_quantity(portions)?;
        Ok(Self {
            id: Uuid::new_v4(),
            source: ItemSource::Dish { dish_id: dish.id },
            name: dish.name.clone(),
            quantity: round1(portions),
            unit: SERVING_UNIT.to_string(),
            nutrition: dish.nutrition_per_serving.scaled(portions),
        })
    }
}

fn unix_epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MealItem>,
    #[serde(default)]
    pub totals: NutritionalValues,
    #[serde(default = "unix_epoch", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Meal {
    pub fn new(
        meal_type: MealType,
        name: Option<String>,
        items: Vec<MealItem>,
    ) -> Result<Self, AppError> {
        if items.is_empty() {
            return Err(AppError::invalid("a meal needs at least one item"));
        }
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| meal_type.display_name().to_string());
        let totals = NutritionalValues::sum(items.iter().map(|i| &i.nutrition));
        Ok(Self {
            id: Uuid::new_v4(),
            meal_type,
            name,
            items,
            totals,
            created_at: OffsetDateTime::now_utc(),
        })
    }
}

/// All meals a user logged on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMeals {
    pub date: String,
    pub user_id: Uuid,
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub daily_totals: NutritionalValues,
}

impl DailyMeals {
    pub fn empty(user_id: Uuid, date: String) -> Self {
        Self {
            date,
            user_id,
            meals: Vec::new(),
            daily_totals: NutritionalValues::default(),
        }
    }

    /// Rebuilds `daily_totals` from the current meal list.
    pub fn recompute(&mut self) {
        self.daily_totals = NutritionalValues::sum(self.meals.iter().map(|m| &m.totals));
    }

    pub fn push(&mut self, meal: Meal) {
        self.meals.push(meal);
        self.recompute();
    }

    pub fn remove(&mut self, meal_id: Uuid) -> Option<Meal> {
        let idx = self.meals.iter().position(|m| m.id == meal_id)?;
        let meal = self.meals.remove(idx);
        self.recompute();
        Some(meal)
    }
}

/// Share of the calorie goal consumed, capped at 100.
pub fn calorie_progress(consumed: f64, goal: f64) -> f64 {
    if !(goal.is_finite() && goal > 0.0) {
        return 0.0;
    }
    let pct = consumed / goal * 100.0;
    if pct.is_finite() {
        pct.min(100.0)
    } else {
        0.0
    }
}
