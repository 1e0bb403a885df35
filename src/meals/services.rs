use time::Date;
use tracing::info;
use uuid::Uuid;

use super::{
    dto::{CalorieProgress, ItemInput, NewMeal},
    model::{calorie_progress, DailyMeals, Meal, MealItem},
    repo,
};
use crate::{
    calendar::date_key, dishes, error::AppError, foods, profile, store::DocumentStore,
};

/// The day's meals; a day nobody logged anything on is empty, not missing.
pub async fn load_day(
    store: &dyn DocumentStore,
    user_id: Uuid,
    date: Date,
) -> Result<DailyMeals, AppError> {
    let key = date_key(date);
    let mut day = repo::find(store, user_id, &key)
        .await?
        .unwrap_or_else(|| DailyMeals::empty(user_id, key));
    day.recompute();
    Ok(day)
}

async fn build_meal(
    store: &dyn DocumentStore,
    user_id: Uuid,
    input: NewMeal,
) -> Result<Meal, AppError> {
    if input.items.is_empty() {
        return Err(AppError::invalid("a meal needs at least one item"));
    }
    let mut items = Vec::with_capacity(input.items.len());
    for item in &input.items {
        let built = match item {
            ItemInput::Food {
                food_id,
                quantity,
                unit,
            } => {
                let food = foods::services::get_food(store, user_id, *food_id).await?;
                MealItem::from_food(&food, *quantity, unit)?
            }
            ItemInput::Dish { dish_id, servings } => {
                let dish = dishes::services::get_dish(store, user_id, *dish_id).await?;
                MealItem::from_dish(&dish, *servings)?
            }
        };
        items.push(built);
    }
    Meal::new(input.meal_type, input.name, items)
}

pub async fn add_meal(
    store: &dyn DocumentStore,
    user_id: Uuid,
    date: Date,
    input: NewMeal,
) -> Result<DailyMeals, AppError> {
    let meal = build_meal(store, user_id, input).await?;
    let meal_id = meal.id;

    let mut day = load_day(store, user_id, date).await?;
    day.push(meal);
    repo::save(store, &day).await?;

    info!(%user_id, %meal_id, date = %day.date, calories = day.daily_totals.calories, "meal added");
    Ok(day)
}

pub async fn remove_meal(
    store: &dyn DocumentStore,
    user_id: Uuid,
    date: Date,
    meal_id: Uuid,
) -> Result<DailyMeals, AppError> {
    let mut day = load_day(store, user_id, date).await?;
    if day.remove(meal_id).is_none() {
        return Err(AppError::NotFound(format!("meal {meal_id}")));
    }
    repo::save(store, &day).await?;

    info!(%user_id, %meal_id, date = %day.date, "meal removed");
    Ok(day)
}

/// Edit is delete plus recreate; the replacement gets a fresh id.
/// Nothing is written unless the new meal builds cleanly.
pub async fn replace_meal(
    store: &dyn DocumentStore,
    user_id: Uuid,
    date: Date,
    meal_id: Uuid,
    input: NewMeal,
) -> Result<DailyMeals, AppError> {
    let mut day = load_day(store, user_id, date).await?;
    if !day.meals.iter().any(|m| m.id == meal_id) {
        return Err(AppError::NotFound(format!("meal {meal_id}")));
    }
    let meal = build_meal(store, user_id, input).await?;
    let new_id = meal.id;

    day.remove(meal_id);
    day.push(meal);
    repo::save(store, &day).await?;

    info!(%user_id, old = %meal_id, new = %new_id, date = %day.date, "meal replaced");
    Ok(day)
}

pub async fn progress(
    store: &dyn DocumentStore,
    user_id: Uuid,
    date: Date,
) -> Result<CalorieProgress, AppError> {
    let day = load_day(store, user_id, date).await?;
    let goals = profile::services::effective_goals(store, user_id).await?;
    Ok(CalorieProgress {
        percent: calorie_progress(day.daily_totals.calories, goals.calories),
        consumed: day.daily_totals.calories,
        goal: goals.calories,
        date: day.date,
    })
}
