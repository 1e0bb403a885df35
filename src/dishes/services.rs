use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::{
    dto::{DishFilter, DishUpdate, IngredientInput, NewDish},
    model::{Dish, DishIngredient},
    repo,
};
use crate::{
    error::AppError,
    foods,
    nutrition::{NutritionalValues, Servings},
    store::DocumentStore,
};

fn required_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid("dish name is required"));
    }
    Ok(name.to_string())
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Resolves every ingredient against foods the owner can read.
async fn build_ingredients(
    store: &dyn DocumentStore,
    owner: Uuid,
    inputs: &[IngredientInput],
) -> Result<Vec<DishIngredient>, AppError> {
    if inputs.is_empty() {
        return Err(AppError::invalid("a dish needs at least one ingredient"));
    }
    let mut ingredients = Vec::with_capacity(inputs.len());
    for input in inputs {
        let food = foods::services::get_food(store, owner, input.food_id).await?;
        ingredients.push(DishIngredient::new(&food, input.quantity, &input.unit)?);
    }
    Ok(ingredients)
}

pub async fn get_dish(store: &dyn DocumentStore, viewer: Uuid, id: Uuid) -> Result<Dish, AppError> {
    match repo::find(store, id).await? {
        Some(dish) if dish.is_public || dish.user_id == viewer => Ok(dish),
        _ => Err(AppError::NotFound(format!("dish {id}"))),
    }
}

async fn get_owned(store: &dyn DocumentStore, owner: Uuid, id: Uuid) -> Result<Dish, AppError> {
    let dish = get_dish(store, owner, id).await?;
    if dish.user_id != owner {
        return Err(AppError::Forbidden(format!("dish {id}")));
    }
    Ok(dish)
}

pub async fn list_dishes(
    store: &dyn DocumentStore,
    viewer: Uuid,
    filter: &DishFilter,
) -> Result<Vec<Dish>, AppError> {
    let term = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let mut dishes: Vec<Dish> = repo::list_visible(store, viewer)
        .await?
        .into_iter()
        .filter(|d| !filter.mine || d.user_id == viewer)
        .filter(|d| filter.category.map_or(true, |c| d.category == c))
        .filter(|d| term.map_or(true, |t| d.matches(t)))
        .collect();
    dishes.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(dishes)
}

pub async fn create_dish(
    store: &dyn DocumentStore,
    owner: Uuid,
    input: NewDish,
) -> Result<Dish, AppError> {
    let name = required_name(&input.name)?;
    let servings = Servings::new(input.servings)?;
    let ingredients = build_ingredients(store, owner, &input.ingredients).await?;

    let now = OffsetDateTime::now_utc();
    let mut dish = Dish {
        id: Uuid::new_v4(),
        name,
        description: clean_description(input.description),
        category: input.category,
        ingredients,
        servings,
        total_nutrition: NutritionalValues::default(),
        nutrition_per_serving: NutritionalValues::default(),
        user_id: owner,
        is_public: input.is_public,
        created_at: now,
        updated_at: now,
    };
    dish.recompute();

    repo::save(store, &dish).await?;
    info!(dish_id = %dish.id, %owner, calories = dish.total_nutrition.calories, "dish created");
    Ok(dish)
}

pub async fn update_dish(
    store: &dyn DocumentStore,
    owner: Uuid,
    id: Uuid,
    update: DishUpdate,
) -> Result<Dish, AppError> {
    let mut dish = get_owned(store, owner, id).await?;

    if let Some(name) = update.name {
        dish.name = required_name(&name)?;
    }
    if let Some(servings) = update.servings {
        dish.servings = Servings::new(servings)?;
    }
    if let Some(inputs) = update.ingredients {
        dish.ingredients = build_ingredients(store, owner, &inputs).await?;
    }
    if update.description.is_some() {
        dish.description = clean_description(update.description);
    }
    if let Some(category) = update.category {
        dish.category = category;
    }
    if let Some(is_public) = update.is_public {
        dish.is_public = is_public;
    }
    dish.recompute();
    dish.updated_at = OffsetDateTime::now_utc();

    repo::save(store, &dish).await?;
    info!(dish_id = %dish.id, %owner, "dish updated");
    Ok(dish)
}

pub async fn delete_dish(store: &dyn DocumentStore, owner: Uuid, id: Uuid) -> Result<(), AppError> {
    get_owned(store, owner, id).await?;
    repo::remove(store, id).await?;
    info!(dish_id = %id, %owner, "dish deleted");
    Ok(())
}
