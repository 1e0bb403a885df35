use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::{
    model::{BaseUnit, Food, FoodCategory, FoodUnit},
    repo,
};
use crate::{error::AppError, nutrition::NutritionalValues, store::DocumentStore};

fn grams() -> Vec<FoodUnit> {
    vec![FoodUnit::new("gram", "g", 1.0)]
}

fn cups() -> Vec<FoodUnit> {
    vec![
        FoodUnit::new("glass (200ml)", "glass", 200.0),
        FoodUnit::new("milliliter", "ml", 1.0),
    ]
}

fn per_unit(name: &str, grams_each: f64) -> Vec<FoodUnit> {
    vec![
        FoodUnit::new(name, "unit", grams_each),
        FoodUnit::new("gram", "g", 1.0),
    ]
}

#[allow(clippy::too_many_arguments)]
fn n(
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    sodium: f64,
    sugar: f64,
    water: Option<f64>,
) -> NutritionalValues {
    NutritionalValues {
        calories,
        protein,
        carbs,
        fat,
        fiber,
        sodium,
        sugar,
        water,
    }
}

fn catalog_food(
    name: &str,
    category: FoodCategory,
    nutrition: NutritionalValues,
    base_unit: BaseUnit,
    available_units: Vec<FoodUnit>,
    now: OffsetDateTime,
) -> Food {
    Food {
        id: Uuid::new_v4(),
        name: name.to_string(),
        brand: None,
        category,
        nutrition,
        base_unit,
        available_units,
        default_unit: base_unit.abbreviation().to_string(),
        is_custom: false,
        is_public: true,
        user_id: None,
        created_at: now,
        updated_at: now,
    }
}

/// The shared catalog every account can read.
pub fn default_catalog() -> Vec<Food> {
    use BaseUnit::{Ml, G};
    use FoodCategory::*;

    let now = OffsetDateTime::now_utc();
    vec![
        catalog_food("Cooked white rice", Carbs, n(130.0, 2.7, 28.0, 0.3, 0.4, 1.0, 0.1, None), G, grams(), now),
        catalog_food("Cooked black beans", Protein, n(132.0, 8.9, 23.0, 0.5, 8.7, 2.0, 0.3, None), G, grams(), now),
        catalog_food("Grilled chicken breast", Protein, n(165.0, 31.0, 0.0, 3.6, 0.0, 74.0, 0.0, None), G, grams(), now),
        catalog_food("Boiled egg", Protein, n(155.0, 13.0, 1.1, 11.0, 0.0, 124.0, 1.1, None), G, per_unit("medium egg", 50.0), now),
        catalog_food("Banana", Fruits, n(89.0, 1.1, 23.0, 0.3, 2.6, 1.0, 12.0, None), G, per_unit("medium fruit", 120.0), now),
        catalog_food("Rolled oats", Grains, n(389.0, 17.0, 66.0, 7.0, 10.0, 2.0, 1.0, None), G, grams(), now),
        catalog_food("Whole milk", Dairy, n(61.0, 3.2, 4.5, 3.2, 0.0, 44.0, 4.5, Some(87.0)), Ml, cups(), now),
        catalog_food(
            "French bread",
            Grains,
            n(300.0, 9.0, 58.0, 3.1, 2.3, 643.0, 5.0, None),
            G,
            vec![
                FoodUnit::new("roll", "unit", 50.0),
                FoodUnit::new("slice", "slice", 25.0),
                FoodUnit::new("gram", "g", 1.0),
            ],
            now,
        ),
        catalog_food("Apple", Fruits, n(52.0, 0.3, 14.0, 0.2, 2.4, 1.0, 10.0, Some(85.0)), G, per_unit("medium fruit", 120.0), now),
        catalog_food("Cooked sweet potato", Carbs, n(86.0, 1.6, 20.0, 0.1, 3.0, 5.0, 4.2, None), G, grams(), now),
        catalog_food("Water", Beverages, n(0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, Some(100.0)), Ml, cups(), now),
        catalog_food("Fresh orange juice", Beverages, n(45.0, 0.7, 10.4, 0.2, 0.2, 1.0, 8.1, Some(88.0)), Ml, cups(), now),
        catalog_food("Black coffee", Beverages, n(2.0, 0.3, 0.0, 0.0, 0.0, 5.0, 0.0, Some(99.0)), Ml, cups(), now),
        catalog_food("Cooked broccoli", Vegetables, n(35.0, 2.4, 7.0, 0.4, 3.3, 41.0, 1.5, Some(89.0)), G, grams(), now),
        catalog_food("Lean beef", Protein, n(250.0, 26.0, 0.0, 15.0, 0.0, 72.0, 0.0, None), G, grams(), now),
        catalog_food(
            "Olive oil",
            Fats,
            n(884.0, 0.0, 0.0, 100.0, 0.0, 2.0, 0.0, None),
            Ml,
            vec![
                FoodUnit::new("tablespoon", "tbsp", 15.0),
                FoodUnit::new("teaspoon", "tsp", 5.0),
                FoodUnit::new("milliliter", "ml", 1.0),
            ],
            now,
        ),
        catalog_food("Tomato", Vegetables, n(18.0, 0.9, 3.9, 0.2, 1.2, 5.0, 2.6, Some(95.0)), G, per_unit("medium tomato", 100.0), now),
        catalog_food(
            "Mozzarella",
            Dairy,
            n(280.0, 25.0, 2.2, 19.0, 0.0, 627.0, 1.0, None),
            G,
            vec![
                FoodUnit::new("slice", "slice", 20.0),
                FoodUnit::new("gram", "g", 1.0),
            ],
            now,
        ),
        catalog_food(
            "Plain yogurt",
            Dairy,
            n(61.0, 3.5, 4.7, 3.3, 0.0, 46.0, 4.7, Some(88.0)),
            G,
            vec![
                FoodUnit::new("pot (170g)", "pot", 170.0),
                FoodUnit::new("gram", "g", 1.0),
            ],
            now,
        ),
        catalog_food("Brazil nut", Fats, n(656.0, 14.0, 12.0, 67.0, 7.5, 3.0, 2.3, None), G, per_unit("nut", 5.0), now),
    ]
}

/// Inserts the catalog unless some catalog entry is already stored.
pub async fn seed_default_catalog(store: &dyn DocumentStore) -> Result<usize, AppError> {
    let existing = repo::list_visible(store, Uuid::nil()).await?;
    if existing.iter().any(|f| !f.is_custom) {
        info!("food catalog already present");
        return Ok(0);
    }

    let catalog = default_catalog();
    for food in &catalog {
        repo::save(store, food).await?;
    }
    info!(count = catalog.len(), "food catalog seeded");
    Ok(catalog.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    #[test]
    fn catalog_entries_satisfy_invariants() {
        for food in default_catalog() {
            food.validate()
                .unwrap_or_else(|e| panic!("{}: {e}", food.name));
            assert!(food.is_public && !food.is_custom && food.user_id.is_none());
        }
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = MemoryDocumentStore::new();
        let first = seed_default_catalog(&store).await.unwrap();
        assert_eq!(first, default_catalog().len());
        assert_eq!(seed_default_catalog(&store).await.unwrap(), 0);

        let visible = repo::list_visible(&store, Uuid::new_v4()).await.unwrap();
        assert_eq!(visible.len(), first);
    }
}
