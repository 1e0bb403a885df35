use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::{
    dto::{FoodFilter, FoodUpdate, NewFood},
    model::Food,
    repo,
};
use crate::{error::AppError, store::DocumentStore};

fn readable_by(food: &Food, viewer: Uuid) -> bool {
    food.is_public || food.user_id == Some(viewer)
}

/// Foods are readable when public or owned; anything else looks absent.
pub async fn get_food(store: &dyn DocumentStore, viewer: Uuid, id: Uuid) -> Result<Food, AppError> {
    match repo::find(store, id).await? {
        Some(food) if readable_by(&food, viewer) => Ok(food),
        _ => Err(AppError::NotFound(format!("food {id}"))),
    }
}

async fn get_owned(store: &dyn DocumentStore, owner: Uuid, id: Uuid) -> Result<Food, AppError> {
    let food = get_food(store, owner, id).await?;
    if food.user_id != Some(owner) {
        return Err(AppError::Forbidden(format!("food {id}")));
    }
    Ok(food)
}

pub async fn list_foods(
    store: &dyn DocumentStore,
    viewer: Uuid,
    filter: &FoodFilter,
) -> Result<Vec<Food>, AppError> {
    let term = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let mut foods: Vec<Food> = repo::list_visible(store, viewer)
        .await?
        .into_iter()
        .filter(|f| filter.category.map_or(true, |c| f.category == c))
        .filter(|f| term.map_or(true, |t| f.matches(t)))
        .collect();
    foods.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(foods)
}

pub async fn create_food(
    store: &dyn DocumentStore,
    owner: Uuid,
    input: NewFood,
) -> Result<Food, AppError> {
    let now = OffsetDateTime::now_utc();
    let mut available_units = input.available_units;
    if available_units.is_empty() {
        available_units.push(input.base_unit.unit());
    }
    let default_unit = input
        .default_unit
        .unwrap_or_else(|| input.base_unit.abbreviation().to_string());

    let food = Food {
        id: Uuid::new_v4(),
        name: input.name.trim().to_string(),
        brand: input.brand.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()),
        category: input.category,
        nutrition: input.nutrition,
        base_unit: input.base_unit,
        available_units,
        default_unit,
        is_custom: true,
        is_public: input.is_public,
        user_id: Some(owner),
        created_at: now,
        updated_at: now,
    };
    food.validate()?;

    repo::save(store, &food).await?;
    info!(food_id = %food.id, %owner, "food created");
    Ok(food)
}

pub async fn update_food(
    store: &dyn DocumentStore,
    owner: Uuid,
    id: Uuid,
    update: FoodUpdate,
) -> Result<Food, AppError> {
    let mut food = get_owned(store, owner, id).await?;

    if let Some(name) = update.name {
        food.name = name.trim().to_string();
    }
    if let Some(brand) = update.brand {
        let brand = brand.trim().to_string();
        food.brand = (!brand.is_empty()).then_some(brand);
    }
    if let Some(category) = update.category {
        food.category = category;
    }
    if let Some(nutrition) = update.nutrition {
        food.nutrition = nutrition;
    }
    if let Some(base_unit) = update.base_unit {
        food.base_unit = base_unit;
    }
    if let Some(units) = update.available_units {
        food.available_units = units;
    }
    if let Some(default_unit) = update.default_unit {
        food.default_unit = default_unit;
    }
    if let Some(is_public) = update.is_public {
        food.is_public = is_public;
    }
    food.validate()?;
    food.updated_at = OffsetDateTime::now_utc();

    repo::save(store, &food).await?;
    info!(food_id = %food.id, %owner, "food updated");
    Ok(food)
}

pub async fn delete_food(store: &dyn DocumentStore, owner: Uuid, id: Uuid) -> Result<(), AppError> {
    get_owned(store, owner, id).await?;
    repo::remove(store, id).await?;
    info!(food_id = %id, %owner, "food deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foods::model::{BaseUnit, FoodCategory, FoodUnit};
    use crate::nutrition::NutritionalValues;
    use crate::store::MemoryDocumentStore;

    fn new_food(name: &str, category: FoodCategory, is_public: bool) -> NewFood {
        NewFood {
            name: name.into(),
            brand: None,
            category,
            nutrition: NutritionalValues {
                calories: 100.0,
                ..Default::default()
            },
            base_unit: BaseUnit::G,
            available_units: vec![],
            default_unit: None,
            is_public,
        }
    }

    #[tokio::test]
    async fn create_defaults_units_and_marks_custom() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        let food = create_food(&store, me, new_food(" Tofu ", FoodCategory::Protein, false))
            .await
            .unwrap();
        assert_eq!(food.name, "Tofu");
        assert!(food.is_custom);
        assert_eq!(food.user_id, Some(me));
        assert_eq!(food.available_units, vec![FoodUnit::new("gram", "g", 1.0)]);
        assert_eq!(food.default_unit, "g");

        let loaded = get_food(&store, me, food.id).await.unwrap();
        assert_eq!(loaded.id, food.id);
    }

    #[tokio::test]
    async fn create_rejects_broken_unit_table() {
        let store = MemoryDocumentStore::new();
        let mut input = new_food("Juice", FoodCategory::Beverages, false);
        input.base_unit = BaseUnit::Ml;
        input.available_units = vec![FoodUnit::new("glass", "glass", 200.0)];
        let err = create_food(&store, Uuid::new_v4(), input).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn private_foods_are_hidden_and_public_ones_read_only() {
        let store = MemoryDocumentStore::new();
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let private = create_food(&store, owner, new_food("Secret", FoodCategory::Others, false))
            .await
            .unwrap();
        let shared = create_food(&store, owner, new_food("Shared", FoodCategory::Others, true))
            .await
            .unwrap();

        assert!(matches!(
            get_food(&store, other, private.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(get_food(&store, other, shared.id).await.unwrap().name, "Shared");

        let err = update_food(
            &store,
            other,
            shared.id,
            FoodUpdate {
                name: Some("Mine now".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(matches!(
            delete_food(&store, other, shared.id).await,
            Err(AppError::Forbidden(_))
        ));

        delete_food(&store, owner, shared.id).await.unwrap();
        assert!(get_food(&store, owner, shared.id).await.is_err());
    }

    #[tokio::test]
    async fn update_revalidates() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        let food = create_food(&store, me, new_food("Oats", FoodCategory::Grains, false))
            .await
            .unwrap();

        let updated = update_food(
            &store,
            me,
            food.id,
            FoodUpdate {
                available_units: Some(vec![
                    FoodUnit::new("gram", "g", 1.0),
                    FoodUnit::new("tablespoon", "tbsp", 15.0),
                ]),
                default_unit: Some("tbsp".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.default_unit, "tbsp");

        let err = update_food(
            &store,
            me,
            food.id,
            FoodUpdate {
                default_unit: Some("cup".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        // rejected update left the stored record alone
        assert_eq!(get_food(&store, me, food.id).await.unwrap().default_unit, "tbsp");
    }

    #[tokio::test]
    async fn list_filters_by_category_and_search() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        for (name, cat) in [
            ("Brown rice", FoodCategory::Carbs),
            ("Rice milk", FoodCategory::Beverages),
            ("Lentils", FoodCategory::Protein),
        ] {
            create_food(&store, me, new_food(name, cat, false)).await.unwrap();
        }

        let all = list_foods(&store, me, &FoodFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Brown rice", "Lentils", "Rice milk"]);

        let rice = list_foods(
            &store,
            me,
            &FoodFilter {
                search: Some("rice".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(rice.len(), 2);

        let carbs = list_foods(
            &store,
            me,
            &FoodFilter {
                category: Some(FoodCategory::Carbs),
                search: Some("rice".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(carbs.len(), 1);
        assert_eq!(carbs[0].name, "Brown rice");
    }
}
