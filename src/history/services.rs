use time::Date;
use tracing::{debug, warn};
use uuid::Uuid;

use super::model::{DayStats, History, HistoryStats};
use crate::{
    calendar::days_ending, error::AppError, meals, profile, store::DocumentStore,
};

pub const DEFAULT_DAYS: u32 = 30;
pub const MAX_DAYS: u32 = 365;

/// The `days` calendar days ending at `today`, oldest first.
pub async fn load_history(
    store: &dyn DocumentStore,
    user_id: Uuid,
    today: Date,
    days: u32,
) -> Result<History, AppError> {
    if !(1..=MAX_DAYS).contains(&days) {
        return Err(AppError::invalid(format!(
            "days must be between 1 and {MAX_DAYS}"
        )));
    }
    let goals = profile::services::effective_goals(store, user_id).await?;

    let mut stats = Vec::with_capacity(days as usize);
    for date in days_ending(today, days) {
        match meals::services::load_day(store, user_id, date).await {
            Ok(day) => stats.push(DayStats::new(&day, goals)),
            Err(e @ AppError::Decode { .. }) => {
                warn!(error = %e, %date, "skipping unreadable day");
            }
            Err(e) => return Err(e),
        }
    }

    let summary = HistoryStats::from_days(&stats);
    debug!(%user_id, days, streak = summary.streak, "history loaded");
    Ok(History {
        days: stats,
        stats: summary,
    })
}

pub async fn load_day_stats(
    store: &dyn DocumentStore,
    user_id: Uuid,
    date: Date,
) -> Result<DayStats, AppError> {
    let goals = profile::services::effective_goals(store, user_id).await?;
    let day = meals::services::load_day(store, user_id, date).await?;
    Ok(DayStats::new(&day, goals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::model::{DailyMeals, Meal, MealItem, MealType};
    use crate::foods::model::fixtures::rice;
    use crate::calendar::date_key;
    use crate::store::{daily_meals_key, encode, Collection, Document, MemoryDocumentStore};
    use time::macros::date;

    const TODAY: Date = date!(2024 - 03 - 10);

    async fn log_rice(store: &MemoryDocumentStore, user: Uuid, date: Date, grams: f64) {
        let mut day = DailyMeals::empty(user, date_key(date));
        let item = MealItem::from_food(&rice(), grams, "g").unwrap();
        day.push(Meal::new(MealType::Lunch, None, vec![item]).unwrap());
        let doc = Document {
            key: daily_meals_key(user, &day.date),
            owner_id: Some(user),
            is_public: false,
            body: encode(&day).unwrap(),
        };
        store.put(Collection::DailyMeals, doc).await.unwrap();
    }

    #[tokio::test]
    async fn range_is_validated() {
        let store = MemoryDocumentStore::new();
        for days in [0, MAX_DAYS + 1] {
            assert!(matches!(
                load_history(&store, Uuid::new_v4(), TODAY, days).await,
                Err(AppError::InvalidInput(_))
            ));
        }
    }

    #[tokio::test]
    async fn missing_days_are_zero_filled() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        log_rice(&store, me, date!(2024 - 03 - 08), 100.0).await;
        log_rice(&store, me, date!(2024 - 03 - 09), 200.0).await;
        log_rice(&store, me, TODAY, 100.0).await;

        let h = load_history(&store, me, TODAY, 7).await.unwrap();
        assert_eq!(h.days.len(), 7);
        assert_eq!(h.days[0].date, "2024-03-04");
        assert_eq!(h.days[6].date, "2024-03-10");
        assert_eq!(h.days[0].consumed.calories, 0.0);
        assert_eq!(h.stats.days_with_data, 3);
        assert_eq!(h.stats.streak, 3);
        // (130 + 260 + 130) / 3
        assert_eq!(h.stats.average_calories, 173.0);
    }

    #[tokio::test]
    async fn unreadable_days_are_skipped() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        log_rice(&store, me, TODAY, 100.0).await;
        let bad = Document {
            key: daily_meals_key(me, "2024-03-09"),
            owner_id: Some(me),
            is_public: false,
            body: serde_json::json!({ "meals": "nope" }),
        };
        store.put(Collection::DailyMeals, bad).await.unwrap();

        let h = load_history(&store, me, TODAY, 3).await.unwrap();
        assert_eq!(h.days.len(), 2);
        assert_eq!(h.stats.streak, 1);
    }

    #[tokio::test]
    async fn single_day_lookup() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        log_rice(&store, me, TODAY, 100.0).await;

        let s = load_day_stats(&store, me, TODAY).await.unwrap();
        assert_eq!(s.meals_count, 1);
        assert_eq!(s.percentages.calories, 6.5);

        let empty = load_day_stats(&store, me, date!(2024 - 01 - 01)).await.unwrap();
        assert_eq!(empty.meals_count, 0);
    }
}
