use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::{
    dto::ProfileUpdate,
    goals::{self, DailyGoals, GoalSummary},
    model::{CustomGoals, Profile},
    repo,
};
use crate::{error::AppError, store::DocumentStore};

fn check_metric(field: &str, value: Option<f64>) -> Result<(), AppError> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => {
            Err(AppError::invalid(format!("{field} must be greater than 0")))
        }
        _ => Ok(()),
    }
}

/// The stored profile, or a blank one for users who never saved theirs.
pub async fn load_profile(store: &dyn DocumentStore, user_id: Uuid) -> Result<Profile, AppError> {
    Ok(repo::find(store, user_id)
        .await?
        .unwrap_or_else(|| Profile::blank(user_id, None)))
}

pub async fn update_profile(
    store: &dyn DocumentStore,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<Profile, AppError> {
    check_metric("age", update.age)?;
    check_metric("weight", update.weight)?;
    check_metric("height", update.height)?;

    let mut profile = load_profile(store, user_id).await?;
    if let Some(name) = update.name {
        let name = name.trim().to_string();
        profile.name = (!name.is_empty()).then_some(name);
    }
    if update.age.is_some() {
        profile.age = update.age;
    }
    if update.weight.is_some() {
        profile.weight = update.weight;
    }
    if update.height.is_some() {
        profile.height = update.height;
    }
    if let Some(gender) = update.gender {
        profile.gender = gender;
    }
    if let Some(activity_level) = update.activity_level {
        profile.activity_level = activity_level;
    }
    if let Some(goal) = update.goal {
        profile.goal = goal;
    }
    profile.updated_at = Some(OffsetDateTime::now_utc());

    repo::save(store, &profile).await?;
    info!(%user_id, complete = goals::bmr(&profile).is_some(), "profile updated");
    Ok(profile)
}

pub async fn goal_summary(store: &dyn DocumentStore, user_id: Uuid) -> Result<GoalSummary, AppError> {
    let profile = load_profile(store, user_id).await?;
    Ok(goals::summarize(&profile))
}

/// Replaces every override at once; send `{}` to clear them.
pub async fn set_custom_goals(
    store: &dyn DocumentStore,
    user_id: Uuid,
    custom: CustomGoals,
) -> Result<GoalSummary, AppError> {
    if custom
        .fields()
        .iter()
        .flatten()
        .any(|v| !(v.is_finite() && *v > 0.0))
    {
        return Err(AppError::invalid("goal overrides must be greater than 0"));
    }

    let mut profile = load_profile(store, user_id).await?;
    profile.custom_goals = custom;
    profile.updated_at = Some(OffsetDateTime::now_utc());
    repo::save(store, &profile).await?;
    info!(%user_id, "custom goals saved");
    Ok(goals::summarize(&profile))
}

pub async fn effective_goals(store: &dyn DocumentStore, user_id: Uuid) -> Result<DailyGoals, AppError> {
    let profile = load_profile(store, user_id).await?;
    Ok(goals::effective_goals(&profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::{ActivityLevel, Gender, Goal};
    use crate::store::MemoryDocumentStore;

    fn metrics() -> ProfileUpdate {
        ProfileUpdate {
            name: Some("Ana".into()),
            age: Some(25.0),
            weight: Some(60.0),
            height: Some(165.0),
            gender: Some(Gender::Female),
            activity_level: Some(ActivityLevel::Moderate),
            goal: Some(Goal::Lose),
        }
    }

    #[tokio::test]
    async fn missing_profile_is_blank_with_default_goals() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        let p = load_profile(&store, me).await.unwrap();
        assert_eq!(p.user_id, me);
        assert_eq!(p.age, None);

        let s = goal_summary(&store, me).await.unwrap();
        assert!(!s.has_complete_profile);
        assert_eq!(s.bmr, None);
        assert_eq!(s.effective, DailyGoals::default());
    }

    #[tokio::test]
    async fn update_merges_and_derives_goals() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        update_profile(&store, me, metrics()).await.unwrap();

        let p = update_profile(
            &store,
            me,
            ProfileUpdate {
                weight: Some(58.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(p.name.as_deref(), Some("Ana"));
        assert_eq!(p.weight, Some(58.0));
        assert_eq!(p.height, Some(165.0));
        assert!(p.updated_at.is_some());

        let s = goal_summary(&store, me).await.unwrap();
        // 580 + 1031.25 - 125 - 161
        assert_eq!(s.bmr, Some(1325.0));
        assert_eq!(s.tdee, Some(2054.0));
        assert_eq!(s.effective.calories, 1643.0);
    }

    #[tokio::test]
    async fn rejects_non_positive_metrics() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        let err = update_profile(
            &store,
            me,
            ProfileUpdate {
                height: Some(0.0),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(matches!(
            set_custom_goals(
                &store,
                me,
                CustomGoals {
                    protein: Some(-5.0),
                    ..Default::default()
                }
            )
            .await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn overrides_survive_profile_edits() {
        let store = MemoryDocumentStore::new();
        let me = Uuid::new_v4();
        set_custom_goals(
            &store,
            me,
            CustomGoals {
                daily_calories: Some(1700.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        update_profile(&store, me, metrics()).await.unwrap();

        let g = effective_goals(&store, me).await.unwrap();
        assert_eq!(g.calories, 1700.0);

        set_custom_goals(&store, me, CustomGoals::default()).await.unwrap();
        assert_eq!(effective_goals(&store, me).await.unwrap().calories, 1668.0);
    }
}
