use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    #[serde(alias = "lightly_active")]
    Light,
    #[serde(alias = "moderately_active")]
    Moderate,
    #[serde(alias = "very_active")]
    Intense,
    #[serde(alias = "extra_active")]
    Athlete,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Intense => 1.725,
            ActivityLevel::Athlete => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    #[serde(alias = "lose_weight")]
    Lose,
    #[default]
    #[serde(alias = "maintain_weight")]
    Maintain,
    #[serde(alias = "gain_weight")]
    Gain,
    #[serde(alias = "muscle_gain")]
    Muscle,
}

/// Per-field targets a user pinned by hand; unset fields fall back to derived goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomGoals {
    pub daily_calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sodium: Option<f64>,
    pub water: Option<f64>,
}

impl CustomGoals {
    pub fn fields(&self) -> [Option<f64>; 8] {
        [
            self.daily_calories,
            self.protein,
            self.carbs,
            self.fat,
            self.fiber,
            self.sugar,
            self.sodium,
            self.water,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<f64>,
    /// kg
    #[serde(default)]
    pub weight: Option<f64>,
    /// cm
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
    #[serde(default)]
    pub custom_goals: CustomGoals,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

impl Profile {
    /// The profile a user has before saving anything.
    pub fn blank(user_id: Uuid, name: Option<String>) -> Self {
        Self {
            user_id,
            name,
            age: None,
            weight: None,
            height: None,
            gender: Gender::default(),
            activity_level: ActivityLevel::default(),
            goal: Goal::default(),
            custom_goals: CustomGoals::default(),
            updated_at: None,
        }
    }
}
