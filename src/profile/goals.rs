//! Calorie and macro targets derived from body metrics.
//!
//! BMR uses Mifflin-St Jeor; TDEE applies the activity multiplier; the daily
//! goal shifts TDEE by a percentage per goal. Everything is whole units.

use serde::{Deserialize, Serialize};

use super::model::{ActivityLevel, Gender, Goal, Profile};
use crate::nutrition::round0;

pub const DEFAULT_SODIUM_MG: f64 = 2300.0;
pub const DEFAULT_WATER_ML: f64 = 2000.0;
const WATER_ML_PER_KG: f64 = 35.0;
const FIBER_G_PER_1000_KCAL: f64 = 14.0;

/// Daily targets. `Default` is what a user without a usable profile gets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub water: f64,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 150.0,
            carbs: 250.0,
            fat: 67.0,
            fiber: 25.0,
            sugar: 50.0,
            sodium: DEFAULT_SODIUM_MG,
            water: DEFAULT_WATER_ML,
        }
    }
}

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// `None` until age, weight and height are all present and positive.
pub fn bmr(profile: &Profile) -> Option<f64> {
    let age = positive(profile.age)?;
    let weight = positive(profile.weight)?;
    let height = positive(profile.height)?;

    let base = 10.0 * weight + 6.25 * height - 5.0 * age;
    let raw = match profile.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    Some(round0(raw)).filter(|v| *v > 0.0)
}

pub fn tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    round0(bmr * activity.multiplier())
}

pub fn daily_calorie_goal(tdee: f64, goal: Goal) -> f64 {
    let factor = match goal {
        Goal::Lose => 0.8,
        Goal::Maintain => 1.0,
        Goal::Gain => 1.2,
        Goal::Muscle => 1.15,
    };
    round0(tdee * factor)
}

/// (protein, fat, carbs) shares of the calorie goal.
fn macro_split(goal: Goal) -> (f64, f64, f64) {
    match goal {
        Goal::Lose => (0.30, 0.25, 0.45),
        Goal::Muscle => (0.30, 0.20, 0.50),
        Goal::Gain => (0.20, 0.30, 0.50),
        Goal::Maintain => (0.25, 0.25, 0.50),
    }
}

pub fn macro_goals(calories: f64, goal: Goal, weight: Option<f64>) -> DailyGoals {
    let (protein_pct, fat_pct, carbs_pct) = macro_split(goal);
    DailyGoals {
        calories,
        protein: round0(calories * protein_pct / 4.0),
        carbs: round0(calories * carbs_pct / 4.0),
        fat: round0(calories * fat_pct / 9.0),
        fiber: round0(calories / 1000.0 * FIBER_G_PER_1000_KCAL),
        sugar: round0(calories * 0.10 / 4.0),
        sodium: DEFAULT_SODIUM_MG,
        water: positive(weight).map_or(DEFAULT_WATER_ML, |w| round0(w * WATER_ML_PER_KG)),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub bmr: Option<f64>,
    pub tdee: Option<f64>,
    /// Targets computed from the profile alone.
    pub derived: Option<DailyGoals>,
    /// What progress is measured against: overrides, then derived, then defaults.
    pub effective: DailyGoals,
    pub has_complete_profile: bool,
    pub has_custom_goals: bool,
}

pub fn summarize(profile: &Profile) -> GoalSummary {
    let bmr = bmr(profile);
    let tdee = bmr.map(|b| tdee(b, profile.activity_level));
    let derived = tdee.map(|t| {
        let calories = daily_calorie_goal(t, profile.goal);
        macro_goals(calories, profile.goal, profile.weight)
    });

    let c = &profile.custom_goals;
    let base = derived.unwrap_or_default();
    let effective = DailyGoals {
        calories: c.daily_calories.unwrap_or(base.calories),
        protein: c.protein.unwrap_or(base.protein),
        carbs: c.carbs.unwrap_or(base.carbs),
        fat: c.fat.unwrap_or(base.fat),
        fiber: c.fiber.unwrap_or(base.fiber),
        sugar: c.sugar.unwrap_or(base.sugar),
        sodium: c.sodium.unwrap_or(base.sodium),
        water: c.water.unwrap_or(base.water),
    };

    GoalSummary {
        bmr,
        tdee,
        derived,
        effective,
        has_complete_profile: bmr.is_some(),
        has_custom_goals: c.fields().iter().any(Option::is_some),
    }
}

pub fn effective_goals(profile: &Profile) -> DailyGoals {
    summarize(profile).effective
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::CustomGoals;
    use uuid::Uuid;

    fn profile(gender: Gender, age: f64, weight: f64, height: f64) -> Profile {
        let mut p = Profile::blank(Uuid::new_v4(), None);
        p.gender = gender;
        p.age = Some(age);
        p.weight = Some(weight);
        p.height = Some(height);
        p
    }

    #[test]
    fn bmr_reference_values() {
        assert_eq!(bmr(&profile(Gender::Male, 30.0, 75.0, 175.0)), Some(1699.0));
        assert_eq!(bmr(&profile(Gender::Female, 25.0, 60.0, 165.0)), Some(1345.0));
    }

    #[test]
    fn bmr_is_absent_for_incomplete_metrics() {
        let mut p = profile(Gender::Male, 30.0, 75.0, 175.0);
        p.height = None;
        assert_eq!(bmr(&p), None);
        p.height = Some(175.0);
        p.age = Some(0.0);
        assert_eq!(bmr(&p), None);
        p.age = Some(-4.0);
        assert_eq!(bmr(&p), None);
    }

    #[test]
    fn tdee_and_goal_factors() {
        assert_eq!(tdee(1699.0, ActivityLevel::Sedentary), 2039.0);
        assert_eq!(tdee(1699.0, ActivityLevel::Athlete), 3228.0);
        assert_eq!(daily_calorie_goal(2000.0, Goal::Lose), 1600.0);
        assert_eq!(daily_calorie_goal(2000.0, Goal::Maintain), 2000.0);
        assert_eq!(daily_calorie_goal(2000.0, Goal::Gain), 2400.0);
        assert_eq!(daily_calorie_goal(2000.0, Goal::Muscle), 2300.0);
    }

    #[test]
    fn macro_split_per_goal() {
        let m = macro_goals(2000.0, Goal::Maintain, Some(70.0));
        assert_eq!((m.protein, m.carbs, m.fat), (125.0, 250.0, 56.0));
        assert_eq!(m.fiber, 28.0);
        assert_eq!(m.sugar, 50.0);
        assert_eq!(m.sodium, 2300.0);
        assert_eq!(m.water, 2450.0);

        let lose = macro_goals(2000.0, Goal::Lose, None);
        assert_eq!((lose.protein, lose.carbs, lose.fat), (150.0, 225.0, 56.0));
        assert_eq!(lose.water, DEFAULT_WATER_ML);

        let muscle = macro_goals(2000.0, Goal::Muscle, None);
        assert_eq!((muscle.protein, muscle.carbs, muscle.fat), (150.0, 250.0, 44.0));

        let gain = macro_goals(2000.0, Goal::Gain, None);
        assert_eq!((gain.protein, gain.carbs, gain.fat), (100.0, 250.0, 67.0));
    }

    #[test]
    fn summary_for_complete_profile() {
        let s = summarize(&profile(Gender::Male, 30.0, 75.0, 175.0));
        assert!(s.has_complete_profile);
        assert!(!s.has_custom_goals);
        assert_eq!(s.tdee, Some(2039.0));
        let goals = s.derived.unwrap();
        assert_eq!(goals.calories, 2039.0);
        assert_eq!(goals.protein, 127.0);
        assert_eq!(goals.carbs, 255.0);
        assert_eq!(goals.fat, 57.0);
        assert_eq!(goals.water, 2625.0);
        assert_eq!(s.effective, goals);
    }

    #[test]
    fn overrides_win_then_derived_then_defaults() {
        let mut blank = Profile::blank(Uuid::new_v4(), None);
        assert_eq!(effective_goals(&blank), DailyGoals::default());

        blank.custom_goals = CustomGoals {
            daily_calories: Some(1800.0),
            water: Some(3000.0),
            ..Default::default()
        };
        let g = effective_goals(&blank);
        assert_eq!(g.calories, 1800.0);
        assert_eq!(g.water, 3000.0);
        assert_eq!(g.protein, 150.0);

        let mut complete = profile(Gender::Male, 30.0, 75.0, 175.0);
        complete.custom_goals.protein = Some(180.0);
        let s = summarize(&complete);
        assert!(s.has_custom_goals);
        assert_eq!(s.effective.protein, 180.0);
        assert_eq!(s.effective.calories, 2039.0);
    }
}
