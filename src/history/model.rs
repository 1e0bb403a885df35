use serde::Serialize;

use crate::{
    meals::DailyMeals,
    nutrition::{round0, round1, NutritionalValues},
    profile::DailyGoals,
};

/// Consumed as a percentage of target; a target of zero or less counts as 0%.
pub fn percent_of(consumed: f64, target: f64) -> f64 {
    if !(target.is_finite() && target > 0.0) {
        return 0.0;
    }
    let pct = consumed / target * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroPercentages {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    pub date: String,
    pub consumed: NutritionalValues,
    pub goals: DailyGoals,
    pub percentages: MacroPercentages,
    pub meals_count: usize,
}

impl DayStats {
    pub fn new(day: &DailyMeals, goals: DailyGoals) -> Self {
        let c = &day.daily_totals;
        let percentages = if day.meals.is_empty() {
            MacroPercentages::default()
        } else {
            MacroPercentages {
                calories: percent_of(c.calories, goals.calories),
                protein: percent_of(c.protein, goals.protein),
                carbs: percent_of(c.carbs, goals.carbs),
                fat: percent_of(c.fat, goals.fat),
                fiber: percent_of(c.fiber, goals.fiber),
            }
        };
        Self {
            date: day.date.clone(),
            consumed: day.daily_totals,
            goals,
            percentages,
            meals_count: day.meals.len(),
        }
    }

    pub fn has_meals(&self) -> bool {
        self.meals_count > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub average_calories: f64,
    pub average_protein: f64,
    pub average_carbs: f64,
    pub average_fat: f64,
    pub average_fiber: f64,
    pub days_with_data: usize,
    pub total_days: usize,
    /// Consecutive logged days counting back from the newest one.
    pub streak: usize,
}

impl HistoryStats {
    /// `days` must be oldest first.
    pub fn from_days(days: &[DayStats]) -> Self {
        let logged: Vec<&DayStats> = days.iter().filter(|d| d.has_meals()).collect();
        let streak = days.iter().rev().take_while(|d| d.has_meals()).count();

        let mut stats = Self {
            days_with_data: logged.len(),
            total_days: days.len(),
            streak,
            ..Default::default()
        };
        if logged.is_empty() {
            return stats;
        }

        let n = logged.len() as f64;
        let avg = |f: fn(&NutritionalValues) -> f64| {
            logged.iter().map(|d| f(&d.consumed)).sum::<f64>() / n
        };
        stats.average_calories = round0(avg(|c| c.calories));
        stats.average_protein = round1(avg(|c| c.protein));
        stats.average_carbs = round1(avg(|c| c.carbs));
        stats.average_fat = round1(avg(|c| c.fat));
        stats.average_fiber = round1(avg(|c| c.fiber));
        stats
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub days: Vec<DayStats>,
    pub stats: HistoryStats,
}
