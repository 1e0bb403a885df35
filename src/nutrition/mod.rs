//! Nutrition arithmetic shared by foods, dishes, meals and history.
//!
//! Values are always carried per field; rounding follows half-up semantics so
//! a stored snapshot is reproducible from its inputs.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Per-100 figures on a food, or an absolute snapshot anywhere else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalValues {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    /// mg
    #[serde(default)]
    pub sodium: f64,
    #[serde(default)]
    pub sugar: f64,
    /// Absent for foods that never declared a water content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
}

/// Rounds half-up to `decimals` places; NaN and infinities collapse to 0.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor + 0.5).floor() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        0.0
    }
}

pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

pub fn round0(value: f64) -> f64 {
    round_to(value, 0)
}

impl NutritionalValues {
    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fat: f(self.fat),
            fiber: f(self.fiber),
            sodium: f(self.sodium),
            sugar: f(self.sugar),
            water: self.water.map(&f),
        }
    }

    /// Scales per-100 figures by `proportion`, one decimal per field.
    pub fn scaled(&self, proportion: f64) -> Self {
        self.map(|v| round1(v * proportion))
    }

    /// Field-wise sum; water stays absent only if every term lacks it.
    pub fn sum<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a NutritionalValues>,
    {
        values
            .into_iter()
            .fold(Self::default(), |acc, v| acc + *v)
            .map(round1)
    }

    /// Calories and sodium to whole units, everything else to one decimal.
    pub fn per_serving(&self, servings: Servings) -> Self {
        let n = f64::from(servings.get());
        Self {
            calories: round0(self.calories / n),
            protein: round1(self.protein / n),
            carbs: round1(self.carbs / n),
            fat: round1(self.fat / n),
            fiber: round1(self.fiber / n),
            sodium: round0(self.sodium / n),
            sugar: round1(self.sugar / n),
            water: self.water.map(|w| round1(w / n)),
        }
    }
}

impl Add for NutritionalValues {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            calories: finite(self.calories) + finite(rhs.calories),
            protein: finite(self.protein) + finite(rhs.protein),
            carbs: finite(self.carbs) + finite(rhs.carbs),
            fat: finite(self.fat) + finite(rhs.fat),
            fiber: finite(self.fiber) + finite(rhs.fiber),
            sodium: finite(self.sodium) + finite(rhs.sodium),
            sugar: finite(self.sugar) + finite(rhs.sugar),
            water: match (self.water, rhs.water) {
                (None, None) => None,
                (a, b) => Some(finite(a.unwrap_or(0.0)) + finite(b.unwrap_or(0.0))),
            },
        }
    }
}

/// A validated servings count (at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Servings(u32);

impl Servings {
    pub const ONE: Servings = Servings(1);

    pub fn new(count: i64) -> Result<Self, AppError> {
        match u32::try_from(count) {
            Ok(n) if n >= 1 => Ok(Self(n)),
            _ => Err(AppError::InvalidServings(count)),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Servings {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<i64> for Servings {
    type Error = AppError;

    fn try_from(count: i64) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<Servings> for u32 {
    fn from(s: Servings) -> u32 {
        s.0
    }
}

/// Quantities entered by users must be positive finite numbers.
pub fn validate_quantity(quantity: f64) -> Result<f64, AppError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(quantity)
    } else {
        Err(AppError::invalid("quantity must be greater than 0"))
    }
}
