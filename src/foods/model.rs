use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    error::AppError,
    nutrition::{validate_quantity, NutritionalValues},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Protein,
    Carbs,
    Vegetables,
    Fruits,
    Dairy,
    Grains,
    Fats,
    Beverages,
    #[default]
    Others,
}

/// Unit the per-100 nutrition figures are expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseUnit {
    #[default]
    G,
    Ml,
}

impl BaseUnit {
    pub fn abbreviation(self) -> &'static str {
        match self {
            BaseUnit::G => "g",
            BaseUnit::Ml => "ml",
        }
    }

    pub fn unit(self) -> FoodUnit {
        let name = match self {
            BaseUnit::G => "gram",
            BaseUnit::Ml => "milliliter",
        };
        FoodUnit::new(name, self.abbreviation(), 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodUnit {
    pub name: String,
    pub abbreviation: String,
    /// How many base units one of this unit stands for.
    pub grams_equivalent: f64,
}

impl FoodUnit {
    pub fn new(name: &str, abbreviation: &str, grams_equivalent: f64) -> Self {
        Self {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            grams_equivalent,
        }
    }
}

fn unix_epoch() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: FoodCategory,
    /// Per 100 base units.
    #[serde(default)]
    pub nutrition: NutritionalValues,
    #[serde(default)]
    pub base_unit: BaseUnit,
    #[serde(default)]
    pub available_units: Vec<FoodUnit>,
    #[serde(default)]
    pub default_unit: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(default = "unix_epoch", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default = "unix_epoch", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Food {
    pub fn unit(&self, abbreviation: &str) -> Option<&FoodUnit> {
        self.available_units
            .iter()
            .find(|u| u.abbreviation == abbreviation)
    }

    /// Nutrition for `quantity` of `unit` (an abbreviation from `available_units`).
    pub fn nutrition_for(&self, quantity: f64, unit: &str) -> Result<NutritionalValues, AppError> {
        let selected = self.unit(unit).ok_or_else(|| AppError::UnitNotFound {
            food: self.name.clone(),
            unit: unit.to_string(),
        })?;
        let quantity = validate_quantity(quantity)?;

        let total_base_units = quantity * selected.grams_equivalent;
        let proportion = total_base_units / 100.0;
        Ok(self.nutrition.scaled(proportion))
    }

    /// Fills what older documents may lack: the base unit entry and the default unit.
    pub fn normalized(mut self) -> Self {
        let base = self.base_unit.unit();
        if self.unit(&base.abbreviation).is_none() {
            self.available_units.insert(0, base);
        }
        if self.default_unit.is_empty() || self.unit(&self.default_unit).is_none() {
            self.default_unit = self.base_unit.abbreviation().to_string();
        }
        self
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid("food name is required"));
        }

        let mut seen = std::collections::HashSet::new();
        for u in &self.available_units {
            if u.abbreviation.trim().is_empty() {
                return Err(AppError::invalid("unit abbreviation is required"));
            }
            if !(u.grams_equivalent.is_finite() && u.grams_equivalent > 0.0) {
                return Err(AppError::invalid(format!(
                    "unit `{}` must have a positive equivalent",
                    u.abbreviation
                )));
            }
            if !seen.insert(u.abbreviation.as_str()) {
                return Err(AppError::invalid(format!(
                    "unit `{}` is listed twice",
                    u.abbreviation
                )));
            }
        }

        let base = self.base_unit.abbreviation();
        match self.unit(base) {
            Some(u) if u.grams_equivalent == 1.0 => {}
            Some(_) => {
                return Err(AppError::invalid(format!(
                    "base unit `{base}` must have an equivalent of 1"
                )))
            }
            None => {
                return Err(AppError::invalid(format!(
                    "base unit `{base}` must be listed"
                )))
            }
        }

        if self.unit(&self.default_unit).is_none() {
            return Err(AppError::invalid(format!(
                "default unit `{}` is not listed",
                self.default_unit
            )));
        }

        let n = &self.nutrition;
        let fields = [
            n.calories, n.protein, n.carbs, n.fat, n.fiber, n.sodium, n.sugar,
        ];
        if fields
            .iter()
            .chain(n.water.iter())
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(AppError::invalid("nutrition values must be non-negative"));
        }
        Ok(())
    }

    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .brand
                .as_deref()
                .is_some_and(|b| b.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn food(name: &str, nutrition: NutritionalValues, units: Vec<FoodUnit>) -> Food {
        Food {
            id: Uuid::new_v4(),
            name: name.into(),
            brand: None,
            category: FoodCategory::Others,
            nutrition,
            base_unit: BaseUnit::G,
            available_units: units,
            default_unit: "g".into(),
            is_custom: true,
            is_public: false,
            user_id: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    pub fn chicken() -> Food {
        let mut f = food(
            "Grilled chicken breast",
            NutritionalValues {
                calories: 165.0,
                protein: 31.0,
                carbs: 0.0,
                fat: 3.6,
                sodium: 74.0,
                ..Default::default()
            },
            vec![FoodUnit::new("gram", "g", 1.0)],
        );
        f.category = FoodCategory::Protein;
        f
    }

    pub fn rice() -> Food {
        let mut f = food(
            "White rice",
            NutritionalValues {
                calories: 130.0,
                protein: 2.7,
                carbs: 28.0,
                fat: 0.3,
                fiber: 0.4,
                sodium: 1.0,
                sugar: 0.1,
                water: None,
            },
            vec![FoodUnit::new("gram", "g", 1.0)],
        );
        f.category = FoodCategory::Carbs;
        f
    }

    pub fn bread() -> Food {
        food(
            "French bread",
            NutritionalValues {
                calories: 300.0,
                protein: 9.0,
                carbs: 58.0,
                fat: 3.1,
                fiber: 2.3,
                sodium: 643.0,
                sugar: 5.0,
                water: None,
            },
            vec![
                FoodUnit::new("roll", "unit", 50.0),
                FoodUnit::new("slice", "slice", 25.0),
                FoodUnit::new("gram", "g", 1.0),
            ],
        )
    }
}
