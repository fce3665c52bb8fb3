//! Stateless aggregation, ordering and filtering over salads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Salad, SaladIngredient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientSortKey {
    Name,
    Weight,
    Calories,
}

impl fmt::Display for IngredientSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngredientSortKey::Name => write!(f, "name"),
            IngredientSortKey::Weight => write!(f, "weight"),
            IngredientSortKey::Calories => write!(f, "calories"),
        }
    }
}

impl FromStr for IngredientSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(IngredientSortKey::Name),
            "weight" => Ok(IngredientSortKey::Weight),
            "calories" => Ok(IngredientSortKey::Calories),
            _ => Err(format!(
                "Invalid sort key '{}'. Valid options: name, weight, calories",
                s
            )),
        }
    }
}

/// Sum of every ingredient's calories at its weight.
pub fn total_calories(salad: &Salad) -> f64 {
    salad.total_calories()
}

pub fn total_weight(salad: &Salad) -> f64 {
    salad.total_weight()
}

/// Returns the salad's ingredients in a stable ascending order by `key`.
///
/// Names compare case-sensitively; the salad itself is left untouched.
pub fn sort_ingredients(salad: &Salad, key: IngredientSortKey) -> Vec<SaladIngredient> {
    let mut ingredients = salad.ingredients.clone();
    match key {
        IngredientSortKey::Name => ingredients.sort_by(|a, b| a.name().cmp(b.name())),
        IngredientSortKey::Weight => {
            ingredients.sort_by(|a, b| a.weight_grams.total_cmp(&b.weight_grams))
        }
        IngredientSortKey::Calories => {
            ingredients.sort_by(|a, b| a.total_calories().total_cmp(&b.total_calories()))
        }
    }
    ingredients
}

/// Stable ascending sort of salads by total calories.
pub fn sort_salads(salads: &mut [Salad]) {
    salads.sort_by(|a, b| a.total_calories().total_cmp(&b.total_calories()));
}

/// Vegetable ingredients whose per-100g calories lie in `[min, max]`.
pub fn filter_vegetables_by_calorie_range(
    salad: &Salad,
    min: f64,
    max: f64,
) -> Vec<&SaladIngredient> {
    salad
        .ingredients
        .iter()
        .filter(|i| i.product.is_vegetable())
        .filter(|i| {
            let calories = i.product.calories_per_100g;
            calories >= min && calories <= max
        })
        .collect()
}
