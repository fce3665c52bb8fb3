use serde::{Deserialize, Serialize};
use std::fmt;

use super::ingredient::SaladIngredient;

/// A named, ordered list of ingredients.
///
/// Mutating a salad never touches the disk; persist it through
/// [`crate::SaladStore::save`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Salad {
    pub name: String,
    pub ingredients: Vec<SaladIngredient>,
}

impl Salad {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredients(mut self, ingredients: Vec<SaladIngredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn add_ingredient(&mut self, ingredient: SaladIngredient) {
        self.ingredients.push(ingredient);
    }

    /// Removes the first ingredient equal to `ingredient`.
    pub fn remove_ingredient(&mut self, ingredient: &SaladIngredient) -> bool {
        match self.ingredients.iter().position(|i| i == ingredient) {
            Some(index) => {
                self.ingredients.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the first ingredient whose product name matches, ignoring case.
    pub fn remove_ingredient_named(&mut self, product_name: &str) -> Option<SaladIngredient> {
        let index = self
            .ingredients
            .iter()
            .position(|i| i.product.name_matches(product_name))?;
        Some(self.ingredients.remove(index))
    }

    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub fn total_calories(&self) -> f64 {
        self.ingredients.iter().map(SaladIngredient::total_calories).sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.ingredients.iter().map(|i| i.weight_grams).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl fmt::Display for Salad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        writeln!(f, "Weight: {:.2} g", self.total_weight())?;
        writeln!(f, "Calories: {:.2} kcal", self.total_calories())?;

        if !self.ingredients.is_empty() {
            writeln!(f, "\nIngredients:")?;
            for ingredient in &self.ingredients {
                writeln!(f, "  - {}", ingredient)?;
                if let Some(tip) = ingredient.product.cooking_tip() {
                    writeln!(f, "      tip: {}", tip)?;
                }
            }
        }

        Ok(())
    }
}
