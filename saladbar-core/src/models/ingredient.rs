use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::product::Product;

/// A weighted reference to a catalog product.
///
/// The product is shared with the catalog it was resolved from and is never
/// looked up again after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaladIngredient {
    pub product: Arc<Product>,
    pub weight_grams: f64,
}

impl SaladIngredient {
    pub fn new(product: Arc<Product>, weight_grams: f64) -> Self {
        Self {
            product,
            weight_grams,
        }
    }

    pub fn name(&self) -> &str {
        &self.product.name
    }

    /// Calories contributed by this ingredient at its weight.
    pub fn total_calories(&self) -> f64 {
        self.product.calories_per_100g * self.weight_grams / 100.0
    }
}

impl fmt::Display for SaladIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} g {} ({:.2} kcal)",
            self.weight_grams,
            self.product.name,
            self.total_calories()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_total_calories() {
        let carrot = Arc::new(Product::root_vegetable("Carrot", 41.0, 4.7, true));
        let ingredient = SaladIngredient::new(carrot, 150.0);
        assert!((ingredient.total_calories() - 61.5).abs() < 1e-9);
        assert_eq!(ingredient.name(), "Carrot");
    }

    #[test]
    fn test_ingredient_shares_product() {
        let lettuce = Arc::new(Product::leafy_vegetable("Lettuce", 15.0, 1.3));
        let ingredient = SaladIngredient::new(Arc::clone(&lettuce), 80.0);
        assert!(Arc::ptr_eq(&ingredient.product, &lettuce));
    }

    #[test]
    fn test_ingredient_display() {
        let oil = Arc::new(Product::dressing("Olive oil", 884.0, "oil"));
        let ingredient = SaladIngredient::new(oil, 10.0);
        assert_eq!(format!("{}", ingredient), "10 g Olive oil (88.40 kcal)");
    }

    #[test]
    fn test_ingredient_json_roundtrip() {
        let feta = Arc::new(Product::topping("Feta", 264.0, false));
        let ingredient = SaladIngredient::new(feta, 40.0);
        let json = serde_json::to_string(&ingredient).unwrap();
        let parsed: SaladIngredient = serde_json::from_str(&json).unwrap();
        assert_eq!(ingredient, parsed);
    }
}
