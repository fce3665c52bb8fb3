mod ingredient;
mod product;
mod salad;

pub use ingredient::SaladIngredient;
pub use product::{Product, ProductGroup, ProductKind, MUST_COOK_STARCH, SEED_REMOVAL_WATER_PERCENT};
pub use salad::Salad;
