//! Saladbar Core Library
//!
//! Product catalog, salad recipe store and nutrition queries, persisted as
//! `;`-separated text files.

pub mod codec;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod query;
pub mod storage;

pub use diagnostics::{CollectedDiagnostics, Diagnostics, Severity, TracingDiagnostics};
pub use error::{InvalidInput, MalformedRecord, StorageError};
pub use models::{Product, ProductGroup, ProductKind, Salad, SaladIngredient};
pub use query::{
    filter_vegetables_by_calorie_range, sort_ingredients, sort_salads, total_calories,
    total_weight, IngredientSortKey,
};
pub use storage::{LoadReport, ProductCatalog, SaladStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
