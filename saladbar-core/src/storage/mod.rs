//! File-backed stores for the product catalog and salad recipes.

mod catalog;
mod salad_store;

pub use catalog::ProductCatalog;
pub use salad_store::{SaladStore, RECIPE_EXTENSION};

/// Outcome of a best-effort load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records (catalog) or salads (recipe store) now held in memory.
    pub loaded: usize,
    /// Lines, ingredients or files dropped with a diagnostic.
    pub skipped: usize,
}
