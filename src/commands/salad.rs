use clap::{Args, Subcommand};
use serde::Serialize;

use super::{confirm, truncate, OutputFormat};
use saladbar_core::codec::{number_input, validate_salad_name};
use saladbar_core::{
    filter_vegetables_by_calorie_range, sort_ingredients, sort_salads, IngredientSortKey,
    ProductCatalog, Salad, SaladIngredient, SaladStore,
};

#[derive(Args)]
pub struct SaladCommand {
    #[command(subcommand)]
    pub command: SaladSubcommand,
}

#[derive(Subcommand)]
pub enum SaladSubcommand {
    /// Create a new, empty salad
    Create {
        /// Name of the salad (also its file name)
        name: String,
    },

    /// List all salads
    List {
        /// Order by total calories, lowest first
        #[arg(long)]
        sort_by_calories: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a salad's ingredients and totals
    Show {
        /// Salad name (case-insensitive)
        name: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a salad
    Delete {
        /// Salad name (case-insensitive)
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Add a catalog product to a salad
    AddIngredient {
        /// Salad name
        salad: String,

        /// Product name from the catalog
        product: String,

        /// Weight in grams
        weight: String,
    },

    /// Remove the first ingredient with this product name
    RemoveIngredient {
        /// Salad name
        salad: String,

        /// Product name
        product: String,
    },

    /// Show a salad's ingredients in order
    Sort {
        /// Salad name
        salad: String,

        /// Sort key: name, weight or calories
        #[arg(long, default_value = "name")]
        by: IngredientSortKey,
    },

    /// Find vegetables in a salad within a calorie range (per 100 g)
    Filter {
        /// Salad name
        salad: String,

        /// Lowest calories per 100 g (inclusive)
        #[arg(long)]
        min: String,

        /// Highest calories per 100 g (inclusive)
        #[arg(long)]
        max: String,
    },
}

/// JSON view of a salad with its derived totals.
#[derive(Serialize)]
struct SaladSummary<'a> {
    name: &'a str,
    total_weight: f64,
    total_calories: f64,
    ingredients: &'a [SaladIngredient],
}

impl<'a> From<&'a Salad> for SaladSummary<'a> {
    fn from(salad: &'a Salad) -> Self {
        Self {
            name: &salad.name,
            total_weight: salad.total_weight(),
            total_calories: salad.total_calories(),
            ingredients: &salad.ingredients,
        }
    }
}

impl SaladCommand {
    /// Whether the command writes or deletes recipe files.
    pub fn writes_recipes(&self) -> bool {
        matches!(
            self.command,
            SaladSubcommand::Create { .. }
                | SaladSubcommand::Delete { .. }
                | SaladSubcommand::AddIngredient { .. }
                | SaladSubcommand::RemoveIngredient { .. }
        )
    }

    pub fn run(
        &self,
        catalog: &ProductCatalog,
        store: &mut SaladStore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SaladSubcommand::Create { name } => {
                let name = validate_salad_name(name)?;
                if store.find_by_name(name).is_some() {
                    return Err(format!("Salad already exists: {}", name).into());
                }

                store.save(Salad::new(name))?;
                println!("Created salad: {}", name);
                Ok(())
            }

            SaladSubcommand::List {
                sort_by_calories,
                format,
            } => {
                let mut salads = store.all_salads();
                if salads.is_empty() {
                    println!("No salads found");
                    return Ok(());
                }
                if *sort_by_calories {
                    sort_salads(&mut salads);
                }

                match format {
                    OutputFormat::Json => {
                        let summaries: Vec<SaladSummary> =
                            salads.iter().map(SaladSummary::from).collect();
                        println!("{}", serde_json::to_string_pretty(&summaries)?);
                    }
                    OutputFormat::Text => {
                        println!(
                            "{:<30}  {:>11}  {:>10}  {:>10}",
                            "NAME", "INGREDIENTS", "WEIGHT G", "KCAL"
                        );
                        println!("{}", "-".repeat(67));
                        for salad in &salads {
                            println!(
                                "{:<30}  {:>11}  {:>10.2}  {:>10.2}",
                                truncate(&salad.name, 30),
                                salad.ingredients.len(),
                                salad.total_weight(),
                                salad.total_calories()
                            );
                        }
                        println!("\nTotal: {} salad(s)", salads.len());
                    }
                }
                Ok(())
            }

            SaladSubcommand::Show { name, format } => {
                let salad = find_salad(store, name)?;
                match format {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&SaladSummary::from(salad))?
                        );
                    }
                    OutputFormat::Text => {
                        print!("{}", salad);
                        if salad.is_empty() {
                            println!("\nNo ingredients yet.");
                        }
                    }
                }
                Ok(())
            }

            SaladSubcommand::Delete { name, force } => {
                let salad_name = find_salad(store, name)?.name.clone();

                if !force && !confirm(&format!("Delete salad '{}'?", salad_name))? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                store.delete(&salad_name)?;
                println!("Deleted salad: {}", salad_name);
                Ok(())
            }

            SaladSubcommand::AddIngredient {
                salad,
                product,
                weight,
            } => {
                let weight = number_input("weight", weight)?;
                let mut salad = find_salad(store, salad)?.clone();
                let product = catalog
                    .find_by_name(product)
                    .ok_or_else(|| format!("Product not found in catalog: {}", product))?;

                let ingredient = SaladIngredient::new(product, weight);
                println!("Added ingredient to '{}':", salad.name);
                println!("  {}", ingredient);
                salad.add_ingredient(ingredient);
                store.save(salad)?;
                Ok(())
            }

            SaladSubcommand::RemoveIngredient { salad, product } => {
                let mut salad = find_salad(store, salad)?.clone();
                let removed = salad.remove_ingredient_named(product).ok_or_else(|| {
                    format!("No ingredient '{}' in salad '{}'", product, salad.name)
                })?;

                store.save(salad)?;
                println!("Removed ingredient: {}", removed.name());
                Ok(())
            }

            SaladSubcommand::Sort { salad, by } => {
                let salad = find_salad(store, salad)?;
                let sorted = sort_ingredients(salad, *by);
                if sorted.is_empty() {
                    println!("Salad '{}' has no ingredients", salad.name);
                    return Ok(());
                }

                println!("{} (by {})", salad.name, by);
                for ingredient in &sorted {
                    println!("  - {}", ingredient);
                }
                Ok(())
            }

            SaladSubcommand::Filter { salad, min, max } => {
                let min = number_input("min", min)?;
                let max = number_input("max", max)?;
                let salad = find_salad(store, salad)?;

                let found = filter_vegetables_by_calorie_range(salad, min, max);
                if found.is_empty() {
                    println!("No vegetables between {} and {} kcal/100g", min, max);
                    return Ok(());
                }

                for ingredient in found {
                    println!(
                        "  - {} ({:.2} kcal/100g)",
                        ingredient.name(),
                        ingredient.product.calories_per_100g
                    );
                }
                Ok(())
            }
        }
    }
}

fn find_salad<'a>(store: &'a SaladStore, name: &str) -> Result<&'a Salad, String> {
    store
        .find_by_name(name)
        .ok_or_else(|| format!("Salad not found: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use saladbar_core::{CollectedDiagnostics, Product};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup() -> (ProductCatalog, SaladStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let diagnostics = Arc::new(CollectedDiagnostics::new());
        let mut catalog = ProductCatalog::new(temp.path().join("products.txt"), diagnostics.clone());
        catalog
            .add(Product::leafy_vegetable("Spinach", 23.0, 2.2))
            .unwrap();
        let store = SaladStore::new(temp.path().join("salads"), diagnostics);
        (catalog, store, temp)
    }

    fn run(cmd: SaladSubcommand, catalog: &ProductCatalog, store: &mut SaladStore) -> Result<(), String> {
        SaladCommand { command: cmd }
            .run(catalog, store)
            .map_err(|e| e.to_string())
    }

    #[test]
    fn test_writes_recipes() {
        let show = SaladCommand {
            command: SaladSubcommand::Show {
                name: "Green".into(),
                format: OutputFormat::Text,
            },
        };
        let add = SaladCommand {
            command: SaladSubcommand::AddIngredient {
                salad: "Green".into(),
                product: "Spinach".into(),
                weight: "50".into(),
            },
        };
        assert!(!show.writes_recipes());
        assert!(add.writes_recipes());
    }

    #[test]
    fn test_create_then_add_ingredient() {
        let (catalog, mut store, _temp) = setup();
        run(
            SaladSubcommand::Create {
                name: "Green".into(),
            },
            &catalog,
            &mut store,
        )
        .unwrap();
        run(
            SaladSubcommand::AddIngredient {
                salad: "green".into(),
                product: "SPINACH".into(),
                weight: "120,5".into(),
            },
            &catalog,
            &mut store,
        )
        .unwrap();

        let salad = store.find_by_name("Green").unwrap();
        assert_eq!(salad.ingredients.len(), 1);
        assert_eq!(salad.ingredients[0].weight_grams, 120.5);
        let on_disk = std::fs::read_to_string(store.path("Green")).unwrap();
        assert_eq!(on_disk, "Spinach;120.5\n");
    }

    #[test]
    fn test_create_duplicate_fails() {
        let (catalog, mut store, _temp) = setup();
        store.save(Salad::new("Green")).unwrap();
        let err = run(
            SaladSubcommand::Create {
                name: "GREEN".into(),
            },
            &catalog,
            &mut store,
        )
        .unwrap_err();
        assert!(err.contains("already exists"));
    }

    #[test]
    fn test_invalid_weight_writes_nothing() {
        let (catalog, mut store, _temp) = setup();
        store.save(Salad::new("Green")).unwrap();
        let err = run(
            SaladSubcommand::AddIngredient {
                salad: "Green".into(),
                product: "Spinach".into(),
                weight: "heavy".into(),
            },
            &catalog,
            &mut store,
        )
        .unwrap_err();
        assert!(err.contains("weight must be a number"));
        assert!(store.find_by_name("Green").unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(store.path("Green")).unwrap(), "");
    }

    #[test]
    fn test_unknown_product_is_rejected() {
        let (catalog, mut store, _temp) = setup();
        store.save(Salad::new("Green")).unwrap();
        let err = run(
            SaladSubcommand::AddIngredient {
                salad: "Green".into(),
                product: "Truffle".into(),
                weight: "5".into(),
            },
            &catalog,
            &mut store,
        )
        .unwrap_err();
        assert!(err.contains("Product not found"));
    }

    #[test]
    fn test_remove_ingredient_persists() {
        let (catalog, mut store, _temp) = setup();
        let spinach = catalog.find_by_name("Spinach").unwrap();
        store
            .save(Salad::new("Green").with_ingredients(vec![SaladIngredient::new(spinach, 50.0)]))
            .unwrap();

        run(
            SaladSubcommand::RemoveIngredient {
                salad: "Green".into(),
                product: "spinach".into(),
            },
            &catalog,
            &mut store,
        )
        .unwrap();
        assert!(store.find_by_name("Green").unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(store.path("Green")).unwrap(), "");
    }

    #[test]
    fn test_delete_with_force() {
        let (catalog, mut store, _temp) = setup();
        store.save(Salad::new("Green")).unwrap();
        run(
            SaladSubcommand::Delete {
                name: "green".into(),
                force: true,
            },
            &catalog,
            &mut store,
        )
        .unwrap();
        assert!(store.find_by_name("Green").is_none());
        assert!(!store.path("Green").exists());
    }

    #[test]
    fn test_summary_totals() {
        let (catalog, _store, _temp) = setup();
        let spinach = catalog.find_by_name("Spinach").unwrap();
        let salad = Salad::new("Green").with_ingredients(vec![SaladIngredient::new(spinach, 200.0)]);
        let summary = SaladSummary::from(&salad);
        assert_eq!(summary.total_weight, 200.0);
        assert_eq!(summary.total_calories, 46.0);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"total_calories\":46.0"));
    }
}
