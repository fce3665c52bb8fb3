use clap::{Args, Subcommand};

use super::{confirm, truncate, OutputFormat};
use saladbar_core::codec::{bool_input, number_input, validate_product_name, validate_text_field};
use saladbar_core::{InvalidInput, Product, ProductCatalog, ProductGroup, ProductKind};

#[derive(Args)]
pub struct ProductCommand {
    #[command(subcommand)]
    pub command: ProductSubcommand,
}

#[derive(Subcommand)]
pub enum ProductSubcommand {
    /// Add a product to the catalog
    Add {
        #[command(subcommand)]
        product: NewProduct,
    },

    /// List catalog products
    List {
        /// Only show one group (vegetable, dressing, topping)
        #[arg(long, short)]
        group: Option<ProductGroup>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a product's details
    Show {
        /// Product name (case-insensitive)
        name: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove a product from the catalog
    Remove {
        /// Product name (case-insensitive, first match)
        name: String,

        /// Refuse to remove the product unless it belongs to this group
        #[arg(long, short)]
        group: Option<ProductGroup>,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

/// Numbers are taken as text so that `12,5` works as well as `12.5`.
#[derive(Subcommand)]
pub enum NewProduct {
    /// Root vegetable (carrot, beet, radish)
    Root {
        name: String,
        /// Calories per 100 g
        #[arg(long)]
        calories: String,
        /// Sugar content, g per 100 g
        #[arg(long)]
        sugar: String,
        /// Whether the root is hard (true/false)
        #[arg(long, default_value = "false")]
        hard: String,
    },

    /// Leafy vegetable (lettuce, spinach, kale)
    Leafy {
        name: String,
        /// Calories per 100 g
        #[arg(long)]
        calories: String,
        /// Fiber content, g per 100 g
        #[arg(long)]
        fiber: String,
    },

    /// Fruiting vegetable (tomato, cucumber, pepper)
    Fruiting {
        name: String,
        /// Calories per 100 g
        #[arg(long)]
        calories: String,
        /// Water content in percent
        #[arg(long)]
        water: String,
    },

    /// Tuber (potato, sweet potato)
    Tuber {
        name: String,
        /// Calories per 100 g
        #[arg(long)]
        calories: String,
        /// Starch content, g per 100 g
        #[arg(long)]
        starch: String,
    },

    /// Dressing
    Dressing {
        name: String,
        /// Calories per 100 g
        #[arg(long)]
        calories: String,
        /// Base of the dressing (oil, creamy, vinegar...)
        #[arg(long)]
        base: String,
    },

    /// Topping
    Topping {
        name: String,
        /// Calories per 100 g
        #[arg(long)]
        calories: String,
        /// Whether the topping is crunchy (true/false)
        #[arg(long, default_value = "false")]
        crunchy: String,
    },
}

impl NewProduct {
    /// Validates every field; nothing reaches the catalog if one is invalid.
    pub fn build(&self) -> Result<Product, InvalidInput> {
        let (name, calories) = match self {
            NewProduct::Root { name, calories, .. }
            | NewProduct::Leafy { name, calories, .. }
            | NewProduct::Fruiting { name, calories, .. }
            | NewProduct::Tuber { name, calories, .. }
            | NewProduct::Dressing { name, calories, .. }
            | NewProduct::Topping { name, calories, .. } => (name, calories),
        };
        let name = validate_product_name(name)?;
        let calories = number_input("calories", calories)?;

        let kind = match self {
            NewProduct::Root { sugar, hard, .. } => ProductKind::RootVegetable {
                sugar_content: number_input("sugar", sugar)?,
                is_hard: bool_input("hard", hard)?,
            },
            NewProduct::Leafy { fiber, .. } => ProductKind::LeafyVegetable {
                fiber_content: number_input("fiber", fiber)?,
            },
            NewProduct::Fruiting { water, .. } => ProductKind::FruitingVegetable {
                water_content_percent: number_input("water", water)?,
            },
            NewProduct::Tuber { starch, .. } => ProductKind::TuberVegetable {
                starch_content: number_input("starch", starch)?,
            },
            NewProduct::Dressing { base, .. } => ProductKind::Dressing {
                base_type: validate_text_field(base)?.to_string(),
            },
            NewProduct::Topping { crunchy, .. } => ProductKind::Topping {
                is_crunchy: bool_input("crunchy", crunchy)?,
            },
        };

        Ok(Product::new(name, calories, kind))
    }
}

impl ProductCommand {
    /// Whether the command saves the catalog file.
    pub fn writes_catalog(&self) -> bool {
        matches!(
            self.command,
            ProductSubcommand::Add { .. } | ProductSubcommand::Remove { .. }
        )
    }

    pub fn run(&self, catalog: &mut ProductCatalog) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProductSubcommand::Add { product } => {
                let product = product.build()?;
                let added = catalog.add(product)?;
                println!("Added product:");
                println!("  {}", added);
                Ok(())
            }

            ProductSubcommand::List { group, format } => {
                let products = match group {
                    Some(group) => catalog.by_group(*group),
                    None => catalog.all(),
                };

                if products.is_empty() {
                    println!("No products found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&products)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<30}  {:<18}  {:>10}", "NAME", "TYPE", "KCAL/100G");
                        println!("{}", "-".repeat(62));
                        for product in &products {
                            println!(
                                "{:<30}  {:<18}  {:>10.2}",
                                truncate(&product.name, 30),
                                product.kind.tag(),
                                product.calories_per_100g
                            );
                        }
                        println!("\nTotal: {} product(s)", products.len());
                    }
                }
                Ok(())
            }

            ProductSubcommand::Show { name, format } => {
                let product = catalog
                    .find_by_name(name)
                    .ok_or_else(|| format!("Product not found: {}", name))?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&product)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", product);
                        println!("Group: {}", product.group());
                        if let Some(tip) = product.cooking_tip() {
                            println!("Tip: {}", tip);
                        }
                    }
                }
                Ok(())
            }

            ProductSubcommand::Remove { name, group, force } => {
                let product = catalog
                    .find_by_name(name)
                    .ok_or_else(|| format!("Product not found: {}", name))?;

                if let Some(group) = group {
                    if product.group() != *group {
                        return Err(format!("'{}' is not a {}", product.name, group).into());
                    }
                }

                if !force && !confirm(&format!("Remove product '{}'?", product.name))? {
                    println!("Removal cancelled.");
                    return Ok(());
                }

                catalog.remove(&product)?;
                println!("Removed product: {}", product.name);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_root_vegetable() {
        let input = NewProduct::Root {
            name: " Carrot ".into(),
            calories: "41,5".into(),
            sugar: "4.7".into(),
            hard: "TRUE".into(),
        };
        assert_eq!(
            input.build().unwrap(),
            Product::root_vegetable("Carrot", 41.5, 4.7, true)
        );
    }

    #[test]
    fn test_build_rejects_bad_number() {
        let input = NewProduct::Leafy {
            name: "Kale".into(),
            calories: "many".into(),
            fiber: "3".into(),
        };
        assert_eq!(
            input.build(),
            Err(InvalidInput::NotANumber {
                field: "calories",
                value: "many".into()
            })
        );
    }

    #[test]
    fn test_build_rejects_separator_in_fields() {
        let input = NewProduct::Dressing {
            name: "House".into(),
            calories: "300".into(),
            base: "oil;vinegar".into(),
        };
        assert_eq!(input.build(), Err(InvalidInput::ReservedCharacter(';')));

        let input = NewProduct::Topping {
            name: "Nuts;Seeds".into(),
            calories: "600".into(),
            crunchy: "true".into(),
        };
        assert_eq!(input.build(), Err(InvalidInput::ReservedCharacter(';')));
    }

    #[test]
    fn test_build_rejects_line_breaks() {
        let input = NewProduct::Leafy {
            name: "Kale\nJunk".into(),
            calories: "49".into(),
            fiber: "3.6".into(),
        };
        assert_eq!(input.build(), Err(InvalidInput::ReservedCharacter('\n')));

        let input = NewProduct::Dressing {
            name: "House".into(),
            calories: "300".into(),
            base: "oil\nvinegar".into(),
        };
        assert_eq!(input.build(), Err(InvalidInput::ReservedCharacter('\n')));
    }

    #[test]
    fn test_writes_catalog() {
        let list = ProductCommand {
            command: ProductSubcommand::List {
                group: None,
                format: OutputFormat::Text,
            },
        };
        let remove = ProductCommand {
            command: ProductSubcommand::Remove {
                name: "Kale".into(),
                group: None,
                force: true,
            },
        };
        assert!(!list.writes_catalog());
        assert!(remove.writes_catalog());
    }

    #[test]
    fn test_build_rejects_bad_flag() {
        let input = NewProduct::Topping {
            name: "Olives".into(),
            calories: "115".into(),
            crunchy: "sometimes".into(),
        };
        assert!(matches!(
            input.build(),
            Err(InvalidInput::NotABool { field: "crunchy", .. })
        ));
    }
}
