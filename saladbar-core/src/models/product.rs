use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Water content (percent) from which fruiting vegetables should be deseeded.
pub const SEED_REMOVAL_WATER_PERCENT: f64 = 90.0;

/// Starch content (g/100g) from which tubers must be cooked before use.
pub const MUST_COOK_STARCH: f64 = 10.0;

/// A catalog item: a name, a calorie value per 100 g and variant-specific data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub calories_per_100g: f64,
    pub kind: ProductKind,
}

/// The closed set of product variants, with the fields each one persists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ProductKind {
    RootVegetable { sugar_content: f64, is_hard: bool },
    LeafyVegetable { fiber_content: f64 },
    FruitingVegetable { water_content_percent: f64 },
    TuberVegetable { starch_content: f64 },
    Dressing { base_type: String },
    Topping { is_crunchy: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductGroup {
    Vegetable,
    Dressing,
    Topping,
}

impl Product {
    pub fn new(name: impl Into<String>, calories_per_100g: f64, kind: ProductKind) -> Self {
        Self {
            name: name.into(),
            calories_per_100g,
            kind,
        }
    }

    pub fn root_vegetable(
        name: impl Into<String>,
        calories_per_100g: f64,
        sugar_content: f64,
        is_hard: bool,
    ) -> Self {
        Self::new(
            name,
            calories_per_100g,
            ProductKind::RootVegetable {
                sugar_content,
                is_hard,
            },
        )
    }

    pub fn leafy_vegetable(name: impl Into<String>, calories_per_100g: f64, fiber_content: f64) -> Self {
        Self::new(
            name,
            calories_per_100g,
            ProductKind::LeafyVegetable { fiber_content },
        )
    }

    pub fn fruiting_vegetable(
        name: impl Into<String>,
        calories_per_100g: f64,
        water_content_percent: f64,
    ) -> Self {
        Self::new(
            name,
            calories_per_100g,
            ProductKind::FruitingVegetable {
                water_content_percent,
            },
        )
    }

    pub fn tuber_vegetable(name: impl Into<String>, calories_per_100g: f64, starch_content: f64) -> Self {
        Self::new(
            name,
            calories_per_100g,
            ProductKind::TuberVegetable { starch_content },
        )
    }

    pub fn dressing(
        name: impl Into<String>,
        calories_per_100g: f64,
        base_type: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            calories_per_100g,
            ProductKind::Dressing {
                base_type: base_type.into(),
            },
        )
    }

    pub fn topping(name: impl Into<String>, calories_per_100g: f64, is_crunchy: bool) -> Self {
        Self::new(name, calories_per_100g, ProductKind::Topping { is_crunchy })
    }

    pub fn group(&self) -> ProductGroup {
        self.kind.group()
    }

    pub fn is_vegetable(&self) -> bool {
        self.group() == ProductGroup::Vegetable
    }

    /// Case-insensitive name comparison used by every lookup.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Preparation advice, when the variant has any for these field values.
    pub fn cooking_tip(&self) -> Option<String> {
        match &self.kind {
            ProductKind::RootVegetable { is_hard: true, .. } => {
                Some("Grate or slice thinly, hard roots are tough to chew raw.".to_string())
            }
            ProductKind::RootVegetable { .. } => None,
            ProductKind::LeafyVegetable { .. } => {
                Some("Wash and dry the leaves well, then tear rather than cut.".to_string())
            }
            ProductKind::FruitingVegetable {
                water_content_percent,
            } if *water_content_percent >= SEED_REMOVAL_WATER_PERCENT => {
                Some("Remove the seeds so the salad does not turn watery.".to_string())
            }
            ProductKind::FruitingVegetable { .. } => None,
            ProductKind::TuberVegetable { starch_content } if *starch_content >= MUST_COOK_STARCH => {
                Some("Must be cooked and cooled before going into a salad.".to_string())
            }
            ProductKind::TuberVegetable { .. } => None,
            ProductKind::Dressing { base_type } => Some(format!(
                "Add the {} dressing just before serving.",
                base_type
            )),
            ProductKind::Topping { is_crunchy: true } => {
                Some("Sprinkle on at the last moment to keep it crunchy.".to_string())
            }
            ProductKind::Topping { .. } => None,
        }
    }
}

impl ProductKind {
    /// Type tag used as the first field of a catalog line.
    pub fn tag(&self) -> &'static str {
        match self {
            ProductKind::RootVegetable { .. } => "RootVegetable",
            ProductKind::LeafyVegetable { .. } => "LeafyVegetable",
            ProductKind::FruitingVegetable { .. } => "FruitingVegetable",
            ProductKind::TuberVegetable { .. } => "TuberVegetable",
            ProductKind::Dressing { .. } => "Dressing",
            ProductKind::Topping { .. } => "Topping",
        }
    }

    pub fn group(&self) -> ProductGroup {
        match self {
            ProductKind::RootVegetable { .. }
            | ProductKind::LeafyVegetable { .. }
            | ProductKind::FruitingVegetable { .. }
            | ProductKind::TuberVegetable { .. } => ProductGroup::Vegetable,
            ProductKind::Dressing { .. } => ProductGroup::Dressing,
            ProductKind::Topping { .. } => ProductGroup::Topping,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ProductKind::RootVegetable { .. } => "root vegetable",
            ProductKind::LeafyVegetable { .. } => "leafy vegetable",
            ProductKind::FruitingVegetable { .. } => "fruiting vegetable",
            ProductKind::TuberVegetable { .. } => "tuber",
            ProductKind::Dressing { .. } => "dressing",
            ProductKind::Topping { .. } => "topping",
        }
    }
}

impl fmt::Display for ProductGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductGroup::Vegetable => write!(f, "vegetable"),
            ProductGroup::Dressing => write!(f, "dressing"),
            ProductGroup::Topping => write!(f, "topping"),
        }
    }
}

impl FromStr for ProductGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vegetable" | "vegetables" => Ok(ProductGroup::Vegetable),
            "dressing" | "dressings" => Ok(ProductGroup::Dressing),
            "topping" | "toppings" => Ok(ProductGroup::Topping),
            _ => Err(format!(
                "Invalid product group '{}'. Valid options: vegetable, dressing, topping",
                s
            )),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {:.2} kcal/100g)",
            self.name,
            self.kind.label(),
            self.calories_per_100g
        )
    }
}
