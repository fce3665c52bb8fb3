//! Text record format for catalog and recipe files.
//!
//! Catalog line: `<TypeTag>;<name>;<calories>;<variant fields...>`
//! Recipe line:  `<productName>;<weightGrams>`
//!
//! Numbers are written with `.` and read with either `.` or `,`.

use crate::error::{InvalidInput, MalformedRecord};
use crate::models::{Product, ProductKind, SaladIngredient};

pub const FIELD_SEPARATOR: char = ';';

/// Renders a number the way it is persisted (`.` decimal separator).
pub fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

/// Parses a decimal number, accepting `,` as the decimal separator.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().replace(',', ".").parse::<f64>().ok()
}

/// Parses `true`/`false`, ignoring case and surrounding whitespace.
pub fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub fn encode_product(product: &Product) -> String {
    let mut fields = vec![
        product.kind.tag().to_string(),
        product.name.clone(),
        format_number(product.calories_per_100g),
    ];

    match &product.kind {
        ProductKind::RootVegetable {
            sugar_content,
            is_hard,
        } => {
            fields.push(format_number(*sugar_content));
            fields.push(is_hard.to_string());
        }
        ProductKind::LeafyVegetable { fiber_content } => {
            fields.push(format_number(*fiber_content));
        }
        ProductKind::FruitingVegetable {
            water_content_percent,
        } => {
            fields.push(format_number(*water_content_percent));
        }
        ProductKind::TuberVegetable { starch_content } => {
            fields.push(format_number(*starch_content));
        }
        ProductKind::Dressing { base_type } => {
            fields.push(base_type.clone());
        }
        ProductKind::Topping { is_crunchy } => {
            fields.push(is_crunchy.to_string());
        }
    }

    let separator = FIELD_SEPARATOR.to_string();
    fields.join(separator.as_str())
}

/// Decodes one catalog line. Fields past the variant's last one are ignored.
pub fn decode_product(line: &str) -> Result<Product, MalformedRecord> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < 3 {
        return Err(MalformedRecord::TooFewFields {
            expected: 3,
            found: fields.len(),
        });
    }

    let kind = match fields[0] {
        "RootVegetable" => {
            require_fields(&fields, 5)?;
            ProductKind::RootVegetable {
                sugar_content: number_field("sugar_content", fields[3])?,
                is_hard: bool_field("is_hard", fields[4])?,
            }
        }
        "LeafyVegetable" => {
            require_fields(&fields, 4)?;
            ProductKind::LeafyVegetable {
                fiber_content: number_field("fiber_content", fields[3])?,
            }
        }
        "FruitingVegetable" => {
            require_fields(&fields, 4)?;
            ProductKind::FruitingVegetable {
                water_content_percent: number_field("water_content_percent", fields[3])?,
            }
        }
        "TuberVegetable" => {
            require_fields(&fields, 4)?;
            ProductKind::TuberVegetable {
                starch_content: number_field("starch_content", fields[3])?,
            }
        }
        "Dressing" => {
            require_fields(&fields, 4)?;
            ProductKind::Dressing {
                base_type: fields[3].to_string(),
            }
        }
        "Topping" => {
            require_fields(&fields, 4)?;
            ProductKind::Topping {
                is_crunchy: bool_field("is_crunchy", fields[3])?,
            }
        }
        other => return Err(MalformedRecord::UnknownType(other.to_string())),
    };

    let calories = number_field("calories", fields[2])?;
    Ok(Product::new(fields[1], calories, kind))
}

pub fn encode_ingredient(ingredient: &SaladIngredient) -> String {
    format!(
        "{}{}{}",
        ingredient.product.name,
        FIELD_SEPARATOR,
        format_number(ingredient.weight_grams)
    )
}

/// Decodes one recipe line into the product name it references and a weight.
pub fn decode_ingredient(line: &str) -> Result<(String, f64), MalformedRecord> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != 2 {
        return Err(MalformedRecord::FieldCount {
            expected: 2,
            found: fields.len(),
        });
    }
    let weight = number_field("weight", fields[1])?;
    Ok((fields[0].to_string(), weight))
}

fn require_fields(fields: &[&str], expected: usize) -> Result<(), MalformedRecord> {
    if fields.len() < expected {
        return Err(MalformedRecord::TooFewFields {
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

fn number_field(field: &'static str, value: &str) -> Result<f64, MalformedRecord> {
    parse_number(value).ok_or_else(|| MalformedRecord::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn bool_field(field: &'static str, value: &str) -> Result<bool, MalformedRecord> {
    parse_bool(value).ok_or_else(|| MalformedRecord::InvalidBool {
        field,
        value: value.to_string(),
    })
}

/// Validates a number typed by a user before it reaches any store.
pub fn number_input(field: &'static str, value: &str) -> Result<f64, InvalidInput> {
    parse_number(value).ok_or_else(|| InvalidInput::NotANumber {
        field,
        value: value.to_string(),
    })
}

pub fn bool_input(field: &'static str, value: &str) -> Result<bool, InvalidInput> {
    parse_bool(value).ok_or_else(|| InvalidInput::NotABool {
        field,
        value: value.to_string(),
    })
}

/// Free text stored inside a catalog line (names, dressing base types).
///
/// The field separator and line breaks would split the record on disk.
pub fn validate_text_field(value: &str) -> Result<&str, InvalidInput> {
    let value = value.trim();
    if let Some(c) = value
        .chars()
        .find(|c| *c == FIELD_SEPARATOR || matches!(c, '\n' | '\r'))
    {
        return Err(InvalidInput::ReservedCharacter(c));
    }
    Ok(value)
}

pub fn validate_product_name(name: &str) -> Result<&str, InvalidInput> {
    let name = validate_text_field(name)?;
    if name.is_empty() {
        return Err(InvalidInput::EmptyName);
    }
    Ok(name)
}

/// Salad names become file names.
pub fn validate_salad_name(name: &str) -> Result<&str, InvalidInput> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InvalidInput::EmptyName);
    }
    if let Some(c) = name
        .chars()
        .find(|c| matches!(c, '/' | '\\' | '\0' | '\n' | '\r'))
    {
        return Err(InvalidInput::ReservedCharacter(c));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn all_variants() -> Vec<Product> {
        vec![
            Product::root_vegetable("Carrot", 41.0, 4.7, true),
            Product::leafy_vegetable("Spinach", 23.0, 2.2),
            Product::fruiting_vegetable("Tomato", 18.0, 94.5),
            Product::tuber_vegetable("Potato", 77.0, 15.0),
            Product::dressing("Ranch", 430.25, "creamy"),
            Product::topping("Croutons", 407.0, false),
        ]
    }

    #[test]
    fn test_encode_layout() {
        let line = encode_product(&Product::root_vegetable("Carrot", 41.0, 4.7, true));
        assert_eq!(line, "RootVegetable;Carrot;41.0;4.7;true");

        let line = encode_product(&Product::dressing("Ranch", 430.25, "creamy"));
        assert_eq!(line, "Dressing;Ranch;430.25;creamy");
    }

    #[test]
    fn test_roundtrip_every_variant() {
        for product in all_variants() {
            let decoded = decode_product(&encode_product(&product)).unwrap();
            assert_eq!(decoded, product);
        }
    }

    #[test]
    fn test_comma_decimal_separator() {
        let product = decode_product("LeafyVegetable;Kale;49,5;3,6").unwrap();
        assert_eq!(product, Product::leafy_vegetable("Kale", 49.5, 3.6));

        let reencoded = encode_product(&product);
        assert_eq!(reencoded, "LeafyVegetable;Kale;49.5;3.6");
        assert_eq!(decode_product(&reencoded).unwrap(), product);
    }

    #[test]
    fn test_decode_too_few_fields() {
        assert_eq!(
            decode_product("Topping;Seeds"),
            Err(MalformedRecord::TooFewFields {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            decode_product("RootVegetable;Beet;43;6.8"),
            Err(MalformedRecord::TooFewFields {
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn test_decode_unknown_tag() {
        assert_eq!(
            decode_product("Fruit;Apple;52;sweet"),
            Err(MalformedRecord::UnknownType("Fruit".into()))
        );
    }

    #[test]
    fn test_decode_bad_number_and_bool() {
        assert!(matches!(
            decode_product("TuberVegetable;Yam;lots;27"),
            Err(MalformedRecord::InvalidNumber {
                field: "calories",
                ..
            })
        ));
        assert!(matches!(
            decode_product("Topping;Nuts;600;maybe"),
            Err(MalformedRecord::InvalidBool {
                field: "is_crunchy",
                ..
            })
        ));
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let product = decode_product("Topping;Nuts;600;TRUE;extra").unwrap();
        assert_eq!(product, Product::topping("Nuts", 600.0, true));
    }

    #[test]
    fn test_ingredient_line() {
        let tomato = Arc::new(Product::fruiting_vegetable("Tomato", 18.0, 94.5));
        let line = encode_ingredient(&SaladIngredient::new(tomato, 120.0));
        assert_eq!(line, "Tomato;120.0");
        assert_eq!(decode_ingredient(&line).unwrap(), ("Tomato".to_string(), 120.0));
        assert_eq!(
            decode_ingredient("Tomato;12,5").unwrap(),
            ("Tomato".to_string(), 12.5)
        );
    }

    #[test]
    fn test_ingredient_line_errors() {
        assert_eq!(
            decode_ingredient("Tomato"),
            Err(MalformedRecord::FieldCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            decode_ingredient("Tomato;1;2"),
            Err(MalformedRecord::FieldCount {
                expected: 2,
                found: 3
            })
        );
        assert!(matches!(
            decode_ingredient("Tomato;heavy"),
            Err(MalformedRecord::InvalidNumber { field: "weight", .. })
        ));
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_number(" 12,75 "), Some(12.75));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_input_validation() {
        assert_eq!(number_input("weight", "150,5"), Ok(150.5));
        assert_eq!(
            number_input("weight", "x"),
            Err(InvalidInput::NotANumber {
                field: "weight",
                value: "x".into()
            })
        );
        assert!(bool_input("is_hard", "nope").is_err());
        assert_eq!(validate_product_name("  Kale "), Ok("Kale"));
        assert_eq!(validate_product_name("   "), Err(InvalidInput::EmptyName));
        assert_eq!(
            validate_product_name("a;b"),
            Err(InvalidInput::ReservedCharacter(';'))
        );
        assert_eq!(
            validate_salad_name("greek/summer"),
            Err(InvalidInput::ReservedCharacter('/'))
        );
        assert_eq!(validate_salad_name("Greek"), Ok("Greek"));
    }

    #[test]
    fn test_line_breaks_are_rejected() {
        assert_eq!(
            validate_product_name("Kale\nJunk"),
            Err(InvalidInput::ReservedCharacter('\n'))
        );
        assert_eq!(
            validate_product_name("Kale\rJunk"),
            Err(InvalidInput::ReservedCharacter('\r'))
        );
        assert_eq!(
            validate_salad_name("Greek\nSummer"),
            Err(InvalidInput::ReservedCharacter('\n'))
        );
        assert_eq!(
            validate_text_field("oil\r\nvinegar"),
            Err(InvalidInput::ReservedCharacter('\r'))
        );
        assert_eq!(validate_text_field(" creamy "), Ok("creamy"));
        assert_eq!(validate_text_field(""), Ok(""));
    }
}
