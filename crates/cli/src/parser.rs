//! Catalog and order JSON parser.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;
use u_pallet::core::{Dimensions, FragilityClass};
use u_pallet::stack::{BoxSpec, OrderLine, ProductCatalog};

/// Errors that can occur when reading input files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),
}

/// Parser for product master data and order files.
#[derive(Debug, Default)]
pub struct InputParser;

impl InputParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a product catalog from a JSON file.
    pub fn parse_catalog_file(&self, path: impl AsRef<Path>) -> Result<ProductCatalog, ParseError> {
        let content = fs::read_to_string(path)?;
        self.parse_catalog_json(&content)
    }

    /// Parses a product catalog from a JSON array of product records.
    pub fn parse_catalog_json(&self, json: &str) -> Result<ProductCatalog, ParseError> {
        let records: Vec<RawProduct> = serde_json::from_str(json)?;
        let mut catalog = ProductCatalog::new();

        for (index, record) in records.into_iter().enumerate() {
            let sku = text(&record.reference);
            if sku.is_empty() {
                return Err(ParseError::InvalidFormat(format!(
                    "product record {} has no REF",
                    index + 1
                )));
            }

            let fragility = parse_fragility(&sku, &record.resistance);
            catalog.insert_product(sku.clone(), record.name.trim());

            let slots = [
                ("box1", &record.box1_units, &record.box1_weight, &record.box1_orientation, &record.box1_dimensions),
                ("box2", &record.box2_units, &record.box2_weight, &record.box2_orientation, &record.box2_dimensions),
            ];
            for (variant, units, weight, orientation, dimensions) in slots {
                let dims = text(dimensions);
                if dims.is_empty() {
                    continue;
                }

                let spec = BoxSpec::new(
                    number(units) as u32,
                    number(weight),
                    parse_dimensions(&sku, variant, &dims),
                )
                .with_rotatable(text(orientation).eq_ignore_ascii_case("both"))
                .with_fragility(fragility);
                catalog.insert_variant(sku.clone(), variant, spec);
            }
        }

        for error in catalog.invalid_variants() {
            log::warn!("Catalog entry will be skipped: {}", error);
        }

        Ok(catalog)
    }

    /// Parses order lines from a JSON file.
    pub fn parse_order_file(&self, path: impl AsRef<Path>) -> Result<Vec<OrderLine>, ParseError> {
        let content = fs::read_to_string(path)?;
        self.parse_order_json(&content)
    }

    /// Parses order lines from a JSON array of `{ "sku", "box", "units" }`.
    pub fn parse_order_json(&self, json: &str) -> Result<Vec<OrderLine>, ParseError> {
        let raw: Vec<RawOrderLine> = serde_json::from_str(json)?;

        raw.into_iter()
            .enumerate()
            .map(|(index, line)| {
                let sku = text(&line.sku);
                if sku.is_empty() {
                    return Err(ParseError::InvalidFormat(format!(
                        "order line {} has no sku",
                        index + 1
                    )));
                }
                let units = number(&line.units);
                Ok(OrderLine::new(
                    sku,
                    text(&line.variant).to_lowercase(),
                    if units > 0.0 { units.ceil() as u64 } else { 0 },
                ))
            })
            .collect()
    }
}

/// Numeric cell: numbers as-is, numeric strings parsed, anything else 0.
fn number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Text cell, trimmed; numbers keep their JSON spelling.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn parse_fragility(sku: &str, label: &str) -> FragilityClass {
    if label.trim().is_empty() {
        return FragilityClass::default();
    }
    label.parse().unwrap_or_else(|_| {
        log::warn!(
            "Product {}: unknown resistance level '{}', treating as strong",
            sku,
            label.trim()
        );
        FragilityClass::default()
    })
}

/// Unparseable dimensions become zero so the variant fails validation.
fn parse_dimensions(sku: &str, variant: &str, dims: &str) -> Dimensions {
    dims.parse().unwrap_or_else(|e| {
        log::warn!("Product {}/{}: {}", sku, variant, e);
        Dimensions::new(0.0, 0.0, 0.0)
    })
}

/// Product record as exported from the master data sheet.
#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(rename = "REF", default)]
    reference: Value,

    #[serde(rename = "PRODUCT", default)]
    name: String,

    #[serde(rename = "Resistance Level (Fragile / Medium / Strong)", default)]
    resistance: String,

    #[serde(rename = "Box 1 Units", default)]
    box1_units: Value,
    #[serde(rename = "Box 1 Weight (kg)", default)]
    box1_weight: Value,
    #[serde(rename = "Box 1 Orientation (Horizontal / Both)", default)]
    box1_orientation: Value,
    #[serde(rename = "Box 1 Dimensions (cm) (LxDxH)", default)]
    box1_dimensions: Value,

    #[serde(rename = "Box 2 Units", default)]
    box2_units: Value,
    #[serde(rename = "Box 2 Weight (kg)", default)]
    box2_weight: Value,
    #[serde(rename = "Box 2 Orientation (Horizontal / Both)", default)]
    box2_orientation: Value,
    #[serde(rename = "Box 2 Dimensions (cm) (LxDxH)", default)]
    box2_dimensions: Value,
}

/// Order line as parsed from JSON.
#[derive(Debug, Deserialize)]
struct RawOrderLine {
    sku: Value,
    #[serde(rename = "box", default)]
    variant: Value,
    #[serde(default)]
    units: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_pallet::core::Error;

    const CATALOG: &str = r#"[
        {
            "REF": "A100",
            "PRODUCT": "Olive oil 1L",
            "Resistance Level (Fragile / Medium / Strong)": "Medium",
            "Box 1 Units": 12,
            "Box 1 Weight (kg)": "11.5",
            "Box 1 Orientation (Horizontal / Both)": "Both",
            "Box 1 Dimensions (cm) (LxDxH)": "40 x 30 x 25",
            "Box 2 Units": "",
            "Box 2 Weight (kg)": "",
            "Box 2 Orientation (Horizontal / Both)": "",
            "Box 2 Dimensions (cm) (LxDxH)": ""
        },
        {
            "REF": 2040,
            "PRODUCT": "Crystal vase",
            "Resistance Level (Fragile / Medium / Strong)": "FRAGILE",
            "Box 1 Units": 1,
            "Box 1 Weight (kg)": 2,
            "Box 1 Orientation (Horizontal / Both)": "Horizontal",
            "Box 1 Dimensions (cm) (LxDxH)": "30×30×40",
            "Box 2 Units": 4,
            "Box 2 Weight (kg)": "n/a",
            "Box 2 Orientation (Horizontal / Both)": "horizontal",
            "Box 2 Dimensions (cm) (LxDxH)": "60X60X40"
        }
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = InputParser::new().parse_catalog_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let oil = catalog.resolve("A100", "box1").unwrap();
        assert_eq!(oil.units_per_box, 12);
        assert_eq!(oil.weight, 11.5);
        assert_eq!(oil.dimensions, Dimensions::new(40.0, 30.0, 25.0));
        assert!(oil.rotatable);
        assert_eq!(oil.fragility, FragilityClass::Medium);
        assert_eq!(catalog.product("A100").unwrap().name, "Olive oil 1L");

        // Empty dimensions drop the slot
        assert!(matches!(
            catalog.resolve("A100", "box2"),
            Err(Error::UnknownBoxVariant { .. })
        ));

        let vase = catalog.resolve("2040", "box1").unwrap();
        assert!(!vase.rotatable);
        assert_eq!(vase.fragility, FragilityClass::Fragile);
        assert_eq!(vase.dimensions, Dimensions::new(30.0, 30.0, 40.0));
    }

    #[test]
    fn test_non_numeric_weight_becomes_invalid_variant() {
        let catalog = InputParser::new().parse_catalog_json(CATALOG).unwrap();
        assert!(matches!(
            catalog.resolve("2040", "box2"),
            Err(Error::InvalidBoxSpec { ref variant, .. }) if variant == "box2"
        ));
        assert_eq!(catalog.invalid_variants().len(), 1);
    }

    #[test]
    fn test_missing_ref_rejected() {
        let json = r#"[{ "PRODUCT": "Nameless" }]"#;
        let err = InputParser::new().parse_catalog_json(json).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_order() {
        let json = r#"[
            { "sku": "A100", "box": " Box1 ", "units": 120 },
            { "sku": 2040, "box": "box2", "units": "8" },
            { "sku": "A100", "box": "box1", "units": "many" }
        ]"#;
        let lines = InputParser::new().parse_order_json(json).unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], OrderLine::new("A100", "box1", 120));
        assert_eq!(lines[1], OrderLine::new("2040", "box2", 8));
        assert_eq!(lines[2].units, 0);
    }

    #[test]
    fn test_invalid_json() {
        let err = InputParser::new().parse_order_json("{ not json").unwrap_err();
        assert!(matches!(err, ParseError::JsonError(_)));
    }
}
