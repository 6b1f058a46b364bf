//! Product catalog: SKUs and their box variants.

use std::collections::BTreeMap;
use u_pallet_core::{Dimensions, Error, FragilityClass, Result, SkuId, VariantId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One way a product is boxed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxSpec {
    /// Product units per box.
    pub units_per_box: u32,
    /// Gross box weight in kilograms.
    pub weight: f64,
    /// Box dimensions in centimeters.
    pub dimensions: Dimensions,
    /// Whether the footprint may rotate on the pallet.
    pub rotatable: bool,
    /// Stacking hint.
    pub fragility: FragilityClass,
}

impl BoxSpec {
    /// Creates a box spec (not rotatable, strong).
    pub fn new(units_per_box: u32, weight: f64, dimensions: Dimensions) -> Self {
        Self {
            units_per_box,
            weight,
            dimensions,
            rotatable: false,
            fragility: FragilityClass::default(),
        }
    }

    /// Sets rotatability.
    pub fn with_rotatable(mut self, rotatable: bool) -> Self {
        self.rotatable = rotatable;
        self
    }

    /// Sets the fragility class.
    pub fn with_fragility(mut self, fragility: FragilityClass) -> Self {
        self.fragility = fragility;
        self
    }

    /// Number of boxes needed for `units` product units.
    pub fn boxes_for(&self, units: u64) -> u64 {
        if self.units_per_box == 0 {
            return 0;
        }
        units.div_ceil(u64::from(self.units_per_box))
    }

    /// Rejects non-positive capacity, weight or dimensions.
    pub fn validate(&self, sku: &str, variant: &str) -> Result<()> {
        let invalid = |reason: String| Error::InvalidBoxSpec {
            sku: sku.to_string(),
            variant: variant.to_string(),
            reason,
        };

        if self.units_per_box == 0 {
            return Err(invalid("units per box must be positive".into()));
        }
        if !(self.weight > 0.0) {
            return Err(invalid(format!("weight {} kg must be positive", self.weight)));
        }
        let d = &self.dimensions;
        if !(d.length > 0.0 && d.width > 0.0 && d.height > 0.0) {
            return Err(invalid(format!(
                "dimensions {}x{}x{} cm must be positive",
                d.length, d.width, d.height
            )));
        }
        Ok(())
    }
}

/// A product with its box variants.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Box variants keyed by variant ID.
    pub variants: BTreeMap<VariantId, BoxSpec>,
}

/// Immutable snapshot of the product master data.
///
/// Built once before a packing run and passed by reference to the
/// entry point; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductCatalog {
    products: BTreeMap<SkuId, Product>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or renames) a product without variants.
    pub fn with_product(mut self, sku: impl Into<SkuId>, name: impl Into<String>) -> Self {
        self.insert_product(sku, name);
        self
    }

    /// Adds a box variant, creating the product if needed.
    pub fn with_variant(
        mut self,
        sku: impl Into<SkuId>,
        variant: impl Into<VariantId>,
        spec: BoxSpec,
    ) -> Self {
        self.insert_variant(sku, variant, spec);
        self
    }

    /// Adds (or renames) a product.
    pub fn insert_product(&mut self, sku: impl Into<SkuId>, name: impl Into<String>) {
        self.products.entry(sku.into()).or_default().name = name.into();
    }

    /// Adds a box variant, creating the product if needed.
    pub fn insert_variant(
        &mut self,
        sku: impl Into<SkuId>,
        variant: impl Into<VariantId>,
        spec: BoxSpec,
    ) {
        self.products
            .entry(sku.into())
            .or_default()
            .variants
            .insert(variant.into(), spec);
    }

    /// Looks up a product.
    pub fn product(&self, sku: &str) -> Option<&Product> {
        self.products.get(sku)
    }

    /// Resolves a variant and validates it.
    ///
    /// Unknown SKUs and variants are reported as errors rather than panics.
    pub fn resolve(&self, sku: &str, variant: &str) -> Result<&BoxSpec> {
        let product = self
            .products
            .get(sku)
            .ok_or_else(|| Error::UnknownSku(sku.to_string()))?;
        let spec = product
            .variants
            .get(variant)
            .ok_or_else(|| Error::UnknownBoxVariant {
                sku: sku.to_string(),
                variant: variant.to_string(),
            })?;
        spec.validate(sku, variant)?;
        Ok(spec)
    }

    /// Validates every variant, returning the ones that would be skipped.
    pub fn invalid_variants(&self) -> Vec<Error> {
        self.products
            .iter()
            .flat_map(|(sku, product)| {
                product
                    .variants
                    .iter()
                    .filter_map(move |(variant, spec)| spec.validate(sku, variant).err())
            })
            .collect()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates products in SKU order.
    pub fn iter(&self) -> impl Iterator<Item = (&SkuId, &Product)> {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> BoxSpec {
        BoxSpec::new(10, 5.0, Dimensions::new(40.0, 30.0, 20.0))
    }

    #[test]
    fn test_boxes_for_rounds_up() {
        let s = spec();
        assert_eq!(s.boxes_for(100), 10);
        assert_eq!(s.boxes_for(101), 11);
        assert_eq!(s.boxes_for(1), 1);
        assert_eq!(s.boxes_for(0), 0);
    }

    #[test]
    fn test_resolve() {
        let catalog = ProductCatalog::new()
            .with_product("A1", "Olive oil 1L")
            .with_variant("A1", "box1", spec());

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.product("A1").unwrap().name, "Olive oil 1L");
        assert!(catalog.resolve("A1", "box1").is_ok());
        assert_eq!(
            catalog.resolve("ZZ", "box1"),
            Err(Error::UnknownSku("ZZ".into()))
        );
        assert!(matches!(
            catalog.resolve("A1", "box2"),
            Err(Error::UnknownBoxVariant { .. })
        ));
    }

    #[test]
    fn test_invalid_variants_reported() {
        let catalog = ProductCatalog::new()
            .with_variant("A1", "box1", spec())
            .with_variant("A1", "box2", BoxSpec::new(0, 5.0, Dimensions::new(40.0, 30.0, 20.0)))
            .with_variant("B2", "box1", BoxSpec::new(6, 0.0, Dimensions::new(40.0, 30.0, 20.0)))
            .with_variant("C3", "box1", BoxSpec::new(6, 2.0, Dimensions::new(40.0, 0.0, 20.0)));

        let invalid = catalog.invalid_variants();
        assert_eq!(invalid.len(), 3);
        assert!(invalid
            .iter()
            .all(|e| matches!(e, Error::InvalidBoxSpec { .. })));
        assert!(matches!(
            catalog.resolve("A1", "box2"),
            Err(Error::InvalidBoxSpec { .. })
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = ProductCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.invalid_variants().is_empty());
    }
}
