//! Physical box instances produced by expanding order lines.

use u_pallet_core::{Footprint, FragilityClass, SkuId, VariantId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a box instance within one packing run.
///
/// Assigned in expansion order, so two structurally identical boxes are
/// still distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstanceId(pub usize);

/// One physical box to be packed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxInstance {
    /// Stable instance ID.
    id: InstanceId,

    /// Product the box belongs to.
    sku: SkuId,

    /// Catalog box option the box came from.
    variant: VariantId,

    /// Product units carried by the box.
    units_per_box: u32,

    /// Gross weight of the box in kilograms.
    weight: f64,

    /// Footprint as given in the catalog.
    footprint: Footprint,

    /// Height the box adds to a layer, in centimeters.
    stack_height: f64,

    /// Whether the footprint may be rotated by 90°.
    rotatable: bool,

    /// Stacking hint.
    fragility: FragilityClass,
}

impl BoxInstance {
    /// Creates a box instance with default attributes (1 unit, 0 kg,
    /// not rotatable, strong).
    pub fn new(
        id: usize,
        sku: impl Into<SkuId>,
        variant: impl Into<VariantId>,
        footprint: Footprint,
        stack_height: f64,
    ) -> Self {
        Self {
            id: InstanceId(id),
            sku: sku.into(),
            variant: variant.into(),
            units_per_box: 1,
            weight: 0.0,
            footprint,
            stack_height,
            rotatable: false,
            fragility: FragilityClass::default(),
        }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets whether the footprint may rotate.
    pub fn with_rotatable(mut self, rotatable: bool) -> Self {
        self.rotatable = rotatable;
        self
    }

    /// Sets the fragility class.
    pub fn with_fragility(mut self, fragility: FragilityClass) -> Self {
        self.fragility = fragility;
        self
    }

    /// Sets the number of product units in the box.
    pub fn with_units_per_box(mut self, units: u32) -> Self {
        self.units_per_box = units;
        self
    }

    /// Returns the instance ID.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Returns the SKU.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// Returns the box variant key.
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Returns true if both boxes come from the same SKU and variant.
    pub fn same_kind(&self, other: &BoxInstance) -> bool {
        self.sku == other.sku && self.variant == other.variant
    }

    /// Returns the units carried.
    pub fn units_per_box(&self) -> u32 {
        self.units_per_box
    }

    /// Returns the weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns the catalog footprint.
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Returns the stacking height.
    pub fn stack_height(&self) -> f64 {
        self.stack_height
    }

    /// Returns whether the box may rotate.
    pub fn is_rotatable(&self) -> bool {
        self.rotatable
    }

    /// Returns the fragility class.
    pub fn fragility(&self) -> FragilityClass {
        self.fragility
    }

    /// Human-readable `sku/variant` label for diagnostics.
    pub fn label(&self) -> String {
        format!("{}/{}", self.sku, self.variant)
    }
}
