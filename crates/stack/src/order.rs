//! Order lines and their expansion into box instances.
//!
//! This module is the thin adapter between validated order data and the
//! packing engine.
//!
//! # Components
//!
//! - [`OrderLine`]: one ordered SKU/variant with a unit count
//! - [`PackIssue`]: a line that was skipped, with the reason
//! - [`expand_order`]: turns order lines into [`BoxInstance`]s, one per physical box

use crate::catalog::ProductCatalog;
use crate::instance::BoxInstance;
use u_pallet_core::{Error, IssuePolicy, Result, SkuId, VariantId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One line of a customer order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderLine {
    /// Ordered product.
    pub sku: SkuId,
    /// Box variant the product ships in.
    pub variant: VariantId,
    /// Ordered product units.
    pub units: u64,
}

impl OrderLine {
    /// Creates an order line.
    pub fn new(sku: impl Into<SkuId>, variant: impl Into<VariantId>, units: u64) -> Self {
        Self {
            sku: sku.into(),
            variant: variant.into(),
            units,
        }
    }
}

/// An order line that was skipped during expansion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackIssue {
    /// Position of the line in the order (0-based).
    pub line_index: usize,
    /// The skipped line.
    pub line: OrderLine,
    /// Boxes the line would have produced, when the capacity is known.
    pub boxes: Option<u64>,
    /// Why the line was skipped.
    #[cfg_attr(feature = "serde", serde(with = "error_text"))]
    pub error: Error,
}

impl PackIssue {
    /// Human-readable reason.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// Instances produced by expansion plus the lines that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// Box instances in order-line order, IDs `0..n`.
    pub instances: Vec<BoxInstance>,
    /// Skipped lines.
    pub issues: Vec<PackIssue>,
}

impl Expansion {
    /// Boxes belonging to skipped lines whose capacity was known.
    pub fn skipped_boxes(&self) -> u64 {
        self.issues.iter().filter_map(|i| i.boxes).sum()
    }
}

/// Expands order lines into one [`BoxInstance`] per physical box.
///
/// Each line yields `ceil(units / units_per_box)` identical instances.
/// Lines naming an unknown SKU or variant, or an invalid catalog entry, are
/// skipped and reported under [`IssuePolicy::Skip`]; under
/// [`IssuePolicy::Fail`] the first such line aborts with its error.
///
/// # Arguments
///
/// * `catalog` - Product master data snapshot
/// * `lines` - Validated order lines
/// * `policy` - Handling of problematic lines
pub fn expand_order(
    catalog: &ProductCatalog,
    lines: &[OrderLine],
    policy: IssuePolicy,
) -> Result<Expansion> {
    let mut expansion = Expansion::default();

    for (line_index, line) in lines.iter().enumerate() {
        let spec = match catalog.resolve(&line.sku, &line.variant) {
            Ok(spec) => spec,
            Err(error) => {
                if policy == IssuePolicy::Fail {
                    return Err(error);
                }
                log::warn!("Skipping order line {}: {}", line_index + 1, error);

                let boxes = catalog
                    .product(&line.sku)
                    .and_then(|p| p.variants.get(&line.variant))
                    .filter(|spec| spec.units_per_box > 0)
                    .map(|spec| spec.boxes_for(line.units));
                expansion.issues.push(PackIssue {
                    line_index,
                    line: line.clone(),
                    boxes,
                    error,
                });
                continue;
            }
        };

        let count = spec.boxes_for(line.units);
        if count == 0 {
            log::debug!("Order line {} has no units, nothing to pack", line_index + 1);
        }

        let footprint = spec.dimensions.footprint();
        for _ in 0..count {
            let id = expansion.instances.len();
            expansion.instances.push(
                BoxInstance::new(
                    id,
                    line.sku.clone(),
                    line.variant.clone(),
                    footprint,
                    spec.dimensions.height,
                )
                .with_weight(spec.weight)
                .with_rotatable(spec.rotatable)
                .with_fragility(spec.fragility)
                .with_units_per_box(spec.units_per_box),
            );
        }
    }

    Ok(expansion)
}

#[cfg(feature = "serde")]
mod error_text {
    use serde::{Deserialize, Deserializer, Serializer};
    use u_pallet_core::Error;

    pub fn serialize<S: Serializer>(error: &Error, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&error.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Error, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Error::Internal(text))
    }
}
