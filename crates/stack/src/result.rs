//! Stacking results: pallets, run outcome and report summaries.

use crate::layer::{Layer, LayerKind};
use crate::order::PackIssue;
use u_pallet_core::{SkuId, VariantId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pallet with its committed layers, bottom first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pallet {
    /// Layers in stacking order.
    layers: Vec<Layer>,
    /// Cumulative layer height in centimeters.
    height: f64,
    /// Gross weight in kilograms, tare included.
    gross_weight: f64,
    /// Empty pallet weight in kilograms.
    tare_weight: f64,
}

impl Pallet {
    /// Opens an empty pallet.
    pub fn new(tare_weight: f64) -> Self {
        Self {
            layers: Vec::new(),
            height: 0.0,
            gross_weight: tare_weight,
            tare_weight,
        }
    }

    /// Commits a layer and updates the running totals.
    pub(crate) fn push_layer(&mut self, layer: Layer) {
        self.height += layer.height();
        self.gross_weight += layer.weight();
        self.layers.push(layer);
    }

    /// Layers, bottom first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns true if no layer has been committed.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Cumulative height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Gross weight, tare included.
    pub fn gross_weight(&self) -> f64 {
        self.gross_weight
    }

    /// Weight of the goods only.
    pub fn net_weight(&self) -> f64 {
        self.gross_weight - self.tare_weight
    }

    /// Number of boxes on the pallet.
    pub fn box_count(&self) -> usize {
        self.layers.iter().map(Layer::box_count).sum()
    }

    /// Product units on the pallet.
    pub fn units(&self) -> u64 {
        self.layers.iter().map(Layer::units).sum()
    }

    /// Report view of the pallet.
    pub fn summary(&self, index: usize) -> PalletSummary {
        let layers = self
            .layers
            .iter()
            .enumerate()
            .map(|(layer_index, layer)| LayerSummary {
                index: layer_index,
                kind: layer.kind,
                height: layer.height(),
                weight: layer.weight(),
                lines: layer
                    .tally()
                    .into_iter()
                    .map(|((sku, variant), tally)| TallyLine {
                        sku,
                        variant,
                        boxes: tally.boxes,
                        units: tally.units,
                    })
                    .collect(),
            })
            .collect();

        PalletSummary {
            index,
            layers,
            boxes: self.box_count(),
            units: self.units(),
            gross_weight: self.gross_weight,
            height: self.height,
        }
    }
}

/// Boxes and units of one SKU/variant in a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TallyLine {
    /// Product.
    pub sku: SkuId,
    /// Box variant.
    pub variant: VariantId,
    /// Boxes.
    pub boxes: usize,
    /// Product units.
    pub units: u64,
}

/// Report view of one layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerSummary {
    /// Layer position on the pallet (0 = bottom).
    pub index: usize,
    /// Sub-algorithm that built the layer.
    pub kind: LayerKind,
    /// Layer height.
    pub height: f64,
    /// Layer weight.
    pub weight: f64,
    /// Tally per SKU/variant, sorted by SKU.
    pub lines: Vec<TallyLine>,
}

/// Report view of one pallet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PalletSummary {
    /// Pallet position in the shipment (0-based).
    pub index: usize,
    /// Layers, bottom first.
    pub layers: Vec<LayerSummary>,
    /// Boxes on the pallet.
    pub boxes: usize,
    /// Product units on the pallet.
    pub units: u64,
    /// Gross weight, tare included.
    pub gross_weight: f64,
    /// Stack height.
    pub height: f64,
}

/// Result of a packing run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackResult {
    /// Pallets in loading order.
    pub pallets: Vec<Pallet>,

    /// Order lines skipped during expansion.
    pub issues: Vec<PackIssue>,

    /// Box instances handed to the stacker.
    pub total_boxes: usize,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl PackResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pallets used.
    pub fn pallet_count(&self) -> usize {
        self.pallets.len()
    }

    /// Boxes stacked across all pallets.
    pub fn placed_boxes(&self) -> usize {
        self.pallets.iter().map(Pallet::box_count).sum()
    }

    /// Returns true if no order line was skipped.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Gross weight of the whole shipment.
    pub fn total_weight(&self) -> f64 {
        self.pallets.iter().map(Pallet::gross_weight).sum()
    }

    /// Per-pallet report views.
    pub fn pallet_summaries(&self) -> Vec<PalletSummary> {
        self.pallets
            .iter()
            .enumerate()
            .map(|(i, p)| p.summary(i))
            .collect()
    }

    /// Order-level summary.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from(self)
    }
}

/// Order resume.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderSummary {
    /// Pallets used.
    pub pallets: usize,
    /// Boxes stacked.
    pub boxes: usize,
    /// Product units stacked.
    pub units: u64,
    /// Gross shipment weight.
    pub total_weight: f64,
    /// Skipped order lines.
    pub issues: usize,
    /// Computation time in milliseconds.
    pub time_ms: u64,
}

impl From<&PackResult> for OrderSummary {
    fn from(result: &PackResult) -> Self {
        Self {
            pallets: result.pallet_count(),
            boxes: result.placed_boxes(),
            units: result.pallets.iter().map(Pallet::units).sum(),
            total_weight: result.total_weight(),
            issues: result.issues.len(),
            time_ms: result.computation_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::BoxInstance;
    use crate::layer::PlacedBox;
    use approx::assert_relative_eq;
    use u_pallet_core::{Footprint, Orientation, Placement};

    fn layer(sku: &str, n: usize, height: f64) -> Layer {
        let fp = Footprint::new(40.0, 30.0);
        Layer {
            kind: LayerKind::Homogeneous,
            boxes: (0..n)
                .map(|i| PlacedBox {
                    instance: BoxInstance::new(i, sku, "box1", fp, height)
                        .with_weight(5.0)
                        .with_units_per_box(12),
                    placement: Placement::new(i as f64 * 40.0, 0.0, Orientation::Natural, fp),
                })
                .collect(),
        }
    }

    #[test]
    fn test_pallet_running_totals() {
        let mut pallet = Pallet::new(25.0);
        assert!(pallet.is_empty());
        assert_relative_eq!(pallet.gross_weight(), 25.0);

        pallet.push_layer(layer("A", 3, 20.0));
        pallet.push_layer(layer("B", 2, 35.0));

        assert_relative_eq!(pallet.height(), 55.0);
        assert_relative_eq!(pallet.gross_weight(), 50.0);
        assert_relative_eq!(pallet.net_weight(), 25.0);
        assert_eq!(pallet.box_count(), 5);
        assert_eq!(pallet.units(), 60);
    }

    #[test]
    fn test_pallet_summary() {
        let mut pallet = Pallet::new(25.0);
        pallet.push_layer(layer("A", 3, 20.0));

        let summary = pallet.summary(2);
        assert_eq!(summary.index, 2);
        assert_eq!(summary.layers.len(), 1);
        assert_eq!(
            summary.layers[0].lines,
            vec![TallyLine {
                sku: "A".into(),
                variant: "box1".into(),
                boxes: 3,
                units: 36,
            }]
        );
        assert_eq!(summary.boxes, 3);
        assert_relative_eq!(summary.gross_weight, 40.0);
    }

    #[test]
    fn test_order_summary() {
        let mut first = Pallet::new(25.0);
        first.push_layer(layer("A", 6, 20.0));
        let mut second = Pallet::new(25.0);
        second.push_layer(layer("A", 2, 20.0));

        let result = PackResult {
            pallets: vec![first, second],
            total_boxes: 8,
            computation_time_ms: 3,
            ..Default::default()
        };

        let summary = result.summary();
        assert_eq!(summary.pallets, 2);
        assert_eq!(summary.boxes, 8);
        assert_eq!(summary.units, 96);
        assert_relative_eq!(summary.total_weight, 25.0 * 2.0 + 8.0 * 5.0);
        assert_eq!(summary.issues, 0);
        assert!(result.is_clean());
        assert_eq!(result.pallet_summaries().len(), 2);
    }
}
