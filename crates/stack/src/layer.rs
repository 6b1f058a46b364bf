//! Layer assembly: homogeneous grid layers and mixed guillotine layers.

use crate::grid::solve_grid;
use crate::guillotine::pack_mixed;
use crate::instance::BoxInstance;
use std::collections::BTreeMap;
use u_pallet_core::{Error, Footprint, Placement, Result, SkuId, VariantId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which sub-algorithm built a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayerKind {
    /// Every box shares one SKU and variant; laid out by the grid solver.
    Homogeneous,
    /// Boxes of several kinds; laid out by the guillotine packer.
    Mixed,
}

/// A box instance with its position in a layer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedBox {
    /// The placed box.
    pub instance: BoxInstance,
    /// Orientation and origin within the layer.
    pub placement: Placement,
}

/// One horizontal tier of boxes on a pallet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layer {
    /// Sub-algorithm that produced the layer.
    pub kind: LayerKind,
    /// Placed boxes in placement order.
    pub boxes: Vec<PlacedBox>,
}

impl Layer {
    /// Tallest box in the layer, in centimeters.
    pub fn height(&self) -> f64 {
        self.boxes
            .iter()
            .map(|b| b.instance.stack_height())
            .fold(0.0, f64::max)
    }

    /// Sum of box weights, in kilograms.
    pub fn weight(&self) -> f64 {
        self.boxes.iter().map(|b| b.instance.weight()).sum()
    }

    /// Number of boxes.
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Product units carried by the layer.
    pub fn units(&self) -> u64 {
        self.boxes
            .iter()
            .map(|b| u64::from(b.instance.units_per_box()))
            .sum()
    }

    /// Boxes per (SKU, variant).
    pub fn tally(&self) -> BTreeMap<(SkuId, VariantId), LayerTally> {
        let mut tally: BTreeMap<(SkuId, VariantId), LayerTally> = BTreeMap::new();
        for b in &self.boxes {
            let entry = tally
                .entry((b.instance.sku().to_string(), b.instance.variant().to_string()))
                .or_default();
            entry.boxes += 1;
            entry.units += u64::from(b.instance.units_per_box());
        }
        tally
    }

    /// Covered footprint area.
    pub fn covered_area(&self) -> f64 {
        self.boxes.iter().map(|b| b.placement.footprint.area()).sum()
    }
}

/// Box and unit counts for one SKU/variant within a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerTally {
    /// Boxes.
    pub boxes: usize,
    /// Product units.
    pub units: u64,
}

/// Candidate layer over an instance arena.
///
/// Indices refer to the arena passed to [`assemble_layer`]; both lists keep
/// queue order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPlan {
    /// Sub-algorithm used.
    pub kind: LayerKind,
    /// Arena indices placed in this layer with their placement.
    pub placed: Vec<(usize, Placement)>,
    /// Arena indices left for later layers.
    pub not_placed: Vec<usize>,
}

impl LayerPlan {
    /// Returns true if nothing could be placed.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Height of the candidate layer.
    pub fn height(&self, instances: &[BoxInstance]) -> f64 {
        self.placed
            .iter()
            .map(|(idx, _)| instances[*idx].stack_height())
            .fold(0.0, f64::max)
    }

    /// Weight of the candidate layer.
    pub fn weight(&self, instances: &[BoxInstance]) -> f64 {
        self.placed
            .iter()
            .map(|(idx, _)| instances[*idx].weight())
            .sum()
    }

    /// Materializes the layer by cloning the placed instances.
    pub fn to_layer(&self, instances: &[BoxInstance]) -> Layer {
        Layer {
            kind: self.kind,
            boxes: self
                .placed
                .iter()
                .map(|(idx, placement)| PlacedBox {
                    instance: instances[*idx].clone(),
                    placement: *placement,
                })
                .collect(),
        }
    }
}

/// Builds the next candidate layer from the front of the queue.
///
/// When every queued box shares one SKU and variant, the grid solver sizes
/// the layer and the first `min(count, queue.len())` boxes are taken.
/// Otherwise the whole queue goes through the guillotine packer.
///
/// # Arguments
///
/// * `instances` - Instance arena, fragility-ordered
/// * `queue` - Arena indices still to be packed, in packing order
/// * `pallet` - Pallet footprint
pub fn assemble_layer(
    instances: &[BoxInstance],
    queue: &[usize],
    pallet: Footprint,
) -> Result<LayerPlan> {
    let Some(&head) = queue.first() else {
        return Ok(LayerPlan {
            kind: LayerKind::Mixed,
            placed: Vec::new(),
            not_placed: Vec::new(),
        });
    };
    let first = &instances[head];

    if queue.iter().all(|&idx| instances[idx].same_kind(first)) {
        let plan = solve_grid(first.footprint(), first.is_rotatable(), pallet).map_err(|e| {
            Error::InvalidBoxSpec {
                sku: first.sku().to_string(),
                variant: first.variant().to_string(),
                reason: e.to_string(),
            }
        })?;

        let take = plan.count().min(queue.len());
        let placed = queue[..take]
            .iter()
            .copied()
            .zip(plan.positions())
            .collect();

        return Ok(LayerPlan {
            kind: LayerKind::Homogeneous,
            placed,
            not_placed: queue[take..].to_vec(),
        });
    }

    let outcome = pack_mixed(queue.iter().map(|&idx| &instances[idx]), pallet);
    Ok(LayerPlan {
        kind: LayerKind::Mixed,
        placed: outcome
            .placed
            .into_iter()
            .map(|(pos, placement)| (queue[pos], placement))
            .collect(),
        not_placed: outcome.not_placed.into_iter().map(|pos| queue[pos]).collect(),
    })
}
