//! Guillotine packer for mixed-SKU layers.
//!
//! Keeps a list of free regions, starting with the whole pallet footprint.
//! Boxes are tried in input order; each one goes into the first region (in
//! list order) that accepts it, natural orientation before rotated. The used
//! region is replaced by two regions appended to the end of the list: the
//! strip to the right of the box and the strip below it, even when one of
//! them has no area. Regions are never merged and placement is never
//! revisited.

use crate::instance::BoxInstance;
use u_pallet_core::{Footprint, Placement, Rect};

/// Free-region state for one layer-packing attempt.
#[derive(Debug, Clone)]
pub struct GuillotinePacker {
    regions: Vec<Rect>,
}

impl GuillotinePacker {
    /// Starts with a single region covering the footprint.
    pub fn new(pallet: Footprint) -> Self {
        Self {
            regions: vec![Rect::covering(&pallet)],
        }
    }

    /// Current free regions in list order.
    pub fn free_regions(&self) -> &[Rect] {
        &self.regions
    }

    /// Places a box in the first region that accepts it, or returns `None`.
    pub fn try_place(&mut self, item: &BoxInstance) -> Option<Placement> {
        let candidates = item.footprint().orientations(item.is_rotatable());

        let (region_idx, orientation, oriented) =
            self.regions.iter().enumerate().find_map(|(idx, region)| {
                candidates
                    .iter()
                    .find(|(_, oriented)| region.accepts(oriented))
                    .map(|(orientation, oriented)| (idx, *orientation, *oriented))
            })?;

        let region = self.regions.remove(region_idx);
        self.regions.push(Rect::new(
            region.x + oriented.length,
            region.y,
            region.width - oriented.length,
            oriented.width,
        ));
        self.regions.push(Rect::new(
            region.x,
            region.y + oriented.width,
            region.width,
            region.height - oriented.width,
        ));

        Some(Placement::new(region.x, region.y, orientation, oriented))
    }
}

/// Outcome of packing one mixed layer, by index into the input slice.
#[derive(Debug, Clone, Default)]
pub struct GuillotineOutcome {
    /// Placed boxes with their placement, in input order.
    pub placed: Vec<(usize, Placement)>,
    /// Boxes that found no region, in input order.
    pub not_placed: Vec<usize>,
    /// Free regions left after the last placement.
    pub free_regions: Vec<Rect>,
}

/// Packs as many boxes as possible into one layer.
///
/// Boxes that do not fit are reported in `not_placed`; they do not stop
/// the layer.
pub fn pack_mixed<'a, I>(items: I, pallet: Footprint) -> GuillotineOutcome
where
    I: IntoIterator<Item = &'a BoxInstance>,
{
    let mut packer = GuillotinePacker::new(pallet);
    let mut outcome = GuillotineOutcome::default();

    for (idx, item) in items.into_iter().enumerate() {
        match packer.try_place(item) {
            Some(placement) => outcome.placed.push((idx, placement)),
            None => outcome.not_placed.push(idx),
        }
    }

    outcome.free_regions = packer.regions;
    outcome
}
