//! Placement of a footprint within a layer.

use crate::geometry::{Footprint, Orientation, Rect};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where and how a footprint sits on the pallet surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Origin along the pallet length.
    pub x: f64,
    /// Origin along the pallet width.
    pub y: f64,
    /// Orientation the footprint was laid in.
    pub orientation: Orientation,
    /// Oriented footprint (length along x, width along y).
    pub footprint: Footprint,
}

impl Placement {
    /// Places an already oriented footprint at `(x, y)`.
    pub fn new(x: f64, y: f64, orientation: Orientation, footprint: Footprint) -> Self {
        Self {
            x,
            y,
            orientation,
            footprint,
        }
    }

    /// Returns true if the footprint was rotated.
    pub fn is_rotated(&self) -> bool {
        self.orientation == Orientation::Rotated
    }

    /// Occupied rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.footprint.length, self.footprint.width)
    }
}

/// Returns the first pair of overlapping placements, if any.
pub fn find_overlap(placements: &[Placement]) -> Option<(usize, usize)> {
    for i in 0..placements.len() {
        let a = placements[i].rect();
        for (j, other) in placements.iter().enumerate().skip(i + 1) {
            if a.overlaps(&other.rect()) {
                return Some((i, j));
            }
        }
    }
    None
}
