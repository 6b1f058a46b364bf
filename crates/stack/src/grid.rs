//! Single-SKU grid solver.
//!
//! Tiles the pallet footprint with identical boxes: a regular rows × columns
//! grid in a primary orientation, plus one filler strip of the other
//! orientation in the leftover space along the length or the width.
//!
//! This is a heuristic, not an optimum. For each primary orientation `o1`:
//!
//! 1. `rows = floor(L / o1.length)`, `cols = floor(W / o1.width)`
//! 2. the leftover strips are `L - rows * o1.length` by `W` and
//!    `L` by `W - cols * o1.width`
//! 3. every other orientation `o2` fills one of the strips, whichever holds more
//!
//! The best `o1` total wins; ties keep the earlier candidate.

use u_pallet_core::{Footprint, Orientation, Placement, Result};

/// Filler strip of boxes in the secondary orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillerStrip {
    /// Orientation of the filler boxes.
    pub orientation: Orientation,
    /// Oriented filler footprint.
    pub footprint: Footprint,
    /// Strip origin along x.
    pub origin_x: f64,
    /// Strip origin along y.
    pub origin_y: f64,
    /// Boxes along x.
    pub along_x: usize,
    /// Boxes along y.
    pub along_y: usize,
}

impl FillerStrip {
    /// Boxes in the strip.
    pub fn count(&self) -> usize {
        self.along_x * self.along_y
    }
}

/// Homogeneous layer layout produced by [`solve_grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlan {
    /// Orientation of the base grid.
    pub orientation: Orientation,
    /// Oriented base footprint.
    pub footprint: Footprint,
    /// Grid rows along the pallet length.
    pub rows: usize,
    /// Grid columns along the pallet width.
    pub cols: usize,
    /// Optional filler strip in the leftover space.
    pub strip: Option<FillerStrip>,
}

impl GridPlan {
    /// Boxes in the base grid.
    pub fn base_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Total boxes per layer.
    pub fn count(&self) -> usize {
        self.base_count() + self.strip.map_or(0, |s| s.count())
    }

    /// Box placements: base grid first, then the filler strip.
    pub fn positions(&self) -> Vec<Placement> {
        let mut placements = Vec::with_capacity(self.count());

        for i in 0..self.rows {
            for j in 0..self.cols {
                placements.push(Placement::new(
                    i as f64 * self.footprint.length,
                    j as f64 * self.footprint.width,
                    self.orientation,
                    self.footprint,
                ));
            }
        }

        if let Some(strip) = &self.strip {
            for i in 0..strip.along_x {
                for j in 0..strip.along_y {
                    placements.push(Placement::new(
                        strip.origin_x + i as f64 * strip.footprint.length,
                        strip.origin_y + j as f64 * strip.footprint.width,
                        strip.orientation,
                        strip.footprint,
                    ));
                }
            }
        }

        placements
    }
}

fn fit(extent: f64, size: f64) -> usize {
    (extent / size).floor().max(0.0) as usize
}

/// Computes the grid layout for one box footprint on a pallet footprint.
///
/// Fails with [`u_pallet_core::Error::InvalidDimension`] for a non-positive
/// box footprint instead of dividing by zero.
pub fn solve_grid(footprint: Footprint, can_rotate: bool, pallet: Footprint) -> Result<GridPlan> {
    let candidates = footprint.orientations(can_rotate);
    for (_, oriented) in &candidates {
        oriented.validate()?;
    }

    let (pallet_l, pallet_w) = (pallet.length, pallet.width);
    let mut best: Option<GridPlan> = None;

    for (i1, (o1, d1)) in candidates.iter().enumerate() {
        let rows = fit(pallet_l, d1.length);
        let cols = fit(pallet_w, d1.width);
        let rem_l = pallet_l - rows as f64 * d1.length;
        let rem_w = pallet_w - cols as f64 * d1.width;

        let mut strip: Option<FillerStrip> = None;
        for (i2, (o2, d2)) in candidates.iter().enumerate() {
            if i2 == i1 {
                continue;
            }

            let along_length = FillerStrip {
                orientation: *o2,
                footprint: *d2,
                origin_x: rows as f64 * d1.length,
                origin_y: 0.0,
                along_x: fit(rem_l, d2.length),
                along_y: fit(pallet_w, d2.width),
            };
            let along_width = FillerStrip {
                orientation: *o2,
                footprint: *d2,
                origin_x: 0.0,
                origin_y: cols as f64 * d1.width,
                along_x: fit(pallet_l, d2.length),
                along_y: fit(rem_w, d2.width),
            };

            let larger = if along_width.count() > along_length.count() {
                along_width
            } else {
                along_length
            };
            if larger.count() > strip.map_or(0, |s| s.count()) {
                strip = Some(larger);
            }
        }

        let plan = GridPlan {
            orientation: *o1,
            footprint: *d1,
            rows,
            cols,
            strip,
        };
        if best.map_or(true, |b| plan.count() > b.count()) {
            best = Some(plan);
        }
    }

    // `candidates` always holds the natural orientation.
    best.ok_or_else(|| u_pallet_core::Error::Internal("no grid candidate".into()))
}

/// Maximum number of identical boxes per layer.
pub fn max_grid_count(footprint: Footprint, can_rotate: bool, pallet: Footprint) -> Result<usize> {
    solve_grid(footprint, can_rotate, pallet).map(|plan| plan.count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_pallet_core::placement::find_overlap;
    use u_pallet_core::{Error, Rect};

    fn euro() -> Footprint {
        Footprint::new(120.0, 80.0)
    }

    #[test]
    fn test_fixed_orientation_grid() {
        let plan = solve_grid(Footprint::new(40.0, 30.0), false, euro()).unwrap();
        assert_eq!(plan.rows, 3);
        assert_eq!(plan.cols, 2);
        assert_eq!(plan.base_count(), 6);
        assert!(plan.strip.is_none());
        assert_eq!(plan.count(), 6);
        assert_eq!(plan.orientation, Orientation::Natural);
    }

    #[test]
    fn test_rotation_picks_better_primary() {
        // Natural 40x30 gives 3x2 = 6, rotated 30x40 gives 4x2 = 8
        let plan = solve_grid(Footprint::new(40.0, 30.0), true, euro()).unwrap();
        assert_eq!(plan.orientation, Orientation::Rotated);
        assert_eq!(plan.count(), 8);
    }

    #[test]
    fn test_filler_strip() {
        // Rotated 30x50 gives 4x1, leaving a 120x30 strip that holds two 50x30
        let plan = solve_grid(Footprint::new(50.0, 30.0), true, euro()).unwrap();
        assert_eq!(plan.orientation, Orientation::Rotated);
        assert_eq!(plan.base_count(), 4);

        let strip = plan.strip.unwrap();
        assert_eq!(strip.orientation, Orientation::Natural);
        assert_eq!(strip.count(), 2);
        assert_eq!(strip.origin_y, 50.0);
        assert_eq!(plan.count(), 6);
    }

    #[test]
    fn test_positions_do_not_overlap() {
        for (fp, rotate) in [
            (Footprint::new(50.0, 30.0), true),
            (Footprint::new(40.0, 30.0), true),
            (Footprint::new(35.0, 25.0), true),
            (Footprint::new(60.0, 45.0), true),
            (Footprint::new(40.0, 30.0), false),
        ] {
            let plan = solve_grid(fp, rotate, euro()).unwrap();
            let positions = plan.positions();
            assert_eq!(positions.len(), plan.count());
            assert_eq!(find_overlap(&positions), None);

            let pallet = Rect::covering(&euro());
            assert!(positions.iter().all(|p| pallet.contains(&p.rect())));
        }
    }

    #[test]
    fn test_square_box_keeps_natural() {
        let plan = solve_grid(Footprint::new(40.0, 40.0), true, euro()).unwrap();
        assert_eq!(plan.orientation, Orientation::Natural);
        assert_eq!(plan.count(), 6);
    }

    #[test]
    fn test_oversized_box() {
        assert_eq!(
            max_grid_count(Footprint::new(130.0, 90.0), true, euro()).unwrap(),
            0
        );
        // Only fits rotated
        assert_eq!(
            max_grid_count(Footprint::new(70.0, 110.0), false, euro()).unwrap(),
            0
        );
        assert_eq!(
            max_grid_count(Footprint::new(70.0, 110.0), true, euro()).unwrap(),
            1
        );
    }

    #[test]
    fn test_invalid_dimension() {
        let err = max_grid_count(Footprint::new(0.0, 30.0), false, euro()).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { .. }));

        let err = max_grid_count(Footprint::new(40.0, -5.0), true, euro()).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { .. }));
    }
}
