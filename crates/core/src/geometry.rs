//! Geometric primitives shared by the layer and pallet solvers.
//!
//! All lengths are centimeters. The pallet footprint spans `length` along the
//! x axis and `width` along the y axis; a box footprint uses the same
//! convention once an [`Orientation`] has been chosen.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a product (stock keeping unit).
pub type SkuId = String;

/// Identifier of a catalog box option for a product (e.g. `"box1"`).
pub type VariantId = String;

/// Coarse stacking hint: sturdier goods go on lower layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FragilityClass {
    /// Can carry other goods.
    #[default]
    Strong,
    /// Can carry light goods.
    Medium,
    /// Should end up on top.
    Fragile,
}

impl FragilityClass {
    /// Packing rank; lower ranks are consumed first.
    pub fn rank(self) -> u8 {
        match self {
            FragilityClass::Strong => 0,
            FragilityClass::Medium => 1,
            FragilityClass::Fragile => 2,
        }
    }
}

impl FromStr for FragilityClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strong" => Ok(FragilityClass::Strong),
            "medium" => Ok(FragilityClass::Medium),
            "fragile" => Ok(FragilityClass::Fragile),
            other => Err(Error::ConfigError(format!(
                "unknown fragility class '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for FragilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FragilityClass::Strong => "strong",
            FragilityClass::Medium => "medium",
            FragilityClass::Fragile => "fragile",
        };
        f.write_str(name)
    }
}

/// How a box footprint is laid on the pallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Footprint as given in the catalog.
    #[default]
    Natural,
    /// Length and width swapped (90° around the vertical axis).
    Rotated,
}

/// Two-dimensional box footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Footprint {
    /// Extent along the pallet length (x).
    pub length: f64,
    /// Extent along the pallet width (y).
    pub width: f64,
}

impl Footprint {
    /// Creates a footprint.
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    /// Returns the footprint with length and width swapped.
    pub fn rotated(&self) -> Self {
        Self::new(self.width, self.length)
    }

    /// Returns the footprint laid out in the given orientation.
    pub fn oriented(&self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Natural => *self,
            Orientation::Rotated => self.rotated(),
        }
    }

    /// Candidate orientations: natural first, then rotated when allowed.
    pub fn orientations(&self, rotatable: bool) -> Vec<(Orientation, Footprint)> {
        let mut candidates = vec![(Orientation::Natural, *self)];
        if rotatable {
            candidates.push((Orientation::Rotated, self.rotated()));
        }
        candidates
    }

    /// Area in square centimeters.
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Both extents strictly positive (NaN fails).
    pub fn is_positive(&self) -> bool {
        self.length > 0.0 && self.width > 0.0
    }

    /// Whether this footprint fits inside `outer` without rotation.
    pub fn fits_in(&self, outer: &Footprint) -> bool {
        self.length <= outer.length && self.width <= outer.width
    }

    /// Fails with [`Error::InvalidDimension`] unless both extents are positive.
    pub fn validate(&self) -> Result<()> {
        if self.is_positive() {
            Ok(())
        } else {
            Err(Error::InvalidDimension {
                length: self.length,
                width: self.width,
            })
        }
    }
}

/// Box dimensions: footprint plus stacking height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimensions {
    /// Length in centimeters.
    pub length: f64,
    /// Width in centimeters.
    pub width: f64,
    /// Height in centimeters.
    pub height: f64,
}

impl Dimensions {
    /// Creates box dimensions.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// The footprint (length × width).
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.length, self.width)
    }
}

/// Parses `"LxWxH"`; the separator may be `x`, `X` or `×`.
impl FromStr for Dimensions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split(|c: char| c == 'x' || c == 'X' || c == '×')
            .map(str::trim)
            .collect();

        if parts.len() != 3 {
            return Err(Error::ConfigError(format!(
                "dimensions '{}' must have the form LxWxH",
                s
            )));
        }

        let mut values = [0.0_f64; 3];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse::<f64>().map_err(|_| {
                Error::ConfigError(format!("dimension '{}' in '{}' is not a number", part, s))
            })?;
        }

        Ok(Self::new(values[0], values[1], values[2]))
    }
}

/// Axis-aligned rectangle on the pallet footprint.
///
/// Used both for free regions during guillotine packing and for the
/// footprint a placed box occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Origin along the pallet length.
    pub x: f64,
    /// Origin along the pallet width.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its origin and extents.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin covering a footprint.
    pub fn covering(footprint: &Footprint) -> Self {
        Self::new(0.0, 0.0, footprint.length, footprint.width)
    }

    /// Maximum x coordinate.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Maximum y coordinate.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the rectangle has no usable area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether a footprint fits inside this rectangle as laid out.
    pub fn accepts(&self, footprint: &Footprint) -> bool {
        footprint.length <= self.width && footprint.width <= self.height
    }

    /// Interior overlap test; touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// Whether `other` lies entirely within this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }
}
