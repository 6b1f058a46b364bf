//! Pallet class: footprint, height and weight limits.

use u_pallet_core::{Error, Footprint, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pallet class onto which layers are stacked.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PalletSpec {
    /// Footprint length in centimeters (x axis).
    length: f64,

    /// Footprint width in centimeters (y axis).
    width: f64,

    /// Maximum cumulative height of stacked layers in centimeters.
    max_height: f64,

    /// Maximum gross weight in kilograms, tare included.
    max_gross_weight: f64,

    /// Weight of the empty pallet in kilograms.
    tare_weight: f64,
}

impl PalletSpec {
    /// Creates a pallet class with the given footprint and no practical limits.
    pub fn new(length: f64, width: f64) -> Self {
        Self {
            length,
            width,
            max_height: f64::INFINITY,
            max_gross_weight: f64::INFINITY,
            tare_weight: 0.0,
        }
    }

    /// Standard 120 × 80 cm pallet: 170 cm load height, 600 kg gross, 25 kg tare.
    pub fn euro() -> Self {
        Self::new(120.0, 80.0)
            .with_max_height(170.0)
            .with_max_gross_weight(600.0)
            .with_tare_weight(25.0)
    }

    /// Sets the maximum load height.
    pub fn with_max_height(mut self, height: f64) -> Self {
        self.max_height = height;
        self
    }

    /// Sets the maximum gross weight (tare included).
    pub fn with_max_gross_weight(mut self, weight: f64) -> Self {
        self.max_gross_weight = weight;
        self
    }

    /// Sets the empty pallet weight.
    pub fn with_tare_weight(mut self, weight: f64) -> Self {
        self.tare_weight = weight;
        self
    }

    /// Returns the footprint length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the footprint width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the footprint.
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.length, self.width)
    }

    /// Returns the maximum load height.
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Returns the maximum gross weight.
    pub fn max_gross_weight(&self) -> f64 {
        self.max_gross_weight
    }

    /// Returns the empty pallet weight.
    pub fn tare_weight(&self) -> f64 {
        self.tare_weight
    }

    /// Weight available for goods on an empty pallet.
    pub fn payload_capacity(&self) -> f64 {
        self.max_gross_weight - self.tare_weight
    }

    /// Footprint area in square centimeters.
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Checks that dimensions and caps are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.length > 0.0 && self.width > 0.0) {
            return Err(Error::InvalidPallet(
                "Footprint dimensions must be positive".into(),
            ));
        }

        if !(self.max_height > 0.0) {
            return Err(Error::InvalidPallet(
                "Maximum height must be positive".into(),
            ));
        }

        if self.tare_weight < 0.0 || self.tare_weight.is_nan() {
            return Err(Error::InvalidPallet(
                "Tare weight cannot be negative".into(),
            ));
        }

        if !(self.max_gross_weight > self.tare_weight) {
            return Err(Error::InvalidPallet(format!(
                "Maximum gross weight {} must exceed tare weight {}",
                self.max_gross_weight, self.tare_weight
            )));
        }

        Ok(())
    }
}

impl Default for PalletSpec {
    fn default() -> Self {
        Self::euro()
    }
}
