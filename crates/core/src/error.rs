//! Error types for U-Pallet.

use thiserror::Error;

/// Result type alias for U-Pallet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while expanding an order or stacking pallets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An order line references a SKU absent from the catalog.
    #[error("Unknown SKU: {0}")]
    UnknownSku(String),

    /// The SKU exists but has no box variant with the requested key.
    #[error("Unknown box variant '{variant}' for SKU {sku}")]
    UnknownBoxVariant {
        /// SKU of the order line.
        sku: String,
        /// Requested variant key.
        variant: String,
    },

    /// A catalog box variant has a non-positive capacity, weight or dimension.
    #[error("Invalid box spec for {sku}/{variant}: {reason}")]
    InvalidBoxSpec {
        /// SKU owning the variant.
        sku: String,
        /// Variant key.
        variant: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A degenerate footprint reached the grid solver.
    #[error("Invalid dimension: footprint {length} x {width} must be positive")]
    InvalidDimension {
        /// Footprint length.
        length: f64,
        /// Footprint width.
        width: f64,
    },

    /// A single box can never be placed on any pallet.
    #[error("Box {sku}/{variant} exceeds pallet limits: {reason}")]
    BoxExceedsPalletLimits {
        /// SKU of the offending box.
        sku: String,
        /// Variant key of the offending box.
        variant: String,
        /// Which limit is exceeded.
        reason: String,
    },

    /// Invalid pallet specification.
    #[error("Invalid pallet: {0}")]
    InvalidPallet(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Computation cancelled.
    #[error("Computation cancelled")]
    Cancelled,

    /// Timeout exceeded.
    #[error("Timeout exceeded after {0}ms")]
    Timeout(u64),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns true for errors that describe a single skipped order line
    /// rather than a failure of the whole run.
    pub fn is_line_level(&self) -> bool {
        matches!(
            self,
            Error::UnknownSku(_) | Error::UnknownBoxVariant { .. } | Error::InvalidBoxSpec { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::UnknownSku("SKU-9".into());
        assert_eq!(err.to_string(), "Unknown SKU: SKU-9");

        let err = Error::BoxExceedsPalletLimits {
            sku: "A1".into(),
            variant: "box1".into(),
            reason: "stack height 200 cm exceeds cap 170 cm".into(),
        };
        assert_eq!(
            err.to_string(),
            "Box A1/box1 exceeds pallet limits: stack height 200 cm exceeds cap 170 cm"
        );

        let err = Error::InvalidDimension {
            length: 0.0,
            width: 30.0,
        };
        assert!(err.to_string().contains("0 x 30"));
    }

    #[test]
    fn test_line_level_classification() {
        assert!(Error::UnknownSku("X".into()).is_line_level());
        assert!(Error::InvalidBoxSpec {
            sku: "X".into(),
            variant: "box1".into(),
            reason: "zero units".into(),
        }
        .is_line_level());
        assert!(!Error::Cancelled.is_line_level());
        assert!(!Error::Timeout(10).is_line_level());
    }
}
