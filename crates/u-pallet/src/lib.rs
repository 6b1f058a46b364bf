//! # U-Pallet
//!
//! Pallet load planning for warehouse orders.
//!
//! This crate provides:
//! - **Layer building**: grid layouts for single-SKU layers, guillotine
//!   packing for mixed layers
//! - **Pallet assembly**: layers stacked under height and gross weight caps,
//!   strong goods first
//!
//! ## Quick Start
//!
//! ```rust
//! use u_pallet::stack::{BoxSpec, OrderLine, PalletSpec, Palletizer, ProductCatalog};
//! use u_pallet::core::Dimensions;
//!
//! let catalog = ProductCatalog::new().with_variant(
//!     "A1",
//!     "box1",
//!     BoxSpec::new(12, 8.0, Dimensions::new(60.0, 40.0, 25.0)),
//! );
//! let order = vec![OrderLine::new("A1", "box1", 120)];
//!
//! let result = Palletizer::default_config()
//!     .pack_order(&catalog, &order, &PalletSpec::euro())?;
//! assert_eq!(result.placed_boxes(), 10);
//! # Ok::<(), u_pallet::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support

/// Core types and abstractions.
pub use u_pallet_core as core;

/// Layer and pallet stacking.
pub use u_pallet_stack as stack;

// Re-export commonly used types at root level
pub use u_pallet_core::{Config, Error, IssuePolicy, Placement, Result, Solver};
pub use u_pallet_stack::{OrderLine, PackResult, PalletSpec, Palletizer, ProductCatalog};
