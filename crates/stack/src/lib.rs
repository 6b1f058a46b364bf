//! # U-Pallet Stack
//!
//! Layer and pallet stacking algorithms for the U-Pallet palletizing engine.
//!
//! An order is expanded against a [`ProductCatalog`] into physical box
//! instances, ordered strongest first, then stacked layer by layer: a grid
//! layout for single-SKU layers and a guillotine packer for mixed ones.
//! Layers go onto pallets until the height or gross weight cap is reached.
//!
//! ```rust
//! use u_pallet_stack::{BoxSpec, Dimensions, OrderLine, PalletSpec, Palletizer, ProductCatalog};
//!
//! let catalog = ProductCatalog::new().with_variant(
//!     "A1",
//!     "box1",
//!     BoxSpec::new(10, 5.0, Dimensions::new(40.0, 30.0, 20.0)),
//! );
//! let lines = vec![OrderLine::new("A1", "box1", 100)];
//!
//! let result = Palletizer::default_config()
//!     .pack_order(&catalog, &lines, &PalletSpec::euro())
//!     .unwrap();
//! assert_eq!(result.pallet_count(), 1);
//! assert_eq!(result.placed_boxes(), 10);
//! ```

pub mod catalog;
pub mod fragility;
pub mod grid;
pub mod guillotine;
pub mod instance;
pub mod layer;
pub mod order;
pub mod packer;
pub mod pallet;
pub mod result;

// Re-exports
pub use catalog::{BoxSpec, Product, ProductCatalog};
pub use fragility::{ordered_by_fragility, sort_by_fragility};
pub use grid::{max_grid_count, solve_grid, FillerStrip, GridPlan};
pub use guillotine::{pack_mixed, GuillotineOutcome, GuillotinePacker};
pub use instance::{BoxInstance, InstanceId};
pub use layer::{assemble_layer, Layer, LayerKind, LayerPlan, LayerTally, PlacedBox};
pub use order::{expand_order, Expansion, OrderLine, PackIssue};
pub use packer::Palletizer;
pub use pallet::PalletSpec;
pub use result::{LayerSummary, OrderSummary, PackResult, Pallet, PalletSummary, TallyLine};
pub use u_pallet_core::{
    Config, Dimensions, Error, Footprint, FragilityClass, IssuePolicy, Orientation, Placement,
    Result, Solver,
};
