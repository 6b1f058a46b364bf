//! # U-Pallet Core
//!
//! Core types and abstractions for the U-Pallet palletizing engine.
//!
//! This crate provides the foundational types shared by the layer and pallet
//! solvers and by the tools built on top of them.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Footprint`], [`Dimensions`], [`Orientation`], [`Rect`], [`FragilityClass`]
//! - **Placement**: [`Placement`] - an oriented footprint positioned within a layer
//! - **Solver trait**: [`Solver`] - Common interface for stacking solvers
//! - **Errors**: [`Error`] - the failure taxonomy shared by all crates
//!
//! ## Configuration
//!
//! Use [`Config`] to configure solver behavior:
//!
//! ```rust
//! use u_pallet_core::{Config, IssuePolicy};
//!
//! let config = Config::new()
//!     .with_issue_policy(IssuePolicy::Fail)
//!     .with_time_limit(5000);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod geometry;
pub mod placement;
pub mod solver;

// Re-exports
pub use error::{Error, Result};
pub use geometry::{Dimensions, Footprint, FragilityClass, Orientation, Rect, SkuId, VariantId};
pub use placement::Placement;
pub use solver::{Config, IssuePolicy, ProgressCallback, ProgressInfo, Solver};
