//! Command-line tooling for U-Pallet
//!
//! This crate provides:
//! - Product master data and order JSON parsers
//! - Plain-text load plan reports

mod parser;
mod report;

pub use parser::{InputParser, ParseError};
pub use report::write_report;
