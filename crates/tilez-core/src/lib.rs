//! Core types, constraints, and geometry for the tilez layout engine.
//!
//! This crate provides the foundational types used by `tilez-layout`:
//! - Dimension parsing for widths, heights, and paddings
//! - Declared tile constraints and their inheritance rules
//! - Computed tile geometry and tree-wide defaults
//! - Linear scales
//! - Error types

pub mod constraints;
pub mod dimension;
pub mod errors;
pub mod geometry;
pub mod scale;
pub mod types;

pub use constraints::*;
pub use dimension::*;
pub use errors::*;
pub use geometry::*;
pub use scale::*;
pub use types::*;
