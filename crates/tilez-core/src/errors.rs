//! Error types for the tilez engine.

use crate::types::{SurfaceType, TileId};
use thiserror::Error;

/// Top-level error type for the tilez engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileError {
    #[error(transparent)]
    Props(#[from] PropsError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Scale(#[from] ScaleError),
}

/// Errors while turning raw props into constraints.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropsError {
    #[error("Tile prop \"{field}\" must be one of {}, got \"{value}\"", .allowed.join(", "))]
    Validation {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("Invalid dimension: \"{value}\"")]
    InvalidDimension { value: String },

    #[error("Invalid padding: \"{value}\" (expected a non-negative pixel value)")]
    InvalidPadding { value: String },
}

/// Errors raised by the tile tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Root tile requires an explicit absolute {dimension}")]
    RootDimension { dimension: &'static str },

    #[error("{child} tile can't be embedded into {parent} tile")]
    IncompatibleEmbedding {
        parent: SurfaceType,
        child: SurfaceType,
    },

    #[error("Tile prop \"{property}\" can't be changed after layout")]
    ImmutableProperty { property: &'static str },

    #[error("Unknown tile {id}")]
    UnknownTile { id: TileId },
}

/// Errors from linear scales.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("Empty domain [{start}, {end}] is not allowed")]
    EmptyDomain { start: f64, end: f64 },
}

/// Result alias used across the workspace.
pub type Result<T, E = TileError> = std::result::Result<T, E>;
