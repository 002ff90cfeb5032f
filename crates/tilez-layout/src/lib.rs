//! Tile trees and their layout.
//!
//! This crate turns a tree of declared [`TileConstraints`](tilez_core::TileConstraints)
//! into pixel geometry and keeps it current as tiles are added or changed.
//!
//! # Architecture
//!
//! 1. **Algorithms**: [`Sizing`] and [`Spacing`] lay out the children of one
//!    parent, selected per tile with [`algorithm_for`]
//! 2. **Tree**: [`TileTree`] owns the tiles, derives inherited constraints and
//!    re-runs the passes below whatever changed
//! 3. **Observers**: every tile publishes its geometry through an [`Observable`]
//!
//! # Example
//!
//! ```
//! use tilez_core::RawConstraints;
//! use tilez_layout::TileTree;
//!
//! let mut tree = TileTree::new();
//! let root = tree.build_root(
//!     &RawConstraints::new().with_size(800, 600).with_stack("horizontal"),
//! )?;
//! let sidebar = tree.attach_child(&RawConstraints::new().with_width(200), root)?;
//! let main = tree.attach_child(&RawConstraints::new(), root)?;
//!
//! assert_eq!(tree.width(sidebar)?, Some(200.0));
//! assert_eq!(tree.width(main)?, Some(600.0));
//! # Ok::<(), tilez_core::TileError>(())
//! ```

mod algorithm;
mod builder;
mod observable;
mod surface;
mod template;
mod tree;

pub use algorithm::{algorithm_for, LayoutAlgorithm, Sizing, Spacing};
pub use builder::RootGeometryBuilder;
pub use observable::{Observable, Subscription};
pub use surface::SurfaceBinding;
pub use template::TileTemplate;
pub use tree::{RootType, TileNode, TileTree};
