//! Hook into the rendering surfaces behind tiles.

use glam::DVec2;
use tilez_core::{SurfaceType, TileId};

/// Reports facts about the surface a renderer created for a tile.
///
/// The tree only asks when a canvas sub-root rewrites its own geometry; a
/// canvas may have been resized by its renderer independently of the layout.
pub trait SurfaceBinding {
    /// Size of the drawing surface bound to `tile`, if one exists.
    fn intrinsic_size(&self, tile: TileId, surface: SurfaceType) -> Option<DVec2>;
}

impl<F> SurfaceBinding for F
where
    F: Fn(TileId, SurfaceType) -> Option<DVec2>,
{
    fn intrinsic_size(&self, tile: TileId, surface: SurfaceType) -> Option<DVec2> {
        self(tile, surface)
    }
}
