//! Computed tile geometry and the defaults it resolves against.

use glam::DVec2;

use crate::constraints::TileConstraints;
use crate::errors::ScaleError;
use crate::scale::LinearScale;
use crate::types::{Extent, HAlign, Mode, Stack, SurfaceType, VAlign};

/// Values used when neither a tile nor its ancestors declare a field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TileDefaults {
    pub inner_padding: f64,
    pub outer_padding: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub surface_type: SurfaceType,
    pub mode: Mode,
}

impl Default for TileDefaults {
    fn default() -> Self {
        Self {
            inner_padding: 0.0,
            outer_padding: 0.0,
            h_align: HAlign::Left,
            v_align: VAlign::Top,
            surface_type: SurfaceType::Plain,
            mode: Mode::Spacing,
        }
    }
}

impl TileDefaults {
    /// Zero-sized geometry carrying the resolved attributes of `constraints`.
    pub fn resolve(&self, constraints: &TileConstraints) -> TileGeometry {
        TileGeometry {
            width: 0.0,
            height: 0.0,
            root_x: 0.0,
            root_y: 0.0,
            sub_root_x: 0.0,
            sub_root_y: 0.0,
            parent_x: 0.0,
            parent_y: 0.0,
            inner_padding: constraints.inner_padding.unwrap_or(self.inner_padding),
            outer_padding: constraints.outer_padding.unwrap_or(self.outer_padding),
            h_align: constraints.h_align.unwrap_or(self.h_align),
            v_align: constraints.v_align.unwrap_or(self.v_align),
            surface_type: constraints.surface_type.unwrap_or(self.surface_type),
            mode: constraints.mode.unwrap_or(self.mode),
            stack: constraints.stack,
        }
    }
}

/// Size, position, and resolved attributes of a laid out tile.
///
/// Positions are kept in three frames: relative to the tree root, to the
/// nearest sub-root ancestor, and to the parent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TileGeometry {
    pub width: f64,
    pub height: f64,
    pub root_x: f64,
    pub root_y: f64,
    pub sub_root_x: f64,
    pub sub_root_y: f64,
    pub parent_x: f64,
    pub parent_y: f64,
    pub inner_padding: f64,
    pub outer_padding: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub surface_type: SurfaceType,
    pub mode: Mode,
    pub stack: Option<Stack>,
}

impl Default for TileGeometry {
    fn default() -> Self {
        TileDefaults::default().resolve(&TileConstraints::default())
    }
}

impl TileGeometry {
    /// Size along an extent.
    pub fn size(&self, extent: Extent) -> f64 {
        match extent {
            Extent::Width => self.width,
            Extent::Height => self.height,
        }
    }

    pub fn set_size(&mut self, extent: Extent, value: f64) {
        match extent {
            Extent::Width => self.width = value,
            Extent::Height => self.height = value,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Position this tile at `local` inside `parent`.
    ///
    /// A sub-root restarts its sub-root frame at the origin.
    pub fn placed_in(mut self, parent: &TileGeometry, local: DVec2, sub_root: bool) -> Self {
        let root = parent.root_origin() + local;
        let sub = if sub_root {
            DVec2::ZERO
        } else {
            parent.sub_root_origin() + local
        };

        self.root_x = root.x;
        self.root_y = root.y;
        self.sub_root_x = sub.x;
        self.sub_root_y = sub.y;
        self.parent_x = local.x;
        self.parent_y = local.y;
        self
    }

    /// Copy size and frames from `other`, keeping this tile's attributes.
    pub fn with_placement_of(mut self, other: &TileGeometry) -> Self {
        self.width = other.width;
        self.height = other.height;
        self.root_x = other.root_x;
        self.root_y = other.root_y;
        self.sub_root_x = other.sub_root_x;
        self.sub_root_y = other.sub_root_y;
        self.parent_x = other.parent_x;
        self.parent_y = other.parent_y;
        self
    }

    pub fn size_vec(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn root_origin(&self) -> DVec2 {
        DVec2::new(self.root_x, self.root_y)
    }

    pub fn sub_root_origin(&self) -> DVec2 {
        DVec2::new(self.sub_root_x, self.sub_root_y)
    }

    pub fn parent_origin(&self) -> DVec2 {
        DVec2::new(self.parent_x, self.parent_y)
    }

    /// True when either extent is zero.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Width over height, `None` for a zero height.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height != 0.0).then(|| self.width / self.height)
    }

    /// Map a pixel offset `[0, width]` into the parent frame.
    pub fn x(&self, x: f64) -> Result<f64, ScaleError> {
        Ok(self.pixel_scale(self.width, self.x_range())?.call(x))
    }

    /// Like [`x`](Self::x), measured from the right edge.
    pub fn x_rev(&self, x: f64) -> Result<f64, ScaleError> {
        let [start, end] = self.x_range();
        Ok(self.pixel_scale(self.width, [end, start])?.call(x))
    }

    /// Map a pixel offset `[0, height]` into the parent frame.
    pub fn y(&self, y: f64) -> Result<f64, ScaleError> {
        Ok(self.pixel_scale(self.height, self.y_range())?.call(y))
    }

    /// Like [`y`](Self::y), measured from the bottom edge.
    pub fn y_rev(&self, y: f64) -> Result<f64, ScaleError> {
        let [start, end] = self.y_range();
        Ok(self.pixel_scale(self.height, [end, start])?.call(y))
    }

    /// Map a fraction `[0, 1]` of the width into the parent frame.
    pub fn px(&self, x: f64) -> f64 {
        LinearScale::default().with_range(self.x_range()).call(x)
    }

    pub fn px_rev(&self, x: f64) -> f64 {
        let [start, end] = self.x_range();
        LinearScale::default().with_range([end, start]).call(x)
    }

    /// Map a fraction `[0, 1]` of the height into the parent frame.
    pub fn py(&self, y: f64) -> f64 {
        LinearScale::default().with_range(self.y_range()).call(y)
    }

    pub fn py_rev(&self, y: f64) -> f64 {
        let [start, end] = self.y_range();
        LinearScale::default().with_range([end, start]).call(y)
    }

    fn x_range(&self) -> [f64; 2] {
        [self.parent_x, self.parent_x + self.width]
    }

    fn y_range(&self) -> [f64; 2] {
        [self.parent_y, self.parent_y + self.height]
    }

    fn pixel_scale(&self, extent: f64, range: [f64; 2]) -> Result<LinearScale, ScaleError> {
        LinearScale::new([0.0, extent], range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::RawConstraints;

    fn geometry() -> TileGeometry {
        let mut g = TileGeometry::default().with_size(200.0, 100.0);
        g.parent_x = 10.0;
        g.parent_y = 20.0;
        g
    }

    #[test]
    fn test_defaults_resolution() {
        let g = TileGeometry::default();

        assert_eq!(g.size_vec(), DVec2::ZERO);
        assert_eq!(g.surface_type, SurfaceType::Plain);
        assert_eq!(g.mode, Mode::Spacing);
        assert_eq!(g.h_align, HAlign::Left);
        assert_eq!(g.v_align, VAlign::Top);
        assert_eq!(g.stack, None);
    }

    #[test]
    fn test_resolve_prefers_declared_values() {
        let c = TileConstraints::from_raw(
            &RawConstraints::new()
                .with_inner_padding(4)
                .with_h_align("center")
                .with_stack("vertical"),
        )
        .unwrap();
        let defaults = TileDefaults {
            inner_padding: 1.0,
            outer_padding: 3.0,
            mode: Mode::Sizing,
            ..TileDefaults::default()
        };
        let g = defaults.resolve(&c);

        assert_eq!(g.inner_padding, 4.0);
        assert_eq!(g.outer_padding, 3.0);
        assert_eq!(g.h_align, HAlign::Center);
        assert_eq!(g.mode, Mode::Sizing);
        assert_eq!(g.stack, Some(Stack::Vertical));
    }

    #[test]
    fn test_placement_frames() {
        let mut parent = TileGeometry::default().with_size(100.0, 100.0);
        parent.root_x = 50.0;
        parent.root_y = 60.0;
        parent.sub_root_x = 5.0;
        parent.sub_root_y = 6.0;

        let child = TileGeometry::default().placed_in(&parent, DVec2::new(10.0, 20.0), false);
        assert_eq!(child.root_origin(), DVec2::new(60.0, 80.0));
        assert_eq!(child.sub_root_origin(), DVec2::new(15.0, 26.0));
        assert_eq!(child.parent_origin(), DVec2::new(10.0, 20.0));

        let sub_root = TileGeometry::default().placed_in(&parent, DVec2::new(10.0, 20.0), true);
        assert_eq!(sub_root.root_origin(), DVec2::new(60.0, 80.0));
        assert_eq!(sub_root.sub_root_origin(), DVec2::ZERO);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(geometry().aspect_ratio(), Some(2.0));
        assert_eq!(TileGeometry::default().with_size(10.0, 0.0).aspect_ratio(), None);
    }

    #[test]
    fn test_pixel_scales() {
        let g = geometry();

        assert_eq!(g.x(0.0).unwrap(), 10.0);
        assert_eq!(g.x(200.0).unwrap(), 210.0);
        assert_eq!(g.x_rev(0.0).unwrap(), 210.0);
        assert_eq!(g.x_rev(50.0).unwrap(), 160.0);
        assert_eq!(g.y(100.0).unwrap(), 120.0);
        assert_eq!(g.y_rev(100.0).unwrap(), 20.0);
    }

    #[test]
    fn test_pixel_scales_reject_empty_extent() {
        let g = TileGeometry::default().with_size(0.0, 10.0);

        assert!(matches!(g.x(1.0), Err(ScaleError::EmptyDomain { .. })));
        assert!(g.y(1.0).is_ok());
    }

    #[test]
    fn test_fraction_scales() {
        let g = geometry();

        assert_eq!(g.px(0.5), 110.0);
        assert_eq!(g.px_rev(0.25), 160.0);
        assert_eq!(g.py(1.0), 120.0);
        assert_eq!(g.py_rev(1.0), 20.0);
    }
}
