//! Initial geometry of tiles that are not placed by a parent pass.

use tilez_core::{Dimension, LayoutError, TileConstraints, TileDefaults, TileGeometry};

/// Builds the geometry a tile owns before (or apart from) its parent's pass.
#[derive(Debug, Clone, Copy)]
pub struct RootGeometryBuilder<'a> {
    defaults: &'a TileDefaults,
}

impl<'a> RootGeometryBuilder<'a> {
    pub fn new(defaults: &'a TileDefaults) -> Self {
        Self { defaults }
    }

    /// Geometry of a root tile at the origin.
    ///
    /// Roots have nothing to be sized against, so both dimensions must be
    /// absolute.
    pub fn build(&self, constraints: &TileConstraints) -> Result<TileGeometry, LayoutError> {
        let width = absolute(constraints.width, "width")?;
        let height = absolute(constraints.height, "height")?;

        Ok(self.defaults.resolve(constraints).with_size(width, height))
    }

    /// Refresh the attributes of a nested tile, keeping its size and position.
    pub fn nested(&self, effective: &TileConstraints, previous: &TileGeometry) -> TileGeometry {
        self.defaults
            .resolve(effective)
            .with_placement_of(previous)
    }
}

fn absolute(dimension: Dimension, name: &'static str) -> Result<f64, LayoutError> {
    dimension
        .size()
        .ok_or(LayoutError::RootDimension { dimension: name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilez_core::{HAlign, Mode, RawConstraints, Stack, SurfaceType};

    fn constraints(raw: RawConstraints) -> TileConstraints {
        TileConstraints::from_raw(&raw).unwrap()
    }

    #[test]
    fn test_root_geometry() {
        let defaults = TileDefaults::default();
        let geometry = RootGeometryBuilder::new(&defaults)
            .build(&constraints(
                RawConstraints::new()
                    .with_size(800, "600px")
                    .with_stack("vertical")
                    .with_inner_padding(4),
            ))
            .unwrap();

        assert_eq!(geometry.width, 800.0);
        assert_eq!(geometry.height, 600.0);
        assert_eq!(geometry.root_origin(), glam::DVec2::ZERO);
        assert_eq!(geometry.stack, Some(Stack::Vertical));
        assert_eq!(geometry.inner_padding, 4.0);
        assert_eq!(geometry.surface_type, SurfaceType::Plain);
        assert_eq!(geometry.mode, Mode::Spacing);
    }

    #[test]
    fn test_root_requires_absolute_dimensions() {
        let defaults = TileDefaults::default();
        let builder = RootGeometryBuilder::new(&defaults);

        assert_eq!(
            builder.build(&constraints(RawConstraints::new().with_height(100))),
            Err(LayoutError::RootDimension { dimension: "width" })
        );
        assert_eq!(
            builder.build(&constraints(RawConstraints::new().with_size(100, "50%"))),
            Err(LayoutError::RootDimension { dimension: "height" })
        );
    }

    #[test]
    fn test_nested_keeps_placement() {
        let defaults = TileDefaults::default();
        let builder = RootGeometryBuilder::new(&defaults);
        let mut previous = TileGeometry::default().with_size(40.0, 30.0);
        previous.root_x = 12.0;
        previous.parent_y = 3.0;

        let refreshed = builder.nested(
            &constraints(RawConstraints::new().with_h_align("center").with_outer_padding(2)),
            &previous,
        );

        assert_eq!(refreshed.size_vec(), previous.size_vec());
        assert_eq!(refreshed.root_x, 12.0);
        assert_eq!(refreshed.parent_y, 3.0);
        assert_eq!(refreshed.h_align, HAlign::Center);
        assert_eq!(refreshed.outer_padding, 2.0);
    }
}
