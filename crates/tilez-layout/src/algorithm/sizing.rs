//! Sizing mode: inner padding is a plain gap between rendered tiles.

use tilez_core::{Mode, TileConstraints, TileDefaults, TileGeometry};

use super::{LayoutAlgorithm, LayoutPass, PassStrategy, Tile};

/// Lays out children with the inner padding as the gap between them.
///
/// Tiles fill their parent's padded box exactly: paddings are taken out of
/// the space before it is divided.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sizing;

impl LayoutAlgorithm for Sizing {
    fn mode(&self) -> Mode {
        Mode::Sizing
    }

    fn layout_with(
        &self,
        parent: &TileGeometry,
        children: &[TileConstraints],
        root: bool,
        defaults: &TileDefaults,
    ) -> Vec<TileGeometry> {
        LayoutPass::run(self, parent, children, root, defaults)
    }
}

impl PassStrategy for Sizing {
    fn group_gap(&self, pass: &LayoutPass<'_>) -> f64 {
        pass.inner_padding()
    }

    fn absolute_sizes(&self, pass: &mut LayoutPass<'_>, declared: &[f64]) -> Vec<f64> {
        let inner = pass.inner_padding();

        declared
            .iter()
            .map(|&size| {
                if size < 1.0 {
                    return 0.0;
                }

                let gap = if pass.consumed { inner } else { 0.0 };
                if pass.full < 1.0 + gap {
                    return 0.0;
                }

                let size = size.min(pass.full - gap);
                pass.full -= gap + size;
                pass.consumed = true;
                size
            })
            .collect()
    }

    fn flexible_sizes(
        &self,
        pass: &mut LayoutPass<'_>,
        percentages: &[f64],
        n_flex: usize,
    ) -> Vec<f64> {
        let inner = pass.inner_padding();
        let total = percentages.len() + n_flex;

        // one gap after the absolute tiles
        if pass.consumed {
            pass.full -= inner;
        }
        if pass.full < 1.0 {
            return vec![0.0; total];
        }

        // Try to render n tiles, n - 1 gaps between them.
        let budget = pass.full;
        for n in (1..=total).rev() {
            let available = budget - (n - 1) as f64 * inner;
            if available < n as f64 {
                continue;
            }

            pass.full = available;
            let mut placed = 0;
            let mut sizes = Vec::with_capacity(total);

            for &pct in percentages {
                let size = (pct * available).min(pass.full);
                if placed == n || size < 1.0 {
                    sizes.push(0.0);
                    continue;
                }
                pass.full -= size;
                placed += 1;
                sizes.push(size);
            }

            let flex = n - placed;
            if flex == 0 {
                sizes.resize(total, 0.0);
                return sizes;
            }
            if flex <= n_flex {
                let size = pass.full / flex as f64;
                if size >= 1.0 {
                    sizes.extend(std::iter::repeat(size).take(flex));
                    sizes.resize(total, 0.0);
                    return sizes;
                }
            }
        }

        vec![0.0; total]
    }

    fn group_extent(&self, pass: &LayoutPass<'_>, sizes: &[f64]) -> f64 {
        let rendered = sizes.iter().filter(|&&size| size > 0.0).count();
        if rendered == 0 {
            return 0.0;
        }

        sizes.iter().sum::<f64>() + (rendered - 1) as f64 * pass.inner_padding()
    }

    fn place_group(&self, pass: &LayoutPass<'_>, group: &[usize], anchor: f64, tiles: &mut [Tile]) {
        let inner = pass.inner_padding();
        let outer = pass.outer_padding();
        let mut cursor = anchor;

        for &i in group {
            let tile = &mut tiles[i];
            if tile.main <= 0.0 {
                continue;
            }

            let offset = pass.cross_offset(&tile.geometry, pass.fixed_full - tile.cross);
            pass.place(tile, cursor, outer + offset);
            cursor += inner + tile.main;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use tilez_core::RawConstraints;

    fn raw() -> RawConstraints {
        RawConstraints::new()
    }

    fn horizontal() -> RawConstraints {
        raw().with_stack("horizontal")
    }

    fn vertical() -> RawConstraints {
        raw().with_stack("vertical")
    }

    #[test]
    fn test_absolute_widths_with_paddings() {
        let parent = parent(
            1000.0,
            1000.0,
            horizontal().with_outer_padding(10).with_inner_padding(5),
        );
        let children = children(vec![raw().with_width(940), raw().with_width(35)]);

        assert_numbers(
            &Sizing.layout(&parent, &children, true),
            &[
                [940.0, 980.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0],
                [35.0, 980.0, 955.0, 10.0, 955.0, 10.0, 955.0, 10.0],
            ],
        );
    }

    #[test]
    fn test_equal_distribution() {
        let children = children(vec![raw(), raw()]);

        assert_numbers(
            &Sizing.layout(&parent(1000.0, 1000.0, horizontal()), &children, true),
            &[
                [500.0, 1000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [500.0, 1000.0, 500.0, 0.0, 500.0, 0.0, 500.0, 0.0],
            ],
        );
        assert_numbers(
            &Sizing.layout(&parent(1000.0, 1000.0, vertical()), &children, true),
            &[
                [1000.0, 500.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [1000.0, 500.0, 0.0, 500.0, 0.0, 500.0, 0.0, 500.0],
            ],
        );
    }

    #[test]
    fn test_clips_absolute_tiles() {
        let parent_ip = parent(1000.0, 1000.0, horizontal().with_inner_padding(10));
        assert_numbers(
            &Sizing.layout(&parent_ip, &children(vec![raw().with_width(2000)]), true),
            &[[1000.0, 1000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]],
        );

        let parent_op = parent(1000.0, 1000.0, horizontal().with_outer_padding(10));
        assert_numbers(
            &Sizing.layout(&parent_op, &children(vec![raw().with_width(990)]), true),
            &[[980.0, 980.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0]],
        );
    }

    #[test]
    fn test_no_space_left_for_later_tiles() {
        let parent = parent(1000.0, 1000.0, horizontal());

        assert_numbers(
            &Sizing.layout(&parent, &children(vec![raw(), raw().with_width(2000)]), true),
            &[[0.0; 8], [1000.0, 1000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]],
        );
        assert_numbers(
            &Sizing.layout(
                &parent,
                &children(vec![raw().with_width(1001), raw().with_width("400px")]),
                true,
            ),
            &[[1000.0, 1000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], [0.0; 8]],
        );
    }

    #[test]
    fn test_largest_absolute_tile_claims_space_first() {
        let parent = parent(1000.0, 1000.0, horizontal().with_inner_padding(10));
        let children = children(vec![
            raw().with_width("550px").with_h_align("left"),
            raw().with_width("600px").with_h_align("right"),
        ]);

        assert_numbers(
            &Sizing.layout(&parent, &children, true),
            &[
                [390.0, 1000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [600.0, 1000.0, 400.0, 0.0, 400.0, 0.0, 400.0, 0.0],
            ],
        );
    }

    #[test]
    fn test_flex_count_keeps_unit_sizes() {
        let parent_h = parent(7.0, 1.0, horizontal().with_inner_padding(2));
        assert_numbers(
            &Sizing.layout(&parent_h, &children(vec![raw(); 5]), true),
            &[
                [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [1.0, 1.0, 3.0, 0.0, 3.0, 0.0, 3.0, 0.0],
                [1.0, 1.0, 6.0, 0.0, 6.0, 0.0, 6.0, 0.0],
                [0.0; 8],
                [0.0; 8],
            ],
        );

        let parent_v = parent(
            17.0,
            35.0,
            vertical().with_inner_padding(8).with_outer_padding(8),
        );
        assert_numbers(
            &Sizing.layout(&parent_v, &children(vec![raw(); 4]), true),
            &[
                [1.0, 1.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0],
                [1.0, 1.0, 8.0, 17.0, 8.0, 17.0, 8.0, 17.0],
                [1.0, 1.0, 8.0, 26.0, 8.0, 26.0, 8.0, 26.0],
                [0.0; 8],
            ],
        );
    }

    #[test]
    fn test_relative_tile_that_does_not_fit() {
        let parent_a = parent(
            100.0,
            7.0,
            vertical().with_inner_padding(4).with_outer_padding(2),
        );
        let children_a = children(vec![raw(), raw().with_height(88), raw().with_height(0.2)]);
        assert_numbers(
            &Sizing.layout(&parent_a, &children_a, true),
            &[[0.0; 8], [96.0, 3.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0], [0.0; 8]],
        );

        let parent_b = parent(100.0, 4.0, vertical().with_inner_padding(2));
        assert_numbers(
            &Sizing.layout(&parent_b, &children(vec![raw().with_height(0.2)]), true),
            &[[0.0; 8]],
        );
        assert_numbers(
            &Sizing.layout(&parent_b, &children(vec![raw().with_height(0)]), true),
            &[[0.0; 8]],
        );
    }

    #[test]
    fn test_full_size_percentages() {
        let parent = parent(1000.0, 1000.0, horizontal());
        let children = children(vec![raw().with_size("100%", "100%")]);

        assert_numbers(
            &Sizing.layout(&parent, &children, true),
            &[[1000.0, 1000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]],
        );
    }

    #[test]
    fn test_child_overrides_inner_padding() {
        let parent = parent(1000.0, 1000.0, vertical().with_inner_padding(5));
        let result = Sizing.layout(&parent, &children(vec![raw().with_inner_padding(10)]), true);

        assert_eq!(result[0].inner_padding, 10.0);
    }

    #[test]
    fn test_sub_root_frames() {
        let root = parent(100.0, 100.0, vertical());
        let root_children = children(vec![raw(), raw().with_surface_type("html").with_stack("horizontal")]);
        let laid_out = Sizing.layout(&root, &root_children, true);

        assert_numbers(
            &laid_out,
            &[
                [100.0, 50.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [100.0, 50.0, 0.0, 50.0, 0.0, 0.0, 0.0, 50.0],
            ],
        );

        let grandchildren = children(vec![raw(), raw()]);
        assert_numbers(
            &Sizing.layout(&laid_out[1], &grandchildren, false),
            &[
                [50.0, 50.0, 0.0, 50.0, 0.0, 0.0, 0.0, 0.0],
                [50.0, 50.0, 50.0, 50.0, 50.0, 0.0, 50.0, 0.0],
            ],
        );
    }

    #[test]
    fn test_nested_overlay_positions() {
        let root = parent(1000.0, 1000.0, horizontal());
        let laid_out = Sizing.layout(&root, &children(vec![raw(), raw()]), true);

        assert_numbers(
            &Sizing.layout(&laid_out[1], &children(vec![raw()]), false),
            &[[500.0, 1000.0, 500.0, 0.0, 500.0, 0.0, 0.0, 0.0]],
        );
    }

    #[test]
    fn test_center_group_pushed_by_start_group() {
        let parent = parent(100.0, 10.0, horizontal().with_inner_padding(4));
        let children = children(vec![
            raw().with_width(60),
            raw().with_width(20).with_h_align("center"),
        ]);

        // center would start at 40, the start group ends at 60 plus one gap
        assert_numbers(
            &Sizing.layout(&parent, &children, true),
            &[
                [60.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [20.0, 10.0, 64.0, 0.0, 64.0, 0.0, 64.0, 0.0],
            ],
        );
    }
}
