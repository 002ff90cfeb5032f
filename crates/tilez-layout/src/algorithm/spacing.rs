//! Spacing mode: every tile reserves its inner padding as a gutter.

use tilez_core::{Dimension, Mode, TileConstraints, TileDefaults, TileGeometry};

use super::{LayoutAlgorithm, LayoutPass, PassStrategy, Tile};

/// Lays out children with half the inner padding on each side of every tile.
///
/// Nested parents grow by their inner padding so that gutters of adjacent
/// levels line up; the root does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spacing;

impl LayoutAlgorithm for Spacing {
    fn mode(&self) -> Mode {
        Mode::Spacing
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

impl PassStrategy for Spacing {
    fn group_gap(&self, _pass: &LayoutPass<'_>) -> f64 {
        0.0
    }

    fn prepare(&self, pass: &mut LayoutPass<'_>) {
        if !pass.root {
            let inner = pass.inner_padding();
            pass.full += inner;
            pass.stack_full += inner;
            pass.fixed_full += inner;
        }
    }

    fn absolute_sizes(&self, pass: &mut LayoutPass<'_>, declared: &[f64]) -> Vec<f64> {
        let inner = pass.inner_padding();

        declared
            .iter()
            .map(|&size| {
                let step = size.min(pass.full);
                let size = step - inner;
                if size < 1.0 {
                    return 0.0;
                }
                pass.full -= step;
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

        if pass.full < inner + 1.0 {
            return vec![0.0; total];
        }

        let base = pass.full;
        let mut sizes: Vec<f64> = percentages
            .iter()
            .map(|&pct| {
                let step = (pct * base).min(pass.full);
                let size = step - inner;
                if size < 1.0 {
                    return 0.0;
                }
                pass.full -= step;
                size
            })
            .collect();

        if pass.full >= inner + 1.0 {
            let fitting = (1..=n_flex).rev().find_map(|n| {
                let size = (pass.full - n as f64 * inner) / n as f64;
                (size >= 1.0).then_some((n, size))
            });
            if let Some((n, size)) = fitting {
                sizes.extend(std::iter::repeat(size).take(n));
            }
        }

        sizes.resize(total, 0.0);
        sizes
    }

    /// Clamped like [`Sizing`](super::Sizing), then shrunk by the gutter.
    fn cross_size(&self, pass: &LayoutPass<'_>, declared: Dimension) -> f64 {
        (pass.clamped_cross(declared) - pass.inner_padding()).max(0.0)
    }

    fn group_extent(&self, pass: &LayoutPass<'_>, sizes: &[f64]) -> f64 {
        let inner = pass.inner_padding();

        sizes
            .iter()
            .filter(|&&size| size > 0.0)
            .map(|size| size + inner)
            .sum()
    }

    fn place_group(&self, pass: &LayoutPass<'_>, group: &[usize], anchor: f64, tiles: &mut [Tile]) {
        let inner = pass.inner_padding();
        let half = inner / 2.0;
        let shift = if pass.root { 0.0 } else { half };

        let mut cursor = anchor - shift;
        let cross_start = pass.outer_padding() - shift;

        for &i in group {
            let tile = &mut tiles[i];
            if tile.main <= 0.0 {
                continue;
            }

            cursor += half;
            let diff = pass.fixed_full - tile.cross - inner;
            let offset = half + pass.cross_offset(&tile.geometry, diff);

            pass.place(tile, cursor, cross_start + offset);
            cursor += half + tile.main;
        }
    }
}
