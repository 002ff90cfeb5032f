//! Child layout algorithms.
//!
//! A layout pass takes a parent's geometry and the effective constraints of
//! its children and returns one geometry per child, in input order.
//!
//! # Pass structure
//!
//! 1. Without a `stack`, every child is laid out alone (overlay).
//! 2. Absolute children claim space first, largest first.
//! 3. Percentage and auto children share what is left.
//! 4. Children are grouped by their stack-axis alignment and anchored at the
//!    start, end, or center of the padded parent.
//!
//! The two strategies differ in how the inner padding is spent: [`Sizing`]
//! uses it as a gap between tiles, [`Spacing`] reserves it as a gutter around
//! each tile. Running out of space never fails; tiles that don't fit get zero
//! geometry.

mod sizing;
mod spacing;

pub use sizing::Sizing;
pub use spacing::Spacing;

use std::cmp::Ordering;

use glam::DVec2;
use tilez_core::{
    Anchor, Dimension, Extent, Mode, Stack, TileConstraints, TileDefaults, TileGeometry,
};
use tracing::trace;

/// Computes the geometry of a parent's children.
pub trait LayoutAlgorithm {
    /// The mode this algorithm implements.
    fn mode(&self) -> Mode;

    /// Lay out `children` inside `parent`, resolving undeclared attributes
    /// against `defaults`.
    ///
    /// `root` is true when `parent` is the root of its tree.
    fn layout_with(
        &self,
        parent: &TileGeometry,
        children: &[TileConstraints],
        root: bool,
        defaults: &TileDefaults,
    ) -> Vec<TileGeometry>;

    /// Lay out `children` inside `parent` with the default attribute values.
    fn layout(
        &self,
        parent: &TileGeometry,
        children: &[TileConstraints],
        root: bool,
    ) -> Vec<TileGeometry> {
        self.layout_with(parent, children, root, &TileDefaults::default())
    }
}

/// Select the algorithm for a layout mode.
pub fn algorithm_for(mode: Mode) -> &'static dyn LayoutAlgorithm {
    match mode {
        Mode::Sizing => &Sizing,
        Mode::Spacing => &Spacing,
    }
}

/// Mode-specific steps of a layout pass.
pub(crate) trait PassStrategy {
    /// Gap kept between a center group and a colliding start or end group.
    fn group_gap(&self, pass: &LayoutPass<'_>) -> f64;

    /// Adjust the available space before any size is computed.
    fn prepare(&self, _pass: &mut LayoutPass<'_>) {}

    /// Stack-axis sizes of absolute children, given in sort order.
    fn absolute_sizes(&self, pass: &mut LayoutPass<'_>, declared: &[f64]) -> Vec<f64>;

    /// Stack-axis sizes of percentage children followed by `n_flex` auto children.
    fn flexible_sizes(
        &self,
        pass: &mut LayoutPass<'_>,
        percentages: &[f64],
        n_flex: usize,
    ) -> Vec<f64>;

    /// Cross-axis size of a child.
    fn cross_size(&self, pass: &LayoutPass<'_>, declared: Dimension) -> f64 {
        pass.clamped_cross(declared)
    }

    /// Stack-axis extent of an alignment group.
    fn group_extent(&self, pass: &LayoutPass<'_>, sizes: &[f64]) -> f64;

    /// Position the tiles of one alignment group starting at `anchor`.
    fn place_group(&self, pass: &LayoutPass<'_>, group: &[usize], anchor: f64, tiles: &mut [Tile]);
}

/// A child while its pass is running.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tile {
    /// Resolved attributes, and the final size and position once placed
    pub(crate) geometry: TileGeometry,
    pub(crate) main: f64,
    pub(crate) cross: f64,
    pub(crate) sub_root: bool,
}

/// Mutable state of a single layout pass.
#[derive(Debug)]
pub(crate) struct LayoutPass<'a> {
    pub(crate) parent: &'a TileGeometry,
    pub(crate) stack: Stack,
    pub(crate) root: bool,
    /// Usable stack-axis size
    pub(crate) stack_full: f64,
    /// Usable cross-axis size
    pub(crate) fixed_full: f64,
    /// Stack-axis space not yet claimed
    pub(crate) full: f64,
    /// Whether an earlier tile already claimed space
    pub(crate) consumed: bool,
}

impl<'a> LayoutPass<'a> {
    /// Run a full pass with `strategy`.
    pub(crate) fn run<S: PassStrategy>(
        strategy: &S,
        parent: &'a TileGeometry,
        children: &[TileConstraints],
        root: bool,
        defaults: &TileDefaults,
    ) -> Vec<TileGeometry> {
        if children.is_empty() {
            return Vec::new();
        }

        match parent.stack {
            Some(stack) => Self::stacked(strategy, parent, stack, children, root, defaults),
            None => children
                .iter()
                .flat_map(|child| {
                    Self::stacked(
                        strategy,
                        parent,
                        Stack::Horizontal,
                        std::slice::from_ref(child),
                        root,
                        defaults,
                    )
                })
                .collect(),
        }
    }

    fn stacked<S: PassStrategy>(
        strategy: &S,
        parent: &'a TileGeometry,
        stack: Stack,
        children: &[TileConstraints],
        root: bool,
        defaults: &TileDefaults,
    ) -> Vec<TileGeometry> {
        let main = stack.main_extent();
        let cross = stack.cross_extent();
        let outer = parent.outer_padding;

        let mut tiles: Vec<Tile> = children
            .iter()
            .map(|child| {
                let geometry = resolve_child(parent, child, defaults);
                Tile {
                    sub_root: geometry.surface_type != parent.surface_type,
                    geometry,
                    main: 0.0,
                    cross: 0.0,
                }
            })
            .collect();

        let stack_full = (parent.size(main) - 2.0 * outer).max(0.0);
        if stack_full <= 0.0 {
            trace!(?stack, children = children.len(), "no space on stack axis");
            return tiles.into_iter().map(|tile| tile.geometry).collect();
        }

        let mut pass = LayoutPass {
            parent,
            stack,
            root,
            stack_full,
            fixed_full: (parent.size(cross) - 2.0 * outer).max(0.0),
            full: stack_full,
            consumed: false,
        };
        strategy.prepare(&mut pass);

        // Sizes
        let order = sorted_order(children, main);
        let (absolute, rest): (Vec<usize>, Vec<usize>) = order
            .iter()
            .copied()
            .partition(|&i| children[i].dim(main).is_absolute());

        let declared: Vec<f64> = absolute
            .iter()
            .filter_map(|&i| children[i].dim(main).size())
            .collect();
        let percentages: Vec<f64> = rest
            .iter()
            .filter_map(|&i| match children[i].dim(main) {
                Dimension::Percentage(p) => Some(p),
                _ => None,
            })
            .collect();
        let n_flex = rest.len() - percentages.len();

        let mut sizes = strategy.absolute_sizes(&mut pass, &declared);
        sizes.extend(strategy.flexible_sizes(&mut pass, &percentages, n_flex));

        for (&i, size) in order.iter().zip(sizes) {
            tiles[i].main = size;
        }
        for (tile, child) in tiles.iter_mut().zip(children) {
            tile.cross = strategy.cross_size(&pass, child.dim(cross));
        }

        // Alignment
        let group = |anchor: Anchor| -> Vec<usize> {
            (0..tiles.len())
                .filter(|&i| pass.main_anchor(&tiles[i].geometry) == anchor)
                .collect()
        };
        let start = group(Anchor::Start);
        let center = group(Anchor::Center);
        let end = group(Anchor::End);

        let extent = |group: &[usize]| {
            let sizes: Vec<f64> = group.iter().map(|&i| tiles[i].main).collect();
            strategy.group_extent(&pass, &sizes)
        };
        let start_size = extent(&start);
        let center_size = extent(&center);
        let end_size = extent(&end);

        let gap = strategy.group_gap(&pass);
        let total = pass.stack_full + 2.0 * outer;
        let start_end = outer + start_size + if start_size > 0.0 { gap } else { 0.0 };
        let end_start = total - outer - end_size - if end_size > 0.0 { gap } else { 0.0 };

        let mut center_anchor = (total - center_size) / 2.0;
        if start_end > center_anchor {
            center_anchor = start_end;
        } else if center_anchor + center_size > end_start {
            center_anchor = end_start - center_size;
        }

        strategy.place_group(&pass, &start, outer, &mut tiles);
        strategy.place_group(&pass, &end, outer + pass.stack_full - end_size, &mut tiles);
        strategy.place_group(&pass, &center, center_anchor, &mut tiles);

        tiles.into_iter().map(|tile| tile.geometry).collect()
    }

    pub(crate) fn inner_padding(&self) -> f64 {
        self.parent.inner_padding
    }

    pub(crate) fn outer_padding(&self) -> f64 {
        self.parent.outer_padding
    }

    /// Own absolute size, else a share of the cross size, else all of it.
    pub(crate) fn clamped_cross(&self, declared: Dimension) -> f64 {
        let size = declared
            .size()
            .or_else(|| declared.rel_size(self.fixed_full))
            .unwrap_or(self.fixed_full);

        size.min(self.fixed_full)
    }

    /// Alignment of a tile along the stack axis.
    pub(crate) fn main_anchor(&self, geometry: &TileGeometry) -> Anchor {
        match self.stack {
            Stack::Horizontal => geometry.h_align.anchor(),
            Stack::Vertical => geometry.v_align.anchor(),
        }
    }

    /// Alignment of a tile across the stack axis.
    pub(crate) fn cross_anchor(&self, geometry: &TileGeometry) -> Anchor {
        match self.stack {
            Stack::Horizontal => geometry.v_align.anchor(),
            Stack::Vertical => geometry.h_align.anchor(),
        }
    }

    /// Offset that aligns a tile within `diff` spare cross-axis space.
    pub(crate) fn cross_offset(&self, geometry: &TileGeometry, diff: f64) -> f64 {
        if diff <= 0.0 {
            return 0.0;
        }
        match self.cross_anchor(geometry) {
            Anchor::Start => 0.0,
            Anchor::Center => diff / 2.0,
            Anchor::End => diff,
        }
    }

    /// Write a tile's size and its position in the parent frame.
    pub(crate) fn place(&self, tile: &mut Tile, main_pos: f64, cross_pos: f64) {
        let local = match self.stack {
            Stack::Horizontal => DVec2::new(main_pos, cross_pos),
            Stack::Vertical => DVec2::new(cross_pos, main_pos),
        };

        let mut geometry = tile.geometry;
        geometry.set_size(self.stack.main_extent(), tile.main);
        geometry.set_size(self.stack.cross_extent(), tile.cross.max(0.0));
        tile.geometry = geometry.placed_in(self.parent, local, tile.sub_root);
    }
}

/// Zero-sized geometry with the child's resolved attributes.
///
/// Inheritable attributes fall back to the parent's resolved values.
fn resolve_child(
    parent: &TileGeometry,
    child: &TileConstraints,
    defaults: &TileDefaults,
) -> TileGeometry {
    let mut geometry = defaults.resolve(child);
    geometry.surface_type = child.surface_type.unwrap_or(parent.surface_type);
    geometry.inner_padding = child.inner_padding.unwrap_or(parent.inner_padding);
    geometry.mode = child.mode.unwrap_or(parent.mode);
    geometry
}

/// Child indices ordered for sizing: absolute, then percentage, then auto.
///
/// Absolute children are ordered by declared size, largest first. Ties keep
/// declaration order.
fn sorted_order(children: &[TileConstraints], main: Extent) -> Vec<usize> {
    let mut order: Vec<usize> = (0..children.len()).collect();
    order.sort_by(|&a, &b| {
        let da = children[a].dim(main);
        let db = children[b].dim(main);

        db.compare_unit(&da)
            .then_with(|| match (da, db) {
                (Dimension::Absolute(x), Dimension::Absolute(y)) => y.total_cmp(&x),
                _ => Ordering::Equal,
            })
            .then(a.cmp(&b))
    });
    order
}

#[cfg(test)]
pub(crate) mod test_support {
    use tilez_core::{RawConstraints, TileConstraints, TileGeometry};

    /// Root geometry of the given size with constraints applied.
    pub fn parent(width: f64, height: f64, raw: RawConstraints) -> TileGeometry {
        let constraints = TileConstraints::from_raw(&raw).unwrap();
        tilez_core::TileDefaults::default()
            .resolve(&constraints)
            .with_size(width, height)
    }

    pub fn children(raws: Vec<RawConstraints>) -> Vec<TileConstraints> {
        raws.iter()
            .map(|raw| TileConstraints::from_raw(raw).unwrap())
            .collect()
    }

    /// `[width, height, root_x, root_y, sub_root_x, sub_root_y, parent_x, parent_y]`
    pub fn numbers(geometries: &[TileGeometry]) -> Vec<[f64; 8]> {
        geometries
            .iter()
            .map(|g| {
                [
                    g.width,
                    g.height,
                    g.root_x,
                    g.root_y,
                    g.sub_root_x,
                    g.sub_root_y,
                    g.parent_x,
                    g.parent_y,
                ]
            })
            .collect()
    }

    pub fn assert_numbers(geometries: &[TileGeometry], expected: &[[f64; 8]]) {
        let actual = numbers(geometries);
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (a, e) in actual.iter().zip(expected) {
            for (x, y) in a.iter().zip(e) {
                assert!((x - y).abs() < 0.001, "expected {e:?}, got {a:?}");
            }
        }
    }
}
