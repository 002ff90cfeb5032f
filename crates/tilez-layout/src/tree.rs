//! The tile tree.
//!
//! Tiles live in an arena owned by [`TileTree`] and refer to each other by
//! [`TileId`]. Attaching or updating a tile re-runs the layout passes below
//! the affected ancestor and publishes every new geometry through the tile's
//! [`Observable`] cell.

use std::fmt;

use glam::DVec2;
use tilez_core::{
    ConstraintField, LayoutError, RawConstraints, Result, SurfaceType, TileConstraints,
    TileDefaults, TileGeometry, TileId,
};
use tracing::{debug, trace};

use crate::algorithm::algorithm_for;
use crate::builder::RootGeometryBuilder;
use crate::observable::{Observable, Subscription};
use crate::surface::SurfaceBinding;
use crate::template::TileTemplate;

/// Why a tile starts its own coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootType {
    /// The root of the tree
    Root,
    /// A tile whose surface type differs from its parent's
    SubRoot,
}

/// A tile in the tree.
#[derive(Debug)]
pub struct TileNode {
    id: TileId,
    /// Constraints as given by the caller
    declared: TileConstraints,
    /// Declared constraints with inherited attributes filled in
    effective: TileConstraints,
    geometry: Observable<Option<TileGeometry>>,
    parent: Option<TileId>,
    children: Vec<TileId>,
}

impl TileNode {
    fn new(
        id: TileId,
        declared: TileConstraints,
        effective: TileConstraints,
        geometry: Option<TileGeometry>,
        parent: Option<TileId>,
    ) -> Self {
        Self {
            id,
            declared,
            effective,
            geometry: Observable::new(geometry),
            parent,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    /// Declared constraints.
    pub fn constraints(&self) -> &TileConstraints {
        &self.declared
    }

    /// Constraints after inheritance from the parent.
    pub fn effective_constraints(&self) -> &TileConstraints {
        &self.effective
    }

    /// Current geometry, `None` until the parent's first layout pass.
    pub fn geometry(&self) -> Option<TileGeometry> {
        self.geometry.get()
    }

    pub fn parent(&self) -> Option<TileId> {
        self.parent
    }

    pub fn children(&self) -> &[TileId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn width(&self) -> Option<f64> {
        self.geometry().map(|g| g.width)
    }

    pub fn height(&self) -> Option<f64> {
        self.geometry().map(|g| g.height)
    }

    /// Call `observer` with the current geometry and after every rewrite.
    pub fn observe<F>(&self, observer: F) -> Subscription
    where
        F: FnMut(&Option<TileGeometry>) + 'static,
    {
        self.geometry.subscribe(observer)
    }
}

/// Arena of tiles with incremental layout.
pub struct TileTree {
    nodes: Vec<TileNode>,
    roots: Vec<TileId>,
    defaults: TileDefaults,
    surfaces: Option<Box<dyn SurfaceBinding>>,
}

impl fmt::Debug for TileTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileTree")
            .field("nodes", &self.nodes)
            .field("roots", &self.roots)
            .field("defaults", &self.defaults)
            .field("surfaces", &self.surfaces.is_some())
            .finish()
    }
}

impl Default for TileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TileTree {
    /// Create an empty tree with the default attribute values.
    pub fn new() -> Self {
        Self::with_defaults(TileDefaults::default())
    }

    /// Create an empty tree resolving undeclared attributes against `defaults`.
    pub fn with_defaults(defaults: TileDefaults) -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            defaults,
            surfaces: None,
        }
    }

    /// Install the binding used to read back canvas sizes.
    pub fn set_surface_binding(&mut self, binding: impl SurfaceBinding + 'static) {
        self.surfaces = Some(Box::new(binding));
    }

    pub fn defaults(&self) -> &TileDefaults {
        &self.defaults
    }

    pub fn roots(&self) -> &[TileId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a tile by ID.
    pub fn node(&self, id: TileId) -> Result<&TileNode, LayoutError> {
        self.nodes.get(id.0).ok_or(LayoutError::UnknownTile { id })
    }

    /// Iterate over all tiles in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &TileNode> {
        self.nodes.iter()
    }

    /// Add a root tile. Its geometry is available immediately.
    pub fn build_root(&mut self, raw: &RawConstraints) -> Result<TileId> {
        let constraints = TileConstraints::from_raw(raw)?;
        let geometry = RootGeometryBuilder::new(&self.defaults).build(&constraints)?;

        let id = TileId(self.nodes.len());
        self.nodes
            .push(TileNode::new(id, constraints, constraints, Some(geometry), None));
        self.roots.push(id);

        debug!(tile = %id, width = geometry.width, height = geometry.height, "built root tile");
        Ok(id)
    }

    /// Add a tile as the last child of `parent` and lay out the parent again.
    pub fn attach_child(&mut self, raw: &RawConstraints, parent: TileId) -> Result<TileId> {
        let declared = TileConstraints::from_raw(raw)?;
        let effective = declared.derive_from(&self.inherited(parent)?)?;

        let id = TileId(self.nodes.len());
        self.nodes
            .push(TileNode::new(id, declared, effective, None, Some(parent)));
        self.nodes[parent.0].children.push(id);

        debug!(tile = %id, %parent, "attached tile");
        self.update_sub_specs(parent)?;
        Ok(id)
    }

    /// Replace the declared constraints of a tile and lay out what they affect.
    ///
    /// Nothing is modified when the new constraints are rejected.
    pub fn update_nodes(&mut self, id: TileId, raw: &RawConstraints) -> Result<()> {
        let declared = TileConstraints::from_raw(raw)?;
        let node = self.node(id)?;
        let effective = match node.parent {
            Some(parent) => declared.derive_from(&self.inherited(parent)?)?,
            None => declared,
        };
        let previous = node.geometry();

        if previous.is_some() {
            if effective.stack != node.effective.stack {
                return Err(immutable(ConstraintField::Stack).into());
            }
            if self.surface_type(&effective) != self.surface_type(&node.effective) {
                return Err(immutable(ConstraintField::SurfaceType).into());
            }
        }

        let builder = RootGeometryBuilder::new(&self.defaults);
        let mut geometry = match node.parent {
            None => Some(builder.build(&effective)?),
            Some(_) => previous.map(|previous| builder.nested(&effective, &previous)),
        };

        let surface = self.surface_type(&effective);
        if surface == SurfaceType::Canvas && self.is_sub_root(id)? {
            if let Some(geometry) = geometry.as_mut() {
                let size = self
                    .surfaces
                    .as_ref()
                    .and_then(|binding| binding.intrinsic_size(id, surface))
                    .unwrap_or_else(|| {
                        DVec2::new(
                            effective.abs_width().unwrap_or(geometry.width),
                            effective.abs_height().unwrap_or(geometry.height),
                        )
                    });
                *geometry = geometry.with_size(size.x, size.y);
            }
        }

        let changed = node.effective.changed_fields(&effective);
        debug!(tile = %id, ?changed, "updating tile");

        let node = &mut self.nodes[id.0];
        node.declared = declared;
        node.effective = effective;

        // An ancestor pass rewrites this tile; observers only see its result.
        let start = self.select_start_node(id, &changed)?;
        if start == id {
            if let Some(geometry) = geometry {
                self.nodes[id.0].geometry.set(Some(geometry));
            }
        }

        self.update_sub_specs(start)
    }

    /// The tile whose layout pass covers a change of `changed` on `id`.
    ///
    /// Canvas tiles start at their sub-root. Placement changes of a nested
    /// tile start at its parent; anything else starts at the tile itself.
    pub fn select_start_node(
        &self,
        id: TileId,
        changed: &[ConstraintField],
    ) -> Result<TileId, LayoutError> {
        let node = self.node(id)?;

        if self.surface_type(&node.effective) == SurfaceType::Canvas {
            return self.nearest_sub_root(id);
        }

        match node.parent {
            Some(parent) if changed.iter().any(|field| field.affects_placement()) => Ok(parent),
            _ => Ok(id),
        }
    }

    /// Lay out the children of `id`, then the subtrees below them.
    ///
    /// Passes run depth-first in pre-order. Tiles without geometry or
    /// children are left alone.
    pub fn update_sub_specs(&mut self, id: TileId) -> Result<()> {
        self.node(id)?;

        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            let children = self.layout_children(id)?;
            pending.extend(children.into_iter().rev());
        }
        Ok(())
    }

    /// Run the layout pass of a single tile and return the children it wrote.
    fn layout_children(&mut self, id: TileId) -> Result<Vec<TileId>> {
        let node = self.node(id)?;
        let Some(geometry) = node.geometry() else {
            return Ok(Vec::new());
        };
        if !node.has_children() {
            return Ok(Vec::new());
        }

        let root = node.is_root();
        let children = node.children.clone();
        let inherited = self.inherited(id)?;
        let effective = children
            .iter()
            .map(|child| self.nodes[child.0].declared.derive_from(&inherited))
            .collect::<Result<Vec<_>, _>>()?;

        let algorithm = algorithm_for(geometry.mode);
        debug!(tile = %id, mode = %algorithm.mode(), children = children.len(), "layout pass");
        let geometries = algorithm.layout_with(&geometry, &effective, root, &self.defaults);

        for ((&child, constraints), child_geometry) in
            children.iter().zip(effective).zip(geometries)
        {
            trace!(
                tile = %child,
                width = child_geometry.width,
                height = child_geometry.height,
                x = child_geometry.root_x,
                y = child_geometry.root_y,
                "child geometry"
            );
            let node = &mut self.nodes[child.0];
            node.effective = constraints;
            node.geometry.set(Some(child_geometry));
        }

        Ok(children)
    }

    /// Build a whole tree from a template, root first.
    pub fn from_template(&mut self, template: &TileTemplate) -> Result<TileId> {
        let root = self.build_root(&template.constraints)?;
        self.attach_template_children(root, template)?;
        Ok(root)
    }

    fn attach_template_children(&mut self, parent: TileId, template: &TileTemplate) -> Result<()> {
        for child in &template.children {
            let id = self.attach_child(&child.constraints, parent)?;
            self.attach_template_children(id, child)?;
        }
        Ok(())
    }

    pub fn has_children(&self, id: TileId) -> Result<bool, LayoutError> {
        Ok(self.node(id)?.has_children())
    }

    pub fn is_root(&self, id: TileId) -> Result<bool, LayoutError> {
        Ok(self.node(id)?.is_root())
    }

    /// Whether the tile is the root or renders into a different surface type
    /// than its parent.
    pub fn is_sub_root(&self, id: TileId) -> Result<bool, LayoutError> {
        let node = self.node(id)?;
        match node.parent {
            None => Ok(true),
            Some(parent) => {
                let parent = self.node(parent)?;
                Ok(self.surface_type(&node.effective) != self.surface_type(&parent.effective))
            }
        }
    }

    pub fn root_type(&self, id: TileId) -> Result<Option<RootType>, LayoutError> {
        if self.is_root(id)? {
            Ok(Some(RootType::Root))
        } else if self.is_sub_root(id)? {
            Ok(Some(RootType::SubRoot))
        } else {
            Ok(None)
        }
    }

    pub fn width(&self, id: TileId) -> Result<Option<f64>, LayoutError> {
        Ok(self.node(id)?.width())
    }

    pub fn height(&self, id: TileId) -> Result<Option<f64>, LayoutError> {
        Ok(self.node(id)?.height())
    }

    /// Position of the tile on the surface it renders into.
    ///
    /// This is the parent frame, except for a sub-root inside a plain tile:
    /// plain tiles have no surface of their own, so the parent's offset from
    /// its sub-root is added.
    pub fn coords(&self, id: TileId) -> Result<Option<DVec2>, LayoutError> {
        let node = self.node(id)?;
        let Some(geometry) = node.geometry() else {
            return Ok(None);
        };

        let mut coords = geometry.parent_origin();
        if let Some(parent) = node.parent {
            let parent = self.node(parent)?;
            let plain_parent = self.surface_type(&parent.effective) == SurfaceType::Plain;
            if plain_parent && self.is_sub_root(id)? {
                if let Some(parent_geometry) = parent.geometry() {
                    coords += parent_geometry.sub_root_origin();
                }
            }
        }
        Ok(Some(coords))
    }

    pub fn geometry(&self, id: TileId) -> Result<Option<TileGeometry>, LayoutError> {
        Ok(self.node(id)?.geometry())
    }

    pub fn constraints(&self, id: TileId) -> Result<&TileConstraints, LayoutError> {
        Ok(self.node(id)?.constraints())
    }

    pub fn children(&self, id: TileId) -> Result<&[TileId], LayoutError> {
        Ok(self.node(id)?.children())
    }

    pub fn parent(&self, id: TileId) -> Result<Option<TileId>, LayoutError> {
        Ok(self.node(id)?.parent())
    }

    /// Subscribe to geometry changes of a tile.
    pub fn observe<F>(&self, id: TileId, observer: F) -> Result<Subscription, LayoutError>
    where
        F: FnMut(&Option<TileGeometry>) + 'static,
    {
        Ok(self.node(id)?.observe(observer))
    }

    /// Effective constraints of `id` with inheritable fields resolved.
    fn inherited(&self, id: TileId) -> Result<TileConstraints, LayoutError> {
        let mut constraints = self.node(id)?.effective;
        constraints
            .surface_type
            .get_or_insert(self.defaults.surface_type);
        constraints
            .inner_padding
            .get_or_insert(self.defaults.inner_padding);
        constraints.mode.get_or_insert(self.defaults.mode);
        Ok(constraints)
    }

    fn surface_type(&self, constraints: &TileConstraints) -> SurfaceType {
        constraints.surface_type.unwrap_or(self.defaults.surface_type)
    }

    fn nearest_sub_root(&self, mut id: TileId) -> Result<TileId, LayoutError> {
        while !self.is_sub_root(id)? {
            match self.node(id)?.parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
        Ok(id)
    }
}

fn immutable(field: ConstraintField) -> LayoutError {
    LayoutError::ImmutableProperty {
        property: field.name(),
    }
}
