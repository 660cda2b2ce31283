//! Compass - A direction-driven tree layout engine for box diagrams.
//!
//! Each node is a rectangle of known size; each edge says in which of the
//! eight compass directions a child sits relative to its parent. Compass
//! turns that into absolute positions, straight connector segments between
//! the rectangles, and a list of any rectangles that still overlap.

pub mod config;
pub mod connector;
pub mod diagram;
pub mod engine;
pub mod footprint;
pub mod position;
pub mod tree;
pub mod validate;

mod error;

pub use compass_core::{canvas, direction, geometry, identifier, provider};

pub use error::{CompassError, LayoutError};

use log::{debug, info};
use serde::Serialize;

use compass_core::{
    canvas::Canvas,
    geometry::{Bounds, Point, Size},
    identifier::{NodeId, ShapeId},
    provider::GeometryProvider,
};

use config::AppConfig;
use connector::Connector;
use diagram::Diagram;
use engine::Engine;
use tree::{Adjacency, Tree};
use validate::Collision;

/// Final position and size of one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedNode {
    pub id: NodeId,
    pub position: Point,
    pub size: Size,
}

impl PlacedNode {
    /// Returns the node's rectangle.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.size)
    }
}

/// The result of a layout run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    nodes: Vec<PlacedNode>,
    connectors: Vec<Connector>,
    collisions: Vec<Collision>,
}

impl Layout {
    /// Returns every node in id order.
    pub fn nodes(&self) -> &[PlacedNode] {
        &self.nodes
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&PlacedNode> {
        self.nodes.get(id.index()).filter(|node| node.id == id)
    }

    /// Returns the connectors in layout order.
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Returns the overlapping shape pairs found after layout.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Returns the union of all node rectangles.
    ///
    /// An empty layout has default (zero) bounds.
    pub fn bounds(&self) -> Bounds {
        self.nodes
            .iter()
            .map(PlacedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }

    /// Moves every node and connector by `offset`.
    pub fn translate(&mut self, offset: Point) {
        for node in &mut self.nodes {
            node.position = node.position.add_point(offset);
        }
        for connector in &mut self.connectors {
            connector.start = connector.start.add_point(offset);
            connector.end = connector.end.add_point(offset);
        }
    }

    /// Moves the layout so its bounding box starts at the origin.
    pub fn normalize(&mut self) {
        let offset = Point::default().sub_point(self.bounds().min_point());
        self.translate(offset);
    }
}

/// Builder for running the layout pipeline.
///
/// # Examples
///
/// ```
/// use compass::{
///     LayoutBuilder,
///     diagram::{Diagram, DiagramNode},
///     identifier::NodeId,
/// };
///
/// let diagram = Diagram::new(vec![
///     DiagramNode::new(12.0, 3.0)
///         .with_connection("w", 1)
///         .with_connection("e", 2),
///     DiagramNode::new(21.0, 3.0),
///     DiagramNode::new(12.0, 6.0),
/// ]);
///
/// let layout = LayoutBuilder::default()
///     .layout(&diagram)
///     .expect("Failed to lay out");
///
/// assert_eq!(layout.connectors().len(), 2);
/// assert!(layout.collisions().is_empty());
/// assert_eq!(layout.node(NodeId::new(1)).unwrap().position.x(), 0.0);
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Spacing, direction profile and validation settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder runs with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out a [`Diagram`] on a fresh in-memory [`Canvas`].
    ///
    /// Node `i` of the diagram becomes shape `i` of the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`CompassError::Input`] for a negative or non-finite size,
    /// [`CompassError::Layout`] for malformed labels or a connection graph
    /// that is not a tree, and anything [`LayoutBuilder::layout_with`] returns.
    pub fn layout(&self, diagram: &Diagram) -> Result<Layout, CompassError> {
        if let Some((node, size)) = diagram.invalid_size() {
            return Err(CompassError::Input(format!(
                "node {node} has invalid size {} x {}",
                size.width(),
                size.height()
            )));
        }

        let adjacency = diagram.to_adjacency()?;
        debug!(nodes = diagram.len(), edges = adjacency.edge_count(); "Diagram converted");

        let mut canvas = Canvas::new();
        let shapes: Vec<ShapeId> = diagram
            .sizes()
            .into_iter()
            .map(|size| canvas.add_shape(size))
            .collect();

        self.layout_with(&mut canvas, &shapes, &adjacency)
    }

    /// Run the full pipeline against any [`GeometryProvider`].
    ///
    /// `shapes[i]` is the provider handle of node `i`. The stages are tree
    /// construction, layout, footprint removal, validation and connector
    /// building; positions are left in the provider as well as returned.
    ///
    /// # Errors
    ///
    /// Returns [`CompassError::Config`] for a negative or non-finite spacing,
    /// [`CompassError::Layout`] if the adjacency map is not a tree, and
    /// [`CompassError::Collisions`] when collisions are denied and any
    /// remain.
    pub fn layout_with<P: GeometryProvider>(
        &self,
        provider: &mut P,
        shapes: &[ShapeId],
        adjacency: &Adjacency,
    ) -> Result<Layout, CompassError> {
        let layout_config = self.config.layout();
        let min_spacing = layout_config.min_spacing();
        if !min_spacing.is_finite() || min_spacing < 0.0 {
            return Err(CompassError::Config(format!(
                "min_spacing must be a non-negative number, got {min_spacing}"
            )));
        }

        info!(nodes = shapes.len(), profile:% = layout_config.profile(); "Building tree");
        let mut tree = Tree::build_with_profile(shapes, adjacency, layout_config.profile())?;
        debug!(root:% = tree.root(); "Tree built successfully");

        Engine::new(min_spacing).layout(&mut tree, provider);
        let removed = footprint::remove_groups(&mut tree, provider);
        info!(groups_removed = removed; "Layout calculated");

        let report = validate::validate(provider, shapes);
        if !report.is_clear() {
            if self.config.validation().deny_collisions() {
                return Err(CompassError::Collisions { count: report.len() });
            }
            info!(collisions = report.len(); "Layout has overlapping shapes");
        }

        let connectors = connector::connect(&tree, provider);
        info!(connectors = connectors.len(); "Connectors built");

        let nodes = tree
            .nodes()
            .map(|node| PlacedNode {
                id: node.id(),
                position: provider.position(node.shape()),
                size: provider.size(node.shape()),
            })
            .collect();

        let mut layout = Layout {
            nodes,
            connectors,
            collisions: report.into_collisions(),
        };
        if layout_config.normalize() {
            layout.normalize();
            debug!("Layout normalized to origin");
        }
        Ok(layout)
    }
}
