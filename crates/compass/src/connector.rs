//! Connector segments between laid-out parents and children.

use std::collections::HashSet;

use log::trace;
use serde::Serialize;

use compass_core::{
    direction::Direction,
    geometry::Point,
    identifier::NodeId,
    provider::GeometryProvider,
};

use crate::tree::Tree;

/// A straight segment from a parent's anchor to its child's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connector {
    pub parent: NodeId,
    pub child: NodeId,
    pub direction: Direction,
    pub start: Point,
    pub end: Point,
}

/// Builds one connector per tree edge.
///
/// Connectors of a child subtree are emitted before the edges of the node
/// it hangs off, in the same order the layout engine places them. `start`
/// is the parent's [`Direction::parent_anchor`] and `end` the child's
/// [`Direction::child_anchor`], both read from the provider's current
/// positions.
pub fn connect<P: GeometryProvider>(tree: &Tree, provider: &P) -> Vec<Connector> {
    let mut connectors = Vec::with_capacity(tree.len().saturating_sub(1));
    let mut visited = HashSet::new();
    let root = tree.root();
    visited.insert(root);
    connect_subtree(tree, provider, root, &mut visited, &mut connectors);
    connectors
}

fn connect_subtree<P: GeometryProvider>(
    tree: &Tree,
    provider: &P,
    parent: NodeId,
    visited: &mut HashSet<NodeId>,
    connectors: &mut Vec<Connector>,
) {
    let node = tree.node(parent);
    let edges: Vec<(Direction, NodeId)> = node.edges().collect();
    for &(_, child) in &edges {
        if tree.has_subtree(child) && visited.insert(child) {
            connect_subtree(tree, provider, child, visited, connectors);
        }
    }

    let parent_bounds = provider.bounds(node.shape());
    for (direction, child) in edges {
        let child_bounds = provider.bounds(tree.node(child).shape());
        let connector = Connector {
            parent,
            child,
            direction,
            start: parent_bounds.anchor_point(direction.parent_anchor()),
            end: child_bounds.anchor_point(direction.child_anchor()),
        };
        trace!(parent:% = parent, child:% = child, direction:% = direction; "Connected");
        connectors.push(connector);
    }
}
