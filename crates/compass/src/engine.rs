//! Recursive bottom-up layout of a [`Tree`].
//!
//! Every node that has children is laid out after its child subtrees. The
//! subtree's rectangles are collected in a provider group (the node's
//! footprint) so that later siblings are placed clear of everything already
//! arranged below a node, and so that a finished subtree can be moved as a
//! unit.

use std::collections::HashSet;

use log::{debug, info, trace};

use compass_core::{
    direction::Direction,
    geometry::Point,
    identifier::{GroupId, NodeId, ShapeId},
    provider::GeometryProvider,
};

use crate::{
    position::{NodeGeometry, PlacementMode, calculate_position},
    tree::Tree,
};

/// Positions every node of a tree through a [`GeometryProvider`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    min_spacing: f32,
}

impl Engine {
    /// Creates an engine that keeps at least `min_spacing` between a node and
    /// the rectangle it is placed against.
    pub fn new(min_spacing: f32) -> Self {
        Self { min_spacing }
    }

    /// Lays out the whole tree starting at its root.
    ///
    /// On return every node except a childless root is marked positioned and
    /// every node with children owns a footprint group. Call
    /// [`remove_groups`](crate::footprint::remove_groups) to release them.
    ///
    /// # Examples
    ///
    /// ```
    /// use compass::{engine::Engine, tree::{Adjacency, Tree}};
    /// use compass_core::{
    ///     canvas::Canvas,
    ///     direction::Direction,
    ///     geometry::{Point, Size},
    ///     identifier::NodeId,
    ///     provider::GeometryProvider,
    /// };
    ///
    /// let mut canvas = Canvas::new();
    /// let shapes = vec![
    ///     canvas.add_shape(Size::new(10.0, 10.0)),
    ///     canvas.add_shape(Size::new(10.0, 10.0)),
    /// ];
    /// let adjacency: Adjacency = [(NodeId::new(0), Direction::E, NodeId::new(1))]
    ///     .into_iter()
    ///     .collect();
    /// let mut tree = Tree::build(&shapes, &adjacency).unwrap();
    ///
    /// Engine::new(5.0).layout(&mut tree, &mut canvas);
    ///
    /// // The root is placed west of its only child.
    /// assert_eq!(canvas.position(shapes[0]), Point::new(-15.0, 0.0));
    /// assert_eq!(canvas.position(shapes[1]), Point::new(0.0, 0.0));
    /// ```
    pub fn layout<P: GeometryProvider>(&self, tree: &mut Tree, provider: &mut P) {
        info!(nodes = tree.len(), min_spacing = self.min_spacing; "Laying out tree");
        let mut visited = HashSet::new();
        let root = tree.root();
        visited.insert(root);
        self.layout_subtree(tree, provider, root, &mut visited);
    }

    fn layout_subtree<P: GeometryProvider>(
        &self,
        tree: &mut Tree,
        provider: &mut P,
        parent: NodeId,
        visited: &mut HashSet<NodeId>,
    ) {
        trace!(node:% = parent; "Entering subtree");

        let descendants: Vec<NodeId> = tree.depth_first(parent).collect();
        let mut edges: Vec<(Direction, NodeId)> = Vec::new();
        for child in descendants {
            let Ok(direction) = tree.node(parent).direction_to(child) else {
                continue;
            };
            if tree.has_subtree(child) && visited.insert(child) {
                self.layout_subtree(tree, provider, child, visited);
            }
            edges.push((direction, child));
        }

        let group = ensure_footprint(tree, provider, parent);
        for (direction, child) in edges {
            self.place_edge(tree, provider, parent, group, direction, child);
            merge_footprint(tree, provider, group, child);
        }
    }

    fn place_edge<P: GeometryProvider>(
        &self,
        tree: &mut Tree,
        provider: &mut P,
        parent: NodeId,
        group: GroupId,
        direction: Direction,
        child: NodeId,
    ) {
        let parent_shape = tree.node(parent).shape();
        let child_shape = tree.node(child).shape();
        let parent_geometry =
            NodeGeometry::new(provider.bounds(parent_shape), provider.group_bounds(group));
        let child_geometry = geometry_of(tree, provider, child);

        if !tree.node(parent).is_positioned() {
            let position = calculate_position(
                parent_geometry,
                child_geometry,
                direction,
                self.min_spacing,
                PlacementMode::ParentRelativeToChild,
            );
            let offset = position.sub_point(provider.position(parent_shape));
            let members = provider.group_members(group);
            translate_all(provider, &members, offset);
            tree.node_mut(parent).mark_positioned();
            tree.node_mut(child).mark_positioned();
            debug!(
                node:% = parent,
                anchor:% = child,
                direction:% = direction.opposite(),
                x = position.x(),
                y = position.y();
                "Placed parent against child"
            );
        } else {
            let position = calculate_position(
                parent_geometry,
                child_geometry,
                direction,
                self.min_spacing,
                PlacementMode::ChildRelativeToParent,
            );
            let offset = position.sub_point(provider.position(child_shape));
            let members = footprint_members(tree, provider, child);
            translate_all(provider, &members, offset);
            tree.node_mut(child).mark_positioned();
            debug!(
                node:% = child,
                anchor:% = parent,
                direction:% = direction,
                x = position.x(),
                y = position.y();
                "Placed child against parent"
            );
        }
    }
}

/// Returns the footprint group of `node`, creating it on first use.
///
/// A new group starts out holding the node's own shape.
fn ensure_footprint<P: GeometryProvider>(tree: &mut Tree, provider: &mut P, node: NodeId) -> GroupId {
    if let Some(group) = tree.node(node).footprint() {
        return group;
    }
    let group = provider.create_group();
    provider.add_to_group(group, tree.node(node).shape());
    tree.node_mut(node).set_footprint(group);
    trace!(node:% = node, group:% = group; "Registered footprint");
    group
}

/// Adds every member of `child`'s footprint, and `child` itself, to `group`.
fn merge_footprint<P: GeometryProvider>(
    tree: &Tree,
    provider: &mut P,
    group: GroupId,
    child: NodeId,
) {
    let mut added = 0usize;
    for shape in footprint_members(tree, provider, child) {
        if provider.add_to_group(group, shape) {
            added += 1;
        }
    }
    if provider.add_to_group(group, tree.node(child).shape()) {
        added += 1;
    }
    trace!(group:% = group, child:% = child, added = added; "Merged footprint");
}

/// Shapes that move together with `node`: its footprint, or just its shape.
fn footprint_members<P: GeometryProvider>(tree: &Tree, provider: &P, node: NodeId) -> Vec<ShapeId> {
    let node = tree.node(node);
    match node.footprint() {
        Some(group) => provider.group_members(group),
        None => vec![node.shape()],
    }
}

fn geometry_of<P: GeometryProvider>(tree: &Tree, provider: &P, node: NodeId) -> NodeGeometry {
    let node = tree.node(node);
    let bounds = provider.bounds(node.shape());
    match node.footprint() {
        Some(group) => NodeGeometry::new(bounds, provider.group_bounds(group)),
        None => NodeGeometry::single(bounds),
    }
}

fn translate_all<P: GeometryProvider>(provider: &mut P, shapes: &[ShapeId], offset: Point) {
    if offset.is_zero() {
        return;
    }
    for &shape in shapes {
        let moved = provider.position(shape).add_point(offset);
        provider.set_position(shape, moved);
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use compass_core::{canvas::Canvas, geometry::Size};

    use crate::tree::{Adjacency, Node};

    use super::*;

    fn setup(sizes: &[(f32, f32)], edges: &[(usize, Direction, usize)]) -> (Canvas, Vec<ShapeId>, Tree) {
        let mut canvas = Canvas::new();
        let shapes: Vec<ShapeId> = sizes
            .iter()
            .map(|(w, h)| canvas.add_shape(Size::new(*w, *h)))
            .collect();
        let adjacency: Adjacency = edges
            .iter()
            .map(|(p, d, c)| (NodeId::new(*p), *d, NodeId::new(*c)))
            .collect();
        let tree = Tree::build(&shapes, &adjacency).expect("valid tree");
        (canvas, shapes, tree)
    }

    fn assert_position(canvas: &Canvas, shape: ShapeId, x: f32, y: f32) {
        let position = canvas.position(shape);
        assert_approx_eq!(f32, position.x(), x);
        assert_approx_eq!(f32, position.y(), y);
    }

    #[test]
    fn test_fan_out_layout() {
        let (mut canvas, shapes, mut tree) = setup(
            &[(12.0, 3.0), (21.0, 3.0), (12.0, 6.0), (3.0, 3.0), (9.0, 3.0)],
            &[
                (0, Direction::W, 1),
                (0, Direction::E, 2),
                (0, Direction::N, 3),
                (0, Direction::S, 4),
            ],
        );

        Engine::new(30.0).layout(&mut tree, &mut canvas);

        assert_position(&canvas, shapes[0], 51.0, 0.0);
        assert_position(&canvas, shapes[1], 0.0, 0.0);
        assert_position(&canvas, shapes[2], 93.0, -1.5);
        assert_position(&canvas, shapes[3], 55.5, -36.0);
        assert_position(&canvas, shapes[4], 52.5, 70.5);
        assert!(tree.nodes().all(Node::is_positioned));
    }

    #[test]
    fn test_chain_layout_moves_subtrees() {
        let (mut canvas, shapes, mut tree) = setup(
            &[(3.0, 3.0); 4],
            &[(0, Direction::S, 1), (1, Direction::W, 2), (2, Direction::W, 3)],
        );

        Engine::new(30.0).layout(&mut tree, &mut canvas);

        assert_position(&canvas, shapes[0], 66.0, -33.0);
        assert_position(&canvas, shapes[1], 66.0, 0.0);
        assert_position(&canvas, shapes[2], 33.0, 0.0);
        assert_position(&canvas, shapes[3], 0.0, 0.0);
    }

    #[test]
    fn test_child_subtree_moves_as_unit() {
        // Node 2 is placed east of the root after node 1 fixed the root, so
        // its already laid-out child 3 must travel with it.
        let (mut canvas, shapes, mut tree) = setup(
            &[(10.0, 10.0); 4],
            &[(0, Direction::W, 1), (0, Direction::E, 2), (2, Direction::S, 3)],
        );

        Engine::new(10.0).layout(&mut tree, &mut canvas);

        let node2 = canvas.position(shapes[2]);
        let node3 = canvas.position(shapes[3]);
        assert_approx_eq!(f32, node3.x(), node2.x());
        assert_approx_eq!(f32, node3.y(), node2.y() + 20.0);
        assert_position(&canvas, shapes[0], 20.0, 0.0);
        assert_position(&canvas, shapes[2], 40.0, 0.0);
    }

    #[test]
    fn test_footprints_cover_subtrees() {
        let (mut canvas, shapes, mut tree) = setup(
            &[(3.0, 3.0); 4],
            &[(0, Direction::S, 1), (1, Direction::W, 2), (2, Direction::W, 3)],
        );

        Engine::new(30.0).layout(&mut tree, &mut canvas);

        let root_group = tree.node(NodeId::new(0)).footprint().expect("root footprint");
        let mut members = canvas.group_members(root_group);
        members.sort();
        assert_eq!(members, shapes);

        let group2 = tree.node(NodeId::new(2)).footprint().expect("footprint");
        assert_eq!(canvas.group_members(group2), vec![shapes[2], shapes[3]]);
        assert!(tree.node(NodeId::new(3)).footprint().is_none());
        assert_eq!(canvas.live_group_count(), 3);
    }

    #[test]
    fn test_single_node_stays_at_origin() {
        let (mut canvas, shapes, mut tree) = setup(&[(5.0, 5.0)], &[]);

        Engine::new(30.0).layout(&mut tree, &mut canvas);

        assert_position(&canvas, shapes[0], 0.0, 0.0);
        assert!(!tree.node(NodeId::new(0)).is_positioned());
        assert_eq!(canvas.live_group_count(), 1);
    }

    #[test]
    fn test_shared_direction_children_do_not_overlap() {
        let (mut canvas, shapes, mut tree) = setup(
            &[(10.0, 10.0); 3],
            &[(0, Direction::S, 1), (0, Direction::S, 2)],
        );

        Engine::new(5.0).layout(&mut tree, &mut canvas);

        assert_position(&canvas, shapes[0], 0.0, -15.0);
        assert_position(&canvas, shapes[1], 0.0, 0.0);
        // Second child clears the first through the footprint margin.
        assert_position(&canvas, shapes[2], 0.0, 15.0);
        assert!(canvas.colliding(shapes[2]).is_empty());
    }
}
