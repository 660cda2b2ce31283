//! Tree model built from a direction-keyed adjacency map.
//!
//! The tree is an index arena: every [`Node`] lives in a `Vec` slot whose
//! position equals its [`NodeId`], children are stored per direction in
//! insertion order, and the parent link is a plain id.
//!
//! Construction enforces the tree invariants up front (exactly one root, a
//! single parent per node, every node reachable from the root) so the layout
//! passes never have to cope with cycles.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};

use compass_core::{
    direction::{Direction, DirectionProfile},
    identifier::{GroupId, NodeId, ShapeId},
};

use crate::error::LayoutError;

/// Ordered adjacency map: parent id to its `(direction, child)` edges.
///
/// Edge order is preserved and determines layout order.
///
/// # Examples
///
/// ```
/// use compass::tree::Adjacency;
/// use compass_core::{direction::Direction, identifier::NodeId};
///
/// let mut adjacency = Adjacency::new();
/// adjacency
///     .connect(NodeId::new(0), Direction::W, NodeId::new(1))
///     .connect(NodeId::new(0), Direction::E, NodeId::new(2));
///
/// assert_eq!(adjacency.edges(NodeId::new(0)).len(), 2);
/// assert!(adjacency.edges(NodeId::new(1)).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjacency {
    entries: IndexMap<NodeId, Vec<(Direction, NodeId)>>,
}

impl Adjacency {
    /// Creates an empty adjacency map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an edge from `parent` to `child`.
    pub fn connect(&mut self, parent: NodeId, direction: Direction, child: NodeId) -> &mut Self {
        self.entries
            .entry(parent)
            .or_default()
            .push((direction, child));
        self
    }

    /// Returns the edges of `parent`, or an empty slice if it has none.
    pub fn edges(&self, parent: NodeId) -> &[(Direction, NodeId)] {
        self.entries.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over every parent entry in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[(Direction, NodeId)])> {
        self.entries
            .iter()
            .map(|(parent, edges)| (*parent, edges.as_slice()))
    }

    /// Returns the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl FromIterator<(NodeId, Direction, NodeId)> for Adjacency {
    fn from_iter<I: IntoIterator<Item = (NodeId, Direction, NodeId)>>(iter: I) -> Self {
        let mut adjacency = Adjacency::new();
        for (parent, direction, child) in iter {
            adjacency.connect(parent, direction, child);
        }
        adjacency
    }
}

/// A node of the layout tree.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    shape: ShapeId,
    connections: IndexMap<Direction, Vec<NodeId>>,
    parent: Option<NodeId>,
    positioned: bool,
    footprint: Option<GroupId>,
}

impl Node {
    fn new(id: NodeId, shape: ShapeId) -> Self {
        Self {
            id,
            shape,
            connections: IndexMap::new(),
            parent: None,
            positioned: false,
            footprint: None,
        }
    }

    /// Returns the id of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the provider shape holding this node's geometry.
    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    /// Returns the parent of this node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns true once the layout engine has assigned a position.
    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    /// Returns the footprint group, if one is currently registered.
    pub fn footprint(&self) -> Option<GroupId> {
        self.footprint
    }

    /// Returns the children under `direction`, or an empty slice.
    pub fn children(&self, direction: Direction) -> &[NodeId] {
        self.connections
            .get(&direction)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterates over `(direction, child)` edges in construction order.
    pub fn edges(&self) -> impl Iterator<Item = (Direction, NodeId)> + '_ {
        self.connections
            .iter()
            .flat_map(|(direction, children)| children.iter().map(|child| (*direction, *child)))
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.connections.values().all(Vec::is_empty)
    }

    /// Finds the direction under which `child` hangs off this node.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotConnected`] if `child` is not a direct child.
    pub fn direction_to(&self, child: NodeId) -> Result<Direction, LayoutError> {
        self.connections
            .iter()
            .find(|(_, children)| children.contains(&child))
            .map(|(direction, _)| *direction)
            .ok_or(LayoutError::NotConnected {
                parent: self.id,
                child,
            })
    }

    pub(crate) fn mark_positioned(&mut self) {
        self.positioned = true;
    }

    pub(crate) fn set_footprint(&mut self, group: GroupId) {
        self.footprint = Some(group);
    }

    pub(crate) fn take_footprint(&mut self) -> Option<GroupId> {
        self.footprint.take()
    }
}

/// A validated layout tree with a single root.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Builds a tree accepting all eight directions.
    ///
    /// See [`Tree::build_with_profile`].
    pub fn build(shapes: &[ShapeId], adjacency: &Adjacency) -> Result<Self, LayoutError> {
        Self::build_with_profile(shapes, adjacency, DirectionProfile::Compass)
    }

    /// Builds a tree from index-aligned shapes and an adjacency map.
    ///
    /// Node `i` owns `shapes[i]`. Edges are attached in adjacency order.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`LayoutError::UnknownNode`] for ids outside `0..shapes.len()`
    /// - [`LayoutError::UnsupportedDirection`] for directions outside `profile`
    /// - [`LayoutError::InvalidTree`] unless exactly one node has no parent
    /// - [`LayoutError::MultipleParents`] when a node is claimed twice
    /// - [`LayoutError::Cycle`] when some node is unreachable from the root
    pub fn build_with_profile(
        shapes: &[ShapeId],
        adjacency: &Adjacency,
        profile: DirectionProfile,
    ) -> Result<Self, LayoutError> {
        let count = shapes.len();
        let mut nodes: Vec<Node> = shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| Node::new(NodeId::new(index), *shape))
            .collect();

        let mut conflict = None;

        for (parent, edges) in adjacency.iter() {
            if parent.index() >= count && !edges.is_empty() {
                return Err(LayoutError::UnknownNode {
                    node: edges[0].1,
                    target: parent,
                });
            }

            for &(direction, child) in edges {
                if child.index() >= count {
                    return Err(LayoutError::UnknownNode {
                        node: parent,
                        target: child,
                    });
                }
                if !profile.allows(direction) {
                    return Err(LayoutError::UnsupportedDirection {
                        node: parent,
                        direction,
                        profile,
                    });
                }

                match nodes[child.index()].parent {
                    Some(first) => {
                        conflict.get_or_insert(LayoutError::MultipleParents {
                            node: child,
                            first,
                            second: parent,
                        });
                    }
                    None => nodes[child.index()].parent = Some(parent),
                }

                nodes[parent.index()]
                    .connections
                    .entry(direction)
                    .or_default()
                    .push(child);
                trace!(parent:% = parent, direction:% = direction, child:% = child; "Attached edge");
            }
        }

        let roots: Vec<NodeId> = nodes
            .iter()
            .filter(|node| node.parent.is_none())
            .map(Node::id)
            .collect();

        if roots.len() != 1 {
            return Err(LayoutError::InvalidTree { roots });
        }
        let root = roots[0];

        if let Some(err) = conflict {
            return Err(err);
        }

        let tree = Self { nodes, root };

        let reached: HashSet<NodeId> = tree.depth_first(root).collect();
        if let Some(node) = tree.nodes.iter().map(Node::id).find(|id| !reached.contains(id)) {
            return Err(LayoutError::Cycle { node });
        }

        debug!(root:% = root, nodes = count, edges = adjacency.edge_count(); "Tree built");
        Ok(tree)
    }

    /// Returns the root of the tree.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes. A built tree always has a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given id, if it exists.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Iterates over every node in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns the `(direction, child)` edges of a node.
    pub fn edges(&self, id: NodeId) -> impl Iterator<Item = (Direction, NodeId)> + '_ {
        self.node(id).edges()
    }

    /// Returns a lazy post-order walk of the subtree rooted at `from`.
    ///
    /// Every child, including its nested descendants, is yielded before its
    /// parent; `from` comes last. Each call starts with a fresh visited set.
    ///
    /// # Examples
    ///
    /// ```
    /// use compass::tree::{Adjacency, Tree};
    /// use compass_core::{direction::Direction, identifier::{NodeId, ShapeId}};
    ///
    /// let shapes: Vec<ShapeId> = (0..3).map(ShapeId::new).collect();
    /// let adjacency: Adjacency = [
    ///     (NodeId::new(0), Direction::S, NodeId::new(1)),
    ///     (NodeId::new(1), Direction::W, NodeId::new(2)),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let tree = Tree::build(&shapes, &adjacency).unwrap();
    /// let order: Vec<usize> = tree.depth_first(tree.root()).map(NodeId::index).collect();
    /// assert_eq!(order, vec![2, 1, 0]);
    /// ```
    pub fn depth_first(&self, from: NodeId) -> DepthFirst<'_> {
        DepthFirst::new(self, from)
    }

    /// Returns true if the subtree rooted at `id` has more than one node.
    pub fn has_subtree(&self, id: NodeId) -> bool {
        self.depth_first(id).nth(1).is_some()
    }
}

struct Frame {
    node: NodeId,
    children: Vec<NodeId>,
    next: usize,
}

/// Post-order iterator returned by [`Tree::depth_first`].
///
/// Uses an explicit stack, so deep trees do not grow the call stack.
pub struct DepthFirst<'t> {
    tree: &'t Tree,
    stack: Vec<Frame>,
    visited: HashSet<NodeId>,
}

impl<'t> DepthFirst<'t> {
    fn new(tree: &'t Tree, from: NodeId) -> Self {
        let mut walk = Self {
            tree,
            stack: Vec::new(),
            visited: HashSet::new(),
        };
        if tree.get(from).is_some() {
            walk.visited.insert(from);
            walk.push(from);
        }
        walk
    }

    fn push(&mut self, node: NodeId) {
        let children = self.tree.node(node).edges().map(|(_, child)| child).collect();
        self.stack.push(Frame {
            node,
            children,
            next: 0,
        });
    }
}

impl Iterator for DepthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.children.get(frame.next).copied() {
                Some(child) => {
                    frame.next += 1;
                    if self.visited.insert(child) {
                        self.push(child);
                    }
                }
                None => {
                    let node = frame.node;
                    self.stack.pop();
                    return Some(node);
                }
            }
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    /// A random tree: a shuffled id order and, for every position after the
    /// first, a parent chosen among earlier positions.
    fn tree_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<(usize, Direction)>)> {
        (1usize..24).prop_flat_map(|count| {
            let order = Just((0..count).collect::<Vec<_>>()).prop_shuffle();
            let parents = (1..count)
                .map(|position| (0..position, direction_strategy()))
                .collect::<Vec<_>>();
            (order, parents)
        })
    }

    fn to_adjacency(order: &[usize], parents: &[(usize, Direction)]) -> Adjacency {
        parents
            .iter()
            .enumerate()
            .map(|(offset, &(parent_position, direction))| {
                (
                    NodeId::new(order[parent_position]),
                    direction,
                    NodeId::new(order[offset + 1]),
                )
            })
            .collect()
    }

    fn shapes(count: usize) -> Vec<ShapeId> {
        (0..count).map(ShapeId::new).collect()
    }

    /// Every tree-shaped map builds and reports its single root.
    fn check_single_root_builds(
        order: Vec<usize>,
        parents: Vec<(usize, Direction)>,
    ) -> Result<(), TestCaseError> {
        let adjacency = to_adjacency(&order, &parents);
        let tree = match Tree::build(&shapes(order.len()), &adjacency) {
            Ok(tree) => tree,
            Err(err) => return Err(TestCaseError::fail(format!("build failed: {err}"))),
        };

        prop_assert_eq!(tree.root(), NodeId::new(order[0]));
        prop_assert_eq!(tree.depth_first(tree.root()).count(), order.len());
        Ok(())
    }

    /// Dropping at least one edge leaves two or more roots.
    fn check_forest_is_rejected(
        order: Vec<usize>,
        parents: Vec<(usize, Direction)>,
        dropped: usize,
    ) -> Result<(), TestCaseError> {
        prop_assume!(!parents.is_empty());
        let dropped = dropped % parents.len();
        let mut adjacency = Adjacency::new();
        for (offset, &(parent_position, direction)) in parents.iter().enumerate() {
            if offset != dropped {
                adjacency.connect(
                    NodeId::new(order[parent_position]),
                    direction,
                    NodeId::new(order[offset + 1]),
                );
            }
        }

        let err = Tree::build(&shapes(order.len()), &adjacency).unwrap_err();
        match err {
            LayoutError::InvalidTree { roots } => prop_assert!(roots.len() >= 2),
            other => prop_assert!(false, "unexpected error: {other}"),
        }
        Ok(())
    }

    /// Giving the root a parent leaves no root at all.
    fn check_rootless_is_rejected(
        order: Vec<usize>,
        parents: Vec<(usize, Direction)>,
        direction: Direction,
    ) -> Result<(), TestCaseError> {
        let mut adjacency = to_adjacency(&order, &parents);
        let last = *order.last().unwrap();
        adjacency.connect(NodeId::new(last), direction, NodeId::new(order[0]));

        let err = Tree::build(&shapes(order.len()), &adjacency).unwrap_err();
        prop_assert_eq!(err, LayoutError::InvalidTree { roots: Vec::new() });
        Ok(())
    }

    proptest! {
        #[test]
        fn single_root_builds((order, parents) in tree_strategy()) {
            check_single_root_builds(order, parents)?;
        }

        #[test]
        fn forest_is_rejected((order, parents) in tree_strategy(), dropped in any::<usize>()) {
            check_forest_is_rejected(order, parents, dropped)?;
        }

        #[test]
        fn rootless_is_rejected((order, parents) in tree_strategy(), direction in direction_strategy()) {
            check_rootless_is_rejected(order, parents, direction)?;
        }
    }
}
