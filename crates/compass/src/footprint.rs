//! Release of the footprint groups created during layout.

use std::collections::HashSet;

use log::debug;

use compass_core::{identifier::NodeId, provider::GeometryProvider};

use crate::tree::Tree;

/// Dissolves the footprint group of every node in the tree, root included.
///
/// Descendants are visited before their parents. Shape positions are left
/// where the layout put them. Returns the number of groups dissolved; calling
/// it again on the same tree dissolves nothing.
pub fn remove_groups<P: GeometryProvider>(tree: &mut Tree, provider: &mut P) -> usize {
    let mut visited = HashSet::new();
    let root = tree.root();
    visited.insert(root);
    let removed = remove_subtree(tree, provider, root, &mut visited);
    debug!(removed = removed; "Dissolved footprint groups");
    removed
}

fn remove_subtree<P: GeometryProvider>(
    tree: &mut Tree,
    provider: &mut P,
    node: NodeId,
    visited: &mut HashSet<NodeId>,
) -> usize {
    let children: Vec<NodeId> = tree.edges(node).map(|(_, child)| child).collect();
    let mut removed = 0;
    for child in children {
        if visited.insert(child) {
            removed += remove_subtree(tree, provider, child, visited);
        }
    }

    if let Some(group) = tree.node_mut(node).take_footprint() {
        let members = provider.dissolve_group(group);
        debug!(node:% = node, group:% = group, members = members.len(); "Dissolved footprint");
        removed += 1;
    }
    removed
}
