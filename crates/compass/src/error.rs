//! Error types for Compass operations.
//!
//! [`LayoutError`] covers everything that can go wrong while turning an
//! adjacency map into a laid-out tree. [`CompassError`] is the top-level
//! error returned by [`LayoutBuilder`](crate::LayoutBuilder).

use std::io;

use thiserror::Error;

use compass_core::{
    direction::{Direction, DirectionProfile},
    identifier::NodeId,
};

/// Errors raised while building or traversing a layout tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The adjacency map does not have exactly one parentless node.
    #[error("invalid tree: expected exactly one root, found {} ({})", .roots.len(), join_ids(.roots))]
    InvalidTree { roots: Vec<NodeId> },

    /// A direction lookup found no edge between the two nodes.
    #[error("node {child} is not connected to node {parent}")]
    NotConnected { parent: NodeId, child: NodeId },

    /// A connection label is not one of the eight compass directions.
    #[error("node {node} uses unknown direction `{label}`")]
    UnknownDirection { node: NodeId, label: String },

    /// A direction is valid but excluded by the active profile.
    #[error("node {node} uses direction `{direction}`, which the {profile} profile does not allow")]
    UnsupportedDirection {
        node: NodeId,
        direction: Direction,
        profile: DirectionProfile,
    },

    /// An edge points at a node id outside the size list.
    #[error("node {node} connects to unknown node {target}")]
    UnknownNode { node: NodeId, target: NodeId },

    /// A node is claimed as a child by two different parents.
    #[error("node {node} has two parents: {first} and {second}")]
    MultipleParents {
        node: NodeId,
        first: NodeId,
        second: NodeId,
    },

    /// Some nodes cannot be reached from the root because they form a cycle.
    #[error("connections form a cycle through node {node}")]
    Cycle { node: NodeId },
}

fn join_ids(ids: &[NodeId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(NodeId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The main error type for Compass operations.
#[derive(Debug, Error)]
pub enum CompassError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Layout has {count} colliding pair(s)")]
    Collisions { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tree_message_lists_roots() {
        let err = LayoutError::InvalidTree {
            roots: vec![NodeId::new(0), NodeId::new(3)],
        };
        assert_eq!(
            err.to_string(),
            "invalid tree: expected exactly one root, found 2 (0, 3)"
        );

        let err = LayoutError::InvalidTree { roots: Vec::new() };
        assert_eq!(
            err.to_string(),
            "invalid tree: expected exactly one root, found 0 (none)"
        );
    }

    #[test]
    fn test_unsupported_direction_message() {
        let err = LayoutError::UnsupportedDirection {
            node: NodeId::new(1),
            direction: Direction::Ne,
            profile: DirectionProfile::Cardinal,
        };
        assert_eq!(
            err.to_string(),
            "node 1 uses direction `ne`, which the cardinal profile does not allow"
        );
    }

    #[test]
    fn test_layout_error_converts_into_compass_error() {
        let err: CompassError = LayoutError::Cycle {
            node: NodeId::new(2),
        }
        .into();
        assert!(matches!(err, CompassError::Layout(LayoutError::Cycle { .. })));
        assert_eq!(
            err.to_string(),
            "Layout error: connections form a cycle through node 2"
        );
    }
}
