//! Serializable input model: node sizes plus labelled connections.
//!
//! A [`Diagram`] is what a caller (or the CLI, from TOML) hands to
//! [`LayoutBuilder::layout`](crate::LayoutBuilder::layout). Connection labels
//! are kept as raw strings until [`Diagram::to_adjacency`] parses them, so
//! a misspelled direction is reported against the node that uses it.
//!
//! ```toml
//! [[nodes]]
//! size = [12.0, 3.0]
//! connections = { w = 1, e = 2, s = [3, 4] }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use compass_core::{direction::Direction, geometry::Size, identifier::NodeId};

use crate::{error::LayoutError, tree::Adjacency};

/// One or several children under a single direction label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    One(usize),
    Many(Vec<usize>),
}

impl Targets {
    /// Returns the target node ids in order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let slice = match self {
            Targets::One(id) => std::slice::from_ref(id),
            Targets::Many(ids) => ids.as_slice(),
        };
        slice.iter().copied().map(NodeId::new)
    }

    fn push(&mut self, id: usize) {
        match self {
            Targets::One(first) => {
                let first = *first;
                *self = Targets::Many(vec![first, id]);
            }
            Targets::Many(ids) => ids.push(id),
        }
    }
}

/// A rectangle and its outgoing connections.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiagramNode {
    size: [f32; 2],

    #[serde(default)]
    connections: IndexMap<String, Targets>,
}

impl DiagramNode {
    /// Creates a node of the given size with no connections.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width, height],
            connections: IndexMap::new(),
        }
    }

    /// Appends `target` under `label`, keeping first-use order of labels.
    pub fn with_connection(mut self, label: impl Into<String>, target: usize) -> Self {
        self.connections
            .entry(label.into())
            .and_modify(|targets| targets.push(target))
            .or_insert(Targets::One(target));
        self
    }

    /// Returns the node's size.
    pub fn size(&self) -> Size {
        Size::new(self.size[0], self.size[1])
    }

    /// Returns the raw connection labels and their targets.
    pub fn connections(&self) -> &IndexMap<String, Targets> {
        &self.connections
    }
}

/// A full layout input: node `i` in `nodes` has id `i`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    nodes: Vec<DiagramNode>,
}

impl Diagram {
    /// Creates a diagram from its nodes.
    pub fn new(nodes: Vec<DiagramNode>) -> Self {
        Self { nodes }
    }

    /// Returns the nodes in id order.
    pub fn nodes(&self) -> &[DiagramNode] {
        &self.nodes
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the diagram has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node sizes in id order.
    pub fn sizes(&self) -> Vec<Size> {
        self.nodes.iter().map(DiagramNode::size).collect()
    }

    /// Returns the first node whose size is negative or not finite.
    pub fn invalid_size(&self) -> Option<(NodeId, Size)> {
        self.nodes.iter().enumerate().find_map(|(index, node)| {
            let size = node.size();
            let valid = [size.width(), size.height()]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0);
            (!valid).then(|| (NodeId::new(index), size))
        })
    }

    /// Parses every connection label into an [`Adjacency`].
    ///
    /// Target ids are not checked here; [`Tree::build`](crate::tree::Tree::build)
    /// rejects ids outside the node list.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownDirection`] for the first label that is
    /// not a compass direction.
    pub fn to_adjacency(&self) -> Result<Adjacency, LayoutError> {
        let mut adjacency = Adjacency::new();
        for (index, node) in self.nodes.iter().enumerate() {
            let parent = NodeId::new(index);
            for (label, targets) in &node.connections {
                let direction: Direction =
                    label
                        .parse()
                        .map_err(|_| LayoutError::UnknownDirection {
                            node: parent,
                            label: label.clone(),
                        })?;
                for child in targets.ids() {
                    adjacency.connect(parent, direction, child);
                }
            }
        }
        Ok(adjacency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_connection_groups_targets() {
        let node = DiagramNode::new(1.0, 1.0)
            .with_connection("s", 1)
            .with_connection("e", 2)
            .with_connection("s", 3);

        let labels: Vec<&str> = node.connections().keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["s", "e"]);
        assert_eq!(node.connections()["s"], Targets::Many(vec![1, 3]));
        assert_eq!(node.connections()["e"], Targets::One(2));
    }

    #[test]
    fn test_to_adjacency_preserves_order() {
        let diagram = Diagram::new(vec![
            DiagramNode::new(12.0, 3.0)
                .with_connection("w", 1)
                .with_connection("E", 2)
                .with_connection(" n ", 3),
            DiagramNode::new(1.0, 1.0),
            DiagramNode::new(1.0, 1.0),
            DiagramNode::new(1.0, 1.0),
        ]);

        let adjacency = diagram.to_adjacency().expect("valid labels");
        assert_eq!(
            adjacency.edges(NodeId::new(0)),
            &[
                (Direction::W, NodeId::new(1)),
                (Direction::E, NodeId::new(2)),
                (Direction::N, NodeId::new(3)),
            ]
        );
    }

    #[test]
    fn test_to_adjacency_rejects_unknown_label() {
        let diagram = Diagram::new(vec![
            DiagramNode::new(1.0, 1.0),
            DiagramNode::new(1.0, 1.0).with_connection("up", 0),
        ]);

        assert_eq!(
            diagram.to_adjacency(),
            Err(LayoutError::UnknownDirection {
                node: NodeId::new(1),
                label: "up".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_size() {
        let diagram = Diagram::new(vec![
            DiagramNode::new(1.0, 1.0),
            DiagramNode::new(-1.0, 1.0),
        ]);
        assert_eq!(
            diagram.invalid_size(),
            Some((NodeId::new(1), Size::new(-1.0, 1.0)))
        );

        let diagram = Diagram::new(vec![DiagramNode::new(0.0, f32::NAN)]);
        assert!(diagram.invalid_size().is_some());

        let diagram = Diagram::new(vec![DiagramNode::new(0.0, 0.0)]);
        assert!(diagram.invalid_size().is_none());
    }
}
