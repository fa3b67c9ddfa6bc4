//! Graph-native snapshots: nodes, relationships and raw paths.

use std::collections::BTreeMap;

use crate::error::NeomapError;
use crate::value::Value;

/// A node snapshot: identity, labels and properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: BTreeMap<String, Value>,
}

impl Node {
    pub fn new(id: i64, labels: Vec<String>, properties: BTreeMap<String, Value>) -> Self {
        Self { id, labels, properties }
    }

    /// Read a property by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// A relationship snapshot with both endpoint identities.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: i64,
    pub start_node_id: i64,
    pub end_node_id: i64,
    pub rel_type: String,
    pub properties: BTreeMap<String, Value>,
}

impl Relationship {
    /// Read a property by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A relationship as it appears inside a path: the endpoints are implied by
/// the path's connectivity rather than stored on the relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct UnboundRelationship {
    pub id: i64,
    pub rel_type: String,
    pub properties: BTreeMap<String, Value>,
}

impl UnboundRelationship {
    pub fn new(id: i64, rel_type: impl Into<String>, properties: BTreeMap<String, Value>) -> Self {
        Self { id, rel_type: rel_type.into(), properties }
    }

    /// Attach endpoints, producing a full [`Relationship`].
    pub fn bind(&self, start_node_id: i64, end_node_id: i64) -> Relationship {
        Relationship {
            id: self.id,
            start_node_id,
            end_node_id,
            rel_type: self.rel_type.clone(),
            properties: self.properties.clone(),
        }
    }
}

/// Which way a path step crosses its relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The relationship points from the previous node to the next one.
    Forward,
    /// The relationship points from the next node back to the previous one.
    Backward,
}

/// A raw path exactly as the protocol ships it.
///
/// `nodes` and `relationships` hold each distinct entity once. `indices`
/// is a flat list of `(relationship, node)` pairs describing the walk:
/// the relationship index is 1-based and negative when the step crosses
/// the relationship against its direction; the node index points into
/// `nodes`. The walk always starts at `nodes[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub nodes: Vec<Node>,
    pub relationships: Vec<UnboundRelationship>,
    pub indices: Vec<i64>,
}

/// A raw path expanded into traversal order.
///
/// Nodes may repeat when the walk revisits them; `nodes.len()` is always
/// `relationships.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Traversal {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Relationship>,
    pub directions: Vec<Direction>,
}

impl Path {
    /// A zero-length path holding a single node.
    pub fn single(node: Node) -> Self {
        Self { nodes: vec![node], relationships: Vec::new(), indices: Vec::new() }
    }

    /// Number of steps in the walk.
    pub fn len(&self) -> usize {
        self.indices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Walk the connectivity and produce nodes and bound relationships in
    /// traversal order.
    ///
    /// Fails with [`Malformed`](NeomapError::Malformed) on `field` when the
    /// path has no nodes, an odd number of indices, or an index that does
    /// not point at an entity.
    pub fn traverse(&self, field: &str) -> Result<Traversal, NeomapError> {
        let first = self
            .nodes
            .first()
            .ok_or_else(|| NeomapError::malformed(field, "path has no nodes"))?;
        if self.indices.len() % 2 != 0 {
            return Err(NeomapError::malformed(
                field,
                format!("path has an odd number of indices ({})", self.indices.len()),
            ));
        }

        let steps = self.len();
        let mut nodes = Vec::with_capacity(steps + 1);
        let mut relationships = Vec::with_capacity(steps);
        let mut directions = Vec::with_capacity(steps);
        nodes.push(first.clone());

        let mut prev = first;
        for pair in self.indices.chunks_exact(2) {
            let (rel_index, node_index) = (pair[0], pair[1]);
            let rel = usize::try_from(rel_index.unsigned_abs())
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| self.relationships.get(i))
                .ok_or_else(|| {
                    NeomapError::malformed(field, format!("path relationship index {rel_index} is out of range"))
                })?;
            let next = usize::try_from(node_index)
                .ok()
                .and_then(|i| self.nodes.get(i))
                .ok_or_else(|| {
                    NeomapError::malformed(field, format!("path node index {node_index} is out of range"))
                })?;

            let direction = if rel_index > 0 { Direction::Forward } else { Direction::Backward };
            let bound = match direction {
                Direction::Forward => rel.bind(prev.id, next.id),
                Direction::Backward => rel.bind(next.id, prev.id),
            };
            relationships.push(bound);
            directions.push(direction);
            nodes.push(next.clone());
            prev = next;
        }

        Ok(Traversal { nodes, relationships, directions })
    }
}
