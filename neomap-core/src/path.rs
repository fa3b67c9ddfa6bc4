//! Typed graph paths.

use crate::error::NeomapError;
use crate::graph::Direction;
use crate::record::Record;
use crate::traits::{required, FromRecord, FromValue};
use crate::value::Value;

/// A graph path with every node converted to `N` and every relationship to `R`.
///
/// Nodes and relationships are stored in traversal order, so a walk that
/// revisits a node holds that node more than once. There is always exactly
/// one more node than relationships. `indices` keeps the protocol's raw
/// connectivity.
///
/// Each node is converted from a one-column record named `node <i>` and
/// each relationship from one named `relationship <i>`. A derived struct
/// therefore reads the entity's properties; the raw
/// [`Node`](crate::Node) and [`Relationship`](crate::Relationship) types
/// keep the entity as is.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(FromRecord)]
/// struct Person { name: String }
///
/// #[derive(FromRecord)]
/// struct Knows { since: i64 }
///
/// #[derive(FromRecord)]
/// struct PathRow {
///     p: TypedPath<Person, Knows>,
/// }
/// // Cypher: MATCH p = (a:Person)-[:KNOWS*..3]->(b:Person) RETURN p
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypedPath<N, R> {
    /// Nodes along the path, in traversal order.
    pub nodes: Vec<N>,
    /// Relationships connecting consecutive nodes.
    pub relationships: Vec<R>,
    /// Raw path indices from the bolt protocol.
    pub indices: Vec<i64>,
    directions: Vec<Direction>,
}

/// One step of a [`TypedPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a, N, R> {
    pub from: &'a N,
    pub relationship: &'a R,
    pub to: &'a N,
    pub direction: Direction,
}

impl<N, R> TypedPath<N, R> {
    /// Number of relationships along the path.
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn start(&self) -> Option<&N> {
        self.nodes.first()
    }

    pub fn end(&self) -> Option<&N> {
        self.nodes.last()
    }

    /// The steps of the walk, in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_, N, R>> {
        self.nodes
            .windows(2)
            .zip(&self.relationships)
            .zip(&self.directions)
            .map(|((pair, relationship), direction)| Segment {
                from: &pair[0],
                relationship,
                to: &pair[1],
                direction: *direction,
            })
    }
}

/// Report a path member failure below its synthetic column name, unless the
/// failure already names that column (a scalar target rejecting the entity).
fn under(err: NeomapError, name: &str) -> NeomapError {
    if err.field() == Some(name) {
        err
    } else {
        err.within(name)
    }
}

impl<N: FromRecord, R: FromRecord> FromValue for TypedPath<N, R> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        let path = match required(field, value)? {
            Value::Path(p) => p,
            other => return Err(NeomapError::type_mismatch(field, "Path", &other)),
        };
        let walk = path.traverse(field)?;

        // Both lists are converted in full before either failure is reported.
        let nodes: Result<Vec<N>, NeomapError> = walk
            .nodes
            .into_iter()
            .enumerate()
            .map(|(i, n)| {
                let name = format!("node {i}");
                N::from_record(&Record::single(name.clone(), n), None).map_err(|e| under(e, &name))
            })
            .collect();
        let relationships: Result<Vec<R>, NeomapError> = walk
            .relationships
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                let name = format!("relationship {i}");
                R::from_record(&Record::single(name.clone(), r), None).map_err(|e| under(e, &name))
            })
            .collect();

        match (nodes, relationships) {
            (Ok(nodes), Ok(relationships)) => Ok(TypedPath {
                nodes,
                relationships,
                indices: path.indices,
                directions: walk.directions,
            }),
            (Err(e), _) | (Ok(_), Err(e)) => Err(e.within(field)),
        }
    }
}
