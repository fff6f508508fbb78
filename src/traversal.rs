//! Depth-first traversal and single-path discovery over a borrowed
//! [`DirectedGraph`].

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::digraph::DirectedGraph;
use crate::error::GraphError;

/// Finds *some* directed path from `from` to `to`, inclusive of both ends.
///
/// The search is an iterative depth-first search: an explicit stack seeded
/// with `from`, and a trace map recording for every discovered vertex the
/// vertex it was first reached from (`from` maps to no predecessor).  The
/// stack order makes the last-inserted unvisited neighbour the next vertex
/// explored, so the returned path is valid but not necessarily shortest.
///
/// Returns `Ok(None)` when the stack empties without reaching `to`;
/// unreachability is an expected outcome, not a fault.  Since the trace
/// prevents revisits, the search always terminates, in O(V + E) time and
/// O(V) space.
///
/// `one_path(v, v)` is `Ok(Some(vec![v]))`: the first pop matches before any
/// neighbour set is read, so this holds even for a `v` absent from the graph.
/// For `from != to` with `from` absent, the neighbour lookup fails and
/// [`GraphError::VertexNotFound`] propagates.
pub fn one_path<V>(graph: &DirectedGraph<V>, from: &V, to: &V) -> Result<Option<Vec<V>>, GraphError>
where
    V: Hash + Eq + Clone,
{
    let mut trace: IndexMap<V, Option<V>> = IndexMap::new();
    let mut stack: Vec<V> = vec![from.clone()];
    trace.insert(from.clone(), None);

    while let Some(vertex) = stack.pop() {
        if vertex == *to {
            return Ok(Some(walk_trace_back(&trace, to)));
        }
        for neighbour in graph.adjacents(&vertex)? {
            if !trace.contains_key(neighbour) {
                stack.push(neighbour.clone());
                trace.insert(neighbour.clone(), Some(vertex.clone()));
            }
        }
    }

    Ok(None)
}

/// Walks the predecessor links backward from `to`, then reverses so the path
/// runs source-to-destination.
fn walk_trace_back<V>(trace: &IndexMap<V, Option<V>>, to: &V) -> Vec<V>
where
    V: Hash + Eq + Clone,
{
    let mut path: Vec<V> = vec![to.clone()];
    let mut cursor = to;
    while let Some(Some(predecessor)) = trace.get(cursor) {
        path.push(predecessor.clone());
        cursor = predecessor;
    }
    path.reverse();
    path
}

/// See [`iter_descendants_dfs`].
pub struct DfsVerticesIterator<'a, V> {
    graph: &'a DirectedGraph<V>,
    visited: IndexSet<&'a V>,
    to_visit: Vec<&'a V>,
}

impl<'a, V: Hash + Eq> Iterator for DfsVerticesIterator<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(u) = self.to_visit.pop() {
            if self.visited.contains(u) {
                continue;
            }
            if let Ok(neighbours) = self.graph.adjacents(u) {
                self.to_visit.extend(neighbours);
            }
            self.visited.insert(u);
            return Some(u);
        }
        None
    }
}

/// Visits all vertices reachable from `start` in a depth-first-search (DFS)
/// order, `start` first, each vertex exactly once.
///
/// A `start` absent from the graph is yielded alone.
pub fn iter_descendants_dfs<'a, V: Hash + Eq>(
    graph: &'a DirectedGraph<V>,
    start: &'a V,
) -> DfsVerticesIterator<'a, V> {
    DfsVerticesIterator {
        graph,
        visited: IndexSet::new(),
        to_visit: vec![start],
    }
}
