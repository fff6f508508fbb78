//! Generic [directed graphs](https://en.wikipedia.org/wiki/Directed_graph)
//! represented as insertion-ordered adjacency sets.
//!
//! Vertices can be of any type implementing `Hash + Eq`; vertex identity is
//! value equality, so two equal values always denote the same vertex.  Both
//! the vertex map and every neighbour set remember insertion order, which
//! makes iteration and the [`std::fmt::Display`] rendering deterministic.
//!
//! A few properties follow from the representation:
//!
//! * **Implicit endpoints**: [`DirectedGraph::add_edge`] inserts any endpoint
//!   that is not yet a vertex.  A vertex referenced by an edge is therefore
//!   always a key of the adjacency map, with a possibly empty neighbour set.
//! * **Monotonic growth**: there is no removal operation.  Once inserted, a
//!   vertex stays for the lifetime of the graph.
//! * **No duplicate edges**: re-adding an existing edge is a no-op signalled
//!   by a `false` return, never an error.
//!
//! ## Anti-features
//!
//! * No edge weights.
//! * No undirected semantics; insert both directions if you need them.
//! * No synchronization.  Wrap the graph in a lock for concurrent use.
//!
//! # Entry points
//!
//! See [`DirectedGraph::new`] or [`DirectedGraph::from_edges_iter`].

use std::fmt;
use std::hash::Hash;
use std::io::Write;

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use proptest::prelude::*;

use crate::error::GraphError;
use crate::traversal::{self, DfsVerticesIterator};

/// A mutable, single-threaded directed graph over hashable vertices.
#[derive(Clone, Debug)]
pub struct DirectedGraph<V> {
    adjacency: IndexMap<V, IndexSet<V>>,
}

impl<V: Hash + Eq> PartialEq for DirectedGraph<V> {
    fn eq(&self, other: &Self) -> bool {
        self.adjacency == other.adjacency
    }
}

impl<V: Hash + Eq> Eq for DirectedGraph<V> {}

impl<V> Default for DirectedGraph<V> {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }
}

impl<V: Hash + Eq> DirectedGraph<V> {
    /// Constructs a new graph without any vertices or edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a graph from an iterator of edges, inserting endpoints in
    /// the order they are first encountered.
    pub fn from_edges_iter<I: Iterator<Item = (V, V)>>(edges: I) -> Self
    where
        V: Clone,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Inserts `v` with an empty neighbour set.
    ///
    /// Returns `true` if `v` was not a vertex before, `false` otherwise; in
    /// the latter case the graph is left unchanged.
    pub fn add_vertex(&mut self, v: V) -> bool {
        match self.adjacency.entry(v) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(IndexSet::new());
                true
            }
        }
    }

    /// Inserts the directed edge `(from, to)`, inserting either endpoint
    /// first if it is not yet a vertex.
    ///
    /// Returns `true` if the edge did not exist before, `false` otherwise.
    /// Only `(from, to)` is inserted; the reverse edge is not.
    pub fn add_edge(&mut self, from: V, to: V) -> bool
    where
        V: Clone,
    {
        self.adjacency.entry(from.clone()).or_default();
        self.adjacency.entry(to.clone()).or_default();
        self.adjacency[&from].insert(to)
    }

    /// Returns whether `v` is a vertex of the graph.
    pub fn contains_vertex(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    /// Returns the out-neighbour set of `v` as an immutable view, in
    /// insertion order.
    ///
    /// The borrow keeps callers from mutating graph internals through the
    /// returned set; clone it if an owned copy is needed.
    pub fn adjacents(&self, v: &V) -> Result<&IndexSet<V>, GraphError> {
        self.adjacency.get(v).ok_or(GraphError::VertexNotFound)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates over the vertices in insertion order.
    pub fn iter_vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    /// Iterates over the edges, grouped by source vertex in insertion order.
    pub fn iter_edges(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(from, neighbours)| neighbours.iter().map(move |to| (from, to)))
    }

    /// Finds *some* directed path from `from` to `to`, not necessarily a
    /// shortest one.  See [`traversal::one_path`].
    pub fn one_path(&self, from: &V, to: &V) -> Result<Option<Vec<V>>, GraphError>
    where
        V: Clone,
    {
        traversal::one_path(self, from, to)
    }

    /// Visits all vertices reachable from `start`, `start` included, in a
    /// depth-first-search (DFS) order.
    pub fn iter_descendants_dfs<'a>(&'a self, start: &'a V) -> DfsVerticesIterator<'a, V> {
        traversal::iter_descendants_dfs(self, start)
    }

    /// Outputs the graph in the [Graphviz DOT](https://graphviz.org/) format.
    pub fn to_dot<W: Write>(&self, output: &mut W) -> std::result::Result<(), std::io::Error>
    where
        V: fmt::Display,
    {
        writeln!(output, "digraph g_{} {{", self.vertex_count())?;

        for (index, vertex) in self.adjacency.keys().enumerate() {
            writeln!(output, "\t_{}[label=\"{}\"];", index, vertex)?;
        }

        writeln!(output, "\n")?;

        for (from_index, (_, neighbours)) in self.adjacency.iter().enumerate() {
            for to in neighbours {
                if let Some(to_index) = self.adjacency.get_index_of(to) {
                    writeln!(output, "\t_{} -> _{};", from_index, to_index)?;
                }
            }
        }

        writeln!(output, "}}")?;
        Ok(())
    }

    pub fn to_dot_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), std::io::Error>
    where
        V: fmt::Display,
    {
        let mut file = std::fs::File::create(path)?;
        self.to_dot(&mut file)?;
        Ok(())
    }
}

/// Renders one line per vertex of the form `<vertex>: [<n1>, <n2>, ...]`,
/// vertices and neighbours in insertion order, each line newline-terminated.
/// Downstream callers may depend on this format byte-for-byte.
impl<V: fmt::Display> fmt::Display for DirectedGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, neighbours) in &self.adjacency {
            write!(f, "{}: [", vertex)?;
            for (position, neighbour) in neighbours.iter().enumerate() {
                if position > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", neighbour)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Generates an arbitrary graph of at most `max_vertex_count` vertices from a
/// random edge list.  Disconnected vertices only arise as edge endpoints, so
/// the empty edge list shrinks to the empty graph.
pub fn arb_graph(max_vertex_count: usize) -> BoxedStrategy<DirectedGraph<usize>> {
    assert!(max_vertex_count >= 1);
    let max_edge_count = max_vertex_count * max_vertex_count;
    proptest::collection::vec((0..max_vertex_count, 0..max_vertex_count), 0..max_edge_count)
        .prop_map(|edges| DirectedGraph::from_edges_iter(edges.into_iter()))
        .boxed()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Point {
        fn new(x: i32, y: i32) -> Self {
            Point { x, y }
        }
    }

    impl fmt::Display for Point {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "({}, {})", self.x, self.y)
        }
    }

    #[test]
    fn adds_a_vertex() {
        let mut graph: DirectedGraph<i32> = DirectedGraph::new();
        assert!(graph.add_vertex(1));
        assert!(graph.contains_vertex(&1));
        assert!(!graph.add_vertex(1));
        assert_eq!(graph.to_string(), "1: []\n");

        let mut points: DirectedGraph<Point> = DirectedGraph::new();
        assert!(points.add_vertex(Point::new(0, 0)));
        assert!(points.contains_vertex(&Point::new(0, 0)));
        assert_eq!(points.to_string(), "(0, 0): []\n");
    }

    #[test]
    fn adds_an_edge() {
        let mut graph: DirectedGraph<i32> = DirectedGraph::new();
        assert!(graph.add_edge(1, 2));
        assert!(graph.contains_vertex(&1));
        assert!(graph.contains_vertex(&2));
        assert!(graph.adjacents(&1).unwrap().contains(&2));
        assert_eq!(graph.to_string(), "1: [2]\n2: []\n");

        // The edge is directed and already present; both calls are no-ops.
        assert!(!graph.add_edge(1, 2));
        assert!(!graph.adjacents(&2).unwrap().contains(&1));

        let mut points: DirectedGraph<Point> = DirectedGraph::new();
        assert!(points.add_edge(Point::new(0, 0), Point::new(1, 1)));
        assert!(points
            .adjacents(&Point::new(0, 0))
            .unwrap()
            .contains(&Point::new(1, 1)));
        assert_eq!(points.to_string(), "(0, 0): [(1, 1)]\n(1, 1): []\n");
    }

    #[test]
    fn obtains_adjacents() {
        let mut graph: DirectedGraph<i32> = DirectedGraph::new();
        graph.add_vertex(2);
        graph.add_vertex(3);
        graph.add_vertex(4);
        graph.add_vertex(5);
        graph.add_edge(2, 3);
        graph.add_edge(2, 4);
        graph.add_edge(4, 5);

        assert_eq!(
            graph.adjacents(&2).unwrap(),
            &IndexSet::from([3, 4]),
        );
        assert_eq!(graph.adjacents(&4).unwrap(), &IndexSet::from([5]));
        assert!(graph.adjacents(&3).unwrap().is_empty());
        assert_eq!(graph.to_string(), "2: [3, 4]\n3: []\n4: [5]\n5: []\n");
    }

    #[test]
    fn adjacents_of_a_missing_vertex_fails() {
        let graph: DirectedGraph<i32> = DirectedGraph::new();
        assert_eq!(graph.adjacents(&1), Err(GraphError::VertexNotFound));
    }

    #[test]
    fn renders_vertices_in_insertion_order() {
        let mut graph: DirectedGraph<i32> = DirectedGraph::new();
        graph.add_edge(1, 3);
        graph.add_edge(2, 4);
        graph.add_edge(3, 1);
        graph.add_edge(6, 5);
        assert_eq!(
            graph.to_string(),
            "1: [3]\n3: [1]\n2: [4]\n4: []\n6: [5]\n5: []\n"
        );
    }

    #[test]
    fn counts_vertices_and_edges() {
        let edges = vec![(1, 2), (3, 4), (1, 5), (5, 6), (6, 4)];
        let graph = DirectedGraph::from_edges_iter(edges.into_iter());
        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.edge_count(), 5);
        assert!(!graph.is_empty());
        assert_eq!(
            graph.iter_vertices().copied().collect::<Vec<i32>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
        assert_eq!(
            graph.iter_edges().map(|(u, v)| (*u, *v)).collect::<Vec<_>>(),
            vec![(1, 2), (1, 5), (3, 4), (5, 6), (6, 4)]
        );
    }

    #[test]
    fn outputs_dot() {
        let graph = DirectedGraph::from_edges_iter(vec![(0, 1), (1, 2)].into_iter());
        let mut output: Vec<u8> = Vec::new();
        graph.to_dot(&mut output).unwrap();
        let dot = String::from_utf8(output).unwrap();
        assert!(dot.starts_with("digraph g_3 {"));
        assert!(dot.contains("\t_0 -> _1;"));
        assert!(dot.contains("\t_1 -> _2;"));
        assert!(dot.ends_with("}\n"));
    }

    proptest! {
        #[test]
        fn add_vertex_reports_first_insertion(vertices in proptest::collection::vec(any::<u16>(), 1..50)) {
            let mut graph: DirectedGraph<u16> = DirectedGraph::new();
            let mut seen: HashSet<u16> = HashSet::new();
            for v in vertices {
                prop_assert_eq!(graph.add_vertex(v), seen.insert(v));
                prop_assert!(graph.contains_vertex(&v));
                prop_assert!(!graph.add_vertex(v));
            }
            prop_assert_eq!(graph.vertex_count(), seen.len());
        }
    }

    proptest! {
        #[test]
        fn repeated_edge_insertion_changes_nothing(graph in arb_graph(10)) {
            let rendered = graph.to_string();
            let mut copy = graph.clone();
            let edges: Vec<(usize, usize)> = graph.iter_edges().map(|(u, v)| (*u, *v)).collect();
            for (from, to) in edges {
                prop_assert!(!copy.add_edge(from, to));
            }
            prop_assert_eq!(copy.to_string(), rendered);
            prop_assert_eq!(copy, graph);
        }
    }

    proptest! {
        #[test]
        fn rendering_has_one_line_per_vertex(graph in arb_graph(16)) {
            prop_assert_eq!(graph.to_string().lines().count(), graph.vertex_count());
        }
    }
}
