pub mod digraph;
pub mod error;
pub mod traversal;

pub use digraph::{arb_graph, DirectedGraph};
pub use error::GraphError;
pub use traversal::{iter_descendants_dfs, one_path};
