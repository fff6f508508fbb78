use thiserror::Error;

/// Failures reported by graph queries.
///
/// Mutating operations never fail: they signal a no-op with a `bool` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The requested vertex was never inserted into the graph.
    #[error("vertex not found")]
    VertexNotFound,
}
