use thiserror::Error;

/// Errors produced while building or consuming a SHACL property path.
#[derive(Error, Debug)]
pub enum PathError {
    /// The graph-encoded description does not conform to the path grammar:
    /// a list with the wrong arity, a missing required list, an ambiguous
    /// or absent root node, or a structure matching no known operator.
    ///
    /// Raised at build time, so evaluation and serialization never have to
    /// re-validate the tree.
    #[error("malformed SHACL property path: {0}")]
    Malformed(String),

    /// A structurally valid path uses a combination the chosen consumer
    /// does not support, e.g. evaluating the inverse of a composite path.
    #[error("unsupported SHACL property path: {0}")]
    Unsupported(String),

    /// A fact store lookup failed. The source error is propagated
    /// unchanged; the engine performs no retries.
    #[error("fact store lookup failed: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PathError {
    /// Wraps a fact store failure for propagation through path evaluation.
    pub fn store(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        PathError::Store(source.into())
    }
}
