//! Error type shared by the graph representations and the counters.

use thiserror::Error;

/// Errors raised by graph construction, decomposition and counting.
///
/// All of these are precondition or representation-limit violations; none are retried.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested node count does not fit the chosen representation.
    #[error("{nodes} nodes exceeds the limit of {limit} for this representation")]
    Capacity {
        /// Requested number of nodes.
        nodes: usize,
        /// Largest supported number of nodes (inclusive).
        limit: usize,
    },

    /// A node index is outside `0..num_nodes` (or the graph is empty).
    #[error("node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange {
        /// The offending index.
        node: usize,
        /// Number of nodes in the graph.
        num_nodes: usize,
    },

    /// `add_arc` was called for an arc that is already present.
    #[error("arc {parent} -> {child} already exists")]
    ArcExists {
        /// Parent node.
        parent: usize,
        /// Child node.
        child: usize,
    },

    /// `add_arc(i, i)`.
    #[error("self-loop requested at node {node}")]
    SelfLoop {
        /// The node.
        node: usize,
    },

    /// Attempted to mutate a graph that has been frozen.
    #[error("cannot mutate an immutable graph")]
    Immutable,

    /// `interleave(a, b)` indexed past the end of its table.
    #[error("interleave({a}, {b}) exceeds the table bound of {limit}")]
    InterleaveBounds {
        /// First sequence length.
        a: usize,
        /// Second sequence length.
        b: usize,
        /// Table dimension.
        limit: usize,
    },

    /// `interleave(a, b)` does not fit in a signed 64-bit integer.
    #[error("interleave({a}, {b}) overflows 64 bits")]
    InterleaveOverflow {
        /// First sequence length.
        a: usize,
        /// Second sequence length.
        b: usize,
    },

    /// Malformed arc matrix text or an unreadable matrix file.
    #[error("parse error: {0}")]
    Parse(#[from] crate::matrix::ParseError),

    /// The arc matrix contains a directed cycle through `node`.
    #[error("arc matrix is not acyclic (cycle through node {node})")]
    Cyclic {
        /// A node on the cycle.
        node: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
