//! # linext
//!
//! Counting the linear extensions (topological orderings) of directed acyclic graphs.
//!
//! This crate provides:
//! - A DAG representation with incrementally maintained parent/child rows, connectivity,
//!   and root/leaf sets, in a single-word (`u64`, up to 64 nodes) and a growable flavor.
//! - An exact brute-force counter for small graphs.
//! - A dynamic-programming counter combining polynomial-time reductions, branching on
//!   roots or leaves, and a memo table keyed by a canonical graph hash.
//! - The labelled-DAG count and the TOM vs uniform-DAG prior comparison built on it.
//!
//! ## Quick Start
//!
//! ```
//! use linext::counter::ExtensionCounter;
//! use linext::graph::FixedWidthGraph;
//!
//! // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
//! let diamond = FixedWidthGraph::from_arcs(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
//! let mut counter = ExtensionCounter::new();
//! assert_eq!(counter.count_perms(&diamond).unwrap(), 2.0);
//! ```
//!
//! ## Validating Known Graphs
//!
//! ```
//! use linext::validate::validate_known_graphs;
//!
//! validate_known_graphs().expect("all bundled counts should match");
//! ```
//!
//! ## Working with Graphs Directly
//!
//! ```
//! use linext::brute::BruteForceCounter;
//! use linext::graph::FixedWidthGraph;
//!
//! let mut g = FixedWidthGraph::new(5).unwrap();
//! g.add_arc(0, 3, true).unwrap();
//! g.add_arc(3, 2, true).unwrap();
//!
//! // Implied arc 0 -> 2 was added.
//! assert!(g.is_directed_arc(0, 2));
//! assert_eq!(g.root_nodes(), vec![0, 1, 4]);
//!
//! let smaller = g.remove_node(0).unwrap();
//! assert_eq!(smaller.num_nodes(), 4);
//! assert_eq!(BruteForceCounter::new().count_extensions(&g).unwrap(), 20);
//! ```
//!
//! ## Modules
//!
//! - [`bits`]: Word-level bit helpers and the [`bits::BitRow`] row abstraction.
//! - [`wide`]: Growable bitset rows for graphs over 64 nodes.
//! - [`graph`]: The unlabelled DAG and its decomposition operations.
//! - [`canonical`]: Labelled and canonical graph hashing.
//! - [`brute`]: Exact permutation-based counting.
//! - [`combinatorics`]: Factorials, binomials and the interleave table.
//! - [`counter`]: The dynamic-programming counter.
//! - [`dags`]: Labelled DAG counts and priors.
//! - [`matrix`]: Plain-text arc matrices.
//! - [`validate`]: Deterministic validation against known counts.
//!
//! ## Performance Notes
//!
//! - Prefer [`graph::FixedWidthGraph`] whenever the graph has at most 64 nodes.
//! - Extension counts are `f64`; they are exact up to 2^53 and approximate beyond.
//! - For maximum performance, compile with: `RUSTFLAGS="-C target-cpu=native" cargo build --release`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)]
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod bits;
pub mod brute;
pub mod canonical;
pub mod combinatorics;
pub mod counter;
pub mod dags;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod validate;
pub mod wide;

pub use error::{Error, Result};

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::bits::BitRow;
    pub use crate::brute::BruteForceCounter;
    pub use crate::counter::{count_many, CounterConfig, ExtensionCounter, HashMode, Reductions};
    pub use crate::dags::{tom_prior, total_toms, DagCountEstimator};
    pub use crate::error::{Error, Result};
    pub use crate::graph::{FixedWidthGraph, OrderedModel, UnlabelledGraph, WideGraph};
    pub use crate::matrix::{parse_arc_matrix, ArcMatrix};
    pub use crate::validate::validate_known_graphs;
}
