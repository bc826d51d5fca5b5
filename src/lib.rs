//! # dendra
//!
//! Hierarchical-clustering engine for gene/protein similarity
//! dendrograms: weighted distance-matrix combination, agglomerative
//! linkage construction, dendrogram layout, and structural subset
//! filtering.
//!
//! The crate is the algorithmic core of a similarity viewer. The
//! surrounding service (routes, file loading, caching) stays outside:
//! it supplies raw distance matrices and labels, and consumes a linkage
//! table plus a plottable dendrogram document.
//!
//! # Pipeline
//!
//! ```text
//! matrices + weights
//!        │
//!        ▼
//! DistanceMatrix::combine ──▶ LinkageBuilder::build ──▶ LinkageMatrix
//!                                                           │
//!                              ┌────────────────────────────┤
//!                              ▼                            ▼
//!                      filter_linkage                DendrogramTree
//!                      (subset of leaves)                   │
//!                              │                 ┌──────────┴─────────┐
//!                              ▼                 ▼                    ▼
//!                       DendrogramTree      to_document()      ordered_labels()
//! ```
//!
//! # Example
//!
//! ```
//! use dendra::{DistanceMatrix, LinkageBuilder, LinkageMethod};
//! use ndarray::array;
//!
//! // Two tight pairs, far apart.
//! let matrix = DistanceMatrix::from_array(array![
//!     [0.0, 1.0, 4.0, 4.0],
//!     [1.0, 0.0, 4.0, 4.0],
//!     [4.0, 4.0, 0.0, 1.0],
//!     [4.0, 4.0, 1.0, 0.0],
//! ]).unwrap();
//!
//! let linkage = LinkageBuilder::new(LinkageMethod::Average)
//!     .build(&matrix)
//!     .unwrap();
//!
//! let labels: Vec<String> =
//!     ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
//! let tree = dendra::DendrogramTree::from_linkage(&linkage, &labels).unwrap();
//! assert_eq!(tree.ordered_labels(), labels);
//! ```
//!
//! # Determinism
//!
//! Identical inputs produce bit-identical linkage matrices: merge
//! scanning breaks ties on the lexicographically smallest cluster-id
//! pair. Callers may therefore cache serialized linkage tables keyed on
//! the input alone.
//!
//! # Concurrency
//!
//! Every operation is synchronous and CPU-bound, and every type is
//! plain immutable data: build once, read thereafter. Concurrent
//! requests need no synchronization as long as each allocates its own
//! matrices; long builds belong on the caller's worker pool, abandoned
//! at whatever granularity the caller cancels.

pub mod cluster;
/// Error types used across `dendra`.
pub mod error;
pub mod hierarchy;
pub mod matrix;


pub use cluster::{LinkageBuilder, LinkageMatrix, LinkageMethod, LinkageStep};
pub use error::{Error, Result};
pub use hierarchy::{
    extract, extract_order_only, filter_linkage, ClusterLeaves, DendrogramDocument,
    DendrogramNode, DendrogramTree, PlotNode,
};
pub use matrix::{weight_from_percent, DistanceMatrix};
