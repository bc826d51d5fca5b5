//! Dendrogram trees and the operations the viewer runs on them.
//!
//! A [`LinkageMatrix`](crate::LinkageMatrix) is compact but hard to
//! query; this module folds it into an explicit binary tree and derives
//! everything the visualization consumes:
//!
//! | Need | Entry point |
//! |------|-------------|
//! | Tree structure | [`DendrogramTree::from_linkage`] |
//! | Left-to-right leaf order | [`DendrogramTree::ordered_labels`], [`extract_order_only`] |
//! | Order + grouping bands | [`extract`] |
//! | Plot coordinates | [`DendrogramTree::to_document`] |
//! | Subset of leaves | [`filter_linkage`] |
//!
//! Subset filtering is **tree surgery, not re-clustering**: the reduced
//! linkage preserves the full tree's merge order and heights exactly, so
//! a pruned dendrogram never contradicts the full one it came from.
//!
//! Every construction and traversal here is iterative (ascending-id
//! passes or an explicit stack); gene-family dendrograms get deep enough
//! to make recursive descent a liability.

mod filter;
mod leaves;
mod plot;
mod tree;

pub use filter::filter_linkage;
pub use leaves::{extract, extract_order_only, ClusterLeaves};
pub use plot::{DendrogramDocument, PlotNode};
pub use tree::{DendrogramNode, DendrogramTree};
