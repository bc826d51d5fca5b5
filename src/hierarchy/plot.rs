//! Plottable dendrogram documents.
//!
//! Converts a [`DendrogramTree`] into the flat coordinate document the
//! visualization front-end consumes:
//!
//! ```text
//! { "nodes": [ {"id", "x", "y", "leftId"?, "rightId"?}, ... ],
//!   "leafOrder": [ label, ... ] }
//! ```
//!
//! Leaves sit at `y = 0` with `x` equal to their rank in leaf order;
//! every internal node sits at its merge height, horizontally centered
//! over its two children.

use serde::Serialize;

use super::tree::DendrogramTree;

/// One positioned dendrogram node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotNode {
    /// Cluster id, matching the linkage id scheme.
    pub id: usize,
    /// Horizontal position (leaf rank, or children's midpoint).
    pub x: f64,
    /// Vertical position (merge height, 0 for leaves).
    pub y: f64,
    /// Left child id; absent for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_id: Option<usize>,
    /// Right child id; absent for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_id: Option<usize>,
}

/// Serialized dendrogram: positioned nodes plus left-to-right labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DendrogramDocument {
    /// All nodes, in ascending cluster-id order.
    pub nodes: Vec<PlotNode>,
    /// Leaf labels in left-to-right dendrogram order.
    pub leaf_order: Vec<String>,
}

impl DendrogramTree {
    /// Lay the tree out into a [`DendrogramDocument`].
    pub fn to_document(&self) -> DendrogramDocument {
        let order = self.leaf_order();

        let mut xs = vec![0.0f64; self.len()];
        for (rank, &leaf) in order.iter().enumerate() {
            xs[leaf] = rank as f64;
        }
        // Children precede parents in id order, so one ascending pass
        // positions every internal node.
        for node in self.nodes() {
            if let Some((left, right)) = node.children {
                xs[node.id] = 0.5 * (xs[left] + xs[right]);
            }
        }

        let nodes = self
            .nodes()
            .iter()
            .map(|node| PlotNode {
                id: node.id,
                x: xs[node.id],
                y: node.height,
                left_id: node.children.map(|(left, _)| left),
                right_id: node.children.map(|(_, right)| right),
            })
            .collect();

        DendrogramDocument {
            nodes,
            leaf_order: order.into_iter().map(|id| self.labels()[id].clone()).collect(),
        }
    }
}
