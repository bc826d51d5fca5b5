//! Leaf-order extraction for rendering.
//!
//! The thin payload the visualization needs when it only wants ordering:
//! the leaf labels left-to-right, plus per-adjacent-pair ancestor
//! heights for drawing grouping bands between neighbors.

use serde::Serialize;

use crate::cluster::LinkageMatrix;
use crate::error::Result;
use crate::hierarchy::DendrogramTree;

/// Ordered leaves of a dendrogram with grouping metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterLeaves {
    /// Leaf labels in left-to-right dendrogram order.
    pub labels: Vec<String>,
    /// `band_heights[i]` is the height at which `labels[i]` and
    /// `labels[i + 1]` first share an ancestor; length `n − 1`.
    pub band_heights: Vec<f64>,
}

/// Ordered labels plus grouping bands for a linkage matrix.
///
/// Agrees exactly with [`DendrogramTree::ordered_labels`] and
/// [`DendrogramTree::ancestor_band_heights`] on the same inputs.
///
/// # Errors
///
/// As [`DendrogramTree::from_linkage`].
pub fn extract(linkage: &LinkageMatrix, labels: &[String]) -> Result<ClusterLeaves> {
    let tree = DendrogramTree::from_linkage(linkage, labels)?;
    Ok(ClusterLeaves {
        labels: tree.ordered_labels(),
        band_heights: tree.ancestor_band_heights(),
    })
}

/// Just the ordered labels, without grouping metadata.
///
/// # Errors
///
/// As [`DendrogramTree::from_linkage`].
pub fn extract_order_only(linkage: &LinkageMatrix, labels: &[String]) -> Result<Vec<String>> {
    let tree = DendrogramTree::from_linkage(linkage, labels)?;
    Ok(tree.ordered_labels())
}
