//! Structural subset filtering of linkage matrices.
//!
//! Reduces an existing dendrogram to a chosen subset of its leaves
//! **without re-clustering**: the full tree is pruned, surviving merges
//! keep their original heights, and relative merge order is preserved.
//! Re-running the clustering on a sub-matrix could invert merge order
//! relative to the original tree and misrepresent the parent
//! visualization's structure.
//!
//! Pruning rule: an internal node with surviving leaves on both sides
//! survives; with survivors on one side only it collapses to that
//! side's representative (collapses cascade); with none it vanishes.

use log::debug;

use crate::cluster::{LinkageMatrix, LinkageStep};
use crate::error::{Error, Result};

/// Prune a linkage matrix to the leaves at `keep` positions.
///
/// `keep` holds 0-based leaf positions into `labels`; duplicates are
/// ignored. Returns the reduced linkage together with its label vector:
/// retained leaves take new ids `0..m` in ascending original-position
/// order, and surviving merges are renumbered in merge order (ascending
/// height, ties broken by original step index) with their original
/// heights and recomputed sizes.
///
/// # Errors
///
/// [`Error::EmptySelection`] if `keep` is empty,
/// [`Error::InvalidPosition`] for a position outside `[0, n)`,
/// [`Error::DimensionMismatch`] if the label count disagrees with the
/// linkage, and [`Error::MalformedLinkage`] if the input linkage (or,
/// for non-monotone height sequences, the pruned result) fails
/// validation.
pub fn filter_linkage(
    linkage: &LinkageMatrix,
    labels: &[String],
    keep: &[usize],
) -> Result<(LinkageMatrix, Vec<String>)> {
    let n = linkage.n_leaves();
    if labels.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: labels.len(),
        });
    }
    if keep.is_empty() {
        return Err(Error::EmptySelection);
    }
    linkage.validate()?;

    let mut kept = vec![false; n];
    for &position in keep {
        if position >= n {
            return Err(Error::InvalidPosition {
                position,
                n_leaves: n,
            });
        }
        kept[position] = true;
    }

    let total = n + linkage.n_steps();
    // Surviving representative of each original node, and the number of
    // kept leaves beneath it; one ascending pass covers cascading
    // collapses because children precede parents.
    let mut rep: Vec<Option<usize>> = (0..n).map(|id| kept[id].then_some(id)).collect();
    rep.resize(total, None);
    let mut surviving = vec![0usize; total];
    for (id, &is_kept) in kept.iter().enumerate() {
        surviving[id] = usize::from(is_kept);
    }

    // (original step index, height, left rep, right rep)
    let mut survivors: Vec<(usize, f64, usize, usize)> = Vec::new();
    for (k, step) in linkage.steps().iter().enumerate() {
        let id = n + k;
        surviving[id] = surviving[step.cluster_a] + surviving[step.cluster_b];
        rep[id] = match (rep[step.cluster_a], rep[step.cluster_b]) {
            (Some(left), Some(right)) => {
                survivors.push((k, step.height, left, right));
                Some(id)
            }
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        };
    }

    // Renumber: kept leaves first in ascending original position, then
    // surviving merges in merge order.
    let mut new_id = vec![0usize; total];
    let mut m = 0;
    for (id, &is_kept) in kept.iter().enumerate() {
        if is_kept {
            new_id[id] = m;
            m += 1;
        }
    }
    survivors.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    for (next, &(k, _, _, _)) in survivors.iter().enumerate() {
        new_id[n + k] = m + next;
    }

    let steps: Vec<LinkageStep> = survivors
        .iter()
        .map(|&(k, height, left, right)| LinkageStep {
            cluster_a: new_id[left],
            cluster_b: new_id[right],
            height,
            size: surviving[n + k],
        })
        .collect();

    let reduced_labels: Vec<String> = (0..n)
        .filter(|&id| kept[id])
        .map(|id| labels[id].clone())
        .collect();

    debug!(
        "linkage filter: kept {m} of {n} leaves, {} of {} merges survive",
        steps.len(),
        linkage.n_steps()
    );

    let reduced = LinkageMatrix::from_steps(m, steps)?;
    Ok((reduced, reduced_labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::DendrogramTree;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn step(a: usize, b: usize, height: f64, size: usize) -> LinkageStep {
        LinkageStep {
            cluster_a: a,
            cluster_b: b,
            height,
            size,
        }
    }

    /// A/B pair at 1, C/D pair at 1, joined at 4.
    fn two_pair_linkage() -> LinkageMatrix {
        LinkageMatrix::from_steps(
            4,
            vec![step(0, 1, 1.0, 2), step(2, 3, 1.0, 2), step(4, 5, 4.0, 4)],
        )
        .unwrap()
    }

    #[test]
    fn dropping_one_leaf_promotes_its_sibling() -> Result<()> {
        let (reduced, kept_labels) =
            filter_linkage(&two_pair_linkage(), &labels(&["A", "B", "C", "D"]), &[0, 2, 3])?;

        assert_eq!(kept_labels, labels(&["A", "C", "D"]));
        assert_eq!(
            reduced.steps(),
            &[step(1, 2, 1.0, 2), step(0, 3, 4.0, 3)]
        );
        Ok(())
    }

    #[test]
    fn keeping_everything_preserves_structure_up_to_renumbering() -> Result<()> {
        let full = two_pair_linkage();
        let (reduced, kept_labels) =
            filter_linkage(&full, &labels(&["A", "B", "C", "D"]), &[0, 1, 2, 3])?;

        assert_eq!(kept_labels, labels(&["A", "B", "C", "D"]));
        assert_eq!(reduced, full);
        Ok(())
    }

    #[test]
    fn single_retained_leaf_yields_empty_linkage() -> Result<()> {
        let (reduced, kept_labels) =
            filter_linkage(&two_pair_linkage(), &labels(&["A", "B", "C", "D"]), &[2])?;

        assert!(reduced.is_empty());
        assert_eq!(reduced.n_leaves(), 1);
        assert_eq!(kept_labels, labels(&["C"]));
        Ok(())
    }

    #[test]
    fn collapses_cascade_through_dead_subtrees() -> Result<()> {
        // Comb: ((A,B) + C) + D, merged at heights 1, 2, 3.
        let linkage = LinkageMatrix::from_steps(
            4,
            vec![step(0, 1, 1.0, 2), step(2, 4, 2.0, 3), step(3, 5, 3.0, 4)],
        )?;

        let (reduced, kept_labels) =
            filter_linkage(&linkage, &labels(&["A", "B", "C", "D"]), &[0, 3])?;

        // B and C vanish; the two inner merges collapse onto A, leaving
        // only the root merge with its original height.
        assert_eq!(kept_labels, labels(&["A", "D"]));
        assert_eq!(reduced.steps(), &[step(1, 0, 3.0, 2)]);

        // The pruned tree preserves the full tree's left-to-right order
        // (D sat on the root's left).
        let tree = DendrogramTree::from_linkage(&reduced, &kept_labels)?;
        assert_eq!(tree.ordered_labels(), labels(&["D", "A"]));
        Ok(())
    }

    #[test]
    fn duplicate_positions_are_set_semantics() -> Result<()> {
        let (reduced, _) =
            filter_linkage(&two_pair_linkage(), &labels(&["A", "B", "C", "D"]), &[2, 3, 2])?;
        assert_eq!(reduced.n_leaves(), 2);
        assert_eq!(reduced.n_steps(), 1);
        Ok(())
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err =
            filter_linkage(&two_pair_linkage(), &labels(&["A", "B", "C", "D"]), &[]).unwrap_err();
        assert_eq!(err, Error::EmptySelection);
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        let err = filter_linkage(&two_pair_linkage(), &labels(&["A", "B", "C", "D"]), &[1, 4])
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidPosition {
                position: 4,
                n_leaves: 4
            }
        );
    }

    #[test]
    fn label_count_must_match_linkage() {
        let err = filter_linkage(&two_pair_linkage(), &labels(&["A", "B"]), &[0]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn filtered_linkage_rebuilds_into_a_tree() -> Result<()> {
        let (reduced, kept_labels) =
            filter_linkage(&two_pair_linkage(), &labels(&["A", "B", "C", "D"]), &[0, 2, 3])?;

        let tree = DendrogramTree::from_linkage(&reduced, &kept_labels)?;
        assert_eq!(tree.ordered_labels(), labels(&["A", "C", "D"]));
        assert_eq!(tree.root().height, 4.0);
        Ok(())
    }
}
