//! Linkage matrices: the merge log of an agglomerative clustering run.
//!
//! A linkage matrix is the compact encoding of a dendrogram as an ordered
//! sequence of binary merges. Cluster ids follow the SciPy/MATLAB scheme:
//!
//! - leaves are `0..n`,
//! - merge step `k` creates cluster id `n + k`,
//! - each step references two earlier ids (leaf or internal), so there
//!   are no forward references.
//!
//! Callers may persist the serialized `(n−1)×4` table
//! `[id_a, id_b, height, size]` (see [`LinkageMatrix::to_rows`]); its
//! shape and meaning are stable.

use serde::Serialize;

use crate::error::{Error, Result};

/// A single merge in a linkage matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkageStep {
    /// First cluster being merged; drawn as the left subtree. The
    /// builder always emits the smaller id here.
    pub cluster_a: usize,
    /// Second cluster being merged; drawn as the right subtree.
    pub cluster_b: usize,
    /// Distance at which the merge occurred.
    pub height: f64,
    /// Leaf count of the resulting cluster.
    pub size: usize,
}

/// Ordered sequence of merges over `n_leaves` items.
///
/// A complete linkage matrix holds exactly `n_leaves − 1` steps; the
/// empty matrix over 0 or 1 leaves is also valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkageMatrix {
    n_leaves: usize,
    steps: Vec<LinkageStep>,
}

impl LinkageMatrix {
    /// Create an empty linkage matrix for `n_leaves` items.
    pub fn new(n_leaves: usize) -> Self {
        Self {
            n_leaves,
            steps: Vec::with_capacity(n_leaves.saturating_sub(1)),
        }
    }

    /// Build from externally supplied steps, validating referential
    /// integrity.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedLinkage`] as described on
    /// [`LinkageMatrix::validate`].
    pub fn from_steps(n_leaves: usize, steps: Vec<LinkageStep>) -> Result<Self> {
        let linkage = Self { n_leaves, steps };
        linkage.validate()?;
        Ok(linkage)
    }

    /// Record a merge. Used by the builder; external linkage goes through
    /// [`LinkageMatrix::from_steps`].
    pub(crate) fn push(&mut self, step: LinkageStep) {
        self.steps.push(step);
    }

    /// Number of original items.
    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// Number of merge steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.steps.len()
    }

    /// True if no merges were recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The recorded merges in order.
    pub fn steps(&self) -> &[LinkageStep] {
        &self.steps
    }

    /// Id of the cluster created by the final merge, if any.
    pub fn root_id(&self) -> Option<usize> {
        if self.steps.is_empty() {
            None
        } else {
            Some(self.n_leaves + self.steps.len() - 1)
        }
    }

    /// The `(n−1)×4` table `[id_a, id_b, height, size]` callers persist.
    pub fn to_rows(&self) -> Vec<[f64; 4]> {
        self.steps
            .iter()
            .map(|s| [s.cluster_a as f64, s.cluster_b as f64, s.height, s.size as f64])
            .collect()
    }

    /// Check referential integrity.
    ///
    /// A well-formed linkage over n leaves has exactly n−1 steps (unless
    /// empty over n ≤ 1 items); step `k` references two distinct ids
    /// `< n + k`, no id is merged twice, heights are finite and
    /// non-negative, and each step's size is the sum of its children's.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedLinkage`] naming the first offending step.
    pub fn validate(&self) -> Result<()> {
        let n = self.n_leaves;
        let expected_steps = n.saturating_sub(1);
        if self.steps.len() != expected_steps {
            return Err(Error::MalformedLinkage {
                step: self.steps.len(),
                message: format!(
                    "{} steps recorded, {} leaves require {}",
                    self.steps.len(),
                    n,
                    expected_steps
                ),
            });
        }

        // sizes[id] doubles as the consumed marker (0 = already merged).
        let mut sizes = vec![1usize; n + self.steps.len()];
        for (k, step) in self.steps.iter().enumerate() {
            let limit = n + k;
            for id in [step.cluster_a, step.cluster_b] {
                if id >= limit {
                    return Err(Error::MalformedLinkage {
                        step: k,
                        message: format!("forward reference to cluster {id} (limit {limit})"),
                    });
                }
            }
            if step.cluster_a == step.cluster_b {
                return Err(Error::MalformedLinkage {
                    step: k,
                    message: format!("cluster {} merged with itself", step.cluster_a),
                });
            }
            if sizes[step.cluster_a] == 0 || sizes[step.cluster_b] == 0 {
                let id = if sizes[step.cluster_a] == 0 {
                    step.cluster_a
                } else {
                    step.cluster_b
                };
                return Err(Error::MalformedLinkage {
                    step: k,
                    message: format!("cluster {id} merged twice"),
                });
            }
            if !step.height.is_finite() || step.height < 0.0 {
                return Err(Error::MalformedLinkage {
                    step: k,
                    message: format!("invalid merge height {}", step.height),
                });
            }
            let merged = sizes[step.cluster_a] + sizes[step.cluster_b];
            if step.size != merged {
                return Err(Error::MalformedLinkage {
                    step: k,
                    message: format!("size {} recorded, children sum to {merged}", step.size),
                });
            }
            sizes[step.cluster_a] = 0;
            sizes[step.cluster_b] = 0;
            sizes[limit] = merged;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(a: usize, b: usize, height: f64, size: usize) -> LinkageStep {
        LinkageStep {
            cluster_a: a,
            cluster_b: b,
            height,
            size,
        }
    }

    #[test]
    fn valid_linkage_passes() -> Result<()> {
        let linkage = LinkageMatrix::from_steps(
            4,
            vec![step(0, 1, 1.0, 2), step(2, 3, 1.0, 2), step(4, 5, 4.0, 4)],
        )?;
        assert_eq!(linkage.n_steps(), 3);
        assert_eq!(linkage.root_id(), Some(6));
        Ok(())
    }

    #[test]
    fn forward_reference_is_rejected() {
        let err = LinkageMatrix::from_steps(3, vec![step(0, 3, 1.0, 2), step(1, 2, 2.0, 3)])
            .unwrap_err();
        assert!(matches!(err, Error::MalformedLinkage { step: 0, .. }));
    }

    #[test]
    fn double_merge_is_rejected() {
        let err = LinkageMatrix::from_steps(3, vec![step(0, 1, 1.0, 2), step(0, 3, 2.0, 3)])
            .unwrap_err();
        assert!(matches!(err, Error::MalformedLinkage { step: 1, .. }));
    }

    #[test]
    fn wrong_step_count_is_rejected() {
        let err = LinkageMatrix::from_steps(4, vec![step(0, 1, 1.0, 2)]).unwrap_err();
        assert!(matches!(err, Error::MalformedLinkage { .. }));
    }

    #[test]
    fn inconsistent_size_is_rejected() {
        let err = LinkageMatrix::from_steps(2, vec![step(0, 1, 1.0, 3)]).unwrap_err();
        assert!(matches!(err, Error::MalformedLinkage { step: 0, .. }));
    }

    #[test]
    fn table_rows_carry_ids_heights_sizes() -> Result<()> {
        let linkage = LinkageMatrix::from_steps(2, vec![step(0, 1, 2.5, 2)])?;
        assert_eq!(linkage.to_rows(), vec![[0.0, 1.0, 2.5, 2.0]]);
        Ok(())
    }

    #[test]
    fn empty_over_one_leaf_is_valid() -> Result<()> {
        let linkage = LinkageMatrix::from_steps(1, vec![])?;
        assert!(linkage.is_empty());
        assert_eq!(linkage.root_id(), None);
        Ok(())
    }
}
