//! Agglomerative clustering over a precomputed distance matrix.
//!
//! Bottom-up clustering: start with n singleton clusters, repeatedly
//! merge the closest pair, and log every merge into a
//! [`LinkageMatrix`]. Inter-cluster distances after a merge are updated
//! with the Lance–Williams recurrence for the selected
//! [`LinkageMethod`]; no distances are ever recomputed from raw data.
//!
//! # Determinism
//!
//! Given an identical matrix and method, `build` is bit-reproducible:
//! the minimum scan visits active cluster pairs in ascending-id order
//! and replaces the running best only on strictly smaller distance, so
//! ties resolve to the pair with the smallest
//! `(min(id_a, id_b), max(id_a, id_b))` key. Callers may cache the
//! resulting linkage keyed on the input alone.
//!
//! # Complexity
//!
//! The pair scan is O(n³) time, O(n²) memory over the scratch matrix.
//! That is deliberate: the tie-break policy stays auditable, and input
//! sizes are bounded upstream by what a dendrogram can usefully display.

use log::{debug, trace};
use ndarray::Array2;

use super::linkage::{LinkageMatrix, LinkageStep};
use super::method::LinkageMethod;
use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;

/// Agglomerative linkage builder.
///
/// ```
/// use dendra::{DistanceMatrix, LinkageBuilder, LinkageMethod};
/// use ndarray::array;
///
/// let matrix = DistanceMatrix::from_array(array![
///     [0.0, 1.0, 4.0],
///     [1.0, 0.0, 4.0],
///     [4.0, 4.0, 0.0],
/// ]).unwrap();
///
/// let linkage = LinkageBuilder::new(LinkageMethod::Single)
///     .build(&matrix)
///     .unwrap();
/// assert_eq!(linkage.n_steps(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct LinkageBuilder {
    method: LinkageMethod,
}

impl LinkageBuilder {
    /// Create a builder for the given linkage method.
    pub fn new(method: LinkageMethod) -> Self {
        Self { method }
    }

    /// The configured linkage method.
    pub fn method(&self) -> LinkageMethod {
        self.method
    }

    /// Run agglomerative clustering, producing the merge log.
    ///
    /// Returns exactly `n − 1` steps for an n-item matrix; matrices over
    /// 0 or 1 items yield an empty linkage.
    ///
    /// # Errors
    ///
    /// [`Error::NonFiniteDistance`] if a Lance–Williams update produces
    /// NaN or infinity. The input matrix itself is finite by
    /// construction of [`DistanceMatrix`].
    pub fn build(&self, matrix: &DistanceMatrix) -> Result<LinkageMatrix> {
        let n = matrix.n();
        let mut linkage = LinkageMatrix::new(n);
        if n <= 1 {
            return Ok(linkage);
        }

        debug!("linkage build: n={n}, method={}", self.method);

        // Scratch distance matrix indexed by cluster id; ids n..2n-1 are
        // created as merges happen. Row/column 2n-2 (the root) is never
        // read but keeps the indexing uniform.
        let total = 2 * n - 1;
        let mut dist = Array2::<f64>::zeros((total, total));
        dist.slice_mut(ndarray::s![..n, ..n])
            .assign(matrix.as_array());

        let mut sizes = vec![1usize; total];
        // Ascending at all times: retain preserves order and every new
        // cluster id is the largest so far.
        let mut active: Vec<usize> = (0..n).collect();

        for k in 0..(n - 1) {
            let (a, b) = closest_pair(&dist, &active);
            let height = dist[(a, b)];
            let new_id = n + k;
            let size = sizes[a] + sizes[b];

            trace!("merge {k}: ({a}, {b}) at {height} -> cluster {new_id} (size {size})");
            linkage.push(LinkageStep {
                cluster_a: a,
                cluster_b: b,
                height,
                size,
            });

            for &c in &active {
                if c == a || c == b {
                    continue;
                }
                let updated = self.lance_williams(&dist, a, b, c, &sizes);
                if !updated.is_finite() {
                    return Err(Error::NonFiniteDistance {
                        row: new_id,
                        col: c,
                    });
                }
                dist[(new_id, c)] = updated;
                dist[(c, new_id)] = updated;
            }

            sizes[new_id] = size;
            active.retain(|&id| id != a && id != b);
            active.push(new_id);
        }

        debug!("linkage build done: {} steps", linkage.n_steps());
        Ok(linkage)
    }

    /// Distance from the cluster about to be formed from `a` and `b` to
    /// an untouched cluster `c`.
    fn lance_williams(
        &self,
        dist: &Array2<f64>,
        a: usize,
        b: usize,
        c: usize,
        sizes: &[usize],
    ) -> f64 {
        let d_ac = dist[(a, c)];
        let d_bc = dist[(b, c)];
        match self.method {
            LinkageMethod::Single => d_ac.min(d_bc),
            LinkageMethod::Complete => d_ac.max(d_bc),
            LinkageMethod::Average => {
                let sa = sizes[a] as f64;
                let sb = sizes[b] as f64;
                (sa * d_ac + sb * d_bc) / (sa + sb)
            }
            LinkageMethod::Ward => {
                let sa = sizes[a] as f64;
                let sb = sizes[b] as f64;
                let sc = sizes[c] as f64;
                let d_ab = dist[(a, b)];
                (((sa + sc) * d_ac * d_ac + (sb + sc) * d_bc * d_bc - sc * d_ab * d_ab)
                    / (sa + sb + sc))
                    .sqrt()
            }
        }
    }
}

/// The active pair at strictly minimal distance, ties resolved to the
/// lexicographically smallest `(a, b)`.
fn closest_pair(dist: &Array2<f64>, active: &[usize]) -> (usize, usize) {
    let mut best = (active[0], active[1]);
    let mut best_dist = f64::INFINITY;
    for (i, &a) in active.iter().enumerate() {
        for &b in &active[i + 1..] {
            let d = dist[(a, b)];
            if d < best_dist {
                best_dist = d;
                best = (a, b);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn matrix(values: Array2<f64>) -> DistanceMatrix {
        DistanceMatrix::from_array(values).unwrap()
    }

    #[test]
    fn two_items_merge_once() -> Result<()> {
        let m = matrix(array![[0.0, 3.0], [3.0, 0.0]]);
        let linkage = LinkageBuilder::new(LinkageMethod::Average).build(&m)?;

        assert_eq!(linkage.n_steps(), 1);
        let step = linkage.steps()[0];
        assert_eq!((step.cluster_a, step.cluster_b), (0, 1));
        assert_eq!(step.height, 3.0);
        assert_eq!(step.size, 2);
        Ok(())
    }

    #[test]
    fn single_linkage_takes_minimum() -> Result<()> {
        let m = matrix(array![
            [0.0, 1.0, 5.0],
            [1.0, 0.0, 2.0],
            [5.0, 2.0, 0.0]
        ]);
        let linkage = LinkageBuilder::new(LinkageMethod::Single).build(&m)?;

        // {0,1} at 1, then d({0,1}, 2) = min(5, 2) = 2.
        assert_eq!(linkage.steps()[0].height, 1.0);
        assert_eq!(linkage.steps()[1].height, 2.0);
        Ok(())
    }

    #[test]
    fn complete_linkage_takes_maximum() -> Result<()> {
        let m = matrix(array![
            [0.0, 1.0, 5.0],
            [1.0, 0.0, 2.0],
            [5.0, 2.0, 0.0]
        ]);
        let linkage = LinkageBuilder::new(LinkageMethod::Complete).build(&m)?;

        assert_eq!(linkage.steps()[1].height, 5.0);
        Ok(())
    }

    #[test]
    fn average_linkage_weights_by_size() -> Result<()> {
        let m = matrix(array![
            [0.0, 1.0, 6.0, 6.0],
            [1.0, 0.0, 2.0, 2.0],
            [6.0, 2.0, 0.0, 10.0],
            [6.0, 2.0, 10.0, 0.0]
        ]);
        let linkage = LinkageBuilder::new(LinkageMethod::Average).build(&m)?;

        // {0,1} merges at 1; d({0,1}, 2) = (6 + 2) / 2 = 4, same for 3.
        // {0,1} and 2 merge at 4 (lexicographic winner over (2,3) at 10);
        // then d({0,1,2}, 3) = (2*4 + 1*10) / 3 = 6.
        assert_eq!(linkage.steps()[1].height, 4.0);
        assert_eq!(linkage.steps()[2].height, 6.0);
        Ok(())
    }

    #[test]
    fn ward_update_matches_recurrence() -> Result<()> {
        let m = matrix(array![
            [0.0, 1.0, 5.0],
            [1.0, 0.0, 5.0],
            [5.0, 5.0, 0.0]
        ]);
        let linkage = LinkageBuilder::new(LinkageMethod::Ward).build(&m)?;

        // sqrt(((1+1)*25 + (1+1)*25 - 1*1) / 3) = sqrt(99/3) = sqrt(33)
        let expected = (99.0f64 / 3.0).sqrt();
        assert!((linkage.steps()[1].height - expected).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn ties_resolve_to_smallest_id_pair() -> Result<()> {
        // All pairwise distances equal: merges must start at (0, 1).
        let m = matrix(Array2::from_shape_fn((3, 3), |(i, j)| {
            if i == j {
                0.0
            } else {
                2.0
            }
        }));
        let linkage = LinkageBuilder::new(LinkageMethod::Single).build(&m)?;

        assert_eq!(
            (linkage.steps()[0].cluster_a, linkage.steps()[0].cluster_b),
            (0, 1)
        );
        assert_eq!(
            (linkage.steps()[1].cluster_a, linkage.steps()[1].cluster_b),
            (2, 3)
        );
        Ok(())
    }

    #[test]
    fn steps_are_referentially_valid() -> Result<()> {
        let m = matrix(array![
            [0.0, 2.0, 9.0, 4.0, 7.0],
            [2.0, 0.0, 8.0, 5.0, 6.0],
            [9.0, 8.0, 0.0, 3.0, 1.0],
            [4.0, 5.0, 3.0, 0.0, 2.5],
            [7.0, 6.0, 1.0, 2.5, 0.0]
        ]);
        for method in [
            LinkageMethod::Single,
            LinkageMethod::Complete,
            LinkageMethod::Average,
            LinkageMethod::Ward,
        ] {
            let linkage = LinkageBuilder::new(method).build(&m)?;
            assert_eq!(linkage.n_steps(), 4);
            linkage.validate()?;
            for step in linkage.steps() {
                assert!(step.cluster_a < step.cluster_b);
            }
        }
        Ok(())
    }

    #[test]
    fn empty_and_singleton_inputs_yield_empty_linkage() -> Result<()> {
        for n in [0, 1] {
            let m = matrix(Array2::zeros((n, n)));
            let linkage = LinkageBuilder::new(LinkageMethod::Ward).build(&m)?;
            assert!(linkage.is_empty());
            assert_eq!(linkage.n_leaves(), n);
        }
        Ok(())
    }
}
