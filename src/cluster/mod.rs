//! Agglomerative clustering: linkage methods, merge logs, and the builder.
//!
//! The pipeline starts here. Given a validated
//! [`DistanceMatrix`](crate::DistanceMatrix), [`LinkageBuilder`] runs
//! bottom-up clustering (start with every item as its own cluster,
//! repeatedly merge the closest pair) and records each merge into a
//! [`LinkageMatrix`], the compact dendrogram encoding downstream modules
//! and persisting callers consume.
//!
//! ## Linkage methods
//!
//! [`LinkageMethod`] selects how inter-cluster distance is defined after
//! a merge, via the Lance–Williams recurrence:
//!
//! | Method | Update for d(A∪B, C) | Effect |
//! |--------|----------------------|--------|
//! | Single | min(d(A,C), d(B,C)) | Chaining; elongated clusters |
//! | Complete | max(d(A,C), d(B,C)) | Compact, spherical clusters |
//! | Average | (\|A\|·d(A,C) + \|B\|·d(B,C)) / (\|A\|+\|B\|) | Balanced compromise |
//! | Ward | √(((\|A\|+\|C\|)·d(A,C)² + (\|B\|+\|C\|)·d(B,C)² − \|C\|·d(A,B)²) / (\|A\|+\|B\|+\|C\|)) | Minimizes variance |
//!
//! ## Usage
//!
//! ```
//! use dendra::{DistanceMatrix, LinkageBuilder, LinkageMethod};
//! use ndarray::array;
//!
//! let matrix = DistanceMatrix::from_array(array![
//!     [0.0, 1.0, 4.0, 4.0],
//!     [1.0, 0.0, 4.0, 4.0],
//!     [4.0, 4.0, 0.0, 1.0],
//!     [4.0, 4.0, 1.0, 0.0],
//! ]).unwrap();
//!
//! let linkage = LinkageBuilder::new(LinkageMethod::Single)
//!     .build(&matrix)
//!     .unwrap();
//!
//! assert_eq!(linkage.n_steps(), 3);
//! assert_eq!(linkage.steps()[2].height, 4.0);
//! ```

mod agglomerative;
mod linkage;
mod method;

pub use agglomerative::LinkageBuilder;
pub use linkage::{LinkageMatrix, LinkageStep};
pub use method::LinkageMethod;
