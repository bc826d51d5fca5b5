use core::fmt;

/// Result alias for `dendra`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering engine.
///
/// Every variant carries enough context (offending index, dimension,
/// method selector) for a calling service to produce a user-facing
/// message. The engine never recovers from these silently: a malformed
/// input never yields a partial or best-effort linkage matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Matrix dimensions (or matrix/label/weight counts) disagree.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Linkage method selector did not name a supported method.
    UnknownMethod {
        /// The offending selector (name or index, as supplied).
        requested: String,
    },

    /// A subset filter was asked to retain no leaves.
    EmptySelection,

    /// A leaf position fell outside `[0, n_leaves)`.
    InvalidPosition {
        /// The offending position.
        position: usize,
        /// Number of leaves in the tree being filtered.
        n_leaves: usize,
    },

    /// A distance was NaN or infinite, either in an input matrix or as
    /// the result of a numerically ill-conditioned cluster update.
    NonFiniteDistance {
        /// Row (or first cluster id) of the offending entry.
        row: usize,
        /// Column (or second cluster id) of the offending entry.
        col: usize,
    },

    /// A linkage matrix violated referential integrity.
    MalformedLinkage {
        /// Zero-based merge step at which the violation was found.
        step: usize,
        /// Description of the violation.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::UnknownMethod { requested } => {
                write!(f, "unknown linkage method: {requested}")
            }
            Error::EmptySelection => write!(f, "selection retains no leaves"),
            Error::InvalidPosition { position, n_leaves } => {
                write!(
                    f,
                    "leaf position {position} out of range for {n_leaves} leaves"
                )
            }
            Error::NonFiniteDistance { row, col } => {
                write!(f, "non-finite distance at ({row}, {col})")
            }
            Error::MalformedLinkage { step, message } => {
                write!(f, "malformed linkage at step {step}: {message}")
            }
        }
    }
}

impl std::error::Error for Error {}
