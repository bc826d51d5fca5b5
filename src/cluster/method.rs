//! Linkage method selection.

use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};

/// Rule for updating inter-cluster distance after a merge.
///
/// The key choice in agglomerative clustering: how do we define
/// "distance between clusters"?
///
/// | Linkage | Formula | Effect |
/// |---------|---------|--------|
/// | Single | min(d(a,b)) for a∈A, b∈B | Chaining; elongated clusters |
/// | Complete | max(d(a,b)) | Compact, spherical clusters |
/// | Average | size-weighted mean (UPGMA) | Balanced compromise |
/// | Ward | Δ variance | Minimizes within-cluster variance |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkageMethod {
    /// Single linkage: minimum distance between clusters.
    Single,
    /// Complete linkage: maximum distance between clusters.
    Complete,
    /// Average linkage (UPGMA): size-weighted mean distance.
    Average,
    /// Ward's method: minimize within-cluster variance.
    Ward,
}

impl LinkageMethod {
    /// Resolve a numeric method selector.
    ///
    /// The index order matches the selector the visualization UI sends:
    /// `0 = average, 1 = complete, 2 = single, 3 = ward`. An index out of
    /// range is an [`Error::UnknownMethod`], never a silent default.
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(LinkageMethod::Average),
            1 => Ok(LinkageMethod::Complete),
            2 => Ok(LinkageMethod::Single),
            3 => Ok(LinkageMethod::Ward),
            _ => Err(Error::UnknownMethod {
                requested: index.to_string(),
            }),
        }
    }

    /// Lowercase method name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            LinkageMethod::Single => "single",
            LinkageMethod::Complete => "complete",
            LinkageMethod::Average => "average",
            LinkageMethod::Ward => "ward",
        }
    }
}

impl FromStr for LinkageMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(LinkageMethod::Single),
            "complete" => Ok(LinkageMethod::Complete),
            "average" => Ok(LinkageMethod::Average),
            "ward" => Ok(LinkageMethod::Ward),
            other => Err(Error::UnknownMethod {
                requested: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for LinkageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
