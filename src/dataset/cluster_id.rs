use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Cluster label as written by the clustering tools
///
/// Clustering tools write an integer cluster id per point and `-1` for points which could not
/// be assigned to any cluster. Hand-edited files sometimes carry names instead, so any cell
/// which does not parse as an integer is kept verbatim.
///
/// Integer ids order numerically and sort before named clusters, which order lexicographically.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClusterId {
    Id(i64),
    Name(String),
}

impl ClusterId {
    /// Label of points which do not belong to any cluster
    pub const NOISE: ClusterId = ClusterId::Id(-1);

    pub fn is_noise(&self) -> bool {
        *self == Self::NOISE
    }
}

impl FromStr for ClusterId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(id) => ClusterId::Id(id),
            Err(_) => ClusterId::Name(s.to_string()),
        })
    }
}

impl From<i64> for ClusterId {
    fn from(id: i64) -> Self {
        ClusterId::Id(id)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterId::Id(id) => write!(f, "{}", id),
            ClusterId::Name(name) => f.write_str(name),
        }
    }
}
