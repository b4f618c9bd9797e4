//! Links and their unordered keys.

use std::fmt;

use tn_core::NodeId;

/// Unordered endpoint pair, stored as `(lo, hi)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkKey {
    pub lo: NodeId,
    pub hi: NodeId,
}

impl LinkKey {
    #[inline]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b { Self { lo: a, hi: b } } else { Self { lo: b, hi: a } }
    }

    #[inline]
    pub fn contains(self, node: NodeId) -> bool {
        self.lo == node || self.hi == node
    }

    #[inline]
    pub fn shares_endpoint(self, other: LinkKey) -> bool {
        self.contains(other.lo) || self.contains(other.hi)
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo.0, self.hi.0)
    }
}

/// A built link.  `a`/`b` keep the order the link was created with, which is
/// the order actions refer to it by.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
    /// `0` for an instant link, otherwise the physical throughput level.
    pub capacity: u32,
}

impl Link {
    #[inline]
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.a, self.b)
    }

    #[inline]
    pub fn is_instant(&self) -> bool {
        self.capacity == 0
    }
}
