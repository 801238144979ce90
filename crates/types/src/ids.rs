//! Newtype wrapper for node references.
//!
//! A `NodeId` is the depth-first pre-order position of a node within a frozen
//! document snapshot. Warnings and fatal errors carry it so the caller can
//! point back at the offending node without the pipeline holding references
//! into the caller's tree.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the pre-order index this id refers to.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_index() {
        assert!(NodeId::new(1) < NodeId::new(2));
        assert_eq!(NodeId::new(7).index(), 7);
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(NodeId::new(42).to_string(), "#42");
    }
}
