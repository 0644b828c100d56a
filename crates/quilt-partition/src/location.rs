//! Block locations: the mapping from block-local wires to original wires.

use quilt_ir::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The ordered set of original wires a block occupies.
///
/// Local wire `i` of the block corresponds to `location[i]` in the
/// original circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location(Vec<QubitId>);

impl Location {
    /// Create a location from an ordered wire list.
    pub fn new(wires: impl IntoIterator<Item = QubitId>) -> Self {
        Self(wires.into_iter().collect())
    }

    /// Number of wires in the block.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the location is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The original wires, in local-index order.
    pub fn as_slice(&self) -> &[QubitId] {
        &self.0
    }

    /// The local index of an original wire, if the block occupies it.
    pub fn local_index(&self, wire: QubitId) -> Option<usize> {
        self.0.iter().position(|&w| w == wire)
    }

    /// Whether the block occupies an original wire.
    pub fn contains(&self, wire: QubitId) -> bool {
        self.0.contains(&wire)
    }

    /// Iterate over the original wires.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{w}")?;
        }
        write!(f, ")")
    }
}

impl<'a> IntoIterator for &'a Location {
    type Item = QubitId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, QubitId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_index() {
        let loc = Location::new([QubitId(4), QubitId(1), QubitId(7)]);
        assert_eq!(loc.local_index(QubitId(1)), Some(1));
        assert_eq!(loc.local_index(QubitId(7)), Some(2));
        assert_eq!(loc.local_index(QubitId(0)), None);
        assert!(loc.contains(QubitId(4)));
    }

    #[test]
    fn test_display() {
        let loc = Location::new([QubitId(0), QubitId(2)]);
        assert_eq!(format!("{loc}"), "(q0, q2)");
    }
}
