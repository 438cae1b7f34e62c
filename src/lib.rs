//! Data structures and ordering utilities for scene-hierarchy forests.
//!
//! The crate is built around [`Forest`], an arena-backed forest of weighted
//! nodes in which the children of every node, and the roots themselves, form
//! ordered sibling lists. On top of it, [`order`] ranks nodes by their
//! position in a depth-first walk without traversing the forest, [`select`]
//! expands and reorders multi-selections, [`rename`] expands batch rename
//! patterns, and [`history`] keeps a bounded back/forward log of selections.
//!
//! Ranking does not require [`Forest`]: anything that can report a node's
//! parent and its position among its siblings can implement [`ForestView`]
//! and reuse the same comparisons, which allows thin adapters over scene
//! graphs owned by a host application.
//!
//! # Example
//!
//! ```
//! use scenetree::{Forest, PreOrder};
//!
//! let mut forest = Forest::new();
//! let level = forest.add_node("Level");
//! let props = forest.add_node("Props");
//! let lamp = forest.add_node("Lamp");
//! forest.push_child(props, level).unwrap();
//! forest.push_child(lamp, props).unwrap();
//!
//! // A multi-selection in arbitrary order, sorted into hierarchy order.
//! let mut selection = vec![lamp, level, props];
//! PreOrder::new().sort(&forest, &mut selection).unwrap();
//! assert_eq!(selection, vec![level, props, lamp]);
//! ```

pub mod forest;
pub mod history;
pub mod memory;
pub mod name;
pub mod order;
pub mod rename;
pub mod select;

pub use crate::forest::{AttachError, Forest};
pub use crate::history::SelectionHistory;
pub use crate::order::{CycleError, ForestView, PathKey, PreOrder};

use crate::memory::EntityIndex;

/// Index of a node within a [`Forest`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(u32);

entity_impl!(NodeIndex, u32, false);

impl NodeIndex {
    /// Creates a node index from `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` does not fit the backing integer type.
    pub fn new(index: usize) -> Self {
        <Self as EntityIndex>::new(index)
    }

    /// Returns the index as a `usize`.
    pub fn index(self) -> usize {
        <Self as EntityIndex>::index(self)
    }
}
