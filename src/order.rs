//! Total order over forest nodes by depth-first pre-order position.
//!
//! Comparing two nodes does not walk the whole forest. Each node has a
//! [`PathKey`], the sequence of sibling indices leading from its root down to
//! the node itself, and keys compare lexicographically with a strict prefix
//! ordering first. This is exactly the order in which a depth-first walk
//! visits nodes: an ancestor comes before all of its descendants, and
//! otherwise the subtree of an earlier sibling comes first.
//!
//! The comparison only needs parent links and sibling positions, so it works
//! on any type implementing [`ForestView`], including adapters over scene
//! graphs that live elsewhere.

use std::cmp::Ordering;
use std::fmt::Debug;

use thiserror::Error;

/// Read access to the parent and sibling structure of a forest.
///
/// Implementations hand out copyable node handles and answer two questions
/// about them: who is the parent, and at which position does the node sit in
/// its sibling list. Nothing else about the forest is needed to rank nodes.
pub trait ForestView {
    /// Handle identifying a node of the forest.
    type Node: Copy + Debug;

    /// Returns the parent of `node`, or `None` when it is a root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns the position of `node` within its sibling list.
    ///
    /// Roots are positioned within the list of roots. Nodes sharing a parent
    /// must report pairwise distinct positions.
    fn sibling_index(&self, node: Self::Node) -> usize;
}

/// Position of a node in its forest, as the sibling indices along the path
/// from the root down to the node.
///
/// Keys order lexicographically, and a key that is a strict prefix of another
/// orders first. Two keys are equal only when they describe the same path, so
/// within one forest equality means the same node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathKey {
    indices: Vec<usize>,
}

impl PathKey {
    /// Creates a key directly from root-first sibling indices.
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Returns the sibling indices, starting at the root.
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the number of ancestor hops from the root, `0` for a root.
    pub fn depth(&self) -> usize {
        self.indices.len().saturating_sub(1)
    }

    /// Returns whether the node at this key is a strict ancestor of the node
    /// at `other`.
    pub fn is_ancestor_of(&self, other: &PathKey) -> bool {
        self.indices.len() < other.indices.len() && other.indices.starts_with(&self.indices)
    }
}

/// Ranks forest nodes by depth-first pre-order position.
///
/// The ancestor walk that computes a [`PathKey`] is bounded; a walk that does
/// not reach a root within the bound reports a [`CycleError`] instead of
/// spinning on a corrupted parent chain. The default bound is far beyond any
/// real scene depth and can be adjusted with [`PreOrder::with_depth_limit`].
///
/// # Example
///
/// ```
/// # use scenetree::{Forest, PreOrder};
/// let mut forest = Forest::new();
/// let a = forest.add_node("a");
/// let b = forest.add_node("b");
/// let a0 = forest.add_node("a0");
/// forest.push_child(a0, a).unwrap();
///
/// let order = PreOrder::new();
/// let mut selection = vec![b, a0, a];
/// order.sort(&forest, &mut selection).unwrap();
/// assert_eq!(selection, vec![a, a0, b]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreOrder {
    depth_limit: usize,
}

impl PreOrder {
    /// Maximum number of nodes on a root path accepted by [`PreOrder::new`].
    pub const DEFAULT_DEPTH_LIMIT: usize = 1 << 16;

    pub fn new() -> Self {
        Self {
            depth_limit: Self::DEFAULT_DEPTH_LIMIT,
        }
    }

    /// Creates an order whose ancestor walks give up after `depth_limit`
    /// nodes. A limit of zero rejects every node.
    pub fn with_depth_limit(depth_limit: usize) -> Self {
        Self { depth_limit }
    }

    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Computes the path key of `node`.
    ///
    /// # Errors
    ///
    /// Fails with [`CycleError`] when no root is reached within the depth
    /// limit.
    pub fn path_key<V>(&self, view: &V, node: V::Node) -> Result<PathKey, CycleError<V::Node>>
    where
        V: ForestView,
    {
        let mut indices = Vec::new();
        let mut current = node;

        loop {
            if indices.len() >= self.depth_limit {
                return Err(CycleError {
                    node,
                    limit: self.depth_limit,
                });
            }

            indices.push(view.sibling_index(current));

            match view.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }

        indices.reverse();
        Ok(PathKey { indices })
    }

    /// Compares the pre-order positions of `a` and `b`.
    ///
    /// Returns [`Ordering::Less`] when `a` is visited before `b` by a
    /// depth-first walk. Within one forest the result is [`Ordering::Equal`]
    /// only when `a` and `b` are the same node.
    ///
    /// # Errors
    ///
    /// Fails with [`CycleError`] when either ancestor walk exceeds the depth
    /// limit.
    pub fn compare<V>(&self, view: &V, a: V::Node, b: V::Node) -> Result<Ordering, CycleError<V::Node>>
    where
        V: ForestView,
    {
        Ok(self.path_key(view, a)?.cmp(&self.path_key(view, b)?))
    }

    /// Sorts `nodes` into depth-first pre-order.
    ///
    /// Each node's key is computed once up front, so sorting a selection
    /// costs one ancestor walk per node rather than one per comparison. The
    /// sort is stable.
    ///
    /// # Errors
    ///
    /// Fails with [`CycleError`] on the first node whose ancestor walk
    /// exceeds the depth limit; `nodes` is left unchanged in that case.
    pub fn sort<V>(&self, view: &V, nodes: &mut [V::Node]) -> Result<(), CycleError<V::Node>>
    where
        V: ForestView,
    {
        let keyed = self.keyed(view, nodes)?;
        commit(nodes, keyed, |a, b| a.cmp(b));
        Ok(())
    }

    /// Sorts `nodes` into reverse pre-order, descendants and later siblings
    /// first.
    ///
    /// Equivalent to [`PreOrder::sort`] followed by reversing the slice.
    ///
    /// # Errors
    ///
    /// Fails with [`CycleError`] on the first node whose ancestor walk
    /// exceeds the depth limit; `nodes` is left unchanged in that case.
    pub fn sort_reverse<V>(&self, view: &V, nodes: &mut [V::Node]) -> Result<(), CycleError<V::Node>>
    where
        V: ForestView,
    {
        let keyed = self.keyed(view, nodes)?;
        commit(nodes, keyed, |a, b| b.cmp(a));
        Ok(())
    }

    fn keyed<V>(&self, view: &V, nodes: &[V::Node]) -> Result<Vec<(PathKey, V::Node)>, CycleError<V::Node>>
    where
        V: ForestView,
    {
        let mut keyed = Vec::with_capacity(nodes.len());

        for &node in nodes {
            keyed.push((self.path_key(view, node)?, node));
        }

        Ok(keyed)
    }
}

fn commit<N, F>(nodes: &mut [N], mut keyed: Vec<(PathKey, N)>, compare: F)
where
    N: Copy,
    F: Fn(&PathKey, &PathKey) -> Ordering,
{
    keyed.sort_by(|a, b| compare(&a.0, &b.0));

    for (slot, (_, node)) in nodes.iter_mut().zip(keyed) {
        *slot = node;
    }
}

impl Default for PreOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Error returned when a node's ancestor chain never reaches a root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no root within {limit} steps of {node:?}; the parent chain is cyclic or corrupted")]
pub struct CycleError<N: Debug> {
    /// The node whose ancestor chain was walked.
    pub node: N,
    /// The exhausted depth limit.
    pub limit: usize,
}
