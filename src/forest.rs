//! Arena-backed forest of weighted nodes with ordered siblings and ordered
//! roots.
//!
//! Children of a node form a doubly-linked list, and the roots form one more
//! list of the same shape, so every contained node sits at a definite
//! position among its siblings. This is the structure scene hierarchies have:
//! reordering, reparenting and removal all preserve the relative order of
//! everything that was not moved.

use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};

use thiserror::Error;

use crate::memory::{slab, Slab};
use crate::order::{ForestView, PathKey};
use crate::NodeIndex;

/// A forest of nodes carrying weights of type `N`.
///
/// New nodes enter as roots. Attaching a node under a parent requires it to
/// currently be a root; [`Forest::detach`] turns any node back into one. All
/// sibling lists, the roots included, keep insertion order until explicitly
/// reordered.
///
/// Methods taking a [`NodeIndex`] panic when the node is not in the forest,
/// unless documented otherwise.
///
/// # Example
///
/// ```
/// # use scenetree::Forest;
/// let mut forest = Forest::new();
/// let house = forest.add_node("house");
/// let door = forest.add_node("door");
/// let window = forest.add_node("window");
/// forest.push_child(door, house)?;
/// forest.push_child(window, house)?;
///
/// assert_eq!(forest.children(house).collect::<Vec<_>>(), vec![door, window]);
/// assert_eq!(forest.sibling_index(window), 1);
/// assert!(forest.is_root(house));
/// # Ok::<(), scenetree::AttachError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Forest<N> {
    nodes: Slab<NodeIndex, NodeData<N>>,
    roots: [Option<NodeIndex>; 2],
    root_count: usize,
}

#[derive(Debug, Clone)]
struct NodeData<N> {
    weight: N,
    parent: Option<NodeIndex>,
    children: [Option<NodeIndex>; 2],
    children_count: usize,
    siblings: [Option<NodeIndex>; 2],
}

impl<N> Forest<N> {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            roots: [None; 2],
            root_count: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            roots: [None; 2],
            root_count: 0,
        }
    }

    /// Returns the number of nodes in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.nodes.contains(node)
    }

    /// Returns an exclusive upper bound on the indices of contained nodes.
    pub fn index_bound(&self) -> usize {
        self.nodes.upper_bound().index()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots = [None; 2];
        self.root_count = 0;
    }

    /// Adds a new node carrying `weight`. The node becomes the last root.
    pub fn add_node(&mut self, weight: N) -> NodeIndex {
        let node = self.nodes.insert(NodeData {
            weight,
            parent: None,
            children: [None; 2],
            children_count: 0,
            siblings: [None; 2],
        });

        self.link_last(node, None);
        node
    }

    /// Removes a node. Its children become roots, in their sibling order.
    ///
    /// Returns the node's weight, or `None` when the node is not in the
    /// forest.
    pub fn remove(&mut self, node: NodeIndex) -> Option<N> {
        if !self.nodes.contains(node) {
            return None;
        }

        self.detach_children(node);
        self.unlink(node);
        self.nodes.remove(node).map(|data| data.weight)
    }

    /// Removes a node together with all of its descendants.
    ///
    /// Returns the number of nodes removed; `0` when the node is not in the
    /// forest.
    pub fn remove_subtree(&mut self, node: NodeIndex) -> usize {
        if !self.nodes.contains(node) {
            return 0;
        }

        let subtree: Vec<_> = self.descendants(node).collect();
        self.unlink(node);

        for &removed in &subtree {
            self.nodes.remove(removed);
        }

        subtree.len()
    }

    /// Attaches a root node as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails when the node is already attached to a parent, or when `parent`
    /// is the node itself or one of its descendants.
    pub fn push_child(&mut self, node: NodeIndex, parent: NodeIndex) -> Result<(), AttachError> {
        self.check_attach(node, parent)?;
        self.unlink(node);
        self.link_last(node, Some(parent));
        Ok(())
    }

    /// Attaches a root node as the first child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails when the node is already attached to a parent, or when `parent`
    /// is the node itself or one of its descendants.
    pub fn push_front_child(&mut self, node: NodeIndex, parent: NodeIndex) -> Result<(), AttachError> {
        self.check_attach(node, parent)?;
        self.unlink(node);
        self.link_first(node, Some(parent));
        Ok(())
    }

    /// Moves a root node directly before `before` in the latter's sibling
    /// list. When `before` is a root, the node stays a root at the new
    /// position.
    ///
    /// # Errors
    ///
    /// Fails when the node is already attached to a parent, when it is
    /// inserted relative to itself, or when the insertion would place it
    /// inside its own subtree.
    pub fn insert_before(&mut self, node: NodeIndex, before: NodeIndex) -> Result<(), AttachError> {
        self.check_insert(node, before)?;
        self.unlink(node);
        self.link_before(node, before);
        Ok(())
    }

    /// Moves a root node directly after `after` in the latter's sibling
    /// list. When `after` is a root, the node stays a root at the new
    /// position.
    ///
    /// # Errors
    ///
    /// Fails when the node is already attached to a parent, when it is
    /// inserted relative to itself, or when the insertion would place it
    /// inside its own subtree.
    pub fn insert_after(&mut self, node: NodeIndex, after: NodeIndex) -> Result<(), AttachError> {
        self.check_insert(node, after)?;
        self.unlink(node);
        self.link_after(node, after);
        Ok(())
    }

    /// Detaches a node from its parent; the node becomes the last root.
    ///
    /// Returns the former parent, or `None` when the node already was a root
    /// (the root order is left untouched in that case).
    pub fn detach(&mut self, node: NodeIndex) -> Option<NodeIndex> {
        if self.nodes[node].parent.is_none() {
            return None;
        }

        let parent = self.unlink(node);
        self.link_last(node, None);
        parent
    }

    /// Detaches all children of a node; they become the last roots, keeping
    /// their sibling order.
    pub fn detach_children(&mut self, node: NodeIndex) {
        while let Some(child) = self.nodes[node].children[0] {
            self.unlink(child);
            self.link_last(child, None);
        }
    }

    /// Moves a node to position `index` within its current sibling list,
    /// shifting the nodes in between. Indices past the end of the list clamp
    /// to the last position.
    pub fn set_sibling_index(&mut self, node: NodeIndex, index: usize) {
        let parent = self.nodes[node].parent;
        let len = match parent {
            Some(parent) => self.nodes[parent].children_count,
            None => self.root_count,
        };

        let index = index.min(len - 1);
        if index == self.sibling_index(node) {
            return;
        }

        self.unlink(node);

        // The list now holds `len - 1` entries; position `index` names the
        // entry the node is inserted before.
        let mut anchor = self.ends(parent)[0];
        for _ in 0..index {
            anchor = anchor.and_then(|anchor| self.nodes[anchor].siblings[1]);
        }

        match anchor {
            Some(anchor) => self.link_before(node, anchor),
            None => self.link_last(node, parent),
        }
    }

    /// Moves a node up one level: it leaves its parent and is inserted into
    /// the parent's sibling list directly after it. A child of a root becomes
    /// a root.
    ///
    /// Returns whether the node moved; roots have no level to leave.
    pub fn promote(&mut self, node: NodeIndex) -> bool {
        let Some(parent) = self.nodes[node].parent else {
            return false;
        };

        self.unlink(node);
        self.link_after(node, parent);
        true
    }

    /// Returns the parent of a node, or `None` when it is a root.
    #[inline]
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node].parent
    }

    #[inline]
    pub fn is_root(&self, node: NodeIndex) -> bool {
        self.nodes[node].parent.is_none()
    }

    #[inline]
    pub fn first_child(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node].children[0]
    }

    #[inline]
    pub fn last_child(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node].children[1]
    }

    #[inline]
    pub fn next_sibling(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node].siblings[1]
    }

    #[inline]
    pub fn prev_sibling(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node].siblings[0]
    }

    #[inline]
    pub fn first_root(&self) -> Option<NodeIndex> {
        self.roots[0]
    }

    #[inline]
    pub fn last_root(&self) -> Option<NodeIndex> {
        self.roots[1]
    }

    #[inline]
    pub fn child_count(&self, node: NodeIndex) -> usize {
        self.nodes[node].children_count
    }

    #[inline]
    pub fn has_children(&self, node: NodeIndex) -> bool {
        self.nodes[node].children_count > 0
    }

    #[inline]
    pub fn root_count(&self) -> usize {
        self.root_count
    }

    /// Returns the position of a node within its sibling list, counting prev
    /// links. Roots are positioned within the root list.
    pub fn sibling_index(&self, node: NodeIndex) -> usize {
        let mut index = 0;
        let mut current = node;

        while let Some(prev) = self.nodes[current].siblings[0] {
            index += 1;
            current = prev;
        }

        index
    }

    /// Returns the number of ancestors of a node, `0` for a root.
    pub fn depth(&self, node: NodeIndex) -> usize {
        let mut depth = 0;
        let mut current = node;

        while let Some(parent) = self.nodes[current].parent {
            depth += 1;
            current = parent;
        }

        depth
    }

    /// Returns the node's [`PathKey`], the root-first sequence of sibling
    /// indices that ranks it in depth-first pre-order.
    ///
    /// Attach operations reject cycles, so unlike
    /// [`PreOrder::path_key`](crate::PreOrder::path_key) this never fails.
    pub fn path_key(&self, node: NodeIndex) -> PathKey {
        let mut indices = Vec::new();
        let mut current = node;

        loop {
            indices.push(self.sibling_index(current));

            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        indices.reverse();
        PathKey::from_indices(indices)
    }

    /// Returns a reference to the weight of a node, or `None` when the node
    /// is not in the forest.
    pub fn get(&self, node: NodeIndex) -> Option<&N> {
        self.nodes.get(node).map(|data| &data.weight)
    }

    pub fn get_mut(&mut self, node: NodeIndex) -> Option<&mut N> {
        self.nodes.get_mut(node).map(|data| &mut data.weight)
    }

    /// Iterates over the children of a node, in sibling order.
    pub fn children(&self, node: NodeIndex) -> Siblings<'_, N> {
        let data = &self.nodes[node];

        Siblings {
            forest: self,
            next: data.children[0],
            prev: data.children[1],
            len: data.children_count,
        }
    }

    /// Iterates over the roots, in root order.
    pub fn roots(&self) -> Siblings<'_, N> {
        Siblings {
            forest: self,
            next: self.roots[0],
            prev: self.roots[1],
            len: self.root_count,
        }
    }

    /// Iterates over a node and all of its descendants in depth-first
    /// pre-order, the node itself first.
    pub fn descendants(&self, node: NodeIndex) -> Descendants<'_, N> {
        Descendants {
            forest: self,
            root: node,
            next: Some(node),
        }
    }

    /// Iterates over all nodes and their weights, in index order.
    pub fn iter(&self) -> Nodes<'_, N> {
        Nodes {
            inner: self.nodes.iter(),
        }
    }

    fn check_attach(&self, node: NodeIndex, parent: NodeIndex) -> Result<(), AttachError> {
        if self.nodes[node].parent.is_some() {
            return Err(AttachError::AlreadyAttached { node });
        }

        if !self.cycle_check(node, parent) {
            return Err(AttachError::Cycle { node, parent });
        }

        Ok(())
    }

    fn check_insert(&self, node: NodeIndex, anchor: NodeIndex) -> Result<(), AttachError> {
        if node == anchor {
            return Err(AttachError::SelfAttach { node });
        }

        if self.nodes[node].parent.is_some() {
            return Err(AttachError::AlreadyAttached { node });
        }

        if let Some(parent) = self.nodes[anchor].parent {
            if !self.cycle_check(node, parent) {
                return Err(AttachError::Cycle { node, parent });
            }
        }

        Ok(())
    }

    /// Checks that making `parent` the parent of `node` keeps the forest
    /// acyclic, by walking up from `parent`. Also rejects `parent == node`.
    fn cycle_check(&self, node: NodeIndex, parent: NodeIndex) -> bool {
        let mut current = parent;

        loop {
            if current == node {
                return false;
            }

            match self.nodes[current].parent {
                Some(next) => current = next,
                None => return true,
            }
        }
    }

    /// Takes `node` out of its sibling list. Until relinked the node is in no
    /// list at all, which no public method exposes.
    fn unlink(&mut self, node: NodeIndex) -> Option<NodeIndex> {
        let data = &mut self.nodes[node];
        let parent = data.parent.take();
        let [prev, next] = std::mem::take(&mut data.siblings);

        match prev {
            Some(prev) => self.nodes[prev].siblings[1] = next,
            None => self.set_first(parent, next),
        }

        match next {
            Some(next) => self.nodes[next].siblings[0] = prev,
            None => self.set_last(parent, prev),
        }

        match parent {
            Some(parent) => self.nodes[parent].children_count -= 1,
            None => self.root_count -= 1,
        }

        parent
    }

    fn link_last(&mut self, node: NodeIndex, parent: Option<NodeIndex>) {
        let prev = self.ends(parent)[1];

        {
            let data = &mut self.nodes[node];
            data.parent = parent;
            data.siblings = [prev, None];
        }

        match prev {
            Some(prev) => self.nodes[prev].siblings[1] = Some(node),
            None => self.set_first(parent, Some(node)),
        }

        self.set_last(parent, Some(node));
        self.bump_count(parent);
    }

    fn link_first(&mut self, node: NodeIndex, parent: Option<NodeIndex>) {
        let next = self.ends(parent)[0];

        {
            let data = &mut self.nodes[node];
            data.parent = parent;
            data.siblings = [None, next];
        }

        match next {
            Some(next) => self.nodes[next].siblings[0] = Some(node),
            None => self.set_last(parent, Some(node)),
        }

        self.set_first(parent, Some(node));
        self.bump_count(parent);
    }

    fn link_before(&mut self, node: NodeIndex, anchor: NodeIndex) {
        let parent = self.nodes[anchor].parent;
        let prev = self.nodes[anchor].siblings[0];

        {
            let data = &mut self.nodes[node];
            data.parent = parent;
            data.siblings = [prev, Some(anchor)];
        }

        self.nodes[anchor].siblings[0] = Some(node);

        match prev {
            Some(prev) => self.nodes[prev].siblings[1] = Some(node),
            None => self.set_first(parent, Some(node)),
        }

        self.bump_count(parent);
    }

    fn link_after(&mut self, node: NodeIndex, anchor: NodeIndex) {
        let parent = self.nodes[anchor].parent;
        let next = self.nodes[anchor].siblings[1];

        {
            let data = &mut self.nodes[node];
            data.parent = parent;
            data.siblings = [Some(anchor), next];
        }

        self.nodes[anchor].siblings[1] = Some(node);

        match next {
            Some(next) => self.nodes[next].siblings[0] = Some(node),
            None => self.set_last(parent, Some(node)),
        }

        self.bump_count(parent);
    }

    /// First and last entry of the sibling list owned by `parent`; `None`
    /// names the root list.
    fn ends(&self, parent: Option<NodeIndex>) -> [Option<NodeIndex>; 2] {
        match parent {
            Some(parent) => self.nodes[parent].children,
            None => self.roots,
        }
    }

    fn set_first(&mut self, parent: Option<NodeIndex>, first: Option<NodeIndex>) {
        match parent {
            Some(parent) => self.nodes[parent].children[0] = first,
            None => self.roots[0] = first,
        }
    }

    fn set_last(&mut self, parent: Option<NodeIndex>, last: Option<NodeIndex>) {
        match parent {
            Some(parent) => self.nodes[parent].children[1] = last,
            None => self.roots[1] = last,
        }
    }

    fn bump_count(&mut self, parent: Option<NodeIndex>) {
        match parent {
            Some(parent) => self.nodes[parent].children_count += 1,
            None => self.root_count += 1,
        }
    }
}

impl<N> Default for Forest<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<NodeIndex> for Forest<N> {
    type Output = N;

    fn index(&self, node: NodeIndex) -> &Self::Output {
        &self.nodes[node].weight
    }
}

impl<N> IndexMut<NodeIndex> for Forest<N> {
    fn index_mut(&mut self, node: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[node].weight
    }
}

impl<N> ForestView for Forest<N> {
    type Node = NodeIndex;

    fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        Forest::parent(self, node)
    }

    fn sibling_index(&self, node: NodeIndex) -> usize {
        Forest::sibling_index(self, node)
    }
}

/// Error returned by the attach operations of [`Forest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    /// The node is attached to a parent and must be detached first.
    #[error("the node {node:?} is already attached to a parent")]
    AlreadyAttached { node: NodeIndex },
    /// Tried to insert a node relative to itself.
    #[error("can not insert the node {node:?} relative to itself")]
    SelfAttach { node: NodeIndex },
    /// The new parent is the node itself or one of its descendants.
    #[error("attaching {node:?} under {parent:?} would create a cycle")]
    Cycle {
        node: NodeIndex,
        parent: NodeIndex,
    },
}

/// Iterator over a sibling list, created by [`Forest::children`] and
/// [`Forest::roots`].
#[derive(Clone)]
pub struct Siblings<'a, N> {
    forest: &'a Forest<N>,
    next: Option<NodeIndex>,
    prev: Option<NodeIndex>,
    len: usize,
}

impl<'a, N> Iterator for Siblings<'a, N> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        let current = self.next?;
        self.next = self.forest.nodes[current].siblings[1];
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, N> DoubleEndedIterator for Siblings<'a, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.len = self.len.checked_sub(1)?;
        let current = self.prev?;
        self.prev = self.forest.nodes[current].siblings[0];
        Some(current)
    }
}

impl<'a, N> ExactSizeIterator for Siblings<'a, N> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, N> FusedIterator for Siblings<'a, N> {}

/// Iterator over a subtree in depth-first pre-order, created by
/// [`Forest::descendants`].
#[derive(Clone)]
pub struct Descendants<'a, N> {
    forest: &'a Forest<N>,
    root: NodeIndex,
    next: Option<NodeIndex>,
}

impl<'a, N> Descendants<'a, N> {
    /// Pre-order successor of `current`, staying within the subtree of
    /// `self.root`: first child if any, otherwise the next sibling of the
    /// nearest ancestor that still has one.
    fn successor(&self, current: NodeIndex) -> Option<NodeIndex> {
        if let Some(child) = self.forest.nodes[current].children[0] {
            return Some(child);
        }

        let mut at = current;
        while at != self.root {
            if let Some(sibling) = self.forest.nodes[at].siblings[1] {
                return Some(sibling);
            }

            at = self.forest.nodes[at].parent?;
        }

        None
    }
}

impl<'a, N> Iterator for Descendants<'a, N> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(_) => (1, None),
            None => (0, Some(0)),
        }
    }
}

impl<'a, N> FusedIterator for Descendants<'a, N> {}

/// Iterator over all nodes of a [`Forest`] and their weights.
pub struct Nodes<'a, N> {
    inner: slab::Iter<'a, NodeIndex, NodeData<N>>,
}

impl<'a, N> Iterator for Nodes<'a, N> {
    type Item = (NodeIndex, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, data) = self.inner.next()?;
        Some((node, &data.weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, N> ExactSizeIterator for Nodes<'a, N> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, N> FusedIterator for Nodes<'a, N> {}

#[cfg(test)]
mod test {
    use super::*;

    /// Builds the forest used by most tests:
    ///
    /// ```text
    /// a
    /// |-- b
    /// |   |-- d
    /// |   `-- e
    /// `-- c
    /// f
    /// ```
    fn sample() -> (Forest<&'static str>, [NodeIndex; 6]) {
        let mut forest = Forest::new();

        let a = forest.add_node("a");
        let b = forest.add_node("b");
        let c = forest.add_node("c");
        let d = forest.add_node("d");
        let e = forest.add_node("e");
        let f = forest.add_node("f");

        forest.push_child(b, a).unwrap();
        forest.push_child(c, a).unwrap();
        forest.push_child(d, b).unwrap();
        forest.push_child(e, b).unwrap();

        (forest, [a, b, c, d, e, f])
    }

    #[test]
    pub fn new_nodes_become_last_roots() {
        let mut forest = Forest::new();

        let a = forest.add_node("a");
        let b = forest.add_node("b");
        let c = forest.add_node("c");

        assert_eq!(forest.len(), 3);
        assert_eq!(forest.root_count(), 3);
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(forest.first_root(), Some(a));
        assert_eq!(forest.last_root(), Some(c));
        assert_eq!(forest.sibling_index(b), 1);
        assert!(forest.is_root(b));
        assert_eq!(forest[c], "c");
    }

    #[test]
    pub fn push_child_builds_ordered_lists() {
        let (forest, [a, b, c, d, e, _f]) = sample();

        assert_eq!(forest.parent(b), Some(a));
        assert_eq!(forest.parent(d), Some(b));
        assert_eq!(forest.child_count(a), 2);
        assert_eq!(forest.children(a).collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(forest.children(b).collect::<Vec<_>>(), vec![d, e]);
        assert_eq!(forest.first_child(a), Some(b));
        assert_eq!(forest.last_child(a), Some(c));
        assert_eq!(forest.next_sibling(b), Some(c));
        assert_eq!(forest.prev_sibling(c), Some(b));
        assert_eq!(forest.root_count(), 2);
        assert!(!forest.has_children(c));
    }

    #[test]
    pub fn children_iterate_both_ways() {
        let (forest, [a, b, c, ..]) = sample();

        let mut children = forest.children(a);
        assert_eq!(children.len(), 2);
        assert_eq!(children.next_back(), Some(c));
        assert_eq!(children.next(), Some(b));
        assert_eq!(children.next(), None);
        assert_eq!(children.next_back(), None);

        assert_eq!(
            forest.children(a).rev().collect::<Vec<_>>(),
            vec![c, b]
        );
    }

    #[test]
    pub fn push_front_child_prepends() {
        let mut forest = Forest::new();

        let root = forest.add_node("root");
        let x = forest.add_node("x");
        let y = forest.add_node("y");

        forest.push_child(x, root).unwrap();
        forest.push_front_child(y, root).unwrap();

        assert_eq!(forest.children(root).collect::<Vec<_>>(), vec![y, x]);
        assert_eq!(forest.first_child(root), Some(y));
    }

    #[test]
    pub fn insert_positions_relative_to_children() {
        let mut forest = Forest::new();

        let root = forest.add_node(0);
        let a = forest.add_node(1);
        let b = forest.add_node(2);
        let c = forest.add_node(3);

        forest.push_child(a, root).unwrap();
        forest.push_child(c, root).unwrap();
        forest.insert_before(b, c).unwrap();

        assert_eq!(forest.children(root).collect::<Vec<_>>(), vec![a, b, c]);

        let d = forest.add_node(4);
        forest.insert_after(d, a).unwrap();
        assert_eq!(forest.children(root).collect::<Vec<_>>(), vec![a, d, b, c]);
        assert_eq!(forest.sibling_index(d), 1);
    }

    #[test]
    pub fn insert_positions_relative_to_roots() {
        let mut forest = Forest::new();

        let a = forest.add_node("a");
        let b = forest.add_node("b");
        let c = forest.add_node("c");

        forest.insert_before(c, a).unwrap();
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![c, a, b]);
        assert!(forest.is_root(c));

        forest.insert_after(a, b).unwrap();
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![c, b, a]);
    }

    #[test]
    pub fn attach_rejects_invalid_moves() {
        let (mut forest, [a, b, _c, d, _e, f]) = sample();

        // b already has a parent.
        assert_eq!(
            forest.push_child(b, f),
            Err(AttachError::AlreadyAttached { node: b })
        );

        // a under its own grandchild.
        assert_eq!(
            forest.push_child(a, d),
            Err(AttachError::Cycle { node: a, parent: d })
        );

        // a under itself.
        assert_eq!(
            forest.push_child(a, a),
            Err(AttachError::Cycle { node: a, parent: a })
        );

        assert_eq!(
            forest.insert_before(f, f),
            Err(AttachError::SelfAttach { node: f })
        );

        // a before a node inside its own subtree.
        assert_eq!(
            forest.insert_before(a, d),
            Err(AttachError::Cycle { node: a, parent: b })
        );
    }

    #[test]
    pub fn detach_appends_to_roots() {
        let (mut forest, [a, b, c, d, e, f]) = sample();

        assert_eq!(forest.detach(b), Some(a));
        assert!(forest.is_root(b));
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![a, f, b]);
        assert_eq!(forest.children(a).collect::<Vec<_>>(), vec![c]);
        assert_eq!(forest.child_count(a), 1);

        // b kept its own children.
        assert_eq!(forest.children(b).collect::<Vec<_>>(), vec![d, e]);

        // Roots do not move.
        assert_eq!(forest.detach(a), None);
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![a, f, b]);
    }

    #[test]
    pub fn detach_children_keeps_order() {
        let (mut forest, [a, b, c, _d, _e, f]) = sample();

        forest.detach_children(a);

        assert!(!forest.has_children(a));
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![a, f, b, c]);
    }

    #[test]
    pub fn remove_turns_children_into_roots() {
        let (mut forest, [a, b, c, d, e, f]) = sample();

        assert_eq!(forest.remove(b), Some("b"));
        assert!(!forest.contains(b));
        assert_eq!(forest.len(), 5);
        assert_eq!(forest.children(a).collect::<Vec<_>>(), vec![c]);
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![a, f, d, e]);
        assert!(forest.is_root(d));

        assert_eq!(forest.remove(b), None);
    }

    #[test]
    pub fn remove_subtree_takes_all_descendants() {
        let (mut forest, [a, b, c, d, e, f]) = sample();

        assert_eq!(forest.remove_subtree(b), 3);
        assert_eq!(forest.len(), 3);

        for gone in [b, d, e] {
            assert!(!forest.contains(gone));
        }

        assert_eq!(forest.children(a).collect::<Vec<_>>(), vec![c]);
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![a, f]);
        assert_eq!(forest.remove_subtree(b), 0);
    }

    #[test]
    pub fn set_sibling_index_moves_both_ways() {
        let mut forest = Forest::new();

        let root = forest.add_node(0);
        let nodes: Vec<_> = (1..=4).map(|weight| forest.add_node(weight)).collect();
        for &node in &nodes {
            forest.push_child(node, root).unwrap();
        }
        let [a, b, c, d] = [nodes[0], nodes[1], nodes[2], nodes[3]];

        forest.set_sibling_index(d, 0);
        assert_eq!(forest.children(root).collect::<Vec<_>>(), vec![d, a, b, c]);

        forest.set_sibling_index(d, 2);
        assert_eq!(forest.children(root).collect::<Vec<_>>(), vec![a, b, d, c]);

        // Past-the-end indices clamp to the last position.
        forest.set_sibling_index(a, 99);
        assert_eq!(forest.children(root).collect::<Vec<_>>(), vec![b, d, c, a]);

        // Same position is a no-op.
        forest.set_sibling_index(d, 1);
        assert_eq!(forest.children(root).collect::<Vec<_>>(), vec![b, d, c, a]);
    }

    #[test]
    pub fn set_sibling_index_reorders_roots() {
        let mut forest = Forest::new();

        let a = forest.add_node("a");
        let b = forest.add_node("b");
        let c = forest.add_node("c");

        forest.set_sibling_index(c, 0);
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![c, a, b]);
        assert_eq!(forest.sibling_index(a), 1);
    }

    #[test]
    pub fn promote_follows_the_former_parent() {
        let (mut forest, [a, b, c, d, _e, f]) = sample();

        // d leaves b and lands right after it among a's children.
        assert!(forest.promote(d));
        assert_eq!(forest.parent(d), Some(a));
        assert_eq!(forest.children(a).collect::<Vec<_>>(), vec![b, d, c]);

        // b leaves a and lands right after it among the roots.
        assert!(forest.promote(b));
        assert!(forest.is_root(b));
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![a, b, f]);

        assert!(!forest.promote(a));
    }

    #[test]
    pub fn descendants_walk_pre_order() {
        let (forest, [a, b, c, d, e, f]) = sample();

        assert_eq!(
            forest.descendants(a).collect::<Vec<_>>(),
            vec![a, b, d, e, c]
        );
        assert_eq!(forest.descendants(d).collect::<Vec<_>>(), vec![d]);
        assert_eq!(forest.descendants(f).collect::<Vec<_>>(), vec![f]);
    }

    #[test]
    pub fn path_keys_match_positions() {
        let (forest, [a, b, _c, _d, e, f]) = sample();

        assert_eq!(forest.path_key(a).as_slice(), &[0]);
        assert_eq!(forest.path_key(b).as_slice(), &[0, 0]);
        assert_eq!(forest.path_key(e).as_slice(), &[0, 0, 1]);
        assert_eq!(forest.path_key(f).as_slice(), &[1]);

        assert_eq!(forest.depth(e), 2);
        assert_eq!(forest.depth(a), 0);
    }

    #[test]
    pub fn weights_are_mutable() {
        let mut forest = Forest::new();

        let node = forest.add_node(String::from("old"));
        *forest.get_mut(node).unwrap() = String::from("new");
        assert_eq!(forest[node], "new");

        forest[node].push('!');
        assert_eq!(forest.get(node).map(String::as_str), Some("new!"));
    }

    #[test]
    pub fn iter_visits_every_node() {
        let (forest, nodes) = sample();

        let weights: Vec<_> = forest.iter().map(|(_, weight)| *weight).collect();
        assert_eq!(weights, vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(forest.iter().len(), nodes.len());
    }

    #[test]
    pub fn clear_empties_the_forest() {
        let (mut forest, [a, ..]) = sample();

        forest.clear();

        assert!(forest.is_empty());
        assert_eq!(forest.root_count(), 0);
        assert!(!forest.contains(a));
        assert_eq!(forest.roots().next(), None);
    }
}
