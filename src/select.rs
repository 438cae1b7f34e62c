//! Operations over multi-selections of forest nodes.
//!
//! A selection is a slice of node indices in whatever order the host reports
//! them. The functions here expand selections along the hierarchy and apply
//! batch mutations in a hierarchy-consistent order. All results are free of
//! repeats and keep first-seen order.

use bitvec::vec::BitVec;

use crate::forest::{Forest, Siblings};
use crate::name::NameMatcher;
use crate::NodeIndex;

/// Replaces every selected node by its parent; roots keep themselves.
pub fn parents_of<N>(forest: &Forest<N>, selection: &[NodeIndex]) -> Vec<NodeIndex> {
    distinct(
        forest,
        selection
            .iter()
            .map(|&node| forest.parent(node).unwrap_or(node)),
    )
}

/// Replaces every selected node by its children, in sibling order.
pub fn children_of<N>(forest: &Forest<N>, selection: &[NodeIndex]) -> Vec<NodeIndex> {
    distinct(
        forest,
        selection.iter().flat_map(|&node| forest.children(node)),
    )
}

/// Expands every selected node to its full sibling list, the node included.
/// For a root that is the list of roots.
pub fn siblings_of<N>(forest: &Forest<N>, selection: &[NodeIndex]) -> Vec<NodeIndex> {
    distinct(
        forest,
        selection
            .iter()
            .flat_map(|&node| sibling_list(forest, node)),
    )
}

/// Expands every selected node to the siblings sharing its canonical name,
/// the node included.
///
/// Names match modulo copy and import decorations; see
/// [`NameMatcher::canonical`].
pub fn same_name_siblings<N>(
    forest: &Forest<N>,
    selection: &[NodeIndex],
    matcher: &NameMatcher,
) -> Vec<NodeIndex>
where
    N: AsRef<str>,
{
    let mut matched = Vec::new();

    for &node in selection {
        let name = matcher.canonical(forest[node].as_ref());

        for sibling in sibling_list(forest, node) {
            if matcher.canonical(forest[sibling].as_ref()) == name {
                matched.push(sibling);
            }
        }
    }

    distinct(forest, matched)
}

/// Sorts the selection into depth-first pre-order.
///
/// Uses the forest's own path keys, so unlike
/// [`PreOrder::sort`](crate::PreOrder::sort) this cannot fail.
pub fn sort_by_position<N>(forest: &Forest<N>, selection: &mut [NodeIndex]) {
    let mut keyed: Vec<_> = selection
        .iter()
        .map(|&node| (forest.path_key(node), node))
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    for (slot, (_, node)) in selection.iter_mut().zip(keyed) {
        *slot = node;
    }
}

/// Promotes every selected node one level; see [`Forest::promote`].
///
/// The selection is processed bottom-up (reverse pre-order), so each node
/// moves relative to the position it had when the batch started, no matter
/// how the others move.
///
/// Returns the number of nodes that moved; roots stay in place.
pub fn promote_selection<N>(forest: &mut Forest<N>, selection: &[NodeIndex]) -> usize {
    let mut ordered = distinct(forest, selection.iter().copied());
    sort_by_position(forest, &mut ordered);

    let mut moved = 0;
    for &node in ordered.iter().rev() {
        if forest.promote(node) {
            moved += 1;
        }
    }

    moved
}

/// Reorders the selected nodes alphabetically by name within the sibling
/// positions they already occupy, starting at the smallest selected index.
pub fn sort_siblings_by_name<N>(forest: &mut Forest<N>, selection: &[NodeIndex])
where
    N: AsRef<str>,
{
    let mut nodes = distinct(forest, selection.iter().copied());
    if nodes.is_empty() {
        return;
    }

    let start = nodes
        .iter()
        .map(|&node| forest.sibling_index(node))
        .min()
        .unwrap_or(0);

    nodes.sort_by(|&a, &b| forest[a].as_ref().cmp(forest[b].as_ref()));

    for (offset, &node) in nodes.iter().enumerate() {
        forest.set_sibling_index(node, start + offset);
    }
}

fn sibling_list<N>(forest: &Forest<N>, node: NodeIndex) -> Siblings<'_, N> {
    match forest.parent(node) {
        Some(parent) => forest.children(parent),
        None => forest.roots(),
    }
}

/// Collects `nodes` in first-seen order, dropping repeats.
fn distinct<N, I>(forest: &Forest<N>, nodes: I) -> Vec<NodeIndex>
where
    I: IntoIterator<Item = NodeIndex>,
{
    let mut seen: BitVec = BitVec::repeat(false, forest.index_bound());
    let mut out = Vec::new();

    for node in nodes {
        if !seen[node.index()] {
            seen.set(node.index(), true);
            out.push(node);
        }
    }

    out
}
