//! Pattern expansion for batch renames.
//!
//! A rename pattern is an ordinary name with tokens substituted per node:
//! the node's own name, the names of its parent and root, an optional data
//! name, and a running counter for enumerated sequences. A `R::find,replace`
//! pattern instead rewrites the current name, and the remaining tokens still
//! apply to the result.

use crate::forest::Forest;
use crate::NodeIndex;

/// Token replaced by the node's current name.
pub const SELF_NAME: &str = "..";
/// Token replaced by the node's data name; left in place when there is none.
pub const DATA_NAME: &str = "||";
/// Token replaced by the parent's name, or [`ROOT_FALLBACK`] for roots.
pub const PARENT_NAME: &str = ",,";
/// Token replaced by the name of the node's root.
pub const ROOT_NAME: &str = "^";
/// Token replaced by the zero-padded batch counter.
pub const COUNTER: &str = "#";
/// Prefix selecting the find/replace form: `R::find,replace`.
pub const FIND_REPLACE: &str = "R::";
/// Parent name substituted for nodes that have no parent.
pub const ROOT_FALLBACK: &str = "Root";

/// Names surrounding one node, the inputs of a pattern expansion.
#[derive(Debug, Clone, Copy)]
pub struct RenameContext<'a> {
    /// Current name of the node.
    pub name: &'a str,
    /// Name of the parent, `None` for roots.
    pub parent_name: Option<&'a str>,
    /// Name of the root above the node, its own name for roots.
    pub root_name: &'a str,
    /// Name of the node's primary data payload, if it has one.
    pub data_name: Option<&'a str>,
}

impl<'a> RenameContext<'a> {
    /// Collects the context of `node` from its forest. The data name starts
    /// out empty; see [`RenameContext::with_data_name`].
    pub fn from_forest<N>(forest: &'a Forest<N>, node: NodeIndex) -> Self
    where
        N: AsRef<str>,
    {
        let mut root = node;
        while let Some(parent) = forest.parent(root) {
            root = parent;
        }

        Self {
            name: forest[node].as_ref(),
            parent_name: forest.parent(node).map(|parent| forest[parent].as_ref()),
            root_name: forest[root].as_ref(),
            data_name: None,
        }
    }

    pub fn with_data_name(mut self, data_name: &'a str) -> Self {
        self.data_name = Some(data_name);
        self
    }
}

/// Expands rename patterns and keeps the counter of one batch.
///
/// [`Renamer::apply`] advances the counter whenever the pattern used it;
/// [`Renamer::preview`] expands without side effects, for live previews.
///
/// # Example
///
/// ```
/// # use scenetree::rename::{RenameContext, Renamer};
/// let mut renamer = Renamer::new();
/// let context = RenameContext {
///     name: "Cube",
///     parent_name: Some("Props"),
///     root_name: "Level",
///     data_name: None,
/// };
///
/// assert_eq!(renamer.apply(".._#", context), "Cube_00");
/// assert_eq!(renamer.apply(".._#", context), "Cube_01");
/// assert_eq!(renamer.apply(",,/..", context), "Props/Cube");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renamer {
    counter: usize,
}

impl Renamer {
    /// Creates a renamer with the counter at zero.
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    /// Creates a renamer whose counter starts at `counter`, for continuing an
    /// existing sequence.
    pub fn starting_at(counter: usize) -> Self {
        Self { counter }
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Expands `pattern` for one node and advances the counter when the
    /// pattern used it. An empty pattern keeps the current name.
    pub fn apply(&mut self, pattern: &str, context: RenameContext<'_>) -> String {
        let (name, counted) = self.expand(pattern, context);

        if counted {
            self.counter += 1;
        }

        name
    }

    /// Expands `pattern` without advancing the counter.
    pub fn preview(&self, pattern: &str, context: RenameContext<'_>) -> String {
        self.expand(pattern, context).0
    }

    fn expand(&self, pattern: &str, context: RenameContext<'_>) -> (String, bool) {
        if pattern.is_empty() {
            return (context.name.to_owned(), false);
        }

        let mut name = pattern.to_owned();

        if name.starts_with(FIND_REPLACE) {
            name = name.replace(FIND_REPLACE, "");
            name = match name.split_once(',') {
                Some((find, replace)) if !find.is_empty() => context.name.replace(find, replace),
                _ => context.name.to_owned(),
            };
        }

        name = name.replace(SELF_NAME, context.name);

        if let Some(data_name) = context.data_name {
            name = name.replace(DATA_NAME, data_name);
        }

        name = name.replace(PARENT_NAME, context.parent_name.unwrap_or(ROOT_FALLBACK));
        name = name.replace(ROOT_NAME, context.root_name);

        let counted = name.contains(COUNTER);
        if counted {
            name = name.replace(COUNTER, &format!("{:02}", self.counter));
        }

        (name, counted)
    }
}
