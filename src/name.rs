//! Canonical object names and text filters.
//!
//! Editors and content tools decorate object names on duplication and import:
//! ` (1)` or ` (Clone)` suffixes, `.001` style numbering. Matching objects
//! "by name" means matching the name underneath those decorations.

use regex::Regex;

/// Compares names modulo copy and import decorations.
///
/// [`NameMatcher::canonical`] strips a parenthetical suffix first and `.NNN`
/// numbering second, so `Lamp`, `Lamp (1)` and `Lamp.003` all share the
/// canonical name `Lamp`.
pub struct NameMatcher {
    parenthetical: Regex,
    numbering: Regex,
}

impl NameMatcher {
    pub fn new() -> Self {
        Self {
            parenthetical: Regex::new(r"\s*\(.*\)").unwrap(),
            numbering: Regex::new(r"\s*\.[0-9]{3}").unwrap(),
        }
    }

    /// Returns the name with all copy and import decorations removed.
    pub fn canonical(&self, name: &str) -> String {
        let stripped = self.parenthetical.replace_all(name, "");
        self.numbering.replace_all(&stripped, "").into_owned()
    }

    /// Returns whether two names are equal modulo decorations.
    pub fn same(&self, a: &str, b: &str) -> bool {
        self.canonical(a) == self.canonical(b)
    }
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns whether `text` contains every whitespace-separated word of
/// `filter`, ignoring case. The empty filter matches everything.
///
/// # Example
///
/// ```
/// # use scenetree::name::matches_filter;
/// assert!(matches_filter("MainMenu_Scene", "main menu"));
/// assert!(!matches_filter("MainMenu_Scene", "main level"));
/// assert!(matches_filter("anything", ""));
/// ```
pub fn matches_filter(text: &str, filter: &str) -> bool {
    let text = text.to_lowercase();

    filter
        .split_whitespace()
        .all(|word| text.contains(&word.to_lowercase()))
}
