//! The kind→label taxonomy.

use std::collections::HashMap;

use pipeline::LabelName;

/// Fixed mapping from kind keyword to label name.
///
/// Keys are exact (case-sensitive); the classifier lowercases the captured
/// marker keyword before resolving, so the table is keyed on lowercase kinds.
/// The table is injected at construction — substituting it requires no
/// changes outside the composition root.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    entries: HashMap<String, LabelName>,
}

impl Taxonomy {
    /// Builds a taxonomy from explicit entries.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, LabelName)>,
        K: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(kind, label)| (kind.into(), label))
                .collect(),
        }
    }

    /// Resolves a kind keyword to its label, if the keyword is known.
    pub fn resolve(&self, kind: &str) -> Option<LabelName> {
        self.entries.get(kind).cloned()
    }
}

impl Default for Taxonomy {
    /// The built-in table: `enhancement`/`feature` → `enhancement`,
    /// `bug` → `bug`, `doc` → `documentation`.
    fn default() -> Self {
        Self::from_entries([
            ("enhancement", label("enhancement")),
            ("feature", label("enhancement")),
            ("bug", label("bug")),
            ("doc", label("documentation")),
        ])
    }
}

// Built-in label names are statically non-empty.
fn label(name: &str) -> LabelName {
    LabelName::new(name).expect("built-in label names are non-empty")
}
