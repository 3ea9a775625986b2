//! Rewrites view-model diffs into tree diffs by their last component.
//!
//! A view model speaks in its own field names (`caption.text`,
//! `row.3.title`); the tree wants element properties, attributes, styles and
//! classes. A [`TailView`] maps one onto the other by replacing the trailing
//! component of every path, keeping the `set`/`del` shape intact.

use arbor_path::{replace_path_suffix, replace_path_tail, Diff};
use serde::{Deserialize, Serialize};

use crate::tree::{ATTRIBUTES, CLASS_LIST, STYLE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailView {
    /// Every path's last component becomes the element property `name`.
    Property(String),
    /// Paths ending in `tail` become `attributes.<name>`; others are dropped.
    Attribute { tail: String, name: String },
    /// Paths ending in `tail` become `style.<name>`; others are dropped.
    Style { tail: String, name: String },
    /// Paths ending in `tail` become `classList.<name>`; others are dropped.
    Class { tail: String, name: String },
}

impl TailView {
    pub fn property(name: impl Into<String>) -> Self {
        TailView::Property(name.into())
    }

    pub fn attribute(tail: impl Into<String>, name: impl Into<String>) -> Self {
        TailView::Attribute {
            tail: tail.into(),
            name: name.into(),
        }
    }

    pub fn style(tail: impl Into<String>, name: impl Into<String>) -> Self {
        TailView::Style {
            tail: tail.into(),
            name: name.into(),
        }
    }

    pub fn class(tail: impl Into<String>, name: impl Into<String>) -> Self {
        TailView::Class {
            tail: tail.into(),
            name: name.into(),
        }
    }

    /// Rewrites one path, or `None` when the view does not apply to it.
    pub fn rewrite_path(&self, path: &str) -> Option<String> {
        let (field, tail, name) = match self {
            TailView::Property(name) => return Some(replace_path_tail(path, name)),
            TailView::Attribute { tail, name } => (ATTRIBUTES, tail, name),
            TailView::Style { tail, name } => (STYLE, tail, name),
            TailView::Class { tail, name } => (CLASS_LIST, tail, name),
        };
        let replacement = format!("{field}.{name}");
        replace_path_suffix(path, tail, &replacement)
    }

    /// Rewrites every path of `diff`.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor::{Diff, TailView};
    ///
    /// let vm = Diff::new().with_set("page.table.2-4.text", "Foo").with_del("page.table.1-3.text");
    /// let view = TailView::property("innerText").apply(&vm);
    /// assert_eq!(
    ///     view,
    ///     Diff::new()
    ///         .with_set("page.table.2-4.innerText", "Foo")
    ///         .with_del("page.table.1-3.innerText")
    /// );
    /// ```
    pub fn apply<V: Clone>(&self, diff: &Diff<V>) -> Diff<V> {
        diff.clone().map_paths(|path| self.rewrite_path(path))
    }
}
