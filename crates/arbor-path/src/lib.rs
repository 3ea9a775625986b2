//! Dot-separated tree paths and the `{set, del}` diffs keyed by them.
//!
//! A path such as `childNodes.2:li.attributes.id` addresses a location inside
//! a live tree. Components are separated by `.`; a component addressing an
//! ordered child list has the form `index` or `index:tag`, where the optional
//! `tag` names the kind of element to create when the slot is empty.
//!
//! # Example
//!
//! ```
//! use arbor_path::{path_component, root_path, ListStep};
//!
//! assert_eq!(path_component("page.caption.text", 1), Some("caption"));
//!
//! let step = ListStep::parse("3:li").unwrap();
//! assert_eq!(step.index, 3);
//! assert_eq!(step.tag, Some("li"));
//!
//! let root = root_path(["a.b.c", "a.b.d"]);
//! assert_eq!(root.as_deref(), Some("a.b"));
//! ```

use thiserror::Error;

pub mod diff;
pub use diff::Diff;

pub mod validate;
pub use validate::{validate_path, MAX_PATH_DEPTH};

/// Separator between path components.
pub const SEPARATOR: char = '.';

/// Separator between the index and the tag of a list component.
pub const TAG_SEPARATOR: char = ':';

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("EMPTY_PATH")]
    Empty,
    #[error("EMPTY_COMPONENT")]
    EmptyComponent,
    #[error("PATH_TOO_DEEP")]
    TooDeep,
    #[error("INVALID_INDEX: {0}")]
    InvalidIndex(String),
    #[error("EMPTY_TAG: {0}")]
    EmptyTag(String),
}

/// A parsed ordered-list component: `index` or `index:tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStep<'a> {
    /// Position of the child inside its list.
    pub index: usize,
    /// Kind of element to materialize when the slot is empty or a placeholder.
    pub tag: Option<&'a str>,
}

impl<'a> ListStep<'a> {
    /// Parses a list component.
    ///
    /// # Errors
    ///
    /// - `PathError::InvalidIndex` if the index part is not a non-negative
    ///   decimal integer
    /// - `PathError::EmptyTag` if a `:` is present but nothing follows it
    ///
    /// # Example
    ///
    /// ```
    /// use arbor_path::{ListStep, PathError};
    ///
    /// assert_eq!(ListStep::parse("0").unwrap().tag, None);
    /// assert_eq!(ListStep::parse("12:div").unwrap().index, 12);
    /// assert!(matches!(ListStep::parse("x:div"), Err(PathError::InvalidIndex(_))));
    /// assert!(matches!(ListStep::parse("1:"), Err(PathError::EmptyTag(_))));
    /// ```
    pub fn parse(component: &'a str) -> Result<Self, PathError> {
        let (index, tag) = match component.split_once(TAG_SEPARATOR) {
            Some((index, tag)) => {
                if tag.is_empty() {
                    return Err(PathError::EmptyTag(component.to_string()));
                }
                (index, Some(tag))
            }
            None => (component, None),
        };
        if !is_index(index) {
            return Err(PathError::InvalidIndex(component.to_string()));
        }
        let index = index
            .parse()
            .map_err(|_| PathError::InvalidIndex(component.to_string()))?;
        Ok(ListStep { index, tag })
    }
}

/// Check if a string consists only of ASCII digits.
///
/// Leading zeros are accepted: `"007"` addresses index 7.
pub fn is_index(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Iterates over the components of a path.
pub fn components(path: &str) -> std::str::Split<'_, char> {
    path.split(SEPARATOR)
}

/// Returns the component at `depth` (0-based), if the path is deep enough.
///
/// # Example
///
/// ```
/// use arbor_path::path_component;
///
/// assert_eq!(path_component("a.b.c", 0), Some("a"));
/// assert_eq!(path_component("a.b.c", 2), Some("c"));
/// assert_eq!(path_component("a.b.c", 3), None);
/// ```
pub fn path_component(path: &str, depth: usize) -> Option<&str> {
    components(path).nth(depth)
}

/// Joins components into a path.
pub fn join_path<I, S>(components: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, component) in components.into_iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(component.as_ref());
    }
    out
}

/// Returns everything but the last component, or `None` for a single
/// component path.
pub fn parent_path(path: &str) -> Option<&str> {
    path.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

/// Returns the last component of a path.
pub fn path_tail(path: &str) -> &str {
    match path.rsplit_once(SEPARATOR) {
        Some((_, tail)) => tail,
        None => path,
    }
}

/// Check if `child` lies strictly below `parent`.
///
/// # Example
///
/// ```
/// use arbor_path::is_child_path;
///
/// assert!(is_child_path("a.b", "a.b.c"));
/// assert!(!is_child_path("a.b", "a.bc"));
/// assert!(!is_child_path("a.b", "a.b"));
/// ```
pub fn is_child_path(parent: &str, child: &str) -> bool {
    child.len() > parent.len()
        && child.starts_with(parent)
        && child[parent.len()..].starts_with(SEPARATOR)
}

/// Prepends `prefix` to `path`. An empty prefix leaves the path unchanged.
pub fn prefix_path(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        return path.to_string();
    }
    let mut out = String::with_capacity(prefix.len() + path.len() + 1);
    out.push_str(prefix);
    out.push(SEPARATOR);
    out.push_str(path);
    out
}

/// Replaces the last component of `path` with `replacement`.
///
/// # Example
///
/// ```
/// use arbor_path::replace_path_tail;
///
/// assert_eq!(replace_path_tail("page.table.1.text", "innerText"), "page.table.1.innerText");
/// assert_eq!(replace_path_tail("text", "innerText"), "innerText");
/// ```
pub fn replace_path_tail(path: &str, replacement: &str) -> String {
    match parent_path(path) {
        Some(parent) => prefix_path(parent, replacement),
        None => replacement.to_string(),
    }
}

/// Replaces a trailing `tail` (one or more whole components) with
/// `replacement`. Returns `None` when the path does not end with `tail`.
///
/// # Example
///
/// ```
/// use arbor_path::replace_path_suffix;
///
/// assert_eq!(
///     replace_path_suffix("list.0.title", "title", "attributes.title").as_deref(),
///     Some("list.0.attributes.title")
/// );
/// assert_eq!(replace_path_suffix("list.0.subtitle", "title", "x"), None);
/// ```
pub fn replace_path_suffix(path: &str, tail: &str, replacement: &str) -> Option<String> {
    if path == tail {
        return Some(replacement.to_string());
    }
    let head = path.strip_suffix(tail)?.strip_suffix(SEPARATOR)?;
    Some(prefix_path(head, replacement))
}

/// Longest common component prefix of `paths` that still leaves at least one
/// component below it in every path.
///
/// Returns `None` when `paths` is empty or the paths share no leading
/// component.
///
/// # Example
///
/// ```
/// use arbor_path::root_path;
///
/// assert_eq!(root_path(["a.b.c", "a.b.d.e"]).as_deref(), Some("a.b"));
/// assert_eq!(root_path(["a.b.c"]).as_deref(), Some("a.b"));
/// assert_eq!(root_path(["a.b", "c.d"]), None);
/// assert_eq!(root_path(Vec::<&str>::new()), None);
/// ```
pub fn root_path<I, S>(paths: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut paths = paths.into_iter();
    let first = paths.next()?;
    let mut prefix: Vec<String> = components(first.as_ref()).map(str::to_string).collect();
    // A root must leave a component to address below it.
    prefix.pop();
    for path in paths {
        let path = path.as_ref();
        let depth = components(path).count();
        let shared = prefix
            .iter()
            .zip(components(path))
            .take_while(|(a, b)| a.as_str() == *b)
            .count();
        prefix.truncate(shared.min(depth.saturating_sub(1)));
        if prefix.is_empty() {
            return None;
        }
    }
    if prefix.is_empty() {
        None
    } else {
        Some(join_path(&prefix))
    }
}

/// Strips `root` and its separator from the front of `path`.
///
/// Returns `None` when `path` does not lie below `root`.
pub fn strip_root<'a>(root: &str, path: &'a str) -> Option<&'a str> {
    path.strip_prefix(root)?.strip_prefix(SEPARATOR)
}
