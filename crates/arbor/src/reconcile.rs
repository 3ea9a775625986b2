//! Applies diffs to the live tree and returns what did not apply.
//!
//! A diff is applied in two passes, deletions first, then assignments. Each
//! pass resolves the longest path prefix shared by all of its paths once and
//! walks the remaining suffixes from there. Fragments whose path cannot be
//! resolved (an ancestor is missing, a list slot needs a tag, the context
//! does not support the step) are collected, unchanged, into a bounced diff
//! the caller can resubmit later.
//!
//! The outcome does not depend on the order of entries inside the diff:
//! deletions run deepest path first, and assignments are repeated over the
//! failed remainder while a pass still makes progress, so a fragment may rely
//! on a sibling that materializes its ancestor.
//!
//! Application is not transactional: fragments that succeed stay applied even
//! when siblings in the same diff bounce.

use arbor_path::{components, root_path, strip_root, Diff};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::resolve::{delete_at, resolve_context, set_at, Context, Mode, ResolveError};
use crate::tree::Element;

/// What to do with a path present in both `set` and `del` of one diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Run the delete pass, then the set pass: the assignment is what remains.
    #[default]
    SetWins,
    /// Discard the conflicting assignments; only the deletion is applied.
    DelWins,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    pub conflict: ConflictPolicy,
}

/// Applies diffs to a tree passed in by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(options: ReconcileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ReconcileOptions {
        self.options
    }

    /// Applies `diff` below `root`.
    ///
    /// Returns `None` when every fragment was applied, otherwise a diff with
    /// exactly the fragments that failed.
    ///
    /// # Example
    ///
    /// ```
    /// use arbor::{Diff, Reconciler, tree::Element};
    /// use serde_json::json;
    ///
    /// let mut doc = Element::document();
    /// let diff = Diff::new()
    ///     .with_set("childNodes.0:h1.innerText", json!("Title"))
    ///     .with_set("childNodes.1.innerText", json!("no tag, no element"));
    ///
    /// let bounced = Reconciler::default().apply(&mut doc, &diff).unwrap();
    /// assert_eq!(bounced, Diff::new().with_set("childNodes.1.innerText", json!("no tag, no element")));
    /// assert_eq!(doc.get("childNodes.0.innerText").and_then(|p| p.as_str()), Some("Title"));
    /// ```
    pub fn apply(&self, root: &mut Element, diff: &Diff<Value>) -> Option<Diff<Value>> {
        let mut bounced = Diff::new();

        apply_del(root, &diff.del, &mut bounced.del);

        let set: Vec<(&String, &Value)> = match self.options.conflict {
            ConflictPolicy::SetWins => diff.set.iter().collect(),
            ConflictPolicy::DelWins => diff
                .set
                .iter()
                .filter(|(path, _)| {
                    let conflict = diff.del.contains(path.as_str());
                    if conflict {
                        debug!(path = %path, "discarding assignment overridden by deletion");
                    }
                    !conflict
                })
                .collect(),
        };
        apply_set(root, &set, &mut bounced.set);

        if bounced.is_empty() {
            None
        } else {
            debug!(
                set = bounced.set.len(),
                del = bounced.del.len(),
                "diff partially applied"
            );
            Some(bounced)
        }
    }
}

/// Applies `diff` below `root` with default options.
pub fn apply_diff(root: &mut Element, diff: &Diff<Value>) -> Option<Diff<Value>> {
    Reconciler::default().apply(root, diff)
}

fn bounce_reason(path: &str, err: &ResolveError) {
    debug!(path = %path, error = %err, "bounced fragment");
}

fn apply_del(root: &mut Element, paths: &IndexSet<String>, bounced: &mut IndexSet<String>) {
    if paths.is_empty() {
        return;
    }
    // Descendants go before their ancestors, so removing an element never
    // strands a deletion below it.
    let mut ordered: Vec<&String> = paths.iter().collect();
    ordered.sort_by(|a, b| depth(b).cmp(&depth(a)).then_with(|| a.cmp(b)));

    let failed: IndexSet<&str> = del_pass(root, &ordered).into_iter().map(String::as_str).collect();
    bounced.extend(paths.iter().filter(|path| failed.contains(path.as_str())).cloned());
}

fn apply_set(root: &mut Element, entries: &[(&String, &Value)], bounced: &mut IndexMap<String, Value>) {
    if entries.is_empty() {
        return;
    }
    let mut pending = entries.to_vec();
    pending.sort_by(|a, b| a.0.cmp(b.0));

    // A fragment may need a sibling fragment to materialize its ancestor
    // first; repeat while a pass makes progress.
    loop {
        let failed = set_pass(root, &pending);
        let progressed = !failed.is_empty() && failed.len() < pending.len();
        pending = failed;
        if !progressed {
            break;
        }
        debug!(remaining = pending.len(), "retrying assignments after partial progress");
    }

    let failed: IndexSet<&str> = pending.iter().map(|(path, _)| path.as_str()).collect();
    bounced.extend(
        entries
            .iter()
            .filter(|(path, _)| failed.contains(path.as_str()))
            .map(|&(path, value)| (path.clone(), value.clone())),
    );
}

fn depth(path: &str) -> usize {
    components(path).count()
}

/// Deletes `paths` in order and returns the ones that failed.
fn del_pass<'d>(root: &mut Element, paths: &[&'d String]) -> Vec<&'d String> {
    let mut failed = Vec::new();
    let Some(shared) = root_path(paths) else {
        for &path in paths {
            if let Err(err) = delete_at(Context::Element(&mut *root), path) {
                bounce_reason(path, &err);
                failed.push(path);
            }
        }
        return failed;
    };

    debug!(root = %shared, count = paths.len(), "deleting below shared root");
    match resolve_context(Context::Element(root), &shared, Mode::Existing) {
        Ok(mut context) => {
            for &path in paths {
                let result = match strip_root(&shared, path) {
                    Some(suffix) => delete_at(context.reborrow(), suffix),
                    None => Err(ResolveError::Missing(path.clone())),
                };
                if let Err(err) = result {
                    bounce_reason(path, &err);
                    failed.push(path);
                }
            }
        }
        Err(err) => {
            bounce_reason(&shared, &err);
            failed.extend_from_slice(paths);
        }
    }
    failed
}

/// Assigns `entries` in order and returns the ones that failed.
fn set_pass<'d>(root: &mut Element, entries: &[(&'d String, &'d Value)]) -> Vec<(&'d String, &'d Value)> {
    let mut failed = Vec::new();
    let Some(shared) = root_path(entries.iter().map(|(path, _)| path)) else {
        for &(path, value) in entries {
            if let Err(err) = set_at(Context::Element(&mut *root), path, value.clone()) {
                bounce_reason(path, &err);
                failed.push((path, value));
            }
        }
        return failed;
    };

    debug!(root = %shared, count = entries.len(), "assigning below shared root");
    match resolve_context(Context::Element(root), &shared, Mode::Create) {
        Ok(mut context) => {
            for &(path, value) in entries {
                let result = match strip_root(&shared, path) {
                    Some(suffix) => set_at(context.reborrow(), suffix, value.clone()),
                    None => Err(ResolveError::Missing(path.clone())),
                };
                if let Err(err) = result {
                    bounce_reason(path, &err);
                    failed.push((path, value));
                }
            }
        }
        Err(err) => {
            bounce_reason(&shared, &err);
            failed.extend_from_slice(entries);
        }
    }
    failed
}
