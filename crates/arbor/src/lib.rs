//! Path-addressed diffs for live element trees.
//!
//! Producers describe changes as [`Diff`]s: a `set` map from dot-separated
//! paths to values and a `del` set of paths. This crate provides the two ends
//! such diffs travel between:
//!
//! - [`DiffSplitter`] routes the fragments of one diff to named channels by
//!   the path component at a fixed depth;
//! - [`Reconciler`] applies a diff to a live [`Element`](tree::Element) tree,
//!   creating missing list children from `index:tag` components, and returns
//!   whatever it could not apply yet as a bounced diff.
//!
//! Correlation tags travel with diffs through the splitter untouched.
//!
//! # Example
//!
//! ```
//! use arbor::{apply_diff, Diff, DiffSplitter, tree::Element};
//! use arbor::outputs::Recorder;
//! use serde_json::json;
//!
//! let splitter = DiffSplitter::new([("body", vec!["childNodes"])], 0);
//! let mut out = Recorder::new();
//! splitter.apply(
//!     &Diff::new().with_set("childNodes.0:p.innerText", json!("Hello")),
//!     "tick-1",
//!     &mut out,
//! );
//!
//! let mut doc = Element::document();
//! for (_, diff, _) in &out.emitted {
//!     assert_eq!(apply_diff(&mut doc, diff), None);
//! }
//! assert_eq!(doc.get("childNodes.0.innerText").and_then(|p| p.as_str()), Some("Hello"));
//! ```
//!
//! # Logging
//!
//! Bounced fragments and shared-root decisions are reported through
//! [`tracing`] at `debug`, placeholder padding at `trace`, unmatched routing
//! at `warn`. The crate never installs a subscriber.

pub mod outputs;
pub mod reconcile;
pub mod resolve;
pub mod split;
pub mod tree;
pub mod view;

pub use arbor_path as path;
pub use arbor_path::{Diff, ListStep, PathError};

pub use outputs::{Outputs, Recorder};
pub use reconcile::{apply_diff, ConflictPolicy, ReconcileOptions, Reconciler};
pub use resolve::{Context, Handle, Mode, Property, ResolveError, MAX_LIST_PADDING};
pub use split::{DiffSplitter, Split, SplitReport, SplitterConfig, UnmatchedPolicy};
pub use tree::{Element, Node};
pub use view::TailView;
