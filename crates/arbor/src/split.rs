//! Fans a diff out to named channels by one path component.
//!
//! A splitter is built from a routing table `channel -> [component, ...]`
//! and a depth. Each path of an incoming diff is routed by its component at
//! that depth to every channel that registered it; a path may reach several
//! channels. Values and deletions are copied unchanged and the incoming tag
//! is passed along with every emitted diff.
//!
//! Paths whose component no channel registered (or that are too short to have
//! one) are dropped. Under [`UnmatchedPolicy::Report`] they are also logged
//! and returned in the [`SplitReport`].

use std::collections::HashMap;
use std::hash::Hash;

use arbor_path::{path_component, Diff};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::outputs::Outputs;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Drop unmatched paths silently.
    Drop,
    /// Drop unmatched paths, log them and list them in the report.
    #[default]
    Report,
}

/// Serializable form of a splitter.
///
/// ```
/// use arbor::split::{DiffSplitter, SplitterConfig, UnmatchedPolicy};
///
/// let config: SplitterConfig<String> = serde_json::from_str(
///     r#"{"routes": {"d_caption": ["caption"]}, "depth": 1}"#,
/// ).unwrap();
/// assert_eq!(config.unmatched, UnmatchedPolicy::Report);
///
/// let splitter = DiffSplitter::from_config(config);
/// assert_eq!(splitter.depth(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C: Serialize",
    deserialize = "C: Deserialize<'de> + Eq + Hash"
))]
pub struct SplitterConfig<C> {
    pub routes: IndexMap<C, Vec<String>>,
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub unmatched: UnmatchedPolicy,
}

/// Per-channel diffs produced by [`DiffSplitter::split`], in the order the
/// channels were first reached.
#[derive(Debug, Clone)]
pub struct Split<C, V> {
    pub diffs: IndexMap<C, Diff<V>>,
    pub unmatched: Vec<String>,
}

/// Outcome of [`DiffSplitter::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Number of channels that received a diff.
    pub emitted: usize,
    /// Paths that reached no channel (always empty under `Drop`).
    pub unmatched: Vec<String>,
}

impl SplitReport {
    pub fn is_clean(&self) -> bool {
        self.unmatched.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DiffSplitter<C> {
    channels: Vec<C>,
    channels_by_component: HashMap<String, Vec<C>>,
    depth: usize,
    unmatched: UnmatchedPolicy,
}

impl<C: Clone + Eq + Hash> DiffSplitter<C> {
    /// Builds a splitter from `channel -> components` routes, inspecting the
    /// path component at `depth` (0-based).
    ///
    /// # Example
    ///
    /// ```
    /// use arbor::{Diff, DiffSplitter};
    ///
    /// let splitter = DiffSplitter::new([("A", vec!["x"]), ("B", vec!["y"])], 0);
    /// let split = splitter.split(&Diff::new().with_set("x.1", "v1").with_set("y.2", "v2"));
    /// assert_eq!(split.diffs[&"A"], Diff::new().with_set("x.1", "v1"));
    /// assert_eq!(split.diffs[&"B"], Diff::new().with_set("y.2", "v2"));
    /// ```
    pub fn new<I, P, S>(routes: I, depth: usize) -> Self
    where
        I: IntoIterator<Item = (C, P)>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut channels: Vec<C> = Vec::new();
        let mut channels_by_component: HashMap<String, Vec<C>> = HashMap::new();
        for (channel, components) in routes {
            for component in components {
                let routed = channels_by_component.entry(component.into()).or_default();
                if !routed.contains(&channel) {
                    routed.push(channel.clone());
                }
            }
            if !channels.contains(&channel) {
                channels.push(channel);
            }
        }
        Self {
            channels,
            channels_by_component,
            depth,
            unmatched: UnmatchedPolicy::default(),
        }
    }

    pub fn from_config(config: SplitterConfig<C>) -> Self {
        Self::new(config.routes, config.depth).with_unmatched(config.unmatched)
    }

    pub fn with_unmatched(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    pub fn channels(&self) -> &[C] {
        &self.channels
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        self.unmatched
    }

    /// Channels a path is routed to; empty when it matches none.
    pub fn route(&self, path: &str) -> &[C] {
        path_component(path, self.depth)
            .and_then(|component| self.channels_by_component.get(component))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Partitions `diff` by channel without emitting anything.
    pub fn split<V: Clone>(&self, diff: &Diff<V>) -> Split<C, V> {
        let mut diffs: IndexMap<C, Diff<V>> = IndexMap::new();
        let mut unmatched = Vec::new();

        for (path, value) in &diff.set {
            let channels = self.route(path);
            if channels.is_empty() {
                unmatched.push(path.clone());
            }
            for channel in channels {
                diffs
                    .entry(channel.clone())
                    .or_default()
                    .set
                    .insert(path.clone(), value.clone());
            }
        }

        for path in &diff.del {
            let channels = self.route(path);
            if channels.is_empty() {
                unmatched.push(path.clone());
            }
            for channel in channels {
                diffs.entry(channel.clone()).or_default().del.insert(path.clone());
            }
        }

        Split { diffs, unmatched }
    }

    /// Splits `diff` and emits each channel's share on `outputs`, each with a
    /// clone of `tag`. Channels without matching paths emit nothing.
    pub fn apply<V, T, O>(&self, diff: &Diff<V>, tag: T, outputs: &mut O) -> SplitReport
    where
        V: Clone,
        T: Clone,
        O: Outputs<C, V, T> + ?Sized,
    {
        let Split { diffs, unmatched } = self.split(diff);

        let unmatched = match self.unmatched {
            UnmatchedPolicy::Drop => Vec::new(),
            UnmatchedPolicy::Report => {
                if !unmatched.is_empty() {
                    warn!(
                        depth = self.depth,
                        count = unmatched.len(),
                        paths = ?unmatched,
                        "diff paths matched no channel"
                    );
                }
                unmatched
            }
        };

        let emitted = diffs.len();
        for (channel, channel_diff) in diffs {
            outputs.emit(&channel, channel_diff, tag.clone());
        }

        SplitReport { emitted, unmatched }
    }
}
