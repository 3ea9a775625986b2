//! Where a node's named output channels deliver diffs.
//!
//! The host graph decides what an emission does; the splitter only needs to
//! call [`Outputs::emit`] once per channel, in order.

use arbor_path::Diff;

/// Receiver of `(channel, diff, tag)` emissions.
pub trait Outputs<C, V, T> {
    fn emit(&mut self, channel: &C, diff: Diff<V>, tag: T);
}

impl<C, V, T, F> Outputs<C, V, T> for F
where
    F: FnMut(&C, Diff<V>, T),
{
    fn emit(&mut self, channel: &C, diff: Diff<V>, tag: T) {
        self(channel, diff, tag)
    }
}

/// Records every emission, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorder<C, V, T> {
    pub emitted: Vec<(C, Diff<V>, T)>,
}

impl<C, V, T> Default for Recorder<C, V, T> {
    fn default() -> Self {
        Self { emitted: Vec::new() }
    }
}

impl<C: PartialEq, V, T> Recorder<C, V, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every emission on `channel`.
    pub fn on<'a>(&'a self, channel: &'a C) -> impl Iterator<Item = (&'a Diff<V>, &'a T)> + 'a {
        self.emitted
            .iter()
            .filter(move |(c, _, _)| c == channel)
            .map(|(_, diff, tag)| (diff, tag))
    }

    pub fn channels(&self) -> Vec<&C> {
        self.emitted.iter().map(|(c, _, _)| c).collect()
    }
}

impl<C: Clone, V, T> Outputs<C, V, T> for Recorder<C, V, T> {
    fn emit(&mut self, channel: &C, diff: Diff<V>, tag: T) {
        self.emitted.push((channel.clone(), diff, tag));
    }
}
