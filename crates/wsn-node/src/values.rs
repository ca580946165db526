//! Sparse per-node value table for learned next-hop selection.
//!
//! Keys are neighbour `NodeId`s; every absent key reads as `0.0`.  The table
//! is owned by its node and survives across rounds, unlike role and cluster
//! assignment.

use wsn_core::NodeId;

#[cfg(feature = "fx-hash")]
type Map = rustc_hash::FxHashMap<NodeId, f64>;
#[cfg(not(feature = "fx-hash"))]
type Map = std::collections::HashMap<NodeId, f64>;

#[derive(Clone, Debug, Default)]
pub struct ValueTable {
    values: Map,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learned value of hopping to `neighbor`, `0.0` if never visited.
    #[inline]
    pub fn get(&self, neighbor: NodeId) -> f64 {
        self.values.get(&neighbor).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn set(&mut self, neighbor: NodeId, value: f64) {
        self.values.insert(neighbor, value);
    }

    /// Highest value among `candidates`, `0.0` when `candidates` is empty.
    pub fn max_over<I>(&self, candidates: I) -> f64
    where
        I: IntoIterator<Item = NodeId>,
    {
        candidates
            .into_iter()
            .map(|c| self.get(c))
            .fold(None, |best: Option<f64>, v| Some(best.map_or(v, |b| b.max(v))))
            .unwrap_or(0.0)
    }

    /// One-step temporal-difference update of the value for `neighbor`:
    ///
    /// ```text
    ///   new = old + α·(reward + γ·max_next − old)
    /// ```
    ///
    /// Returns the new value.
    pub fn update(
        &mut self,
        neighbor: NodeId,
        reward:   f64,
        max_next: f64,
        alpha:    f64,
        gamma:    f64,
    ) -> f64 {
        let old = self.get(neighbor);
        let new = old + alpha * (reward + gamma * max_next - old);
        self.set(neighbor, new);
        new
    }

    /// Number of neighbours with an explicit entry.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
