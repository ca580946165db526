//! Core node storage: `NodeStore` (SoA data).
//!
//! Every `Vec` field has exactly `count` elements; the `NodeId` value is the
//! index into all of them:
//!
//! ```ignore
//! let e = store.energy[node.index()];  // O(1), cache-friendly
//! ```
//!
//! # Energy ledger
//!
//! All deductions go through [`NodeStore::charge`], which applies the death
//! rule in the same step: once energy reaches `≤ 0` the node is flagged dead
//! and every later charge in the run is a no-op.  The deduction itself is
//! never reversed, so a node's final ledger value may be slightly negative.

use wsn_core::{NodeId, Point};

use crate::ValueTable;

/// A node's part in the current round.  Reset to `Role::None` every round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    None,
    Head,
    Member,
}

/// Structure-of-Arrays storage for all node state.
pub struct NodeStore {
    /// Number of nodes.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Fixed deployment position.
    pub position: Vec<Point>,

    /// Residual battery energy (J).  Non-increasing within a run.
    pub energy: Vec<f64>,

    /// `false` once energy has crossed `≤ 0`.  Never set back to `true`.
    pub alive: Vec<bool>,

    // ── Per-round state (cleared by `reset_round`) ────────────────────────
    /// Role in the current round.
    pub role: Vec<Role>,

    /// Head this node reports to in the current round.  `None` for heads,
    /// dead nodes, and nodes not yet assigned.
    pub cluster: Vec<Option<NodeId>>,

    // ── Cross-round learned state ─────────────────────────────────────────
    /// Next-hop value tables.  Only the Q-learning protocol touches these.
    pub values: Vec<ValueTable>,
}

impl NodeStore {
    /// Build a store of fully charged, alive nodes at `positions`.
    pub fn new(positions: Vec<Point>, initial_energy: f64) -> Self {
        let count = positions.len();
        Self {
            count,
            position: positions,
            energy:   vec![initial_energy; count],
            alive:    vec![initial_energy > 0.0; count],
            role:     vec![Role::None; count],
            cluster:  vec![None; count],
            values:   vec![ValueTable::new(); count],
        }
    }

    /// `true` if there are no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `NodeId`s in ascending index order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.count as u32).map(NodeId)
    }

    /// Alive nodes in ascending id order.
    pub fn alive_ids(&self) -> Vec<NodeId> {
        self.node_ids().filter(|&n| self.alive[n.index()]).collect()
    }

    #[inline]
    pub fn is_alive(&self, node: NodeId) -> bool {
        self.alive[node.index()]
    }

    #[inline]
    pub fn is_head(&self, node: NodeId) -> bool {
        self.role[node.index()] == Role::Head
    }

    #[inline]
    pub fn energy_of(&self, node: NodeId) -> f64 {
        self.energy[node.index()]
    }

    #[inline]
    pub fn position_of(&self, node: NodeId) -> Point {
        self.position[node.index()]
    }

    /// Euclidean distance between two nodes.
    #[inline]
    pub fn distance(&self, a: NodeId, b: NodeId) -> f64 {
        self.position[a.index()].distance(self.position[b.index()])
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Sum of residual energy over alive nodes.
    pub fn residual_energy(&self) -> f64 {
        self.energy
            .iter()
            .zip(&self.alive)
            .filter(|(_, a)| **a)
            .map(|(e, _)| *e)
            .sum()
    }

    /// Mean residual energy over alive nodes, `0.0` when none are alive.
    pub fn average_energy(&self) -> f64 {
        let alive = self.alive_count();
        if alive == 0 {
            0.0
        } else {
            self.residual_energy() / alive as f64
        }
    }

    /// The alive node with the most residual energy (lowest id wins ties).
    pub fn highest_energy_alive(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for node in self.node_ids().filter(|&n| self.alive[n.index()]) {
            let e = self.energy[node.index()];
            if best.is_none_or(|(_, b)| e > b) {
                best = Some((node, e));
            }
        }
        best.map(|(n, _)| n)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Deduct `joules` from `node` and apply the death rule.
    ///
    /// Returns `true` if the node is still alive afterwards.  Charging a dead
    /// node does nothing and returns `false`.
    pub fn charge(&mut self, node: NodeId, joules: f64) -> bool {
        let i = node.index();
        if !self.alive[i] {
            return false;
        }
        self.energy[i] -= joules;
        if self.energy[i] <= 0.0 {
            self.alive[i] = false;
        }
        self.alive[i]
    }

    /// Clear role and cluster assignment for every node.
    pub fn reset_round(&mut self) {
        self.role.fill(Role::None);
        self.cluster.fill(None);
    }

    /// Promote `node` to cluster head for this round.
    #[inline]
    pub fn make_head(&mut self, node: NodeId) {
        self.role[node.index()] = Role::Head;
        self.cluster[node.index()] = None;
    }

    /// Attach `node` to `head` as a member for this round.
    #[inline]
    pub fn assign(&mut self, node: NodeId, head: NodeId) {
        self.role[node.index()] = Role::Member;
        self.cluster[node.index()] = Some(head);
    }

    /// Flag any alive node whose ledger is `≤ 0` as dead.  Returns how many
    /// nodes were newly flagged.
    pub fn sweep_dead(&mut self) -> usize {
        let mut flagged = 0;
        for (alive, energy) in self.alive.iter_mut().zip(&self.energy) {
            if *alive && *energy <= 0.0 {
                *alive = false;
                flagged += 1;
            }
        }
        flagged
    }
}
