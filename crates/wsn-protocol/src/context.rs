//! Read-only round inputs shared by every strategy callback.

use wsn_core::{NodeId, RadioModel, Round};

/// Per-round constants passed to every [`ClusterProtocol`][crate::ClusterProtocol]
/// callback.
#[derive(Copy, Clone, Debug)]
pub struct RoundContext {
    /// Current 1-based round.
    pub round: Round,

    /// Radio constants shared by all protocols.
    pub radio: RadioModel,
}

impl RoundContext {
    #[inline]
    pub fn new(round: Round, radio: RadioModel) -> Self {
        Self { round, radio }
    }
}

/// Member packets each head received during the member transmission phase,
/// indexed by `NodeId`.
#[derive(Clone, Debug, Default)]
pub struct HeadLoad {
    received: Vec<usize>,
}

impl HeadLoad {
    pub fn new(node_count: usize) -> Self {
        Self { received: vec![0; node_count] }
    }

    /// Count one delivered member packet at `head`.
    #[inline]
    pub fn record(&mut self, head: NodeId) {
        self.received[head.index()] += 1;
    }

    /// Member packets delivered to `head` this round.
    #[inline]
    pub fn members(&self, head: NodeId) -> usize {
        self.received.get(head.index()).copied().unwrap_or(0)
    }

    /// Total member packets delivered this round.
    pub fn total(&self) -> usize {
        self.received.iter().sum()
    }
}
