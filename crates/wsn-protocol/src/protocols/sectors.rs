//! Angular partition shared by the sector-based strategies.

use wsn_core::{NodeId, SectorId};
use wsn_node::Network;

/// This round's sector membership and the head elected in each sector.
#[derive(Clone, Debug, Default)]
pub(crate) struct SectorMap {
    /// Sector of every node, `SectorId::INVALID` for dead nodes.
    sector_of: Vec<SectorId>,
    /// Elected head per sector, `None` for empty sectors.
    heads: Vec<Option<NodeId>>,
}

impl SectorMap {
    /// Partition alive nodes into `count` equal angular sectors around the
    /// base station.  Returns the members of each sector in ascending id
    /// order; empty sectors yield empty vectors.
    pub(crate) fn partition(&mut self, net: &Network, count: usize) -> Vec<Vec<NodeId>> {
        let count = count.max(1);
        let width = 360.0 / count as f64;

        self.sector_of.clear();
        self.sector_of.resize(net.nodes.count, SectorId::INVALID);
        self.heads.clear();
        self.heads.resize(count, None);

        let mut members = vec![Vec::new(); count];
        for node in net.nodes.alive_ids() {
            let angle = net.nodes.position_of(node).angle_deg_from(net.base_station);
            // Float rounding can put an angle just under 360 into sector `count`.
            let s = ((angle / width) as usize).min(count - 1);
            self.sector_of[node.index()] = SectorId(s as u32);
            members[s].push(node);
        }
        members
    }

    pub(crate) fn set_head(&mut self, sector: usize, head: NodeId) {
        self.heads[sector] = Some(head);
    }

    /// Head of the sector `node` belongs to, if any.
    pub(crate) fn head_for(&self, node: NodeId) -> Option<NodeId> {
        let s = *self.sector_of.get(node.index())?;
        if s == SectorId::INVALID {
            return None;
        }
        self.heads.get(s.index()).copied().flatten()
    }

    /// Attach every alive non-head node to its own sector's head.
    pub(crate) fn assign_members(&self, net: &mut Network) {
        for node in net.nodes.alive_ids() {
            if net.nodes.is_head(node) {
                continue;
            }
            if let Some(h) = self.head_for(node) {
                net.nodes.assign(node, h);
            }
        }
    }
}
