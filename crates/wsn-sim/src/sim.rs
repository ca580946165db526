//! The `Sim` struct and its round loop.

use tracing::{debug, info};
use wsn_core::{RadioModel, Round, SimConfig, SimRng};
use wsn_node::Network;
use wsn_protocol::{ClusterProtocol, HeadLoad, RoundContext, RoundStats, election};

use crate::{RoundObserver, RoundRecord, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P>` owns one node population, one random stream and one strategy, and
/// drives the fixed round phases:
///
/// 1. **Reset**: roles and cluster assignments are cleared.
/// 2. **Election**: [`ClusterProtocol::elect_heads`]; if nobody was elected
///    the highest-energy alive node is forced to lead.
/// 3. **Assignment**: [`ClusterProtocol::assign_members`].
/// 4. **Member transmission**: every alive member whose head is still alive
///    sends one packet, gated by [`ClusterProtocol::member_can_send`].
///    Members pay transmit, heads pay receive.
/// 5. **Routing**: [`ClusterProtocol::route_to_base`].
/// 6. **Death sweep** and bookkeeping.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: ClusterProtocol> {
    /// Round budget, seed, energy recording.
    pub config: SimConfig,

    /// Radio constants for every cost in the run.
    pub radio: RadioModel,

    /// The node population and base station.
    pub network: Network,

    /// The strategy.  Called once per phase per round.
    pub protocol: P,

    /// The run's single random stream.  Placement has already consumed its
    /// draws by the time the first round starts.
    pub rng: SimRng,

    /// Next round to simulate.
    pub round: Round,

    /// Records of the rounds simulated so far (unpadded).
    pub records: Vec<RoundRecord>,
}

impl<P: ClusterProtocol> Sim<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current round to the end of the budget and return the
    /// full series, padded with dead rows after network death.
    ///
    /// Calls observer hooks at every round boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: RoundObserver>(&mut self, observer: &mut O) -> SimResult<Vec<RoundRecord>> {
        let last = self.config.last_round();
        while self.round <= last && !self.network.is_dead() {
            self.step(observer);
        }

        let series = self.padded_series();
        observer.on_sim_end(&series);
        Ok(series)
    }

    /// Simulate up to `n` rounds from the current position (ignores the round
    /// budget).  Stops early once the network is dead.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_rounds<O: RoundObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if self.network.is_dead() {
                break;
            }
            self.step(observer);
        }
        Ok(())
    }

    /// The series so far, padded to the configured budget.
    pub fn padded_series(&self) -> Vec<RoundRecord> {
        let budget = self.config.total_rounds as usize;
        let mut series = self.records.clone();
        while series.len() < budget {
            let round = Round(series.len() as u64 + 1);
            series.push(RoundRecord::dead(round, self.config.record_energy));
        }
        series
    }

    // ── Core round processing ─────────────────────────────────────────────

    fn step<O: RoundObserver>(&mut self, observer: &mut O) {
        let now = self.round;
        observer.on_round_start(now);

        let (record, stats) = self.process_round(now);
        debug!(
            round = now.0,
            heads = stats.heads,
            fallback = stats.fallback,
            alive = record.alive_nodes,
            residual = record.residual_energy,
            "round complete"
        );
        observer.on_round_end(&record, &stats);
        self.records.push(record);

        if record.alive_nodes == 0 {
            info!(round = now.0, protocol = self.protocol.name(), "network died");
            observer.on_network_death(now);
        }
        self.round = now.next();
    }

    fn process_round(&mut self, now: Round) -> (RoundRecord, RoundStats) {
        let ctx = RoundContext::new(now, self.radio);
        let ledger_before = self.ledger_total();
        let mut stats = RoundStats::default();

        // ── Phase 1: reset ────────────────────────────────────────────────
        self.network.nodes.reset_round();

        // ── Phase 2: election ─────────────────────────────────────────────
        let mut heads = self.protocol.elect_heads(&ctx, &mut self.network, &mut self.rng);
        heads.retain(|&h| self.network.nodes.is_alive(h));
        if heads.is_empty() {
            if let Some(h) = election::fallback_head(&self.network) {
                heads.push(h);
                stats.fallback = true;
            }
        }
        for &h in &heads {
            self.network.nodes.make_head(h);
        }
        stats.heads = heads.len();

        // ── Phase 3: assignment ───────────────────────────────────────────
        self.protocol.assign_members(&ctx, &mut self.network, &heads);

        // ── Phase 4: member → head ────────────────────────────────────────
        let load = self.transmit_members(&ctx, &mut stats);

        // ── Phase 5: aggregation and forwarding ───────────────────────────
        self.protocol
            .route_to_base(&ctx, &mut self.network, &heads, &load, &mut self.rng, &mut stats);

        // ── Phase 6: death sweep and bookkeeping ──────────────────────────
        self.network.nodes.sweep_dead();
        stats.energy_spent = ledger_before - self.ledger_total();

        let record = RoundRecord {
            round:           now,
            alive_nodes:     self.network.alive_count(),
            residual_energy: self
                .config
                .record_energy
                .then(|| self.network.residual_energy()),
        };
        (record, stats)
    }

    /// One packet from every alive member to its head, in ascending id order.
    ///
    /// A packet only counts as delivered if its head survives receiving it.
    /// A head that dies while receiving stops accepting packets for the rest
    /// of the phase.
    fn transmit_members(&mut self, ctx: &RoundContext, stats: &mut RoundStats) -> HeadLoad {
        let nodes = &mut self.network.nodes;
        let mut load = HeadLoad::new(nodes.count);
        let bits = ctx.radio.packet_bits;

        for node in nodes.alive_ids() {
            let Some(head) = nodes.cluster[node.index()] else { continue };
            if !nodes.is_alive(node) || !nodes.is_alive(head) {
                continue;
            }
            let cost = ctx.radio.transmit_cost(bits, nodes.distance(node, head));
            if !self.protocol.member_can_send(nodes.energy_of(node), cost) {
                continue;
            }
            nodes.charge(node, cost);
            if nodes.charge(head, ctx.radio.receive_cost(bits)) {
                load.record(head);
                stats.members_delivered += 1;
            }
        }
        load
    }

    /// Sum of every node's ledger, dead nodes included.
    fn ledger_total(&self) -> f64 {
        self.network.nodes.energy.iter().sum()
    }
}
