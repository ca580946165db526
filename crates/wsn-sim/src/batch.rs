//! Several protocol runs over the same deployment parameters.
//!
//! Every run builds its own [`Sim`][crate::Sim]: its own node population and
//! its own random stream.  Nothing is shared, so with the `parallel` feature
//! the runs go to Rayon's thread pool and still produce the same series as a
//! sequential batch.

use tracing::info;
use wsn_core::{RadioModel, SimConfig, SimRng};
use wsn_node::Placement;
use wsn_protocol::{ClusterProtocol, Protocol, ProtocolKind, ProtocolParams};

use crate::{NoopObserver, RunOutcome, SimBuilder, SimResult};

/// How each run of a batch is seeded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SeedPolicy {
    /// Every run starts from `config.seed`, so protocols sharing a placement
    /// see the same deployment.
    #[default]
    Shared,
    /// Run `i` gets child `i` of a master stream seeded with `config.seed`.
    Derived,
}

/// Inputs shared by every run of a batch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatchSpec {
    pub config:    SimConfig,
    pub nodes:     usize,
    pub radio:     RadioModel,
    pub params:    ProtocolParams,
    /// Forces one area on every protocol; `None` lets each use its own.
    pub placement: Option<Placement>,
    pub seeds:     SeedPolicy,
}

impl Default for BatchSpec {
    fn default() -> Self {
        Self {
            config:    SimConfig::default(),
            nodes:     crate::builder::DEFAULT_NODES,
            radio:     RadioModel::default(),
            params:    ProtocolParams::default(),
            placement: None,
            seeds:     SeedPolicy::Shared,
        }
    }
}

impl BatchSpec {
    /// Seed for each of `runs` runs.
    pub fn run_seeds(&self, runs: usize) -> Vec<u64> {
        match self.seeds {
            SeedPolicy::Shared => vec![self.config.seed; runs],
            SeedPolicy::Derived => {
                let mut master = SimRng::new(self.config.seed);
                (0..runs as u64).map(|i| master.child(i).random::<u64>()).collect()
            }
        }
    }
}

/// Run one protocol with `seed` and return its padded series.
pub fn run_one(kind: ProtocolKind, seed: u64, spec: &BatchSpec) -> SimResult<RunOutcome> {
    let protocol = Protocol::with_params(kind, &spec.params);
    let config = SimConfig { seed, ..spec.config.clone() };

    let mut builder = SimBuilder::new(config, protocol)
        .nodes(spec.nodes)
        .radio(spec.radio);
    if let Some(p) = spec.placement {
        builder = builder.placement(p);
    }
    let mut sim = builder.build()?;
    let records = sim.run(&mut NoopObserver)?;

    let outcome = RunOutcome {
        protocol:      sim.protocol.name().to_owned(),
        seed,
        initial_nodes: sim.network.initial_count,
        records,
    };
    let life = outcome.lifetime();
    info!(
        protocol = kind.name(),
        seed,
        first_dead = life.first_dead.map(|r| r.0),
        last_dead = life.last_dead.map(|r| r.0),
        "run finished"
    );
    Ok(outcome)
}

/// Run every protocol in `kinds` and return the outcomes in the same order.
pub fn run_all(kinds: &[ProtocolKind], spec: &BatchSpec) -> SimResult<Vec<RunOutcome>> {
    spec.params.validate()?;
    let seeds = spec.run_seeds(kinds.len());

    #[cfg(not(feature = "parallel"))]
    {
        kinds
            .iter()
            .zip(seeds)
            .map(|(&kind, seed)| run_one(kind, seed, spec))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        kinds
            .par_iter()
            .zip(seeds.into_par_iter())
            .map(|(&kind, seed)| run_one(kind, seed, spec))
            .collect()
    }
}
