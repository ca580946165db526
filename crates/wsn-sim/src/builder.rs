//! Fluent builder for constructing a [`Sim`].

use wsn_core::{Point, RadioModel, Round, SimConfig, SimRng};
use wsn_node::{NetworkBuilder, Placement};
use wsn_protocol::ClusterProtocol;

use crate::{Sim, SimError, SimResult};

/// Default deployment size.
pub const DEFAULT_NODES: usize = 100;

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: round budget, seed, energy recording
/// - `P: ClusterProtocol`: the strategy
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                 |
/// |------------------------|-----------------------------------------|
/// | `.nodes(n)`            | `100`                                   |
/// | `.placement(p)`        | `protocol.default_placement()`          |
/// | `.radio(r)`            | `RadioModel::default()`                 |
/// | `.positions(v)`        | random draw from the placement          |
/// | `.base_station(p)`     | the placement's base-station position   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, Protocol::from_kind(ProtocolKind::Abose))
///     .nodes(100)
///     .build()?;
/// let series = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: ClusterProtocol> {
    config:       SimConfig,
    protocol:     P,
    nodes:        usize,
    placement:    Option<Placement>,
    radio:        RadioModel,
    positions:    Option<Vec<Point>>,
    base_station: Option<Point>,
}

impl<P: ClusterProtocol> SimBuilder<P> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, protocol: P) -> Self {
        Self {
            config,
            protocol,
            nodes:        DEFAULT_NODES,
            placement:    None,
            radio:        RadioModel::default(),
            positions:    None,
            base_station: None,
        }
    }

    pub fn nodes(mut self, count: usize) -> Self {
        self.nodes = count;
        self
    }

    /// Override the strategy's preferred deployment area.
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Radio constants; `radio.initial_energy` also sets every battery.
    pub fn radio(mut self, radio: RadioModel) -> Self {
        self.radio = radio;
        self
    }

    /// Supply explicit node positions (must be length `nodes`).  No random
    /// numbers are drawn for placement.
    pub fn positions(mut self, positions: Vec<Point>) -> Self {
        self.nodes = positions.len();
        self.positions = Some(positions);
        self
    }

    pub fn base_station(mut self, at: Point) -> Self {
        self.base_station = Some(at);
        self
    }

    /// Validate inputs, deploy the network from the run's random stream, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;
        self.protocol.validate()?;
        if self.radio.packet_bits == 0 {
            return Err(SimError::Config("packet size must be at least one bit".into()));
        }

        let placement = self.placement.unwrap_or_else(|| self.protocol.default_placement());
        let mut rng = SimRng::new(self.config.seed);

        let mut network = NetworkBuilder::new(self.nodes, placement)
            .initial_energy(self.radio.initial_energy);
        if let Some(p) = self.positions {
            network = network.positions(p);
        }
        if let Some(b) = self.base_station {
            network = network.base_station(b);
        }
        let network = network.build(&mut rng)?;

        Ok(Sim {
            config:   self.config,
            radio:    self.radio,
            network,
            protocol: self.protocol,
            rng,
            round:    Round::FIRST,
            records:  Vec::new(),
        })
    }
}
