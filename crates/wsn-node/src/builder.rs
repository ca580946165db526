//! Fluent builder for constructing a [`Network`].
//!
//! # Usage
//!
//! ```rust
//! use wsn_core::SimRng;
//! use wsn_node::{NetworkBuilder, Placement};
//!
//! let mut rng = SimRng::new(42);
//! let net = NetworkBuilder::new(100, Placement::Square { side: 100.0 })
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(net.nodes.count, 100);
//! assert_eq!(net.alive_count(), 100);
//! ```

use std::f64::consts::TAU;

use wsn_core::radio::INITIAL_ENERGY;
use wsn_core::{Point, SimRng};

use crate::{Network, NodeError, NodeResult, NodeStore, Placement};

/// Fluent builder for [`Network`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                  |
/// |------------------------|------------------------------------------|
/// | `.initial_energy(e)`   | `0.5` J                                  |
/// | `.base_station(p)`     | `placement.base_station()`               |
/// | `.positions(v)`        | random draw from the placement policy    |
pub struct NetworkBuilder {
    count:          usize,
    placement:      Placement,
    initial_energy: f64,
    base_station:   Option<Point>,
    positions:      Option<Vec<Point>>,
}

impl NetworkBuilder {
    pub fn new(count: usize, placement: Placement) -> Self {
        Self {
            count,
            placement,
            initial_energy: INITIAL_ENERGY,
            base_station:   None,
            positions:      None,
        }
    }

    pub fn initial_energy(mut self, joules: f64) -> Self {
        self.initial_energy = joules;
        self
    }

    /// Override the placement's default base-station position.
    pub fn base_station(mut self, at: Point) -> Self {
        self.base_station = Some(at);
        self
    }

    /// Supply explicit node positions instead of a random draw.
    ///
    /// Must be length `count`.  No random numbers are consumed for placement
    /// when positions are given.
    pub fn positions(mut self, positions: Vec<Point>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate inputs, place the nodes, and return a ready [`Network`].
    pub fn build(self, rng: &mut SimRng) -> NodeResult<Network> {
        if self.count == 0 {
            return Err(NodeError::Config("network needs at least one node".into()));
        }
        if !(self.placement.extent() > 0.0) {
            return Err(NodeError::Config(format!(
                "deployment area must be positive, got {}",
                self.placement.extent()
            )));
        }
        if !(self.initial_energy > 0.0) {
            return Err(NodeError::Config(format!(
                "initial energy must be positive, got {}",
                self.initial_energy
            )));
        }

        let positions = match self.positions {
            Some(p) => {
                if p.len() != self.count {
                    return Err(NodeError::NodeCountMismatch {
                        expected: self.count,
                        got:      p.len(),
                        what:     "node positions",
                    });
                }
                p
            }
            None => place(self.count, self.placement, rng),
        };

        Ok(Network {
            nodes:          NodeStore::new(positions, self.initial_energy),
            base_station:   self.base_station.unwrap_or_else(|| self.placement.base_station()),
            placement:      self.placement,
            initial_count:  self.count,
            initial_energy: self.initial_energy,
        })
    }
}

/// Draw `count` positions from `placement`.
///
/// Per node, a square draws `x` then `y`; a disc draws the radius variate
/// then the angle variate.
pub fn place(count: usize, placement: Placement, rng: &mut SimRng) -> Vec<Point> {
    match placement {
        Placement::Square { side } => (0..count)
            .map(|_| {
                let x = rng.gen_range(0.0..=side);
                let y = rng.gen_range(0.0..=side);
                Point::new(x, y)
            })
            .collect(),
        Placement::Disc { radius } => {
            let center = placement.base_station();
            (0..count)
                .map(|_| {
                    let r = radius * rng.random::<f64>().sqrt();
                    let theta = rng.random::<f64>() * TAU;
                    Point::from_polar(center, r, theta)
                })
                .collect()
        }
    }
}
