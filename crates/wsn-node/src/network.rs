//! The deployed network: node population plus base station.

use wsn_core::{NodeId, Point};

use crate::NodeStore;

/// Deployment area and placement policy.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Placement {
    /// Uniform `x, y` in `[0, side]²`; base station at the area centre.
    Square { side: f64 },
    /// Uniform over a disc of `radius` centred on the origin (`r = R·sqrt(u)`);
    /// base station at the origin.
    Disc { radius: f64 },
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Square { side: 100.0 }
    }
}

impl Placement {
    /// Where the base station sits for this area model.
    pub fn base_station(&self) -> Point {
        match *self {
            Placement::Square { side } => Point::new(side / 2.0, side / 2.0),
            Placement::Disc { .. } => Point::new(0.0, 0.0),
        }
    }

    /// Largest possible node-to-base distance inside the area.
    pub fn max_base_distance(&self) -> f64 {
        match *self {
            Placement::Square { side } => (side / 2.0).hypot(side / 2.0),
            Placement::Disc { radius } => radius,
        }
    }

    /// Characteristic length: the square's side or the disc's radius.
    pub fn extent(&self) -> f64 {
        match *self {
            Placement::Square { side } => side,
            Placement::Disc { radius } => radius,
        }
    }
}

/// A fixed-cardinality node population and its data sink.
pub struct Network {
    pub nodes:        NodeStore,
    pub base_station: Point,
    pub placement:    Placement,
    /// Population size at deployment.  Never changes, even as nodes die.
    pub initial_count: usize,
    /// Battery charge every node started with.
    pub initial_energy: f64,
}

impl Network {
    /// Distance from `node` to the base station.
    #[inline]
    pub fn distance_to_base(&self, node: NodeId) -> f64 {
        self.nodes.position_of(node).distance(self.base_station)
    }

    #[inline]
    pub fn alive_count(&self) -> usize {
        self.nodes.alive_count()
    }

    #[inline]
    pub fn residual_energy(&self) -> f64 {
        self.nodes.residual_energy()
    }

    /// `true` once every node is dead.
    #[inline]
    pub fn is_dead(&self) -> bool {
        !self.nodes.alive.iter().any(|&a| a)
    }
}
