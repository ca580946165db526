//! `wsn-sim`: the round engine of the wsn lifetime simulator.
//!
//! # Round loop
//!
//! ```text
//! for round in 1..=config.total_rounds:
//!   if no node is alive: stop
//!   ① Reset    : clear roles and cluster assignments.
//!   ② Elect    : ClusterProtocol::elect_heads, highest-energy fallback.
//!   ③ Assign   : ClusterProtocol::assign_members.
//!   ④ Members  : one packet per alive member to its alive head.
//!   ⑤ Route    : ClusterProtocol::route_to_base.
//!   ⑥ Sweep    : flag dead nodes, record (round, alive, residual).
//! pad the series with (0 alive, 0 J) rows up to total_rounds
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`batch::run_all`] runs protocols on Rayon's pool.     |
//! | `fx-hash`  | FxHash for the per-node value tables.                  |
//! | `serde`    | Serde derives on records and batch inputs.             |
//!
//! # Quick-start
//!
//! ```rust
//! use wsn_core::SimConfig;
//! use wsn_protocol::{Protocol, ProtocolKind};
//! use wsn_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig { total_rounds: 50, ..SimConfig::default() };
//! let mut sim = SimBuilder::new(config, Protocol::from_kind(ProtocolKind::Abose))
//!     .nodes(20)
//!     .build()
//!     .unwrap();
//! let series = sim.run(&mut NoopObserver).unwrap();
//! assert_eq!(series.len(), 50);
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod record;
pub mod sim;

#[cfg(test)]
mod tests;

pub use batch::{BatchSpec, SeedPolicy, run_all};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RoundObserver};
pub use record::{Lifetime, RoundRecord, RunOutcome};
pub use sim::Sim;
