//! `wsn-core`: foundational types for the `wsn` network lifetime simulator.
//!
//! This crate is a dependency of every other `wsn-*` crate.  It has no
//! `wsn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `SectorId`                                  |
//! | [`geo`]         | `Point`, Euclidean distance, polar angle              |
//! | [`radio`]       | `RadioModel`: dual-slope transmit / receive costs    |
//! | [`time`]        | `Round`, `SimConfig`                                  |
//! | [`rng`]         | `SimRng`: the single per-run random stream           |
//! | [`error`]       | `WsnError`, `WsnResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to configuration types.     |

pub mod error;
pub mod geo;
pub mod ids;
pub mod radio;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{WsnError, WsnResult};
pub use geo::Point;
pub use ids::{NodeId, SectorId};
pub use radio::RadioModel;
pub use rng::SimRng;
pub use time::{Round, SimConfig};
