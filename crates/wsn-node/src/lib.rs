//! `wsn-node`: Structure-of-Arrays sensor node storage for the `wsn` simulator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`store`]       | `NodeStore` (SoA arrays), `Role`                          |
//! | [`values`]      | `ValueTable`: per-node learned next-hop values           |
//! | [`network`]     | `Network` (store + base station), `Placement`             |
//! | [`builder`]     | `NetworkBuilder` (randomised or explicit placement)       |
//! | [`error`]       | `NodeError`, `NodeResult`                                 |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `fx-hash`  | `ValueTable` uses FxHash instead of SipHash.               |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `Placement`.          |

pub mod builder;
pub mod error;
pub mod network;
pub mod store;
pub mod values;

#[cfg(test)]
mod tests;

pub use builder::NetworkBuilder;
pub use error::{NodeError, NodeResult};
pub use network::{Network, Placement};
pub use store::{NodeStore, Role};
pub use values::ValueTable;
