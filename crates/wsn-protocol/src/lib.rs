//! `wsn-protocol`: cluster-head election and routing strategies.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`model`]       | `ClusterProtocol` trait: the per-round strategy contract       |
//! | [`context`]     | `RoundContext`, `HeadLoad`: read-only round inputs             |
//! | [`stats`]       | `RoundStats`: what routing did this round                      |
//! | [`election`]    | shared helpers: adaptive threshold, nearest head, fallback      |
//! | [`protocols`]   | the six strategies                                              |
//! | [`protocol`]    | `Protocol` tagged set + `ProtocolKind` names                    |
//! | [`error`]       | `ProtocolError`, `ProtocolResult<T>`                            |
//!
//! # Round contract
//!
//! The engine in `wsn-sim` drives every strategy through the same phases:
//!
//! 1. [`ClusterProtocol::elect_heads`]: pick this round's heads.
//! 2. Fallback: if nobody was elected but nodes are alive, the engine
//!    promotes the highest-energy node ([`election::fallback_head`]).
//! 3. [`ClusterProtocol::assign_members`]: attach every other alive node.
//! 4. Member → head transmission (engine-owned, gated by
//!    [`ClusterProtocol::member_can_send`]).
//! 5. [`ClusterProtocol::route_to_base`]: aggregation and forwarding.

pub mod context;
pub mod election;
pub mod error;
pub mod model;
pub mod protocol;
pub mod protocols;
pub mod stats;


pub use context::{HeadLoad, RoundContext};
pub use error::{ProtocolError, ProtocolResult};
pub use model::ClusterProtocol;
pub use protocol::{Protocol, ProtocolKind, ProtocolParams};
pub use stats::RoundStats;
