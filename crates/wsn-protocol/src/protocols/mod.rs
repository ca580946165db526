//! The six strategies.
//!
//! | Module          | Strategy                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`abose`]       | energy-weighted adaptive threshold, direct forwarding          |
//! | [`cs_abose`]    | threshold + location weighting, compressed forwarding          |
//! | [`sector`]      | fixed angular sectors, priority-scored heads                   |
//! | [`eerpms`]      | per-round optimal sector count and head ring (disc area)       |
//! | [`mrp_gtco`]    | game-theoretic candidacy, greedy cover, single relay           |
//! | [`rlbeep`]      | fixed-probability heads, Q-learning multi-hop routing          |

pub mod abose;
pub mod cs_abose;
pub mod eerpms;
pub mod mrp_gtco;
pub mod rlbeep;
pub mod sector;

mod sectors;

pub use abose::{Abose, AboseParams};
pub use cs_abose::{CsAbose, CsAboseParams};
pub use eerpms::{Eerpms, EerpmsParams};
pub use mrp_gtco::{MrpGtco, MrpGtcoParams};
pub use rlbeep::{Rlbeep, RlbeepParams};
pub use sector::{SectorPriority, SectorPriorityParams};
