//! First-order radio energy model.
//!
//! # Model
//!
//! Transmitting `k` bits over `d` metres costs
//!
//! ```text
//!   E_tx(k, d) = k·E_elec + k·E_fs·d²    if d ≤ d0   (free space)
//!              = k·E_elec + k·E_mp·d⁴    if d > d0   (multipath)
//!
//!   d0 = sqrt(E_fs / E_mp)
//! ```
//!
//! Receiving `k` bits costs `k·E_elec`; fusing `k` bits at a cluster head
//! costs `k·E_da`.  Every protocol runs against the same constants.

/// Electronics energy per bit (J/bit).
pub const E_ELEC: f64 = 50e-9;
/// Free-space amplifier coefficient (J/bit/m²).
pub const E_FS: f64 = 10e-12;
/// Multipath amplifier coefficient (J/bit/m⁴).
pub const E_MP: f64 = 0.0013e-12;
/// Data aggregation energy per bit (J/bit).
pub const E_DA: f64 = 0.5e-9;
/// Bits in one sensor reading.
pub const PACKET_BITS: u64 = 4_000;
/// Battery charge of a freshly deployed node (J).
pub const INITIAL_ENERGY: f64 = 0.5;

/// Radio constants plus the derived crossover distance.
///
/// `RadioModel` is `Copy` and holds no heap data; every protocol receives the
/// same instance through the round context.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadioModel {
    pub e_elec:         f64,
    pub e_fs:           f64,
    pub e_mp:           f64,
    pub e_da:           f64,
    pub packet_bits:    u64,
    pub initial_energy: f64,
}

impl Default for RadioModel {
    fn default() -> Self {
        Self {
            e_elec:         E_ELEC,
            e_fs:           E_FS,
            e_mp:           E_MP,
            e_da:           E_DA,
            packet_bits:    PACKET_BITS,
            initial_energy: INITIAL_ENERGY,
        }
    }
}

impl RadioModel {
    /// Distance (m) at which attenuation switches from d² to d⁴.  ≈ 87.7 m
    /// with the default constants.
    #[inline]
    pub fn crossover_distance(&self) -> f64 {
        (self.e_fs / self.e_mp).sqrt()
    }

    /// Energy (J) to transmit `bits` over `distance` metres.
    ///
    /// The quadratic branch is used at exactly `distance == d0`.
    pub fn transmit_cost(&self, bits: u64, distance: f64) -> f64 {
        let k = bits as f64;
        if distance <= self.crossover_distance() {
            k * (self.e_elec + self.e_fs * distance * distance)
        } else {
            k * (self.e_elec + self.e_mp * distance.powi(4))
        }
    }

    /// Energy (J) to receive `bits`.
    #[inline]
    pub fn receive_cost(&self, bits: u64) -> f64 {
        bits as f64 * self.e_elec
    }

    /// Energy (J) a head spends fusing `members` packets of `bits_per_member`.
    #[inline]
    pub fn aggregation_cost(&self, members: usize, bits_per_member: u64) -> f64 {
        members as f64 * bits_per_member as f64 * self.e_da
    }

    /// Bits carried by `count` raw packets.
    #[inline]
    pub fn packets(&self, count: usize) -> u64 {
        count as u64 * self.packet_bits
    }
}
