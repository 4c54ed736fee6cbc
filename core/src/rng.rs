//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through StreamRng instances derived from the
//! single master seed supplied at run start.
//!
//! Each customer owns one RNG stream per concern (profile sampling,
//! loan-set sampling, the daily engine), seeded deterministically from
//! (master_seed, customer_index, stream slot). This means:
//!   - Customers can be simulated on worker threads in any order
//!     without changing each other's draws.
//!   - Any single customer's run is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

const CUSTOMER_MIX: u64 = 0x9e37_79b9_7f4a_7c15;
const SLOT_MIX: u64 = 0xbf58_476d_1ce4_e5b9;

/// A named, deterministic RNG for a single customer stream.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Derive a stream from the master seed, a customer index, and a
    /// stable slot. The slot assignments must never change once made.
    pub fn new(master_seed: u64, customer_index: u64, slot: StreamSlot) -> Self {
        let derived_seed = master_seed
            ^ customer_index.wrapping_mul(CUSTOMER_MIX)
            ^ (slot as u64).wrapping_mul(SLOT_MIX);
        Self {
            name: slot.name(),
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll an integer in [min, max], both ends inclusive.
    pub fn range_i64(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "range_i64: min > max");
        let span = (max - min) as u64 + 1;
        min + self.next_u64_below(span) as i64
    }

    /// Roll a float uniformly in [min, max).
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick a uniform element from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        &items[index]
    }

    /// Pick an index from a discrete distribution. Weights must sum
    /// to 1 — validated by `SimConfig::validate` before any run starts.
    pub fn weighted(&mut self, weights: &[f64]) -> usize {
        let roll = self.next_f64();
        let mut cumulative = 0.0;
        for (index, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if roll < cumulative {
                return index;
            }
        }
        weights.len() - 1
    }
}

/// All customer RNG streams for a single run, derived on demand.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_customer(&self, customer_index: u64, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.master_seed, customer_index, slot)
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every customer's seeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Profile = 0,
    Loans = 1,
    Engine = 2,
    // Add new streams here — append only.
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Loans => "loans",
            Self::Engine => "engine",
        }
    }
}
