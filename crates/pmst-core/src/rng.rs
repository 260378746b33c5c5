//! Seeded randomness for instance generation.
//!
//! Batches of random graphs are addressed as `(master_seed, substream)` pairs. The seed of a
//! substream is SipHash-1-3 (zero keys) over both words, so instance `k` of a batch can be
//! regenerated without replaying instances `0..k`.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;

use crate::cost::{CostType, CostVector};

/// Where the state of an [`RngHandle`] came from; recorded in run provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOrigin {
    /// Seeded directly.
    Master(u64),
    /// Seeded from substream `substream` of `master`.
    Substream {
        /// Batch seed.
        master: u64,
        /// Instance number inside the batch.
        substream: u64,
    },
}

/// `StdRng` tagged with its seed origin.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
    origin: SeedOrigin,
}

impl RngHandle {
    /// Seeds directly from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            origin: SeedOrigin::Master(seed),
        }
    }

    /// Seeds instance `substream` of the batch `master_seed`.
    pub fn for_substream(master_seed: u64, substream: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(derive_substream_seed(master_seed, substream)),
            origin: SeedOrigin::Substream {
                master: master_seed,
                substream,
            },
        }
    }

    /// How this handle was seeded.
    pub fn origin(&self) -> SeedOrigin {
        self.origin
    }

    /// Draws a cost vector whose components are uniform in `1..=max_cost`.
    ///
    /// `max_cost` must be at least 1; generators validate it before drawing.
    pub fn cost_vector<const D: usize>(&mut self, max_cost: CostType) -> CostVector<D> {
        let upper = max_cost.max(1);
        let mut components = [0; D];
        for slot in components.iter_mut() {
            *slot = self.rng.gen_range(1..=upper);
        }
        CostVector::new(components)
    }

    /// Shuffles `items` in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Seed of instance `substream` within the batch `master_seed`.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_vectors_stay_in_range() {
        let mut rng = RngHandle::from_seed(3);
        for _ in 0..200 {
            let cost: CostVector<3> = rng.cost_vector(4);
            assert!(cost.components().iter().all(|c| (1..=4).contains(c)));
        }
        assert_eq!(rng.origin(), SeedOrigin::Master(3));
    }
}
