//! One collision pass over the superdroplets of a gridbox
//!
//! Candidate pairs are formed by shuffling the gridbox's superdroplets and
//! pairing neighbours, so each superdroplet is in at most one pair per pass
//! (Shima et al. 2009, linear sampling). The random generator belongs to the
//! caller: a pass draws exactly one uniform variate per pair.

use super::enact::PairEnact;
use super::probability::PairProbability;
use crate::core_types::Superdrop;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

/// Shima et al. (2009) ratio of candidate pairs to sampled pairs
///
/// ```text
/// s = n(n−1)/2 / ⌊n/2⌋
/// ```
pub fn scale_factor(nsupers: usize) -> f64 {
    if nsupers < 2 {
        return 0.0;
    }
    let n = nsupers as f64;
    let npairs = (nsupers / 2) as f64;
    n * (n - 1.0) / 2.0 / npairs
}

/// Collision process: a probability model composed with an enactment policy
#[derive(Debug, Clone)]
pub struct DoCollisions<P: PairProbability, E: PairEnact> {
    delt: f64,
    probability: P,
    enact: E,
}

impl<P: PairProbability, E: PairEnact> DoCollisions<P, E> {
    /// # Arguments
    ///
    /// * `delt` - Collision timestep (s)
    /// * `probability` - Collision probability model
    /// * `enact` - Pairwise enactment policy
    pub fn new(delt: f64, probability: P, enact: E) -> Self {
        Self {
            delt,
            probability,
            enact,
        }
    }

    pub fn delt(&self) -> f64 {
        self.delt
    }

    pub fn probability_model(&self) -> &P {
        &self.probability
    }

    pub fn policy(&self) -> &E {
        &self.enact
    }

    /// Collide the superdroplets of one gridbox of `volume` m³
    ///
    /// Voided superdroplets stay in the slice with zero multiplicity.
    ///
    /// # Returns
    ///
    /// Number of superdroplets voided in this pass
    pub fn collide_superdrops<R: Rng + ?Sized>(
        &self,
        drops: &mut [Superdrop],
        volume: f64,
        rng: &mut R,
    ) -> usize {
        let nsupers = drops.len();
        if nsupers < 2 {
            return 0;
        }

        drops.shuffle(rng);
        let scale = scale_factor(nsupers);

        let mut nvoid = 0;
        for pair in drops.chunks_exact_mut(2) {
            let (first, second) = pair.split_at_mut(1);
            let (drop1, drop2) = (&mut first[0], &mut second[0]);

            let prob = self
                .probability
                .probability(drop1, drop2, scale, self.delt, volume);
            let phi: f64 = rng.random();
            if self.enact.enact(drop1, drop2, prob, phi) {
                nvoid += 1;
            }
        }
        nvoid
    }

    /// Collide every gridbox of an ensemble in parallel, then purge voids
    ///
    /// Superdroplets are grouped by gridbox index; each gridbox draws from its
    /// own generator seeded from `seed` and the gridbox index, so the result
    /// is independent of thread scheduling.
    ///
    /// # Returns
    ///
    /// Number of superdroplets removed
    pub fn collide_gridboxes(&self, drops: &mut Vec<Superdrop>, volume: f64, seed: u64) -> usize {
        drops.sort_by_key(Superdrop::sdgbxindex);

        let gridboxes: Vec<&mut [Superdrop]> = drops
            .chunk_by_mut(|a, b| a.sdgbxindex() == b.sdgbxindex())
            .collect();
        let ngbxs = gridboxes.len();

        let nvoid: usize = gridboxes
            .into_par_iter()
            .map(|gbx| {
                let gbxindex = gbx[0].sdgbxindex();
                let mut rng = StdRng::seed_from_u64(gridbox_seed(seed, gbxindex));
                self.collide_superdrops(gbx, volume, &mut rng)
            })
            .sum();

        let removed = remove_void_superdrops(drops);
        debug!(
            "Collision pass: {} gridboxes, {} superdroplets voided, {} remain",
            ngbxs,
            nvoid,
            drops.len()
        );
        removed
    }
}

/// Derive a per-gridbox seed (splitmix64 finaliser)
fn gridbox_seed(seed: u64, gbxindex: u32) -> u64 {
    let mut z = seed ^ u64::from(gbxindex).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Remove every superdroplet with zero multiplicity
///
/// # Returns
///
/// Number of superdroplets removed
pub fn remove_void_superdrops(drops: &mut Vec<Superdrop>) -> usize {
    let before = drops.len();
    drops.retain(|drop| !drop.is_void());
    before - drops.len()
}
