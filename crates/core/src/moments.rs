//! Moments of the droplet mass distribution
//!
//! Collisions must conserve the first moment (total mass). Coalescence lowers
//! the zeroth moment (droplet number) and raises the second.

use crate::core_types::Superdrop;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Mass moments of an ensemble of superdroplets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassMoments {
    /// Number of non-void superdroplets
    pub nsupers: usize,
    /// Σ ξ, number of real droplets
    pub mom0: f64,
    /// Σ ξ·m, total mass (kg)
    pub mom1: f64,
    /// Σ ξ·m² (kg²)
    pub mom2: f64,
}

impl MassMoments {
    /// Moments of every superdroplet in `drops`
    pub fn of(drops: &[Superdrop]) -> Self {
        drops.iter().fold(Self::default(), |mut acc, drop| {
            acc.add(drop);
            acc
        })
    }

    /// Moments of each gridbox, keyed by gridbox index
    pub fn per_gridbox(drops: &[Superdrop]) -> FxHashMap<u32, Self> {
        let mut moments: FxHashMap<u32, Self> = FxHashMap::default();
        for drop in drops {
            moments.entry(drop.sdgbxindex()).or_default().add(drop);
        }
        moments
    }

    fn add(&mut self, drop: &Superdrop) {
        if drop.is_void() {
            return;
        }
        let xi = drop.xi() as f64;
        let mass = drop.mass();
        self.nsupers += 1;
        self.mom0 += xi;
        self.mom1 += xi * mass;
        self.mom2 += xi * mass * mass;
    }

    /// Mean mass of a real droplet, zero for an empty ensemble
    pub fn mean_mass(&self) -> f64 {
        if self.mom0 > 0.0 {
            self.mom1 / self.mom0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_void_superdroplets_are_ignored() {
        let drops = vec![
            Superdrop::with_attrs(0, 4, 1e-5, 0.0),
            Superdrop::with_attrs(1, 0, 1e-3, 0.0),
        ];
        let moments = MassMoments::of(&drops);
        assert_eq!(moments.nsupers, 1);
        assert_eq!(moments.mom0, 4.0);
        assert_relative_eq!(moments.mom1, 4.0 * drops[0].mass(), max_relative = 1e-14);
        assert_relative_eq!(moments.mean_mass(), drops[0].mass(), max_relative = 1e-14);
    }

    #[test]
    fn test_per_gridbox_moments_sum_to_total() {
        let mut drops: Vec<Superdrop> = (0..6)
            .map(|i| Superdrop::with_attrs(i, 10 + i, 1e-5 * (i + 1) as f64, 0.0))
            .collect();
        for (i, drop) in drops.iter_mut().enumerate() {
            drop.set_sdgbxindex((i % 3) as u32);
        }

        let total = MassMoments::of(&drops);
        let per_gbx = MassMoments::per_gridbox(&drops);
        assert_eq!(per_gbx.len(), 3);
        let summed: f64 = per_gbx.values().map(|m| m.mom1).sum();
        assert_relative_eq!(summed, total.mom1, max_relative = 1e-12);
    }

    #[test]
    fn test_empty_ensemble() {
        let moments = MassMoments::of(&[]);
        assert_eq!(moments, MassMoments::default());
        assert_eq!(moments.mean_mass(), 0.0);
    }
}
