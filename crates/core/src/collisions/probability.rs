//! Collision probability of a superdroplet pair
//!
//! For a pair in a volume `V` over a timestep `Δt` the expected number of
//! collision events enacted on the representative pair is
//!
//! ```text
//! p = s · max(ξ₁, ξ₂) · K(1, 2) · Δt / V
//! ```
//!
//! where `K` is the collision kernel and `s` the Shima et al. (2009) scale
//! factor for sampling only `⌊n/2⌋` of the `n(n−1)/2` candidate pairs.
//!
//! # Scientific References
//!
//! - Long, A.B. (1974). "Solutions to the droplet collection equation for
//!   polynomial kernels." J. Atmos. Sci., 31, 1040-1052.
//! - Golovin, A.M. (1963). "The solution of the coagulation equation for
//!   cloud droplets in a rising air current." Izv. Geophys. Ser., 5, 482-487.

use crate::core_types::Superdrop;
use crate::physics::terminal_velocity::{SimmelTerminalVelocity, TerminalVelocity};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Model of the collision kernel of a droplet pair
pub trait PairProbability: Send + Sync {
    /// Collision kernel `K` (m³/s)
    fn kernel(&self, drop1: &Superdrop, drop2: &Superdrop) -> f64;

    /// Expected number of collision events for the representative pair
    ///
    /// # Arguments
    ///
    /// * `scale_factor` - Ratio of candidate pairs to sampled pairs
    /// * `delt` - Collision timestep (s)
    /// * `volume` - Volume the pair shares (m³)
    fn probability(
        &self,
        drop1: &Superdrop,
        drop2: &Superdrop,
        scale_factor: f64,
        delt: f64,
        volume: f64,
    ) -> f64 {
        let xi_max = drop1.xi().max(drop2.xi()) as f64;
        scale_factor * xi_max * self.kernel(drop1, drop2) * delt / volume
    }
}

/// Hydrodynamic kernel with the Long (1974) collision efficiency
///
/// ```text
/// K = E_coll · E_coal · π (r₁ + r₂)² |v₁ − v₂|
/// E_coll = clamp(4.5e8 R² (1 − 3e-6/r), 1e-3, 1)   for R ≤ 50 µm
/// E_coll = 1                                       for R > 50 µm
/// ```
///
/// with `R` the larger and `r` the smaller radius in metres.
#[derive(Debug, Clone, Copy)]
pub struct LongHydroProb<T: TerminalVelocity = SimmelTerminalVelocity> {
    coaleff: f64,
    terminalv: T,
}

impl LongHydroProb {
    /// Long kernel with coalescence efficiency `coaleff`
    pub fn new(coaleff: f64) -> Self {
        Self {
            coaleff,
            terminalv: SimmelTerminalVelocity,
        }
    }
}

impl<T: TerminalVelocity> LongHydroProb<T> {
    const R_LIM: f64 = 5e-5;

    pub fn with_terminal_velocity(coaleff: f64, terminalv: T) -> Self {
        Self { coaleff, terminalv }
    }

    /// Long (1974) collision efficiency
    pub fn collision_efficiency(r1: f64, r2: f64) -> f64 {
        let big = r1.max(r2);
        let small = r1.min(r2);
        if big > Self::R_LIM {
            return 1.0;
        }
        if small <= 0.0 {
            return 1e-3;
        }
        (4.5e8 * big * big * (1.0 - 3e-6 / small)).clamp(1e-3, 1.0)
    }
}

impl<T: TerminalVelocity> PairProbability for LongHydroProb<T> {
    fn kernel(&self, drop1: &Superdrop, drop2: &Superdrop) -> f64 {
        let r1 = drop1.radius();
        let r2 = drop2.radius();
        let eff = Self::collision_efficiency(r1, r2) * self.coaleff;
        let sumr = r1 + r2;
        let dv = (self.terminalv.of(drop1) - self.terminalv.of(drop2)).abs();
        eff * PI * sumr * sumr * dv
    }
}

/// Golovin (1963) sum-of-masses kernel, `K = b (m₁ + m₂)`
#[derive(Debug, Clone, Copy, Default)]
pub struct GolovinProb;

impl GolovinProb {
    /// Golovin constant (m³ kg⁻¹ s⁻¹), 1500 cm³ g⁻¹ s⁻¹
    pub const B: f64 = 1.5;
}

impl PairProbability for GolovinProb {
    fn kernel(&self, drop1: &Superdrop, drop2: &Superdrop) -> f64 {
        Self::B * (drop1.mass() + drop2.mass())
    }
}

/// Runtime-selectable collision probability model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum ProbabilityModel {
    LongHydro { coaleff: f64 },
    Golovin,
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self::LongHydro { coaleff: 1.0 }
    }
}

impl PairProbability for ProbabilityModel {
    fn kernel(&self, drop1: &Superdrop, drop2: &Superdrop) -> f64 {
        match self {
            Self::LongHydro { coaleff } => LongHydroProb::new(*coaleff).kernel(drop1, drop2),
            Self::Golovin => GolovinProb.kernel(drop1, drop2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_long_efficiency_regimes() {
        type Long = LongHydroProb;
        assert_eq!(Long::collision_efficiency(1e-4, 1e-5), 1.0);
        // tiny collectee: efficiency floor
        assert_eq!(Long::collision_efficiency(2e-5, 1e-6), 1e-3);
        let e = Long::collision_efficiency(4e-5, 1e-5);
        assert_relative_eq!(e, 4.5e8 * 1.6e-9 * 0.7, max_relative = 1e-12);
    }

    #[test]
    fn test_equal_droplets_never_collide_under_long_kernel() {
        let a = Superdrop::with_attrs(0, 10, 3e-5, 0.0);
        let b = Superdrop::with_attrs(1, 10, 3e-5, 0.0);
        assert_eq!(LongHydroProb::new(1.0).kernel(&a, &b), 0.0);
    }

    #[test]
    fn test_probability_scales_with_multiplicity_and_timestep() {
        let a = Superdrop::with_attrs(0, 1000, 1e-4, 0.0);
        let b = Superdrop::with_attrs(1, 10, 2e-5, 0.0);
        let model = GolovinProb;
        let p1 = model.probability(&a, &b, 1.0, 1.0, 1.0);
        let p2 = model.probability(&a, &b, 2.0, 1.0, 1.0);
        let p3 = model.probability(&a, &b, 1.0, 1.0, 4.0);
        assert_relative_eq!(
            p1,
            1000.0 * GolovinProb::B * (a.mass() + b.mass()),
            max_relative = 1e-12
        );
        assert_relative_eq!(p2, 2.0 * p1, max_relative = 1e-12);
        assert_relative_eq!(p3, 0.25 * p1, max_relative = 1e-12);
    }

    #[test]
    fn test_model_defaults_to_long_kernel() {
        assert_eq!(ProbabilityModel::default(), ProbabilityModel::LongHydro { coaleff: 1.0 });
        let model: ProbabilityModel = serde_json::from_str(r#"{"model": "golovin"}"#).unwrap();
        assert_eq!(model, ProbabilityModel::Golovin);
    }
}
