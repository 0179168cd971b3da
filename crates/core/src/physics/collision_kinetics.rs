//! Energetics of a colliding droplet pair
//!
//! The collision kinetic energy (CKE) is compared against surface energies to
//! decide whether a collision has enough energy to create new surface.
//!
//! # Scientific References
//!
//! - Straub, W., Beheng, K.D., Seifert, A., Schlottke, J., Weigand, B. (2010).
//!   "Numerical investigation of collision-induced breakup of raindrops.
//!   Part II: Parameterizations of coalescence efficiencies and fragment size
//!   distributions." J. Atmos. Sci., 67, 576-588.
//! - Low, T.B., List, R. (1982). "Collision, coalescence and breakup of
//!   raindrops. Part I." J. Atmos. Sci., 39, 1591-1606.

use crate::core_types::constants::{RHO_L, SURFACE_TENSION, VOLUME_PREFACTOR};
use std::f64::consts::PI;

/// Collision kinetic energy of two droplets falling at their terminal speeds
///
/// ```text
/// CKE = ½ · m₁m₂/(m₁+m₂) · (v₁ − v₂)²
/// ```
///
/// # Arguments
///
/// * `r1`, `r2` - Droplet radii (m)
/// * `v1`, `v2` - Droplet fall speeds (m/s)
///
/// # Returns
///
/// CKE in joules, zero for a pair of zero-size droplets
pub fn collision_kinetic_energy(r1: f64, r2: f64, v1: f64, v2: f64) -> f64 {
    let m1 = RHO_L * VOLUME_PREFACTOR * r1.powi(3);
    let m2 = RHO_L * VOLUME_PREFACTOR * r2.powi(3);
    let total = m1 + m2;
    if total <= 0.0 {
        return 0.0;
    }

    let reduced_mass = m1 * m2 / total;
    let dv = v1 - v2;
    0.5 * reduced_mass * dv * dv
}

/// Surface energy of a sphere of radius `r` (J)
pub fn surface_energy(r: f64) -> f64 {
    4.0 * PI * SURFACE_TENSION * r * r
}

/// Combined surface energy of the two separate droplets, `S_T` (J)
pub fn total_surface_energy(r1: f64, r2: f64) -> f64 {
    surface_energy(r1) + surface_energy(r2)
}

/// Surface energy of the drop formed if the pair coalesces, `S_c` (J)
pub fn coalesced_surface_energy(r1: f64, r2: f64) -> f64 {
    let rcubed = r1.powi(3) + r2.powi(3);
    4.0 * PI * SURFACE_TENSION * rcubed.powf(2.0 / 3.0)
}

/// Collision Weber number, `We = CKE / S_c`
pub fn weber_number(cke: f64, r1: f64, r2: f64) -> f64 {
    let sc = coalesced_surface_energy(r1, r2);
    if sc <= 0.0 {
        return 0.0;
    }
    cke / sc
}

/// Straub et al. (2010) coalescence efficiency, `E_c = exp(−1.15 We)`
pub fn coalescence_efficiency(cke: f64, r1: f64, r2: f64) -> f64 {
    (-1.15 * weber_number(cke, r1, r2)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cke_vanishes_for_equal_speeds() {
        assert_eq!(collision_kinetic_energy(1e-3, 5e-4, 4.0, 4.0), 0.0);
        assert_eq!(collision_kinetic_energy(0.0, 0.0, 1.0, 2.0), 0.0);
    }

    #[test]
    fn test_cke_is_symmetric() {
        let a = collision_kinetic_energy(1e-3, 2e-4, 6.5, 1.6);
        let b = collision_kinetic_energy(2e-4, 1e-3, 1.6, 6.5);
        assert_relative_eq!(a, b, max_relative = 1e-14);
    }

    #[test]
    fn test_coalesced_surface_below_total_surface() {
        // Merging always removes surface area
        let (r1, r2) = (1e-3, 4e-4);
        assert!(coalesced_surface_energy(r1, r2) < total_surface_energy(r1, r2));
    }

    #[test]
    fn test_coalescence_efficiency_bounds() {
        assert_relative_eq!(coalescence_efficiency(0.0, 1e-3, 1e-4), 1.0);
        let ec = coalescence_efficiency(1e-5, 1e-3, 1e-4);
        assert!(ec > 0.0 && ec < 1.0);
    }
}
