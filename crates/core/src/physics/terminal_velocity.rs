//! Droplet terminal fall speed
//!
//! # Scientific References
//!
//! - Simmel, M., Trautmann, T., Tetzlaff, G. (2002). "Numerical solution of the
//!   stochastic collection equation: comparison of the Linear Discrete Method
//!   with other methods." Atmospheric Research, 61, 135-148. (Table 2)
//! - Gunn, R., Kinzer, G.D. (1949). "The terminal velocity of fall for water
//!   droplets in stagnant air." J. Meteor., 6, 243-248.

use crate::core_types::constants::{RHO_L, VOLUME_PREFACTOR};
use crate::core_types::Superdrop;

/// Model for the terminal velocity of a droplet
pub trait TerminalVelocity: Send + Sync {
    /// Terminal fall speed of a droplet of `radius` metres (m/s, positive downwards)
    fn velocity(&self, radius: f64) -> f64;

    fn of(&self, drop: &Superdrop) -> f64 {
        self.velocity(drop.radius())
    }
}

/// Simmel et al. (2002) piecewise power law fitted to Gunn & Kinzer (1949)
///
/// ```text
/// v = α · m^β      (m in g, v in cm/s)
/// ```
///
/// | radius range (µm) | α        | β   |
/// |-------------------|----------|-----|
/// | r < 66.9          | 4.5795e5 | 2/3 |
/// | 66.9 ≤ r < 733    | 4962     | 1/3 |
/// | 733 ≤ r < 1745    | 1732     | 1/6 |
/// | r ≥ 1745          | 917      | 0   |
#[derive(Debug, Clone, Copy, Default)]
pub struct SimmelTerminalVelocity;

impl SimmelTerminalVelocity {
    const R1: f64 = 6.69e-5;
    const R2: f64 = 7.33e-4;
    const R3: f64 = 1.745e-3;
}

impl TerminalVelocity for SimmelTerminalVelocity {
    fn velocity(&self, radius: f64) -> f64 {
        if radius <= 0.0 {
            return 0.0;
        }

        // droplet mass in grams
        let mass_g = RHO_L * VOLUME_PREFACTOR * radius.powi(3) * 1000.0;

        let (alpha, beta) = if radius < Self::R1 {
            (4.5795e5, 2.0 / 3.0)
        } else if radius < Self::R2 {
            (4962.0, 1.0 / 3.0)
        } else if radius < Self::R3 {
            (1732.0, 1.0 / 6.0)
        } else {
            (917.0, 0.0)
        };

        // cm/s -> m/s
        alpha * mass_g.powf(beta) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_radius_does_not_fall() {
        assert_eq!(SimmelTerminalVelocity.velocity(0.0), 0.0);
    }

    #[test]
    fn test_fall_speed_increases_with_radius() {
        let tv = SimmelTerminalVelocity;
        let radii = [1e-6, 1e-5, 5e-5, 1e-4, 5e-4, 1e-3, 1.5e-3];
        for pair in radii.windows(2) {
            assert!(
                tv.velocity(pair[0]) < tv.velocity(pair[1]),
                "v({}) should be below v({})",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_large_drops_reach_maximum_speed() {
        let tv = SimmelTerminalVelocity;
        assert!((tv.velocity(2e-3) - 9.17).abs() < 1e-12);
        assert!((tv.velocity(4e-3) - 9.17).abs() < 1e-12);
    }

    #[test]
    fn test_drizzle_speed_matches_gunn_kinzer_order() {
        // Gunn & Kinzer: r = 100 µm falls at roughly 0.7 m/s
        let v = SimmelTerminalVelocity.velocity(1e-4);
        assert!(v > 0.5 && v < 1.0, "v = {v}");
    }
}
