//! Monte-Carlo multiplicity-transfer factor
//!
//! Shima et al. (2009) enact a real-valued expected number of collision events
//! per representative pair with a single uniform draw: the integer part is
//! always enacted and the fractional part is enacted with matching probability.
//!
//! # Scientific References
//!
//! - Shima, S., Kusano, K., Kawano, A., Sugiyama, T., Kawahara, S. (2009).
//!   "The super-droplet method for the numerical simulation of clouds and
//!   precipitation." Q. J. R. Meteorol. Soc., 135, 1307-1320. (Section 5.1.3)

use tracing::debug;

/// Number of collision events to enact for a pair this timestep
///
/// ```text
/// γ = ⌊p⌋ + 1   if φ < p − ⌊p⌋
/// γ = ⌊p⌋       otherwise
/// ```
///
/// The result never exceeds `max(xi1, xi2)`. A NaN or negative `prob` is
/// treated as zero.
///
/// # Arguments
///
/// * `xi1`, `xi2` - Multiplicities of the pair
/// * `prob` - Expected number of collision events (may exceed 1)
/// * `phi` - Uniform variate in [0, 1)
pub fn collision_gamma(xi1: u64, xi2: u64, prob: f64, phi: f64) -> u64 {
    debug_assert!((0.0..1.0).contains(&phi), "phi must lie in [0, 1), got {phi}");

    if prob.is_nan() || prob <= 0.0 {
        return 0;
    }

    let floor = prob.floor();
    let remainder = prob - floor;
    // float -> int casts saturate at u64::MAX
    let mut gamma = floor as u64;
    if phi < remainder {
        gamma = gamma.saturating_add(1);
    }

    let maxgamma = xi1.max(xi2);
    if gamma > maxgamma {
        debug!(gamma, maxgamma, prob, "clamping collision gamma to donor multiplicity");
        return maxgamma;
    }
    gamma
}
