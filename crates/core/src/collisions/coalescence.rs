//! Collision-coalescence of a superdroplet pair
//!
//! The superdroplet with the larger multiplicity (the donor) gives up
//! `γ·ξ_s` of its droplets; each droplet of the other superdroplet (the
//! receiver) absorbs γ of them. Three cases follow Shima et al. (2009):
//!
//! 1. `γ·ξ_s < ξ_l` - donor keeps `ξ_l − γ·ξ_s`, receiver grows
//! 2. `γ·ξ_s = ξ_l` - both slots take the merged droplet and share `ξ_s`
//! 3. `γ·ξ_s > ξ_l` - donor is used up entirely and left void
//!
//! In case 3 the receiver absorbs `ξ_l/ξ_s` donor droplets each, so the
//! represented mass is conserved even though fewer than γ events fit.

use super::gamma::collision_gamma;
use super::order_by_multiplicity;
use crate::core_types::Superdrop;

/// Coalescence operator
#[derive(Debug, Clone, Copy, Default)]
pub struct DoCoalescence;

impl DoCoalescence {
    /// Collision gamma for a coalescence pass, see [`collision_gamma`]
    #[inline]
    pub fn coalescence_gamma(&self, xi1: u64, xi2: u64, prob: f64, phi: f64) -> u64 {
        collision_gamma(xi1, xi2, prob, phi)
    }

    /// Enact `gamma` coalescence events between `drop1` and `drop2`
    ///
    /// On equal multiplicities `drop1` is the donor.
    ///
    /// # Returns
    ///
    /// `true` if one superdroplet was left with zero multiplicity
    pub fn coalesce_superdroplet_pair(
        &self,
        gamma: u64,
        drop1: &mut Superdrop,
        drop2: &mut Superdrop,
    ) -> bool {
        if gamma == 0 || drop1.is_void() || drop2.is_void() {
            return false;
        }

        let (donor, receiver) = order_by_multiplicity(drop1, drop2);
        let xi_l = donor.xi();
        let xi_s = receiver.xi();
        let transfer = gamma.saturating_mul(xi_s);

        if transfer < xi_l {
            different_superdroplet_coalescence(gamma, donor, receiver);
            false
        } else if transfer == xi_l && xi_s > 1 {
            twin_superdroplet_coalescence(gamma, donor, receiver);
            false
        } else {
            exhaustive_coalescence(donor, receiver);
            true
        }
    }
}

/// Case 1: the donor survives with reduced multiplicity
fn different_superdroplet_coalescence(gamma: u64, donor: &mut Superdrop, receiver: &mut Superdrop) {
    let g = gamma as f64;
    let new_rcubed = receiver.rcubed() + g * donor.rcubed();
    let new_msol = receiver.msol() + g * donor.msol();

    donor.set_xi(donor.xi() - gamma * receiver.xi());
    receiver.set_rcubed(new_rcubed);
    receiver.set_msol(new_msol);
}

/// Case 2: split the merged droplets over both slots
///
/// The donor slot keeps `⌈ξ_s/2⌉`, the receiver slot `⌊ξ_s/2⌋`.
fn twin_superdroplet_coalescence(gamma: u64, donor: &mut Superdrop, receiver: &mut Superdrop) {
    let g = gamma as f64;
    let new_rcubed = receiver.rcubed() + g * donor.rcubed();
    let new_msol = receiver.msol() + g * donor.msol();

    let old_xi = receiver.xi();
    let half = old_xi / 2;

    donor.set_xi(old_xi - half);
    receiver.set_xi(half);
    for drop in [donor, receiver] {
        drop.set_rcubed(new_rcubed);
        drop.set_msol(new_msol);
    }
}

/// Case 3: fold every donor droplet into the receiver and void the donor
fn exhaustive_coalescence(donor: &mut Superdrop, receiver: &mut Superdrop) {
    let share = donor.xi() as f64 / receiver.xi() as f64;
    let new_rcubed = receiver.rcubed() + share * donor.rcubed();
    let new_msol = receiver.msol() + share * donor.msol();

    receiver.set_rcubed(new_rcubed);
    receiver.set_msol(new_msol);
    donor.set_xi(0);
}
