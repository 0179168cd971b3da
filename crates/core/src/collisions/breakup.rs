//! Collision-breakup of a superdroplet pair
//!
//! Breakup redistributes water and solute between the two superdroplets and
//! leaves both multiplicities untouched. Each of the `ξ_s` colliding pairs
//! fragments into `n` equal fragments; the receiver slot takes the size of one
//! fragment and the donor slot absorbs the rest of the pair's mass spread
//! over its `ξ_l` droplets:
//!
//! ```text
//! v_s' = (v_l + v_s) / n
//! v_l' = v_l + (ξ_s/ξ_l) · (v_s − v_s')
//! ```
//!
//! so `ξ_l·v_l' + ξ_s·v_s' = ξ_l·v_l + ξ_s·v_s`. The same rule applies to the
//! solute mass. For `n ≥ 1` and `ξ_l ≥ ξ_s` both new sizes are non-negative.
//!
//! Counts below one are raised to one. Counts in `[1, 2)` are enacted as
//! given even though the receiver then grows; configuration validation warns
//! about them (see `CollisionConfig::advisories`).

use super::nfrags::NFragments;
use super::order_by_multiplicity;
use crate::core_types::Superdrop;

/// Breakup operator drawing its fragment count from `N`
#[derive(Debug, Clone, Copy, Default)]
pub struct DoBreakup<N: NFragments> {
    nfrags: N,
}

impl<N: NFragments> DoBreakup<N> {
    pub fn new(nfrags: N) -> Self {
        Self { nfrags }
    }

    pub fn nfrags_model(&self) -> &N {
        &self.nfrags
    }

    /// Break up the pair in place
    ///
    /// On equal multiplicities `drop1` is the donor. Void superdroplets are
    /// left untouched.
    pub fn breakup_superdroplet_pair(&self, drop1: &mut Superdrop, drop2: &mut Superdrop) {
        if drop1.is_void() || drop2.is_void() {
            return;
        }

        let (donor, receiver) = order_by_multiplicity(drop1, drop2);
        // f64::max drops a NaN operand
        let nfrags = self.nfrags.nfrags(donor, receiver).max(1.0);
        let ratio = receiver.xi() as f64 / donor.xi() as f64;

        let frag_rcubed = (donor.rcubed() + receiver.rcubed()) / nfrags;
        let frag_msol = (donor.msol() + receiver.msol()) / nfrags;

        let donor_rcubed = donor.rcubed() + ratio * (receiver.rcubed() - frag_rcubed);
        let donor_msol = donor.msol() + ratio * (receiver.msol() - frag_msol);

        donor.set_rcubed(donor_rcubed);
        donor.set_msol(donor_msol);
        receiver.set_rcubed(frag_rcubed);
        receiver.set_msol(frag_msol);
    }
}
