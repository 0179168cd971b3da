//! Collision-coalescence, breakup and rebound of superdroplet pairs
//!
//! The pairwise core takes two superdroplets, a collision probability and a
//! uniform variate, and mutates the pair in place. It never owns a random
//! generator and never removes superdroplets; a voided superdroplet is
//! reported to the caller with multiplicity exactly zero.
//!
//! # Scientific References
//!
//! - Shima, S., Kusano, K., Kawano, A., Sugiyama, T., Kawahara, S. (2009).
//!   "The super-droplet method for the numerical simulation of clouds and
//!   precipitation." Q. J. R. Meteorol. Soc., 135, 1307-1320.

pub mod breakup;
pub mod coalescence;
pub mod enact;
pub mod gamma;
pub mod nfrags;
pub mod outcome;
pub mod pass;
pub mod probability;

pub use breakup::DoBreakup;
pub use coalescence::DoCoalescence;
pub use enact::{
    BreakupOnly, CoalBreakup, CoalBuRe, CoalNoBuRe, CoalOnly, CoalRebound, PairEnact, PolicyKind,
};
pub use gamma::collision_gamma;
pub use nfrags::{CollisionKineticEnergyNFrags, ConstNFrags, NFragments, NFragsModel};
pub use outcome::{ClassifierModel, CollisionOutcome, ConstClassifier, OutcomeClassifier, TsClassifier};
pub use pass::{remove_void_superdrops, scale_factor, DoCollisions};
pub use probability::{GolovinProb, LongHydroProb, PairProbability, ProbabilityModel};

use crate::core_types::Superdrop;

/// Order a pair as (donor, receiver)
///
/// The donor has the larger multiplicity; on a tie `drop1` is the donor.
#[inline]
pub(crate) fn order_by_multiplicity<'a>(
    drop1: &'a mut Superdrop,
    drop2: &'a mut Superdrop,
) -> (&'a mut Superdrop, &'a mut Superdrop) {
    if drop1.xi() >= drop2.xi() {
        (drop1, drop2)
    } else {
        (drop2, drop1)
    }
}
