//! Pairwise collision enactment policies
//!
//! Every policy follows the same two steps: compute the collision gamma from
//! the probability and the uniform variate φ, then (for γ ≠ 0) enact one of
//! the outcomes it can reach. The policies differ only in which outcomes are
//! reachable:
//!
//! | Policy          | Reachable outcomes             | Classifier result mapping      |
//! |-----------------|--------------------------------|--------------------------------|
//! | [`CoalOnly`]    | coalesce                       | not consulted                  |
//! | [`BreakupOnly`] | breakup                        | not consulted                  |
//! | [`CoalRebound`] | rebound, coalesce              | breakup → coalesce             |
//! | [`CoalBreakup`] | coalesce, breakup              | rebound → coalesce             |
//! | [`CoalBuRe`]    | rebound, coalesce, breakup     | used directly                  |
//! | [`CoalNoBuRe`]  | rebound, coalesce              | breakup → rebound              |
//!
//! The classifier receives the φ that already decided gamma.

use super::breakup::DoBreakup;
use super::coalescence::DoCoalescence;
use super::gamma::collision_gamma;
use super::nfrags::NFragments;
use super::outcome::{CollisionOutcome, OutcomeClassifier};
use crate::core_types::Superdrop;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Enact a collision between one pair of superdroplets
pub trait PairEnact: Send + Sync {
    /// Enact the collision of `drop1` and `drop2` in place
    ///
    /// # Arguments
    ///
    /// * `prob` - Expected number of collision events for the pair
    /// * `phi` - Uniform variate in [0, 1), drawn by the caller
    ///
    /// # Returns
    ///
    /// `true` if one of the pair now has zero multiplicity and must be removed
    fn enact(&self, drop1: &mut Superdrop, drop2: &mut Superdrop, prob: f64, phi: f64) -> bool;

    /// Which outcome subset this policy enacts
    fn kind(&self) -> PolicyKind;
}

impl<T: PairEnact + ?Sized> PairEnact for Box<T> {
    #[inline]
    fn enact(&self, drop1: &mut Superdrop, drop2: &mut Superdrop, prob: f64, phi: f64) -> bool {
        (**self).enact(drop1, drop2, prob, phi)
    }

    fn kind(&self) -> PolicyKind {
        (**self).kind()
    }
}

/// The collision policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PolicyKind {
    #[serde(rename = "coal-only")]
    CoalOnly,
    #[serde(rename = "breakup-only")]
    BreakupOnly,
    #[serde(rename = "coal-rebound")]
    CoalRebound,
    #[serde(rename = "coal-breakup")]
    CoalBreakup,
    #[default]
    #[serde(rename = "coal-breakup-rebound")]
    CoalBuRe,
    #[serde(rename = "coal-no-breakup-rebound")]
    CoalNoBuRe,
}

impl PolicyKind {
    pub const ALL: [Self; 6] = [
        Self::CoalOnly,
        Self::BreakupOnly,
        Self::CoalRebound,
        Self::CoalBreakup,
        Self::CoalBuRe,
        Self::CoalNoBuRe,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CoalOnly => "coal-only",
            Self::BreakupOnly => "breakup-only",
            Self::CoalRebound => "coal-rebound",
            Self::CoalBreakup => "coal-breakup",
            Self::CoalBuRe => "coal-breakup-rebound",
            Self::CoalNoBuRe => "coal-no-breakup-rebound",
        }
    }

    /// Whether this policy can ever enact `outcome`
    pub fn reaches(&self, outcome: CollisionOutcome) -> bool {
        matches!(
            (self, outcome),
            (Self::CoalOnly, CollisionOutcome::Coalesce)
                | (Self::BreakupOnly, CollisionOutcome::Breakup)
                | (
                    Self::CoalRebound | Self::CoalNoBuRe,
                    CollisionOutcome::Coalesce | CollisionOutcome::Rebound
                )
                | (
                    Self::CoalBreakup,
                    CollisionOutcome::Coalesce | CollisionOutcome::Breakup
                )
                | (Self::CoalBuRe, _)
        )
    }

    /// Whether this policy consults an outcome classifier
    pub fn uses_classifier(&self) -> bool {
        matches!(
            self,
            Self::CoalRebound | Self::CoalBreakup | Self::CoalBuRe | Self::CoalNoBuRe
        )
    }

    /// Outcome actually enacted when the classifier returns `outcome`
    ///
    /// Policies without a classifier always enact their single outcome.
    pub fn enacted(&self, outcome: CollisionOutcome) -> CollisionOutcome {
        match (self, outcome) {
            (Self::CoalOnly, _) => CollisionOutcome::Coalesce,
            (Self::BreakupOnly, _) => CollisionOutcome::Breakup,
            (Self::CoalNoBuRe, CollisionOutcome::Breakup) => CollisionOutcome::Rebound,
            (Self::CoalRebound | Self::CoalBreakup, o) if !self.reaches(o) => {
                CollisionOutcome::Coalesce
            }
            (_, o) => o,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = crate::SdmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::SdmError::InvalidConfig {
                field: "policy",
                message: format!("unknown collision policy '{s}'"),
            })
    }
}

/// Gamma for the pair as it stands before the collision
#[inline]
fn pair_gamma(drop1: &Superdrop, drop2: &Superdrop, prob: f64, phi: f64) -> u64 {
    collision_gamma(drop1.xi(), drop2.xi(), prob, phi)
}

/// Collision-coalescence only
#[derive(Debug, Clone, Copy, Default)]
pub struct CoalOnly {
    coal: DoCoalescence,
}

impl CoalOnly {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PairEnact for CoalOnly {
    fn enact(&self, drop1: &mut Superdrop, drop2: &mut Superdrop, prob: f64, phi: f64) -> bool {
        let gamma = pair_gamma(drop1, drop2, prob, phi);
        if gamma == 0 {
            return false;
        }
        trace!(gamma, "coalesce");
        self.coal.coalesce_superdroplet_pair(gamma, drop1, drop2)
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::CoalOnly
    }
}

/// Collision-breakup only; never voids a superdroplet
#[derive(Debug, Clone, Copy)]
pub struct BreakupOnly<N: NFragments> {
    bu: DoBreakup<N>,
}

impl<N: NFragments> BreakupOnly<N> {
    pub fn new(nfrags: N) -> Self {
        Self {
            bu: DoBreakup::new(nfrags),
        }
    }
}

impl<N: NFragments> PairEnact for BreakupOnly<N> {
    fn enact(&self, drop1: &mut Superdrop, drop2: &mut Superdrop, prob: f64, phi: f64) -> bool {
        let gamma = pair_gamma(drop1, drop2, prob, phi);
        if gamma != 0 {
            trace!(gamma, "breakup");
            self.bu.breakup_superdroplet_pair(drop1, drop2);
        }
        false
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::BreakupOnly
    }
}

/// Coalescence or rebound; breakup is enacted as coalescence
#[derive(Debug, Clone, Copy)]
pub struct CoalRebound<F: OutcomeClassifier> {
    coal: DoCoalescence,
    classifier: F,
}

impl<F: OutcomeClassifier> CoalRebound<F> {
    pub fn new(classifier: F) -> Self {
        Self {
            coal: DoCoalescence,
            classifier,
        }
    }
}

impl<F: OutcomeClassifier> PairEnact for CoalRebound<F> {
    fn enact(&self, drop1: &mut Superdrop, drop2: &mut Superdrop, prob: f64, phi: f64) -> bool {
        let gamma = pair_gamma(drop1, drop2, prob, phi);
        if gamma == 0 {
            return false;
        }

        match self.classifier.classify(phi, drop1, drop2) {
            CollisionOutcome::Rebound => {
                trace!(gamma, "rebound");
                false
            }
            CollisionOutcome::Coalesce | CollisionOutcome::Breakup => {
                trace!(gamma, "coalesce");
                self.coal.coalesce_superdroplet_pair(gamma, drop1, drop2)
            }
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::CoalRebound
    }
}

/// Coalescence or breakup; rebound is enacted as coalescence
#[derive(Debug, Clone, Copy)]
pub struct CoalBreakup<N: NFragments, F: OutcomeClassifier> {
    coal: DoCoalescence,
    bu: DoBreakup<N>,
    classifier: F,
}

impl<N: NFragments, F: OutcomeClassifier> CoalBreakup<N, F> {
    pub fn new(nfrags: N, classifier: F) -> Self {
        Self {
            coal: DoCoalescence,
            bu: DoBreakup::new(nfrags),
            classifier,
        }
    }
}

impl<N: NFragments, F: OutcomeClassifier> PairEnact for CoalBreakup<N, F> {
    fn enact(&self, drop1: &mut Superdrop, drop2: &mut Superdrop, prob: f64, phi: f64) -> bool {
        let gamma = pair_gamma(drop1, drop2, prob, phi);
        if gamma == 0 {
            return false;
        }

        match self.classifier.classify(phi, drop1, drop2) {
            CollisionOutcome::Breakup => {
                trace!(gamma, "breakup");
                self.bu.breakup_superdroplet_pair(drop1, drop2);
                false
            }
            CollisionOutcome::Coalesce | CollisionOutcome::Rebound => {
                trace!(gamma, "coalesce");
                self.coal.coalesce_superdroplet_pair(gamma, drop1, drop2)
            }
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::CoalBreakup
    }
}

/// Coalescence, breakup or rebound as the classifier decides
#[derive(Debug, Clone, Copy)]
pub struct CoalBuRe<N: NFragments, F: OutcomeClassifier> {
    coal: DoCoalescence,
    bu: DoBreakup<N>,
    classifier: F,
}

impl<N: NFragments, F: OutcomeClassifier> CoalBuRe<N, F> {
    pub fn new(nfrags: N, classifier: F) -> Self {
        Self {
            coal: DoCoalescence,
            bu: DoBreakup::new(nfrags),
            classifier,
        }
    }
}

impl<N: NFragments, F: OutcomeClassifier> PairEnact for CoalBuRe<N, F> {
    fn enact(&self, drop1: &mut Superdrop, drop2: &mut Superdrop, prob: f64, phi: f64) -> bool {
        let gamma = pair_gamma(drop1, drop2, prob, phi);
        if gamma == 0 {
            return false;
        }

        let outcome = self.classifier.classify(phi, drop1, drop2);
        trace!(gamma, ?outcome, "enact");
        match outcome {
            CollisionOutcome::Rebound => false,
            CollisionOutcome::Coalesce => self.coal.coalesce_superdroplet_pair(gamma, drop1, drop2),
            CollisionOutcome::Breakup => {
                self.bu.breakup_superdroplet_pair(drop1, drop2);
                false
            }
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::CoalBuRe
    }
}

/// Coalescence or rebound; breakup is enacted as rebound
///
/// Collisions energetic enough to break up bounce apart instead.
#[derive(Debug, Clone, Copy)]
pub struct CoalNoBuRe<F: OutcomeClassifier> {
    coal: DoCoalescence,
    classifier: F,
}

impl<F: OutcomeClassifier> CoalNoBuRe<F> {
    pub fn new(classifier: F) -> Self {
        Self {
            coal: DoCoalescence,
            classifier,
        }
    }
}

impl<F: OutcomeClassifier> PairEnact for CoalNoBuRe<F> {
    fn enact(&self, drop1: &mut Superdrop, drop2: &mut Superdrop, prob: f64, phi: f64) -> bool {
        let gamma = pair_gamma(drop1, drop2, prob, phi);
        if gamma == 0 {
            return false;
        }

        match self.classifier.classify(phi, drop1, drop2) {
            CollisionOutcome::Coalesce => {
                trace!(gamma, "coalesce");
                self.coal.coalesce_superdroplet_pair(gamma, drop1, drop2)
            }
            CollisionOutcome::Rebound | CollisionOutcome::Breakup => {
                trace!(gamma, "rebound");
                false
            }
        }
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::CoalNoBuRe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collisions::nfrags::ConstNFrags;
    use crate::collisions::outcome::ConstClassifier;

    fn pair() -> (Superdrop, Superdrop) {
        (
            Superdrop::with_attrs(0, 100, 2e-5, 1e-18),
            Superdrop::with_attrs(1, 40, 1e-5, 1e-18),
        )
    }

    fn policies(outcome: CollisionOutcome) -> Vec<Box<dyn PairEnact>> {
        let nfrags = ConstNFrags::new(4.0);
        let flag = ConstClassifier(outcome);
        vec![
            Box::new(CoalOnly::new()),
            Box::new(BreakupOnly::new(nfrags)),
            Box::new(CoalRebound::new(flag)),
            Box::new(CoalBreakup::new(nfrags, flag)),
            Box::new(CoalBuRe::new(nfrags, flag)),
            Box::new(CoalNoBuRe::new(flag)),
        ]
    }

    #[test]
    fn test_zero_gamma_is_noop_for_every_policy() {
        for outcome in [
            CollisionOutcome::Rebound,
            CollisionOutcome::Coalesce,
            CollisionOutcome::Breakup,
        ] {
            for policy in policies(outcome) {
                let (mut a, mut b) = pair();
                let (a0, b0) = pair();
                // prob 0.4, phi 0.6: gamma = 0
                assert!(!policy.enact(&mut a, &mut b, 0.4, 0.6));
                assert_eq!(a, a0, "{}", policy.kind());
                assert_eq!(b, b0, "{}", policy.kind());
            }
        }
    }

    #[test]
    fn test_rebound_leaves_pair_untouched() {
        let (mut a, mut b) = pair();
        let (a0, b0) = pair();
        let policy = CoalBuRe::new(ConstNFrags::new(4.0), ConstClassifier(CollisionOutcome::Rebound));
        assert!(!policy.enact(&mut a, &mut b, 1.5, 0.3));
        assert_eq!((a, b), (a0, b0));
    }

    #[test]
    fn test_coal_rebound_enacts_breakup_as_coalescence() {
        let (mut a, mut b) = pair();
        let policy = CoalRebound::new(ConstClassifier(CollisionOutcome::Breakup));
        assert!(!policy.enact(&mut a, &mut b, 1.5, 0.3));
        assert_eq!(a.xi(), 20);
        assert_eq!(b.xi(), 40);
    }

    #[test]
    fn test_coal_breakup_enacts_rebound_as_coalescence() {
        let (mut a, mut b) = pair();
        let policy = CoalBreakup::new(ConstNFrags::new(4.0), ConstClassifier(CollisionOutcome::Rebound));
        assert!(!policy.enact(&mut a, &mut b, 1.5, 0.3));
        assert_eq!(a.xi(), 20);
    }

    #[test]
    fn test_coal_no_breakup_rebound_bounces_breakups() {
        let (mut a, mut b) = pair();
        let (a0, b0) = pair();
        let policy = CoalNoBuRe::new(ConstClassifier(CollisionOutcome::Breakup));
        assert!(!policy.enact(&mut a, &mut b, 1.5, 0.3));
        assert_eq!((a, b), (a0, b0));
    }

    #[test]
    fn test_coal_no_breakup_rebound_coalesces() {
        let (mut a, mut b) = pair();
        let policy = CoalNoBuRe::new(ConstClassifier(CollisionOutcome::Coalesce));
        assert!(!policy.enact(&mut a, &mut b, 1.5, 0.3));
        assert_eq!(a.xi(), 20);
        assert_eq!(b.xi(), 40);
    }

    #[test]
    fn test_breakup_only_never_voids() {
        let (mut a, mut b) = (
            Superdrop::with_attrs(0, 10, 1e-4, 0.0),
            Superdrop::with_attrs(1, 10, 2e-4, 0.0),
        );
        let policy = BreakupOnly::new(ConstNFrags::new(3.0));
        assert!(!policy.enact(&mut a, &mut b, 3.0, 0.9));
        assert_eq!((a.xi(), b.xi()), (10, 10));
    }

    #[test]
    fn test_policy_kind_parsing() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.as_str().parse::<PolicyKind>().unwrap(), kind);
        }
        assert_eq!("COAL-ONLY".parse::<PolicyKind>().unwrap(), PolicyKind::CoalOnly);
        assert!("coalesce-everything".parse::<PolicyKind>().is_err());
    }

    #[test]
    fn test_policy_reachability() {
        assert!(PolicyKind::CoalOnly.reaches(CollisionOutcome::Coalesce));
        assert!(!PolicyKind::CoalOnly.reaches(CollisionOutcome::Breakup));
        assert!(!PolicyKind::CoalRebound.reaches(CollisionOutcome::Breakup));
        assert!(!PolicyKind::CoalBreakup.reaches(CollisionOutcome::Rebound));
        assert!(PolicyKind::CoalBuRe.reaches(CollisionOutcome::Rebound));
        assert!(PolicyKind::CoalNoBuRe.reaches(CollisionOutcome::Rebound));
        assert!(!PolicyKind::CoalNoBuRe.reaches(CollisionOutcome::Breakup));
    }

    #[test]
    fn test_unreachable_outcomes_are_remapped() {
        use CollisionOutcome::{Breakup, Coalesce, Rebound};
        assert_eq!(PolicyKind::CoalRebound.enacted(Breakup), Coalesce);
        assert_eq!(PolicyKind::CoalBreakup.enacted(Rebound), Coalesce);
        assert_eq!(PolicyKind::CoalNoBuRe.enacted(Breakup), Rebound);
        assert_eq!(PolicyKind::CoalBuRe.enacted(Breakup), Breakup);
        assert_eq!(PolicyKind::CoalOnly.enacted(Rebound), Coalesce);
    }
}
