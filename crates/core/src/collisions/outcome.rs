//! Classification of a collision into rebound, coalescence or breakup
//!
//! Classifiers receive the same uniform variate φ that already decided the
//! collision gamma. One draw per pair per timestep serves both decisions.
//!
//! # Scientific References
//!
//! - Straub, W., Beheng, K.D., Seifert, A., Schlottke, J., Weigand, B. (2010).
//!   "Numerical investigation of collision-induced breakup of raindrops.
//!   Part II." J. Atmos. Sci., 67, 576-588.
//! - Testik, F.Y., Barros, A.P., Bliven, L.F. (2011). "Toward a physical
//!   characterization of raindrop collision outcome regimes."
//!   J. Atmos. Sci., 68, 1097-1113.

use crate::core_types::Superdrop;
use crate::physics::collision_kinetics::{
    coalescence_efficiency, collision_kinetic_energy, total_surface_energy,
};
use crate::physics::terminal_velocity::{SimmelTerminalVelocity, TerminalVelocity};
use serde::{Deserialize, Serialize};

/// Physical result of a droplet collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionOutcome {
    /// Droplets separate unchanged
    Rebound,
    /// Droplets merge
    Coalesce,
    /// Droplets fragment
    Breakup,
}

/// Strategy choosing the outcome of a collision
pub trait OutcomeClassifier: Send + Sync {
    /// Outcome of a collision between `drop1` and `drop2`
    ///
    /// Must be a pure function of its arguments.
    fn classify(&self, phi: f64, drop1: &Superdrop, drop2: &Superdrop) -> CollisionOutcome;
}

/// Always returns the same outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstClassifier(pub CollisionOutcome);

impl OutcomeClassifier for ConstClassifier {
    #[inline]
    fn classify(&self, _phi: f64, _drop1: &Superdrop, _drop2: &Superdrop) -> CollisionOutcome {
        self.0
    }
}

/// Energy-regime classifier after Testik et al. (2011) and Straub et al. (2010)
///
/// Coalescence happens with the Straub coalescence efficiency
/// `E_c = exp(−1.15 We)`. Collisions that do not coalesce rebound when the
/// collision kinetic energy cannot pay for the surface of two droplets, and
/// break up otherwise:
///
/// ```text
/// φ < E_c              → Coalesce
/// CKE < S_T            → Rebound
/// otherwise            → Breakup
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TsClassifier<T: TerminalVelocity = SimmelTerminalVelocity> {
    terminalv: T,
}

impl<T: TerminalVelocity> TsClassifier<T> {
    pub fn new(terminalv: T) -> Self {
        Self { terminalv }
    }

    /// Classify from radii and collision kinetic energy directly
    pub fn classify_energy(phi: f64, r1: f64, r2: f64, cke: f64) -> CollisionOutcome {
        if phi < coalescence_efficiency(cke, r1, r2) {
            CollisionOutcome::Coalesce
        } else if cke < total_surface_energy(r1, r2) {
            CollisionOutcome::Rebound
        } else {
            CollisionOutcome::Breakup
        }
    }
}

impl<T: TerminalVelocity> OutcomeClassifier for TsClassifier<T> {
    fn classify(&self, phi: f64, drop1: &Superdrop, drop2: &Superdrop) -> CollisionOutcome {
        let r1 = drop1.radius();
        let r2 = drop2.radius();
        let (v1, v2) = (self.terminalv.of(drop1), self.terminalv.of(drop2));
        let cke = collision_kinetic_energy(r1, r2, v1, v2);
        Self::classify_energy(phi, r1, r2, cke)
    }
}

/// Runtime-selectable outcome classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum ClassifierModel {
    #[default]
    Ts,
    Const {
        outcome: CollisionOutcome,
    },
}

impl OutcomeClassifier for ClassifierModel {
    fn classify(&self, phi: f64, drop1: &Superdrop, drop2: &Superdrop) -> CollisionOutcome {
        match self {
            Self::Ts => TsClassifier::<SimmelTerminalVelocity>::default().classify(phi, drop1, drop2),
            Self::Const { outcome } => ConstClassifier(*outcome).classify(phi, drop1, drop2),
        }
    }
}
