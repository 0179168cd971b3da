//! Super-Droplet Method Collision Core
//!
//! Collision-coalescence, breakup and rebound of superdroplets for the
//! super-droplet method (SDM) of Shima et al. (2009). Each superdroplet
//! represents a multiplicity of identical real droplets; the pairwise core
//! decides how many collision events a representative pair undergoes and
//! enacts their outcome while conserving the represented mass.
//!
//! ## Layout
//!
//! - [`collisions`] - gamma calculation, coalescence and breakup operators,
//!   outcome classifiers, fragment counts, probability kernels, the
//!   enactment policies and the per-gridbox collision pass
//! - [`physics`] - terminal velocity and collision energetics
//! - [`config`] - serde configuration assembling a collision process
//! - [`moments`] - mass moments of an ensemble
//!
//! ## Example
//!
//! ```
//! use sdm_collisions_core::{CoalOnly, PairEnact, Superdrop};
//!
//! let mut a = Superdrop::with_attrs(0, 100, 2e-5, 0.0);
//! let mut b = Superdrop::with_attrs(1, 40, 1e-5, 0.0);
//!
//! // prob = 1.5, phi = 0.3: gamma = 2, so 80 droplets of `a` merge into `b`
//! let voided = CoalOnly::new().enact(&mut a, &mut b, 1.5, 0.3);
//!
//! assert!(!voided);
//! assert_eq!(a.xi(), 20);
//! assert_eq!(b.xi(), 40);
//! ```

pub mod collisions;
pub mod config;
pub mod core_types;
pub mod error;
pub mod moments;
pub mod physics;

pub use collisions::{
    collision_gamma, remove_void_superdrops, BreakupOnly, ClassifierModel, CoalBreakup, CoalBuRe,
    CoalNoBuRe, CoalOnly, CoalRebound, CollisionKineticEnergyNFrags, CollisionOutcome,
    ConstClassifier, ConstNFrags, DoBreakup, DoCoalescence, DoCollisions, GolovinProb,
    LongHydroProb, NFragments, NFragsModel, OutcomeClassifier, PairEnact, PairProbability,
    PolicyKind, ProbabilityModel, TsClassifier,
};
pub use config::{CollisionConfig, CollisionProcess};
pub use core_types::{Coords, SoluteProperties, Superdrop, SuperdropId};
pub use error::{Result, SdmError};
pub use moments::MassMoments;
