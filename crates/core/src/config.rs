//! Collision process configuration
//!
//! A [`CollisionConfig`] selects the enactment policy and the models plugged
//! into it. It is plain serde data and is usually read from JSON:
//!
//! ```json
//! {
//!   "collision_timestep": 1.0,
//!   "policy": "coal-breakup-rebound",
//!   "nfrags": { "model": "const", "nfrags": 8.0 },
//!   "classifier": { "model": "ts" },
//!   "probability": { "model": "long-hydro", "coaleff": 1.0 }
//! }
//! ```
//!
//! Missing fields take their defaults.

use crate::collisions::{
    BreakupOnly, ClassifierModel, CoalBreakup, CoalBuRe, CoalNoBuRe, CoalOnly, CoalRebound,
    DoCollisions, NFragsModel, PairEnact, PolicyKind, ProbabilityModel,
};
use crate::error::{Result, SdmError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Collision process assembled from a [`CollisionConfig`]
pub type CollisionProcess = DoCollisions<ProbabilityModel, Box<dyn PairEnact>>;

/// Configuration of the collision microphysics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollisionConfig {
    /// Collision timestep (s)
    pub collision_timestep: f64,
    /// Which outcomes collisions may have
    pub policy: PolicyKind,
    /// Fragment count of a breakup
    pub nfrags: NFragsModel,
    /// Outcome classifier for policies with more than one outcome
    pub classifier: ClassifierModel,
    /// Collision kernel
    pub probability: ProbabilityModel,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            collision_timestep: 1.0,
            policy: PolicyKind::default(),
            nfrags: NFragsModel::default(),
            classifier: ClassifierModel::default(),
            probability: ProbabilityModel::default(),
        }
    }
}

impl CollisionConfig {
    /// Parse and validate a configuration from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`SdmError::ConfigParse`] for malformed JSON and
    /// [`SdmError::InvalidConfig`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges
    ///
    /// [`advisories`](Self::advisories) are logged as warnings but do not
    /// fail validation.
    ///
    /// # Errors
    ///
    /// Returns [`SdmError::InvalidConfig`] naming the first offending field
    pub fn validate(&self) -> Result<()> {
        if !self.collision_timestep.is_finite() || self.collision_timestep <= 0.0 {
            return Err(invalid(
                "collision_timestep",
                format!("must be positive, got {}", self.collision_timestep),
            ));
        }

        if let NFragsModel::Const { nfrags } = self.nfrags {
            if !nfrags.is_finite() || nfrags <= 0.0 {
                return Err(invalid("nfrags", format!("must be positive, got {nfrags}")));
            }
        }

        if let ProbabilityModel::LongHydro { coaleff } = self.probability {
            if coaleff.is_nan() || coaleff <= 0.0 || coaleff > 1.0 {
                return Err(invalid(
                    "probability.coaleff",
                    format!("must lie in (0, 1], got {coaleff}"),
                ));
            }
        }

        for advisory in self.advisories() {
            warn!("{}", advisory);
        }
        Ok(())
    }

    /// Valid but suspicious settings
    ///
    /// A constant fragment count below two makes breakup grow the receiver
    /// instead of fragmenting it; below one it is treated as one.
    pub fn advisories(&self) -> Vec<String> {
        let mut advisories = Vec::new();

        if let NFragsModel::Const { nfrags } = self.nfrags {
            if nfrags < 2.0 && uses_nfrags(self.policy) {
                advisories.push(format!(
                    "Constant fragment count {} is below two; breakup will grow droplets",
                    nfrags.max(1.0)
                ));
            }
        }

        if !self.policy.uses_classifier() && self.classifier != ClassifierModel::default() {
            advisories.push(format!(
                "Policy '{}' does not consult the outcome classifier",
                self.policy
            ));
        }
        if let ClassifierModel::Const { outcome } = self.classifier {
            if self.policy.uses_classifier() && !self.policy.reaches(outcome) {
                advisories.push(format!(
                    "Policy '{}' cannot enact {:?}; every collision is enacted as {:?}",
                    self.policy,
                    outcome,
                    self.policy.enacted(outcome)
                ));
            }
        }

        advisories
    }

    /// Pairwise enactment policy described by this configuration
    pub fn build_policy(&self) -> Box<dyn PairEnact> {
        let nfrags = self.nfrags;
        let classifier = self.classifier;
        match self.policy {
            PolicyKind::CoalOnly => Box::new(CoalOnly::new()),
            PolicyKind::BreakupOnly => Box::new(BreakupOnly::new(nfrags)),
            PolicyKind::CoalRebound => Box::new(CoalRebound::new(classifier)),
            PolicyKind::CoalBreakup => Box::new(CoalBreakup::new(nfrags, classifier)),
            PolicyKind::CoalBuRe => Box::new(CoalBuRe::new(nfrags, classifier)),
            PolicyKind::CoalNoBuRe => Box::new(CoalNoBuRe::new(classifier)),
        }
    }

    /// Validate and assemble the collision process
    ///
    /// # Errors
    ///
    /// Returns [`SdmError::InvalidConfig`] if validation fails
    pub fn build(&self) -> Result<CollisionProcess> {
        self.validate()?;

        info!(
            "Collision process: policy={}, dt={}s, probability={:?}, nfrags={:?}, classifier={:?}",
            self.policy, self.collision_timestep, self.probability, self.nfrags, self.classifier
        );

        Ok(DoCollisions::new(
            self.collision_timestep,
            self.probability,
            self.build_policy(),
        ))
    }
}

fn uses_nfrags(policy: PolicyKind) -> bool {
    matches!(
        policy,
        PolicyKind::BreakupOnly | PolicyKind::CoalBreakup | PolicyKind::CoalBuRe
    )
}

fn invalid(field: &'static str, message: String) -> SdmError {
    SdmError::InvalidConfig { field, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collisions::CollisionOutcome;

    #[test]
    fn test_default_config_is_valid() {
        let config = CollisionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.policy, PolicyKind::CoalBuRe);
        assert_eq!(config.probability, ProbabilityModel::LongHydro { coaleff: 1.0 });
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = CollisionConfig::from_json_str(r#"{"policy": "coal-only"}"#).unwrap();
        assert_eq!(config.policy, PolicyKind::CoalOnly);
        assert_eq!(config.collision_timestep, 1.0);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "collision_timestep": 2.5,
            "policy": "coal-breakup",
            "nfrags": { "model": "const", "nfrags": 8.0 },
            "classifier": { "model": "const", "outcome": "breakup" },
            "probability": { "model": "golovin" }
        }"#;
        let config = CollisionConfig::from_json_str(json).unwrap();
        assert_eq!(config.collision_timestep, 2.5);
        assert_eq!(config.nfrags, NFragsModel::Const { nfrags: 8.0 });
        assert_eq!(
            config.classifier,
            ClassifierModel::Const {
                outcome: CollisionOutcome::Breakup
            }
        );
        assert_eq!(config.probability, ProbabilityModel::Golovin);
    }

    #[test]
    fn test_json_round_trip() {
        let config = CollisionConfig {
            policy: PolicyKind::CoalRebound,
            ..CollisionConfig::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(CollisionConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        for json in [
            r#"{"collision_timestep": 0.0}"#,
            r#"{"collision_timestep": -1.0}"#,
            r#"{"nfrags": {"model": "const", "nfrags": 0.0}}"#,
            r#"{"probability": {"model": "long-hydro", "coaleff": 1.5}}"#,
        ] {
            let err = CollisionConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, SdmError::InvalidConfig { .. }), "{json}: {err}");
        }
    }

    #[test]
    fn test_rejects_unknown_fields_and_policies() {
        assert!(matches!(
            CollisionConfig::from_json_str(r#"{"timestep": 1.0}"#),
            Err(SdmError::ConfigParse(_))
        ));
        assert!(matches!(
            CollisionConfig::from_json_str(r#"{"policy": "coalesce-all"}"#),
            Err(SdmError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_build_matches_policy() {
        for policy in PolicyKind::ALL {
            let config = CollisionConfig {
                policy,
                ..CollisionConfig::default()
            };
            let process = config.build().unwrap();
            assert_eq!(process.policy().kind(), policy);
            assert_eq!(process.delt(), 1.0);
        }
    }

    #[test]
    fn test_fragment_count_below_two_is_flagged() {
        let config = CollisionConfig::from_json_str(
            r#"{"policy": "breakup-only", "nfrags": {"model": "const", "nfrags": 1.5}}"#,
        )
        .unwrap();
        let advisories = config.advisories();
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].contains("below two"));

        let fine = CollisionConfig {
            nfrags: NFragsModel::Const { nfrags: 4.0 },
            ..config.clone()
        };
        assert!(fine.advisories().is_empty());

        // coalescence alone never breaks up
        let coal_only = CollisionConfig {
            policy: PolicyKind::CoalOnly,
            ..config
        };
        assert!(coal_only.advisories().is_empty());
    }

    #[test]
    fn test_unreachable_constant_outcome_is_flagged() {
        let config = CollisionConfig {
            policy: PolicyKind::CoalNoBuRe,
            classifier: ClassifierModel::Const {
                outcome: CollisionOutcome::Breakup,
            },
            ..CollisionConfig::default()
        };
        let advisories = config.advisories();
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].ends_with("Rebound"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = CollisionConfig::load("/nonexistent/collisions.json").unwrap_err();
        assert!(matches!(err, SdmError::ConfigIo(_)));
    }
}
