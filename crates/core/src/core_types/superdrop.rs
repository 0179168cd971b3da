//! Superdroplet record
//!
//! A superdroplet stands for `xi` identical real droplets. The collision
//! operators only touch the multiplicity, the radius and the solute mass;
//! every other field travels with the record untouched.
//!
//! Water mass is carried implicitly through the radius. Because both the
//! droplet volume (∝ r³) and the solute mass enter the droplet mass linearly,
//! conserving `Σ ξ·r³` and `Σ ξ·msol` conserves the represented mass.

use super::constants::{IONIC_NACL, MR_SOL_NACL, RHO_L, RHO_SOL_NACL, VOLUME_PREFACTOR};
use crate::error::{Result, SdmError};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Spatial coordinates of a superdroplet (m)
pub type Coords = Vector3<f64>;

/// Unique identifier of a superdroplet within an ensemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SuperdropId(pub u64);

/// Properties of the dissolved aerosol, shared by all droplets of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoluteProperties {
    /// Solute density (kg/m³)
    pub rho_sol: f64,
    /// Solute molar mass (kg/mol)
    pub mr_sol: f64,
    /// Degree of ionic dissociation (van't Hoff factor)
    pub ionic: f64,
}

impl Default for SoluteProperties {
    fn default() -> Self {
        Self {
            rho_sol: RHO_SOL_NACL,
            mr_sol: MR_SOL_NACL,
            ionic: IONIC_NACL,
        }
    }
}

/// Monte-Carlo particle representing `xi` real droplets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Superdrop {
    sd_id: SuperdropId,
    sdgbxindex: u32,
    coords: Coords,
    xi: u64,
    radius: f64,
    msol: f64,
    solute: SoluteProperties,
}

impl Superdrop {
    /// Create a superdroplet in gridbox `sdgbxindex` at `coords`
    ///
    /// # Arguments
    ///
    /// * `xi` - Multiplicity (number of real droplets)
    /// * `radius` - Droplet radius (m)
    /// * `msol` - Dissolved solute mass per droplet (kg)
    pub fn new(
        sd_id: SuperdropId,
        sdgbxindex: u32,
        coords: Coords,
        xi: u64,
        radius: f64,
        msol: f64,
        solute: SoluteProperties,
    ) -> Self {
        Self {
            sd_id,
            sdgbxindex,
            coords,
            xi,
            radius,
            msol,
            solute,
        }
    }

    /// Superdroplet at the origin of gridbox 0 with the default solute
    pub fn with_attrs(sd_id: u64, xi: u64, radius: f64, msol: f64) -> Self {
        Self::new(
            SuperdropId(sd_id),
            0,
            Coords::zeros(),
            xi,
            radius,
            msol,
            SoluteProperties::default(),
        )
    }

    pub fn id(&self) -> SuperdropId {
        self.sd_id
    }

    pub fn sdgbxindex(&self) -> u32 {
        self.sdgbxindex
    }

    pub fn coords(&self) -> &Coords {
        &self.coords
    }

    pub fn solute(&self) -> &SoluteProperties {
        &self.solute
    }

    /// Multiplicity
    #[inline]
    pub fn xi(&self) -> u64 {
        self.xi
    }

    /// Radius (m)
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Solute mass per real droplet (kg)
    #[inline]
    pub fn msol(&self) -> f64 {
        self.msol
    }

    #[inline]
    pub fn rcubed(&self) -> f64 {
        self.radius * self.radius * self.radius
    }

    /// Volume of one real droplet (m³)
    pub fn volume(&self) -> f64 {
        VOLUME_PREFACTOR * self.rcubed()
    }

    /// Total mass of one real droplet, water plus solute (kg)
    ///
    /// ```text
    /// m = msol·(1 − ρ_l/ρ_sol) + ρ_l·V
    /// ```
    pub fn mass(&self) -> f64 {
        let effsol = 1.0 - RHO_L / self.solute.rho_sol;
        self.msol * effsol + RHO_L * self.volume()
    }

    /// Mass of all real droplets this superdroplet represents (kg)
    pub fn represented_mass(&self) -> f64 {
        self.xi as f64 * self.mass()
    }

    /// True once the multiplicity has dropped to zero
    #[inline]
    pub fn is_void(&self) -> bool {
        self.xi == 0
    }

    pub fn set_sdgbxindex(&mut self, sdgbxindex: u32) {
        self.sdgbxindex = sdgbxindex;
    }

    pub fn set_coords(&mut self, coords: Coords) {
        self.coords = coords;
    }

    #[inline]
    pub(crate) fn set_xi(&mut self, xi: u64) {
        self.xi = xi;
    }

    /// Set radius from r³, clamping rounding residue below zero
    #[inline]
    pub(crate) fn set_rcubed(&mut self, rcubed: f64) {
        self.radius = rcubed.max(0.0).cbrt();
    }

    #[inline]
    pub(crate) fn set_msol(&mut self, msol: f64) {
        self.msol = msol.max(0.0);
    }

    /// Reject records the collision operators must never see
    ///
    /// # Errors
    ///
    /// Returns [`SdmError::InvalidSuperdrop`] for a negative or non-finite
    /// radius or solute mass.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| SdmError::InvalidSuperdrop {
            sd_id: self.sd_id.0,
            reason: reason.to_owned(),
        };

        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(invalid("radius must be finite and non-negative"));
        }
        if !self.msol.is_finite() || self.msol < 0.0 {
            return Err(invalid("solute mass must be finite and non-negative"));
        }
        Ok(())
    }
}

/// Validate every superdroplet of an ensemble
///
/// # Errors
///
/// Returns the error of the first invalid superdroplet
pub fn validate_superdrops(drops: &[Superdrop]) -> Result<()> {
    drops.iter().try_for_each(Superdrop::validate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mass_of_pure_water_droplet() {
        let drop = Superdrop::with_attrs(0, 1, 1e-3, 0.0);
        let expected = RHO_L * VOLUME_PREFACTOR * 1e-9;
        assert_relative_eq!(drop.mass(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_represented_mass_scales_with_multiplicity() {
        let drop = Superdrop::with_attrs(0, 250, 2e-5, 1e-18);
        assert_relative_eq!(
            drop.represented_mass(),
            250.0 * drop.mass(),
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_set_rcubed_clamps_negative_residue() {
        let mut drop = Superdrop::with_attrs(0, 1, 1e-5, 0.0);
        drop.set_rcubed(-1e-30);
        assert_eq!(drop.radius(), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(Superdrop::with_attrs(0, 0, 0.0, 0.0).validate().is_ok());
        assert!(Superdrop::with_attrs(1, 5, -1e-6, 0.0).validate().is_err());
        assert!(Superdrop::with_attrs(2, 5, 1e-6, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_superdrops_reports_offender() {
        let drops = vec![
            Superdrop::with_attrs(0, 5, 1e-6, 0.0),
            Superdrop::with_attrs(7, 5, f64::INFINITY, 0.0),
        ];
        match validate_superdrops(&drops) {
            Err(SdmError::InvalidSuperdrop { sd_id, .. }) => assert_eq!(sd_id, 7),
            other => panic!("expected invalid superdrop, got {other:?}"),
        }
    }
}
