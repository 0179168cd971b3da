//! Physical constants used by the droplet microphysics
//!
//! All values are SI. Droplet radii are metres, masses kilograms.

/// Density of liquid water (kg/m³)
pub const RHO_L: f64 = 998.203;

/// Surface tension of water against air at ~20°C (J/m²)
pub const SURFACE_TENSION: f64 = 7.28e-2;

/// Density of the default solute, NaCl (kg/m³)
pub const RHO_SOL_NACL: f64 = 2016.5;

/// Molar mass of the default solute, NaCl (kg/mol)
pub const MR_SOL_NACL: f64 = 0.058443;

/// Van't Hoff factor of NaCl
pub const IONIC_NACL: f64 = 2.0;

/// 4π/3, volume prefactor of a sphere
pub const VOLUME_PREFACTOR: f64 = 4.0 / 3.0 * std::f64::consts::PI;
