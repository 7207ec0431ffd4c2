//! Physical constants
//!
//! The gas constant appears in two unit systems. Formulas working in J/mol use
//! [`GAS_CONSTANT`]; the nomographic gas-ratio transform works in kJ/mol and
//! uses [`GAS_CONSTANT_KJ`].

/// Faraday constant (C/mol)
pub const FARADAY: f64 = 96485.0;

/// Molar gas constant (J/(mol·K))
pub const GAS_CONSTANT: f64 = 8.314;

/// Molar gas constant (kJ/(mol·K))
pub const GAS_CONSTANT_KJ: f64 = 8.314e-3;

/// Standard pressure (Pa)
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;

/// ln(10) as used by the nomographic log10 conversion
pub const LN_10: f64 = 2.303;

/// Offset between Kelvin and Celsius
pub const KELVIN_OFFSET: f64 = 273.15;

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Molar volume of an ideal gas at STP (m³/kmol)
pub const MOLAR_VOLUME_STP: f64 = 22.4;

/// Molar mass of H₂ (g/mol)
pub const H2_MOLAR_MASS: f64 = 2.016;

/// Conversion factor J → kJ
pub const J_PER_KJ: f64 = 1000.0;
