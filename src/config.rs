//! Engine configuration and calibration constants
//!
//! Literature-adjacent constants that the model depends on (the W_ph
//! fallback, the water-formation approximation, reactor defaults) live here so
//! they can be retuned without touching engine logic.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// Linear approximation ΔG°(T) = a + b·(T − t_ref) in kJ/mol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearApproximation {
    pub a: f64,
    pub b: f64,
    /// Reference temperature (K)
    pub t_ref: f64,
}

impl LinearApproximation {
    pub fn evaluate(&self, t_k: f64) -> f64 {
        self.a + self.b * (t_k - self.t_ref)
    }
}

/// Temperature grid scanned by the crossover search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureGrid {
    pub t_min: f64,
    pub t_max: f64,
    pub samples: usize,
}

/// Validated input envelope; values outside are extrapolated and flagged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEnvelope {
    /// Electric field bounds (V/m)
    pub field: (f64, f64),
    /// Particle radius bounds (m)
    pub radius: (f64, f64),
    /// Temperature bounds (K)
    pub temperature: (f64, f64),
}

/// Kinetic parameters used when a material carries none
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultKinetics {
    /// Activation energy (kJ/mol)
    pub activation_energy: f64,
    /// Pre-exponential factor (1/s)
    pub pre_exponential: f64,
    /// Field enhancement coefficient α
    pub field_enhancement: f64,
    /// Flash diffusion multiplier β
    pub flash_multiplier: f64,
    /// Flash threshold temperature (K)
    pub flash_temperature: f64,
}

/// Flowing-particle reactor defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactorDefaults {
    /// Tube length (m)
    pub tube_length: f64,
    /// Tube diameter (m)
    pub tube_diameter: f64,
    /// Gas velocity (m/s)
    pub gas_velocity: f64,
    /// Particle density (kg/m³)
    pub particle_density: f64,
    /// Dynamic viscosity of the carrier gas (Pa·s)
    pub gas_viscosity: f64,
    /// H₂ utilisation efficiency (0–1)
    pub h2_efficiency: f64,
}

/// Configuration for the thermodynamic and kinetic engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Phonon/plasma work used when a material has none (kJ/mol nonmetal unit)
    pub default_w_ph: f64,
    /// Database id of the water-formation reference curve
    pub water_reference: String,
    /// Approximation used when the water reference is missing
    pub water_fallback: LinearApproximation,
    /// Assumed H₂O partial pressure (atm)
    pub default_p_h2o: f64,
    /// Standard pressure for the pO₂ reference line (Pa)
    pub standard_pressure: f64,
    /// Symmetric bound on nomographic log ratios
    pub gas_ratio_clamp: f64,
    /// Temperatures at or below this are treated as degenerate (K)
    pub min_temperature: f64,
    pub crossover_grid: TemperatureGrid,
    pub envelope: InputEnvelope,
    pub default_kinetics: DefaultKinetics,
    pub reactor: ReactorDefaults,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_w_ph: 20.0,
            water_reference: "H2O".to_string(),
            water_fallback: LinearApproximation {
                a: -228.0,
                b: 0.044,
                t_ref: 298.0,
            },
            default_p_h2o: 0.01,
            standard_pressure: crate::constants::STANDARD_PRESSURE_PA,
            gas_ratio_clamp: 50.0,
            min_temperature: 1e-6,
            crossover_grid: TemperatureGrid {
                t_min: 300.0,
                t_max: 2400.0,
                samples: 1000,
            },
            envelope: InputEnvelope {
                field: (1e5, 5e6),
                radius: (1e-8, 1e-4),
                temperature: (300.0, 3000.0),
            },
            default_kinetics: DefaultKinetics {
                activation_energy: 200.0,
                pre_exponential: 1e7,
                field_enhancement: 0.10,
                flash_multiplier: 30.0,
                flash_temperature: 1100.0,
            },
            reactor: ReactorDefaults {
                tube_length: 0.30,
                tube_diameter: 0.05,
                gas_velocity: 1.0,
                particle_density: 4500.0,
                gas_viscosity: 4.0e-5,
                h2_efficiency: 0.95,
            },
        }
    }
}

impl EngineConfig {
    /// Override the W_ph fallback
    pub fn with_default_w_ph(mut self, w_ph: f64) -> Self {
        self.default_w_ph = w_ph;
        self
    }

    /// Override the assumed H₂O partial pressure (atm)
    pub fn with_p_h2o(mut self, p_h2o: f64) -> Self {
        self.default_p_h2o = p_h2o;
        self
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
