//! Residence-time analysis of particles in a flowing-gas tube reactor

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::config::ReactorDefaults;
use crate::constants::GRAVITY;
use crate::math::{self, Vector};
use crate::materials::DataSource;
use crate::results::{confidence_of, Confidence, Diagnostic, Feasibility};
use crate::units;

use super::{
    arrhenius, conversion_fraction, field_enhancement, flash_enhancement, time_for_conversion,
    KineticModel,
};

/// Tube reactor geometry and particle properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactorGeometry {
    /// m
    pub tube_length: f64,
    /// m
    pub tube_diameter: f64,
    /// m/s
    pub gas_velocity: f64,
    /// kg/m³
    pub particle_density: f64,
}

impl ReactorGeometry {
    pub fn from_defaults(defaults: &ReactorDefaults) -> Self {
        Self {
            tube_length: defaults.tube_length,
            tube_diameter: defaults.tube_diameter,
            gas_velocity: defaults.gas_velocity,
            particle_density: defaults.particle_density,
        }
    }

    /// Gas transit time L/u (s), NaN unless both are positive
    pub fn residence_time(&self) -> f64 {
        if self.has_flow() {
            self.tube_length / self.gas_velocity
        } else {
            f64::NAN
        }
    }

    fn has_flow(&self) -> bool {
        self.tube_length > 0.0 && self.gas_velocity > 0.0
    }
}

/// Conversion band at the reactor exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completeness {
    Complete,
    NearComplete,
    Partial,
    Incomplete,
}

impl Completeness {
    /// Band for a conversion percentage
    pub fn classify(percent: f64) -> Self {
        if percent >= 95.0 {
            Completeness::Complete
        } else if percent >= 80.0 {
            Completeness::NearComplete
        } else if percent >= 50.0 {
            Completeness::Partial
        } else {
            Completeness::Incomplete
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Completeness::Complete => "Complete reduction",
            Completeness::NearComplete => "Near-complete reduction",
            Completeness::Partial => "Partial reduction",
            Completeness::Incomplete => "Incomplete reduction",
        }
    }
}

/// One residence-time calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidenceTimeRequest {
    pub material: String,
    /// Exit temperature (K)
    pub temperature: f64,
    /// V/m
    pub electric_field: f64,
    /// m
    pub particle_radius: f64,
    /// Reducing-gas mole fraction (0–1)
    #[serde(default = "default_gas_fraction")]
    pub p_reducing_gas: f64,
    /// Reactor geometry; configured defaults when absent
    #[serde(default)]
    pub geometry: Option<ReactorGeometry>,
    /// Particle entry temperature (K), enables the heating-rate estimate
    #[serde(default)]
    pub entry_temperature: Option<f64>,
    /// Temperature range (K) for the rate/conversion profile
    #[serde(default)]
    pub display_range: Option<(f64, f64)>,
    #[serde(default = "default_profile_samples")]
    pub profile_samples: usize,
}

fn default_profile_samples() -> usize {
    50
}

fn default_gas_fraction() -> f64 {
    0.25
}

impl ResidenceTimeRequest {
    pub fn new(
        material: &str,
        temperature: f64,
        electric_field: f64,
        particle_radius: f64,
    ) -> Self {
        Self {
            material: material.to_string(),
            temperature,
            electric_field,
            particle_radius,
            p_reducing_gas: default_gas_fraction(),
            geometry: None,
            entry_temperature: None,
            display_range: None,
            profile_samples: default_profile_samples(),
        }
    }

    pub fn with_gas_fraction(mut self, p_reducing_gas: f64) -> Self {
        self.p_reducing_gas = p_reducing_gas;
        self
    }

    pub fn with_geometry(mut self, geometry: ReactorGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_entry_temperature(mut self, entry_temperature: f64) -> Self {
        self.entry_temperature = Some(entry_temperature);
        self
    }

    pub fn with_display_range(mut self, t_min: f64, t_max: f64, samples: usize) -> Self {
        self.display_range = Some((t_min, t_max));
        self.profile_samples = samples;
        self
    }
}

/// Rate and exit conversion across a temperature range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionProfile {
    /// K
    pub temperatures: Vector,
    /// 1/s
    pub rates: Vector,
    /// Percent at the reactor exit
    pub conversion_percent: Vector,
}

/// Full residence-time report
///
/// The kinetic verdict (`completeness`) and the thermodynamic verdict
/// (`feasibility`) are independent; a reaction can be kinetically complete
/// while ΔG_eff is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidenceTimeReport {
    pub material: String,
    pub temperature: f64,
    pub temperature_c: f64,
    pub geometry: ReactorGeometry,
    /// kg
    pub particle_mass: f64,
    /// Stokes settling velocity (m/s)
    pub settling_velocity: f64,
    /// L/u (s)
    pub residence_time: f64,
    /// L/(u + v_settle) (s)
    pub effective_residence_time: f64,
    /// 1/s
    pub rate: f64,
    pub field_enhancement: f64,
    pub flash_enhancement: f64,
    pub total_enhancement: f64,
    pub in_flash_state: bool,
    pub flash_temperature: f64,
    pub flash_temperature_c: f64,
    pub kinetics_source: DataSource,
    /// Exit conversion fraction (0–1)
    pub conversion: f64,
    pub conversion_percent: f64,
    pub completeness: Completeness,
    pub time_95: Option<f64>,
    pub time_99: Option<f64>,
    /// kJ/mol nonmetal unit
    pub dg_eff: f64,
    pub feasibility: Feasibility,
    pub thermodynamically_favorable: bool,
    /// K/s, when an entry temperature was supplied
    pub heating_rate: Option<f64>,
    pub profile: Option<ConversionProfile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResidenceTimeReport {
    pub fn confidence(&self) -> Confidence {
        confidence_of(&self.diagnostics)
    }
}

/// Particle mass ρ·(4/3)·π·r³ (kg)
pub fn particle_mass(density: f64, radius: f64) -> f64 {
    density * 4.0 / 3.0 * PI * radius.powi(3)
}

/// Stokes settling velocity v = 2·m·g / (6π·μ·r)
pub fn settling_velocity(mass: f64, radius: f64, viscosity: f64) -> f64 {
    2.0 * mass * GRAVITY / (6.0 * PI * viscosity * radius)
}

impl<'a> KineticModel<'a> {
    /// Residence time, exit conversion and thermodynamic feasibility
    ///
    /// Returns `None` only when the material is unknown. A non-positive
    /// geometry or particle input leaves the transport times, and every
    /// conversion figure that depends on them, NaN with a
    /// `NumericDegenerate` diagnostic.
    pub fn residence_time_analysis(
        &self,
        request: &ResidenceTimeRequest,
    ) -> Option<ResidenceTimeReport> {
        let Some(m) = self.thermo().database().resolve(&request.material) else {
            log::warn!("material '{}' not found in database", request.material);
            return None;
        };
        let config = self.thermo().config();
        let geometry = request
            .geometry
            .unwrap_or_else(|| ReactorGeometry::from_defaults(&config.reactor));
        let (params, fallback) = self.parameters(m);
        let mut diagnostics: Vec<Diagnostic> = fallback.into_iter().collect();

        let t = request.temperature;
        let e = request.electric_field;
        let r = request.particle_radius;

        // Particle transport
        let viscosity = config.reactor.gas_viscosity;
        let (mass, settling) = if geometry.particle_density > 0.0 && r > 0.0 && viscosity > 0.0 {
            let mass = particle_mass(geometry.particle_density, r);
            (mass, settling_velocity(mass, r, viscosity))
        } else {
            log::warn!(
                "{}: particle density {} kg/m³, radius {} m or viscosity {} Pa·s not positive",
                m.name,
                geometry.particle_density,
                r,
                viscosity
            );
            diagnostics.push(Diagnostic::NumericDegenerate {
                count: 1,
                reason: "particle density, radius and gas viscosity must be positive".to_string(),
            });
            (f64::NAN, f64::NAN)
        };
        if !geometry.has_flow() {
            log::warn!(
                "{}: tube length {} m or gas velocity {} m/s not positive",
                m.name,
                geometry.tube_length,
                geometry.gas_velocity
            );
            diagnostics.push(Diagnostic::NumericDegenerate {
                count: 1,
                reason: "tube length and gas velocity must be positive".to_string(),
            });
        }
        let residence_time = geometry.residence_time();
        let effective_residence_time = if geometry.has_flow() {
            geometry.tube_length / (geometry.gas_velocity + settling)
        } else {
            f64::NAN
        };

        // Kinetics, flash state gated on the exit temperature
        let in_flash_state = t >= params.flash_temperature;
        let field = field_enhancement(&params, e, r);
        let flash = flash_enhancement(&params, t, e, in_flash_state);
        let rate = self.reduction_rate(&m.name, &[t], e, r, request.p_reducing_gas, in_flash_state);
        merge(&mut diagnostics, rate.diagnostics);
        let rate = rate.values.get(0).copied().unwrap_or(f64::NAN);

        let conversion = conversion_fraction(rate, effective_residence_time);
        let conversion_percent = conversion * 100.0;

        // Thermodynamics, reported separately
        let breakdown = self.thermo().off_equilibrium_breakdown(&m.name, t, e, r);
        merge(&mut diagnostics, breakdown.diagnostics);

        let heating_rate = request
            .entry_temperature
            .map(|entry| (t - entry) / residence_time);

        let profile = request.display_range.map(|(t_min, t_max)| {
            let temperatures = math::linspace(t_min, t_max, request.profile_samples);
            let rates: Vector = Vector::from_iterator(
                temperatures.len(),
                temperatures.iter().map(|&ti| {
                    arrhenius(&params, ti)
                        * request.p_reducing_gas
                        * field
                        * flash_enhancement(&params, ti, e, ti >= params.flash_temperature)
                }),
            );
            let conversion_percent =
                rates.map(|k| conversion_fraction(k, effective_residence_time) * 100.0);
            ConversionProfile {
                temperatures,
                rates,
                conversion_percent,
            }
        });

        log::debug!(
            "{}: k = {:.3e} 1/s, conversion {:.1}% in {:.3} s",
            m.name,
            rate,
            conversion_percent,
            effective_residence_time
        );

        Some(ResidenceTimeReport {
            material: m.name.clone(),
            temperature: t,
            temperature_c: units::kelvin_to_celsius(t),
            geometry,
            particle_mass: mass,
            settling_velocity: settling,
            residence_time,
            effective_residence_time,
            rate,
            field_enhancement: field,
            flash_enhancement: flash,
            total_enhancement: field * flash,
            in_flash_state,
            flash_temperature: params.flash_temperature,
            flash_temperature_c: units::kelvin_to_celsius(params.flash_temperature),
            kinetics_source: params.reliability,
            conversion,
            conversion_percent,
            completeness: Completeness::classify(conversion_percent),
            time_95: time_for_conversion(0.95, rate),
            time_99: time_for_conversion(0.99, rate),
            dg_eff: breakdown.effective,
            feasibility: breakdown.feasibility,
            thermodynamically_favorable: breakdown.feasibility.is_favorable(),
            heating_rate,
            profile,
            diagnostics,
        })
    }
}

fn merge(into: &mut Vec<Diagnostic>, from: Vec<Diagnostic>) {
    for d in from {
        if !into.contains(&d) {
            into.push(d);
        }
    }
}
