//! Reduction kinetics for a flowing-particle reactor
//!
//! First-order Arrhenius kinetics with two multiplicative enhancements: a
//! static-field term `1 + α·E·r/1e6` and a flash term that only applies in the
//! flash state.

pub mod hydrogen;
pub mod residence;

use crate::config::EngineConfig;
use crate::constants::{GAS_CONSTANT, J_PER_KJ};
use crate::materials::{DataSource, KineticParameters, Material, MaterialDatabase};
use crate::math::Vector;
use crate::results::{Curve, Diagnostic, Quantity};
use crate::thermo::ThermodynamicEngine;

pub use hydrogen::HydrogenDemand;
pub use residence::{
    Completeness, ConversionProfile, ReactorGeometry, ResidenceTimeReport, ResidenceTimeRequest,
};

/// Arrhenius factor `A·exp(−Ea/(R·T))` in 1/s
pub fn arrhenius(params: &KineticParameters, temperature: f64) -> f64 {
    params.pre_exponential
        * (-params.activation_energy * J_PER_KJ / (GAS_CONSTANT * temperature)).exp()
}

/// Static field enhancement `1 + α·E·r/1e6`
pub fn field_enhancement(
    params: &KineticParameters,
    electric_field: f64,
    particle_radius: f64,
) -> f64 {
    1.0 + params.field_enhancement * electric_field * particle_radius / 1e6
}

/// Flash enhancement `1 + β·exp((T − T_flash)/200)·(E/1e6)^0.5`
///
/// Exactly 1 unless `flash_state` is set and T ≥ T_flash.
pub fn flash_enhancement(
    params: &KineticParameters,
    temperature: f64,
    electric_field: f64,
    flash_state: bool,
) -> f64 {
    if !flash_state || temperature < params.flash_temperature {
        return 1.0;
    }
    1.0 + params.flash_multiplier
        * ((temperature - params.flash_temperature) / 200.0).exp()
        * (electric_field.max(0.0) / 1e6).sqrt()
}

/// First-order conversion `1 − exp(−k·t)`, clamped to [0, 1]
pub fn conversion_fraction(rate: f64, residence_time: f64) -> f64 {
    (1.0 - (-rate * residence_time).exp()).clamp(0.0, 1.0)
}

/// Time to reach conversion `x`: `−ln(1 − x)/k`
///
/// `None` when `x` is outside [0, 1) or the rate is not positive.
pub fn time_for_conversion(x: f64, rate: f64) -> Option<f64> {
    if !(0.0..1.0).contains(&x) || !(rate > 0.0) {
        return None;
    }
    Some(-(1.0 - x).ln() / rate)
}

/// Kinetic model layered on the thermodynamic engine
#[derive(Debug, Clone)]
pub struct KineticModel<'a> {
    thermo: ThermodynamicEngine<'a>,
}

impl<'a> KineticModel<'a> {
    pub fn new(database: &'a MaterialDatabase) -> Self {
        Self::with_engine(ThermodynamicEngine::new(database))
    }

    pub fn with_config(database: &'a MaterialDatabase, config: EngineConfig) -> Self {
        Self::with_engine(ThermodynamicEngine::with_config(database, config))
    }

    pub fn with_engine(thermo: ThermodynamicEngine<'a>) -> Self {
        Self { thermo }
    }

    pub fn thermo(&self) -> &ThermodynamicEngine<'a> {
        &self.thermo
    }

    fn config(&self) -> &EngineConfig {
        self.thermo.config()
    }

    /// Kinetic parameters of a material, or the configured defaults
    ///
    /// Defaults carry a `DefaultParameter` diagnostic.
    pub fn parameters(&self, material: &Material) -> (KineticParameters, Option<Diagnostic>) {
        if let Some(k) = material.kinetics {
            return (k, None);
        }
        let d = self.config().default_kinetics;
        log::warn!(
            "{}: no kinetic data, using default Ea = {} kJ/mol",
            material.name,
            d.activation_energy
        );
        let params = KineticParameters {
            activation_energy: d.activation_energy,
            pre_exponential: d.pre_exponential,
            field_enhancement: d.field_enhancement,
            flash_multiplier: d.flash_multiplier,
            flash_temperature: d.flash_temperature,
            valid_range: None,
            reliability: DataSource::Default,
        };
        let diagnostic = Diagnostic::DefaultParameter {
            parameter: "activation_energy".to_string(),
            value: d.activation_energy,
        };
        (params, Some(diagnostic))
    }

    /// Diagnostics for temperatures outside the kinetic validity range and
    /// gas fractions outside [0, 1]
    fn input_diagnostics(
        params: &KineticParameters,
        temperatures: &[f64],
        p_reducing_gas: f64,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        if let Some((t_min, t_max)) = params.valid_range {
            let outside = temperatures
                .iter()
                .filter(|&&t| t < t_min || t > t_max)
                .count();
            if outside > 0 {
                log::warn!("{} temperature(s) outside kinetic validity range", outside);
                diagnostics.push(Diagnostic::OutOfRange {
                    quantity: Quantity::Temperature,
                    count: outside,
                    min: t_min,
                    max: t_max,
                });
            }
        }
        if !(0.0..=1.0).contains(&p_reducing_gas) {
            diagnostics.push(Diagnostic::OutOfRange {
                quantity: Quantity::GasFraction,
                count: 1,
                min: 0.0,
                max: 1.0,
            });
        }
        diagnostics
    }

    /// Reduction rate constant (1/s) at each temperature
    pub fn reduction_rate(
        &self,
        material: &str,
        temperatures: &[f64],
        electric_field: f64,
        particle_radius: f64,
        p_reducing_gas: f64,
        flash_state: bool,
    ) -> Curve {
        let Some(m) = self.thermo.database().resolve(material) else {
            log::warn!("material '{}' not found in database", material);
            return Curve::undefined(
                temperatures.len(),
                Diagnostic::NotFound {
                    material: material.to_string(),
                },
            );
        };
        let (params, fallback) = self.parameters(m);
        let min_t = self.config().min_temperature;

        let field = field_enhancement(&params, electric_field, particle_radius);
        let values = Vector::from_iterator(
            temperatures.len(),
            temperatures.iter().map(|&t| {
                if t > min_t {
                    arrhenius(&params, t)
                        * p_reducing_gas
                        * field
                        * flash_enhancement(&params, t, electric_field, flash_state)
                } else {
                    f64::NAN
                }
            }),
        );

        let mut curve = Curve::new(values);
        curve.extend(fallback);
        curve.extend(Self::input_diagnostics(&params, temperatures, p_reducing_gas));
        let degenerate = temperatures.iter().filter(|&&t| !(t > min_t)).count();
        if degenerate > 0 {
            curve.push(Diagnostic::NumericDegenerate {
                count: degenerate,
                reason: "Arrhenius R·T denominator vanishes".to_string(),
            });
        }
        curve
    }
}
