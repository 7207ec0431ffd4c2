//! Equilibrium and off-equilibrium reduction thermodynamics
//!
//! All operations are vectorised over a temperature slice and return a
//! [`Curve`] whose diagnostics describe any extrapolation, fallback or
//! degenerate sample. The engine never fails for an unknown material; it
//! returns NaN markers tagged `NotFound` instead.

pub mod gas_ratios;
pub mod normalization;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::constants::{FARADAY, GAS_CONSTANT, J_PER_KJ, LN_10};
use crate::error::EngineResult;
use crate::materials::{Material, MaterialDatabase};
use crate::math::{self, Vector};
use crate::results::{confidence_of, Confidence, Curve, Diagnostic, Feasibility, Quantity};

pub use gas_ratios::{GasRatio, GasRatioScales, ReferenceReaction};
pub use normalization::{NormalizationMode, NormalizedCurve};

/// Where the W_ph term of a calculation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WphSource {
    Material,
    Default,
}

/// Scalar decomposition of ΔG_eff at one operating point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffEquilibriumBreakdown {
    pub material: String,
    /// K
    pub temperature: f64,
    /// V/m
    pub electric_field: f64,
    /// m
    pub particle_radius: f64,
    pub n_electrons: f64,
    /// ΔG°(T), kJ/mol nonmetal unit
    pub equilibrium: f64,
    /// −n·F·E·r / 1000, kJ/mol nonmetal unit
    pub electric_term: f64,
    pub w_ph: f64,
    pub w_ph_source: WphSource,
    /// equilibrium + electric_term − w_ph
    pub effective: f64,
    pub feasibility: Feasibility,
    pub unit_label: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl OffEquilibriumBreakdown {
    pub fn confidence(&self) -> Confidence {
        confidence_of(&self.diagnostics)
    }
}

/// Result of the crossover search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crossover {
    /// First temperature where ΔG_eff changes sign (K)
    pub temperature: Option<f64>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Crossover {
    pub fn confidence(&self) -> Confidence {
        confidence_of(&self.diagnostics)
    }
}

/// Electric work term `−n·F·E·r / 1000` in kJ/mol
pub fn electric_term(n_electrons: f64, electric_field: f64, particle_radius: f64) -> f64 {
    -(n_electrons * FARADAY * electric_field * particle_radius) / J_PER_KJ
}

/// Thermodynamic engine over an immutable material database
#[derive(Debug, Clone)]
pub struct ThermodynamicEngine<'a> {
    database: &'a MaterialDatabase,
    config: EngineConfig,
}

impl<'a> ThermodynamicEngine<'a> {
    /// Create an engine with the default configuration
    pub fn new(database: &'a MaterialDatabase) -> Self {
        Self::with_config(database, EngineConfig::default())
    }

    pub fn with_config(database: &'a MaterialDatabase, config: EngineConfig) -> Self {
        Self { database, config }
    }

    pub fn database(&self) -> &'a MaterialDatabase {
        self.database
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn not_found(&self, material: &str, len: usize) -> Curve {
        Curve::undefined(
            len,
            Diagnostic::NotFound {
                material: material.to_string(),
            },
        )
    }

    /// Count temperatures where an R·T denominator vanishes
    fn degenerate_count(&self, temperatures: &[f64]) -> usize {
        temperatures
            .iter()
            .filter(|&&t| !(t > self.config.min_temperature))
            .count()
    }

    fn degenerate(count: usize, reason: &str) -> Diagnostic {
        Diagnostic::NumericDegenerate {
            count,
            reason: reason.to_string(),
        }
    }

    /// W_ph of a material, or the configured default with a diagnostic
    pub fn w_ph(&self, material: &Material) -> (f64, WphSource, Option<Diagnostic>) {
        match material.w_ph {
            Some(w) => (w, WphSource::Material, None),
            None => {
                log::warn!(
                    "{}: no W_ph data, using default {} kJ/mol",
                    material.name,
                    self.config.default_w_ph
                );
                (
                    self.config.default_w_ph,
                    WphSource::Default,
                    Some(Diagnostic::DefaultParameter {
                        parameter: "W_ph".to_string(),
                        value: self.config.default_w_ph,
                    }),
                )
            }
        }
    }

    // ========================
    // Free energies
    // ========================

    /// ΔG°(T) in kJ/mol nonmetal unit
    pub fn equilibrium_dg(&self, material: &str, temperatures: &[f64]) -> Curve {
        self.database.interpolate_dg(material, temperatures)
    }

    /// ΔG_eff(T) = ΔG°(T) − n·F·E·r/1000 − W_ph
    pub fn off_equilibrium_dg(
        &self,
        material: &str,
        temperatures: &[f64],
        electric_field: f64,
        particle_radius: f64,
    ) -> Curve {
        let Some(m) = self.database.resolve(material) else {
            log::warn!("material '{}' not found in database", material);
            return self.not_found(material, temperatures.len());
        };

        let mut curve = self.database.interpolate_dg(material, temperatures);
        let electric = electric_term(m.stoichiometry.n_electrons, electric_field, particle_radius);
        let (w_ph, _, fallback) = self.w_ph(m);

        curve.values.apply(|g| *g = *g + electric - w_ph);
        curve.extend(fallback);
        curve.extend(self.field_diagnostics(electric_field, particle_radius));
        curve
    }

    /// Decompose ΔG_eff at a single temperature
    pub fn off_equilibrium_breakdown(
        &self,
        material: &str,
        temperature: f64,
        electric_field: f64,
        particle_radius: f64,
    ) -> OffEquilibriumBreakdown {
        let equilibrium = self.equilibrium_dg(material, &[temperature]);
        let mut diagnostics = equilibrium.diagnostics.clone();
        let equilibrium = equilibrium.values.get(0).copied().unwrap_or(f64::NAN);

        let (n_electrons, electric, w_ph, w_ph_source, unit_label) =
            match self.database.resolve(material) {
                Some(m) => {
                    let (w_ph, source, fallback) = self.w_ph(m);
                    diagnostics.extend(fallback);
                    let n = m.stoichiometry.n_electrons;
                    (
                        n,
                        electric_term(n, electric_field, particle_radius),
                        w_ph,
                        source,
                        m.unit_label(),
                    )
                }
                None => (
                    f64::NAN,
                    f64::NAN,
                    f64::NAN,
                    WphSource::Default,
                    "kJ/mol".to_string(),
                ),
            };
        diagnostics.extend(self.field_diagnostics(electric_field, particle_radius));

        let effective = equilibrium + electric - w_ph;
        OffEquilibriumBreakdown {
            material: material.to_string(),
            temperature,
            electric_field,
            particle_radius,
            n_electrons,
            equilibrium,
            electric_term: electric,
            w_ph,
            w_ph_source,
            effective,
            feasibility: Feasibility::classify(effective),
            unit_label,
            diagnostics,
        }
    }

    /// Multiplier used by [`normalized_dg`](Self::normalized_dg)
    pub fn normalization_factor(&self, material: &str, mode: NormalizationMode) -> Option<f64> {
        self.database
            .resolve(material)
            .map(|m| normalization::factor(m, mode))
    }

    /// ΔG° on the requested basis
    pub fn normalized_dg(
        &self,
        material: &str,
        temperatures: &[f64],
        mode: NormalizationMode,
    ) -> NormalizedCurve {
        let mut curve = self.equilibrium_dg(material, temperatures);
        match self.database.resolve(material) {
            Some(m) => {
                let factor = normalization::factor(m, mode);
                curve.values *= factor;
                NormalizedCurve {
                    curve,
                    unit_label: normalization::unit_label(m, mode),
                    mode,
                    factor,
                }
            }
            None => NormalizedCurve {
                curve,
                unit_label: "kJ/mol".to_string(),
                mode,
                factor: f64::NAN,
            },
        }
    }

    // ========================
    // Nomographic scales
    // ========================

    /// log₁₀(pO₂) of the ΔG = 0 reference line
    pub fn po2_scale(&self, temperatures: &[f64]) -> Curve {
        let log_p_std = self.config.standard_pressure.log10();
        let values = Vector::from_iterator(
            temperatures.len(),
            temperatures.iter().map(|&t| {
                if t > self.config.min_temperature {
                    0.0 / (LN_10 * GAS_CONSTANT * t) + log_p_std
                } else {
                    f64::NAN
                }
            }),
        );
        let mut curve = Curve::new(values);
        let degenerate = self.degenerate_count(temperatures);
        if degenerate > 0 {
            curve.push(Self::degenerate(degenerate, "R·T denominator vanishes"));
        }
        curve
    }

    /// Every nomographic log₁₀ gas ratio for the supplied ΔG values
    ///
    /// # Errors
    /// `ShapeMismatch` when the two slices differ in length.
    pub fn comprehensive_gas_ratios(
        &self,
        temperatures: &[f64],
        dg: &[f64],
    ) -> EngineResult<GasRatioScales> {
        gas_ratios::compute(
            temperatures,
            dg,
            self.config.gas_ratio_clamp,
            self.config.min_temperature,
        )
    }

    /// ln(pO₂) at which ΔG_eff + (x/2)·R·T·ln(pO₂) = 0
    pub fn oxygen_potential_required(
        &self,
        material: &str,
        temperatures: &[f64],
        electric_field: f64,
        particle_radius: f64,
    ) -> Curve {
        let Some(m) = self.database.resolve(material) else {
            return self.not_found(material, temperatures.len());
        };
        let x = m.stoichiometry.n_nonmetal;
        let mut curve =
            self.off_equilibrium_dg(material, temperatures, electric_field, particle_radius);

        for (g, &t) in curve.values.iter_mut().zip(temperatures) {
            *g = if t > self.config.min_temperature {
                -2.0 * *g * J_PER_KJ / (x * GAS_CONSTANT * t)
            } else {
                f64::NAN
            };
        }
        let degenerate = self.degenerate_count(temperatures);
        if degenerate > 0 {
            curve.push(Self::degenerate(degenerate, "R·T denominator vanishes"));
        }
        curve
    }

    /// ΔG° of water formation per mol H₂O and whether it came from data
    fn water_dg(&self, temperatures: &[f64]) -> Curve {
        let reference = &self.config.water_reference;
        if self.database.contains(reference) {
            return self.database.interpolate_dg(reference, temperatures);
        }
        log::warn!(
            "water reference '{}' missing, using linear approximation",
            reference
        );
        let fallback = self.config.water_fallback;
        Curve::new(Vector::from_iterator(
            temperatures.len(),
            temperatures.iter().map(|&t| fallback.evaluate(t)),
        ))
        .with_diagnostic(Diagnostic::MissingReferenceData {
            what: format!("{} formation curve", reference),
        })
    }

    /// ln K_H with K_H = exp(−ΔG°_H2O·1000/(R·T))
    fn ln_h2_h2o_constant(&self, temperatures: &[f64]) -> Curve {
        let mut curve = self.water_dg(temperatures);
        for (g, &t) in curve.values.iter_mut().zip(temperatures) {
            *g = if t > self.config.min_temperature {
                -*g * J_PER_KJ / (GAS_CONSTANT * t)
            } else {
                f64::NAN
            };
        }
        let degenerate = self.degenerate_count(temperatures);
        if degenerate > 0 {
            curve.push(Self::degenerate(degenerate, "R·T denominator vanishes"));
        }
        curve
    }

    /// H₂ + ½O₂ ⇌ H₂O equilibrium constant K_H(T)
    pub fn h2_h2o_equilibrium_constant(&self, temperatures: &[f64]) -> Curve {
        let mut curve = self.ln_h2_h2o_constant(temperatures);
        curve.values.apply(|v| *v = v.exp());
        curve
    }

    /// H₂/H₂O = 1 / (K_H·√pO₂_req), evaluated in log space
    pub fn h2_h2o_ratio_required(
        &self,
        material: &str,
        temperatures: &[f64],
        electric_field: f64,
        particle_radius: f64,
    ) -> Curve {
        let ln_po2 =
            self.oxygen_potential_required(material, temperatures, electric_field, particle_radius);
        if ln_po2.is_not_found() {
            return ln_po2;
        }
        let ln_k = self.ln_h2_h2o_constant(temperatures);

        let mut curve = Curve::new(-&ln_k.values - ln_po2.values.scale(0.5));
        curve.values.apply(|v| *v = v.exp());
        curve.extend(ln_po2.diagnostics);
        curve.extend(ln_k.diagnostics);

        // Overflow means K_H·√pO₂ vanished
        let mut overflow = 0;
        curve.values.apply(|v| {
            if v.is_infinite() {
                *v = f64::NAN;
                overflow += 1;
            }
        });
        if overflow > 0 {
            log::warn!("{}: {} H₂/H₂O ratio sample(s) overflowed", material, overflow);
            curve.push(Self::degenerate(overflow, "K_H·√pO₂ vanishes"));
        }
        curve
    }

    /// Required p_H₂ (atm) = ratio × p_H₂O; `p_h2o` defaults to the config
    pub fn h2_partial_pressure_required(
        &self,
        material: &str,
        temperatures: &[f64],
        electric_field: f64,
        particle_radius: f64,
        p_h2o: Option<f64>,
    ) -> Curve {
        let p_h2o = p_h2o.unwrap_or(self.config.default_p_h2o);
        let mut curve =
            self.h2_h2o_ratio_required(material, temperatures, electric_field, particle_radius);
        curve.values *= p_h2o;
        curve
    }

    // ========================
    // Crossover and envelope
    // ========================

    /// First temperature on the configured grid where ΔG_eff crosses zero
    ///
    /// The grid is clipped to the material's fit range so the scan itself
    /// never extrapolates. A fit range disjoint from the grid scans the full
    /// grid and reports the extrapolation.
    pub fn crossover_temperature(
        &self,
        material: &str,
        electric_field: f64,
        particle_radius: f64,
    ) -> Crossover {
        let grid = self.config.crossover_grid;
        let (t_min, t_max) = match self.database.resolve(material) {
            Some(m) => {
                let (lo, hi) = m.temperature_range;
                let (t_min, t_max) = (grid.t_min.max(lo), grid.t_max.min(hi));
                if t_min < t_max {
                    (t_min, t_max)
                } else {
                    (grid.t_min, grid.t_max)
                }
            }
            None => (grid.t_min, grid.t_max),
        };
        let temperatures = math::linspace(t_min, t_max, grid.samples);
        let dg = self.off_equilibrium_dg(
            material,
            temperatures.as_slice(),
            electric_field,
            particle_radius,
        );
        let temperature = math::first_zero_crossing(temperatures.as_slice(), dg.as_slice());
        log::debug!("{}: crossover temperature {:?}", material, temperature);
        Crossover {
            temperature,
            diagnostics: dg.diagnostics,
        }
    }

    fn field_diagnostics(&self, electric_field: f64, particle_radius: f64) -> Vec<Diagnostic> {
        let envelope = &self.config.envelope;
        let mut diagnostics = Vec::new();
        // E = 0 is the exact equilibrium limit
        if electric_field != 0.0 && !within(electric_field, envelope.field) {
            log::warn!("electric field {:.3e} V/m outside validated range", electric_field);
            diagnostics.push(out_of_range(Quantity::ElectricField, 1, envelope.field));
        }
        if !within(particle_radius, envelope.radius) {
            log::warn!("particle radius {:.3e} m outside validated range", particle_radius);
            diagnostics.push(out_of_range(Quantity::ParticleRadius, 1, envelope.radius));
        }
        diagnostics
    }

    /// Flag inputs outside the validated envelope
    ///
    /// Nothing is rejected; the returned diagnostics downgrade confidence.
    pub fn check_envelope(
        &self,
        temperatures: &[f64],
        electric_field: f64,
        particle_radius: f64,
    ) -> Vec<Diagnostic> {
        let bounds = self.config.envelope.temperature;
        let outside = temperatures.iter().filter(|&&t| !within(t, bounds)).count();
        let mut diagnostics = Vec::new();
        if outside > 0 {
            diagnostics.push(out_of_range(Quantity::Temperature, outside, bounds));
        }
        diagnostics.extend(self.field_diagnostics(electric_field, particle_radius));
        diagnostics
    }
}

fn within(value: f64, (min, max): (f64, f64)) -> bool {
    value >= min && value <= max
}

fn out_of_range(quantity: Quantity, count: usize, (min, max): (f64, f64)) -> Diagnostic {
    Diagnostic::OutOfRange {
        quantity,
        count,
        min,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{Category, DgPolynomial, Stoichiometry};
    use approx::assert_relative_eq;

    fn database() -> MaterialDatabase {
        MaterialDatabase::reference().unwrap()
    }

    #[test]
    fn test_electric_term() {
        assert_relative_eq!(electric_term(4.0, 2e6, 5e-6), -3859.4, epsilon = 1e-9);
    }

    #[test]
    fn test_off_equilibrium_decomposition() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        let eq = engine.equilibrium_dg("TiO2", &[1000.0]).values[0];
        let eff = engine.off_equilibrium_dg("TiO2", &[1000.0], 2e6, 5e-6);
        assert_relative_eq!(eff.values[0], eq - 3859.4 - 20.0, epsilon = 1e-9);
        assert_eq!(eff.confidence(), Confidence::High);
    }

    #[test]
    fn test_default_w_ph_is_flagged() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        let curve = engine.off_equilibrium_dg("TiN", &[1000.0], 1e6, 1e-6);
        assert_eq!(curve.confidence(), Confidence::Low);
        let b = engine.off_equilibrium_breakdown("TiN", 1000.0, 1e6, 1e-6);
        assert_eq!(b.w_ph_source, WphSource::Default);
        assert_eq!(b.w_ph, 20.0);
    }

    #[test]
    fn test_unknown_material_is_nan() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        let curve = engine.off_equilibrium_dg("Unobtainium", &[900.0, 1000.0], 1e6, 1e-6);
        assert!(curve.values.iter().all(|v| v.is_nan()));
        assert!(curve.is_not_found());
        let b = engine.off_equilibrium_breakdown("Unobtainium", 1000.0, 1e6, 1e-6);
        assert_eq!(b.feasibility, Feasibility::Undefined);
    }

    #[test]
    fn test_po2_scale_is_constant() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        let curve = engine.po2_scale(&[500.0, 1500.0, 0.0]);
        let expected = 101325.0_f64.log10();
        assert_relative_eq!(curve.values[0], expected);
        assert_relative_eq!(curve.values[1], expected);
        assert!(curve.values[2].is_nan());
    }

    #[test]
    fn test_water_fallback_flagged() {
        let db = MaterialDatabase::new();
        let engine = ThermodynamicEngine::new(&db);
        let k = engine.h2_h2o_equilibrium_constant(&[1000.0]);
        let expected = (228.0 - 0.044 * 702.0) * 1000.0 / (GAS_CONSTANT * 1000.0);
        assert_relative_eq!(k.values[0].ln(), expected, epsilon = 1e-9);
        assert!(matches!(k.diagnostics[0], Diagnostic::MissingReferenceData { .. }));
        assert_eq!(k.confidence(), Confidence::Medium);
    }

    #[test]
    fn test_water_reference_used() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        let k = engine.h2_h2o_equilibrium_constant(&[1000.0]);
        assert!(k.diagnostics.is_empty());
        let dg = -246.0 + 0.0547 * 1000.0;
        assert_relative_eq!(
            k.values[0].ln(),
            -dg * 1000.0 / (GAS_CONSTANT * 1000.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_h2_pressure_chain() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        let t = [1200.0];
        let ln_po2 = engine.oxygen_potential_required("TiO2", &t, 0.0, 1e-6).values[0];
        let k = engine.h2_h2o_equilibrium_constant(&t).values[0];
        let ratio = engine.h2_h2o_ratio_required("TiO2", &t, 0.0, 1e-6).values[0];
        assert_relative_eq!(ratio, 1.0 / (k * (ln_po2 / 2.0).exp()), max_relative = 1e-9);
        let p = engine.h2_partial_pressure_required("TiO2", &t, 0.0, 1e-6, None).values[0];
        assert_relative_eq!(p, ratio * 0.01, max_relative = 1e-12);
    }

    #[test]
    fn test_crossover_of_linear_material() {
        let mut db = MaterialDatabase::new();
        db.insert(
            Material::new(
                "Synthetic",
                "MX",
                "M",
                Category::Oxide,
                DgPolynomial::linear(-1000.0, 1.0),
                (300.0, 2400.0),
                Stoichiometry::new(4.0, 2.0),
            )
            .with_w_ph(0.0),
        )
        .unwrap();
        let engine = ThermodynamicEngine::new(&db);
        let crossover = engine.crossover_temperature("Synthetic", 0.0, 1e-6);
        assert_relative_eq!(crossover.temperature.unwrap(), 1000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_crossover_scan_stays_in_fit_range() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        // CeO2 is fitted to 2000 K, below the grid's upper bound
        let crossover = engine.crossover_temperature("CeO2", 0.0, 5e-6);
        assert!(!crossover.diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::OutOfRange {
                quantity: Quantity::Temperature,
                ..
            }
        )));
        assert_eq!(crossover.confidence(), Confidence::High);
    }

    #[test]
    fn test_h2_ratio_overflow_marked_undefined() {
        let mut db = MaterialDatabase::new();
        db.insert(
            Material::new(
                "Refractory",
                "MX",
                "M",
                Category::Oxide,
                DgPolynomial::linear(1e5, 0.0),
                (200.0, 2400.0),
                Stoichiometry::new(4.0, 2.0),
            )
            .with_w_ph(0.0),
        )
        .unwrap();
        let engine = ThermodynamicEngine::new(&db);
        let ratio = engine.h2_h2o_ratio_required("Refractory", &[300.0, 1000.0], 0.0, 5e-6);
        assert!(ratio.values[0].is_nan());
        assert!(ratio.values[1].is_nan());
        assert!(ratio.diagnostics.iter().any(|d| matches!(
            d,
            Diagnostic::NumericDegenerate { count: 2, .. }
        )));
        assert_eq!(ratio.confidence(), Confidence::Medium);
    }

    #[test]
    fn test_no_crossover_for_stable_oxide() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        assert!(engine.crossover_temperature("MgO", 0.0, 1e-6).temperature.is_none());
    }

    #[test]
    fn test_envelope_flags() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        let diags = engine.check_envelope(&[200.0, 1000.0, 3500.0], 1e7, 5e-6);
        assert_eq!(diags.len(), 2);
        assert!(matches!(
            diags[0],
            Diagnostic::OutOfRange { quantity: Quantity::Temperature, count: 2, .. }
        ));
        assert!(engine.check_envelope(&[1000.0], 0.0, 5e-6).is_empty());
    }

    #[test]
    fn test_normalized_roundtrip() {
        let db = database();
        let engine = ThermodynamicEngine::new(&db);
        let t = [800.0, 1200.0];
        let raw = engine.normalized_dg("Al2O3", &t, NormalizationMode::Auto);
        let metal = engine.normalized_dg("Al2O3", &t, NormalizationMode::Metal);
        assert_eq!(raw.unit_label, "kJ/mol O₂");
        for i in 0..2 {
            assert_relative_eq!(
                metal.curve.values[i] / metal.factor,
                raw.curve.values[i],
                epsilon = 1e-9
            );
        }
    }
}
