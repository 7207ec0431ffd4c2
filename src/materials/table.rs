//! Tabulated formation free energies and least-squares fitting

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::math;

use super::material::{Category, DataSource, DgPolynomial, Material, Stoichiometry};

/// One row of a JANAF-style table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Temperature (K)
    pub temperature: f64,
    /// ΔfG° per formula unit (kJ/mol)
    pub dg: f64,
}

/// Formation free energy of one compound tabulated against temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JanafTable {
    pub formula: String,
    pub category: Category,
    pub stoichiometry: Stoichiometry,
    /// Rows sorted by ascending temperature
    rows: Vec<TableRow>,
}

impl JanafTable {
    /// Build a table; rows are sorted and non-finite rows dropped
    pub fn new(
        formula: &str,
        category: Category,
        stoichiometry: Stoichiometry,
        rows: Vec<TableRow>,
    ) -> EngineResult<Self> {
        let mut rows: Vec<TableRow> = rows
            .into_iter()
            .filter(|r| r.temperature.is_finite() && r.dg.is_finite())
            .collect();
        if rows.is_empty() {
            return Err(EngineError::InsufficientData(format!(
                "{}: table has no finite rows",
                formula
            )));
        }
        if !(stoichiometry.n_nonmetal > 0.0) {
            return Err(EngineError::InvalidInput(format!(
                "{}: n_nonmetal must be positive",
                formula
            )));
        }
        rows.sort_by(|a, b| a.temperature.total_cmp(&b.temperature));
        rows.dedup_by(|a, b| a.temperature == b.temperature);

        Ok(Self {
            formula: formula.to_string(),
            category,
            stoichiometry,
            rows,
        })
    }

    /// Build from parallel temperature / ΔfG slices
    pub fn from_columns(
        formula: &str,
        category: Category,
        stoichiometry: Stoichiometry,
        temperatures: &[f64],
        dg: &[f64],
    ) -> EngineResult<Self> {
        if temperatures.len() != dg.len() {
            return Err(EngineError::ShapeMismatch {
                expected: temperatures.len(),
                found: dg.len(),
            });
        }
        let rows = temperatures
            .iter()
            .zip(dg)
            .map(|(&temperature, &dg)| TableRow { temperature, dg })
            .collect();
        Self::new(formula, category, stoichiometry, rows)
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Covered temperature range (K)
    pub fn temperature_range(&self) -> (f64, f64) {
        let first = self.rows.first().map_or(f64::NAN, |r| r.temperature);
        let last = self.rows.last().map_or(f64::NAN, |r| r.temperature);
        (first, last)
    }

    /// Formula units per reference nonmetal unit
    ///
    /// TiO2 has two O atoms and the oxide reference unit is O₂, so ΔfG per
    /// formula unit is already per O₂. Al2O3 needs a factor of 2/3.
    fn units_per_reference(&self) -> f64 {
        let atoms = self.category.reference_unit().atoms as f64;
        atoms / self.stoichiometry.n_nonmetal
    }

    /// Rows rescaled to kJ per mole of reference nonmetal unit
    pub fn per_reference_unit(&self) -> Vec<TableRow> {
        let factor = self.units_per_reference();
        self.rows
            .iter()
            .map(|r| TableRow {
                temperature: r.temperature,
                dg: r.dg * factor,
            })
            .collect()
    }

    /// Linear interpolation of ΔG per reference unit
    ///
    /// Returns `None` outside the tabulated range.
    pub fn interpolate(&self, t: f64) -> Option<f64> {
        let (t_min, t_max) = self.temperature_range();
        if !(t >= t_min && t <= t_max) {
            return None;
        }
        let (xs, ys): (Vec<f64>, Vec<f64>) = self
            .per_reference_unit()
            .iter()
            .map(|r| (r.temperature, r.dg))
            .unzip();
        math::interp_linear(&xs, &ys, t)
    }

    /// Least-squares fit of ΔG per reference unit
    ///
    /// Quadratic when at least three rows exist, linear with two.
    pub fn fit(&self) -> EngineResult<DgPolynomial> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = self
            .per_reference_unit()
            .iter()
            .map(|r| (r.temperature, r.dg))
            .unzip();

        let coeffs = match xs.len() {
            0 | 1 => {
                return Err(EngineError::InsufficientData(format!(
                    "{}: need at least two rows to fit, got {}",
                    self.formula,
                    xs.len()
                )))
            }
            2 => math::polyfit(&xs, &ys, 1)?,
            _ => match math::polyfit(&xs, &ys, 2) {
                Ok(c) => c,
                Err(e) => {
                    log::debug!("{}: quadratic fit failed ({}), using linear", self.formula, e);
                    math::polyfit(&xs, &ys, 1)?
                }
            },
        };

        let a = coeffs.first().copied().unwrap_or(0.0);
        let b = coeffs.get(1).copied().unwrap_or(0.0);
        let c = coeffs.get(2).copied().unwrap_or(0.0);
        Ok(DgPolynomial::Quadratic { a, b, c })
    }

    /// Fit the table and wrap it as a database material
    pub fn into_material(self, name: &str, element: &str) -> EngineResult<Material> {
        let dg = self.fit()?;
        let range = self.temperature_range();
        let material = Material::new(
            name,
            &self.formula,
            element,
            self.category,
            dg,
            range,
            self.stoichiometry,
        )
        .with_source("JANAF table fit", DataSource::Calculated);
        material.validate()?;
        Ok(material)
    }
}
