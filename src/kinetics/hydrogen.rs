//! Hydrogen consumption for continuous processing

use serde::{Deserialize, Serialize};

use crate::constants::{H2_MOLAR_MASS, MOLAR_VOLUME_STP};
use crate::results::{confidence_of, Confidence, Diagnostic, Quantity};

use super::KineticModel;

/// Hydrogen requirement of a processing line
///
/// Full reduction consumes one H₂ per nonmetal atom (TiO₂ + 2H₂ → Ti + 2H₂O).
/// Fields that cannot be computed are NaN and explained by `diagnostics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrogenDemand {
    pub material: String,
    /// g/mol
    pub molecular_weight: f64,
    /// mol H₂ per kg compound
    pub moles_h2_per_kg: f64,
    /// kg H₂ per kg compound, stoichiometric
    pub mass_h2_per_kg: f64,
    /// kg H₂ per kg compound after utilisation losses
    pub actual_mass_h2_per_kg: f64,
    /// kg compound per hour
    pub processing_rate: f64,
    /// kg H₂ per hour
    pub h2_mass_flow: f64,
    /// m³/h at STP
    pub h2_volumetric_flow: f64,
    /// m³/h at STP
    pub total_gas_flow: f64,
    /// m³/h at STP
    pub carrier_gas_flow: f64,
    pub diagnostics: Vec<Diagnostic>,
}

impl HydrogenDemand {
    fn undefined(material: &str, processing_rate: f64, diagnostic: Diagnostic) -> Self {
        Self {
            material: material.to_string(),
            molecular_weight: f64::NAN,
            moles_h2_per_kg: f64::NAN,
            mass_h2_per_kg: f64::NAN,
            actual_mass_h2_per_kg: f64::NAN,
            processing_rate,
            h2_mass_flow: f64::NAN,
            h2_volumetric_flow: f64::NAN,
            total_gas_flow: f64::NAN,
            carrier_gas_flow: f64::NAN,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn confidence(&self) -> Confidence {
        confidence_of(&self.diagnostics)
    }

    pub fn is_not_found(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::NotFound { .. }))
    }
}

fn out_of_range(quantity: Quantity, min: f64, max: f64) -> Diagnostic {
    Diagnostic::OutOfRange {
        quantity,
        count: 1,
        min,
        max,
    }
}

impl<'a> KineticModel<'a> {
    /// H₂ consumption for `processing_rate` kg/h of compound
    ///
    /// `efficiency` defaults to the configured utilisation. An unknown
    /// material or missing molecular weight leaves every quantity NaN. A
    /// processing rate, H₂ fraction or efficiency outside its domain leaves
    /// only the quantities that depend on it NaN.
    pub fn hydrogen_demand(
        &self,
        material: &str,
        processing_rate: f64,
        h2_fraction: f64,
        efficiency: Option<f64>,
    ) -> HydrogenDemand {
        let Some(m) = self.thermo().database().resolve(material) else {
            log::warn!("material '{}' not found in database", material);
            let diagnostic = Diagnostic::NotFound {
                material: material.to_string(),
            };
            return HydrogenDemand::undefined(material, processing_rate, diagnostic);
        };
        let Some(molecular_weight) = m.molecular_weight else {
            log::warn!("{}: molecular weight unknown", m.name);
            let diagnostic = Diagnostic::MissingReferenceData {
                what: format!("{} molecular weight", m.name),
            };
            return HydrogenDemand::undefined(&m.name, processing_rate, diagnostic);
        };

        let mut diagnostics = Vec::new();
        let efficiency = match efficiency {
            Some(e) => e,
            None => {
                let e = self.thermo().config().reactor.h2_efficiency;
                diagnostics.push(Diagnostic::DefaultParameter {
                    parameter: "h2_efficiency".to_string(),
                    value: e,
                });
                e
            }
        };

        let moles_compound_per_kg = 1000.0 / molecular_weight;
        let moles_h2_per_kg = moles_compound_per_kg * m.stoichiometry.n_nonmetal;
        let mass_h2_per_kg = moles_h2_per_kg * H2_MOLAR_MASS / 1000.0;

        let actual_mass_h2_per_kg = if efficiency > 0.0 && efficiency <= 1.0 {
            mass_h2_per_kg / efficiency
        } else {
            log::warn!("{}: H₂ efficiency {} outside (0, 1]", m.name, efficiency);
            diagnostics.push(out_of_range(Quantity::Efficiency, 0.0, 1.0));
            f64::NAN
        };

        let (h2_mass_flow, h2_volumetric_flow) = if processing_rate > 0.0
            && processing_rate.is_finite()
        {
            let mass_flow = processing_rate * mass_h2_per_kg;
            // kg/h ÷ kg/kmol × m³/kmol
            (mass_flow, mass_flow * MOLAR_VOLUME_STP / H2_MOLAR_MASS)
        } else {
            log::warn!("{}: processing rate {} kg/h is not positive", m.name, processing_rate);
            diagnostics.push(out_of_range(Quantity::ProcessingRate, 0.0, f64::MAX));
            (f64::NAN, f64::NAN)
        };

        let total_gas_flow = if h2_fraction > 0.0 && h2_fraction <= 1.0 {
            h2_volumetric_flow / h2_fraction
        } else {
            log::warn!("{}: H₂ fraction {} outside (0, 1]", m.name, h2_fraction);
            diagnostics.push(out_of_range(Quantity::GasFraction, 0.0, 1.0));
            f64::NAN
        };

        HydrogenDemand {
            material: m.name.clone(),
            molecular_weight,
            moles_h2_per_kg,
            mass_h2_per_kg,
            actual_mass_h2_per_kg,
            processing_rate,
            h2_mass_flow,
            h2_volumetric_flow,
            total_gas_flow,
            carrier_gas_flow: total_gas_flow - h2_volumetric_flow,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialDatabase;
    use approx::assert_relative_eq;

    #[test]
    fn test_rutile_demand() {
        let db = MaterialDatabase::reference().unwrap();
        let model = KineticModel::new(&db);
        let d = model.hydrogen_demand("TiO2", 10.0, 0.25, Some(0.95));
        let moles = 1000.0 / 79.9 * 2.0;
        assert_relative_eq!(d.moles_h2_per_kg, moles, epsilon = 1e-9);
        assert_relative_eq!(d.h2_mass_flow, 10.0 * moles * 2.016 / 1000.0, epsilon = 1e-12);
        assert_relative_eq!(d.total_gas_flow, 4.0 * d.h2_volumetric_flow, epsilon = 1e-12);
        assert_relative_eq!(d.carrier_gas_flow, 3.0 * d.h2_volumetric_flow, epsilon = 1e-12);
        assert!(d.diagnostics.is_empty());
        assert_eq!(d.confidence(), Confidence::High);
    }

    #[test]
    fn test_default_efficiency_flagged() {
        let db = MaterialDatabase::reference().unwrap();
        let model = KineticModel::new(&db);
        let d = model.hydrogen_demand("TiO2", 10.0, 0.25, None);
        assert_relative_eq!(d.actual_mass_h2_per_kg, d.mass_h2_per_kg / 0.95, epsilon = 1e-12);
        assert_eq!(d.confidence(), Confidence::Low);
    }

    #[test]
    fn test_unknown_material_is_reported() {
        let db = MaterialDatabase::reference().unwrap();
        let model = KineticModel::new(&db);
        let d = model.hydrogen_demand("Unobtainium", 10.0, 0.25, None);
        assert!(d.is_not_found());
        assert!(d.h2_mass_flow.is_nan());
        assert_eq!(d.confidence(), Confidence::Low);
    }

    #[test]
    fn test_missing_molecular_weight() {
        let mut db = MaterialDatabase::reference().unwrap();
        let mut m = db.get("TiO2").unwrap().clone();
        m.name = "TiO2-bare".to_string();
        m.molecular_weight = None;
        db.insert(m).unwrap();
        let model = KineticModel::new(&db);
        let d = model.hydrogen_demand("TiO2-bare", 10.0, 0.25, None);
        assert!(d.moles_h2_per_kg.is_nan());
        assert!(matches!(
            d.diagnostics.as_slice(),
            [Diagnostic::MissingReferenceData { .. }]
        ));
    }

    #[test]
    fn test_negative_processing_rate_flagged() {
        let db = MaterialDatabase::reference().unwrap();
        let model = KineticModel::new(&db);
        let d = model.hydrogen_demand("TiO2", -10.0, 0.25, Some(0.95));
        assert!(d.h2_mass_flow.is_nan());
        assert!(d.total_gas_flow.is_nan());
        assert!(d.mass_h2_per_kg > 0.0);
        assert!(d.diagnostics.iter().any(|diag| matches!(
            diag,
            Diagnostic::OutOfRange {
                quantity: Quantity::ProcessingRate,
                ..
            }
        )));
    }

    #[test]
    fn test_zero_fraction_flagged() {
        let db = MaterialDatabase::reference().unwrap();
        let model = KineticModel::new(&db);
        let d = model.hydrogen_demand("TiO2", 10.0, 0.0, Some(0.95));
        assert!(d.h2_volumetric_flow.is_finite());
        assert!(d.total_gas_flow.is_nan());
        assert!(d.carrier_gas_flow.is_nan());
        assert_eq!(d.confidence(), Confidence::Medium);
    }
}
