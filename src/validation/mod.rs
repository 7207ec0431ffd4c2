//! Cross-checks of computed flash quantities against literature values
//!
//! Every check returns a confidence tier and a readable message. A material
//! without reference data gets `Confidence::Low` and `no_data = true`; nothing
//! is guessed.

pub mod reference;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::results::Confidence;

pub use reference::{
    literature_references, DiffusionReference, LiteratureReference, ParameterReference,
};

/// Flash temperature and field threshold check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashValidation {
    pub material: String,
    pub no_data: bool,
    /// Both thresholds reached
    pub valid: bool,
    pub temperature_valid: bool,
    pub field_valid: bool,
    /// |T − T_flash| / T_flash
    pub temperature_deviation: Option<f64>,
    /// |E − E_flash| / E_flash
    pub field_deviation: Option<f64>,
    pub confidence: Confidence,
    pub source: Option<String>,
    pub doi: Option<String>,
    pub message: String,
}

/// Relative deviation of a computed quantity from its reference value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviationValidation {
    pub material: String,
    pub no_data: bool,
    pub valid: bool,
    pub calculated: f64,
    pub reference: Option<f64>,
    pub deviation: Option<f64>,
    pub confidence: Confidence,
    pub source: Option<String>,
    pub doi: Option<String>,
    pub message: String,
}

/// Diffusion parameters looked up at an operating temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffusionValidation {
    pub material: String,
    pub no_data: bool,
    /// No parameter was used outside its measured range
    pub valid: bool,
    pub activation_energy: Option<f64>,
    pub pre_exponential: Option<f64>,
    pub field_enhancement: Option<f64>,
    pub confidence: Confidence,
    pub warnings: Vec<String>,
    pub source: Option<String>,
}

/// All checks for one operating point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub material: String,
    /// K
    pub temperature: f64,
    /// V/m
    pub electric_field: f64,
    /// m
    pub particle_radius: f64,
    pub flash_conditions: FlashValidation,
    pub diffusion_parameters: DiffusionValidation,
    pub enhancement_factor: Option<DeviationValidation>,
    pub conversion_time: Option<DeviationValidation>,
    pub overall_confidence: Confidence,
}

/// Bands of a relative-deviation check: (high, medium, valid) upper bounds
#[derive(Debug, Clone, Copy)]
struct DeviationBands {
    high: f64,
    medium: f64,
    valid: f64,
}

const ENHANCEMENT_BANDS: DeviationBands = DeviationBands {
    high: 0.1,
    medium: 0.3,
    valid: 0.5,
};

const CONVERSION_TIME_BANDS: DeviationBands = DeviationBands {
    high: 0.2,
    medium: 0.5,
    valid: 1.0,
};

/// Flash conditions are "high" within this deviation of both thresholds
const FLASH_HIGH_DEVIATION: f64 = 0.1;
/// Deviations above this are spelled out in the flash message
const FLASH_REPORT_DEVIATION: f64 = 0.2;

fn relative_deviation(value: f64, reference: f64) -> f64 {
    (value - reference).abs() / reference
}

/// Literature comparison utility
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    references: HashMap<String, LiteratureReference>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    /// Engine over the built-in literature table
    pub fn new() -> Self {
        Self {
            references: literature_references().into_iter().collect(),
        }
    }

    /// Engine with no reference data
    pub fn empty() -> Self {
        Self {
            references: HashMap::new(),
        }
    }

    /// Add or replace a reference entry
    pub fn with_reference(mut self, material: &str, reference: LiteratureReference) -> Self {
        self.references.insert(material.to_string(), reference);
        self
    }

    pub fn reference(&self, material: &str) -> Option<&LiteratureReference> {
        self.references.get(material)
    }

    pub fn materials(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.references.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn no_data_message(material: &str) -> String {
        format!("No experimental data available for {}", material)
    }

    /// Compare an operating point with the measured flash onset
    pub fn validate_flash_conditions(
        &self,
        material: &str,
        temperature: f64,
        electric_field: f64,
    ) -> FlashValidation {
        let Some(reference) = self.reference(material) else {
            return FlashValidation {
                material: material.to_string(),
                no_data: true,
                valid: false,
                temperature_valid: false,
                field_valid: false,
                temperature_deviation: None,
                field_deviation: None,
                confidence: Confidence::Low,
                source: None,
                doi: None,
                message: Self::no_data_message(material),
            };
        };

        let temperature_valid = temperature >= reference.flash_temperature;
        let field_valid = electric_field >= reference.field_threshold;
        let t_dev = relative_deviation(temperature, reference.flash_temperature);
        let e_dev = relative_deviation(electric_field, reference.field_threshold);

        let confidence = if temperature_valid
            && field_valid
            && t_dev < FLASH_HIGH_DEVIATION
            && e_dev < FLASH_HIGH_DEVIATION
        {
            Confidence::High
        } else if temperature_valid && field_valid {
            Confidence::Medium
        } else {
            Confidence::Low
        };

        let mut warnings = Vec::new();
        if !temperature_valid {
            warnings.push("Temperature below flash threshold".to_string());
        }
        if !field_valid {
            warnings.push("Field below flash threshold".to_string());
        }
        if t_dev > FLASH_REPORT_DEVIATION {
            warnings.push(format!("Temperature deviation: {:.1}%", t_dev * 100.0));
        }
        if e_dev > FLASH_REPORT_DEVIATION {
            warnings.push(format!("Field deviation: {:.1}%", e_dev * 100.0));
        }
        let message = if warnings.is_empty() {
            "Conditions within experimental range".to_string()
        } else {
            warnings.join("; ")
        };

        FlashValidation {
            material: material.to_string(),
            no_data: false,
            valid: temperature_valid && field_valid,
            temperature_valid,
            field_valid,
            temperature_deviation: Some(t_dev),
            field_deviation: Some(e_dev),
            confidence,
            source: Some(reference.source.clone()),
            doi: Some(reference.doi.clone()),
            message,
        }
    }

    fn validate_deviation(
        &self,
        material: &str,
        calculated: f64,
        what: &str,
        bands: DeviationBands,
        pick: impl Fn(&LiteratureReference) -> f64,
    ) -> DeviationValidation {
        let Some(reference) = self.reference(material) else {
            return DeviationValidation {
                material: material.to_string(),
                no_data: true,
                valid: false,
                calculated,
                reference: None,
                deviation: None,
                confidence: Confidence::Low,
                source: None,
                doi: None,
                message: Self::no_data_message(material),
            };
        };

        let expected = pick(reference);
        let deviation = relative_deviation(calculated, expected);
        let (confidence, message) = if deviation < bands.high {
            (Confidence::High, format!("{} matches experimental data", what))
        } else if deviation < bands.medium {
            (
                Confidence::Medium,
                format!(
                    "{} within acceptable range (deviation: {:.1}%)",
                    what,
                    deviation * 100.0
                ),
            )
        } else {
            (
                Confidence::Low,
                format!(
                    "WARNING: {} deviates significantly from experimental data (deviation: {:.1}%)",
                    what,
                    deviation * 100.0
                ),
            )
        };

        DeviationValidation {
            material: material.to_string(),
            no_data: false,
            valid: deviation < bands.valid,
            calculated,
            reference: Some(expected),
            deviation: Some(deviation),
            confidence,
            source: Some(reference.source.clone()),
            doi: Some(reference.doi.clone()),
            message,
        }
    }

    /// Compare a computed flash enhancement factor
    pub fn validate_enhancement_factor(
        &self,
        material: &str,
        calculated: f64,
    ) -> DeviationValidation {
        self.validate_deviation(
            material,
            calculated,
            "Enhancement factor",
            ENHANCEMENT_BANDS,
            |r| r.enhancement_factor,
        )
    }

    /// Compare a computed 95 % conversion time (s)
    pub fn validate_conversion_time(&self, material: &str, calculated: f64) -> DeviationValidation {
        self.validate_deviation(
            material,
            calculated,
            "Conversion time",
            CONVERSION_TIME_BANDS,
            |r| r.conversion_time_95,
        )
    }

    /// Check that the diffusion parameters were measured around `temperature`
    pub fn validate_diffusion_parameters(
        &self,
        material: &str,
        temperature: f64,
    ) -> DiffusionValidation {
        let Some(reference) = self.reference(material) else {
            return DiffusionValidation {
                material: material.to_string(),
                no_data: true,
                valid: false,
                activation_energy: None,
                pre_exponential: None,
                field_enhancement: None,
                confidence: Confidence::Low,
                warnings: vec![format!("No diffusion data available for {}", material)],
                source: None,
            };
        };

        let d = &reference.diffusion;
        let mut warnings = Vec::new();
        let mut tiers = Vec::with_capacity(3);
        for (label, param) in [
            ("Activation energy", &d.activation_energy),
            ("Pre-exponential", &d.pre_exponential),
            ("Field enhancement", &d.field_enhancement),
        ] {
            if param.covers(temperature) {
                tiers.push(Confidence::High);
            } else {
                let (lo, hi) = param.valid_range;
                warnings.push(format!(
                    "{}: temperature {:.0} K outside valid range {:.0}-{:.0} K for {}",
                    label, temperature, lo, hi, material
                ));
                tiers.push(Confidence::Medium);
            }
        }

        DiffusionValidation {
            material: material.to_string(),
            no_data: false,
            valid: warnings.is_empty(),
            activation_energy: Some(d.activation_energy.value),
            pre_exponential: Some(d.pre_exponential.value),
            field_enhancement: Some(d.field_enhancement.value),
            confidence: Confidence::aggregate(tiers),
            warnings,
            source: Some(d.activation_energy.source.clone()),
        }
    }

    /// Run every applicable check
    ///
    /// Enhancement factor and conversion time are only checked when given.
    pub fn validate_all(
        &self,
        material: &str,
        temperature: f64,
        electric_field: f64,
        particle_radius: f64,
        enhancement_factor: Option<f64>,
        conversion_time: Option<f64>,
    ) -> ValidationReport {
        let flash_conditions =
            self.validate_flash_conditions(material, temperature, electric_field);
        let diffusion_parameters = self.validate_diffusion_parameters(material, temperature);
        let enhancement_factor =
            enhancement_factor.map(|f| self.validate_enhancement_factor(material, f));
        let conversion_time = conversion_time.map(|t| self.validate_conversion_time(material, t));

        let tiers = [
            Some(flash_conditions.confidence),
            Some(diffusion_parameters.confidence),
            enhancement_factor.as_ref().map(|v| v.confidence),
            conversion_time.as_ref().map(|v| v.confidence),
        ];
        let overall_confidence = Confidence::aggregate(tiers.into_iter().flatten());
        log::debug!("{}: validation confidence {}", material, overall_confidence);

        ValidationReport {
            material: material.to_string(),
            temperature,
            electric_field,
            particle_radius,
            flash_conditions,
            diffusion_parameters,
            enhancement_factor,
            conversion_time,
            overall_confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flash_high_confidence() {
        let engine = ValidationEngine::new();
        let v = engine.validate_flash_conditions("TiO2", 1150.0, 1.05e6);
        assert!(v.valid);
        assert_eq!(v.confidence, Confidence::High);
        assert_eq!(v.message, "Conditions within experimental range");
    }

    #[test]
    fn test_flash_below_threshold() {
        let engine = ValidationEngine::new();
        let v = engine.validate_flash_conditions("TiO2", 900.0, 2e6);
        assert!(!v.valid);
        assert_eq!(v.confidence, Confidence::Low);
        assert!(v.message.contains("Temperature below flash threshold"));
        assert!(v.message.contains("Field deviation: 100.0%"));
    }

    #[test]
    fn test_flash_medium_when_far_above() {
        let engine = ValidationEngine::new();
        let v = engine.validate_flash_conditions("ZrO2", 1500.0, 2e6);
        assert_eq!(v.confidence, Confidence::Medium);
    }

    #[test]
    fn test_enhancement_bands() {
        let engine = ValidationEngine::new();
        assert_eq!(engine.validate_enhancement_factor("TiO2", 52.0).confidence, Confidence::High);
        assert_eq!(engine.validate_enhancement_factor("TiO2", 60.0).confidence, Confidence::Medium);
        let far = engine.validate_enhancement_factor("TiO2", 70.0);
        assert_eq!(far.confidence, Confidence::Low);
        assert!(far.valid);
        assert!(!engine.validate_enhancement_factor("TiO2", 80.0).valid);
        assert_relative_eq!(far.deviation.unwrap(), 0.4);
    }

    #[test]
    fn test_conversion_time_bands() {
        let engine = ValidationEngine::new();
        assert_eq!(engine.validate_conversion_time("Fe2O3", 50.0).confidence, Confidence::High);
        assert_eq!(engine.validate_conversion_time("Fe2O3", 60.0).confidence, Confidence::Medium);
        let slow = engine.validate_conversion_time("Fe2O3", 85.0);
        assert_eq!(slow.confidence, Confidence::Low);
        assert!(slow.valid);
    }

    #[test]
    fn test_absent_material_is_low_with_no_data() {
        let engine = ValidationEngine::new();
        let v = engine.validate_enhancement_factor("CeO2", 40.0);
        assert!(v.no_data);
        assert_eq!(v.confidence, Confidence::Low);
        assert!(v.reference.is_none());
        assert!(engine.validate_flash_conditions("CeO2", 1200.0, 1e6).no_data);
    }

    #[test]
    fn test_diffusion_ranges() {
        let engine = ValidationEngine::new();
        assert_eq!(
            engine.validate_diffusion_parameters("TiO2", 1200.0).confidence,
            Confidence::High
        );
        // Ea and D₀ in range, α not
        let v = engine.validate_diffusion_parameters("TiO2", 900.0);
        assert_eq!(v.confidence, Confidence::Medium);
        assert_eq!(v.warnings.len(), 1);
        assert_eq!(
            engine.validate_diffusion_parameters("TiO2", 2000.0).confidence,
            Confidence::Low
        );
    }

    #[test]
    fn test_overall_confidence() {
        let engine = ValidationEngine::new();
        let all = engine.validate_all("TiO2", 1150.0, 1.05e6, 5e-6, Some(50.0), Some(60.0));
        assert_eq!(all.overall_confidence, Confidence::High);
        let mixed = engine.validate_all("TiO2", 1150.0, 1.05e6, 5e-6, Some(90.0), None);
        assert_eq!(mixed.overall_confidence, Confidence::Medium);
        let none = engine.validate_all("CeO2", 1150.0, 1.05e6, 5e-6, None, None);
        assert_eq!(none.overall_confidence, Confidence::Low);
    }
}
