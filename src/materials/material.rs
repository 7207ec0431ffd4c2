//! Material definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Compound class of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Oxide,
    Carbide,
    Nitride,
    Halide,
    Hydride,
    Sulfide,
    Phosphide,
    PureElement,
    Other,
}

/// Nonmetal unit that ΔG values of a category are expressed per mole of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceUnit {
    pub label: &'static str,
    /// Nonmetal atoms per reference unit (2 for O₂, 1 for C)
    pub atoms: u32,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Oxide,
        Category::Carbide,
        Category::Nitride,
        Category::Halide,
        Category::Hydride,
        Category::Sulfide,
        Category::Phosphide,
        Category::PureElement,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Oxide => "oxide",
            Category::Carbide => "carbide",
            Category::Nitride => "nitride",
            Category::Halide => "halide",
            Category::Hydride => "hydride",
            Category::Sulfide => "sulfide",
            Category::Phosphide => "phosphide",
            Category::PureElement => "pure_element",
            Category::Other => "other",
        }
    }

    pub fn reference_unit(&self) -> ReferenceUnit {
        let (label, atoms) = match self {
            Category::Oxide => ("O₂", 2),
            Category::Nitride => ("N₂", 2),
            Category::Carbide => ("C", 1),
            Category::Halide => ("X₂", 2),
            Category::Hydride => ("H₂", 2),
            Category::Sulfide => ("S₂", 2),
            Category::Phosphide => ("P₂", 2),
            Category::PureElement | Category::Other => ("formula unit", 1),
        };
        ReferenceUnit { label, atoms }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    /// Accepts singular and plural spellings ("oxide", "oxides")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_suffix('s').unwrap_or(&key);
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == key || c.as_str().trim_end_matches('s') == key)
            .ok_or_else(|| EngineError::InvalidInput(format!("unknown category '{}'", s)))
    }
}

/// Fitted standard free energy ΔG°(T) in kJ/mol nonmetal unit
///
/// Serialised as a 3- or 4-element coefficient array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub enum DgPolynomial {
    /// ΔG° = A + B·T + C·T²
    Quadratic { a: f64, b: f64, c: f64 },
    /// ΔG° = A + B·T + C·T·ln(T) + D·T²
    Extended { a: f64, b: f64, c: f64, d: f64 },
}

impl DgPolynomial {
    pub fn linear(a: f64, b: f64) -> Self {
        DgPolynomial::Quadratic { a, b, c: 0.0 }
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        match *self {
            DgPolynomial::Quadratic { a, b, c } => a + b * t + c * t * t,
            DgPolynomial::Extended { a, b, c, d } => {
                // T·ln(T) is undefined for T <= 0
                if t <= 0.0 {
                    return f64::NAN;
                }
                a + b * t + c * t * t.ln() + d * t * t
            }
        }
    }

    pub fn coefficients(&self) -> Vec<f64> {
        match *self {
            DgPolynomial::Quadratic { a, b, c } => vec![a, b, c],
            DgPolynomial::Extended { a, b, c, d } => vec![a, b, c, d],
        }
    }
}

impl TryFrom<Vec<f64>> for DgPolynomial {
    type Error = String;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            &[a, b, c] => Ok(DgPolynomial::Quadratic { a, b, c }),
            &[a, b, c, d] => Ok(DgPolynomial::Extended { a, b, c, d }),
            other => Err(format!(
                "dg_coefficients must have 3 or 4 values, got {}",
                other.len()
            )),
        }
    }
}

impl From<DgPolynomial> for Vec<f64> {
    fn from(p: DgPolynomial) -> Self {
        p.coefficients()
    }
}

fn one() -> f64 {
    1.0
}

/// Reaction stoichiometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stoichiometry {
    /// Electrons transferred per mole of reference nonmetal unit
    pub n_electrons: f64,
    /// Nonmetal atoms (O/N/C) per formula unit
    pub n_nonmetal: f64,
    /// Metal atoms per formula unit
    #[serde(default = "one")]
    pub n_metal: f64,
}

impl Stoichiometry {
    pub fn new(n_electrons: f64, n_nonmetal: f64) -> Self {
        Self {
            n_electrons,
            n_nonmetal,
            n_metal: 1.0,
        }
    }

    pub fn with_metal_atoms(mut self, n_metal: f64) -> Self {
        self.n_metal = n_metal;
        self
    }
}

/// Reliability of a literature parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Experimental,
    Calculated,
    Estimated,
    #[default]
    Default,
}

/// Arrhenius and enhancement parameters of the reduction kinetics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticParameters {
    /// Activation energy Ea (kJ/mol)
    pub activation_energy: f64,
    /// Pre-exponential factor A (1/s)
    pub pre_exponential: f64,
    /// Field enhancement coefficient α
    pub field_enhancement: f64,
    /// Flash diffusion multiplier β
    pub flash_multiplier: f64,
    /// Flash threshold temperature (K)
    pub flash_temperature: f64,
    /// Temperature range the parameters were measured over (K)
    #[serde(default)]
    pub valid_range: Option<(f64, f64)>,
    #[serde(default)]
    pub reliability: DataSource,
}

fn default_source() -> String {
    "User-defined".to_string()
}

/// A chemical compound with its fitted thermodynamics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Unique display identifier
    pub name: String,
    pub formula: String,
    /// Primary metal symbol
    pub element: String,
    pub category: Category,
    #[serde(rename = "dg_coefficients")]
    pub dg: DgPolynomial,
    /// Valid fit domain (K)
    pub temperature_range: (f64, f64),
    pub stoichiometry: Stoichiometry,
    /// Phonon/plasma work term (kJ/mol nonmetal unit)
    #[serde(default, rename = "w_ph_constant")]
    pub w_ph: Option<f64>,
    /// g/mol
    #[serde(default)]
    pub molecular_weight: Option<f64>,
    /// kg/m³
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub kinetics: Option<KineticParameters>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub reliability: DataSource,
}

impl Material {
    pub fn new(
        name: &str,
        formula: &str,
        element: &str,
        category: Category,
        dg: DgPolynomial,
        temperature_range: (f64, f64),
        stoichiometry: Stoichiometry,
    ) -> Self {
        Self {
            name: name.to_string(),
            formula: formula.to_string(),
            element: element.to_string(),
            category,
            dg,
            temperature_range,
            stoichiometry,
            w_ph: None,
            molecular_weight: None,
            density: None,
            kinetics: None,
            source: default_source(),
            reliability: DataSource::Default,
        }
    }

    pub fn with_w_ph(mut self, w_ph: f64) -> Self {
        self.w_ph = Some(w_ph);
        self
    }

    /// Molecular weight (g/mol) and density (kg/m³)
    pub fn with_physical(mut self, molecular_weight: f64, density: f64) -> Self {
        self.molecular_weight = Some(molecular_weight);
        self.density = Some(density);
        self
    }

    pub fn with_kinetics(mut self, kinetics: KineticParameters) -> Self {
        self.kinetics = Some(kinetics);
        self
    }

    pub fn with_source(mut self, source: &str, reliability: DataSource) -> Self {
        self.source = source.to_string();
        self.reliability = reliability;
        self
    }

    /// ΔG°(T) in kJ/mol nonmetal unit
    pub fn dg_at(&self, t: f64) -> f64 {
        self.dg.evaluate(t)
    }

    /// Number of temperatures outside the fitted range
    pub fn out_of_range_count(&self, temperatures: &[f64]) -> usize {
        let (t_min, t_max) = self.temperature_range;
        temperatures
            .iter()
            .filter(|&&t| t.is_finite() && (t < t_min || t > t_max))
            .count()
    }

    /// Unit label of raw ΔG values, e.g. "kJ/mol O₂"
    pub fn unit_label(&self) -> String {
        format!("kJ/mol {}", self.category.reference_unit().label)
    }

    /// Check the structural invariants
    pub fn validate(&self) -> EngineResult<()> {
        let fail = |reason: String| -> EngineResult<()> {
            Err(EngineError::InvalidMaterial {
                name: self.name.clone(),
                reason,
            })
        };

        if self.name.trim().is_empty() {
            return fail("name must not be empty".to_string());
        }
        if self.dg.coefficients().iter().any(|c| !c.is_finite()) {
            return fail("coefficients must be finite".to_string());
        }
        let (t_min, t_max) = self.temperature_range;
        if !(t_min < t_max) {
            return fail(format!(
                "temperature range must have T_min < T_max, got ({}, {})",
                t_min, t_max
            ));
        }
        let s = &self.stoichiometry;
        if !(s.n_nonmetal > 0.0) {
            return fail("n_nonmetal must be positive".to_string());
        }
        if !(s.n_electrons > 0.0) {
            return fail("n_electrons must be positive".to_string());
        }
        if !(s.n_metal > 0.0) {
            return fail("n_metal must be positive".to_string());
        }
        for (field, value) in [
            ("molecular_weight", self.molecular_weight),
            ("density", self.density),
        ] {
            if let Some(v) = value {
                if !(v > 0.0) {
                    return fail(format!("{} must be positive", field));
                }
            }
        }
        if let Some(w) = self.w_ph {
            if !w.is_finite() {
                return fail("w_ph_constant must be finite".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rutile() -> Material {
        Material::new(
            "TiO2",
            "TiO2",
            "Ti",
            Category::Oxide,
            DgPolynomial::linear(-944.7, 0.1815),
            (298.0, 2000.0),
            Stoichiometry::new(4.0, 2.0),
        )
    }

    #[test]
    fn test_quadratic_evaluation() {
        let m = rutile();
        assert_relative_eq!(m.dg_at(1000.0), -944.7 + 181.5, epsilon = 1e-9);
    }

    #[test]
    fn test_extended_evaluation() {
        let p = DgPolynomial::Extended { a: -100.0, b: 0.1, c: 0.01, d: 1e-6 };
        let t: f64 = 1000.0;
        let expected = -100.0 + 0.1 * t + 0.01 * t * t.ln() + 1e-6 * t * t;
        assert_relative_eq!(p.evaluate(t), expected, epsilon = 1e-9);
        assert!(p.evaluate(0.0).is_nan());
    }

    #[test]
    fn test_coefficient_array_serde() {
        let p: DgPolynomial = serde_json::from_str("[-1.0, 2.0, 3.0, 4.0]").unwrap();
        assert!(matches!(p, DgPolynomial::Extended { .. }));
        assert_eq!(serde_json::to_string(&p).unwrap(), "[-1.0,2.0,3.0,4.0]");
        assert!(serde_json::from_str::<DgPolynomial>("[1.0, 2.0]").is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut m = rutile();
        m.temperature_range = (2000.0, 298.0);
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_nonmetal() {
        let mut m = rutile();
        m.stoichiometry.n_nonmetal = 0.0;
        assert!(matches!(m.validate(), Err(EngineError::InvalidMaterial { .. })));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("oxides".parse::<Category>().unwrap(), Category::Oxide);
        assert_eq!("Nitride".parse::<Category>().unwrap(), Category::Nitride);
        assert_eq!("pure_elements".parse::<Category>().unwrap(), Category::PureElement);
        assert!("gemstone".parse::<Category>().is_err());
    }

    #[test]
    fn test_unit_label() {
        assert_eq!(rutile().unit_label(), "kJ/mol O₂");
    }
}
