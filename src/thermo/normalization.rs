//! Per-metal and per-reducing-agent renormalisation of ΔG

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EngineError;
use crate::materials::Material;
use crate::results::Curve;

/// Basis that ΔG values are expressed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Per mole of the category's reference nonmetal unit
    #[default]
    Auto,
    /// Per mole of metal atoms
    Metal,
    /// Per mole of H₂ consumed
    ReducingAgent,
}

impl FromStr for NormalizationMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(NormalizationMode::Auto),
            "metal" => Ok(NormalizationMode::Metal),
            "reducing_agent" | "reducing-agent" => Ok(NormalizationMode::ReducingAgent),
            other => Err(EngineError::InvalidInput(format!(
                "unknown normalization mode '{}'",
                other
            ))),
        }
    }
}

/// Multiplier taking per-reference-unit ΔG to `mode`
///
/// For metal mode the factor is `n_nonmetal / (atoms_per_unit · n_metal)`:
/// Al2O3 per O₂ becomes per Al with factor 3 / (2·2) = 0.75.
pub fn factor(material: &Material, mode: NormalizationMode) -> f64 {
    let s = &material.stoichiometry;
    match mode {
        NormalizationMode::Auto => 1.0,
        NormalizationMode::Metal => {
            let atoms = material.category.reference_unit().atoms as f64;
            s.n_nonmetal / (atoms * s.n_metal)
        }
        NormalizationMode::ReducingAgent => 2.0 / s.n_electrons,
    }
}

pub fn unit_label(material: &Material, mode: NormalizationMode) -> String {
    match mode {
        NormalizationMode::Auto => material.unit_label(),
        NormalizationMode::Metal => format!("kJ/mol {}", material.element),
        NormalizationMode::ReducingAgent => "kJ/mol H₂".to_string(),
    }
}

/// Renormalised ΔG values with their unit label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCurve {
    pub curve: Curve,
    pub unit_label: String,
    pub mode: NormalizationMode,
    /// Multiplier applied to the raw values; NaN when the material is unknown
    pub factor: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{Category, DgPolynomial, Stoichiometry};
    use approx::assert_relative_eq;

    fn alumina() -> Material {
        Material::new(
            "Al2O3",
            "Al2O3",
            "Al",
            Category::Oxide,
            DgPolynomial::linear(-1117.1, 0.2157),
            (298.0, 2300.0),
            Stoichiometry::new(4.0, 3.0).with_metal_atoms(2.0),
        )
    }

    #[test]
    fn test_metal_factor() {
        assert_relative_eq!(factor(&alumina(), NormalizationMode::Metal), 0.75);
        assert_eq!(unit_label(&alumina(), NormalizationMode::Metal), "kJ/mol Al");
    }

    #[test]
    fn test_reducing_agent_factor() {
        assert_relative_eq!(factor(&alumina(), NormalizationMode::ReducingAgent), 0.5);
        assert_eq!(unit_label(&alumina(), NormalizationMode::ReducingAgent), "kJ/mol H₂");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            "reducing_agent".parse::<NormalizationMode>().unwrap(),
            NormalizationMode::ReducingAgent
        );
        assert!("per_atom".parse::<NormalizationMode>().is_err());
    }
}
