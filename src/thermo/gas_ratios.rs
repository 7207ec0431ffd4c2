//! Nomographic gas-ratio scales
//!
//! Each reference reaction has a standard free energy that is linear in the
//! Celsius temperature. A supplied ΔG (equilibrium or off-equilibrium) maps to
//! a log-ratio through `(ΔG − ΔG_ref) / (2·R·T)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{GAS_CONSTANT_KJ, KELVIN_OFFSET};
use crate::error::{EngineError, EngineResult};
use crate::math::{self, Vector};
use crate::results::{confidence_of, Confidence, Diagnostic};

/// Reference gas reaction with ΔG_ref(T_C) = a + b·T_C in kJ/mol
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceReaction {
    pub a: f64,
    pub b: f64,
}

impl ReferenceReaction {
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// ΔG_ref at a Kelvin temperature
    pub fn dg_ref(&self, t_k: f64) -> f64 {
        self.a + self.b * (t_k - KELVIN_OFFSET)
    }
}

pub const CO_CO2: ReferenceReaction = ReferenceReaction::new(-257.2, 0.084);
pub const H2_H2O: ReferenceReaction = ReferenceReaction::new(-237.1, 0.043);
pub const H2_H2S: ReferenceReaction = ReferenceReaction::new(-200.4, 0.042);
pub const CL2_HCL: ReferenceReaction = ReferenceReaction::new(-95.3, 0.021);
pub const CH4_H2: ReferenceReaction = ReferenceReaction::new(-800.8, 0.205);

/// Nomographic ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GasRatio {
    #[serde(rename = "CO_CO2")]
    CoCo2,
    #[serde(rename = "H2_H2O")]
    H2H2o,
    #[serde(rename = "H2_H2S")]
    H2H2s,
    #[serde(rename = "Cl2_HCl")]
    Cl2Hcl,
    #[serde(rename = "CH4_H2")]
    Ch4H2,
    #[serde(rename = "H2_HCl")]
    H2Hcl,
    #[serde(rename = "CO_HCl")]
    CoHcl,
    #[serde(rename = "H2_O2")]
    H2O2,
    #[serde(rename = "CO_O2")]
    CoO2,
}

/// How a ratio is derived from the reference reactions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Derivation {
    Reference(ReferenceReaction),
    /// First base ratio minus second
    Difference(GasRatio, GasRatio),
    Negation(GasRatio),
}

impl GasRatio {
    pub const ALL: [GasRatio; 9] = [
        GasRatio::CoCo2,
        GasRatio::H2H2o,
        GasRatio::H2H2s,
        GasRatio::Cl2Hcl,
        GasRatio::Ch4H2,
        GasRatio::H2Hcl,
        GasRatio::CoHcl,
        GasRatio::H2O2,
        GasRatio::CoO2,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            GasRatio::CoCo2 => "CO_CO2",
            GasRatio::H2H2o => "H2_H2O",
            GasRatio::H2H2s => "H2_H2S",
            GasRatio::Cl2Hcl => "Cl2_HCl",
            GasRatio::Ch4H2 => "CH4_H2",
            GasRatio::H2Hcl => "H2_HCl",
            GasRatio::CoHcl => "CO_HCl",
            GasRatio::H2O2 => "H2_O2",
            GasRatio::CoO2 => "CO_O2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GasRatio::CoCo2 => "CO/CO₂",
            GasRatio::H2H2o => "H₂/H₂O",
            GasRatio::H2H2s => "H₂/H₂S",
            GasRatio::Cl2Hcl => "Cl₂/HCl",
            GasRatio::Ch4H2 => "CH₄/H₂",
            GasRatio::H2Hcl => "H₂/HCl",
            GasRatio::CoHcl => "CO/HCl",
            GasRatio::H2O2 => "H₂/O₂",
            GasRatio::CoO2 => "CO/O₂",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GasRatio::CoCo2 => "Carbon monoxide reduction: 2CO + O₂ → 2CO₂",
            GasRatio::H2H2o => "Hydrogen reduction: 2H₂ + O₂ → 2H₂O",
            GasRatio::H2H2s => "Hydrogen sulfide equilibrium: 2H₂ + S₂ → 2H₂S",
            GasRatio::Cl2Hcl => "Chlorine / hydrogen chloride: H₂ + Cl₂ → 2HCl",
            GasRatio::Ch4H2 => "Methane reforming: CH₄ + O₂ → CO₂ + 2H₂",
            GasRatio::H2Hcl => "Hydrogen versus HCl, from H₂/H₂O and Cl₂/HCl",
            GasRatio::CoHcl => "Carbon monoxide versus HCl, from CO/CO₂ and Cl₂/HCl",
            GasRatio::H2O2 => "Inverse of H₂/H₂O",
            GasRatio::CoO2 => "Inverse of CO/CO₂",
        }
    }

    pub fn derivation(&self) -> Derivation {
        match self {
            GasRatio::CoCo2 => Derivation::Reference(CO_CO2),
            GasRatio::H2H2o => Derivation::Reference(H2_H2O),
            GasRatio::H2H2s => Derivation::Reference(H2_H2S),
            GasRatio::Cl2Hcl => Derivation::Reference(CL2_HCL),
            GasRatio::Ch4H2 => Derivation::Reference(CH4_H2),
            GasRatio::H2Hcl => Derivation::Difference(GasRatio::H2H2o, GasRatio::Cl2Hcl),
            GasRatio::CoHcl => Derivation::Difference(GasRatio::CoCo2, GasRatio::Cl2Hcl),
            GasRatio::H2O2 => Derivation::Negation(GasRatio::H2H2o),
            GasRatio::CoO2 => Derivation::Negation(GasRatio::CoCo2),
        }
    }
}

impl fmt::Display for GasRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for GasRatio {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GasRatio::ALL
            .iter()
            .copied()
            .find(|r| r.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::InvalidInput(format!("unknown gas ratio '{}'", s)))
    }
}

/// log₁₀ ratio arrays for every nomographic scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasRatioScales {
    pub ratios: BTreeMap<GasRatio, Vector>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GasRatioScales {
    pub fn get(&self, ratio: GasRatio) -> Option<&Vector> {
        self.ratios.get(&ratio)
    }

    pub fn confidence(&self) -> Confidence {
        confidence_of(&self.diagnostics)
    }
}

/// Compute all nine scales for `(T_K, ΔG)` pairs
///
/// Samples at or below `min_temperature` are NaN. Every finite output is
/// clamped to `[-clamp, clamp]`.
pub fn compute(
    temperatures: &[f64],
    dg: &[f64],
    clamp: f64,
    min_temperature: f64,
) -> EngineResult<GasRatioScales> {
    if temperatures.len() != dg.len() {
        return Err(EngineError::ShapeMismatch {
            expected: temperatures.len(),
            found: dg.len(),
        });
    }

    let n = temperatures.len();
    let degenerate = temperatures
        .iter()
        .filter(|&&t| !(t > min_temperature))
        .count();

    let base = |reaction: ReferenceReaction| -> Vector {
        Vector::from_iterator(
            n,
            temperatures.iter().zip(dg).map(|(&t, &g)| {
                if t > min_temperature {
                    (g - reaction.dg_ref(t)) / (2.0 * GAS_CONSTANT_KJ * t)
                } else {
                    f64::NAN
                }
            }),
        )
    };

    // Base ratios first, composites are built from the unclamped bases
    let mut ratios: BTreeMap<GasRatio, Vector> = BTreeMap::new();
    for ratio in GasRatio::ALL {
        if let Derivation::Reference(reaction) = ratio.derivation() {
            ratios.insert(ratio, base(reaction));
        }
    }
    for ratio in GasRatio::ALL {
        let derived = match ratio.derivation() {
            Derivation::Reference(_) => continue,
            Derivation::Difference(lhs, rhs) => match (ratios.get(&lhs), ratios.get(&rhs)) {
                (Some(l), Some(r)) => l - r,
                _ => continue,
            },
            Derivation::Negation(of) => match ratios.get(&of) {
                Some(v) => -v,
                None => continue,
            },
        };
        ratios.insert(ratio, derived);
    }

    for values in ratios.values_mut() {
        math::clamp_symmetric(values, clamp);
    }

    let mut diagnostics = Vec::new();
    if degenerate > 0 {
        log::warn!("{} gas-ratio sample(s) at non-positive temperature", degenerate);
        diagnostics.push(Diagnostic::NumericDegenerate {
            count: degenerate,
            reason: "R·T denominator vanishes".to_string(),
        });
    }

    Ok(GasRatioScales {
        ratios,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_h2_h2o_value() {
        let t = 1273.15;
        let scales = compute(&[t], &[-400.0], 50.0, 1e-6).unwrap();
        let expected = (-400.0 - (-237.1 + 0.043 * 1000.0)) / (2.0 * GAS_CONSTANT_KJ * t);
        assert_relative_eq!(scales.get(GasRatio::H2H2o).unwrap()[0], expected, epsilon = 1e-9);
    }

    #[test]
    fn test_composites_and_inverses() {
        let temps = [800.0, 1200.0, 1600.0];
        let dg = [-700.0, -600.0, -500.0];
        let s = compute(&temps, &dg, 50.0, 1e-6).unwrap();
        for i in 0..3 {
            let h2o = s.get(GasRatio::H2H2o).unwrap()[i];
            let hcl = s.get(GasRatio::Cl2Hcl).unwrap()[i];
            assert_eq!(s.get(GasRatio::H2O2).unwrap()[i], -h2o);
            assert_relative_eq!(s.get(GasRatio::H2Hcl).unwrap()[i], h2o - hcl, epsilon = 1e-12);
        }
        assert_eq!(s.ratios.len(), 9);
    }

    #[test]
    fn test_clamped_near_zero_temperature() {
        let s = compute(&[1e-3, 0.0], &[-900.0, -900.0], 50.0, 1e-6).unwrap();
        assert_eq!(s.get(GasRatio::CoCo2).unwrap()[0], -50.0);
        assert!(s.get(GasRatio::CoCo2).unwrap()[1].is_nan());
        assert_eq!(s.confidence(), Confidence::Medium);
    }

    #[test]
    fn test_shape_mismatch_is_error() {
        assert!(matches!(
            compute(&[1000.0, 1100.0], &[-1.0], 50.0, 1e-6),
            Err(EngineError::ShapeMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("cl2_hcl".parse::<GasRatio>().unwrap(), GasRatio::Cl2Hcl);
        assert_eq!(serde_json::to_string(&GasRatio::CoO2).unwrap(), "\"CO_O2\"");
        assert!(GasRatio::ALL.iter().all(|r| !r.description().is_empty()));
    }
}
