//! Result types shared by the engine components
//!
//! Every vectorised result carries its values together with the diagnostics
//! that were raised while computing them, so a caller can render a degraded
//! result instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::math::Vector;

/// Confidence tier attached to a computed quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    /// Overall tier of a set of independent checks:
    /// all high → high, any high → medium, otherwise low.
    pub fn aggregate<I: IntoIterator<Item = Confidence>>(tiers: I) -> Confidence {
        let mut any = false;
        let mut all_high = true;
        let mut any_high = false;
        for tier in tiers {
            any = true;
            if tier == Confidence::High {
                any_high = true;
            } else {
                all_high = false;
            }
        }
        match (any, all_high, any_high) {
            (false, _, _) => Confidence::High,
            (true, true, _) => Confidence::High,
            (true, false, true) => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quantity that fell outside its validated envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Temperature,
    ElectricField,
    ParticleRadius,
    GasFraction,
    ProcessingRate,
    Efficiency,
}

/// Annotation raised while computing a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Requested material is absent from the database
    NotFound { material: String },
    /// Input outside the validated range; values were extrapolated
    OutOfRange {
        quantity: Quantity,
        /// Number of offending samples (1 for scalar inputs)
        count: usize,
        min: f64,
        max: f64,
    },
    /// Samples whose denominators vanished and were marked undefined
    NumericDegenerate { count: usize, reason: String },
    /// Reference data was absent and a standard approximation was used
    MissingReferenceData { what: String },
    /// A calibration constant fell back to its configured default
    DefaultParameter { parameter: String, value: f64 },
}

impl Diagnostic {
    pub fn confidence(&self) -> Confidence {
        match self {
            Diagnostic::NotFound { .. } | Diagnostic::DefaultParameter { .. } => Confidence::Low,
            Diagnostic::OutOfRange { .. }
            | Diagnostic::NumericDegenerate { .. }
            | Diagnostic::MissingReferenceData { .. } => Confidence::Medium,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Diagnostic::NotFound { material } => format!("No data for material '{}'", material),
            Diagnostic::OutOfRange { quantity, count, min, max } => format!(
                "{} sample(s) of {:?} outside validated range [{:.3e}, {:.3e}]",
                count, quantity, min, max
            ),
            Diagnostic::NumericDegenerate { count, reason } => {
                format!("{} sample(s) undefined: {}", count, reason)
            }
            Diagnostic::MissingReferenceData { what } => {
                format!("Missing reference data for {}, using standard approximation", what)
            }
            Diagnostic::DefaultParameter { parameter, value } => {
                format!("Using default {} = {} (needs literature validation)", parameter, value)
            }
        }
    }
}

/// Minimum confidence over a diagnostics list
pub fn confidence_of(diagnostics: &[Diagnostic]) -> Confidence {
    diagnostics
        .iter()
        .map(Diagnostic::confidence)
        .min()
        .unwrap_or(Confidence::High)
}

/// Values over a temperature array plus the diagnostics raised for them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub values: Vector,
    pub diagnostics: Vec<Diagnostic>,
}

impl Curve {
    pub fn new(values: Vector) -> Self {
        Self {
            values,
            diagnostics: Vec::new(),
        }
    }

    /// Curve of undefined (NaN) markers of length `len`
    pub fn undefined(len: usize, diagnostic: Diagnostic) -> Self {
        Self {
            values: Vector::from_element(len, f64::NAN),
            diagnostics: vec![diagnostic],
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.push(diagnostic);
        self
    }

    /// Add a diagnostic, skipping exact duplicates
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
        for d in diagnostics {
            self.push(d);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn confidence(&self) -> Confidence {
        confidence_of(&self.diagnostics)
    }

    /// True when the material lookup failed
    pub fn is_not_found(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::NotFound { .. }))
    }

    /// True when every sample is a finite number
    pub fn is_defined(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }
}

/// Reduction feasibility tier of an effective free energy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feasibility {
    HighlyFavorable,
    Favorable,
    Marginal,
    Unfavorable,
    Undefined,
}

impl Feasibility {
    /// Classify ΔG_eff in kJ/mol nonmetal unit
    pub fn classify(dg_eff: f64) -> Self {
        if !dg_eff.is_finite() {
            Feasibility::Undefined
        } else if dg_eff < -50.0 {
            Feasibility::HighlyFavorable
        } else if dg_eff < 0.0 {
            Feasibility::Favorable
        } else if dg_eff < 50.0 {
            Feasibility::Marginal
        } else {
            Feasibility::Unfavorable
        }
    }

    /// Spontaneous reduction direction (ΔG_eff < 0)
    pub fn is_favorable(&self) -> bool {
        matches!(self, Feasibility::HighlyFavorable | Feasibility::Favorable)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feasibility::HighlyFavorable => "Highly Favorable",
            Feasibility::Favorable => "Favorable",
            Feasibility::Marginal => "Marginal",
            Feasibility::Unfavorable => "Unfavorable",
            Feasibility::Undefined => "Undefined",
        }
    }
}
