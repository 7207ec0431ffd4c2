//! Ellingham Engine - field-assisted reduction thermodynamics in Rust
//!
//! This library evaluates whether a metal compound can be reduced under a
//! plasma/flash process, supporting:
//! - Equilibrium ΔG°(T) from fitted JANAF data
//! - Off-equilibrium ΔG_eff(T, E, r) with electric-field and W_ph work terms
//! - Per-metal and per-H₂ normalisation
//! - Oxygen-potential and gas-ratio nomographic scales
//! - Arrhenius reduction kinetics and reactor residence-time analysis
//! - Literature cross-checks with confidence tiers
//!
//! ## Example
//! ```rust
//! use ellingham_engine::prelude::*;
//!
//! let db = MaterialDatabase::reference().unwrap();
//! let engine = ThermodynamicEngine::new(&db);
//!
//! // ΔG_eff of rutile at 1000 K, 2 MV/m, 5 µm
//! let dg = engine.off_equilibrium_dg("TiO2", &[1000.0], 2e6, 5e-6);
//! assert!(dg.values[0] < 0.0);
//!
//! // Unknown materials give NaN plus a NotFound diagnostic
//! let missing = engine.equilibrium_dg("Unobtainium", &[1000.0]);
//! assert!(missing.is_not_found());
//!
//! // Residence-time analysis
//! let kinetics = KineticModel::new(&db);
//! let report = kinetics
//!     .residence_time_analysis(&ResidenceTimeRequest::new("TiO2", 1273.0, 2e6, 5e-6))
//!     .unwrap();
//! println!("{:.1}% converted", report.conversion_percent);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod kinetics;
pub mod materials;
pub mod math;
pub mod results;
pub mod thermo;
pub mod units;
pub mod validation;

// Re-export common types
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::kinetics::{
        Completeness, HydrogenDemand, KineticModel, ReactorGeometry, ResidenceTimeReport,
        ResidenceTimeRequest,
    };
    pub use crate::materials::{
        Category, DataSource, DgPolynomial, JanafTable, KineticParameters, Material,
        MaterialDatabase, Stoichiometry,
    };
    pub use crate::results::{Confidence, Curve, Diagnostic, Feasibility, Quantity};
    pub use crate::thermo::{
        GasRatio, GasRatioScales, NormalizationMode, NormalizedCurve, OffEquilibriumBreakdown,
        ThermodynamicEngine,
    };
    pub use crate::validation::{ValidationEngine, ValidationReport};
}

#[cfg(feature = "wasm")]
pub mod wasm;
