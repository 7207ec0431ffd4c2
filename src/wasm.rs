//! WASM bindings for the Ellingham engine
//!
//! JSON in, JSON out. The browser front end sends one request per redraw and
//! gets every curve for the selected material back in a single response.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::prelude::*;
use crate::thermo::Crossover;

// Use wee_alloc for smaller WASM binary
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

// ========================
// Input Data Structures
// ========================

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub material: String,
    /// K
    pub temperatures: Vec<f64>,
    /// V/m
    #[serde(default)]
    pub electric_field: f64,
    /// m
    #[serde(default = "default_radius")]
    pub particle_radius: f64,
    #[serde(default)]
    pub normalization: NormalizationMode,
    /// Partial pressure of H₂O (atm) for the required p_H₂ curve
    #[serde(default)]
    pub p_h2o: Option<f64>,
    /// User-defined materials added on top of the reference set
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub config: Option<EngineConfig>,
    #[serde(default)]
    pub residence: Option<ResidenceTimeRequest>,
    #[serde(default)]
    pub validate: bool,
}

fn default_radius() -> f64 {
    5e-6
}

// ========================
// Output Data Structures
// ========================

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsData>,
    /// Timing information in milliseconds
    pub ms_elapsed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ResultsData {
    pub material: String,
    pub unit_label: String,
    pub equilibrium: Curve,
    pub off_equilibrium: Curve,
    pub normalized: NormalizedCurve,
    pub po2_scale: Curve,
    pub gas_ratios: GasRatioScales,
    pub h2_partial_pressure: Curve,
    pub crossover: Crossover,
    pub envelope: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residence: Option<ResidenceTimeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
    pub confidence: Confidence,
    pub messages: Vec<String>,
}

fn elapsed_ms(start: f64) -> u64 {
    (js_sys::Date::now() - start) as u64
}

/// Evaluate every curve for one material
#[wasm_bindgen]
pub fn evaluate(request_json: &str) -> String {
    let start = js_sys::Date::now();

    let response = match serde_json::from_str::<EvaluateRequest>(request_json) {
        Ok(request) => match run_evaluation(request) {
            Ok(results) => EvaluateResponse {
                success: true,
                error: None,
                results: Some(results),
                ms_elapsed: Some(elapsed_ms(start)),
            },
            Err(e) => EvaluateResponse {
                success: false,
                error: Some(e.to_string()),
                results: None,
                ms_elapsed: Some(elapsed_ms(start)),
            },
        },
        Err(e) => EvaluateResponse {
            success: false,
            error: Some(format!("Failed to parse request: {}", e)),
            results: None,
            ms_elapsed: Some(elapsed_ms(start)),
        },
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"error":"Serialization failed: {}"}}"#, e)
    })
}

fn run_evaluation(request: EvaluateRequest) -> EngineResult<ResultsData> {
    let mut db = MaterialDatabase::reference()?;
    for material in request.materials {
        db.upsert(material)?;
    }
    let config = request.config.unwrap_or_default();
    let engine = ThermodynamicEngine::with_config(&db, config.clone());

    let temps = request.temperatures.as_slice();
    let e = request.electric_field;
    let r = request.particle_radius;
    let name = request.material.as_str();

    let equilibrium = engine.equilibrium_dg(name, temps);
    let off_equilibrium = engine.off_equilibrium_dg(name, temps, e, r);
    let normalized = engine.normalized_dg(name, temps, request.normalization);
    let gas_ratios = engine.comprehensive_gas_ratios(temps, off_equilibrium.as_slice())?;
    let h2_partial_pressure =
        engine.h2_partial_pressure_required(name, temps, e, r, request.p_h2o);
    let crossover = engine.crossover_temperature(name, e, r);
    let envelope = engine.check_envelope(temps, e, r);
    let unit_label = db
        .resolve(name)
        .map(|m| m.unit_label())
        .unwrap_or_else(|| "kJ/mol".to_string());

    let kinetics = KineticModel::with_config(&db, config);
    let residence = request
        .residence
        .as_ref()
        .and_then(|req| kinetics.residence_time_analysis(req));

    let validation = request.validate.then(|| {
        let at = temps.last().copied().unwrap_or(f64::NAN);
        let time_95 = residence.as_ref().and_then(|rep| rep.time_95);
        let enhancement = residence.as_ref().map(|rep| rep.total_enhancement);
        ValidationEngine::new().validate_all(name, at, e, r, enhancement, time_95)
    });

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    for d in off_equilibrium
        .diagnostics
        .iter()
        .chain(&gas_ratios.diagnostics)
        .chain(&h2_partial_pressure.diagnostics)
        .chain(&envelope)
        .chain(residence.iter().flat_map(|rep| &rep.diagnostics))
    {
        if !diagnostics.contains(d) {
            diagnostics.push(d.clone());
        }
    }
    let confidence = crate::results::confidence_of(&diagnostics);
    let messages = diagnostics.iter().map(Diagnostic::message).collect();

    Ok(ResultsData {
        material: request.material,
        unit_label,
        equilibrium,
        off_equilibrium,
        normalized,
        po2_scale: engine.po2_scale(temps),
        gas_ratios,
        h2_partial_pressure,
        crossover,
        envelope,
        residence,
        validation,
        confidence,
        messages,
    })
}

/// Reference material set as a JSON array
#[wasm_bindgen]
pub fn reference_materials() -> String {
    match MaterialDatabase::reference().and_then(|db| db.to_json()) {
        Ok(json) => json,
        Err(e) => format!(r#"{{"success":false,"error":"{}"}}"#, e),
    }
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
