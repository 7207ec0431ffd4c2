use approx::assert_relative_eq;
use ellingham_engine::kinetics::{conversion_fraction, time_for_conversion};
use ellingham_engine::prelude::*;

fn synthetic_oxide() -> Material {
    // ΔG° = -1000 + T, zero at 1000 K
    Material::new(
        "Synthetic",
        "XO2",
        "X",
        Category::Oxide,
        DgPolynomial::linear(-1000.0, 1.0),
        (298.0, 2500.0),
        Stoichiometry::new(4.0, 2.0),
    )
    .with_w_ph(0.0)
}

fn database() -> MaterialDatabase {
    let mut db = MaterialDatabase::reference().unwrap();
    db.insert(synthetic_oxide()).unwrap();
    db
}

#[test]
fn rutile_decomposition_is_exact() {
    let db = database();
    let engine = ThermodynamicEngine::new(&db);

    let b = engine.off_equilibrium_breakdown("TiO2", 1000.0, 2e6, 5e-6);
    assert_relative_eq!(b.equilibrium, -763.2, epsilon = 1e-9);
    assert_relative_eq!(b.electric_term, -3859.4, epsilon = 1e-9);
    assert_relative_eq!(b.w_ph, 20.0);
    assert_relative_eq!(b.effective, -763.2 - 3859.4 - 20.0, epsilon = 1e-9);
    assert_eq!(b.feasibility, Feasibility::HighlyFavorable);
    assert_eq!(b.confidence(), Confidence::High);

    let curve = engine.off_equilibrium_dg("TiO2", &[1000.0], 2e6, 5e-6);
    assert_relative_eq!(curve.values[0], b.effective, epsilon = 1e-9);
}

#[test]
fn repeated_calls_are_identical() {
    let db = database();
    let engine = ThermodynamicEngine::new(&db);
    let temps = [500.0, 1000.0, 1500.0, 2000.0];

    let first = engine.off_equilibrium_dg("Al2O3", &temps, 1e6, 1e-5);
    let second = engine.off_equilibrium_dg("Al2O3", &temps, 1e6, 1e-5);
    assert_eq!(first, second);
}

#[test]
fn stronger_field_lowers_effective_dg() {
    let db = database();
    let engine = ThermodynamicEngine::new(&db);
    let temps = [800.0, 1200.0, 1600.0];

    let weak = engine.off_equilibrium_dg("ZrO2", &temps, 1e5, 5e-6);
    let strong = engine.off_equilibrium_dg("ZrO2", &temps, 5e6, 5e-6);
    for (w, s) in weak.values.iter().zip(strong.values.iter()) {
        assert!(s < w);
    }
}

#[test]
fn zero_field_reduces_to_equilibrium_minus_wph() {
    let db = database();
    let engine = ThermodynamicEngine::new(&db);
    let temps = [700.0, 1300.0];

    let eq = engine.equilibrium_dg("MgO", &temps);
    let eff = engine.off_equilibrium_dg("MgO", &temps, 0.0, 5e-6);
    let w_ph = db.get("MgO").unwrap().w_ph.unwrap();
    for (g, ge) in eq.values.iter().zip(eff.values.iter()) {
        assert_relative_eq!(*ge, g - w_ph, epsilon = 1e-9);
    }
}

#[test]
fn normalization_is_a_pure_rescale() {
    let db = database();
    let engine = ThermodynamicEngine::new(&db);
    let temps = [600.0, 1200.0, 1800.0];
    let eq = engine.equilibrium_dg("Al2O3", &temps);

    let auto = engine.normalized_dg("Al2O3", &temps, NormalizationMode::Auto);
    assert_eq!(auto.curve.values, eq.values);

    let metal = engine.normalized_dg("Al2O3", &temps, NormalizationMode::Metal);
    assert_relative_eq!(metal.factor, 0.75);
    assert_eq!(metal.unit_label, "kJ/mol Al");
    for (g, gn) in eq.values.iter().zip(metal.curve.values.iter()) {
        assert_relative_eq!(*gn, g * 0.75, epsilon = 1e-9);
    }
}

#[test]
fn oxygen_ratio_is_inverse_of_water_ratio() {
    let db = database();
    let engine = ThermodynamicEngine::new(&db);
    let temps = [1000.0, 1200.0];
    let dg = [-500.0, -480.0];

    let scales = engine.comprehensive_gas_ratios(&temps, &dg).unwrap();
    let water = scales.get(GasRatio::H2H2o).unwrap();
    let oxygen = scales.get(GasRatio::H2O2).unwrap();
    for (w, o) in water.iter().zip(oxygen.iter()) {
        assert!(w.abs() < 50.0);
        assert_relative_eq!(*o, -w, epsilon = 1e-12);
    }
}

#[test]
fn synthetic_crossover_at_1000_k() {
    let db = database();
    let engine = ThermodynamicEngine::new(&db);

    let crossover = engine.crossover_temperature("Synthetic", 0.0, 5e-6);
    assert_relative_eq!(crossover.temperature.unwrap(), 1000.0, epsilon = 1e-6);
    assert!(crossover.diagnostics.is_empty());
}

#[test]
fn conversion_stays_within_unit_interval() {
    for rate in [0.0, 1e-6, 0.1, 10.0, 1e6] {
        for t in [0.0, 1e-3, 1.0, 100.0, 1e9] {
            let x = conversion_fraction(rate, t);
            assert!((0.0..=1.0).contains(&x), "rate {} t {} -> {}", rate, t, x);
        }
    }
    assert!(time_for_conversion(1.0, 0.5).is_none());
    assert!(time_for_conversion(0.95, 0.0).is_none());
    assert_relative_eq!(
        time_for_conversion(0.95, 0.5).unwrap(),
        -(0.05_f64.ln()) / 0.5,
        epsilon = 1e-12
    );
}

#[test]
fn unknown_material_degrades_without_panicking() {
    let db = database();
    let engine = ThermodynamicEngine::new(&db);
    let kinetics = KineticModel::new(&db);

    let curve = engine.off_equilibrium_dg("Unobtainium", &[1000.0, 1500.0], 2e6, 5e-6);
    assert!(curve.values.iter().all(|v| v.is_nan()));
    assert!(curve.is_not_found());
    assert_eq!(curve.confidence(), Confidence::Low);

    assert!(engine.crossover_temperature("Unobtainium", 2e6, 5e-6).temperature.is_none());
    assert!(kinetics
        .residence_time_analysis(&ResidenceTimeRequest::new("Unobtainium", 1273.0, 2e6, 5e-6))
        .is_none());
    let demand = kinetics.hydrogen_demand("Unobtainium", 10.0, 0.25, None);
    assert!(demand.is_not_found());
    assert!(demand.total_gas_flow.is_nan());

    let validation =
        ValidationEngine::new().validate_all("Unobtainium", 1273.0, 2e6, 5e-6, None, None);
    assert!(validation.flash_conditions.no_data);
    assert_eq!(validation.overall_confidence, Confidence::Low);
}

#[test]
fn missing_wph_falls_back_to_default() {
    let db = database();
    let engine = ThermodynamicEngine::new(&db);

    let b = engine.off_equilibrium_breakdown("TiN", 1000.0, 1e6, 5e-6);
    assert_eq!(b.w_ph, EngineConfig::default().default_w_ph);
    assert_eq!(b.confidence(), Confidence::Low);
    assert!(b
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::DefaultParameter { .. })));
}

#[test]
fn user_materials_load_from_file() {
    let db = database();
    let path = std::env::temp_dir().join("ellingham_engine_materials.json");
    std::fs::write(&path, db.to_json().unwrap()).unwrap();

    let loaded = MaterialDatabase::load(&path).unwrap();
    assert_eq!(loaded.names(), db.names());
    assert_eq!(loaded.get("Synthetic").unwrap(), &synthetic_oxide());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn residence_report_combines_kinetics_and_thermodynamics() {
    let db = database();
    let kinetics = KineticModel::new(&db);
    let request = ResidenceTimeRequest::new("TiO2", 1273.0, 2e6, 5e-6)
        .with_entry_temperature(300.0)
        .with_display_range(800.0, 1600.0, 20);

    let report = kinetics.residence_time_analysis(&request).unwrap();
    assert!(report.in_flash_state);
    assert!(report.total_enhancement > 1.0);
    assert!((0.0..=100.0).contains(&report.conversion_percent));
    assert_eq!(report.completeness, Completeness::classify(report.conversion_percent));
    assert!(report.thermodynamically_favorable);
    assert_relative_eq!(
        report.heating_rate.unwrap(),
        (1273.0 - 300.0) / report.residence_time,
        epsilon = 1e-9
    );
    assert_eq!(report.profile.unwrap().temperatures.len(), 20);
}

#[test]
fn complete_conversion_can_still_be_thermodynamically_unfavorable() {
    let db = database();
    let kinetics = KineticModel::new(&db);
    let request = ResidenceTimeRequest::new("Cu2O", 2500.0, 0.0, 5e-6);

    let report = kinetics.residence_time_analysis(&request).unwrap();
    assert_eq!(report.completeness, Completeness::Complete);
    assert!(report.conversion_percent >= 95.0);
    assert!(report.dg_eff >= 0.0);
    assert_eq!(report.feasibility, Feasibility::Marginal);
    assert!(!report.thermodynamically_favorable);
}

#[test]
fn stalled_gas_flow_is_reported_not_extrapolated() {
    let db = database();
    let kinetics = KineticModel::new(&db);
    let mut geometry = ReactorGeometry::from_defaults(&EngineConfig::default().reactor);
    geometry.gas_velocity = 0.0;
    let request = ResidenceTimeRequest::new("TiO2", 1273.0, 2e6, 5e-6)
        .with_geometry(geometry)
        .with_entry_temperature(300.0);

    let report = kinetics.residence_time_analysis(&request).unwrap();
    assert!(report.residence_time.is_nan());
    assert!(report.effective_residence_time.is_nan());
    assert!(report.heating_rate.unwrap().is_nan());
    assert!(report
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::NumericDegenerate { .. })));
}

#[test]
fn hydrogen_demand_flags_negative_processing_rate() {
    let db = database();
    let kinetics = KineticModel::new(&db);

    let demand = kinetics.hydrogen_demand("TiO2", -10.0, 0.25, Some(0.95));
    assert!(demand.h2_mass_flow.is_nan());
    assert!(demand.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::OutOfRange {
            quantity: Quantity::ProcessingRate,
            ..
        }
    )));
}
