//! Ellingham Engine Example - Rutile under a 2 MV/m flash field

use ellingham_engine::math::linspace;
use ellingham_engine::prelude::*;
use ellingham_engine::units::{kelvin_to_celsius, m_to_um, v_per_m_to_mv_per_m};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Ellingham Engine Example: TiO2 ===\n");

    let db = MaterialDatabase::reference()?;
    let engine = ThermodynamicEngine::new(&db);

    let material = "TiO2";
    let field = 2e6; // V/m
    let radius = 5e-6; // m
    let temperature = 1273.0; // K

    println!(
        "Operating point: T = {:.0} K ({:.0} °C), E = {:.1} MV/m, r = {:.1} µm",
        temperature,
        kelvin_to_celsius(temperature),
        v_per_m_to_mv_per_m(field),
        m_to_um(radius)
    );

    // ΔG_eff decomposition
    let breakdown = engine.off_equilibrium_breakdown(material, temperature, field, radius);
    println!("\n--- Off-equilibrium ΔG ({}) ---", breakdown.unit_label);
    println!("ΔG°            = {:10.1}", breakdown.equilibrium);
    println!("electric term  = {:10.1}", breakdown.electric_term);
    println!("W_ph           = {:10.1} ({:?})", breakdown.w_ph, breakdown.w_ph_source);
    println!("ΔG_eff         = {:10.1}", breakdown.effective);
    println!("Feasibility: {}", breakdown.feasibility.label());
    println!("Confidence:  {}", breakdown.confidence());

    // Crossover with and without the field
    println!("\n--- Crossover ---");
    for e in [0.0, field] {
        let crossover = engine.crossover_temperature(material, e, radius);
        match crossover.temperature {
            Some(t) => {
                println!("E = {:.1} MV/m: ΔG_eff = 0 at {:.0} K", v_per_m_to_mv_per_m(e), t)
            }
            None => println!("E = {:.1} MV/m: no crossover on grid", v_per_m_to_mv_per_m(e)),
        }
    }

    // Nomographic scales
    let temps = linspace(800.0, 1800.0, 6);
    let dg = engine.off_equilibrium_dg(material, temps.as_slice(), field, radius);
    let scales = engine.comprehensive_gas_ratios(temps.as_slice(), dg.as_slice())?;
    let p_h2 = engine.h2_partial_pressure_required(material, temps.as_slice(), field, radius, None);
    println!("\n--- Gas ratios (log10) ---");
    println!("{:>8} {:>10} {:>10} {:>12}", "T (K)", "H2/H2O", "CO/CO2", "p_H2 (atm)");
    for (i, t) in temps.iter().enumerate() {
        let h2 = scales.get(GasRatio::H2H2o).map_or(f64::NAN, |v| v[i]);
        let co = scales.get(GasRatio::CoCo2).map_or(f64::NAN, |v| v[i]);
        println!("{:8.0} {:10.2} {:10.2} {:12.3e}", t, h2, co, p_h2.values[i]);
    }

    // Kinetics
    let kinetics = KineticModel::new(&db);
    let request = ResidenceTimeRequest::new(material, temperature, field, radius)
        .with_entry_temperature(300.0);
    if let Some(report) = kinetics.residence_time_analysis(&request) {
        println!("\n--- Residence time ---");
        println!("Residence time:   {:.3} s", report.residence_time);
        println!("Rate constant:    {:.3e} 1/s", report.rate);
        println!(
            "Enhancement:      {:.2}x (flash: {})",
            report.total_enhancement, report.in_flash_state
        );
        println!(
            "Conversion:       {:.1}% ({})",
            report.conversion_percent,
            report.completeness.label()
        );
        if let Some(t95) = report.time_95 {
            println!("Time to 95%:      {:.3} s", t95);
        }
        if let Some(rate) = report.heating_rate {
            println!("Heating rate:     {:.0} K/s", rate);
        }
        println!("Thermodynamics:   {}", report.feasibility.label());
    }

    let demand = kinetics.hydrogen_demand(material, 10.0, 0.25, None);
    println!("\n--- Hydrogen demand (10 kg/h) ---");
    println!("H2 mass flow:     {:.3} kg/h", demand.h2_mass_flow);
    println!("H2 volume flow:   {:.2} m³/h", demand.h2_volumetric_flow);
    println!("Carrier gas flow: {:.2} m³/h", demand.carrier_gas_flow);
    for d in &demand.diagnostics {
        println!("  ! {}", d.message());
    }

    // Literature check
    let validation =
        ValidationEngine::new().validate_all(material, temperature, field, radius, None, None);
    println!("\n--- Validation ---");
    println!("Flash conditions: {}", validation.flash_conditions.message);
    println!("Overall confidence: {}", validation.overall_confidence);

    Ok(())
}
