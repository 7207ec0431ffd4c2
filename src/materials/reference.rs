//! Built-in reference materials
//!
//! Representative linear fits of JANAF formation free energies, expressed per
//! mole of the category's reference unit, together with literature W_ph and
//! flash-kinetics parameters for the common refractory oxides.

use super::database::MaterialDatabase;
use super::material::{
    Category, DataSource, DgPolynomial, KineticParameters, Material, Stoichiometry,
};
use crate::error::EngineResult;

/// Pre-exponential factor shared by the built-in kinetic sets (1/s)
const REFERENCE_PRE_EXPONENTIAL: f64 = 1e7;

/// (activation energy kJ/mol, α, β, T_flash K, valid range K)
type KineticRow = (f64, f64, f64, f64, (f64, f64));

fn kinetics(row: KineticRow) -> KineticParameters {
    let (activation_energy, field_enhancement, flash_multiplier, flash_temperature, valid_range) =
        row;
    KineticParameters {
        activation_energy,
        pre_exponential: REFERENCE_PRE_EXPONENTIAL,
        field_enhancement,
        flash_multiplier,
        flash_temperature,
        valid_range: Some(valid_range),
        reliability: DataSource::Estimated,
    }
}

struct Oxide {
    name: &'static str,
    element: &'static str,
    a: f64,
    b: f64,
    n_nonmetal: f64,
    n_metal: f64,
    w_ph: f64,
    molecular_weight: f64,
    density: f64,
    kinetics: Option<KineticRow>,
}

const OXIDES: &[Oxide] = &[
    Oxide {
        name: "TiO2",
        element: "Ti",
        a: -944.7,
        b: 0.1815,
        n_nonmetal: 2.0,
        n_metal: 1.0,
        w_ph: 20.0,
        molecular_weight: 79.9,
        density: 4230.0,
        kinetics: Some((200.0, 0.15, 50.0, 1123.0, (800.0, 1400.0))),
    },
    Oxide {
        name: "ZrO2",
        element: "Zr",
        a: -1096.0,
        b: 0.189,
        n_nonmetal: 2.0,
        n_metal: 1.0,
        w_ph: 22.0,
        molecular_weight: 123.2,
        density: 5680.0,
        kinetics: Some((250.0, 0.10, 30.0, 1223.0, (900.0, 1500.0))),
    },
    Oxide {
        name: "Al2O3",
        element: "Al",
        a: -1117.1,
        b: 0.2157,
        n_nonmetal: 3.0,
        n_metal: 2.0,
        w_ph: 20.2,
        molecular_weight: 101.96,
        density: 3950.0,
        kinetics: Some((300.0, 0.05, 20.0, 1323.0, (1000.0, 1600.0))),
    },
    Oxide {
        name: "MgO",
        element: "Mg",
        a: -1202.0,
        b: 0.217,
        n_nonmetal: 1.0,
        n_metal: 1.0,
        w_ph: 22.6,
        molecular_weight: 40.3,
        density: 3580.0,
        kinetics: Some((180.0, 0.12, 40.0, 1123.0, (800.0, 1300.0))),
    },
    Oxide {
        name: "Fe2O3",
        element: "Fe",
        a: -549.3,
        b: 0.183,
        n_nonmetal: 3.0,
        n_metal: 2.0,
        w_ph: 18.5,
        molecular_weight: 159.69,
        density: 5240.0,
        kinetics: Some((150.0, 0.20, 60.0, 923.0, (700.0, 1200.0))),
    },
    Oxide {
        name: "Cr2O3",
        element: "Cr",
        a: -746.0,
        b: 0.170,
        n_nonmetal: 3.0,
        n_metal: 2.0,
        w_ph: 19.8,
        molecular_weight: 151.99,
        density: 5220.0,
        kinetics: Some((170.0, 0.15, 45.0, 1100.0, (800.0, 1300.0))),
    },
    Oxide {
        name: "MoO3",
        element: "Mo",
        a: -497.0,
        b: 0.170,
        n_nonmetal: 3.0,
        n_metal: 1.0,
        w_ph: 21.0,
        molecular_weight: 143.9,
        density: 4690.0,
        kinetics: Some((160.0, 0.18, 55.0, 900.0, (700.0, 1100.0))),
    },
    Oxide {
        name: "WO3",
        element: "W",
        a: -562.0,
        b: 0.167,
        n_nonmetal: 3.0,
        n_metal: 1.0,
        w_ph: 23.0,
        molecular_weight: 231.8,
        density: 7160.0,
        kinetics: Some((180.0, 0.12, 35.0, 1000.0, (800.0, 1200.0))),
    },
    Oxide {
        name: "V2O5",
        element: "V",
        a: -620.0,
        b: 0.170,
        n_nonmetal: 5.0,
        n_metal: 2.0,
        w_ph: 21.0,
        molecular_weight: 181.9,
        density: 3360.0,
        kinetics: Some((140.0, 0.20, 50.0, 800.0, (600.0, 1000.0))),
    },
    Oxide {
        name: "Nb2O5",
        element: "Nb",
        a: -760.0,
        b: 0.170,
        n_nonmetal: 5.0,
        n_metal: 2.0,
        w_ph: 24.0,
        molecular_weight: 265.8,
        density: 4600.0,
        kinetics: Some((220.0, 0.08, 25.0, 1100.0, (900.0, 1400.0))),
    },
    Oxide {
        name: "Ta2O5",
        element: "Ta",
        a: -818.0,
        b: 0.170,
        n_nonmetal: 5.0,
        n_metal: 2.0,
        w_ph: 26.0,
        molecular_weight: 441.9,
        density: 8200.0,
        kinetics: Some((280.0, 0.06, 20.0, 1200.0, (1000.0, 1500.0))),
    },
    Oxide {
        name: "Cu2O",
        element: "Cu",
        a: -338.0,
        b: 0.145,
        n_nonmetal: 1.0,
        n_metal: 2.0,
        w_ph: 18.3,
        molecular_weight: 143.1,
        density: 6000.0,
        kinetics: None,
    },
];

const JANAF_FIT: &str = "JANAF representative fit";

fn oxide(row: &Oxide) -> Material {
    let mut material = Material::new(
        row.name,
        row.name,
        row.element,
        Category::Oxide,
        DgPolynomial::linear(row.a, row.b),
        (298.0, 2500.0),
        Stoichiometry::new(4.0, row.n_nonmetal).with_metal_atoms(row.n_metal),
    )
    .with_w_ph(row.w_ph)
    .with_physical(row.molecular_weight, row.density)
    .with_source(JANAF_FIT, DataSource::Calculated);
    if let Some(k) = row.kinetics {
        material = material.with_kinetics(kinetics(k));
    }
    material
}

/// All built-in materials
pub fn reference_materials() -> Vec<Material> {
    let mut materials: Vec<Material> = OXIDES.iter().map(oxide).collect();

    materials.push(
        Material::new(
            "CeO2",
            "CeO2",
            "Ce",
            Category::Oxide,
            DgPolynomial::Extended {
                a: -1089.0,
                b: 0.180,
                c: 0.004,
                d: 0.0,
            },
            (298.0, 2000.0),
            Stoichiometry::new(4.0, 2.0),
        )
        .with_w_ph(27.3)
        .with_physical(172.1, 7220.0)
        .with_source(JANAF_FIT, DataSource::Calculated),
    );

    // Nitride per N₂: Ti + ½N₂ → TiN, six electrons per N₂
    materials.push(
        Material::new(
            "TiN",
            "TiN",
            "Ti",
            Category::Nitride,
            DgPolynomial::linear(-676.0, 0.19),
            (298.0, 2500.0),
            Stoichiometry::new(6.0, 1.0),
        )
        .with_physical(61.87, 5400.0)
        .with_source(JANAF_FIT, DataSource::Calculated),
    );

    materials.push(
        Material::new(
            "TiC",
            "TiC",
            "Ti",
            Category::Carbide,
            DgPolynomial::linear(-184.5, 0.0126),
            (298.0, 2500.0),
            Stoichiometry::new(4.0, 1.0),
        )
        .with_physical(59.88, 4930.0)
        .with_source(JANAF_FIT, DataSource::Calculated),
    );

    // Water formation per mol H₂O, consumed by the H₂/H₂O equilibrium constant
    materials.push(
        Material::new(
            "H2O",
            "H2O",
            "H",
            Category::Other,
            DgPolynomial::linear(-246.0, 0.0547),
            (298.0, 3000.0),
            Stoichiometry::new(2.0, 1.0).with_metal_atoms(2.0),
        )
        .with_physical(18.015, 1000.0)
        .with_source(JANAF_FIT, DataSource::Calculated),
    );

    materials
}

impl MaterialDatabase {
    /// Database pre-populated with the built-in materials
    pub fn reference() -> EngineResult<Self> {
        Self::from_materials(reference_materials())
    }
}
