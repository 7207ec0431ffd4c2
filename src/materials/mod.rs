//! Material definitions and the material database

pub mod database;
pub mod material;
pub mod reference;
pub mod table;

pub use database::MaterialDatabase;
pub use material::{
    Category, DataSource, DgPolynomial, KineticParameters, Material, ReferenceUnit, Stoichiometry,
};
pub use reference::reference_materials;
pub use table::{JanafTable, TableRow};
