//! In-memory material store

use std::collections::HashMap;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::math::Vector;
use crate::results::{Curve, Diagnostic, Quantity};

use super::material::{Category, Material, Stoichiometry};

/// Lookup from material name to its definition
///
/// Built once by the caller and shared read-only with the engines. Runtime
/// additions go through [`MaterialDatabase::insert`], which applies the same
/// validation as the load path.
#[derive(Debug, Clone, Default)]
pub struct MaterialDatabase {
    materials: HashMap<String, Material>,
}

impl MaterialDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of materials, rejecting duplicates
    pub fn from_materials<I: IntoIterator<Item = Material>>(materials: I) -> EngineResult<Self> {
        let mut db = Self::new();
        for material in materials {
            db.insert(material)?;
        }
        Ok(db)
    }

    /// Load a JSON array of materials
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let materials: Vec<Material> = serde_json::from_str(json)?;
        Self::from_materials(materials)
    }

    /// Read a JSON material file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialise all materials as a JSON array sorted by name
    pub fn to_json(&self) -> EngineResult<String> {
        let mut materials: Vec<&Material> = self.materials.values().collect();
        materials.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(serde_json::to_string_pretty(&materials)?)
    }

    // ========================
    // Mutation
    // ========================

    /// Add a user-defined material
    pub fn insert(&mut self, material: Material) -> EngineResult<()> {
        material.validate()?;
        if self.materials.contains_key(&material.name) {
            return Err(EngineError::DuplicateMaterial(material.name));
        }
        self.materials.insert(material.name.clone(), material);
        Ok(())
    }

    /// Add or replace a material, returning the previous definition
    pub fn upsert(&mut self, material: Material) -> EngineResult<Option<Material>> {
        material.validate()?;
        Ok(self.materials.insert(material.name.clone(), material))
    }

    pub fn remove(&mut self, name: &str) -> EngineResult<Material> {
        self.materials
            .remove(name)
            .ok_or_else(|| EngineError::MaterialNotFound(name.to_string()))
    }

    // ========================
    // Queries
    // ========================

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resolve(id).is_some()
    }

    /// Sorted material names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Materials of one category, sorted by name
    pub fn by_category(&self, category: Category) -> Vec<&Material> {
        let mut found: Vec<&Material> = self
            .materials
            .values()
            .filter(|m| m.category == category)
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Case-insensitive substring search over name, formula and element
    pub fn search(&self, query: &str) -> Vec<&Material> {
        let needle = query.trim().to_lowercase();
        let mut found: Vec<&Material> = self
            .materials
            .values()
            .filter(|m| {
                needle.is_empty()
                    || m.name.to_lowercase().contains(&needle)
                    || m.formula.to_lowercase().contains(&needle)
                    || m.element.to_lowercase() == needle
            })
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Look up by exact name, then by formula
    pub fn resolve(&self, id: &str) -> Option<&Material> {
        self.materials.get(id).or_else(|| {
            let mut by_formula: Vec<&Material> =
                self.materials.values().filter(|m| m.formula == id).collect();
            // Deterministic pick when several phases share a formula
            by_formula.sort_by(|a, b| a.name.cmp(&b.name));
            by_formula.into_iter().next()
        })
    }

    /// Get a material or fail with `MaterialNotFound`
    pub fn get(&self, id: &str) -> EngineResult<&Material> {
        self.resolve(id)
            .ok_or_else(|| EngineError::MaterialNotFound(id.to_string()))
    }

    pub fn stoichiometry(&self, id: &str) -> EngineResult<Stoichiometry> {
        self.get(id).map(|m| m.stoichiometry)
    }

    /// Evaluate ΔG°(T) for each temperature (kJ/mol nonmetal unit)
    ///
    /// An unknown material yields NaN everywhere with a `NotFound`
    /// diagnostic. Temperatures outside the fit range are extrapolated and
    /// flagged `OutOfRange`.
    pub fn interpolate_dg(&self, id: &str, temperatures: &[f64]) -> Curve {
        let Some(material) = self.resolve(id) else {
            log::warn!("material '{}' not found in database", id);
            return Curve::undefined(
                temperatures.len(),
                Diagnostic::NotFound {
                    material: id.to_string(),
                },
            );
        };

        let values = Vector::from_iterator(
            temperatures.len(),
            temperatures.iter().map(|&t| material.dg_at(t)),
        );
        let mut curve = Curve::new(values);

        let outside = material.out_of_range_count(temperatures);
        if outside > 0 {
            let (t_min, t_max) = material.temperature_range;
            log::warn!(
                "{}: {} temperature(s) outside fit range {:.0}-{:.0} K, extrapolating",
                material.name,
                outside,
                t_min,
                t_max
            );
            curve.push(Diagnostic::OutOfRange {
                quantity: Quantity::Temperature,
                count: outside,
                min: t_min,
                max: t_max,
            });
        }

        let non_finite = temperatures.iter().filter(|t| !t.is_finite()).count();
        if non_finite > 0 {
            log::warn!("{}: {} non-finite temperature(s)", material.name, non_finite);
            curve.push(Diagnostic::NumericDegenerate {
                count: non_finite,
                reason: "non-finite temperature".to_string(),
            });
        }

        let undefined = curve
            .values
            .iter()
            .zip(temperatures)
            .filter(|(v, t)| t.is_finite() && !v.is_finite())
            .count();
        if undefined > 0 {
            log::warn!("{}: {} undefined ΔG° sample(s)", material.name, undefined);
            curve.push(Diagnostic::NumericDegenerate {
                count: undefined,
                reason: "ΔG° polynomial undefined at non-positive temperature".to_string(),
            });
        }
        curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{DgPolynomial, Stoichiometry};
    use crate::results::Confidence;
    use approx::assert_relative_eq;

    fn oxide(name: &str, formula: &str) -> Material {
        Material::new(
            name,
            formula,
            "Ti",
            Category::Oxide,
            DgPolynomial::linear(-944.7, 0.1815),
            (298.0, 2000.0),
            Stoichiometry::new(4.0, 2.0),
        )
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut db = MaterialDatabase::new();
        db.insert(oxide("TiO2", "TiO2")).unwrap();
        assert!(matches!(
            db.insert(oxide("TiO2", "TiO2")),
            Err(EngineError::DuplicateMaterial(_))
        ));
        assert!(db.upsert(oxide("TiO2", "TiO2")).unwrap().is_some());
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn test_resolve_by_formula() {
        let db = MaterialDatabase::from_materials([oxide("Rutile", "TiO2")]).unwrap();
        assert_eq!(db.get("TiO2").unwrap().name, "Rutile");
        assert!(matches!(db.get("ZrO2"), Err(EngineError::MaterialNotFound(_))));
    }

    #[test]
    fn test_interpolate_unknown_material() {
        let db = MaterialDatabase::new();
        let curve = db.interpolate_dg("Unobtainium", &[1000.0, 1200.0]);
        assert_eq!(curve.len(), 2);
        assert!(curve.values.iter().all(|v| v.is_nan()));
        assert!(curve.is_not_found());
        assert_eq!(curve.confidence(), Confidence::Low);
    }

    #[test]
    fn test_interpolate_flags_extrapolation() {
        let db = MaterialDatabase::from_materials([oxide("TiO2", "TiO2")]).unwrap();
        let curve = db.interpolate_dg("TiO2", &[1000.0, 2500.0, 3000.0]);
        assert_relative_eq!(curve.values[0], -944.7 + 181.5, epsilon = 1e-9);
        assert!(curve.values[2].is_finite());
        assert_eq!(
            curve.diagnostics,
            vec![Diagnostic::OutOfRange {
                quantity: Quantity::Temperature,
                count: 2,
                min: 298.0,
                max: 2000.0,
            }]
        );
    }

    #[test]
    fn test_interpolate_separates_nan_temperature() {
        let mut ceria = oxide("CeO2", "CeO2");
        ceria.dg = DgPolynomial::Extended {
            a: -1089.0,
            b: 0.180,
            c: 0.004,
            d: 0.0,
        };
        let db = MaterialDatabase::from_materials([ceria]).unwrap();
        let curve = db.interpolate_dg("CeO2", &[1000.0, f64::NAN, -5.0]);
        assert!(curve.values[0].is_finite());
        assert!(curve.values[1].is_nan());
        assert!(curve.values[2].is_nan());
        assert_eq!(
            curve.diagnostics,
            vec![
                Diagnostic::OutOfRange {
                    quantity: Quantity::Temperature,
                    count: 1,
                    min: 298.0,
                    max: 2000.0,
                },
                Diagnostic::NumericDegenerate {
                    count: 1,
                    reason: "non-finite temperature".to_string(),
                },
                Diagnostic::NumericDegenerate {
                    count: 1,
                    reason: "ΔG° polynomial undefined at non-positive temperature".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let db = MaterialDatabase::from_materials([oxide("TiO2", "TiO2")]).unwrap();
        let back = MaterialDatabase::from_json(&db.to_json().unwrap()).unwrap();
        assert_eq!(back.get("TiO2").unwrap(), db.get("TiO2").unwrap());
    }

    #[test]
    fn test_search_and_category() {
        let db = MaterialDatabase::from_materials([oxide("TiO2", "TiO2"), oxide("Ti2O3", "Ti2O3")])
            .unwrap();
        assert_eq!(db.search("ti2").len(), 1);
        assert_eq!(db.search("ti").len(), 2);
        assert_eq!(db.by_category(Category::Oxide).len(), 2);
        assert!(db.by_category(Category::Nitride).is_empty());
    }
}
