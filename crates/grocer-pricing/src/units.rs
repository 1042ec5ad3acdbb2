//! Unit conversion table and price-per-ounce normalization.
//!
//! Raw shelf prices are not comparable across pack sizes and unit systems.
//! Every recognized unit maps to its size in ounce-equivalents (weight
//! ounces for masses, fluid ounces for volumes, one per piece for counts), so
//! `price / (magnitude * factor)` puts all candidates on one basis.

use std::collections::BTreeMap;
use std::path::Path;

use grocer_core::SizeSpec;

use crate::error::PricingError;

/// Factor used for units missing from the table.
const UNKNOWN_UNIT_FACTOR: f64 = 1.0;

/// Built-in conversion factors to ounce-equivalents.
const DEFAULT_FACTORS: &[(&str, f64)] = &[
    ("lb", 16.0),
    ("kg", 35.274),
    ("g", 0.035_274),
    ("l", 33.814),
    ("litre", 33.814),
    ("liter", 33.814),
    ("ml", 0.033_814),
    ("fl oz", 1.0),
    ("oz", 1.0),
    ("ct", 1.0),
    ("count", 1.0),
    ("pack", 1.0),
];

/// Mapping from lower-case unit token to ounce-equivalents per unit.
///
/// The key set doubles as the size extractor's vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTable {
    factors: BTreeMap<String, f64>,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            factors: DEFAULT_FACTORS
                .iter()
                .map(|(unit, factor)| ((*unit).to_owned(), *factor))
                .collect(),
        }
    }
}

impl UnitTable {
    /// Builds a table from explicit `(unit, factor)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidUnit`] for a blank unit token or a
    /// factor that is not finite and positive.
    pub fn from_factors<I, S>(factors: I) -> Result<Self, PricingError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (unit, factor) in factors {
            let unit = unit.into().trim().to_lowercase();
            if unit.is_empty() {
                return Err(PricingError::InvalidUnit {
                    unit,
                    reason: "unit token is blank".into(),
                });
            }
            if !factor.is_finite() || factor <= 0.0 {
                return Err(PricingError::InvalidUnit {
                    unit,
                    reason: format!("factor must be finite and positive, got {factor}"),
                });
            }
            table.insert(unit, factor);
        }
        Ok(Self { factors: table })
    }

    /// Parses a flat YAML map of `unit: factor`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnitTableYaml`] for malformed YAML and
    /// [`PricingError::InvalidUnit`] for invalid entries.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PricingError> {
        let raw: BTreeMap<String, f64> = serde_yaml::from_str(yaml)?;
        Self::from_factors(raw)
    }

    /// Loads a YAML unit table from disk.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnitTableIo`] if the file cannot be read, or
    /// any error from [`UnitTable::from_yaml_str`].
    pub fn load(path: &Path) -> Result<Self, PricingError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| PricingError::UnitTableIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Ounce-equivalents per `unit`; unknown units count as already
    /// ounce-equivalent.
    #[must_use]
    pub fn factor(&self, unit: &str) -> f64 {
        self.factors
            .get(&unit.to_lowercase())
            .copied()
            .unwrap_or(UNKNOWN_UNIT_FACTOR)
    }

    /// Recognized unit tokens.
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.factors.keys().map(String::as_str)
    }

    /// Price per ounce-equivalent.
    ///
    /// Returns `None` when `price` is absent or the size works out to zero
    /// ounces.
    #[must_use]
    pub fn normalize(&self, price: Option<f64>, size: &SizeSpec) -> Option<f64> {
        let price = price?;
        let size_in_oz = size.magnitude * self.factor(&size.unit);
        if !size_in_oz.is_finite() || size_in_oz <= 0.0 {
            return None;
        }
        let per_oz = price / size_in_oz;
        per_oz.is_finite().then_some(per_oz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn pound_price_is_price_over_sixteen() {
        let table = UnitTable::default();
        for p in [0.01, 1.0, 3.5, 19.99, 1234.5] {
            assert_eq!(table.normalize(Some(p), &SizeSpec::new(1.0, "lb")), Some(p / 16.0));
        }
    }

    #[test]
    fn zero_magnitude_is_none_for_every_unit() {
        let table = UnitTable::default();
        for unit in table.units().chain(["unit", "gal"]) {
            assert_eq!(table.normalize(Some(2.0), &SizeSpec::new(0.0, unit)), None);
        }
    }

    #[test]
    fn absent_price_is_none() {
        let table = UnitTable::default();
        assert_eq!(table.normalize(None, &SizeSpec::new(12.0, "oz")), None);
    }

    #[test]
    fn litres_convert_to_fluid_ounces() {
        let table = UnitTable::default();
        let per_oz = table.normalize(Some(2.0), &SizeSpec::new(0.5, "l")).unwrap();
        assert!((per_oz - 2.0 / 16.907).abs() < 1e-6);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn unknown_unit_uses_factor_one() {
        let table = UnitTable::default();
        assert_eq!(table.factor("gal"), 1.0);
        assert_eq!(table.normalize(Some(3.5), &SizeSpec::default()), Some(3.5));
    }

    #[test]
    fn default_vocabulary_has_all_twelve_units() {
        let table = UnitTable::default();
        let units: Vec<&str> = table.units().collect();
        assert_eq!(units.len(), 12);
        assert!(units.contains(&"fl oz"));
        assert!(units.contains(&"litre"));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn yaml_table_replaces_defaults() {
        let table = UnitTable::from_yaml_str("gal: 128\nOz: 1\n").unwrap();
        assert_eq!(table.factor("gal"), 128.0);
        assert_eq!(table.factor("oz"), 1.0);
        assert_eq!(table.units().count(), 2);
    }

    #[test]
    fn yaml_rejects_non_positive_factor() {
        let err = UnitTable::from_yaml_str("lb: 0\n").unwrap_err();
        assert!(matches!(err, PricingError::InvalidUnit { ref unit, .. } if unit == "lb"));
    }

    #[test]
    fn yaml_rejects_malformed_document() {
        let err = UnitTable::from_yaml_str("- not\n- a map\n").unwrap_err();
        assert!(matches!(err, PricingError::UnitTableYaml(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = UnitTable::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, PricingError::UnitTableIo { .. }));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("units.yaml");
        std::fs::write(&path, "kg: 35.274\n").unwrap();
        let table = UnitTable::load(&path).unwrap();
        assert_eq!(table.factor("KG"), 35.274);
    }
}
