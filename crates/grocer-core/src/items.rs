use serde::{Deserialize, Serialize};

/// One line of the shopper's grocery list, as structured by the list parser.
///
/// Only `name` is guaranteed; every consumer must tolerate the optional
/// fields being absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Variety or style, e.g. `"2%"` or `"sourdough"`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Reference data attached by the nutrition store, when the brand is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionFacts>,
}

impl TargetItem {
    /// Creates an item with only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the brand constraint.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Trims every text field and turns blank optional fields into `None`.
    ///
    /// Returns `None` when the name itself is blank, since such an item can
    /// never be searched or matched.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_owned(),
            brand: non_blank(self.brand),
            kind: non_blank(self.kind),
            quantity: non_blank(self.quantity),
            category: non_blank(self.category),
            notes: non_blank(self.notes),
            nutrition: self.nutrition,
        })
    }

    /// Brand with blank values treated as absent.
    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Branded-food reference data from the nutrition database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub brand_owner: Option<String>,
    pub ingredients: Option<String>,
    pub serving_size: Option<f64>,
    pub serving_size_unit: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_type_field_into_kind() {
        let item: TargetItem =
            serde_json::from_value(serde_json::json!({"name": "milk", "type": "2%"})).unwrap();
        assert_eq!(item.kind.as_deref(), Some("2%"));
        assert!(item.brand.is_none());
    }

    #[test]
    fn normalized_drops_blank_optionals() {
        let item = TargetItem {
            name: "  eggs ".to_owned(),
            brand: Some("   ".to_owned()),
            quantity: Some(" dozen ".to_owned()),
            ..TargetItem::default()
        };
        let item = item.normalized().unwrap();
        assert_eq!(item.name, "eggs");
        assert!(item.brand.is_none());
        assert_eq!(item.quantity.as_deref(), Some("dozen"));
    }

    #[test]
    fn normalized_rejects_blank_name() {
        assert!(TargetItem::named("  ").normalized().is_none());
    }

    #[test]
    fn brand_accessor_ignores_blank() {
        let item = TargetItem::named("milk").with_brand(" ");
        assert!(item.brand().is_none());
    }
}
