//! Garment catalog shown next to the fitting-room viewer.

use serde::{Deserialize, Serialize};

/// A garment that can be tried on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Garment {
    /// Stable identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Formatted price.
    pub price: String,
}

impl Garment {
    fn new(id: u32, name: &str, brand: &str, price: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            price: price.to_string(),
        }
    }
}

/// Ordered list of garments plus the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Garment>,
    #[serde(default)]
    selected: Option<usize>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Garment::new(1, "Basic Tee", "Uniqlo", "₹999"),
            Garment::new(2, "Linen Kurta", "FabIndia", "₹1,499"),
            Garment::new(3, "Slim Jeans", "Levi's", "₹2,999"),
            Garment::new(4, "Summer Dress", "H&M", "₹1,799"),
            Garment::new(5, "Oxford Shirt", "Zara", "₹2,299"),
            Garment::new(6, "Athletic Set", "Nike", "₹3,599"),
            Garment::new(7, "Party Blazer", "Raymond", "₹4,999"),
            Garment::new(8, "Chinos", "Gap", "₹1,899"),
        ])
    }
}

impl Catalog {
    /// Create a catalog with nothing selected.
    pub fn new(items: Vec<Garment>) -> Self {
        Self {
            items,
            selected: None,
        }
    }

    /// All garments in display order.
    pub fn items(&self) -> &[Garment] {
        &self.items
    }

    /// Look a garment up by id.
    pub fn find(&self, id: u32) -> Option<&Garment> {
        self.items.iter().find(|g| g.id == id)
    }

    /// Select the garment at `index`. An out-of-range index clears the selection.
    pub fn select(&mut self, index: usize) -> Option<&Garment> {
        self.selected = (index < self.items.len()).then_some(index);
        self.selected()
    }

    /// The currently selected garment.
    pub fn selected(&self) -> Option<&Garment> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.items().len(), 8);
        assert_eq!(catalog.find(3).map(|g| g.name.as_str()), Some("Slim Jeans"));
        assert!(catalog.find(42).is_none());
        assert!(catalog.selected().is_none());
    }

    #[test]
    fn test_select() {
        let mut catalog = Catalog::default();
        assert_eq!(catalog.select(1).map(|g| g.id), Some(2));
        assert_eq!(catalog.selected().map(|g| g.brand.as_str()), Some("FabIndia"));

        assert!(catalog.select(99).is_none());
        assert!(catalog.selected().is_none());
    }
}
