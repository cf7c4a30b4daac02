//! Inventory stock models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::compute_total;
use crate::parse::{parse_decimal_or, parse_min_stock, parse_optional_text};

/// Low-stock threshold used when an item carries none
pub const DEFAULT_MIN_STOCK: Decimal = Decimal::TEN;

/// Categories offered on the stock form
pub const STOCK_CATEGORIES: &[&str] = &[
    "Nitrogen Fertilizer",
    "Phosphorus Fertilizer",
    "Potassium Fertilizer",
    "NPK Compound",
    "Organic",
    "Bio-fertilizer",
    "Micronutrients",
    "Other",
];

/// Units of measure offered on the stock form
pub const STOCK_UNITS: &[&str] = &["kg", "g", "L", "mL", "bags", "packets", "tons"];

/// One product line on the shelf
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub unit: String,
    /// Unit price; the latest replenishment overwrites it
    pub price: Decimal,
    /// On hand. Unchecked sale decrements can drive this negative.
    pub quantity: Decimal,
    #[serde(default)]
    pub min_stock: Option<Decimal>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub how_to_use: Option<String>,
}

impl StockItem {
    /// Build a fresh item with a newly assigned id
    pub fn create(input: NewStockItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            unit: input.unit,
            price: input.price,
            quantity: input.quantity,
            min_stock: Some(input.min_stock),
            supplier: input.supplier,
            how_to_use: input.how_to_use,
        }
    }

    pub fn low_stock_threshold(&self) -> Decimal {
        self.min_stock.unwrap_or(DEFAULT_MIN_STOCK)
    }

    pub fn is_low_stock(&self) -> bool {
        is_low_stock(self)
    }

    /// Shelf value at the current unit price
    pub fn value(&self) -> Decimal {
        compute_total(self.price, self.quantity)
    }

    /// Case-insensitive name match used to merge replenishments
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Strictly below the item's own threshold (10 when unset)
pub fn is_low_stock(item: &StockItem) -> bool {
    item.quantity < item.low_stock_threshold()
}

/// Typed input for adding or replenishing stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewStockItem {
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub min_stock: Decimal,
    pub supplier: Option<String>,
    pub how_to_use: Option<String>,
}

/// Stock form exactly as submitted, every field still text
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockForm {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    pub category: String,
    #[validate(length(min = 1, message = "Price is required"))]
    pub price: String,
    #[validate(length(min = 1, message = "Quantity is required"))]
    pub quantity: String,
    pub unit: String,
    pub min_stock: String,
    pub supplier: String,
    pub how_to_use: String,
}

impl Default for StockForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            price: String::new(),
            quantity: String::new(),
            unit: "kg".to_string(),
            min_stock: "10".to_string(),
            supplier: String::new(),
            how_to_use: String::new(),
        }
    }
}

impl From<StockForm> for NewStockItem {
    fn from(form: StockForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            category: parse_optional_text(&form.category),
            unit: form.unit.trim().to_string(),
            price: parse_decimal_or(&form.price, Decimal::ZERO),
            quantity: parse_decimal_or(&form.quantity, Decimal::ZERO),
            min_stock: parse_min_stock(&form.min_stock),
            supplier: parse_optional_text(&form.supplier),
            how_to_use: parse_optional_text(&form.how_to_use),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: &str, min_stock: Option<&str>) -> StockItem {
        StockItem {
            id: Uuid::new_v4(),
            name: "Urea".to_string(),
            category: None,
            unit: "kg".to_string(),
            price: dec("6.5"),
            quantity: dec(quantity),
            min_stock: min_stock.map(dec),
            supplier: None,
            how_to_use: None,
        }
    }

    #[test]
    fn test_low_stock_is_strictly_below_threshold() {
        assert!(item("9", Some("10")).is_low_stock());
        assert!(!item("10", Some("10")).is_low_stock());
        assert!(item("9.99", Some("10")).is_low_stock());
    }

    #[test]
    fn test_low_stock_defaults_to_ten() {
        assert!(item("9", None).is_low_stock());
        assert!(!item("10", None).is_low_stock());
        assert!(!item("4", Some("3")).is_low_stock());
    }

    #[test]
    fn test_negative_quantity_is_low() {
        assert!(item("-2", Some("1")).is_low_stock());
    }

    #[test]
    fn test_value() {
        assert_eq!(item("40", None).value(), dec("260"));
    }

    #[test]
    fn test_name_match_ignores_case_only() {
        let urea = item("1", None);
        assert!(urea.matches_name("UREA"));
        assert!(urea.matches_name("urea"));
        assert!(!urea.matches_name("urea "));
        assert!(!urea.matches_name("Urea-46"));
    }

    #[test]
    fn test_form_coercion() {
        let form = StockForm {
            name: " DAP ".to_string(),
            category: "Phosphorus Fertilizer".to_string(),
            price: "27.5".to_string(),
            quantity: "50 bags".to_string(),
            unit: "bags".to_string(),
            min_stock: String::new(),
            supplier: "  ".to_string(),
            how_to_use: "Apply at sowing".to_string(),
        };
        let input = NewStockItem::from(form);
        assert_eq!(input.name, "DAP");
        assert_eq!(input.price, dec("27.5"));
        assert_eq!(input.quantity, dec("50"));
        assert_eq!(input.min_stock, dec("10"));
        assert_eq!(input.supplier, None);
        assert_eq!(input.how_to_use.as_deref(), Some("Apply at sowing"));
    }

    #[test]
    fn test_create_assigns_threshold() {
        let created = StockItem::create(NewStockItem::from(StockForm {
            name: "Potash".to_string(),
            price: "18".to_string(),
            quantity: "5".to_string(),
            ..StockForm::default()
        }));
        assert_eq!(created.min_stock, Some(dec("10")));
        assert!(created.is_low_stock());
    }

    #[test]
    fn test_missing_min_stock_deserializes() {
        let json = r#"{"id":"0b7f4e3c-53a1-4f0b-9a59-3bd3e8a6c1d2","name":"Urea","unit":"kg","price":6.5,"quantity":40}"#;
        let item: StockItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.min_stock, None);
        assert_eq!(item.low_stock_threshold(), dec("10"));
    }
}
