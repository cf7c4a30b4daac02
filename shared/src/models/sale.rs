//! Sales transaction models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::StockItem;
use crate::parse::{
    parse_decimal_or, parse_optional_text, parse_payment_method, parse_sale_date, parse_stock_ref,
};
use crate::types::PaymentMethod;

/// Line total. Saturates instead of overflowing.
pub fn compute_total(price: Decimal, quantity: Decimal) -> Decimal {
    price.saturating_mul(quantity)
}

/// A completed sale.
///
/// Product and customer fields are a snapshot taken when the sale was
/// recorded; later stock edits never reach back into history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Time-ordered, so ids sort in creation order
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Date the transaction happened, possibly backdated
    pub sale_date: NaiveDate,
    #[serde(default)]
    pub fertilizer_id: Option<Uuid>,
    pub fertilizer_name: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub unit: String,
    #[serde(default)]
    pub how_to_use: Option<String>,
    /// `price * quantity`, fixed at save time
    pub total_price: Decimal,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub customer_address: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Sale {
    /// Stamp an input with a fresh id, creation time and computed total
    pub fn record(input: NewSale, created_at: DateTime<Utc>) -> Self {
        let total_price = compute_total(input.price, input.quantity);
        Self {
            id: Uuid::now_v7(),
            created_at,
            sale_date: input.sale_date,
            fertilizer_id: input.fertilizer_id,
            fertilizer_name: input.fertilizer_name,
            price: input.price,
            quantity: input.quantity,
            unit: input.unit,
            how_to_use: input.how_to_use,
            total_price,
            customer_name: input.customer_name,
            customer_phone: input.customer_phone,
            customer_address: input.customer_address,
            customer_email: input.customer_email,
            payment_method: input.payment_method,
            notes: input.notes,
        }
    }

    /// Case-insensitive substring match on product or customer name
    pub fn matches_text(&self, text: &str) -> bool {
        let needle = text.to_lowercase();
        self.fertilizer_name.to_lowercase().contains(&needle)
            || self.customer_name.to_lowercase().contains(&needle)
    }
}

/// Typed input for recording a sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSale {
    pub fertilizer_id: Option<Uuid>,
    pub fertilizer_name: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub unit: String,
    pub how_to_use: Option<String>,
    pub sale_date: NaiveDate,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub customer_email: Option<String>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Sale form exactly as submitted, every field still text
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaleForm {
    pub fertilizer_id: String,
    #[validate(length(min = 1, message = "Fertilizer is required"))]
    pub fertilizer_name: String,
    #[validate(length(min = 1, message = "Price is required"))]
    pub price: String,
    #[validate(length(min = 1, message = "Quantity is required"))]
    pub quantity: String,
    pub unit: String,
    pub how_to_use: String,
    pub sale_date: String,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "Customer phone is required"))]
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub payment_method: String,
    pub notes: String,
}

impl Default for SaleForm {
    fn default() -> Self {
        Self {
            fertilizer_id: String::new(),
            fertilizer_name: String::new(),
            price: String::new(),
            quantity: String::new(),
            unit: "kg".to_string(),
            how_to_use: String::new(),
            sale_date: String::new(),
            customer_name: String::new(),
            customer_phone: String::new(),
            customer_email: String::new(),
            customer_address: String::new(),
            payment_method: PaymentMethod::Cash.as_str().to_string(),
            notes: String::new(),
        }
    }
}

impl SaleForm {
    /// Prefill product fields from a stock item picked off the shelf
    pub fn select_fertilizer(&mut self, item: &StockItem) {
        self.fertilizer_id = item.id.to_string();
        self.fertilizer_name = item.name.clone();
        self.price = item.price.to_string();
        self.unit = item.unit.clone();
        self.how_to_use = item.how_to_use.clone().unwrap_or_default();
    }

    /// Coerce into a typed input; an unparseable sale date becomes `today`
    pub fn into_new_sale(self, today: NaiveDate) -> NewSale {
        NewSale {
            fertilizer_id: parse_stock_ref(&self.fertilizer_id),
            fertilizer_name: self.fertilizer_name.trim().to_string(),
            price: parse_decimal_or(&self.price, Decimal::ZERO),
            quantity: parse_decimal_or(&self.quantity, Decimal::ZERO),
            unit: self.unit.trim().to_string(),
            how_to_use: parse_optional_text(&self.how_to_use),
            sale_date: parse_sale_date(&self.sale_date, today),
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            customer_address: parse_optional_text(&self.customer_address),
            customer_email: parse_optional_text(&self.customer_email),
            payment_method: parse_payment_method(&self.payment_method),
            notes: parse_optional_text(&self.notes),
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

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn filled_form() -> SaleForm {
        SaleForm {
            fertilizer_name: "Urea".to_string(),
            price: "6.5".to_string(),
            quantity: "4".to_string(),
            sale_date: "2024-06-10".to_string(),
            customer_name: "Ravi".to_string(),
            customer_phone: "9876543210".to_string(),
            payment_method: "UPI".to_string(),
            ..SaleForm::default()
        }
    }

    #[test]
    fn test_compute_total() {
        assert_eq!(compute_total(dec("6.5"), dec("4")), dec("26"));
        assert_eq!(compute_total(dec("12.25"), dec("0.5")), dec("6.125"));
        assert_eq!(compute_total(Decimal::ZERO, dec("9")), Decimal::ZERO);
    }

    #[test]
    fn test_compute_total_saturates() {
        assert_eq!(compute_total(Decimal::MAX, dec("2")), Decimal::MAX);
    }

    #[test]
    fn test_record_computes_total_once() {
        let created_at = Utc::now();
        let sale = Sale::record(filled_form().into_new_sale(today()), created_at);
        assert_eq!(sale.total_price, dec("26"));
        assert_eq!(sale.created_at, created_at);
        assert_eq!(sale.payment_method, PaymentMethod::Upi);
        assert_eq!(sale.fertilizer_id, None);
    }

    #[test]
    fn test_record_ids_follow_creation_order() {
        let first = Sale::record(filled_form().into_new_sale(today()), Utc::now());
        let second = Sale::record(filled_form().into_new_sale(today()), Utc::now());
        assert!(first.id < second.id);
    }

    #[test]
    fn test_select_fertilizer_prefills_snapshot() {
        let item = StockItem {
            id: Uuid::new_v4(),
            name: "DAP".to_string(),
            category: None,
            unit: "bags".to_string(),
            price: dec("1350"),
            quantity: dec("20"),
            min_stock: None,
            supplier: None,
            how_to_use: Some("Basal dose".to_string()),
        };
        let mut form = SaleForm::default();
        form.select_fertilizer(&item);
        form.quantity = "2".to_string();

        let input = form.into_new_sale(today());
        assert_eq!(input.fertilizer_id, Some(item.id));
        assert_eq!(input.price, dec("1350"));
        assert_eq!(input.unit, "bags");
        assert_eq!(input.how_to_use.as_deref(), Some("Basal dose"));
    }

    #[test]
    fn test_form_coercion_defaults() {
        let input = SaleForm {
            sale_date: "yesterday".to_string(),
            price: "n/a".to_string(),
            payment_method: "barter".to_string(),
            ..filled_form()
        }
        .into_new_sale(today());
        assert_eq!(input.sale_date, today());
        assert_eq!(input.price, Decimal::ZERO);
        assert_eq!(input.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn test_matches_text() {
        let sale = Sale::record(filled_form().into_new_sale(today()), Utc::now());
        assert!(sale.matches_text("ure"));
        assert!(sale.matches_text("RAVI"));
        assert!(sale.matches_text(""));
        assert!(!sale.matches_text("potash"));
    }

    #[test]
    fn test_persisted_shape_is_camel_case() {
        let sale = Sale::record(filled_form().into_new_sale(today()), Utc::now());
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["fertilizerName"], "Urea");
        assert_eq!(json["saleDate"], "2024-06-10");
        assert_eq!(json["paymentMethod"], "UPI");
        assert!(json.get("totalPrice").is_some());
    }
}
