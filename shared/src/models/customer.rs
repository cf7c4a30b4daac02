//! Customer roster models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A customer folded out of sales history. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Name as written on the first sale seen for this key
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub total_purchases: u32,
    pub total_amount: Decimal,
    pub last_purchase: NaiveDate,
}

impl Customer {
    pub fn is_repeat(&self) -> bool {
        self.total_purchases > 1
    }

    /// Case-insensitive name substring, or raw phone substring
    pub fn matches_text(&self, text: &str) -> bool {
        self.name.to_lowercase().contains(&text.to_lowercase()) || self.phone.contains(text)
    }
}
