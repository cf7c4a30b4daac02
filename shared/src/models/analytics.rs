//! Report rows produced by the analytics projections

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Sale, StockItem};
use crate::types::PaymentMethod;

/// One calendar-day bucket of the revenue chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon"
    pub label: String,
    pub revenue: Decimal,
    pub sale_count: usize,
}

/// Revenue collected through one payment channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentShare {
    pub method: PaymentMethod,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPerformance {
    pub name: String,
    pub count: usize,
    pub revenue: Decimal,
    pub quantity_sold: Decimal,
}

/// Revenue keyed by short month name. Years are not distinguished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: Decimal,
    pub sale_count: usize,
}

/// Shelf totals plus the items under the fixed analytics threshold
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub product_count: usize,
    pub total_units: Decimal,
    pub total_value: Decimal,
    pub low_stock: Vec<StockItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub count: usize,
    pub revenue: Decimal,
}

/// Everything the landing dashboard shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_revenue: Decimal,
    pub sale_count: usize,
    pub stock_value: Decimal,
    pub product_count: usize,
    /// Items below their own `min_stock`
    pub low_stock: Vec<StockItem>,
    pub recent_sales: Vec<Sale>,
    pub revenue_series: Vec<DailyRevenue>,
}
