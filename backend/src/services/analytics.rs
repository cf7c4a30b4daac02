//! Analytics projections for dashboards and reports
//!
//! Every function here is a read-only view over stock and sales; nothing
//! is cached or persisted.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use shared::{
    DailyRevenue, Dashboard, MonthlyRevenue, PaymentShare, ProductPerformance, Sale, SalesSummary,
    StockItem, StockSummary,
};

use super::{InventoryLedger, SalesLedger};
use crate::config::DashboardConfig;

/// Fixed threshold used by the stock report, independent of each item's `min_stock`
pub const ANALYTICS_LOW_STOCK_THRESHOLD: Decimal = Decimal::TEN;

pub const DEFAULT_REVENUE_DAYS: u32 = 7;
pub const DEFAULT_TOP_PRODUCTS: usize = 5;
pub const DEFAULT_RECENT_SALES: usize = 5;

/// Daily revenue for the `days` calendar days ending at `reference`, oldest first
pub fn revenue_series<'a>(
    sales: impl IntoIterator<Item = &'a Sale>,
    days: u32,
    reference: NaiveDate,
) -> Vec<DailyRevenue> {
    let mut buckets: Vec<DailyRevenue> = (0..days)
        .rev()
        .filter_map(|back| reference.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| DailyRevenue {
            date,
            label: date.format("%a").to_string(),
            revenue: Decimal::ZERO,
            sale_count: 0,
        })
        .collect();

    let positions: HashMap<NaiveDate, usize> = buckets
        .iter()
        .enumerate()
        .map(|(at, bucket)| (bucket.date, at))
        .collect();

    for sale in sales {
        if let Some(&at) = positions.get(&sale.sale_date) {
            buckets[at].revenue = buckets[at].revenue.saturating_add(sale.total_price);
            buckets[at].sale_count += 1;
        }
    }

    buckets
}

/// Revenue per payment method in first-seen order
pub fn payment_breakdown<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Vec<PaymentShare> {
    let mut shares: Vec<PaymentShare> = Vec::new();
    for sale in sales {
        match shares.iter().position(|share| share.method == sale.payment_method) {
            Some(at) => shares[at].amount = shares[at].amount.saturating_add(sale.total_price),
            None => shares.push(PaymentShare {
                method: sale.payment_method,
                amount: sale.total_price,
            }),
        }
    }
    shares
}

/// Best sellers by revenue. Equal revenue keeps first-seen order.
pub fn top_products<'a>(
    sales: impl IntoIterator<Item = &'a Sale>,
    limit: usize,
) -> Vec<ProductPerformance> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut products: Vec<ProductPerformance> = Vec::new();

    for sale in sales {
        let at = *index.entry(sale.fertilizer_name.as_str()).or_insert_with(|| {
            products.push(ProductPerformance {
                name: sale.fertilizer_name.clone(),
                count: 0,
                revenue: Decimal::ZERO,
                quantity_sold: Decimal::ZERO,
            });
            products.len() - 1
        });
        let product = &mut products[at];
        product.count += 1;
        product.revenue = product.revenue.saturating_add(sale.total_price);
        product.quantity_sold = product.quantity_sold.saturating_add(sale.quantity);
    }

    products.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    products.truncate(limit);
    products
}

/// Revenue by short month name ("Jan", "Feb", ...) in first-seen order.
///
/// The year is ignored, so January 2023 and January 2024 share a bucket.
pub fn monthly_revenue<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Vec<MonthlyRevenue> {
    let mut months: Vec<MonthlyRevenue> = Vec::new();
    for sale in sales {
        let month = sale.sale_date.format("%b").to_string();
        match months.iter().position(|m| m.month == month) {
            Some(at) => {
                months[at].revenue = months[at].revenue.saturating_add(sale.total_price);
                months[at].sale_count += 1;
            }
            None => months.push(MonthlyRevenue {
                month,
                revenue: sale.total_price,
                sale_count: 1,
            }),
        }
    }
    months
}

/// Shelf totals, with low stock judged against the fixed threshold of 10
pub fn stock_summary(stock: &[StockItem]) -> StockSummary {
    StockSummary {
        product_count: stock.len(),
        total_units: stock
            .iter()
            .map(|item| item.quantity)
            .fold(Decimal::ZERO, Decimal::saturating_add),
        total_value: stock
            .iter()
            .map(StockItem::value)
            .fold(Decimal::ZERO, Decimal::saturating_add),
        low_stock: stock
            .iter()
            .filter(|item| item.quantity < ANALYTICS_LOW_STOCK_THRESHOLD)
            .cloned()
            .collect(),
    }
}

/// Count and revenue of a set of sales
pub fn summarize<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> SalesSummary {
    sales.into_iter().fold(SalesSummary::default(), |mut acc, sale| {
        acc.count += 1;
        acc.revenue = acc.revenue.saturating_add(sale.total_price);
        acc
    })
}

/// Mean sale value; zero when there are no sales
pub fn average_order_value<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Decimal {
    let summary = summarize(sales);
    if summary.count == 0 {
        return Decimal::ZERO;
    }
    summary.revenue / Decimal::from(summary.count)
}

/// Landing dashboard. Low stock here uses each item's own threshold.
pub fn dashboard(
    inventory: &InventoryLedger,
    sales: &SalesLedger,
    reference: NaiveDate,
    options: &DashboardConfig,
) -> Dashboard {
    Dashboard {
        total_revenue: sales.total_revenue(),
        sale_count: sales.sales().len(),
        stock_value: inventory.total_value(),
        product_count: inventory.items().len(),
        low_stock: inventory.list_low_stock().into_iter().cloned().collect(),
        recent_sales: sales
            .recent_sales(options.recent_sales)
            .into_iter()
            .cloned()
            .collect(),
        revenue_series: revenue_series(sales.sales(), options.revenue_days, reference),
    }
}
